//! Front end for a Dijkstra-style guarded-command pseudocode language.
//!
//! Pipeline: source text → concrete syntax tree (pest) → [`ast::Program`]
//! → canonical JSON text. Each stage is a pure function over an
//! independently owned tree, so pipelines for separate inputs can run
//! concurrently without coordination.

pub use crate::errors::{GclError, SourceContext};

pub mod ast;
pub mod builder;
pub mod cli;
pub mod errors;
pub mod parser;
pub mod serializer;
