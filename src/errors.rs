//! Error handling for the gcl pipeline.
//!
//! Validation is delegated to the grammar, so the taxonomy is narrow:
//! either the source text failed to parse, or the builder met a concrete
//! syntax node it has no lowering for. Neither stage retries; any failure
//! aborts the pipeline for that input.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

/// Source text plus the name it should be reported under.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to a NamedSource for miette error reporting.
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Lexical or context-free error reported by the parser.
    #[error("syntax error: {message}")]
    Syntax { message: String },
    /// The concrete syntax tree contained a rule the lowering does not
    /// recognize. This indicates a grammar/builder mismatch, not bad user
    /// input.
    #[error("unrecognized construct: {rule}")]
    UnrecognizedRule { rule: String },
}

impl ErrorKind {
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "syntax",
            Self::UnrecognizedRule { .. } => "unrecognized_rule",
        }
    }
}

/// The single error type of the crate.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct GclError {
    pub kind: ErrorKind,
    pub named_source: Arc<NamedSource<String>>,
    pub span: SourceSpan,
}

impl GclError {
    pub fn syntax(message: impl Into<String>, span: SourceSpan, source: &SourceContext) -> Self {
        Self {
            kind: ErrorKind::Syntax {
                message: message.into(),
            },
            named_source: source.to_named_source(),
            span,
        }
    }

    pub fn unrecognized_rule(
        rule: impl Into<String>,
        span: SourceSpan,
        source: &SourceContext,
    ) -> Self {
        Self {
            kind: ErrorKind::UnrecognizedRule { rule: rule.into() },
            named_source: source.to_named_source(),
            span,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self.kind {
            ErrorKind::Syntax { .. } => "invalid syntax here",
            ErrorKind::UnrecognizedRule { .. } => "unexpected construct",
        }
    }
}

impl Diagnostic for GclError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("gcl::{}", self.kind.code_suffix())))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.primary_label().into()), self.span);
        Some(Box::new(std::iter::once(label)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.named_source)
    }
}

/// Prints an error with full miette diagnostics: source snippet, span
/// label, and error code. For user-facing CLI output.
pub fn print_error(error: GclError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
