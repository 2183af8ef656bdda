//! AST for the guarded-command pseudocode language.
//!
//! Every family of nodes is a closed enum; shared data (`negated`, the
//! statement range) are ordinary fields, not inherited state. Nodes are
//! immutable once the builder hands them over, and ownership is strictly
//! tree-shaped: each child has exactly one parent.

use serde::{Deserialize, Serialize};

/// A position in the source text. `row` is the 1-based line number, `col`
/// the 0-based character offset within that line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextPosition {
    pub row: usize,
    pub col: usize,
}

/// Source extent of a statement. `end` points one past the last character
/// of the construct, not at the last character.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

/// Root of the AST; owns the whole tree for the duration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A statement together with the source range of the construct it was
/// built from. The range is assigned once by the builder and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub range: TextRange,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    Abort,
    Skip,
    /// Simultaneous assignment: `lvalues[i]` receives `rvalues[i]`. Both
    /// sequences have the same nonzero length for grammar-accepted input.
    Assignment {
        lvalues: Vec<Variable>,
        rvalues: Vec<IntExpr>,
    },
    If(GuardedCommands),
    Do(GuardedCommands),
}

/// The guard/command pairs of an `if` or `do`: `guards[i]` guards
/// `commands[i]`. Both sequences have the same nonzero length for
/// grammar-accepted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardedCommands {
    pub guards: Vec<BoolExpr>,
    pub commands: Vec<Vec<Statement>>,
}

/// A variable reference with zero or more index expressions:
/// `v`, `v[i]`, `v[i][j+1]`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub selectors: Vec<IntExpr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IntExpr {
    Var {
        negated: bool,
        var: Variable,
    },
    /// The literal text is kept verbatim, so leading zeroes and literals
    /// wider than any machine integer survive untouched.
    Const {
        negated: bool,
        literal: String,
    },
    Parets {
        negated: bool,
        inner: Box<IntExpr>,
    },
    /// Unary minus never attaches to a binary form directly (it has to be
    /// parenthesized first), so there is no `negated` flag here.
    Binary {
        op: IntOp,
        left: Box<IntExpr>,
        right: Box<IntExpr>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntOp {
    Plus,
    Minus,
    Multiply,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoolExpr {
    Const {
        negated: bool,
        value: bool,
    },
    Parets {
        negated: bool,
        inner: Box<BoolExpr>,
    },
    Binary {
        op: BoolOp,
        left: Box<BoolExpr>,
        right: Box<BoolExpr>,
    },
    /// Comparison operands are integer expressions, not boolean ones.
    Comparison {
        op: CompOp,
        left: IntExpr,
        right: IntExpr,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompOp {
    Less,
    LessOrEq,
    Greater,
    GreaterOrEq,
    Eq,
    NotEq,
}

impl CompOp {
    /// The operator's surface symbol, as it appears in source and in the
    /// serialized form.
    pub fn symbol(self) -> &'static str {
        match self {
            CompOp::Less => "<",
            CompOp::LessOrEq => "<=",
            CompOp::Greater => ">",
            CompOp::GreaterOrEq => ">=",
            CompOp::Eq => "=",
            CompOp::NotEq => "<>",
        }
    }
}
