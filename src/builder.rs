//! Lowering from the concrete syntax tree to the AST.
//!
//! One typed function per grammar rule, walking the pest pair tree once,
//! top-down. The builder assumes its input was already accepted by the
//! grammar and performs no validation of its own; the only failure it can
//! report is a rule appearing in a position the lowering does not
//! recognize, which means the grammar and the builder have drifted apart.

use miette::SourceSpan;
use pest::iterators::Pair;

use crate::ast::{
    BoolExpr, BoolOp, CompOp, GuardedCommands, IntExpr, IntOp, Program, Statement, StatementKind,
    TextPosition, TextRange, Variable,
};
use crate::errors::{GclError, SourceContext};
use crate::parser::Rule;

/// Lower a `program` pair into the root AST node.
pub fn build_program(pair: Pair<Rule>, source: &SourceContext) -> Result<Program, GclError> {
    let mut statements = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::statements => statements = build_statements(inner, source)?,
            Rule::EOI => {}
            _ => return Err(unrecognized(&inner, source)),
        }
    }
    Ok(Program { statements })
}

fn build_statements(pair: Pair<Rule>, source: &SourceContext) -> Result<Vec<Statement>, GclError> {
    pair.into_inner()
        .map(|statement| build_statement(statement, source))
        .collect()
}

fn build_statement(pair: Pair<Rule>, source: &SourceContext) -> Result<Statement, GclError> {
    // The range is taken from the `statement` node itself, not from the
    // more specific rule beneath it, so it covers the whole construct.
    let range = text_range(&pair);
    let inner = pair.into_inner().next().unwrap(); // grammar guarantees one alternative

    let kind = match inner.as_rule() {
        Rule::abort_statement => StatementKind::Abort,
        Rule::skip_statement => StatementKind::Skip,
        Rule::assignment => {
            let (lvalues, rvalues) = build_assignment(inner, source)?;
            StatementKind::Assignment { lvalues, rvalues }
        }
        Rule::if_statement => StatementKind::If(build_guarded_container(inner, source)?),
        Rule::do_statement => StatementKind::Do(build_guarded_container(inner, source)?),
        _ => return Err(unrecognized(&inner, source)),
    };

    Ok(Statement { range, kind })
}

/// Lower an `assignment` into its parallel lvalue/rvalue sequences.
///
/// The grammar nests vector assignments outside-in, so each wrapper's
/// variable goes to the *front* of the lvalues while its expression goes
/// to the *back* of the rvalues. That asymmetry recovers the original
/// left-to-right pairing: for `a, b, c := 1, 2, 3` the result is
/// `lvalues = [a, b, c]`, `rvalues = [1, 2, 3]`.
fn build_assignment(
    pair: Pair<Rule>,
    source: &SourceContext,
) -> Result<(Vec<Variable>, Vec<IntExpr>), GclError> {
    let inner = pair.into_inner().next().unwrap(); // grammar guarantees one alternative
    match inner.as_rule() {
        Rule::scalar_assignment => {
            let mut parts = inner.into_inner();
            let variable = build_variable(parts.next().unwrap(), source)?;
            let value = build_int_expr(parts.next().unwrap(), source)?;
            Ok((vec![variable], vec![value]))
        }
        Rule::vector_assignment => {
            let mut parts = inner.into_inner();
            let variable = build_variable(parts.next().unwrap(), source)?;
            let (mut lvalues, mut rvalues) = build_assignment(parts.next().unwrap(), source)?;
            let value = build_int_expr(parts.next().unwrap(), source)?;
            lvalues.insert(0, variable);
            rvalues.push(value);
            Ok((lvalues, rvalues))
        }
        _ => Err(unrecognized(&inner, source)),
    }
}

/// `if` and `do` share their shape; only the statement kind differs.
fn build_guarded_container(
    pair: Pair<Rule>,
    source: &SourceContext,
) -> Result<GuardedCommands, GclError> {
    // children: opening keyword, guarded_commands, closing keyword
    let commands = pair.into_inner().nth(1).unwrap();
    build_guarded_commands(commands, source)
}

fn build_guarded_commands(
    pair: Pair<Rule>,
    source: &SourceContext,
) -> Result<GuardedCommands, GclError> {
    let mut guards = Vec::new();
    let mut commands = Vec::new();
    for clause in pair.into_inner() {
        let mut parts = clause.into_inner();
        guards.push(build_bool_expr(parts.next().unwrap(), source)?);
        commands.push(build_statements(parts.next().unwrap(), source)?);
    }
    Ok(GuardedCommands { guards, commands })
}

fn build_int_expr(pair: Pair<Rule>, source: &SourceContext) -> Result<IntExpr, GclError> {
    let mut inner = pair.into_inner();
    let mut expr = build_int_term(inner.next().unwrap(), source)?;
    while let Some(op) = inner.next() {
        // an operator is always followed by another term
        let right = build_int_term(inner.next().unwrap(), source)?;
        let op = if op.as_str() == "+" {
            IntOp::Plus
        } else {
            IntOp::Minus
        };
        expr = IntExpr::Binary {
            op,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_int_term(pair: Pair<Rule>, source: &SourceContext) -> Result<IntExpr, GclError> {
    let mut inner = pair.into_inner();
    let mut expr = build_int_factor(inner.next().unwrap(), source)?;
    while inner.next().is_some() {
        // the only multiplicative operator is `*`
        let right = build_int_factor(inner.next().unwrap(), source)?;
        expr = IntExpr::Binary {
            op: IntOp::Multiply,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_int_factor(pair: Pair<Rule>, source: &SourceContext) -> Result<IntExpr, GclError> {
    let inner = pair.into_inner().next().unwrap(); // grammar guarantees one alternative
    match inner.as_rule() {
        Rule::paren_int_expr => {
            let (negated, body) = split_negation(inner);
            Ok(IntExpr::Parets {
                negated,
                inner: Box::new(build_int_expr(body, source)?),
            })
        }
        Rule::variable_expr => {
            let (negated, body) = split_negation(inner);
            Ok(IntExpr::Var {
                negated,
                var: build_variable(body, source)?,
            })
        }
        Rule::int_const_expr => {
            let (negated, body) = split_negation(inner);
            Ok(IntExpr::Const {
                negated,
                literal: body.as_str().to_string(),
            })
        }
        _ => Err(unrecognized(&inner, source)),
    }
}

fn build_bool_expr(pair: Pair<Rule>, source: &SourceContext) -> Result<BoolExpr, GclError> {
    let mut inner = pair.into_inner();
    let mut expr = build_bool_term(inner.next().unwrap(), source)?;
    while inner.next().is_some() {
        let right = build_bool_term(inner.next().unwrap(), source)?;
        expr = BoolExpr::Binary {
            op: BoolOp::Or,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_bool_term(pair: Pair<Rule>, source: &SourceContext) -> Result<BoolExpr, GclError> {
    let mut inner = pair.into_inner();
    let mut expr = build_bool_factor(inner.next().unwrap(), source)?;
    while inner.next().is_some() {
        let right = build_bool_factor(inner.next().unwrap(), source)?;
        expr = BoolExpr::Binary {
            op: BoolOp::And,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }
    Ok(expr)
}

fn build_bool_factor(pair: Pair<Rule>, source: &SourceContext) -> Result<BoolExpr, GclError> {
    let inner = pair.into_inner().next().unwrap(); // grammar guarantees one alternative
    match inner.as_rule() {
        Rule::bool_const_expr => {
            let (negated, literal) = split_negation(inner);
            Ok(BoolExpr::Const {
                negated,
                value: literal.as_rule() == Rule::kw_true,
            })
        }
        Rule::paren_bool_expr => {
            let (negated, body) = split_negation(inner);
            Ok(BoolExpr::Parets {
                negated,
                inner: Box::new(build_bool_expr(body, source)?),
            })
        }
        Rule::comparison_expr => {
            let mut parts = inner.into_inner();
            let left = build_int_expr(parts.next().unwrap(), source)?;
            let op = build_comparison_op(parts.next().unwrap(), source)?;
            let right = build_int_expr(parts.next().unwrap(), source)?;
            Ok(BoolExpr::Comparison { op, left, right })
        }
        _ => Err(unrecognized(&inner, source)),
    }
}

fn build_comparison_op(pair: Pair<Rule>, source: &SourceContext) -> Result<CompOp, GclError> {
    let inner = pair.into_inner().next().unwrap(); // grammar guarantees one alternative
    match inner.as_rule() {
        Rule::lt => Ok(CompOp::Less),
        Rule::leq => Ok(CompOp::LessOrEq),
        Rule::gt => Ok(CompOp::Greater),
        Rule::geq => Ok(CompOp::GreaterOrEq),
        Rule::eq => Ok(CompOp::Eq),
        Rule::neq => Ok(CompOp::NotEq),
        _ => Err(unrecognized(&inner, source)),
    }
}

fn build_variable(pair: Pair<Rule>, source: &SourceContext) -> Result<Variable, GclError> {
    let mut inner = pair.into_inner();
    let name = inner.next().unwrap().as_str().to_string(); // grammar guarantees the name
    let selectors = match inner.next() {
        Some(selectors) => build_selectors(selectors, source)?,
        None => Vec::new(),
    };
    Ok(Variable { name, selectors })
}

fn build_selectors(pair: Pair<Rule>, source: &SourceContext) -> Result<Vec<IntExpr>, GclError> {
    pair.into_inner()
        .map(|selector| {
            let expr = selector.into_inner().next().unwrap(); // a selector wraps one int_expr
            build_int_expr(expr, source)
        })
        .collect()
}

/// Returns whether a leading `-`/`~` token is present, plus the pair that
/// follows it. Negation is a flag on the operand, never a wrapper node.
fn split_negation(pair: Pair<Rule>) -> (bool, Pair<Rule>) {
    let mut inner = pair.into_inner();
    let first = inner.next().unwrap(); // grammar guarantees the operand
    match first.as_rule() {
        Rule::minus | Rule::negation => (true, inner.next().unwrap()),
        _ => (false, first),
    }
}

/// pest reports 1-based lines and columns; the serialized form keeps rows
/// 1-based but columns 0-based. The pair's end position is already one
/// past the last matched character.
fn text_range(pair: &Pair<Rule>) -> TextRange {
    let span = pair.as_span();
    let (start_row, start_col) = span.start_pos().line_col();
    let (end_row, end_col) = span.end_pos().line_col();
    TextRange {
        start: TextPosition {
            row: start_row,
            col: start_col - 1,
        },
        end: TextPosition {
            row: end_row,
            col: end_col - 1,
        },
    }
}

fn unrecognized(pair: &Pair<Rule>, source: &SourceContext) -> GclError {
    GclError::unrecognized_rule(format!("{:?}", pair.as_rule()), byte_span(pair), source)
}

fn byte_span(pair: &Pair<Rule>) -> SourceSpan {
    (pair.as_span().start()..pair.as_span().end()).into()
}
