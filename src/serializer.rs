//! Canonical textual form of the AST.
//!
//! A compact JSON rendering with exact field order, walked depth-first and
//! left-to-right into one append-only buffer. All formatting lives here,
//! keyed by variant, so the node types stay pure data and the same AST
//! always serializes to the same bytes.
//!
//! Two quirks are part of the published format: integer constants are
//! emitted as their verbatim literal text, unquoted, and boolean binary
//! operators use the field names `left_bool`/`right_bool` where their
//! integer counterparts use `left`/`right`.

use crate::ast::{
    BoolExpr, BoolOp, IntExpr, IntOp, Program, Statement, StatementKind, TextRange, Variable,
};

/// Render a whole program, e.g.
/// `[{"start":{"row":1,"col":0},"end":{"row":1,"col":4},"type":"skip"}]`.
pub fn serialize_program(program: &Program) -> String {
    let mut out = String::new();
    write_statement_list(&program.statements, &mut out);
    out
}

fn write_statement_list(statements: &[Statement], out: &mut String) {
    out.push('[');
    write_separated(statements, out, write_statement);
    out.push(']');
}

fn write_statement(statement: &Statement, out: &mut String) {
    out.push('{');
    write_text_range(&statement.range, out);
    out.push_str(",\"type\":\"");
    out.push_str(statement_tag(&statement.kind));
    out.push('"');

    // Variant fields carry their own leading comma, so kinds without any
    // (abort, skip) close the object right after the tag.
    match &statement.kind {
        StatementKind::Abort | StatementKind::Skip => {}
        StatementKind::Assignment { lvalues, rvalues } => {
            out.push_str(",\"lvalues\":[");
            write_separated(lvalues, out, write_variable);
            out.push_str("],\"rvalues\":[");
            write_separated(rvalues, out, write_int_expr);
            out.push(']');
        }
        StatementKind::If(gc) | StatementKind::Do(gc) => {
            out.push_str(",\"guards\":[");
            write_separated(&gc.guards, out, write_bool_expr);
            out.push_str("],\"commands\":[");
            write_separated(&gc.commands, out, |block, out| {
                write_statement_list(block, out);
            });
            out.push(']');
        }
    }

    out.push('}');
}

fn statement_tag(kind: &StatementKind) -> &'static str {
    match kind {
        StatementKind::Abort => "abort",
        StatementKind::Skip => "skip",
        StatementKind::Assignment { .. } => "assignment",
        StatementKind::If(_) => "if",
        StatementKind::Do(_) => "do",
    }
}

fn write_text_range(range: &TextRange, out: &mut String) {
    out.push_str(&format!(
        "\"start\":{{\"row\":{},\"col\":{}}},\"end\":{{\"row\":{},\"col\":{}}}",
        range.start.row, range.start.col, range.end.row, range.end.col,
    ));
}

fn write_int_expr(expr: &IntExpr, out: &mut String) {
    match expr {
        IntExpr::Var { negated, var } => {
            out.push_str("{\"type\":\"var\",\"negated\":");
            out.push_str(bool_text(*negated));
            out.push_str(",\"var\":");
            write_variable(var, out);
            out.push('}');
        }
        IntExpr::Const { negated, literal } => {
            out.push_str("{\"type\":\"const\",\"negated\":");
            out.push_str(bool_text(*negated));
            out.push_str(",\"const\":");
            out.push_str(literal); // verbatim literal text, unquoted
            out.push('}');
        }
        IntExpr::Parets { negated, inner } => {
            out.push_str("{\"type\":\"parets\",\"negated\":");
            out.push_str(bool_text(*negated));
            out.push_str(",\"inner\":");
            write_int_expr(inner, out);
            out.push('}');
        }
        IntExpr::Binary { op, left, right } => {
            out.push_str("{\"type\":\"");
            out.push_str(match op {
                IntOp::Plus => "plus",
                IntOp::Minus => "minus",
                IntOp::Multiply => "mult",
            });
            out.push_str("\",\"left\":");
            write_int_expr(left, out);
            out.push_str(",\"right\":");
            write_int_expr(right, out);
            out.push('}');
        }
    }
}

fn write_bool_expr(expr: &BoolExpr, out: &mut String) {
    match expr {
        BoolExpr::Const { negated, value } => {
            out.push_str("{\"type\":\"const\",\"negated\":");
            out.push_str(bool_text(*negated));
            out.push_str(",\"const\":");
            out.push_str(bool_text(*value));
            out.push('}');
        }
        BoolExpr::Parets { negated, inner } => {
            out.push_str("{\"type\":\"parets\",\"negated\":");
            out.push_str(bool_text(*negated));
            out.push_str(",\"inner\":");
            write_bool_expr(inner, out);
            out.push('}');
        }
        BoolExpr::Binary { op, left, right } => {
            out.push_str("{\"type\":\"");
            out.push_str(match op {
                BoolOp::And => "and",
                BoolOp::Or => "or",
            });
            out.push_str("\",\"left_bool\":");
            write_bool_expr(left, out);
            out.push_str(",\"right_bool\":");
            write_bool_expr(right, out);
            out.push('}');
        }
        BoolExpr::Comparison { op, left, right } => {
            out.push_str("{\"type\":\"comp\",\"comp\":\"");
            out.push_str(op.symbol());
            out.push_str("\",\"left_int\":");
            write_int_expr(left, out);
            out.push_str(",\"right_int\":");
            write_int_expr(right, out);
            out.push('}');
        }
    }
}

// Names are restricted to [A-Za-z0-9_] by the grammar, so they never need
// JSON escaping.
fn write_variable(variable: &Variable, out: &mut String) {
    out.push_str("{\"name\":\"");
    out.push_str(&variable.name);
    out.push_str("\",\"selectors\":[");
    write_separated(&variable.selectors, out, write_int_expr);
    out.push_str("]}");
}

/// Single comma between elements, none after the last, nothing for an
/// empty slice. Every container in the format goes through here.
fn write_separated<T>(items: &[T], out: &mut String, mut write_item: impl FnMut(&T, &mut String)) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_item(item, out);
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
