//! Pest front end for the pseudocode grammar.
//!
//! Parsing proper is delegated to pest; this module only drives it and
//! converts its errors. The pair tree pest produces is the concrete
//! syntax tree the builder lowers: each pair exposes its matched rule,
//! ordered children, terminal text, and source span.

use pest::Parser;
use pest_derive::Parser;

use crate::ast::Program;
use crate::builder;
use crate::errors::{GclError, SourceContext};

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct PseudocodeParser;

/// Parse pseudocode source into an AST [`Program`].
///
/// Empty or whitespace-only input yields a program with no statements.
pub fn parse_program(source_text: &str, source: &SourceContext) -> Result<Program, GclError> {
    let mut pairs = PseudocodeParser::parse(Rule::program, source_text)
        .map_err(|e| convert_parse_error(e, source))?;

    let program = pairs.next().unwrap(); // pest guarantees the program rule exists
    builder::build_program(program, source)
}

fn convert_parse_error(error: pest::error::Error<Rule>, source: &SourceContext) -> GclError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => pos..pos,
        pest::error::InputLocation::Span((start, end)) => start..end,
    };
    GclError::syntax(error.variant.message(), span.into(), source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn parse(text: &str) -> Result<Program, GclError> {
        parse_program(text, &SourceContext::from_file("test", text))
    }

    #[test]
    fn empty_input_gives_empty_program() {
        assert!(parse("").unwrap().statements.is_empty());
    }

    #[test]
    fn whitespace_only_input_gives_empty_program() {
        assert!(parse("  \n\t ").unwrap().statements.is_empty());
    }

    #[test]
    fn simple_statements_parse() {
        let program = parse("skip; abort; x := 1").unwrap();
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn unclosed_if_fails() {
        let result = parse("if true -> skip");
        let err = result.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    }

    #[test]
    fn trailing_junk_fails() {
        assert!(parse("skip skip").is_err());
    }

    #[test]
    fn keywords_are_not_variable_names() {
        assert!(parse("od := 1").is_err());
        assert!(parse("odd := 1").is_ok());
        assert!(parse("truth := 1").is_ok());
    }
}
