// End-to-end checks: source text -> AST -> canonical JSON text.

use gcl::serializer::serialize_program;
use gcl::{parser, SourceContext};

fn pipeline(text: &str) -> String {
    let source = SourceContext::from_file("test", text);
    let program = parser::parse_program(text, &source).expect("parse should succeed");
    serialize_program(&program)
}

#[test]
fn skip_serializes_with_exact_range() {
    // one-line statement starting at column 0 with 4-character text
    assert_eq!(
        pipeline("skip"),
        r#"[{"start":{"row":1,"col":0},"end":{"row":1,"col":4},"type":"skip"}]"#
    );
}

#[test]
fn abort_has_only_range_and_type() {
    assert_eq!(
        pipeline("abort"),
        r#"[{"start":{"row":1,"col":0},"end":{"row":1,"col":5},"type":"abort"}]"#
    );
}

#[test]
fn swap_assignment_round_trips_to_exact_text() {
    assert_eq!(
        pipeline("x, y := y, x"),
        concat!(
            r#"[{"start":{"row":1,"col":0},"end":{"row":1,"col":12},"type":"assignment","#,
            r#""lvalues":[{"name":"x","selectors":[]},{"name":"y","selectors":[]}],"#,
            r#""rvalues":[{"type":"var","negated":false,"var":{"name":"y","selectors":[]}},"#,
            r#"{"type":"var","negated":false,"var":{"name":"x","selectors":[]}}]}]"#,
        )
    );
}

#[test]
fn serialization_is_deterministic_across_runs() {
    let text = "do i < n -> a[i] := 2 * a[i]; i := i + 1 od";
    assert_eq!(pipeline(text), pipeline(text));
}

#[test]
fn output_is_machine_readable_json() {
    let text = "\
s := 0; i := 1;
do i <= n ->
  s := s + a[i];
  i := i + 1
od;
if s > 0 -> r := 1
[] s = 0 -> r := 0
[] true -> r := -1
fi";
    let out = pipeline(text);
    let value: serde_json::Value = serde_json::from_str(&out).expect("output should be JSON");

    let statements = value.as_array().expect("top level is an array");
    assert_eq!(statements.len(), 4);

    let loop_statement = &statements[2];
    assert_eq!(loop_statement["type"], "do");
    let guards = loop_statement["guards"].as_array().unwrap();
    let commands = loop_statement["commands"].as_array().unwrap();
    assert_eq!(guards.len(), commands.len());
    assert_eq!(commands[0].as_array().unwrap().len(), 2);

    let branch = &statements[3];
    assert_eq!(branch["type"], "if");
    assert_eq!(branch["guards"].as_array().unwrap().len(), 3);
    // fixed single-quoted tag for boolean constants
    assert_eq!(branch["guards"][2]["type"], "const");
    assert_eq!(branch["guards"][2]["const"], true);
    // unary minus is a flag on the constant, not a wrapper node
    let last_rvalue = &branch["commands"][2][0]["rvalues"][0];
    assert_eq!(last_rvalue["type"], "const");
    assert_eq!(last_rvalue["negated"], true);
    assert_eq!(last_rvalue["const"], 1);
}

#[test]
fn statement_ranges_follow_source_lines() {
    let out = pipeline("skip;\nabort");
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["start"]["row"], 1);
    assert_eq!(value[0]["end"]["col"], 4);
    assert_eq!(value[1]["start"]["row"], 2);
    assert_eq!(value[1]["start"]["col"], 0);
    assert_eq!(value[1]["end"]["col"], 5);
}

#[test]
fn if_statement_range_spans_keyword_to_keyword() {
    let out = pipeline("if true -> skip fi");
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["start"]["col"], 0);
    assert_eq!(value[0]["end"]["col"], 18);
    // the nested statement keeps its own narrower range
    assert_eq!(value[0]["commands"][0][0]["start"]["col"], 11);
    assert_eq!(value[0]["commands"][0][0]["end"]["col"], 15);
}

#[test]
fn vector_assignment_pairs_by_index_end_to_end() {
    let out = pipeline("a, b, c := 1, 2, 3");
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let lvalues = value[0]["lvalues"].as_array().unwrap();
    let rvalues = value[0]["rvalues"].as_array().unwrap();
    assert_eq!(lvalues.len(), rvalues.len());
    for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
        assert_eq!(lvalues[i]["name"], name);
        assert_eq!(rvalues[i]["const"], (i + 1) as u64);
    }
}

#[test]
fn comparison_symbols_survive_the_pipeline() {
    for symbol in ["<", "<=", ">", ">=", "=", "<>"] {
        let out = pipeline(&format!("if x {symbol} 1 -> skip fi"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["guards"][0]["type"], "comp");
        assert_eq!(value[0]["guards"][0]["comp"], symbol);
    }
}

#[test]
fn boolean_binary_fields_are_suffixed() {
    let out = pipeline("if true and ~false -> skip fi");
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let guard = &value[0]["guards"][0];
    assert_eq!(guard["type"], "and");
    assert!(guard.get("left_bool").is_some());
    assert!(guard.get("right_bool").is_some());
    assert!(guard.get("left").is_none());
    assert_eq!(guard["right_bool"]["negated"], true);
}
