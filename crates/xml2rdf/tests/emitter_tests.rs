use xml2rdf::emitter::jsonl::JsonLinesEmitter;
use xml2rdf::emitter::memory::{MemoryEmitter, Object, Statement};
use xml2rdf::emitter::ntriples::NTriplesEmitter;
use xml2rdf::emitter::turtle::TurtleEmitter;
use xml2rdf::emitter::TriplesEmitter;
use xml2rdf::model::node::MixedContent;

const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

// ---------------------------------------------------------------------------
// NTriples tests
// ---------------------------------------------------------------------------

#[test]
fn nt_basic_iri_triple() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.emit_iri(
        "http://example.org/s",
        "http://example.org/p",
        "http://example.org/o",
    )
    .unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(
        out,
        "<http://example.org/s> <http://example.org/p> <http://example.org/o> .\n"
    );
}

#[test]
fn nt_blank_nodes_are_not_bracketed() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.emit_iri("_:n0", "http://example.org/p", "_:n1").unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out, "_:n0 <http://example.org/p> _:n1 .\n");
}

#[test]
fn nt_typed_literal() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.emit_typed_literal(
        "http://example.org/s",
        "http://example.org/p",
        "42",
        "http://www.w3.org/2001/XMLSchema#integer",
    )
    .unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(
        out,
        "<http://example.org/s> <http://example.org/p> \"42\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n"
    );
}

#[test]
fn nt_int_uses_xsd_integer() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.emit_int("_:n3", "http://example.org/index", 2).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("\"2\"^^<http://www.w3.org/2001/XMLSchema#integer>"));
}

#[test]
fn nt_escape_special_chars() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.emit_literal(
        "http://example.org/s",
        "http://example.org/p",
        "line1\nline2\ttab\\slash\"quote\x01",
    )
    .unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("\\n"));
    assert!(out.contains("\\t"));
    assert!(out.contains("\\\\"));
    assert!(out.contains("\\\""));
    assert!(out.contains("\\u0001"), "Expected \\u0001 in: {out}");
}

#[test]
fn nt_list_becomes_first_rest_chain() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    let items = vec![
        MixedContent::Text("Hello ".to_string()),
        MixedContent::Node("_:n1".to_string()),
    ];
    em.emit_list("_:n0", "http://example.org/mixed", &items).unwrap();
    assert_eq!(em.triple_count(), 5);
    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "_:n0 <http://example.org/mixed> _:list0 .");
    assert_eq!(lines[1], format!("_:list0 <{RDF_FIRST}> \"Hello \" ."));
    assert_eq!(lines[2], format!("_:list0 <{RDF_REST}> _:list1 ."));
    assert_eq!(lines[3], format!("_:list1 <{RDF_FIRST}> _:n1 ."));
    assert_eq!(lines[4], format!("_:list1 <{RDF_REST}> <{RDF_NIL}> ."));
}

#[test]
fn nt_empty_list_is_nil() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.emit_list("_:n0", "http://example.org/mixed", &[]).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out, format!("_:n0 <http://example.org/mixed> <{RDF_NIL}> .\n"));
}

#[test]
fn nt_prefix_is_comment_and_not_counted() {
    let mut buf = Vec::new();
    let mut em = NTriplesEmitter::new(&mut buf);
    em.add_prefix("ex", "http://example.org/").unwrap();
    assert_eq!(em.triple_count(), 0);
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out, "# @prefix ex: <http://example.org/> .\n");
}

// ---------------------------------------------------------------------------
// Turtle tests
// ---------------------------------------------------------------------------

#[test]
fn ttl_prefixes_written_before_first_triple() {
    let mut buf = Vec::new();
    let mut em = TurtleEmitter::new(&mut buf);
    em.add_prefix("ex", "http://example.org/").unwrap();
    em.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#")
        .unwrap();
    em.emit_iri(
        "_:n0",
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
        "http://example.org/Thing",
    )
    .unwrap();
    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "@prefix ex: <http://example.org/> .");
    assert_eq!(
        lines[1],
        "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> ."
    );
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "_:n0 rdf:type ex:Thing .");
}

#[test]
fn ttl_does_not_compact_invalid_local_names() {
    let mut buf = Vec::new();
    let mut em = TurtleEmitter::new(&mut buf);
    em.add_prefix("ex", "http://example.org/").unwrap();
    em.emit_literal("http://example.org/a%20b", "http://example.org/p", "v")
        .unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("<http://example.org/a%20b> ex:p \"v\" ."));
}

#[test]
fn ttl_list_is_collection() {
    let mut buf = Vec::new();
    let mut em = TurtleEmitter::new(&mut buf);
    let items = vec![
        MixedContent::Text("a".to_string()),
        MixedContent::Node("_:n2".to_string()),
        MixedContent::Text("b".to_string()),
    ];
    em.emit_list("_:n0", "http://example.org/mixed", &items).unwrap();
    assert_eq!(em.triple_count(), 1);
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out, "_:n0 <http://example.org/mixed> ( \"a\" _:n2 \"b\" ) .\n");
}

// ---------------------------------------------------------------------------
// JSON Lines / memory tests
// ---------------------------------------------------------------------------

#[test]
fn jsonl_one_object_per_statement() {
    let mut buf = Vec::new();
    let mut em = JsonLinesEmitter::new(&mut buf);
    em.emit_iri("_:n0", "http://example.org/p", "_:n1").unwrap();
    em.emit_typed_literal("_:n0", "http://example.org/age", "5", "http://www.w3.org/2001/XMLSchema#integer")
        .unwrap();
    assert_eq!(em.triple_count(), 2);
    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[0]["subject"], "_:n0");
    assert_eq!(lines[0]["object"]["kind"], "iri");
    assert_eq!(lines[0]["object"]["value"], "_:n1");
    assert_eq!(lines[1]["object"]["kind"], "literal");
    assert_eq!(lines[1]["object"]["value"]["value"], "5");
}

#[test]
fn memory_keeps_emission_order() {
    let mut em = MemoryEmitter::new();
    em.emit_literal("_:n0", "http://example.org/p", "x").unwrap();
    em.emit_iri("_:n0", "http://example.org/q", "_:n1").unwrap();
    assert_eq!(
        em.statements(),
        &[
            Statement::literal("_:n0", "http://example.org/p", "x"),
            Statement::iri("_:n0", "http://example.org/q", "_:n1"),
        ]
    );
    assert_eq!(em.triple_count(), 2);
    match &em.statements()[1].object {
        Object::Iri(o) => assert_eq!(o, "_:n1"),
        other => panic!("unexpected object {other:?}"),
    }
}
