pub mod jsonl;
pub mod memory;
pub mod ntriples;
pub mod turtle;

use crate::model::node::MixedContent;
use crate::model::vocabulary::standard;

/// Sink for converted statements. Identifiers starting with `_:` are blank
/// nodes; every other subject, predicate and object identifier is an IRI.
pub trait TriplesEmitter {
    /// Emit a triple with an IRI (or blank node) object.
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()>;
    /// Emit a triple with a plain string literal object.
    fn emit_literal(&mut self, subject: &str, predicate: &str, value: &str) -> std::io::Result<()>;
    /// Emit a triple with a typed literal object.
    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> std::io::Result<()>;
    /// Emit a triple with an integer literal object.
    fn emit_int(&mut self, subject: &str, predicate: &str, value: i64) -> std::io::Result<()> {
        self.emit_typed_literal(subject, predicate, &value.to_string(), standard::XSD_INTEGER)
    }
    /// Emit a triple whose object is an ordered list of text and node items.
    fn emit_list(&mut self, subject: &str, predicate: &str, items: &[MixedContent]) -> std::io::Result<()>;
    /// Register a namespace prefix (used by Turtle format).
    fn add_prefix(&mut self, prefix: &str, iri: &str) -> std::io::Result<()>;
    /// Flush any buffered output.
    fn flush(&mut self) -> std::io::Result<()>;
    /// Return the number of triples emitted so far.
    fn triple_count(&self) -> u64;
}

/// Escape a string for an N-Triples / Turtle literal.
pub(crate) fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Control chars: \uXXXX
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}
