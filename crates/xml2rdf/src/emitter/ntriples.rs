use std::io::Write;

use super::{escape_literal, TriplesEmitter};
use crate::model::node::MixedContent;
use crate::model::vocabulary::{is_blank_node, standard};

/// N-Triples format emitter. Streams triples as `<s> <p> <o> .` lines.
pub struct NTriplesEmitter<W: Write> {
    writer: W,
    count: u64,
    lists: u64,
}

impl<W: Write> NTriplesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            lists: 0,
        }
    }

    fn term(id: &str) -> String {
        if is_blank_node(id) {
            id.to_string()
        } else {
            format!("<{id}>")
        }
    }

    fn write_line(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{subject} <{predicate}> {object} .")?;
        self.count += 1;
        Ok(())
    }

    fn next_list_node(&mut self) -> String {
        let id = format!("_:list{}", self.lists);
        self.lists += 1;
        id
    }
}

impl<W: Write> TriplesEmitter for NTriplesEmitter<W> {
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()> {
        self.write_line(&Self::term(subject), predicate, &Self::term(object))
    }

    fn emit_literal(&mut self, subject: &str, predicate: &str, value: &str) -> std::io::Result<()> {
        let escaped = escape_literal(value);
        self.write_line(&Self::term(subject), predicate, &format!("\"{escaped}\""))
    }

    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> std::io::Result<()> {
        let escaped = escape_literal(value);
        self.write_line(
            &Self::term(subject),
            predicate,
            &format!("\"{escaped}\"^^<{datatype}>"),
        )
    }

    fn emit_list(&mut self, subject: &str, predicate: &str, items: &[MixedContent]) -> std::io::Result<()> {
        if items.is_empty() {
            return self.emit_iri(subject, predicate, standard::RDF_NIL);
        }
        // rdf:first / rdf:rest chain
        let mut cell = self.next_list_node();
        self.write_line(&Self::term(subject), predicate, &cell)?;
        for (i, item) in items.iter().enumerate() {
            let first = match item {
                MixedContent::Text(text) => format!("\"{}\"", escape_literal(text)),
                MixedContent::Node(id) => Self::term(id),
            };
            self.write_line(&cell, standard::RDF_FIRST, &first)?;
            let rest = if i + 1 == items.len() {
                format!("<{}>", standard::RDF_NIL)
            } else {
                self.next_list_node()
            };
            self.write_line(&cell, standard::RDF_REST, &rest)?;
            cell = rest;
        }
        Ok(())
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> std::io::Result<()> {
        // N-Triples doesn't use prefixes, but emit as comment for readability
        writeln!(self.writer, "# @prefix {prefix}: <{iri}> .")
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
