use std::io::Write;

use super::memory::Statement;
use super::TriplesEmitter;
use crate::model::node::MixedContent;

/// JSON Lines emitter: one serialized [`Statement`] per line.
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    fn write(&mut self, statement: &Statement) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, statement)?;
        writeln!(self.writer)?;
        self.count += 1;
        Ok(())
    }
}

impl<W: Write> TriplesEmitter for JsonLinesEmitter<W> {
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()> {
        self.write(&Statement::iri(subject, predicate, object))
    }

    fn emit_literal(&mut self, subject: &str, predicate: &str, value: &str) -> std::io::Result<()> {
        self.write(&Statement::literal(subject, predicate, value))
    }

    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> std::io::Result<()> {
        self.write(&Statement::typed(subject, predicate, value, datatype))
    }

    fn emit_list(&mut self, subject: &str, predicate: &str, items: &[MixedContent]) -> std::io::Result<()> {
        self.write(&Statement::list(subject, predicate, items))
    }

    fn add_prefix(&mut self, _prefix: &str, _iri: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
