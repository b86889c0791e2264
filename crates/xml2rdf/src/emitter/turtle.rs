use std::collections::HashMap;
use std::io::Write;

use super::{escape_literal, TriplesEmitter};
use crate::model::node::MixedContent;
use crate::model::vocabulary::is_blank_node;

/// Turtle format emitter with prefix support.
pub struct TurtleEmitter<W: Write> {
    writer: W,
    count: u64,
    prefixes: HashMap<String, String>,
    prefix_written: bool,
}

impl<W: Write> TurtleEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            prefixes: HashMap::new(),
            prefix_written: false,
        }
    }

    /// Write all registered prefixes (called before first triple).
    fn write_prefixes(&mut self) -> std::io::Result<()> {
        if self.prefix_written {
            return Ok(());
        }
        self.prefix_written = true;
        // Sort for deterministic output
        let mut prefixes: Vec<_> = self.prefixes.iter().collect();
        prefixes.sort_by_key(|(k, _)| (*k).clone());
        for (prefix, iri) in prefixes {
            writeln!(self.writer, "@prefix {prefix}: <{iri}> .")?;
        }
        if !self.prefixes.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Try to compact an IRI using registered prefixes.
    fn compact_iri(&self, iri: &str) -> String {
        if is_blank_node(iri) {
            return iri.to_string();
        }
        // Find longest matching prefix
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in &self.prefixes {
            if iri.starts_with(ns.as_str())
                && best.is_none_or(|(_, prev_ns)| ns.len() > prev_ns.len())
            {
                best = Some((prefix.as_str(), ns.as_str()));
            }
        }
        if let Some((prefix, ns)) = best {
            let local = &iri[ns.len()..];
            // Only compact if local name is valid (alphanumeric + _)
            if !local.is_empty() && local.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return format!("{prefix}:{local}");
            }
        }
        format!("<{iri}>")
    }

    fn write_statement(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()> {
        self.write_prefixes()?;
        let s = self.compact_iri(subject);
        let p = self.compact_iri(predicate);
        writeln!(self.writer, "{s} {p} {object} .")?;
        self.count += 1;
        Ok(())
    }
}

impl<W: Write> TriplesEmitter for TurtleEmitter<W> {
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()> {
        let o = self.compact_iri(object);
        self.write_statement(subject, predicate, &o)
    }

    fn emit_literal(&mut self, subject: &str, predicate: &str, value: &str) -> std::io::Result<()> {
        let escaped = escape_literal(value);
        self.write_statement(subject, predicate, &format!("\"{escaped}\""))
    }

    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> std::io::Result<()> {
        let dt = self.compact_iri(datatype);
        let escaped = escape_literal(value);
        self.write_statement(subject, predicate, &format!("\"{escaped}\"^^{dt}"))
    }

    fn emit_list(&mut self, subject: &str, predicate: &str, items: &[MixedContent]) -> std::io::Result<()> {
        let members: Vec<String> = items
            .iter()
            .map(|item| match item {
                MixedContent::Text(text) => format!("\"{}\"", escape_literal(text)),
                MixedContent::Node(id) => self.compact_iri(id),
            })
            .collect();
        let collection = if members.is_empty() {
            "()".to_string()
        } else {
            format!("( {} )", members.join(" "))
        };
        self.write_statement(subject, predicate, &collection)
    }

    fn add_prefix(&mut self, prefix: &str, iri: &str) -> std::io::Result<()> {
        self.prefixes.insert(prefix.to_string(), iri.to_string());
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
