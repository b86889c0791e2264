//! In-memory statement collection.

use serde::Serialize;

use super::TriplesEmitter;
use crate::model::node::MixedContent;

/// Object position of a [`Statement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Object {
    Iri(String),
    Literal {
        value: String,
        datatype: Option<String>,
    },
    List(Vec<MixedContent>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
}

impl Statement {
    pub fn iri(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Iri(object.to_string()),
        }
    }

    pub fn literal(subject: &str, predicate: &str, value: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Literal {
                value: value.to_string(),
                datatype: None,
            },
        }
    }

    pub fn typed(subject: &str, predicate: &str, value: &str, datatype: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::Literal {
                value: value.to_string(),
                datatype: Some(datatype.to_string()),
            },
        }
    }

    pub fn list(subject: &str, predicate: &str, items: &[MixedContent]) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: Object::List(items.to_vec()),
        }
    }
}

/// Keeps every statement in emission order.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    statements: Vec<Statement>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl TriplesEmitter for MemoryEmitter {
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) -> std::io::Result<()> {
        self.statements.push(Statement::iri(subject, predicate, object));
        Ok(())
    }

    fn emit_literal(&mut self, subject: &str, predicate: &str, value: &str) -> std::io::Result<()> {
        self.statements.push(Statement::literal(subject, predicate, value));
        Ok(())
    }

    fn emit_typed_literal(
        &mut self,
        subject: &str,
        predicate: &str,
        value: &str,
        datatype: &str,
    ) -> std::io::Result<()> {
        self.statements
            .push(Statement::typed(subject, predicate, value, datatype));
        Ok(())
    }

    fn emit_list(&mut self, subject: &str, predicate: &str, items: &[MixedContent]) -> std::io::Result<()> {
        self.statements.push(Statement::list(subject, predicate, items));
        Ok(())
    }

    fn add_prefix(&mut self, _prefix: &str, _iri: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn triple_count(&self) -> u64 {
        self.statements.len() as u64
    }
}
