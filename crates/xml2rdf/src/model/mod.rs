pub mod iri;
pub mod namespace;
pub mod node;
pub mod vocabulary;
