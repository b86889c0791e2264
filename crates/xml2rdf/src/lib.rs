//! Streaming XML to RDF conversion.
//!
//! Structure events from an XML tokenizer drive a [`Converter`], which
//! decides per element whether it becomes a typed node, a shallow link or a
//! literal property of its parent, and hands the resulting triples to a
//! [`TriplesEmitter`].
//!
//! [`Converter`]: conversion::engine::Converter
//! [`TriplesEmitter`]: emitter::TriplesEmitter

pub mod conversion;
pub mod emitter;
pub mod error;
pub mod model;
