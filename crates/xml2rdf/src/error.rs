//! Error types for conversion and XML reading.

use thiserror::Error;

/// Fatal errors raised while converting one document. Statements emitted
/// before the error stay emitted.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A literal-to-resource mapping and a datatype both matched the same value.
    #[error("cannot both map literal to resource and assign a datatype for element {element}")]
    ConflictingValueMapping { element: String },

    /// A colon-qualified reference used a prefix with no active binding.
    #[error("unbound namespace prefix '{prefix}' in '{qname}'")]
    UnboundPrefix { prefix: String, qname: String },

    /// The statement sink failed.
    #[error("failed to write statement: {0}")]
    Sink(#[from] std::io::Error),
}

/// Errors raised by the XML event source.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unknown namespace prefix '{0}'")]
    UnknownNamespace(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
