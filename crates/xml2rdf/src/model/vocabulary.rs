//! RDF vocabulary constants used by the converter.
//!
//! - `rdf:` / `xsd:` -- W3C standard namespaces
//! - `xsi:` -- XML Schema instance attributes recognised in source documents
//! - `xtr:` prefix (http://acandonorway.github.com/XmlToRdf/ontology.ttl#) -- structural predicates

/// Standard RDF/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}

/// XML Schema instance namespace.
pub mod xsi {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
    /// Local name of the `xsi:type` attribute.
    pub const TYPE: &str = "type";
}

/// Structural predicates minted by the converter (`xtr:` prefix)
pub mod xtr {
    pub const PREFIX: &str = "xtr";
    pub const NS: &str = "http://acandonorway.github.com/XmlToRdf/ontology.ttl#";

    pub const HAS_CHILD: &str = "http://acandonorway.github.com/XmlToRdf/ontology.ttl#hasChild";
    pub const HAS_VALUE: &str = "http://acandonorway.github.com/XmlToRdf/ontology.ttl#hasValue";
    pub const INDEX: &str = "http://acandonorway.github.com/XmlToRdf/ontology.ttl#index";
    pub const HAS_MIXED_CONTENT: &str =
        "http://acandonorway.github.com/XmlToRdf/ontology.ttl#hasMixedContent";
}

/// Label prefix for sequentially allocated anonymous nodes.
pub const BLANK_NODE_PREFIX: &str = "_:n";

/// Returns true when `id` is an anonymous (blank) node label rather than an IRI.
pub fn is_blank_node(id: &str) -> bool {
    id.starts_with("_:")
}
