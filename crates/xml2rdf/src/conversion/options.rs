//! Conversion options. Every field has a default so a partial JSON
//! configuration file is enough.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::model::iri::{IdStrategy, IdTransform};
use crate::model::namespace::AppliesTo;

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Use `predicate` instead of `hasChild` between the given parent and child types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredicateOverride {
    pub parent_type: String,
    pub child_type: String,
    pub predicate: String,
}

/// Emit `(child, predicate, parent)` instead of `(parent, predicate, child)`.
/// Missing types match anything.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InversionRule {
    pub predicate: String,
    #[serde(default)]
    pub parent_type: Option<String>,
    #[serde(default)]
    pub child_type: Option<String>,
}

/// Derive a node identifier from an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeIdRule {
    /// Element namespace + local name; `None` matches any element.
    #[serde(default)]
    pub element: Option<String>,
    /// Attribute namespace + local name.
    pub attribute: String,
    pub transform: IdTransform,
}

/// String rewrite applied to attribute values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ValueTransform {
    Trim,
    Lowercase,
    Uppercase,
    Prefix { value: String },
    Suffix { value: String },
    Replace { from: String, to: String },
}

impl ValueTransform {
    pub fn apply(&self, value: &str) -> String {
        match self {
            ValueTransform::Trim => value.trim().to_string(),
            ValueTransform::Lowercase => value.to_lowercase(),
            ValueTransform::Uppercase => value.to_uppercase(),
            ValueTransform::Prefix { value: prefix } => format!("{prefix}{value}"),
            ValueTransform::Suffix { value: suffix } => format!("{value}{suffix}"),
            ValueTransform::Replace { from, to } => value.replace(from.as_str(), to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttributeValueRule {
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub attribute: Option<String>,
    pub transform: ValueTransform,
}

// ---------------------------------------------------------------------------
// ConversionOptions
// ---------------------------------------------------------------------------

/// Options controlling how elements become statements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub auto_detect_literal_properties: bool,
    pub shallow_without_children: bool,
    pub shallow_with_literal_children: bool,

    /// Element namespace + local name -> class IRI.
    pub class_remap: HashMap<String, String>,
    pub predicate_overrides: Vec<PredicateOverride>,
    pub inverted_predicates: Vec<InversionRule>,

    /// Element type -> datatype IRI.
    pub datatypes_by_type: HashMap<String, String>,
    /// Node identity -> datatype IRI, consulted for shallow elements.
    pub datatypes_by_instance: HashMap<String, String>,
    /// Element type -> (text value -> resource IRI).
    pub literal_resources: HashMap<String, HashMap<String, String>>,

    pub id_strategy: IdStrategy,
    pub attribute_ids: Vec<AttributeIdRule>,

    pub namespace_suffix: Option<String>,
    pub base_namespace: Option<String>,
    pub base_namespace_applies_to: AppliesTo,
    pub namespace_override: Option<String>,
    pub attributes_inherit_element_namespace: bool,

    pub xsi_type_support: bool,
    pub resolve_qnames_in_attribute_values: bool,
    pub attribute_value_transforms: Vec<AttributeValueRule>,

    pub add_index: bool,
}

impl ConversionOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load options from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
