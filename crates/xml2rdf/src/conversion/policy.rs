//! Decision rules consulted by the converter. Built once from
//! [`ConversionOptions`]; nothing here performs I/O.

use std::collections::HashMap;

use crate::error::ConvertError;
use crate::model::iri::{IdStrategy, IdTransform};
use crate::model::namespace::NamespacePolicy;
use crate::model::vocabulary::xtr;

use super::options::{AttributeValueRule, ConversionOptions, InversionRule};

/// How a closing element is turned into statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Folded into a literal (or resource) property of the parent.
    LiteralProperty,
    /// Linked from the parent by its type, without a type assertion.
    Shallow,
    /// Full resource with type assertion and parent link.
    Resource,
}

/// What an element's text becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOutcome<'a> {
    NoValue,
    Literal(&'a str),
    Resource(&'a str),
    Typed { value: &'a str, datatype: &'a str },
}

/// Facts about a closing element that the close-time rules depend on.
#[derive(Debug, Clone, Copy)]
pub struct ClosingElement {
    pub has_children: bool,
    pub has_properties: bool,
    pub has_parent: bool,
    pub parent_has_mixed_content: bool,
    /// Every child was folded into a literal property (true when childless).
    pub all_children_literal: bool,
}

#[derive(Debug)]
pub struct Policy {
    auto_detect_literals: bool,
    shallow_without_children: bool,
    shallow_with_literal_children: bool,
    add_index: bool,
    xsi_type_support: bool,
    resolve_qnames: bool,
    inherit_attribute_namespace: bool,
    id_strategy: IdStrategy,
    namespaces: NamespacePolicy,
    class_remap: HashMap<String, String>,
    predicate_overrides: HashMap<(String, String), String>,
    inverted_predicates: Vec<InversionRule>,
    datatypes_by_type: HashMap<String, String>,
    datatypes_by_instance: HashMap<String, String>,
    literal_resources: HashMap<String, HashMap<String, String>>,
    ids_by_element_attribute: HashMap<(String, String), IdTransform>,
    ids_by_attribute: HashMap<String, IdTransform>,
    value_transforms: Vec<AttributeValueRule>,
}

impl Policy {
    pub fn new(options: ConversionOptions) -> Self {
        let mut ids_by_element_attribute = HashMap::new();
        let mut ids_by_attribute = HashMap::new();
        for rule in options.attribute_ids {
            match rule.element {
                Some(element) => {
                    ids_by_element_attribute.insert((element, rule.attribute), rule.transform);
                }
                None => {
                    ids_by_attribute.insert(rule.attribute, rule.transform);
                }
            }
        }

        let predicate_overrides = options
            .predicate_overrides
            .into_iter()
            .map(|o| ((o.parent_type, o.child_type), o.predicate))
            .collect();

        Self {
            auto_detect_literals: options.auto_detect_literal_properties,
            shallow_without_children: options.shallow_without_children,
            shallow_with_literal_children: options.shallow_with_literal_children,
            add_index: options.add_index,
            xsi_type_support: options.xsi_type_support,
            resolve_qnames: options.resolve_qnames_in_attribute_values,
            inherit_attribute_namespace: options.attributes_inherit_element_namespace,
            id_strategy: options.id_strategy,
            namespaces: NamespacePolicy {
                suffix: options.namespace_suffix,
                base: options.base_namespace,
                applies_to: options.base_namespace_applies_to,
                override_ns: options.namespace_override,
            },
            class_remap: options.class_remap,
            predicate_overrides,
            inverted_predicates: options.inverted_predicates,
            datatypes_by_type: options.datatypes_by_type,
            datatypes_by_instance: options.datatypes_by_instance,
            literal_resources: options.literal_resources,
            ids_by_element_attribute,
            ids_by_attribute,
            value_transforms: options.attribute_value_transforms,
        }
    }

    pub fn namespaces(&self) -> &NamespacePolicy {
        &self.namespaces
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    pub fn xsi_type_support(&self) -> bool {
        self.xsi_type_support
    }

    pub fn resolve_qnames(&self) -> bool {
        self.resolve_qnames
    }

    pub fn inherit_attribute_namespace(&self) -> bool {
        self.inherit_attribute_namespace
    }

    pub fn add_index(&self) -> bool {
        self.add_index
    }

    // -----------------------------------------------------------------------
    // Open-time rules
    // -----------------------------------------------------------------------

    /// Class IRI for an element. `element_ns` is the namespace before any
    /// override; a class remap keyed on `element_ns + local_name` wins.
    pub fn class_for(&self, element_ns: &str, local_name: &str) -> String {
        let key = format!("{element_ns}{local_name}");
        if let Some(class) = self.class_remap.get(&key) {
            return class.clone();
        }
        format!("{}{local_name}", self.namespaces.effective(element_ns))
    }

    /// Identifier transform for an attribute. An exact element + attribute
    /// rule takes precedence over an attribute-only rule.
    pub fn attribute_id(&self, element_key: &str, attribute_key: &str) -> Option<&IdTransform> {
        self.ids_by_element_attribute
            .get(&(element_key.to_string(), attribute_key.to_string()))
            .or_else(|| self.ids_by_attribute.get(attribute_key))
    }

    /// Apply every matching value transform, in configuration order.
    pub fn transform_attribute_value(&self, element_key: &str, attribute_key: &str, value: String) -> String {
        self.value_transforms
            .iter()
            .filter(|rule| {
                rule.element.as_deref().is_none_or(|e| e == element_key)
                    && rule.attribute.as_deref().is_none_or(|a| a == attribute_key)
            })
            .fold(value, |value, rule| rule.transform.apply(&value))
    }

    // -----------------------------------------------------------------------
    // Close-time rules
    // -----------------------------------------------------------------------

    /// Decide how a closing element is converted. Literal detection is
    /// checked first, then the shallow rules, then full conversion.
    pub fn classify(&self, element: &ClosingElement) -> Conversion {
        if self.auto_detect_literals
            && !element.has_children
            && !element.has_properties
            && element.has_parent
            && !element.parent_has_mixed_content
        {
            return Conversion::LiteralProperty;
        }
        if !element.has_parent {
            return Conversion::Resource;
        }
        let strict = self.shallow_without_children && !element.has_children;
        let relaxed = self.shallow_with_literal_children && element.all_children_literal;
        if strict || relaxed {
            Conversion::Shallow
        } else {
            Conversion::Resource
        }
    }

    /// Predicate linking a child to its parent.
    pub fn connecting_predicate(&self, parent_type: &str, child_type: &str) -> &str {
        self.predicate_overrides
            .get(&(parent_type.to_string(), child_type.to_string()))
            .map(String::as_str)
            .unwrap_or(xtr::HAS_CHILD)
    }

    /// True when the link should point from child to parent.
    pub fn is_inverted(&self, predicate: &str, parent_type: &str, child_type: &str) -> bool {
        self.inverted_predicates.iter().any(|rule| {
            rule.predicate == predicate
                && rule.parent_type.as_deref().is_none_or(|t| t == parent_type)
                && rule.child_type.as_deref().is_none_or(|t| t == child_type)
        })
    }

    pub fn type_datatype(&self, type_iri: &str) -> Option<&str> {
        self.datatypes_by_type.get(type_iri).map(String::as_str)
    }

    /// Datatype for a shallow element: the per-instance table first, then
    /// the per-type table.
    pub fn instance_datatype(&self, identity: &str, type_iri: &str) -> Option<&str> {
        self.datatypes_by_instance
            .get(identity)
            .map(String::as_str)
            .or_else(|| self.type_datatype(type_iri))
    }

    pub fn literal_resource(&self, type_iri: &str, value: &str) -> Option<&str> {
        self.literal_resources
            .get(type_iri)
            .and_then(|values| values.get(value))
            .map(String::as_str)
    }

    /// Resolve the text of an element of type `type_iri` into a value
    /// outcome. A resource mapping together with a datatype is a conflict.
    pub fn value_outcome<'a>(
        &'a self,
        value: Option<&'a str>,
        type_iri: &str,
        datatype: Option<&'a str>,
    ) -> Result<ValueOutcome<'a>, ConvertError> {
        let Some(value) = value else {
            return Ok(ValueOutcome::NoValue);
        };
        let resource = self.literal_resource(type_iri, value);
        match (resource, datatype) {
            (Some(_), Some(_)) => Err(ConvertError::ConflictingValueMapping {
                element: type_iri.to_string(),
            }),
            (Some(resource), None) => Ok(ValueOutcome::Resource(resource)),
            (None, Some(datatype)) => Ok(ValueOutcome::Typed { value, datatype }),
            (None, None) => Ok(ValueOutcome::Literal(value)),
        }
    }
}
