//! Streaming conversion engine: turns XML structure events into triples.
//!
//! The [`Converter`] keeps one [`ElementNode`] per open element. Statements
//! for an element are emitted when it closes, after all of its children, so
//! output is post-order per subtree.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::emitter::TriplesEmitter;
use crate::error::ConvertError;
use crate::model::iri::IdAllocator;
use crate::model::namespace::NamespaceResolver;
use crate::model::node::{ElementNode, NodeArena, NodeId, Property};
use crate::model::vocabulary::{standard, xsi, xtr};

use super::options::ConversionOptions;
use super::policy::{ClosingElement, Conversion, Policy, ValueOutcome};

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// An attribute as delivered by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: String,
    pub local_name: String,
    pub value: String,
}

impl XmlAttribute {
    pub fn new(namespace: &str, local_name: &str, value: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            local_name: local_name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Receiver of document structure events, in document order. Events must be
/// well nested; namespace declarations of an element arrive before its open.
pub trait XmlEventHandler {
    fn document_started(&mut self) -> Result<(), ConvertError> {
        Ok(())
    }
    fn namespace_declared(&mut self, prefix: &str, uri: &str) -> Result<(), ConvertError>;
    fn element_opened(
        &mut self,
        namespace: &str,
        local_name: &str,
        qname: &str,
        attributes: &[XmlAttribute],
    ) -> Result<(), ConvertError>;
    /// Character data; may arrive in any number of chunks per element.
    fn text(&mut self, text: &str) -> Result<(), ConvertError>;
    fn element_closed(&mut self, namespace: &str, local_name: &str, qname: &str) -> Result<(), ConvertError>;
    fn document_ended(&mut self) -> Result<(), ConvertError>;
}

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

/// Hook run on a closing element of one class before it is classified.
pub type ClassTransform = Box<dyn Fn(&mut ElementNode)>;

/// Converts one document. Use a fresh instance per document.
pub struct Converter<'a, E: TriplesEmitter> {
    emitter: &'a mut E,
    policy: Policy,
    class_transforms: HashMap<String, ClassTransform>,
    namespaces: NamespaceResolver,
    ids: IdAllocator,
    arena: NodeArena,
    stack: Vec<NodeId>,
    elements: u64,
}

impl<'a, E: TriplesEmitter> Converter<'a, E> {
    pub fn new(emitter: &'a mut E, options: ConversionOptions) -> Self {
        let policy = Policy::new(options);
        let namespaces = NamespaceResolver::new(policy.namespaces().clone());
        let ids = IdAllocator::new(policy.id_strategy());
        Self {
            emitter,
            policy,
            class_transforms: HashMap::new(),
            namespaces,
            ids,
            arena: NodeArena::new(),
            stack: Vec::new(),
            elements: 0,
        }
    }

    /// Run `transform` on every element of type `type_iri` when it closes,
    /// before any conversion decision. Later registrations for the same
    /// type replace earlier ones.
    pub fn with_class_transform(
        mut self,
        type_iri: impl Into<String>,
        transform: impl Fn(&mut ElementNode) + 'static,
    ) -> Self {
        self.class_transforms.insert(type_iri.into(), Box::new(transform));
        self
    }

    /// Number of elements opened so far.
    pub fn elements(&self) -> u64 {
        self.elements
    }

    /// Number of element nodes currently held in memory.
    pub fn live_nodes(&self) -> usize {
        self.arena.live()
    }

    /// Depth of the open-element stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    // -----------------------------------------------------------------------
    // Open
    // -----------------------------------------------------------------------

    fn open(&mut self, namespace: &str, local_name: &str, attributes: &[XmlAttribute]) -> Result<(), ConvertError> {
        let policy = &self.policy;
        let mut uri = namespace.to_string();
        let mut local = local_name.to_string();

        if policy.xsi_type_support() {
            if let Some(declared) = attributes.iter().find(|a| is_xsi_type(a)) {
                match self.namespaces.resolve_qname(&declared.value)? {
                    Some((ns, name)) => {
                        uri = ns;
                        local = name.to_string();
                    }
                    None => local = declared.value.clone(),
                }
            }
        }

        let element_ns = policy.namespaces().element_namespace(&uri);
        let element_key = format!("{element_ns}{local}");
        let type_iri = policy.class_for(&element_ns, &local);
        let mut identity = self.ids.allocate(policy.namespaces().effective(&element_ns));

        let mut properties = Vec::with_capacity(attributes.len());
        for attr in attributes {
            if policy.xsi_type_support() && is_xsi_type(attr) {
                continue;
            }
            let attribute_key = format!("{}{}", attr.namespace, attr.local_name);
            let mut value = policy.transform_attribute_value(&element_key, &attribute_key, attr.value.clone());
            if policy.resolve_qnames() && value.contains(':') {
                value = self.namespaces.expand(&value)?;
            }
            if let Some(transform) = policy.attribute_id(&element_key, &attribute_key) {
                identity = transform.apply(&value);
            }
            let attribute_ns = policy.namespaces().attribute_namespace(
                &attr.namespace,
                &element_ns,
                policy.inherit_attribute_namespace(),
            );
            properties.push(Property {
                namespace: attribute_ns,
                local_name: attr.local_name.clone(),
                value: Some(value),
            });
        }

        let parent = self.stack.last().copied();
        let index = parent
            .and_then(|p| self.arena.get(p))
            .map_or(0, |p| p.children.len());

        trace!(%identity, %type_iri, index, "element opened");

        let mut node = ElementNode::new(type_iri, identity.clone(), parent, index);
        node.properties = properties;
        let id = self.arena.insert(node);
        if let Some(parent) = parent.and_then(|p| self.arena.get_mut(p)) {
            parent.child_opened(id, &identity);
        }
        self.stack.push(id);
        self.elements += 1;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Close
    // -----------------------------------------------------------------------

    fn close(&mut self) -> Result<(), ConvertError> {
        let Some(id) = self.stack.pop() else {
            return Ok(());
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.finish_mixed_content();
            if let Some(transform) = self.class_transforms.get(&node.type_iri) {
                transform(node);
            }
        }

        let auto_detected = {
            let Some(node) = self.arena.get(id) else {
                return Ok(());
            };
            let parent = node.parent.and_then(|p| self.arena.get(p));
            let closing = ClosingElement {
                has_children: !node.children.is_empty(),
                has_properties: !node.properties.is_empty(),
                has_parent: parent.is_some(),
                parent_has_mixed_content: parent.is_some_and(ElementNode::has_mixed_content),
                all_children_literal: node
                    .children
                    .iter()
                    .all(|c| self.arena.get(*c).is_some_and(|c| c.auto_detected_literal)),
            };
            let conversion = self.policy.classify(&closing);
            trace!(identity = %node.identity, ?conversion, "element closed");

            let emitter = &mut *self.emitter;
            let auto_detected = match (conversion, parent) {
                (Conversion::LiteralProperty, Some(parent)) => {
                    emit_literal_property(&self.policy, emitter, node, parent)?
                }
                (Conversion::Shallow, Some(parent)) => {
                    emit_shallow(&self.policy, emitter, node, parent)?;
                    false
                }
                _ => {
                    emit_resource(&self.policy, emitter, node, parent)?;
                    false
                }
            };
            auto_detected
        };

        // Only the flag survives; the parent still reads it when it closes.
        let (children, is_root) = match self.arena.get_mut(id) {
            Some(node) => {
                node.auto_detected_literal = auto_detected;
                let is_root = node.parent.take().is_none();
                (node.retire(), is_root)
            }
            None => return Ok(()),
        };
        for child in children {
            self.arena.release(child);
        }
        if is_root {
            self.arena.release(id);
        }
        Ok(())
    }
}

fn is_xsi_type(attr: &XmlAttribute) -> bool {
    attr.namespace == xsi::NS && attr.local_name == xsi::TYPE
}

// ---------------------------------------------------------------------------
// Emission
// ---------------------------------------------------------------------------

fn emit_value<E: TriplesEmitter>(
    emitter: &mut E,
    subject: &str,
    predicate: &str,
    outcome: ValueOutcome<'_>,
) -> Result<(), ConvertError> {
    match outcome {
        ValueOutcome::NoValue => {}
        ValueOutcome::Literal(value) => emitter.emit_literal(subject, predicate, value)?,
        ValueOutcome::Resource(resource) => emitter.emit_iri(subject, predicate, resource)?,
        ValueOutcome::Typed { value, datatype } => {
            emitter.emit_typed_literal(subject, predicate, value, datatype)?
        }
    }
    Ok(())
}

fn emit_properties<E: TriplesEmitter>(
    policy: &Policy,
    emitter: &mut E,
    node: &ElementNode,
) -> Result<(), ConvertError> {
    for property in &node.properties {
        if let Some(value) = &property.value {
            emitter.emit_literal(&node.identity, &property.predicate(), value)?;
        }
    }
    if policy.add_index() {
        emitter.emit_int(&node.identity, xtr::INDEX, node.index as i64)?;
    }
    Ok(())
}

/// Returns true when a property was emitted; a leaf without text vanishes.
fn emit_literal_property<E: TriplesEmitter>(
    policy: &Policy,
    emitter: &mut E,
    node: &ElementNode,
    parent: &ElementNode,
) -> Result<bool, ConvertError> {
    let Some(value) = node.value() else {
        return Ok(false);
    };
    let datatype = policy.type_datatype(&node.type_iri);
    let outcome = policy.value_outcome(Some(value), &node.type_iri, datatype)?;
    emit_value(emitter, &parent.identity, &node.type_iri, outcome)?;
    Ok(true)
}

fn emit_shallow<E: TriplesEmitter>(
    policy: &Policy,
    emitter: &mut E,
    node: &ElementNode,
    parent: &ElementNode,
) -> Result<(), ConvertError> {
    emitter.emit_iri(&parent.identity, &node.type_iri, &node.identity)?;
    let datatype = policy.instance_datatype(&node.identity, &node.type_iri);
    let outcome = policy.value_outcome(node.value(), &node.type_iri, datatype)?;
    emit_value(emitter, &node.identity, xtr::HAS_VALUE, outcome)?;
    emit_properties(policy, emitter, node)
}

fn emit_resource<E: TriplesEmitter>(
    policy: &Policy,
    emitter: &mut E,
    node: &ElementNode,
    parent: Option<&ElementNode>,
) -> Result<(), ConvertError> {
    emitter.emit_iri(&node.identity, standard::RDF_TYPE, &node.type_iri)?;

    if let Some(parent) = parent {
        let predicate = policy.connecting_predicate(&parent.type_iri, &node.type_iri);
        if policy.is_inverted(predicate, &parent.type_iri, &node.type_iri) {
            emitter.emit_iri(&node.identity, predicate, &parent.identity)?;
        } else {
            emitter.emit_iri(&parent.identity, predicate, &node.identity)?;
        }
    }

    let datatype = policy.type_datatype(&node.type_iri);
    let outcome = policy.value_outcome(node.value(), &node.type_iri, datatype)?;
    if outcome != ValueOutcome::NoValue {
        emit_value(emitter, &node.identity, xtr::HAS_VALUE, outcome)?;
        if node.has_mixed_content() {
            emitter.emit_list(&node.identity, xtr::HAS_MIXED_CONTENT, &node.mixed_content)?;
        }
    }

    emit_properties(policy, emitter, node)
}

// ---------------------------------------------------------------------------
// Event handling
// ---------------------------------------------------------------------------

impl<E: TriplesEmitter> XmlEventHandler for Converter<'_, E> {
    fn document_started(&mut self) -> Result<(), ConvertError> {
        self.emitter.add_prefix("rdf", standard::RDF)?;
        self.emitter.add_prefix("xsd", standard::XSD)?;
        self.emitter.add_prefix(xtr::PREFIX, xtr::NS)?;
        Ok(())
    }

    fn namespace_declared(&mut self, prefix: &str, uri: &str) -> Result<(), ConvertError> {
        self.namespaces.declare(prefix, uri);
        Ok(())
    }

    fn element_opened(
        &mut self,
        namespace: &str,
        local_name: &str,
        _qname: &str,
        attributes: &[XmlAttribute],
    ) -> Result<(), ConvertError> {
        self.open(namespace, local_name, attributes)
    }

    fn text(&mut self, text: &str) -> Result<(), ConvertError> {
        if text.is_empty() {
            return Ok(());
        }
        if let Some(node) = self.stack.last().and_then(|id| self.arena.get_mut(*id)) {
            node.append_text(text);
        }
        Ok(())
    }

    fn element_closed(&mut self, _namespace: &str, _local_name: &str, _qname: &str) -> Result<(), ConvertError> {
        self.close()
    }

    fn document_ended(&mut self) -> Result<(), ConvertError> {
        debug!(
            elements = self.elements,
            triples = self.emitter.triple_count(),
            "document converted"
        );
        self.emitter.flush()?;
        Ok(())
    }
}
