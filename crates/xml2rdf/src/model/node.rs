//! In-flight element nodes, kept in an index-addressed arena.
//!
//! Parent and child edges are [`NodeId`]s into the arena. A node's slot is
//! released when its parent closes, so only the open ancestor chain and the
//! direct children of open elements are ever live.

use serde::Serialize;

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One entry of an element's interleaved text / child sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedContent {
    Text(String),
    /// Identity of a child element.
    Node(String),
}

/// Attribute-derived property captured when the element opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub namespace: String,
    pub local_name: String,
    pub value: Option<String>,
}

impl Property {
    /// Predicate IRI: namespace followed by local name.
    pub fn predicate(&self) -> String {
        format!("{}{}", self.namespace, self.local_name)
    }
}

#[derive(Debug)]
pub struct ElementNode {
    pub type_iri: String,
    pub identity: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub properties: Vec<Property>,
    pub mixed_content: Vec<MixedContent>,
    /// Zero-based position among the parent's children.
    pub index: usize,
    pub auto_detected_literal: bool,
    text: Option<String>,
    /// Text seen since the last child opened.
    fragment: String,
}

impl ElementNode {
    pub fn new(type_iri: String, identity: String, parent: Option<NodeId>, index: usize) -> Self {
        Self {
            type_iri,
            identity,
            parent,
            children: Vec::new(),
            properties: Vec::new(),
            mixed_content: Vec::new(),
            index,
            auto_detected_literal: false,
            text: None,
            fragment: String::new(),
        }
    }

    /// Accumulate a chunk of character data.
    pub fn append_text(&mut self, chunk: &str) {
        self.text.get_or_insert_with(String::new).push_str(chunk);
        self.fragment.push_str(chunk);
    }

    /// Trimmed text content, or `None` when no non-blank text was seen.
    pub fn value(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn has_mixed_content(&self) -> bool {
        !self.mixed_content.is_empty()
    }

    /// Replace the accumulated text, e.g. from a class transform.
    pub fn set_value(&mut self, value: Option<String>) {
        self.text = value;
    }

    /// Register a child that just opened. Once this node has a value the
    /// child is also recorded as mixed content.
    pub fn child_opened(&mut self, child: NodeId, child_identity: &str) {
        self.children.push(child);
        if self.value().is_some() {
            self.flush_fragment();
            self.mixed_content
                .push(MixedContent::Node(child_identity.to_string()));
        } else {
            self.fragment.clear();
        }
    }

    /// Append trailing text to an existing mixed-content sequence.
    pub fn finish_mixed_content(&mut self) {
        if self.has_mixed_content() {
            self.flush_fragment();
        }
    }

    /// Drop everything but the close flags and hand back the children.
    /// A closed node stays in the arena until its parent closes, and only
    /// `auto_detected_literal` is read in that time.
    pub fn retire(&mut self) -> Vec<NodeId> {
        self.type_iri = String::new();
        self.identity = String::new();
        self.properties = Vec::new();
        self.mixed_content = Vec::new();
        self.text = None;
        self.fragment = String::new();
        std::mem::take(&mut self.children)
    }

    fn flush_fragment(&mut self) {
        let fragment = std::mem::take(&mut self.fragment);
        if !fragment.trim().is_empty() {
            self.mixed_content.push(MixedContent::Text(fragment));
        }
    }
}

/// Slot arena for [`ElementNode`]s with slot reuse.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<ElementNode>>,
    free: Vec<usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: ElementNode) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Remove a node and free its slot.
    pub fn release(&mut self, id: NodeId) -> Option<ElementNode> {
        let node = self.slots.get_mut(id.0).and_then(Option::take);
        if node.is_some() {
            self.free.push(id.0);
        }
        node
    }

    /// Number of nodes currently held.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
