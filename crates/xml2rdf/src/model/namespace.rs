//! Namespace normalization and prefix resolution.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ConvertError;

/// Which names the base namespace is substituted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliesTo {
    #[default]
    Elements,
    Attributes,
    Both,
}

impl AppliesTo {
    fn elements(self) -> bool {
        matches!(self, AppliesTo::Elements | AppliesTo::Both)
    }

    fn attributes(self) -> bool {
        matches!(self, AppliesTo::Attributes | AppliesTo::Both)
    }
}

/// The suffix / base / override chain shared by elements, attributes and
/// prefix declarations.
#[derive(Debug, Clone, Default)]
pub struct NamespacePolicy {
    pub suffix: Option<String>,
    pub base: Option<String>,
    pub applies_to: AppliesTo,
    pub override_ns: Option<String>,
}

impl NamespacePolicy {
    /// Append the configured suffix to a non-empty namespace that does not
    /// already end in `/` or `#`.
    fn with_suffix(&self, uri: &str) -> String {
        match &self.suffix {
            Some(suffix) if !uri.is_empty() && !(uri.ends_with('/') || uri.ends_with('#')) => {
                format!("{uri}{suffix}")
            }
            _ => uri.to_string(),
        }
    }

    /// Element namespace after suffix and base substitution, before override.
    /// This is the namespace used to key class remaps and attribute rules.
    pub fn element_namespace(&self, uri: &str) -> String {
        let uri = self.with_suffix(uri);
        match &self.base {
            Some(base) if uri.is_empty() && self.applies_to.elements() => base.clone(),
            _ => uri,
        }
    }

    /// Namespace used when building identifiers from `element_ns`.
    pub fn effective<'a>(&'a self, element_ns: &'a str) -> &'a str {
        self.override_ns.as_deref().unwrap_or(element_ns)
    }

    /// Namespace of an attribute. An unprefixed attribute takes the element's
    /// namespace when `inherit` is set, otherwise the base namespace if it
    /// applies to attributes.
    pub fn attribute_namespace(&self, uri: &str, element_ns: &str, inherit: bool) -> String {
        let uri = match &self.override_ns {
            Some(ns) => ns.clone(),
            None => uri.to_string(),
        };
        let uri = self.with_suffix(&uri);
        if !uri.is_empty() {
            return uri;
        }
        if inherit && !element_ns.is_empty() {
            return element_ns.to_string();
        }
        match &self.base {
            Some(base) if self.applies_to.attributes() => base.clone(),
            _ => uri,
        }
    }

    /// Namespace bound by a prefix declaration.
    pub fn declared_namespace(&self, uri: &str) -> String {
        if let Some(ns) = &self.override_ns {
            return ns.clone();
        }
        let uri = self.with_suffix(uri);
        match &self.base {
            Some(base) if uri.is_empty() => base.clone(),
            _ => uri,
        }
    }
}

/// Prefix bindings seen so far in the document.
#[derive(Debug, Default)]
pub struct NamespaceResolver {
    policy: NamespacePolicy,
    prefixes: HashMap<String, String>,
}

impl NamespaceResolver {
    pub fn new(policy: NamespacePolicy) -> Self {
        Self {
            policy,
            prefixes: HashMap::new(),
        }
    }

    /// Record a prefix declaration. A later declaration of the same prefix
    /// replaces the earlier binding.
    pub fn declare(&mut self, prefix: &str, uri: &str) {
        let ns = self.policy.declared_namespace(uri);
        self.prefixes.insert(prefix.to_string(), ns);
    }

    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Split `prefix:local` and resolve the prefix. Returns `None` for a
    /// value without a colon.
    pub fn resolve_qname<'v>(&self, qname: &'v str) -> Result<Option<(String, &'v str)>, ConvertError> {
        let Some((prefix, local)) = qname.split_once(':') else {
            return Ok(None);
        };
        match self.lookup(prefix) {
            Some(ns) => Ok(Some((ns.to_string(), local))),
            None => Err(ConvertError::UnboundPrefix {
                prefix: prefix.to_string(),
                qname: qname.to_string(),
            }),
        }
    }

    /// Expand a colon-qualified value to `namespace + local`; values without
    /// a colon are returned unchanged.
    pub fn expand(&self, value: &str) -> Result<String, ConvertError> {
        Ok(match self.resolve_qname(value)? {
            Some((ns, local)) => format!("{ns}{local}"),
            None => value.to_string(),
        })
    }
}
