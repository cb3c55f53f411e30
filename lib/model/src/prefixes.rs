use oxrdf::NamedNode;
use std::collections::BTreeMap;
use tracing::warn;

/// Maps short prefixes to namespaces and expands compact names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    prefixes: BTreeMap<String, String>,
}

impl PrefixMap {
    /// Creates an empty [PrefixMap].
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `prefix` to `namespace`, replacing an existing binding.
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Returns the namespace bound to `prefix`.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Iterates over all `(prefix, namespace)` bindings in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Expands a compact name like `ex:Film` into a full IRI.
    ///
    /// Bracketed IRIs (`<http://...>`) and names that already look like absolute IRIs are taken
    /// as they are. If the prefix of a compact name is unknown, the compact name is returned
    /// unchanged. Consumers of the resulting node must tolerate such unexpanded names.
    pub fn expand(&self, name: &str) -> NamedNode {
        if let Some(iri) = name.strip_prefix('<').and_then(|n| n.strip_suffix('>')) {
            return NamedNode::new_unchecked(iri);
        }

        if let Some((prefix, local)) = name.split_once(':') {
            if let Some(namespace) = self.prefixes.get(prefix) {
                return NamedNode::new_unchecked(format!("{namespace}{local}"));
            }
            if local.starts_with("//") {
                return NamedNode::new_unchecked(name);
            }
        }

        warn!(name, "Unknown prefix, keeping the compact name");
        NamedNode::new_unchecked(name)
    }

    /// Shortens `iri` to a compact name if one of the namespaces is a prefix of it.
    ///
    /// The longest matching namespace wins.
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| !ns.is_empty() && iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{prefix}:{}", &iri[ns.len()..]))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrefixMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            prefixes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
