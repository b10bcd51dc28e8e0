//! Protocol-specific fields stamped onto every packet of a source.

use std::collections::BTreeMap;

use wn_core::NodeId;

/// One context field value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextValue {
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
    Text(String),
    Node(NodeId),
}

impl From<u64> for ContextValue {
    fn from(v: u64) -> Self {
        ContextValue::U64(v)
    }
}

impl From<u32> for ContextValue {
    fn from(v: u32) -> Self {
        ContextValue::U64(v as u64)
    }
}

impl From<i64> for ContextValue {
    fn from(v: i64) -> Self {
        ContextValue::I64(v)
    }
}

impl From<f64> for ContextValue {
    fn from(v: f64) -> Self {
        ContextValue::F64(v)
    }
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self {
        ContextValue::Bool(v)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        ContextValue::Text(v.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(v: String) -> Self {
        ContextValue::Text(v)
    }
}

impl From<NodeId> for ContextValue {
    fn from(v: NodeId) -> Self {
        ContextValue::Node(v)
    }
}

impl std::fmt::Display for ContextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextValue::U64(v)  => write!(f, "{v}"),
            ContextValue::I64(v)  => write!(f, "{v}"),
            ContextValue::F64(v)  => write!(f, "{v}"),
            ContextValue::Bool(v) => write!(f, "{v}"),
            ContextValue::Text(v) => write!(f, "{v}"),
            ContextValue::Node(v) => write!(f, "{}", v.0),
        }
    }
}

/// Named fields merged into every [`PacketRecord`][crate::PacketRecord] a
/// source generates (destination node, access category, …).
///
/// Field names are unique: inserting a name that already exists replaces the
/// earlier value, so the last registration wins.  Iteration is in name
/// order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketContext {
    fields: BTreeMap<String, ContextValue>,
}

impl PacketContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name`, returning the value it replaced (if any).
    pub fn insert(
        &mut self,
        name:  impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Option<ContextValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A copy of `self` with every field of `overrides` applied on top.
    pub fn merged_with(&self, overrides: &PacketContext) -> PacketContext {
        let mut merged = self.clone();
        for (name, value) in &overrides.fields {
            merged.fields.insert(name.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for PacketContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = PacketContext::new();
        for (k, v) in iter {
            ctx.insert(k, v);
        }
        ctx
    }
}
