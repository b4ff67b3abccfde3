use super::keys;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Protocol discriminator taken from a node's `type` field
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolType {
    Vless,
    Vmess,
    Trojan,
    Ss,
    Ssr,
    Hysteria2,
    Http,
    /// Any other `type` value, kept verbatim (empty when absent)
    Unknown(String),
}

impl ProtocolType {
    /// Parse a `type` string. Matching is exact; `VLESS` is not `vless`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "vless" => ProtocolType::Vless,
            "vmess" => ProtocolType::Vmess,
            "trojan" => ProtocolType::Trojan,
            "ss" => ProtocolType::Ss,
            "ssr" => ProtocolType::Ssr,
            "hysteria2" => ProtocolType::Hysteria2,
            "http" => ProtocolType::Http,
            other => ProtocolType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProtocolType::Vless => "vless",
            ProtocolType::Vmess => "vmess",
            ProtocolType::Trojan => "trojan",
            ProtocolType::Ss => "ss",
            ProtocolType::Ssr => "ssr",
            ProtocolType::Hysteria2 => "hysteria2",
            ProtocolType::Http => "http",
            ProtocolType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Truthiness in the sense config authors expect: `null`, `false`, `0`,
/// `""`, `[]` and `{}` are falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Render a value as a plain label: strings without quotes, anything else as
/// compact JSON.
pub fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One proxy entry: a mapping from field name to raw value
///
/// Never mutated after loading; normalization builds a new
/// [`CanonicalRecord`](super::CanonicalRecord).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRecord(Map<String, Value>);

impl NodeRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// True if the field is present, even with a `null` value
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Display name used as the primary identity key
    ///
    /// Non-string names (YAML lets `name: 1234` through) are rendered as
    /// text; a missing name is the empty string.
    pub fn name(&self) -> String {
        self.get(keys::NAME).map(value_label).unwrap_or_default()
    }

    /// The raw `type` label, `unknown` when absent
    pub fn type_label(&self) -> String {
        self.get(keys::TYPE)
            .map(value_label)
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn protocol(&self) -> ProtocolType {
        match self.get(keys::TYPE) {
            Some(Value::String(raw)) => ProtocolType::parse(raw),
            Some(other) => ProtocolType::Unknown(other.to_string()),
            None => ProtocolType::Unknown(String::new()),
        }
    }
}

impl From<Map<String, Value>> for NodeRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// An ordered sequence of node records, one per side of a comparison
///
/// Deserializes from a config document holding a `proxies` sequence; every
/// other top-level key is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSet {
    #[serde(default)]
    pub proxies: Vec<NodeRecord>,
}

impl NodeSet {
    pub fn new(proxies: Vec<NodeRecord>) -> Self {
        Self { proxies }
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.proxies.iter()
    }
}
