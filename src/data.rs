use serde::{Deserialize, Serialize};

/// A typed attribute value.
///
/// The type is decided once, when a raw record is ingested into the catalog:
/// anything that parses as a finite number becomes [`AttributeValue::Number`],
/// everything else stays [`AttributeValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Text content, trimmed but not case-folded.
    Text(String),
    /// Finite numeric content.
    Number(f64),
}

impl AttributeValue {
    /// Infer the value type from a raw string.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => AttributeValue::Number(n),
            _ => AttributeValue::Text(trimmed.to_string()),
        }
    }

    /// Returns the text value if this is a Text variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Number(_) => None,
        }
    }

    /// Returns the numeric value if this is a Number variant.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, AttributeValue::Text(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, AttributeValue::Number(_))
    }

    /// A hashable identity for exact value comparison.
    ///
    /// `-0.0` and `0.0` share an identity.
    pub(crate) fn identity(&self) -> ValueIdentity<'_> {
        match self {
            AttributeValue::Text(s) => ValueIdentity::Text(s),
            AttributeValue::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                ValueIdentity::Number(n.to_bits())
            }
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Number(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Number(v as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ValueIdentity<'a> {
    Text(&'a str),
    Number(u64),
}

/// A raw scalar as handed over by a data loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl RawValue {
    /// Convert into a typed attribute value. `Null` has no attribute value.
    pub fn into_attribute(self) -> Option<AttributeValue> {
        match self {
            RawValue::Text(s) => Some(AttributeValue::infer(&s)),
            RawValue::Number(n) if n.is_finite() => Some(AttributeValue::Number(n)),
            RawValue::Number(n) => Some(AttributeValue::Text(n.to_string())),
            RawValue::Bool(b) => Some(AttributeValue::Text(b.to_string())),
            RawValue::Null => None,
        }
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(v as f64)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Number(v as f64)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

/// An untyped input record: an id plus attribute name/value pairs in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub attributes: Vec<(String, RawValue)>,
}

impl RawRecord {
    /// Create a record with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn add_field(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// A catalog product with typed attributes in insertion order.
///
/// Products are only constructed by the catalog and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: String,
    attributes: Vec<(String, AttributeValue)>,
}

impl Product {
    /// Type a raw record.
    ///
    /// Names and ids are trimmed, attributes with an empty name or a null value
    /// are dropped, and a repeated name keeps its first position with the last value.
    pub(crate) fn from_raw(record: RawRecord) -> Self {
        let mut attributes: Vec<(String, AttributeValue)> =
            Vec::with_capacity(record.attributes.len());

        for (name, raw) in record.attributes {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let Some(value) = raw.into_attribute() else {
                continue;
            };
            match attributes.iter_mut().find(|(existing, _)| existing == name) {
                Some(slot) => slot.1 = value,
                None => attributes.push((name.to_string(), value)),
            }
        }

        Self {
            id: record.id.trim().to_string(),
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Check if the product has an attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate the text-typed attribute values in insertion order.
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().filter_map(|(_, value)| value.as_text())
    }

    /// Get the number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the product has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
