//! Untyped manifest documents
//!
//! Manifests are decoded into [`Document`], a closed sum type over the YAML
//! data model. Extraction rules never downcast raw values; they walk the
//! tree through the accessor methods on [`Mapping`], which distinguish an
//! absent field (`Ok(None)`) from a field of the wrong shape
//! ([`Error::MalformedField`]).

use crate::error::{Error, Result};
use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;

/// YAML merge key, as in `<<: *defaults`
const MERGE_KEY: &str = "<<";

/// A decoded YAML value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Document {
    /// Explicit `null`, `~` or an empty value
    #[default]
    Null,
    /// Booleans and numbers, kept in their textual form
    Scalar(String),
    /// A string scalar
    String(String),
    /// A YAML sequence
    Sequence(Vec<Document>),
    /// A YAML mapping with string keys
    Mapping(Mapping),
}

/// The shape of a value, used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Missing,
    Null,
    Scalar,
    String,
    Sequence,
    Mapping,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shape::Missing => "nothing",
            Shape::Null => "null",
            Shape::Scalar => "a non-string scalar",
            Shape::String => "a string",
            Shape::Sequence => "a sequence",
            Shape::Mapping => "a mapping",
        };
        f.write_str(s)
    }
}

impl Document {
    /// Shape of this value
    pub fn shape(&self) -> Shape {
        match self {
            Document::Null => Shape::Null,
            Document::Scalar(_) => Shape::Scalar,
            Document::String(_) => Shape::String,
            Document::Sequence(_) => Shape::Sequence,
            Document::Mapping(_) => Shape::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Document::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    /// Require this value to be a mapping
    ///
    /// `field` names the value in the error, e.g. `containers[1]`.
    pub fn expect_mapping(&self, field: impl Into<String>) -> Result<&Mapping> {
        self.as_mapping()
            .ok_or_else(|| Error::malformed_field(field, Shape::Mapping, self.shape(), self.clone()))
    }
}

/// A YAML mapping keyed by strings
///
/// Inserting an existing key replaces its value, which is how duplicate
/// keys in a manifest are resolved (last one wins).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping(BTreeMap<String, Document>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
        self.0.insert(key.into(), value)
    }

    /// Raw lookup; an explicit `null` is returned as [`Document::Null`]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Document)> {
        self.0.iter()
    }

    /// Lookup treating an explicit `null` like an absent key
    fn present(&self, key: &str) -> Option<&Document> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    fn mismatch(&self, key: &str, expected: Shape, found: Shape) -> Error {
        Error::malformed_field(key, expected, found, Document::Mapping(self.clone()))
    }

    /// A mapping that must be present
    pub fn required_mapping(&self, key: &str) -> Result<&Mapping> {
        match self.0.get(key) {
            Some(Document::Mapping(m)) => Ok(m),
            Some(other) => Err(self.mismatch(key, Shape::Mapping, other.shape())),
            None => Err(self.mismatch(key, Shape::Mapping, Shape::Missing)),
        }
    }

    /// A mapping that may be absent
    pub fn optional_mapping(&self, key: &str) -> Result<Option<&Mapping>> {
        match self.present(key) {
            Some(Document::Mapping(m)) => Ok(Some(m)),
            Some(other) => Err(self.mismatch(key, Shape::Mapping, other.shape())),
            None => Ok(None),
        }
    }

    /// A sequence that may be absent
    pub fn optional_sequence(&self, key: &str) -> Result<Option<&[Document]>> {
        match self.present(key) {
            Some(Document::Sequence(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(key, Shape::Sequence, other.shape())),
            None => Ok(None),
        }
    }

    /// A string that may be absent
    pub fn optional_str(&self, key: &str) -> Result<Option<&str>> {
        match self.present(key) {
            Some(Document::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(key, Shape::String, other.shape())),
            None => Ok(None),
        }
    }
}

impl Mapping {
    /// Apply a `<<` merge value; keys already present are kept
    ///
    /// The value is a mapping or a sequence of mappings, earlier entries
    /// taking precedence.
    fn merge(&mut self, value: Document) -> std::result::Result<(), String> {
        match value {
            Document::Null => Ok(()),
            Document::Mapping(source) => {
                for (key, value) in source.0 {
                    self.0.entry(key).or_insert(value);
                }
                Ok(())
            }
            Document::Sequence(sources) => {
                for source in sources {
                    match source {
                        Document::Mapping(_) => self.merge(source)?,
                        other => {
                            return Err(format!(
                                "merge key sequence entry is {}, expected a mapping",
                                other.shape()
                            ))
                        }
                    }
                }
                Ok(())
            }
            other => Err(format!(
                "merge key value is {}, expected a mapping or a sequence of mappings",
                other.shape()
            )),
        }
    }
}

impl FromIterator<(String, Document)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Document)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl From<Mapping> for Document {
    fn from(mapping: Mapping) -> Self {
        Document::Mapping(mapping)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Sequence(items)
    }
}

// Compact flow-style rendering used in error messages and logs
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Null => f.write_str("null"),
            Document::Scalar(s) => f.write_str(s),
            Document::String(s) => {
                if s.is_empty() || s.contains([',', ':', '{', '}', '[', ']', '"', '\n']) {
                    write!(f, "{:?}", s)
                } else {
                    f.write_str(s)
                }
            }
            Document::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Document::Mapping(mapping) => write!(f, "{}", mapping),
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Document, E> {
        Ok(Document::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Document, E> {
        Ok(Document::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Document, E> {
        Ok(Document::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Document, E> {
        Ok(Document::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Document, E> {
        Ok(Document::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Document, E> {
        Ok(Document::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        Document::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Document, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Document::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::new();
        let mut merges = Vec::new();
        while let Some(MappingKey(key)) = map.next_key()? {
            let value = map.next_value()?;
            if key == MERGE_KEY {
                merges.push(value);
            } else {
                mapping.insert(key, value);
            }
        }
        for merge in merges {
            mapping
                .merge(merge)
                .map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(Document::Mapping(mapping))
    }

    // Custom tags such as `!Ref value`: keep the value, drop the tag
    fn visit_enum<A>(self, data: A) -> std::result::Result<Document, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant): (de::IgnoredAny, _) = data.variant()?;
        variant.newtype_variant()
    }
}

/// A mapping key; scalar keys are stringified, collection keys are rejected
struct MappingKey(String);

impl<'de> Deserialize<'de> for MappingKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MappingKeyVisitor)
    }
}

struct MappingKeyVisitor;

impl<'de> Visitor<'de> for MappingKeyVisitor {
    type Value = MappingKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<MappingKey, E> {
        Ok(MappingKey("null".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Document {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_nested_values() {
        let doc = parse("a:\n  b: [1, two, null]\n  c: true\n");
        let a = doc.as_mapping().unwrap().required_mapping("a").unwrap();
        assert_eq!(
            a.get("b"),
            Some(&Document::Sequence(vec![
                Document::Scalar("1".into()),
                Document::String("two".into()),
                Document::Null,
            ]))
        );
        assert_eq!(a.get("c"), Some(&Document::Scalar("true".into())));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let doc = parse("image: first\nimage: second\n");
        let mapping = doc.as_mapping().unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.optional_str("image").unwrap(), Some("second"));
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let doc = parse("80: http\ntrue: yes\n");
        let mapping = doc.as_mapping().unwrap();
        assert!(mapping.contains_key("80"));
        assert!(mapping.contains_key("true"));
    }

    #[test]
    fn test_tagged_value_keeps_inner_value() {
        let doc = parse("image: !custom nginx:1.25\n");
        assert_eq!(
            doc.as_mapping().unwrap().optional_str("image").unwrap(),
            Some("nginx:1.25")
        );
    }

    #[test]
    fn test_optional_accessors_absent_and_null() {
        let doc = parse("present: null\n");
        let mapping = doc.as_mapping().unwrap();
        assert!(mapping.optional_mapping("missing").unwrap().is_none());
        assert!(mapping.optional_sequence("present").unwrap().is_none());
        assert!(mapping.optional_str("present").unwrap().is_none());
    }

    #[test]
    fn test_optional_accessors_reject_wrong_shape() {
        let doc = parse("containers: nginx\nspec: [1]\n");
        let mapping = doc.as_mapping().unwrap();

        let err = mapping.optional_sequence("containers").unwrap_err();
        match err {
            Error::MalformedField {
                field,
                expected,
                found,
                ..
            } => {
                assert_eq!(field, "containers");
                assert_eq!(expected, Shape::Sequence);
                assert_eq!(found, Shape::String);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(mapping.optional_mapping("spec").is_err());
    }

    #[test]
    fn test_required_mapping_missing() {
        let doc = parse("kind: Pod\n");
        let err = doc.as_mapping().unwrap().required_mapping("spec").unwrap_err();
        assert!(err.to_string().contains("spec"));
        assert!(matches!(
            err,
            Error::MalformedField {
                found: Shape::Missing,
                ..
            }
        ));
    }

    #[test]
    fn test_merge_key_fills_missing_fields() {
        let doc = parse(
            r#"
defaults: &defaults
  image: unique:9
  imagePullPolicy: Always
container:
  <<: *defaults
  imagePullPolicy: IfNotPresent
"#,
        );
        let container = doc
            .as_mapping()
            .unwrap()
            .required_mapping("container")
            .unwrap();
        assert!(!container.contains_key("<<"));
        assert_eq!(container.optional_str("image").unwrap(), Some("unique:9"));
        assert_eq!(
            container.optional_str("imagePullPolicy").unwrap(),
            Some("IfNotPresent")
        );
    }

    #[test]
    fn test_merge_key_sequence_earlier_wins() {
        let doc = parse(
            r#"
a: &a {image: "first:1"}
b: &b {image: "second:2", name: b}
merged:
  <<: [*a, *b]
"#,
        );
        let merged = doc.as_mapping().unwrap().required_mapping("merged").unwrap();
        assert_eq!(merged.optional_str("image").unwrap(), Some("first:1"));
        assert_eq!(merged.optional_str("name").unwrap(), Some("b"));
    }

    #[test]
    fn test_merge_key_scalar_is_rejected() {
        assert!(serde_yaml_ng::from_str::<Document>("<<: nginx
").is_err());
    }

    #[test]
    fn test_display_flow_style() {
        let doc = parse("kind: Pod\nspec:\n  containers:\n  - image: \"nginx:1.0\"\n");
        assert_eq!(
            doc.to_string(),
            "{kind: Pod, spec: {containers: [{image: \"nginx:1.0\"}]}}"
        );
    }
}
