/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Generic JSON codec for protocol record types.
//!
//! Encoding goes straight through serde: the record declaration (field order,
//! wire renames, optional-field skips) is the schema, and the same declaration
//! drives decoding. Decoding runs the derived deserializer through a small
//! adapter over an already-parsed [`serde_json::Value`] tree that tracks the
//! field path and classifies failures, so callers get
//! ``missing required field `kind` at `element.kind` `` back instead of an
//! opaque serde message. The transport layer owns the bytes on both sides;
//! this module never sees unparsed input.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde::de;
use serde::de::DeserializeSeed;
use serde::de::EnumAccess;
use serde::de::Expected;
use serde::de::MapAccess;
use serde::de::SeqAccess;
use serde::de::Unexpected;
use serde::de::VariantAccess;
use serde::de::Visitor;
use serde_json::Value;
use thiserror::Error;

/// Dotted, index-aware trail to the JSON value a decode failure refers to,
/// e.g. `element.location.offset` or `parameters[2].kind`. The document root
/// renders as `$`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Field(String),
    Index(usize),
}

impl FieldPath {
    fn root() -> Self {
        FieldPath {
            segments: Vec::new(),
        }
    }

    fn child_field(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.to_owned()));
        FieldPath { segments }
    }

    fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        FieldPath { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Why a decode failed, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// A field the record declares as required was absent, or present with an
    /// explicit JSON `null` (the two are equivalent on this wire).
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },
    /// The key was present but held a value of the wrong JSON type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    /// A nested decode failed in a way that is neither of the above:
    /// out-of-range number, value outside a closed enum, duplicate key.
    #[error("{message}")]
    MalformedNestedObject { message: String },
}

/// A structured decode failure: what went wrong and the path of the field it
/// went wrong at. Decode failures are always reported; no field is ever
/// silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    path: Option<FieldPath>,
}

impl DecodeError {
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Path to the offending value; `$` if the failure was at the root.
    pub fn path(&self) -> FieldPath {
        self.path.clone().unwrap_or_default()
    }

    fn new(kind: DecodeErrorKind) -> Self {
        DecodeError { kind, path: None }
    }

    fn at(kind: DecodeErrorKind, path: FieldPath) -> Self {
        DecodeError {
            kind,
            path: Some(path),
        }
    }

    /// Attach `path` unless a deeper frame already did. A missing field is
    /// raised by the record's own visitor, one level above the field itself,
    /// so the field name still has to be appended here.
    fn locate(mut self, path: &FieldPath) -> Self {
        if self.path.is_none() {
            self.path = Some(match &self.kind {
                DecodeErrorKind::MissingRequiredField { field } => path.child_field(field),
                _ => path.clone(),
            });
        }
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at `{}`", self.kind, self.path())
    }
}

impl std::error::Error for DecodeError {}

impl de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::new(DecodeErrorKind::MalformedNestedObject {
            message: msg.to_string(),
        })
    }

    fn missing_field(field: &'static str) -> Self {
        DecodeError::new(DecodeErrorKind::MissingRequiredField {
            field: field.to_owned(),
        })
    }

    fn invalid_type(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        DecodeError::new(DecodeErrorKind::TypeMismatch {
            expected: exp.to_string(),
            found: unexp.to_string(),
        })
    }

    fn invalid_value(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        Self::invalid_type(unexp, exp)
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        DecodeError::new(DecodeErrorKind::TypeMismatch {
            expected: format!("one of {}", expected.join(", ")),
            found: format!("`{variant}`"),
        })
    }
}

/// Encode a record to its JSON form. Pure: absent optional fields are omitted
/// entirely (never encoded as `null` or empty), keys come out in declaration
/// order, nested records and sequences encode recursively. Record types are
/// built from structs, string enums, sequences and primitives only, so
/// serialization is infallible for a valid instance.
pub fn encode<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).expect("protocol record serialization is infallible")
}

/// Decode a record from an already-parsed JSON value.
pub fn decode<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T, DecodeError> {
    T::deserialize(ValueDeserializer::root(value))
}

/// Decode a top-level collection. An absent or explicitly `null` collection
/// means "no data" and yields an empty vector; any other non-array value is
/// still malformed. A failure on any element propagates with its indexed path.
pub fn decode_list<'de, T: Deserialize<'de>>(
    value: Option<&'de Value>,
) -> Result<Vec<T>, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value @ Value::Array(_)) => decode(value),
        Some(other) => Err(DecodeError::at(
            DecodeErrorKind::TypeMismatch {
                expected: "an array".to_owned(),
                found: unexpected(other).to_string(),
            },
            FieldPath::root(),
        )),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Unexpected::Signed(i)
            } else if let Some(u) = n.as_u64() {
                Unexpected::Unsigned(u)
            } else {
                Unexpected::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Deserializer over a borrowed value tree that knows where it is.
struct ValueDeserializer<'de> {
    value: &'de Value,
    path: FieldPath,
}

impl<'de> ValueDeserializer<'de> {
    fn root(value: &'de Value) -> Self {
        ValueDeserializer {
            value,
            path: FieldPath::root(),
        }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        let ValueDeserializer { value, path } = self;
        let result = match value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    visitor.visit_i64(i)
                } else if let Some(u) = n.as_u64() {
                    visitor.visit_u64(u)
                } else if let Some(f) = n.as_f64() {
                    visitor.visit_f64(f)
                } else {
                    Err(de::Error::custom("number is not representable"))
                }
            }
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Array(items) => visitor.visit_seq(SeqDeserializer {
                iter: items.iter().enumerate(),
                path: &path,
            }),
            Value::Object(entries) => visitor.visit_map(MapDeserializer {
                iter: entries.iter(),
                pending: None,
                path: &path,
            }),
        };
        result.map_err(|e| e.locate(&path))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self.value {
            Value::String(s) => visitor
                .visit_enum(EnumDeserializer { variant: s.as_str() })
                .map_err(|e| e.locate(&self.path)),
            other => Err(DecodeError::at(
                DecodeErrorKind::TypeMismatch {
                    expected: "a string".to_owned(),
                    found: unexpected(other).to_string(),
                },
                self.path.clone(),
            )),
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct MapDeserializer<'de, 'a> {
    iter: serde_json::map::Iter<'de>,
    pending: Option<(&'de String, &'de Value)>,
    path: &'a FieldPath,
}

impl<'de> MapAccess<'de> for MapDeserializer<'de, '_> {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, DecodeError> {
        loop {
            match self.iter.next() {
                // An explicit null is equivalent to an absent key: required
                // fields report it as missing, optional fields stay unset.
                Some((_, value)) if value.is_null() => continue,
                Some((key, value)) => {
                    self.pending = Some((key, value));
                    return seed
                        .deserialize(KeyDeserializer { key: key.as_str() })
                        .map(Some)
                        .map_err(|e| e.locate(self.path));
                }
                None => return Ok(None),
            }
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, DecodeError> {
        match self.pending.take() {
            Some((key, value)) => seed.deserialize(ValueDeserializer {
                value,
                path: self.path.child_field(key),
            }),
            None => Err(de::Error::custom("map value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct SeqDeserializer<'de, 'a> {
    iter: std::iter::Enumerate<std::slice::Iter<'de, Value>>,
    path: &'a FieldPath,
}

impl<'de> SeqAccess<'de> for SeqDeserializer<'de, '_> {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DecodeError> {
        match self.iter.next() {
            Some((index, value)) => seed
                .deserialize(ValueDeserializer {
                    value,
                    path: self.path.child_index(index),
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Map keys and enum variant identifiers are always plain strings.
struct KeyDeserializer<'de> {
    key: &'de str,
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        visitor.visit_borrowed_str(self.key)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct EnumDeserializer<'de> {
    variant: &'de str,
}

impl<'de> EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = DecodeError;
    type Variant = UnitVariant;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, UnitVariant), DecodeError> {
        let value = seed.deserialize(KeyDeserializer { key: self.variant })?;
        Ok((value, UnitVariant))
    }
}

struct UnitVariant;

impl<'de> VariantAccess<'de> for UnitVariant {
    type Error = DecodeError;

    fn unit_variant(self) -> Result<(), DecodeError> {
        Ok(())
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, _seed: T) -> Result<T::Value, DecodeError> {
        Err(de::Error::custom("expected a plain string enum value"))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, _visitor: V) -> Result<V::Value, DecodeError> {
        Err(de::Error::custom("expected a plain string enum value"))
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, DecodeError> {
        Err(de::Error::custom("expected a plain string enum value"))
    }
}
