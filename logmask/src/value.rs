//! A dynamically shaped value for data whose structure is only known at runtime.
//!
//! [`Value`] is the closed set of shapes the engine distinguishes: absent,
//! scalar, string, sequence, string-keyed map and opaque composite. Typed
//! values enter the tree through the `From` conversions or
//! [`Value::object`], and JSON documents through `From<serde_json::Value>`.

use std::{any::Any, fmt};

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::masking::{Maskable, MaskingEngine, TextMask};

/// A composite stored inside a [`Value`].
///
/// Blanket-implemented for every `'static` [`Maskable`] type.
pub trait DynObject: Maskable + Any {
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> DynObject for T
where
    T: Maskable + Any,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A runtime-shaped value.
#[derive(Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Ordered, heterogeneous elements without names.
    Sequence(Vec<Value>),
    /// String-keyed entries in insertion order; keys name their values for
    /// rule lookup.
    Map(IndexMap<String, Value>),
    /// A typed composite, masked through its own [`Maskable`] implementation.
    Object(Box<dyn DynObject>),
}

impl Value {
    /// Wraps a typed composite.
    pub fn object<T>(value: T) -> Self
    where
        T: Maskable + Any,
    {
        Self::Object(Box::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Borrows the composite as `T`, if this is an object of that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Object(object) => (**object).as_any().downcast_ref(),
            _ => None,
        }
    }

    /// Takes the composite back out as `T`.
    ///
    /// Returns the value unchanged when it is not an object of type `T`.
    pub fn into_object<T: Any>(self) -> Result<T, Self> {
        match self {
            Self::Object(object) if (*object).as_any().is::<T>() => object
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| Self::Null),
            other => Err(other),
        }
    }

    /// Converts to JSON. Objects have no JSON form and yield `None`.
    pub fn into_json(self) -> Option<JsonValue> {
        Some(match self {
            Self::Null => JsonValue::Null,
            Self::Bool(flag) => JsonValue::Bool(flag),
            Self::Int(number) => JsonValue::from(number),
            Self::UInt(number) => JsonValue::from(number),
            Self::Float(number) => JsonValue::from(number),
            Self::String(text) => JsonValue::String(text),
            Self::Sequence(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(Self::into_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Map(entries) => JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| value.into_json().map(|value| (key, value)))
                    .collect::<Option<serde_json::Map<_, _>>>()?,
            ),
            Self::Object(_) => return None,
        })
    }
}

impl Maskable for Value {
    fn mask_with(&mut self, engine: &MaskingEngine) {
        let value = std::mem::take(self);
        *self = engine.mask_dynamic(value);
    }

    fn mask_as(&mut self, mask: TextMask, engine: &MaskingEngine) {
        match self {
            Self::String(text) => *text = engine.redact(text, mask),
            Self::Object(object) => object.mask_as(mask, engine),
            _ => self.mask_with(engine),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            Self::Int(number) => f.debug_tuple("Int").field(number).finish(),
            Self::UInt(number) => f.debug_tuple("UInt").field(number).finish(),
            Self::Float(number) => f.debug_tuple("Float").field(number).finish(),
            Self::String(text) => f.debug_tuple("String").field(text).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Object(object) => f
                .debug_tuple("Object")
                .field(&(**object).type_name())
                .finish(),
        }
    }
}

/// Objects never compare equal; everything else compares structurally.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Self::UInt(number)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(entries: I) -> Self {
        Self::Map(entries.into_iter().collect())
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(flag) => Self::Bool(flag),
            JsonValue::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Self::Int(int)
                } else if let Some(uint) = number.as_u64() {
                    Self::UInt(uint)
                } else {
                    number.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            JsonValue::String(text) => Self::String(text),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
