//! Payment payload types.
//!
//! Two shapes are supported:
//!
//! - [`PaymentPayload`]: the fixed seven-field transaction message. Its
//!   canonical field order is the constant [`PaymentPayload::FIELD_NAMES`].
//! - [`Payload`]: a loosely typed map for messages that arrive as JSON. Keys
//!   live in a `BTreeMap`, so iteration is always in byte order of the name.
//!
//! Only strings and integers are representable. Anything else is rejected
//! with [`SigningError::Encoding`] when converting from JSON.

use crate::errors::{Result, SigningError};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single payload value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// UTF-8 text, rendered as a JSON string
    Str(String),
    /// Integer in minor units, rendered in minimal decimal form
    Int(i64),
}

impl FieldValue {
    pub(crate) fn borrowed(&self) -> ValueRef<'_> {
        match self {
            Self::Str(s) => ValueRef::Str(s),
            Self::Int(n) => ValueRef::Int(*n),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

/// Borrowed view of a value, shared by both payload shapes when encoding.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ValueRef<'a> {
    Str(&'a str),
    Int(i64),
}

/// Loosely typed payload: field name to string or integer.
///
/// Insertion order is irrelevant; two payloads with the same entries are
/// equal and canonicalize to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: BTreeMap<String, FieldValue>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the previous value if the name was taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in canonical (byte-sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a payload from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Encoding`] if `value` is not an object, or if
    /// any member is a float, an integer outside `i64`, a boolean, null, an
    /// array or a nested object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                let reason = format!("expected a JSON object, got {}", json_type(value));
                return Err(SigningError::encoding("", reason));
            }
        };

        let mut payload = Self::new();
        for (name, member) in object {
            let field = match member {
                serde_json::Value::String(s) => FieldValue::Str(s.clone()),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => FieldValue::Int(i),
                    None => return Err(SigningError::encoding(name, number_reason(n))),
                },
                other => {
                    let reason = format!("{} values are not representable", json_type(other));
                    return Err(SigningError::encoding(name, reason));
                }
            };
            payload.fields.insert(name.clone(), field);
        }
        Ok(payload)
    }

    /// Parse JSON text and build a payload from it.
    ///
    /// A member name that appears twice makes the body ambiguous, so it is
    /// rejected instead of letting the last value win.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Encoding`] for invalid JSON, for repeated
    /// member names, and for every case rejected by
    /// [`from_json`](Self::from_json).
    pub fn from_json_str(text: &str) -> Result<Self> {
        let RawObject(members) = serde_json::from_str(text)
            .map_err(|e| SigningError::encoding("", format!("invalid JSON: {}", e)))?;

        let mut object = serde_json::Map::new();
        for (name, member) in members {
            if object.contains_key(&name) {
                return Err(SigningError::encoding(name, "duplicate field"));
            }
            object.insert(name, member);
        }
        Self::from_json(&serde_json::Value::Object(object))
    }
}

/// Top-level object members in document order, repeats included.
struct RawObject(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for RawObject {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawObjectVisitor;

        impl<'de> Visitor<'de> for RawObjectVisitor {
            type Value = RawObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<RawObject, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members = Vec::new();
                while let Some(entry) = map.next_entry()? {
                    members.push(entry);
                }
                Ok(RawObject(members))
            }
        }

        deserializer.deserialize_map(RawObjectVisitor)
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (k, v) in iter {
            payload.insert(k, v);
        }
        payload
    }
}

fn number_reason(n: &serde_json::Number) -> &'static str {
    if n.is_u64() {
        "integer out of range for i64"
    } else {
        "floating point numbers are not representable"
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A payment transaction message exchanged between initiator and processor.
///
/// Optional fields (`title`, `credit_account_number`) are always present in
/// the canonical form; an absent value is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPayload {
    pub app_code: String,
    pub merchant_code: String,
    pub merchant_reference: String,
    #[serde(default)]
    pub title: String,
    /// Amount in minor currency units.
    pub total_amount: i64,
    pub currency: String,
    #[serde(default)]
    pub credit_account_number: String,
}

impl PaymentPayload {
    /// Field names in canonical order.
    pub const FIELD_NAMES: [&'static str; 7] = [
        "app_code",
        "credit_account_number",
        "currency",
        "merchant_code",
        "merchant_reference",
        "title",
        "total_amount",
    ];

    /// Create a payload with empty title and credit account number.
    pub fn new(
        app_code: impl Into<String>,
        merchant_code: impl Into<String>,
        merchant_reference: impl Into<String>,
        total_amount: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            app_code: app_code.into(),
            merchant_code: merchant_code.into(),
            merchant_reference: merchant_reference.into(),
            title: String::new(),
            total_amount,
            currency: currency.into(),
            credit_account_number: String::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the credit account number.
    pub fn with_credit_account_number(mut self, account: impl Into<String>) -> Self {
        self.credit_account_number = account.into();
        self
    }

    /// Fields paired with their names, in the order of [`Self::FIELD_NAMES`].
    pub(crate) fn canonical_fields(&self) -> [(&'static str, ValueRef<'_>); 7] {
        let [app, account, currency, merchant, reference, title, amount] = Self::FIELD_NAMES;
        [
            (app, ValueRef::Str(&self.app_code)),
            (account, ValueRef::Str(&self.credit_account_number)),
            (currency, ValueRef::Str(&self.currency)),
            (merchant, ValueRef::Str(&self.merchant_code)),
            (reference, ValueRef::Str(&self.merchant_reference)),
            (title, ValueRef::Str(&self.title)),
            (amount, ValueRef::Int(self.total_amount)),
        ]
    }
}

impl From<&PaymentPayload> for Payload {
    fn from(p: &PaymentPayload) -> Self {
        p.canonical_fields()
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    ValueRef::Str(s) => FieldValue::Str(s.to_string()),
                    ValueRef::Int(n) => FieldValue::Int(n),
                };
                (name, value)
            })
            .collect()
    }
}

impl From<PaymentPayload> for Payload {
    fn from(p: PaymentPayload) -> Self {
        Payload::from(&p)
    }
}
