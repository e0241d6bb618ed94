//! Emitting masked values through `slog`.
//!
//! [`MaskedJson`] is a `slog::Value` holding a payload that has already been
//! through a [`MaskingEngine`]. It is emitted as structured JSON via `slog`'s
//! nested-value support, so the unmasked value never reaches a drain.
//!
//! Logging never fails because of masking: a payload that cannot be turned
//! into JSON is logged as a placeholder string instead.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::masking::{Maskable, MaskingEngine};

const SERIALIZE_FAILED: &str = "Failed to serialize masked value";

/// A `slog::Value` carrying a masked payload as JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedJson {
    value: JsonValue,
}

impl MaskedJson {
    /// Masks an arbitrary JSON payload by key and wraps it.
    pub fn from_json(engine: &MaskingEngine, mut value: JsonValue) -> Self {
        engine.mask_json_value(&mut value);
        Self { value }
    }

    /// The masked payload.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }

    /// Unwraps the masked payload.
    pub fn into_json(self) -> JsonValue {
        self.value
    }
}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Masks a value and hands it to `slog` as structured JSON.
///
/// The value is masked through its [`Maskable`] implementation first, so
/// member directives apply, and only then serialized.
///
/// ## Example
/// ```ignore
/// use logmask::slog::IntoMaskedJson;
///
/// info!(logger, "payment accepted"; "payment" => payment.into_masked_json(&engine));
/// ```
pub trait IntoMaskedJson: Maskable + Serialize + Sized {
    fn into_masked_json(mut self, engine: &MaskingEngine) -> MaskedJson {
        engine.mask(&mut self);
        let value = serde_json::to_value(&self)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()));
        MaskedJson { value }
    }
}

impl<T> IntoMaskedJson for T where T: Maskable + Serialize {}
