//! Engine configuration and the rule-document loader.
//!
//! [`MaskingOptions`] is consumed once, when a [`crate::MaskingEngine`] is
//! built, and is read-only afterwards.
//!
//! Rule documents come in two shapes:
//!
//! ```text
//! [ { "field": "password", "exclude": true }, ... ]
//!
//! { "enabled": true, "maskChar": "*", "rules": [ ... ] }
//! ```
//!
//! Keys are matched case-insensitively in both shapes (`Field`, `FIELD` and
//! `field` are the same key), independently of
//! [`MaskingOptions::case_insensitive`], which only governs rule lookup.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{error::ConfigError, rules::FieldRule};

/// Process-scoped masking configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskingOptions {
    /// When false every entry point returns its input unchanged.
    pub enabled: bool,
    /// Character written over masked positions.
    pub mask_char: char,
    /// Excluded values become `""` when true, a full mask when false.
    pub full_exclude_as_empty: bool,
    /// Rule names are matched ignoring case.
    pub case_insensitive: bool,
    /// Name-based rules, in priority order.
    pub rules: Vec<FieldRule>,
}

impl Default for MaskingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mask_char: '*',
            full_exclude_as_empty: true,
            case_insensitive: true,
            rules: Vec::new(),
        }
    }
}

impl MaskingOptions {
    /// The profile that masks excluded values instead of emptying them.
    pub fn masked_exclusions() -> Self {
        Self {
            full_exclude_as_empty: false,
            ..Self::default()
        }
    }

    /// Replaces the rule list.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    /// Appends one rule after the existing ones.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Turns every entry point into the identity.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Matches rule names exactly as written.
    ///
    /// Style variants are still tried, so `FirstName` keeps finding a
    /// `first_name` rule.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    /// Parses an options document or a bare rule array.
    ///
    /// A bare array keeps every other option at its default.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        match parse_document(text)? {
            JsonValue::Array(records) => Ok(Self::default().with_rules(parse_records(records)?)),
            JsonValue::Object(object) => {
                let object = lowercase_keys(object);
                let rules = match object.get("rules") {
                    Some(JsonValue::Array(records)) => parse_records(records.clone())?,
                    Some(_) => {
                        return Err(ConfigError::InvalidFormat(
                            "`rules` must be an array".to_string(),
                        ))
                    }
                    None => {
                        return Err(ConfigError::InvalidFormat(
                            "expected an array of rules or an object with a `rules` key"
                                .to_string(),
                        ))
                    }
                };
                let raw: RawOptions = serde_json::from_value(JsonValue::Object(object))?;
                Ok(raw.into_options(rules))
            }
            _ => Err(ConfigError::InvalidFormat(
                "expected an array of rules or an object with a `rules` key".to_string(),
            )),
        }
    }

    /// Reads and parses a rule document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Parses only the rule list of a document, ignoring other options.
pub fn load_rules(text: &str) -> Result<Vec<FieldRule>, ConfigError> {
    MaskingOptions::from_json_str(text).map(|options| options.rules)
}

/// Top-level option keys after lowercasing.
#[derive(Deserialize)]
struct RawOptions {
    enabled: Option<bool>,
    #[serde(rename = "maskchar")]
    mask_char: Option<char>,
    #[serde(rename = "fullexcludeasempty")]
    full_exclude_as_empty: Option<bool>,
    #[serde(rename = "caseinsensitive")]
    case_insensitive: Option<bool>,
}

impl RawOptions {
    fn into_options(self, rules: Vec<FieldRule>) -> MaskingOptions {
        let defaults = MaskingOptions::default();
        MaskingOptions {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            mask_char: self.mask_char.unwrap_or(defaults.mask_char),
            full_exclude_as_empty: self
                .full_exclude_as_empty
                .unwrap_or(defaults.full_exclude_as_empty),
            case_insensitive: self.case_insensitive.unwrap_or(defaults.case_insensitive),
            rules,
        }
    }
}

fn parse_document(text: &str) -> Result<JsonValue, ConfigError> {
    if text.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

fn parse_records(records: Vec<JsonValue>) -> Result<Vec<FieldRule>, ConfigError> {
    records
        .into_iter()
        .map(|record| match record {
            JsonValue::Object(fields) => {
                Ok(serde_json::from_value(JsonValue::Object(lowercase_keys(fields)))?)
            }
            other => Err(ConfigError::InvalidFormat(format!(
                "rule records must be objects, found `{other}`"
            ))),
        })
        .collect()
}

// serde's `rename_all` is case-sensitive, so keys are folded before decoding.
// Option keys are camelCase on the wire, so separators are dropped as well.
fn lowercase_keys(object: Map<String, JsonValue>) -> Map<String, JsonValue> {
    object
        .into_iter()
        .map(|(key, value)| {
            let folded: String = key
                .chars()
                .filter(|ch| *ch != '_' && *ch != '-')
                .collect::<String>()
                .to_lowercase();
            (folded, value)
        })
        .collect()
}
