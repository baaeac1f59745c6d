//! Declarative validation of a single text or numeric value.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A value that can be checked against [`ValidationRules`].
#[derive(Debug, Clone, PartialEq)]
pub enum Validatable {
    Text(String),
    Number(f64),
}

impl From<String> for Validatable {
    fn from(value: String) -> Self {
        Validatable::Text(value)
    }
}

impl From<&str> for Validatable {
    fn from(value: &str) -> Self {
        Validatable::Text(value.to_string())
    }
}

impl From<f64> for Validatable {
    fn from(value: f64) -> Self {
        Validatable::Number(value)
    }
}

impl fmt::Display for Validatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validatable::Text(text) => f.write_str(text),
            Validatable::Number(number) => write!(f, "{number}"),
        }
    }
}

/// A sparse set of constraints; an absent key is simply not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Minimum length in characters; text values only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length in characters; text values only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Inclusive lower bound; numeric values only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound; numeric values only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.min.is_none()
            && self.max.is_none()
    }
}

/// Check `value` against every active rule. Rules that do not apply to the
/// value's kind are skipped.
pub fn validate(value: &Validatable, rules: &ValidationRules) -> bool {
    if rules.is_required() && value.to_string().trim().is_empty() {
        return false;
    }
    match value {
        Validatable::Text(text) => {
            let len = text.chars().count();
            rules.min_length.is_none_or(|min| len >= min)
                && rules.max_length.is_none_or(|max| len <= max)
        }
        Validatable::Number(number) => {
            rules.min.is_none_or(|min| *number >= min) && rules.max.is_none_or(|max| *number <= max)
        }
    }
}
