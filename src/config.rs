//! Board configuration: template ids, hosts, field selectors, rule sets and
//! user-facing messages.
//!
//! Every key is optional; [`BoardConfig::default`] reproduces the stock
//! project board. Documents are checked against the generated JSON Schema
//! before they are deserialized so that mistakes are reported with their
//! JSON pointer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonschema::validator_for;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::ProjectStatus;
use crate::dom::InsertPosition;
use crate::io::{DocumentFormat, parse_document_str};
use crate::validation::ValidationRules;

/// Page markup the stock configuration expects.
pub const DEFAULT_MARKUP: &str = include_str!("../assets/index.html");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Id of the container every top-level component is attached to.
    pub host: String,
    pub input: InputConfig,
    /// One list component per entry, mounted in order.
    pub lists: Vec<ListConfig>,
    pub item: ItemConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            host: "app".to_string(),
            input: InputConfig::default(),
            lists: ProjectStatus::ALL.into_iter().map(ListConfig::new).collect(),
            item: ItemConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct InputConfig {
    pub template: String,
    pub element_id: String,
    pub position: InsertPosition,
    pub fields: FieldsConfig,
    pub coercion: NumericCoercion,
    pub messages: Messages,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            template: "project-input".to_string(),
            element_id: "user-input".to_string(),
            position: InsertPosition::AfterBegin,
            fields: FieldsConfig::default(),
            coercion: NumericCoercion::default(),
            messages: Messages::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FieldsConfig {
    pub title: FieldConfig,
    pub description: FieldConfig,
    pub manday: FieldConfig,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            title: FieldConfig::new("#title", ValidationRules::new().required()),
            description: FieldConfig::new(
                "#description",
                ValidationRules::new().required().min_length(5),
            ),
            manday: FieldConfig::new("#manday", ValidationRules::new().required().min(1.0).max(1000.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
    /// Selector of the form control inside the rendered form.
    pub selector: String,
    /// Display label; defaults to the text of the control's `<label for=..>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub rules: ValidationRules,
}

impl FieldConfig {
    pub fn new(selector: impl Into<String>, rules: ValidationRules) -> Self {
        Self {
            selector: selector.into(),
            label: None,
            rules,
        }
    }
}

/// How the effort field's text becomes a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NumericCoercion {
    /// The text must parse as a finite number; numeric rules then apply.
    #[default]
    Strict,
    /// Rules run on the text; unparseable text becomes NaN and empty text 0.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Messages {
    pub invalid_input: String,
    pub required_field_empty: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_input: "input values are invalid".to_string(),
            required_field_empty: "a required field is empty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListConfig {
    pub status: ProjectStatus,
    #[serde(default = "default_list_template")]
    pub template: String,
    #[serde(default = "default_list_position")]
    pub position: InsertPosition,
    /// Heading text; defaults to `<STATUS> PROJECTS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

impl ListConfig {
    pub fn new(status: ProjectStatus) -> Self {
        Self {
            status,
            template: default_list_template(),
            position: default_list_position(),
            heading: None,
        }
    }

    pub fn heading_text(&self) -> String {
        self.heading
            .clone()
            .unwrap_or_else(|| format!("{} PROJECTS", self.status.as_str().to_uppercase()))
    }
}

fn default_list_template() -> String {
    "project-list".to_string()
}

fn default_list_position() -> InsertPosition {
    InsertPosition::BeforeEnd
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ItemConfig {
    pub template: String,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            template: "single-project".to_string(),
        }
    }
}

/// JSON Schema describing [`BoardConfig`] documents.
pub fn board_config_schema() -> Result<Value> {
    serde_json::to_value(schema_for!(BoardConfig)).context("failed to serialize config schema")
}

/// Validate `value` against the config schema, then deserialize it.
pub fn config_from_value(value: Value) -> Result<BoardConfig> {
    let schema = board_config_schema()?;
    let validator = validator_for(&schema).context("failed to compile config schema")?;
    let issues: Vec<String> = validator
        .iter_errors(&value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let pointer = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{pointer}: {error}")
        })
        .collect();
    if !issues.is_empty() {
        bail!("invalid board config:\n{}", issues.join("\n"));
    }
    let config: BoardConfig =
        serde_json::from_value(value).context("failed to deserialize board config")?;
    check_unique_statuses(&config)?;
    Ok(config)
}

/// Lists derive their element ids from their status, so each status may
/// appear at most once.
fn check_unique_statuses(config: &BoardConfig) -> Result<()> {
    let mut seen = Vec::with_capacity(config.lists.len());
    for (index, list) in config.lists.iter().enumerate() {
        if seen.contains(&list.status) {
            bail!(
                "invalid board config:\n/lists/{index}/status: status '{}' is already used by another list",
                list.status
            );
        }
        seen.push(list.status);
    }
    Ok(())
}

pub fn load_config_str(contents: &str, format: DocumentFormat) -> Result<BoardConfig> {
    let value = parse_document_str(contents, format)?;
    config_from_value(value)
}

/// Load a config file; the format follows the extension and falls back to JSON.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<BoardConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let format = DocumentFormat::from_path(path).unwrap_or_default();
    load_config_str(&contents, format)
        .with_context(|| format!("failed to load config from {}", path.display()))
}
