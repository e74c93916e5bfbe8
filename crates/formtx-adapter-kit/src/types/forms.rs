use convert_case::{Case, Casing};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::diagnostics::Diagnostic;
use super::schema::{ContractFunction, ContractSchema, FunctionParameter};

/// The finalized description of one generated form. Immutable once handed to
/// the export pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    pub function_id: String,
    pub contract_address: String,
    pub fields: Vec<FormFieldConfig>,
    pub layout: FormLayout,
    pub validation: ValidationMode,
    pub execution: ExecutionConfig,
    pub ui_kit: UiKitConfig,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormLayout {
    #[default]
    Vertical,
    Horizontal,
    Grid,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    OnChange,
    OnSubmit,
}

/// How the exported form submits the transaction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum ExecutionConfig {
    /// The connected wallet signs and broadcasts.
    Eoa,
    /// The form POSTs the formatted transaction to a relayer endpoint.
    Relayer { url: String },
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig::Eoa
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UiKitConfig {
    pub kit_id: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, JsonValue>,
}

impl UiKitConfig {
    pub fn new(kit_id: &str) -> Self {
        UiKitConfig { kit_id: kit_id.to_string(), options: IndexMap::new() }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FormFieldConfig {
    /// Stable field identifier, derived from the parameter name.
    pub id: String,
    /// Contract-level parameter this field feeds.
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,
    pub required: bool,
    /// Hidden fields are excluded from the rendered form; they require a
    /// hardcoded value so the submission stays complete.
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardcoded_value: Option<JsonValue>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Amount,
    Address,
    Checkbox,
    Select,
    Textarea,
    Bytes,
    Json,
}

impl FieldType {
    /// Maps a canonical chain-level type name to the widget rendered for it.
    /// Adapters emit canonical names at schema-load time, so one mapping
    /// covers every ecosystem.
    pub fn infer(type_name: &str) -> FieldType {
        let normalized = type_name.trim();
        if normalized.ends_with("[]") || normalized.starts_with("tuple") {
            return FieldType::Json;
        }
        match normalized {
            "address" | "pubkey" | "publicKey" => FieldType::Address,
            "bool" => FieldType::Checkbox,
            "string" | "str" => FieldType::Text,
            _ => {
                if normalized.starts_with("uint") || normalized.starts_with("int") {
                    FieldType::Number
                } else if normalized.starts_with("bytes") || normalized.starts_with("vec<u8>") {
                    FieldType::Bytes
                } else if normalized.starts_with('u')
                    || normalized.starts_with('i')
                    || normalized.starts_with('f')
                {
                    // Rust-style scalar names used by IDL-based chains.
                    normalized[1..]
                        .parse::<u16>()
                        .map(|_| FieldType::Number)
                        .unwrap_or(FieldType::Text)
                } else if normalized.starts_with("vec<")
                    || normalized.starts_with("option<")
                    || normalized.starts_with('[')
                {
                    FieldType::Json
                } else {
                    FieldType::Text
                }
            }
        }
    }
}

/// Builds the schema-derived default field set for one function. User edits
/// are merged on top of this via `apply_field_overrides`.
pub fn default_form_config(
    schema: &ContractSchema,
    function_id: &str,
    contract_address: &str,
) -> Result<FormConfig, Diagnostic> {
    let function = schema.get_function(function_id).ok_or_else(|| {
        diagnosed_error!("function '{}' not found in contract schema", function_id)
            .with_code("unknown_function")
    })?;
    Ok(FormConfig {
        function_id: function.id.clone(),
        contract_address: contract_address.to_string(),
        fields: default_fields(function),
        layout: FormLayout::default(),
        validation: ValidationMode::default(),
        execution: ExecutionConfig::default(),
        ui_kit: UiKitConfig::default(),
    })
}

fn default_fields(function: &ContractFunction) -> Vec<FormFieldConfig> {
    function.inputs.iter().enumerate().map(|(index, param)| default_field(index, param)).collect()
}

fn default_field(index: usize, param: &FunctionParameter) -> FormFieldConfig {
    let name =
        if param.name.is_empty() { format!("arg{}", index) } else { param.name.clone() };
    FormFieldConfig {
        id: name.clone(),
        label: name.to_case(Case::Title),
        name,
        field_type: FieldType::infer(&param.type_name),
        placeholder: Some(param.type_name.clone()),
        help_text: None,
        default_value: None,
        required: true,
        hidden: false,
        hardcoded_value: None,
    }
}

/// One user edit against a generated field, keyed by parameter name.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldOverride {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardcoded_value: Option<JsonValue>,
}

/// Merges user edits onto the default field set. Overrides naming a parameter
/// absent from the field set are rejected rather than silently dropped.
pub fn apply_field_overrides(
    fields: &mut Vec<FormFieldConfig>,
    overrides: &[FieldOverride],
) -> Result<(), Diagnostic> {
    for edit in overrides.iter() {
        let field = fields.iter_mut().find(|f| f.name == edit.name).ok_or_else(|| {
            diagnosed_error!("field override '{}' does not match any generated field", edit.name)
                .with_code("unknown_field")
        })?;
        if let Some(label) = &edit.label {
            field.label = label.clone();
        }
        if let Some(field_type) = edit.field_type {
            field.field_type = field_type;
        }
        if let Some(placeholder) = &edit.placeholder {
            field.placeholder = Some(placeholder.clone());
        }
        if let Some(help_text) = &edit.help_text {
            field.help_text = Some(help_text.clone());
        }
        if let Some(default_value) = &edit.default_value {
            field.default_value = Some(default_value.clone());
        }
        if let Some(required) = edit.required {
            field.required = required;
        }
        if let Some(hidden) = edit.hidden {
            field.hidden = hidden;
        }
        if let Some(hardcoded_value) = &edit.hardcoded_value {
            field.hardcoded_value = Some(hardcoded_value.clone());
        }
        if field.hidden && field.hardcoded_value.is_none() {
            return Err(diagnosed_error!(
                "field '{}' is hidden but has no hardcoded value",
                field.name
            )
            .with_code("incomplete_field"));
        }
    }
    Ok(())
}
