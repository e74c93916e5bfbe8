use formtx_adapter_kit::indexmap::IndexMap;
use formtx_adapter_kit::serde_json::{json, Value as JsonValue};
use formtx_adapter_kit::types::diagnostics::Diagnostic;
use formtx_adapter_kit::types::schema::{
    ContractEvent, ContractFunction, ContractSchema, FunctionParameter,
};
use formtx_adapter_kit::types::Ecosystem;
use sha2::{Digest, Sha256};

use crate::constants::DISCRIMINATOR_BYTES;

/// Anchor IDL surface the builder needs: program name, instructions with
/// their arguments, and event names. Account lists and custom type tables
/// are accepted but ignored.
#[derive(Debug, Deserialize)]
pub struct Idl {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub events: Vec<IdlEvent>,
}

#[derive(Debug, Deserialize)]
pub struct IdlMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlType,
}

#[derive(Debug, Deserialize)]
pub struct IdlEvent {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<IdlField>,
}

/// IDL types are either a bare string ("u64", "pubkey") or a one-key object
/// ({"vec": "u8"}, {"option": ...}, {"defined": ...}).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    Primitive(String),
    Compound(JsonValue),
}

impl IdlType {
    /// Canonical type name fed into the chain-agnostic field typing.
    pub fn type_name(&self) -> String {
        match self {
            IdlType::Primitive(name) => match name.as_str() {
                "publicKey" => "pubkey".to_string(),
                other => other.to_string(),
            },
            IdlType::Compound(value) => {
                if let Some(inner) = value.get("vec") {
                    format!("vec<{}>", nested_name(inner))
                } else if let Some(inner) = value.get("option") {
                    format!("option<{}>", nested_name(inner))
                } else if let Some(parts) = value.get("array").and_then(|a| a.as_array()) {
                    match (parts.first(), parts.get(1)) {
                        (Some(ty), Some(len)) => format!("[{}; {}]", nested_name(ty), len),
                        _ => "array".to_string(),
                    }
                } else if let Some(defined) = value.get("defined") {
                    // newer IDLs wrap the name in {"name": ...}
                    defined
                        .as_str()
                        .map(|s| s.to_string())
                        .or_else(|| {
                            defined.get("name").and_then(|n| n.as_str()).map(|s| s.to_string())
                        })
                        .unwrap_or_else(|| "defined".to_string())
                } else {
                    "json".to_string()
                }
            }
        }
    }
}

fn nested_name(value: &JsonValue) -> String {
    match value {
        JsonValue::String(name) => name.clone(),
        other => serde_json::from_value::<IdlType>(other.clone())
            .map(|ty| ty.type_name())
            .unwrap_or_else(|_| "json".to_string()),
    }
}

pub fn parse_idl(definition: &str) -> Result<ContractSchema, Diagnostic> {
    let idl: Idl = serde_json::from_str(definition).map_err(|e| {
        diagnosed_error!("failed to parse program IDL: {}", e)
            .with_code("invalid_idl")
            .with_suggestion("check that the definition is an Anchor IDL JSON document")
    })?;

    let mut schema = ContractSchema::new(Ecosystem::Svm);
    schema.name = idl.name.clone().or(idl.metadata.as_ref().and_then(|m| m.name.clone()));
    schema.functions = idl
        .instructions
        .iter()
        .map(|instruction| ContractFunction {
            id: instruction.name.clone(),
            name: instruction.name.clone(),
            signature: None,
            inputs: instruction
                .args
                .iter()
                .map(|arg| FunctionParameter::new(&arg.name, &arg.ty.type_name()))
                .collect(),
            outputs: vec![],
            // every instruction submits a transaction
            modifies_state: true,
            payable: false,
        })
        .collect();
    schema.events = idl
        .events
        .iter()
        .map(|event| ContractEvent {
            name: event.name.clone(),
            inputs: event
                .fields
                .iter()
                .map(|field| FunctionParameter::new(&field.name, &field.ty.type_name()))
                .collect(),
        })
        .collect();
    Ok(schema)
}

/// Anchor's global-namespace instruction discriminator: the first 8 bytes of
/// `sha256("global:<name>")`.
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_BYTES] {
    let digest = Sha256::digest(format!("global:{}", name).as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_BYTES];
    discriminator.copy_from_slice(&digest[..DISCRIMINATOR_BYTES]);
    discriminator
}

pub fn format_instruction(
    schema: &ContractSchema,
    function_id: &str,
    inputs: &IndexMap<String, JsonValue>,
) -> Result<JsonValue, Diagnostic> {
    let function = schema.get_function(function_id).ok_or_else(|| {
        diagnosed_error!("instruction '{}' not found in program IDL", function_id)
            .with_code("unknown_function")
    })?;
    let mut args = Vec::new();
    for param in function.inputs.iter() {
        let value = inputs.get(&param.name).ok_or_else(|| {
            diagnosed_error!("missing argument '{}' for instruction '{}'", param.name, function_id)
                .with_code("missing_input")
        })?;
        args.push(json!({
            "name": param.name,
            "type": param.type_name,
            "value": value,
        }));
    }
    let discriminator = instruction_discriminator(&function.name);
    Ok(json!({
        "instruction": function.name,
        "discriminator": format!("0x{}", formtx_adapter_kit::hex::encode(discriminator)),
        "args": args,
    }))
}
