use std::collections::HashMap;

use alloy_json_abi::{Event, Function, JsonAbi, Param, StateMutability};
use alloy_primitives::keccak256;
use formtx_adapter_kit::indexmap::IndexMap;
use formtx_adapter_kit::serde_json::{json, Value as JsonValue};
use formtx_adapter_kit::types::diagnostics::Diagnostic;
use formtx_adapter_kit::types::schema::{
    ContractEvent, ContractFunction, ContractSchema, FunctionParameter,
};
use formtx_adapter_kit::types::Ecosystem;

/// Parses a Solidity JSON ABI into the normalized schema. Function ids are
/// the plain name; overloaded names fall back to the full signature so every
/// id stays unique within the schema.
pub fn parse_abi(definition: &str) -> Result<ContractSchema, Diagnostic> {
    let abi: JsonAbi = serde_json::from_str(definition).map_err(|e| {
        diagnosed_error!("failed to parse contract ABI: {}", e)
            .with_code("invalid_abi")
            .with_suggestion("check that the definition is a JSON ABI array")
    })?;

    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for function in abi.functions() {
        *name_counts.entry(function.name.as_str()).or_insert(0) += 1;
    }

    let mut schema = ContractSchema::new(Ecosystem::Evm);
    schema.functions = abi
        .functions()
        .map(|function| {
            let overloaded = name_counts.get(function.name.as_str()).copied().unwrap_or(0) > 1;
            convert_function(function, overloaded)
        })
        .collect();
    schema.events = abi.events().map(convert_event).collect();
    Ok(schema)
}

fn convert_function(function: &Function, overloaded: bool) -> ContractFunction {
    let signature = function.signature();
    ContractFunction {
        id: if overloaded { signature.clone() } else { function.name.clone() },
        name: function.name.clone(),
        signature: Some(signature),
        inputs: function.inputs.iter().map(convert_param).collect(),
        outputs: function.outputs.iter().map(convert_param).collect(),
        modifies_state: matches!(
            function.state_mutability,
            StateMutability::NonPayable | StateMutability::Payable
        ),
        payable: matches!(function.state_mutability, StateMutability::Payable),
    }
}

fn convert_param(param: &Param) -> FunctionParameter {
    FunctionParameter {
        name: param.name.clone(),
        type_name: param.ty.clone(),
        components: param.components.iter().map(convert_param).collect(),
    }
}

fn convert_event(event: &Event) -> ContractEvent {
    ContractEvent {
        name: event.name.clone(),
        inputs: event
            .inputs
            .iter()
            .map(|input| FunctionParameter::new(&input.name, &input.ty))
            .collect(),
    }
}

/// Shapes a call into the payload the exported app hands to its signing or
/// relaying layer: 4-byte selector plus the named arguments.
pub fn format_call(
    schema: &ContractSchema,
    function_id: &str,
    inputs: &IndexMap<String, JsonValue>,
) -> Result<JsonValue, Diagnostic> {
    let function = schema.get_function(function_id).ok_or_else(|| {
        diagnosed_error!("function '{}' not found in contract schema", function_id)
            .with_code("unknown_function")
    })?;
    let signature = function
        .signature
        .clone()
        .unwrap_or_else(|| derive_signature(&function.name, &function.inputs));

    let mut args = Vec::new();
    for param in function.inputs.iter() {
        let value = inputs.get(&param.name).ok_or_else(|| {
            diagnosed_error!("missing input '{}' for function '{}'", param.name, function_id)
                .with_code("missing_input")
        })?;
        args.push(json!({
            "name": param.name,
            "type": param.type_name,
            "value": value,
        }));
    }

    let selector = &keccak256(signature.as_bytes())[..4];
    Ok(json!({
        "function": function.name,
        "signature": signature,
        "selector": format!("0x{}", formtx_adapter_kit::hex::encode(selector)),
        "args": args,
        "value": if function.payable { json!("0") } else { JsonValue::Null },
    }))
}

fn derive_signature(name: &str, inputs: &[FunctionParameter]) -> String {
    let types: Vec<&str> = inputs.iter().map(|p| p.type_name.as_str()).collect();
    format!("{}({})", name, types.join(","))
}
