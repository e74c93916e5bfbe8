#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate formtx_adapter_kit;

mod abi;
mod constants;
mod ui_kits;

use std::str::FromStr;

use alloy_primitives::Address;
use constants::NAMESPACE;
use formtx_adapter_kit::{
    indexmap::IndexMap,
    serde_json::Value as JsonValue,
    types::{
        diagnostics::Diagnostic, schema::ContractSchema, ui_kits::UiKitDescriptor,
        AdapterCapability, AdapterDependencies, Ecosystem, ExportBinding,
    },
    Adapter,
};

#[derive(Debug)]
pub struct EvmAdapter;

impl EvmAdapter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Adapter for EvmAdapter {
    fn get_name(&self) -> &str {
        "Ethereum and EVM Compatible Blockchains"
    }

    fn get_description(&self) -> &str {
        formtx_adapter_kit::indoc! {r#"
            The EVM `formtx` adapter builds transaction forms for contracts on Ethereum and EVM compatible blockchains.
            It parses Solidity JSON ABIs into the normalized contract schema, validates addresses including their
            EIP-55 checksum, and shapes submissions into selector-prefixed call payloads that the exported app can
            sign in the browser or forward to a relayer.
            "#}
    }

    fn get_ecosystem(&self) -> Ecosystem {
        Ecosystem::Evm
    }

    fn get_capabilities(&self) -> Vec<AdapterCapability> {
        vec![
            AdapterCapability::ContractSchemaLoading,
            AdapterCapability::AddressValidation,
            AdapterCapability::TransactionFormatting,
            AdapterCapability::UiKitSelection,
        ]
    }

    fn load_contract_schema(&self, definition: &str) -> Result<ContractSchema, Diagnostic> {
        abi::parse_abi(definition)
    }

    fn validate_address(&self, address: &str) -> Result<bool, Diagnostic> {
        Ok(is_valid_evm_address(address))
    }

    fn format_transaction_data(
        &self,
        schema: &ContractSchema,
        function_id: &str,
        inputs: &IndexMap<String, JsonValue>,
    ) -> Result<JsonValue, Diagnostic> {
        abi::format_call(schema, function_id, inputs)
    }

    fn get_available_ui_kits(&self) -> Vec<UiKitDescriptor> {
        ui_kits::UI_KITS.clone()
    }

    fn get_dependencies(&self) -> AdapterDependencies {
        AdapterDependencies::new()
            .with_runtime("viem", constants::VIEM_REQUIREMENT)
            .with_dev("@types/node", "^20.0.0")
    }

    fn get_export_binding(&self) -> ExportBinding {
        ExportBinding::new(
            constants::ADAPTER_PACKAGE_NAME,
            constants::ADAPTER_CLASS_NAME,
            NAMESPACE,
        )
    }
}

/// Accepts 0x-prefixed 40-hex-digit addresses. Mixed-case addresses carry an
/// EIP-55 checksum and are verified against it; uniform-case addresses carry
/// no checksum and pass on shape alone.
fn is_valid_evm_address(address: &str) -> bool {
    let Some(stripped) = address.strip_prefix("0x") else {
        return false;
    };
    if stripped.len() != 40 || !stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    let has_upper = stripped.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = stripped.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower {
        Address::parse_checksummed(address, None).is_ok()
    } else {
        Address::from_str(address).is_ok()
    }
}
