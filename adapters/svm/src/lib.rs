#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate formtx_adapter_kit;

#[macro_use]
extern crate serde_derive;

mod constants;
mod idl;
mod ui_kits;

use constants::{NAMESPACE, PUBKEY_BYTES};
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
pub struct SvmAdapter;

impl SvmAdapter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Adapter for SvmAdapter {
    fn get_name(&self) -> &str {
        "Solana and SVM Compatible Blockchains"
    }

    fn get_description(&self) -> &str {
        formtx_adapter_kit::indoc! {r#"
            The SVM `formtx` adapter builds transaction forms for programs on Solana and SVM compatible blockchains.
            It parses Anchor IDLs into the normalized contract schema, validates base58 addresses, and shapes
            submissions into discriminator-prefixed instruction payloads for the exported app.
            "#}
    }

    fn get_ecosystem(&self) -> Ecosystem {
        Ecosystem::Svm
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
        idl::parse_idl(definition)
    }

    fn validate_address(&self, address: &str) -> Result<bool, Diagnostic> {
        Ok(is_valid_svm_address(address))
    }

    fn format_transaction_data(
        &self,
        schema: &ContractSchema,
        function_id: &str,
        inputs: &IndexMap<String, JsonValue>,
    ) -> Result<JsonValue, Diagnostic> {
        idl::format_instruction(schema, function_id, inputs)
    }

    fn get_available_ui_kits(&self) -> Vec<UiKitDescriptor> {
        ui_kits::UI_KITS.clone()
    }

    fn get_dependencies(&self) -> AdapterDependencies {
        AdapterDependencies::new()
            .with_runtime("@solana/web3.js", constants::WEB3JS_REQUIREMENT)
            .with_runtime("@coral-xyz/anchor", constants::ANCHOR_REQUIREMENT)
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

/// A valid address is the base58 encoding of a 32-byte ed25519 public key.
fn is_valid_svm_address(address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == PUBKEY_BYTES,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("11111111111111111111111111111111", true; "system program")]
    #[test_case("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA", true; "token program")]
    #[test_case("notbase58!!!", false; "invalid alphabet")]
    #[test_case("abc", false; "too short")]
    #[test_case("", false; "empty")]
    fn address_validation(address: &str, expected: bool) {
        assert_eq!(is_valid_svm_address(address), expected);
    }

    #[test]
    fn adapter_advertises_full_capability_set() {
        let adapter = SvmAdapter::new();
        assert!(adapter.supports(AdapterCapability::ContractSchemaLoading));
        assert!(adapter.supports(AdapterCapability::TransactionFormatting));
        assert_eq!(adapter.get_ecosystem(), Ecosystem::Svm);
    }

    #[test]
    fn dependencies_carry_the_solana_stack() {
        let deps = SvmAdapter::new().get_dependencies();
        assert!(deps.runtime.contains_key("@solana/web3.js"));
        assert!(deps.runtime.contains_key("@coral-xyz/anchor"));
    }
}
