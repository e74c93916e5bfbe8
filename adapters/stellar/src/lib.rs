#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate formtx_adapter_kit;

use formtx_adapter_kit::types::{
    diagnostics::Diagnostic, ui_kits::UiKitDescriptor, AdapterCapability, AdapterDependencies,
    Ecosystem, ExportBinding,
};
use formtx_adapter_kit::Adapter;

const NAMESPACE: &str = "stellar";

const STELLAR_SDK_REQUIREMENT: &str = "^12.2.0";

/// Base32 alphabet used by strkey-encoded Stellar addresses.
const STRKEY_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const STRKEY_ACCOUNT_LEN: usize = 56;

lazy_static! {
    static ref UI_KITS: Vec<UiKitDescriptor> = vec![define_ui_kit!({
        id: "stellar-wallets-kit",
        name: "Stellar Wallets Kit",
        documentation: "Connect modal covering Freighter, xBull and other Stellar wallets.",
        dependencies: [
            "@creit.tech/stellar-wallets-kit" => "^1.2.0",
        ],
    })];
}

/// Partial adapter: Stellar contract loading and transaction formatting are
/// not implemented yet, so only the address and UI kit capabilities are
/// advertised. The unimplemented operations inherit the trait's explicit
/// `unsupported_capability` rejections, which callers detect via `supports`.
#[derive(Debug)]
pub struct StellarAdapter;

impl StellarAdapter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Adapter for StellarAdapter {
    fn get_name(&self) -> &str {
        "Stellar (preview)"
    }

    fn get_description(&self) -> &str {
        formtx_adapter_kit::indoc! {r#"
            The Stellar `formtx` adapter currently validates account addresses and offers wallet UI kits.
            Soroban contract-spec loading and transaction formatting are not implemented yet; the builder
            detects the missing capabilities and keeps the corresponding wizard steps disabled.
            "#}
    }

    fn get_ecosystem(&self) -> Ecosystem {
        Ecosystem::Stellar
    }

    fn get_capabilities(&self) -> Vec<AdapterCapability> {
        vec![AdapterCapability::AddressValidation, AdapterCapability::UiKitSelection]
    }

    fn validate_address(&self, address: &str) -> Result<bool, Diagnostic> {
        Ok(is_valid_stellar_address(address))
    }

    fn get_available_ui_kits(&self) -> Vec<UiKitDescriptor> {
        UI_KITS.clone()
    }

    fn get_dependencies(&self) -> AdapterDependencies {
        AdapterDependencies::new().with_runtime("@stellar/stellar-sdk", STELLAR_SDK_REQUIREMENT)
    }

    fn get_export_binding(&self) -> ExportBinding {
        ExportBinding::new("@formtx/adapter-stellar", "StellarAdapter", NAMESPACE)
    }
}

/// Shape check for strkey ed25519 account addresses: 'G' prefix, 56
/// characters, base32 alphabet.
// TODO: decode the base32 payload and verify the trailing CRC16-XModem
// checksum once Soroban contract loading lands.
fn is_valid_stellar_address(address: &str) -> bool {
    address.len() == STRKEY_ACCOUNT_LEN
        && address.starts_with('G')
        && address.chars().all(|c| STRKEY_ALPHABET.contains(c))
}
