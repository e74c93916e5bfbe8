#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros;

pub use hex;
pub use indexmap;
pub use indoc::formatdoc;
pub use indoc::indoc;
pub use serde;
pub use serde_json;
pub use uuid;

use std::{collections::HashMap, fmt::Debug};

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use types::diagnostics::Diagnostic;
use types::schema::ContractSchema;
use types::ui_kits::UiKitDescriptor;
use types::{AdapterCapability, AdapterDependencies, Ecosystem, ExportBinding};

pub mod types;

/// The capability contract implemented by each supported chain family.
///
/// Adapters advertise the capabilities they actually implement through
/// `get_capabilities`; the optional operations carry default implementations
/// that reject the call with an `unsupported_capability` diagnostic, so a
/// caller that skips the `supports` query still gets an explicit failure
/// instead of a silently absent method.
pub trait Adapter: Debug + Sync + Send {
    ///
    fn get_name(self: &Self) -> &str;
    ///
    fn get_description(self: &Self) -> &str;
    ///
    fn get_ecosystem(self: &Self) -> Ecosystem;
    ///
    fn get_capabilities(self: &Self) -> Vec<AdapterCapability>;
    ///
    fn supports(&self, capability: AdapterCapability) -> bool {
        self.get_capabilities().contains(&capability)
    }
    /// Parses a raw contract definition (ABI, IDL, ...) into the normalized,
    /// chain-agnostic schema the builder operates on.
    fn load_contract_schema(&self, _definition: &str) -> Result<ContractSchema, Diagnostic> {
        Err(unsupported_capability(
            self.get_ecosystem(),
            AdapterCapability::ContractSchemaLoading,
        ))
    }
    ///
    fn validate_address(&self, _address: &str) -> Result<bool, Diagnostic> {
        Err(unsupported_capability(self.get_ecosystem(), AdapterCapability::AddressValidation))
    }
    /// Shapes a function invocation into the transaction payload the exported
    /// app hands to its signing/relaying layer.
    fn format_transaction_data(
        &self,
        _schema: &ContractSchema,
        _function_id: &str,
        _inputs: &IndexMap<String, JsonValue>,
    ) -> Result<JsonValue, Diagnostic> {
        Err(unsupported_capability(
            self.get_ecosystem(),
            AdapterCapability::TransactionFormatting,
        ))
    }
    ///
    fn get_available_ui_kits(&self) -> Vec<UiKitDescriptor> {
        vec![]
    }
    /// npm dependencies the exported project must declare when wired against
    /// this adapter.
    fn get_dependencies(&self) -> AdapterDependencies;
    /// The npm package / exported class / module path triple consumed by the
    /// adapter-wiring code generation step.
    fn get_export_binding(&self) -> ExportBinding;
    ///
    fn build_ui_kit_lookup(self: &Self) -> HashMap<String, UiKitDescriptor> {
        let mut kits = HashMap::new();
        for kit in self.get_available_ui_kits().into_iter() {
            kits.insert(kit.id.clone(), kit);
        }
        kits
    }
}

pub fn unsupported_capability(ecosystem: Ecosystem, capability: AdapterCapability) -> Diagnostic {
    Diagnostic::error(format!(
        "the {} adapter does not implement the {} capability",
        ecosystem, capability
    ))
    .with_code("unsupported_capability")
}
