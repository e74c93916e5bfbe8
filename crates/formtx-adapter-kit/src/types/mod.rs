use indexmap::IndexMap;
use strum::{Display, EnumIter, EnumString};

pub mod diagnostics;
pub mod forms;
pub mod schema;
pub mod ui_kits;

/// A supported blockchain family. One adapter crate per variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Ecosystem {
    Evm,
    Svm,
    Stellar,
}

/// The fixed capability set an adapter can implement a subset of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdapterCapability {
    ContractSchemaLoading,
    AddressValidation,
    TransactionFormatting,
    UiKitSelection,
}

/// npm dependencies an adapter contributes to an exported project's manifest,
/// as package name to version requirement maps.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdapterDependencies {
    pub runtime: IndexMap<String, String>,
    pub dev: IndexMap<String, String>,
}

impl AdapterDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime(mut self, name: &str, requirement: &str) -> Self {
        self.runtime.insert(name.to_string(), requirement.to_string());
        self
    }

    pub fn with_dev(mut self, name: &str, requirement: &str) -> Self {
        self.dev.insert(name.to_string(), requirement.to_string());
        self
    }
}

/// How generated source imports and instantiates the adapter package.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportBinding {
    /// npm package the generated wiring imports from.
    pub package_name: String,
    /// Exported class instantiated by the generated wiring.
    pub adapter_class: String,
    /// Directory segment under `src/adapters/` the wiring is generated into.
    pub module_path: String,
}

impl ExportBinding {
    pub fn new(package_name: &str, adapter_class: &str, module_path: &str) -> Self {
        ExportBinding {
            package_name: package_name.to_string(),
            adapter_class: adapter_class.to_string(),
            module_path: module_path.to_string(),
        }
    }
}
