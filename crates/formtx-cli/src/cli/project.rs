use std::fs;
use std::path::Path;

use formtx_core::errors::classify_adapter_failure;
use formtx_core::errors::BuilderError;
use formtx_core::kit::types::forms::{
    apply_field_overrides, default_form_config, ExecutionConfig, FieldOverride, FormLayout,
    UiKitConfig, ValidationMode,
};
use formtx_core::kit::types::{AdapterCapability, Ecosystem};
use formtx_core::kit::Adapter;
use formtx_core::store::WizardStore;

/// One builder session described as a file: the answers to every wizard step.
#[derive(Clone, Debug, Deserialize)]
pub struct ProjectFile {
    /// Name of the exported project; derived from the function when omitted.
    #[serde(default)]
    pub name: Option<String>,
    pub network_config_id: String,
    pub ecosystem: Ecosystem,
    pub contract: ProjectContract,
    pub function: String,
    /// Edits merged onto the schema-derived default field set.
    #[serde(default)]
    pub fields: Vec<FieldOverride>,
    #[serde(default)]
    pub layout: Option<FormLayout>,
    #[serde(default)]
    pub validation: Option<ValidationMode>,
    #[serde(default)]
    pub execution: Option<ExecutionConfig>,
    #[serde(default)]
    pub ui_kit: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectContract {
    pub address: String,
    /// Path to the raw contract definition (ABI or IDL), relative to the
    /// project file.
    pub definition: String,
}

pub fn load_project_file(path: &str) -> Result<ProjectFile, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("unable to read {}: {}", path, e))?;
    serde_yml::from_str(&content).map_err(|e| format!("{} malformatted: {}", path, e))
}

/// Drives a fresh wizard store through every step using the project file's
/// answers, the same path the interactive builder takes: network, contract,
/// function, fields, execution.
pub fn build_wizard_store(
    project: &ProjectFile,
    adapter: &dyn Adapter,
    base_dir: &Path,
) -> Result<WizardStore, String> {
    let store = WizardStore::new();
    store.select_network(&project.network_config_id, project.ecosystem);

    if !adapter.supports(AdapterCapability::ContractSchemaLoading) {
        return Err(format!(
            "the {} adapter cannot load contract schemas yet",
            project.ecosystem
        ));
    }
    let definition_path = base_dir.join(&project.contract.definition);
    let definition = fs::read_to_string(&definition_path)
        .map_err(|e| format!("unable to read {}: {}", definition_path.display(), e))?;
    let schema =
        adapter.load_contract_schema(&definition).map_err(|diag| render_adapter_failure(diag))?;

    if adapter.supports(AdapterCapability::AddressValidation) {
        match adapter.validate_address(&project.contract.address) {
            Ok(true) => {}
            Ok(false) => {
                return Err(format!(
                    "'{}' is not a valid {} address",
                    project.contract.address, project.ecosystem
                ))
            }
            Err(diag) => return Err(render_adapter_failure(diag)),
        }
    }
    store.set_contract(schema, &project.contract.address);
    store.select_function(&project.function).map_err(|e| e.to_string())?;

    let state = store.get_state();
    let schema_ref = state.contract_schema.as_ref().expect("contract step just completed");
    let mut config =
        default_form_config(schema_ref, &project.function, &project.contract.address)
            .map_err(|e| e.to_string())?;
    apply_field_overrides(&mut config.fields, &project.fields).map_err(|e| e.to_string())?;
    if let Some(layout) = project.layout {
        config.layout = layout;
    }
    if let Some(validation) = project.validation {
        config.validation = validation;
    }
    if let Some(execution) = project.execution.clone() {
        config.execution = execution;
    }
    if let Some(kit_id) = project.ui_kit.as_ref() {
        let kits = adapter.build_ui_kit_lookup();
        if !kits.contains_key(kit_id) {
            let mut available: Vec<&str> = kits.keys().map(|k| k.as_str()).collect();
            available.sort();
            return Err(format!(
                "ui kit '{}' is not offered by the {} adapter (available: {})",
                kit_id,
                project.ecosystem,
                available.join(", ")
            ));
        }
        config.ui_kit = UiKitConfig::new(kit_id);
    }
    let execution_valid = match &config.execution {
        ExecutionConfig::Eoa => true,
        ExecutionConfig::Relayer { url } => url.starts_with("http"),
    };
    store.set_form_config(config).map_err(|e| e.to_string())?;
    store.set_execution_validity(execution_valid);
    Ok(store)
}

fn render_adapter_failure(diag: formtx_core::kit::types::diagnostics::Diagnostic) -> String {
    match classify_adapter_failure(diag) {
        BuilderError::NetworkService(message) => format!(
            "{}\n{}",
            message,
            format_note!(
                "this looks like a connectivity problem; check the network's RPC settings and retry"
            )
        ),
        other => other.to_string(),
    }
}
