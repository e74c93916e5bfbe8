use kit::indexmap::IndexMap;
use kit::serde_json::Value as JsonValue;
use kit::types::diagnostics::Diagnostic;
use kit::types::forms::{default_form_config, ExecutionConfig, FormConfig, UiKitConfig};
use kit::types::schema::{ContractFunction, ContractSchema, FunctionParameter};
use kit::types::ui_kits::UiKitDescriptor;
use kit::types::{AdapterCapability, AdapterDependencies, Ecosystem, ExportBinding};
use kit::Adapter;

use crate::errors::BuilderError;
use crate::export::{export_project, ExportOptions, FileContent};
use crate::store::{WizardState, WizardStore};
use crate::templates::TemplateVariant;

#[derive(Debug)]
struct MockAdapter;

impl Adapter for MockAdapter {
    fn get_name(&self) -> &str {
        "Mock EVM"
    }

    fn get_description(&self) -> &str {
        "In-memory adapter used by the pipeline tests."
    }

    fn get_ecosystem(&self) -> Ecosystem {
        Ecosystem::Evm
    }

    fn get_capabilities(&self) -> Vec<AdapterCapability> {
        vec![
            AdapterCapability::ContractSchemaLoading,
            AdapterCapability::AddressValidation,
            AdapterCapability::UiKitSelection,
        ]
    }

    fn load_contract_schema(&self, _definition: &str) -> Result<ContractSchema, Diagnostic> {
        Ok(transfer_schema())
    }

    fn validate_address(&self, address: &str) -> Result<bool, Diagnostic> {
        Ok(address.starts_with("0x"))
    }

    fn get_available_ui_kits(&self) -> Vec<UiKitDescriptor> {
        vec![define_ui_kit!({
            id: "rainbowkit",
            name: "RainbowKit",
            documentation: "Connect button used by the tests.",
            dependencies: ["@rainbow-me/rainbowkit" => "^2.1.0"],
        })]
    }

    fn get_dependencies(&self) -> AdapterDependencies {
        AdapterDependencies::new()
            .with_runtime("viem", "^2.0.0")
            .with_dev("@types/node", "^20.0.0")
    }

    fn get_export_binding(&self) -> ExportBinding {
        ExportBinding::new("@formtx/adapter-evm", "EvmAdapter", "evm")
    }
}

fn transfer_schema() -> ContractSchema {
    let mut schema = ContractSchema::new(Ecosystem::Evm);
    schema.name = Some("Token".to_string());
    schema.functions = vec![ContractFunction {
        id: "transfer".to_string(),
        name: "transfer".to_string(),
        signature: Some("transfer(address,uint256)".to_string()),
        inputs: vec![
            FunctionParameter::new("to", "address"),
            FunctionParameter::new("amount", "uint256"),
        ],
        outputs: vec![FunctionParameter::new("", "bool")],
        modifies_state: true,
        payable: false,
    }];
    schema
}

fn completed_store(ui_kit: &str) -> WizardStore {
    let store = WizardStore::new();
    store.select_network("ethereum-mainnet", Ecosystem::Evm);
    store.set_contract(transfer_schema(), "0x000000000000000000000000000000000000dead");
    store.select_function("transfer").unwrap();
    let mut config = default_form_config(
        &transfer_schema(),
        "transfer",
        "0x000000000000000000000000000000000000dead",
    )
    .unwrap();
    config.execution = ExecutionConfig::Relayer { url: "https://relay.example".to_string() };
    if !ui_kit.is_empty() {
        config.ui_kit = UiKitConfig::new(ui_kit);
    }
    store.set_form_config(config).unwrap();
    store.set_execution_validity(true);
    store
}

fn frozen_options() -> ExportOptions {
    ExportOptions {
        variant: TemplateVariant::ReactVite,
        project_name: Some("token-transfer".to_string()),
        generated_year: Some(2024),
    }
}

#[test]
fn export_produces_the_stable_file_layout() {
    let state = completed_store("rainbowkit").get_state();
    let artifact = export_project(&state, &MockAdapter, &frozen_options()).unwrap();
    for path in [
        "index.html",
        "vite.config.ts",
        "tsconfig.json",
        "src/styles.css",
        "src/App.tsx",
        "src/main.tsx",
        "src/components/GeneratedForm.tsx",
        "src/adapters/evm/adapter.ts",
        "README.md",
        "package.json",
    ] {
        assert!(artifact.files.contains_key(path), "missing {}", path);
    }
    assert!(artifact.warnings.is_empty());
}

#[test]
fn generated_sources_reference_the_selected_function_and_binding() {
    let state = completed_store("rainbowkit").get_state();
    let artifact = export_project(&state, &MockAdapter, &frozen_options()).unwrap();

    let app = artifact.files["src/App.tsx"].as_text().unwrap();
    assert!(app.contains("transfer"));
    assert!(app.contains("./adapters/evm/adapter"));

    let wiring = artifact.files["src/adapters/evm/adapter.ts"].as_text().unwrap();
    assert!(wiring.contains("import { EvmAdapter } from \"@formtx/adapter-evm\";"));
    assert!(wiring.contains("networkConfigId: \"ethereum-mainnet\""));

    let form = artifact.files["src/components/GeneratedForm.tsx"].as_text().unwrap();
    assert!(!form.contains("@@"), "placeholders must all be substituted");
}

#[test]
fn embedded_form_config_round_trips_through_the_generated_source() {
    let store = completed_store("rainbowkit");
    let state = store.get_state();
    let artifact = export_project(&state, &MockAdapter, &frozen_options()).unwrap();
    let form = artifact.files["src/components/GeneratedForm.tsx"].as_text().unwrap();

    // pull the embedded literal back out the way the exported app would
    let line = form
        .lines()
        .find(|line| line.contains("const FORM_CONFIG"))
        .expect("generated form embeds the configuration");
    let literal = line
        .trim_start_matches("const FORM_CONFIG = JSON.parse(")
        .trim_end_matches(");");
    let inner: String = kit::serde_json::from_str(literal).unwrap();
    let decoded: FormConfig = kit::serde_json::from_str(&inner).unwrap();
    assert_eq!(Some(decoded), state.form_config);
}

#[test]
fn export_is_idempotent_for_identical_inputs() {
    let state = completed_store("rainbowkit").get_state();
    let first = export_project(&state, &MockAdapter, &frozen_options()).unwrap();
    let second = export_project(&state, &MockAdapter, &frozen_options()).unwrap();
    assert_eq!(first.files.len(), second.files.len());
    for (path, content) in first.files.iter() {
        assert_eq!(Some(content), second.files.get(path), "{} differs between runs", path);
    }
}

#[test]
fn export_without_form_config_fails_before_any_file() {
    let store = completed_store("rainbowkit");
    store.reset_downstream_steps(crate::store::ResetScope::Function);
    let err = export_project(&store.get_state(), &MockAdapter, &frozen_options()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigurationInvalid(_)));
}

#[test]
fn export_with_dangling_function_reference_fails() {
    // bypass the store's own validation to simulate a corrupted snapshot
    let mut state = completed_store("rainbowkit").get_state();
    let mut schema = state.contract_schema.clone().unwrap();
    schema.functions[0].id = "approve".to_string();
    state.contract_schema = Some(schema);
    let err = export_project(&state, &MockAdapter, &frozen_options()).unwrap_err();
    match err {
        BuilderError::ConfigurationInvalid(message) => {
            assert!(message.contains("transfer"));
        }
        other => panic!("expected ConfigurationInvalid, got {:?}", other),
    }
}

#[test]
fn export_with_mismatched_adapter_fails() {
    #[derive(Debug)]
    struct Stellarish;
    impl Adapter for Stellarish {
        fn get_name(&self) -> &str {
            "Stellarish"
        }
        fn get_description(&self) -> &str {
            ""
        }
        fn get_ecosystem(&self) -> Ecosystem {
            Ecosystem::Stellar
        }
        fn get_capabilities(&self) -> Vec<AdapterCapability> {
            vec![]
        }
        fn get_dependencies(&self) -> AdapterDependencies {
            AdapterDependencies::new()
        }
        fn get_export_binding(&self) -> ExportBinding {
            ExportBinding::new("@formtx/adapter-stellar", "StellarAdapter", "stellar")
        }
    }
    let state = completed_store("").get_state();
    let err = export_project(&state, &Stellarish, &frozen_options()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigurationInvalid(_)));
}

#[test]
fn unknown_ui_kit_is_a_configuration_error() {
    let state = completed_store("glitterkit").get_state();
    let err = export_project(&state, &MockAdapter, &frozen_options()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigurationInvalid(_)));
}

#[test]
fn delimiter_bearing_function_id_poisons_the_export() {
    let mut state = completed_store("rainbowkit").get_state();
    let mut schema = state.contract_schema.clone().unwrap();
    schema.functions[0].id = "@@evil@@".to_string();
    let mut config = state.form_config.clone().unwrap();
    config.function_id = "@@evil@@".to_string();
    state.contract_schema = Some(schema);
    state.form_config = Some(config);
    let err = export_project(&state, &MockAdapter, &frozen_options()).unwrap_err();
    assert!(matches!(err, BuilderError::ExportFailed(_)));
}

#[test]
fn manifest_unions_template_adapter_and_ui_kit_dependencies() {
    let state = completed_store("rainbowkit").get_state();
    let artifact = export_project(&state, &MockAdapter, &frozen_options()).unwrap();
    let deps = &artifact.manifest.dependencies;
    assert_eq!(deps.get("react").map(|s| s.as_str()), Some("^18.3.0"));
    assert_eq!(deps.get("viem").map(|s| s.as_str()), Some("^2.0.0"));
    assert_eq!(deps.get("@rainbow-me/rainbowkit").map(|s| s.as_str()), Some("^2.1.0"));
    assert_eq!(
        artifact.manifest.dev_dependencies.get("@types/node").map(|s| s.as_str()),
        Some("^20.0.0")
    );

    let package_json = artifact.files["package.json"].as_text().unwrap();
    let parsed: JsonValue = kit::serde_json::from_str(package_json).unwrap();
    assert_eq!(parsed["dependencies"]["viem"], "^2.0.0");
    assert_eq!(parsed["name"], "token-transfer");
}

#[test]
fn readme_year_is_frozen_by_the_options() {
    let state = completed_store("rainbowkit").get_state();
    let artifact = export_project(&state, &MockAdapter, &frozen_options()).unwrap();
    let readme = artifact.files["README.md"].as_text().unwrap();
    assert!(readme.contains("2024"));
}

#[test]
fn default_capability_implementations_reject_explicitly() {
    #[derive(Debug)]
    struct Bare;
    impl Adapter for Bare {
        fn get_name(&self) -> &str {
            "Bare"
        }
        fn get_description(&self) -> &str {
            ""
        }
        fn get_ecosystem(&self) -> Ecosystem {
            Ecosystem::Stellar
        }
        fn get_capabilities(&self) -> Vec<AdapterCapability> {
            vec![]
        }
        fn get_dependencies(&self) -> AdapterDependencies {
            AdapterDependencies::new()
        }
        fn get_export_binding(&self) -> ExportBinding {
            ExportBinding::new("@formtx/adapter-stellar", "StellarAdapter", "stellar")
        }
    }
    let bare = Bare;
    assert!(!bare.supports(AdapterCapability::ContractSchemaLoading));
    let err = bare.load_contract_schema("{}").unwrap_err();
    assert_eq!(err.code.as_deref(), Some("unsupported_capability"));
    let err = bare
        .format_transaction_data(&transfer_schema(), "transfer", &IndexMap::new())
        .unwrap_err();
    assert_eq!(err.code.as_deref(), Some("unsupported_capability"));
}

#[test]
fn wizard_state_defaults_are_empty() {
    let state = WizardState::default();
    assert!(state.form_config.is_none());
    assert!(!state.is_execution_step_valid);
    assert_eq!(state.current_step_index, 0);
}
