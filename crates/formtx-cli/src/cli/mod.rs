use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use formtx_core::export::{export_project, ArtifactPackager, ExportOptions};
use formtx_core::kit::types::Ecosystem;
use formtx_core::kit::uuid::Uuid;
use formtx_core::persistence::{ConfigStore, SavedConfiguration};
use formtx_core::wizard;

mod configs;
mod packaging;
mod project;

use crate::{get_adapter_by_ecosystem, get_available_adapters};
use configs::{default_db_path, ConfigDb};
use packaging::ZipPackager;
use project::{build_wizard_store, load_project_file, ProjectFile};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Check that a project file completes every wizard step
    #[clap(name = "check", bin_name = "check")]
    Check(CheckProject),
    /// Export the standalone web project described by a project file
    #[clap(name = "export", bin_name = "export")]
    Export(ExportProject),
    /// List the wallet UI kits the adapters offer
    #[clap(name = "kits", bin_name = "kits")]
    Kits(ListUiKits),
    /// Saved form configuration management
    #[clap(subcommand)]
    Configs(ConfigsCommand),
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct CheckProject {
    /// Path to the project file
    #[arg(long = "project-file-path", short = 'p', default_value = "./formtx.yml")]
    pub project_path: String,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct ExportProject {
    /// Path to the project file
    #[arg(long = "project-file-path", short = 'p', default_value = "./formtx.yml")]
    pub project_path: String,
    /// Where to write the archive; defaults to <project-name>.zip
    #[arg(long = "output", short = 'o')]
    pub output_path: Option<String>,
    /// Freeze the year stamped into generated files
    #[arg(long = "generated-year")]
    pub generated_year: Option<i32>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct ListUiKits {
    /// Ecosystem identifier (evm, svm, stellar); every adapter when omitted
    pub ecosystem: Option<String>,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum ConfigsCommand {
    /// List saved configurations
    #[clap(name = "ls", bin_name = "ls")]
    List(ConfigDbArgs),
    /// Save the form configuration a project file produces
    #[clap(name = "save", bin_name = "save")]
    Save(SaveConfig),
    /// Delete a saved configuration
    #[clap(name = "rm", bin_name = "rm")]
    Delete(DeleteConfig),
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct ConfigDbArgs {
    /// Path to the configuration database
    #[arg(long = "db")]
    pub db_path: Option<String>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct SaveConfig {
    /// Path to the project file
    #[arg(long = "project-file-path", short = 'p', default_value = "./formtx.yml")]
    pub project_path: String,
    /// Human readable title
    #[arg(long = "title", short = 't')]
    pub title: String,
    /// Configuration id; generated when omitted
    #[arg(long = "id")]
    pub id: Option<String>,
    /// Path to the configuration database
    #[arg(long = "db")]
    pub db_path: Option<String>,
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct DeleteConfig {
    /// Configuration id to delete
    pub id: String,
    /// Path to the configuration database
    #[arg(long = "db")]
    pub db_path: Option<String>,
}

pub fn main() {
    let opts = Opts::parse();
    let result = match opts.command {
        Command::Check(cmd) => handle_check(&cmd),
        Command::Export(cmd) => handle_export(&cmd),
        Command::Kits(cmd) => handle_kits(&cmd),
        Command::Configs(ConfigsCommand::List(cmd)) => handle_configs_list(&cmd),
        Command::Configs(ConfigsCommand::Save(cmd)) => handle_configs_save(&cmd),
        Command::Configs(ConfigsCommand::Delete(cmd)) => handle_configs_delete(&cmd),
    };
    if let Err(message) = result {
        eprintln!("{}", format_err!("{}", message));
        process::exit(1);
    }
}

fn base_dir_of(project_path: &str) -> PathBuf {
    Path::new(project_path).parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
}

fn load_session(
    project_path: &str,
) -> Result<(ProjectFile, Box<dyn formtx_core::kit::Adapter>, formtx_core::store::WizardStore), String>
{
    let project = load_project_file(project_path)?;
    let adapter = get_adapter_by_ecosystem(project.ecosystem).ok_or_else(|| {
        format!("no adapter registered for the {} ecosystem", project.ecosystem)
    })?;
    let store = build_wizard_store(&project, adapter.as_ref(), &base_dir_of(project_path))?;
    Ok((project, adapter, store))
}

fn handle_check(cmd: &CheckProject) -> Result<(), String> {
    let (_, _, store) = load_session(&cmd.project_path)?;
    let state = store.get_state();
    match wizard::first_unsatisfied_step(&state) {
        None => {
            println!("{}", green!("{} completes every wizard step", cmd.project_path));
            Ok(())
        }
        Some(step) => Err(format!("the '{}' step is incomplete", step)),
    }
}

fn handle_export(cmd: &ExportProject) -> Result<(), String> {
    let (project, adapter, store) = load_session(&cmd.project_path)?;
    let options = ExportOptions {
        project_name: project.name.clone(),
        generated_year: cmd.generated_year,
        ..Default::default()
    };
    let artifact = export_project(&store.get_state(), adapter.as_ref(), &options)
        .map_err(|e| e.to_string())?;
    for warning in artifact.warnings.iter() {
        println!("{}", format_warn!("{}", warning));
    }
    let bytes = ZipPackager.package(&artifact).map_err(|e| e.to_string())?;
    let output_path = cmd.output_path.clone().unwrap_or_else(|| {
        format!(
            "{}.zip",
            project.name.clone().unwrap_or_else(|| format!("{}-form", project.function))
        )
    });
    fs::write(&output_path, &bytes)
        .map_err(|e| format!("unable to write {}: {}", output_path, e))?;
    println!(
        "{}",
        green!("exported {} files to {}", artifact.files.len(), output_path)
    );
    Ok(())
}

fn handle_kits(cmd: &ListUiKits) -> Result<(), String> {
    let adapters = match &cmd.ecosystem {
        Some(raw) => {
            let ecosystem = Ecosystem::from_str(raw)
                .map_err(|_| format!("unknown ecosystem '{}'", raw))?;
            vec![get_adapter_by_ecosystem(ecosystem)
                .ok_or_else(|| format!("no adapter registered for the {} ecosystem", ecosystem))?]
        }
        None => get_available_adapters(),
    };
    for adapter in adapters.iter() {
        println!("{}", blue!("{} ({})", adapter.get_name(), adapter.get_ecosystem()));
        let kits = adapter.get_available_ui_kits();
        if kits.is_empty() {
            println!("  no ui kits available");
            continue;
        }
        for kit in kits {
            println!("  {}: {}", kit.id, kit.name);
            for (name, requirement) in kit.dependencies.iter() {
                println!("      {} {}", name, requirement);
            }
        }
    }
    Ok(())
}

fn open_db(db_path: &Option<String>) -> Result<ConfigDb, String> {
    let path = db_path.as_ref().map(PathBuf::from).unwrap_or_else(default_db_path);
    ConfigDb::open(&path)
}

fn handle_configs_list(cmd: &ConfigDbArgs) -> Result<(), String> {
    let db = open_db(&cmd.db_path)?;
    let configurations = db.list().map_err(|e| e.to_string())?;
    if configurations.is_empty() {
        println!("no saved configurations");
        return Ok(());
    }
    for config in configurations {
        println!(
            "{}  {} (function: {})",
            config.id,
            config.title,
            config.form_config.function_id
        );
    }
    Ok(())
}

fn handle_configs_save(cmd: &SaveConfig) -> Result<(), String> {
    let (project, _, store) = load_session(&cmd.project_path)?;
    let state = store.get_state();
    let form_config = state
        .form_config
        .ok_or_else(|| "the project file did not produce a form configuration".to_string())?;

    let mut metadata = formtx_core::kit::indexmap::IndexMap::new();
    metadata.insert("ecosystem".to_string(), serde_json::json!(project.ecosystem));
    metadata
        .insert("network_config_id".to_string(), serde_json::json!(project.network_config_id));

    let saved = SavedConfiguration {
        id: cmd.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: cmd.title.clone(),
        form_config,
        metadata,
    };
    let db = open_db(&cmd.db_path)?;
    if let Some(existing) = db.get(&saved.id).map_err(|e| e.to_string())? {
        println!("{}", format_warn!("overwriting configuration '{}'", existing.title));
    }
    db.put(&saved).map_err(|e| e.to_string())?;
    println!("{}", green!("saved configuration {}", saved.id));
    Ok(())
}

fn handle_configs_delete(cmd: &DeleteConfig) -> Result<(), String> {
    let db = open_db(&cmd.db_path)?;
    db.delete(&cmd.id).map_err(|e| e.to_string())?;
    println!("{}", green!("deleted configuration {}", cmd.id));
    Ok(())
}
