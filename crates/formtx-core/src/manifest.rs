use kit::indexmap::IndexMap;
use kit::types::diagnostics::Diagnostic;
use kit::types::ui_kits::UiKitDescriptor;
use kit::types::AdapterDependencies;

/// Declared dependencies of an exported project, npm package name to version
/// requirement, split the way `package.json` splits them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
}

impl DependencyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dependency(mut self, name: &str, requirement: &str) -> Self {
        self.dependencies.insert(name.to_string(), requirement.to_string());
        self
    }

    pub fn with_dev_dependency(mut self, name: &str, requirement: &str) -> Self {
        self.dev_dependencies.insert(name.to_string(), requirement.to_string());
        self
    }
}

/// Unions the template's base dependencies with the adapter's declarations
/// and the chosen UI kit's. On a name collision at a different version
/// requirement the later declaration wins, and the override is reported as a
/// warning diagnostic instead of happening silently.
pub fn resolve_dependency_manifest(
    base: &DependencyManifest,
    adapter_dependencies: &AdapterDependencies,
    ui_kit: Option<&UiKitDescriptor>,
) -> (DependencyManifest, Vec<Diagnostic>) {
    let mut manifest = base.clone();
    let mut warnings = Vec::new();
    merge_into(&mut manifest.dependencies, &adapter_dependencies.runtime, "adapter", &mut warnings);
    merge_into(
        &mut manifest.dev_dependencies,
        &adapter_dependencies.dev,
        "adapter",
        &mut warnings,
    );
    if let Some(kit) = ui_kit {
        let origin = format!("ui kit '{}'", kit.id);
        merge_into(&mut manifest.dependencies, &kit.dependencies, &origin, &mut warnings);
    }
    (manifest, warnings)
}

fn merge_into(
    target: &mut IndexMap<String, String>,
    incoming: &IndexMap<String, String>,
    origin: &str,
    warnings: &mut Vec<Diagnostic>,
) {
    for (name, requirement) in incoming.iter() {
        if let Some(existing) = target.get(name) {
            if existing != requirement {
                warnings.push(
                    Diagnostic::warning(format!(
                        "dependency '{}' already declared at '{}', overridden to '{}' by the {}",
                        name, existing, requirement, origin
                    ))
                    .with_code("dependency_conflict")
                    .with_suggestion(
                        "verify the exported project builds against the overriding version",
                    ),
                );
            }
        }
        target.insert(name.clone(), requirement.clone());
    }
}

/// Renders the exported project's `package.json`. Dependency keys are sorted
/// so repeated exports of the same configuration are byte-identical.
pub fn render_package_json(project_name: &str, manifest: &DependencyManifest) -> String {
    let mut root = serde_json::Map::new();
    root.insert("name".to_string(), serde_json::json!(project_name));
    root.insert("private".to_string(), serde_json::json!(true));
    root.insert("version".to_string(), serde_json::json!("0.0.0"));
    root.insert("type".to_string(), serde_json::json!("module"));
    root.insert(
        "scripts".to_string(),
        serde_json::json!({
            "dev": "vite",
            "build": "tsc -b && vite build",
            "preview": "vite preview",
        }),
    );
    root.insert("dependencies".to_string(), sorted_object(&manifest.dependencies));
    root.insert("devDependencies".to_string(), sorted_object(&manifest.dev_dependencies));
    let mut rendered = serde_json::to_string_pretty(&serde_json::Value::Object(root))
        .expect("package manifest serialization cannot fail");
    rendered.push('\n');
    rendered
}

fn sorted_object(entries: &IndexMap<String, String>) -> serde_json::Value {
    let mut names: Vec<&String> = entries.keys().collect();
    names.sort();
    let mut object = serde_json::Map::new();
    for name in names {
        object.insert(name.clone(), serde_json::json!(entries[name]));
    }
    serde_json::Value::Object(object)
}
