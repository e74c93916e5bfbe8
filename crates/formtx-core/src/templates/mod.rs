use strum::{Display, EnumIter};

use crate::manifest::DependencyManifest;

pub const APP_TEMPLATE: &str = include_str!("../../templates/app.tsx.tpl");
pub const MAIN_TEMPLATE: &str = include_str!("../../templates/main.tsx.tpl");
pub const GENERATED_FORM_TEMPLATE: &str = include_str!("../../templates/generated_form.tsx.tpl");
pub const ADAPTER_WIRING_TEMPLATE: &str = include_str!("../../templates/adapter.ts.tpl");
pub const README_TEMPLATE: &str = include_str!("../../templates/readme.md.tpl");

pub const STATIC_INDEX_HTML: &str = include_str!("../../templates/index.html");
pub const STATIC_VITE_CONFIG: &str = include_str!("../../templates/vite.config.ts");
pub const STATIC_TSCONFIG: &str = include_str!("../../templates/tsconfig.json");
pub const STATIC_STYLES: &str = include_str!("../../templates/styles.css");

/// Target template set of an export. A single variant today; the pipeline is
/// keyed on it so further variants slot in without touching callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum TemplateVariant {
    #[default]
    ReactVite,
}

pub struct StaticFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Files copied into the exported project unmodified.
pub fn static_files(variant: TemplateVariant) -> Vec<StaticFile> {
    match variant {
        TemplateVariant::ReactVite => vec![
            StaticFile { path: "index.html", content: STATIC_INDEX_HTML },
            StaticFile { path: "vite.config.ts", content: STATIC_VITE_CONFIG },
            StaticFile { path: "tsconfig.json", content: STATIC_TSCONFIG },
            StaticFile { path: "src/styles.css", content: STATIC_STYLES },
        ],
    }
}

lazy_static! {
    static ref REACT_VITE_BASE_DEPENDENCIES: DependencyManifest = DependencyManifest::new()
        .with_dependency("react", "^18.3.0")
        .with_dependency("react-dom", "^18.3.0")
        .with_dev_dependency("@types/react", "^18.3.0")
        .with_dev_dependency("@types/react-dom", "^18.3.0")
        .with_dev_dependency("@vitejs/plugin-react", "^4.3.0")
        .with_dev_dependency("typescript", "^5.5.0")
        .with_dev_dependency("vite", "^5.4.0");
}

pub fn base_dependencies(variant: TemplateVariant) -> DependencyManifest {
    match variant {
        TemplateVariant::ReactVite => REACT_VITE_BASE_DEPENDENCIES.clone(),
    }
}
