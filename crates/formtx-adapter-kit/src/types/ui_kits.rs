use indexmap::IndexMap;

/// A pluggable wallet-connection UI library an adapter can offer for the
/// exported project. Declared with the `define_ui_kit!` macro.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiKitDescriptor {
    pub id: String,
    pub name: String,
    pub documentation: String,
    /// npm packages the kit pulls into the exported project's manifest.
    pub dependencies: IndexMap<String, String>,
}
