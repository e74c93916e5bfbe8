use kit::indexmap::IndexMap;
use kit::serde_json::Value as JsonValue;
use kit::types::diagnostics::Diagnostic;
use kit::types::forms::FormConfig;

/// One saved builder session, keyed by configuration id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedConfiguration {
    pub id: String,
    pub title: String,
    pub form_config: FormConfig,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, JsonValue>,
}

/// Key-value persistence collaborator for saved configurations. The core only
/// requires single-key atomicity; no transactional guarantees are assumed.
pub trait ConfigStore {
    fn get(&self, id: &str) -> Result<Option<SavedConfiguration>, Diagnostic>;
    fn put(&self, config: &SavedConfiguration) -> Result<(), Diagnostic>;
    fn delete(&self, id: &str) -> Result<(), Diagnostic>;
    fn list(&self) -> Result<Vec<SavedConfiguration>, Diagnostic>;
}
