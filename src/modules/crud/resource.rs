use aula_cache::QueryKey;
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// A record type with a conventional REST collection behind it.
///
/// - `GET {PATH}` list (paginated), `GET {PATH}/stats` stats
/// - `POST {PATH}` create, `PUT {PATH}/{id}` update, `DELETE {PATH}/{id}` delete
pub trait Resource: Send + Sync + 'static {
    type Item: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;
    type Form: Validate + Serialize + Clone + Default + PartialEq + Send + Sync + 'static;
    type Stats: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;

    /// Collection path relative to the API base, e.g. `/students`.
    const PATH: &'static str;
    /// Cache key root of the list.
    const KEY: &'static str;
    /// Singular name used in toasts.
    const LABEL: &'static str;

    fn id(item: &Self::Item) -> String;

    /// Pre-fills the edit form.
    fn form_for(item: &Self::Item) -> Self::Form;

    /// Every key a create, update or delete makes stale.
    fn invalidates() -> Vec<QueryKey>;

    fn stats_key() -> Option<QueryKey> {
        None
    }

    fn stats_path() -> String {
        format!("{}/stats", Self::PATH)
    }
}

/// One summary card above a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

impl StatCard {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}
