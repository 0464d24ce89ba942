use aula_core::PageParams;
use serde_json::{Map, Value};

/// What the list is currently showing.
///
/// The params object produced by [`ListFilters::to_params`] is both the
/// query string and the cache key segment, so every distinct filter
/// combination is its own cache entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ListFilters {
    pub page: i64,
    pub limit: i64,
    pub search: String,
    /// Page-specific filters (`course`, `status`, `date`, ...).
    pub extra: Map<String, Value>,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            extra: Map::new(),
        }
    }
}

impl ListFilters {
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_filter(name, value);
        self.page = 1;
        self
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    pub fn set_limit(&mut self, limit: i64) {
        self.limit = limit;
        self.page = 1;
    }

    /// New search terms start over from the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Sets or (with `null`) clears a filter. Back to page 1 either way.
    pub fn set_filter(&mut self, name: &str, value: impl Into<Value>) {
        match value.into() {
            Value::Null => {
                self.extra.remove(name);
            }
            value => {
                self.extra.insert(name.to_string(), value);
            }
        }
        self.page = 1;
    }

    pub fn filter(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn to_params(&self) -> Value {
        let mut params = self.extra.clone();
        PageParams::new(self.page, self.limit).write_into(&mut params);
        let search = self.search.trim();
        if !search.is_empty() {
            params.insert("search".into(), Value::from(search));
        }
        Value::Object(params)
    }
}
