use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type MovieId = u64;

/// A catalog record. Only `id` is interpreted; every other attribute is
/// carried through untouched so it survives persistence unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Movie {
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Set a display attribute. `id` is not an attribute and is ignored.
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        if key != "id" {
            self.attributes.insert(key.to_string(), value.into());
        }
        self
    }

    fn str_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_attribute("title")
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.str_attribute("poster_path")
    }

    pub fn release_date(&self) -> Option<&str> {
        self.str_attribute("release_date")
    }
}

/// Response envelope of the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub page: Option<u32>,
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u32>,
}
