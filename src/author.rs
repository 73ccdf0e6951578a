use serde::{Deserialize, Serialize};

/// One roster row. Extra columns are ignored.
#[derive(Debug, Deserialize)]
pub struct Person {
    pub first: String,
    pub last: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub email: String,
}

impl Person {
    /// Composite display name, used as the record key everywhere downstream.
    pub fn name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}

/// Stage-one artifact: one record per roster member. Identifier fields stay
/// empty when the service had no match.
#[derive(Debug, Serialize, Deserialize)]
pub struct RosterRecord {
    pub name: String,
    pub dblp: String,
    pub google_scholar: String,
}

/// Merged author record, enriched in place by the OpenAlex stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dblp: String,
    #[serde(default)]
    pub dblp_origin: String,
    #[serde(default)]
    pub google_scholar: String,
    #[serde(default)]
    pub openalex_id: String,
    #[serde(default)]
    pub openalex_name: String,
    /// Publications carried in from the bibliography step; input to the
    /// title search, never written back out.
    #[serde(default, skip_serializing)]
    pub publication: Vec<Publication>,
}

/// Opaque publication payload; only the title is interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
