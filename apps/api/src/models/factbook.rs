use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for factbook creation. Lists may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactbookInput {
    pub company_name: String,
    pub product_name: String,
    pub category: String,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub proposal_areas: Vec<String>,
    #[serde(default)]
    pub advertising_types: Vec<String>,
}

/// Provenance attached to a section. Embedded in the section row, never stored alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub content: String,
    pub media: String,
    /// `#` when no real citation exists.
    pub url: String,
}

/// A freshly generated section, before it has a stored identity.
/// `id` is the 1-based template position rendered as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub section_order: i32,
    pub title: String,
    pub content: String,
    pub sources: Vec<Source>,
}

/// A persisted factbook without its sections (list view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factbook {
    pub id: Uuid,
    pub company_name: String,
    pub product_name: String,
    pub category: String,
    pub competitors: Vec<String>,
    pub proposal_areas: Vec<String>,
    pub advertising_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: i32,
}

/// A persisted section row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSection {
    pub id: Uuid,
    pub factbook_id: Uuid,
    pub section_order: i32,
    pub title: String,
    pub content: String,
    pub sources: Vec<Source>,
}

/// Full factbook with sections ordered by `section_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactbookDetail {
    #[serde(flatten)]
    pub factbook: Factbook,
    pub sections: Vec<StoredSection>,
}
