use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured facts the LLM pulls out of an RFP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFacts {
    pub company_name: String,
    pub product_name: String,
    pub competitors: Vec<String>,
    pub proposal_areas: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One raw upload and what was extracted from it. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfpUpload {
    pub id: Uuid,
    pub filename: String,
    pub file_path: String,
    pub extracted_data: ExtractedFacts,
    pub created_at: DateTime<Utc>,
}
