//! RFP extraction — validates the upload and asks the LLM for structured facts.

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::prompts::{
    EXTRACTION_PROMPT_FILE_ONLY, EXTRACTION_PROMPT_WITH_TEXT, EXTRACTION_SCHEMA,
    EXTRACTION_SYSTEM,
};
use crate::extraction::text::extract_text;
use crate::extraction::validation::validate_upload;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, Completer};
use crate::models::rfp::ExtractedFacts;

const EXTRACTION_TEMPERATURE: f32 = 0.7;

/// Validates the upload, then runs a single LLM extraction call.
///
/// Fails with `InvalidFormat` or `PayloadTooLarge` before any LLM call,
/// `Upstream` if the call fails, and `ExtractionParse` if the reply is not
/// a complete fact record.
pub async fn extract(
    llm: &dyn Completer,
    file_bytes: &Bytes,
    file_name: &str,
) -> Result<ExtractedFacts, AppError> {
    let format = validate_upload(file_name, file_bytes.len())?;

    let document_text = extract_text(format, file_bytes.clone()).await;
    if document_text.is_none() {
        warn!("No document text available for {file_name}; prompting with file name only");
    }

    let system = format!("{EXTRACTION_SYSTEM} {JSON_ONLY_SYSTEM}");
    let prompt = build_extraction_prompt(file_name, document_text.as_deref());

    let raw = llm
        .complete(&system, &prompt, EXTRACTION_TEMPERATURE)
        .await?;

    let facts = parse_extracted_facts(&raw)?;
    info!(
        "Extracted RFP facts from {file_name}: company={}, product={}, {} competitors",
        facts.company_name,
        facts.product_name,
        facts.competitors.len()
    );
    Ok(facts)
}

fn build_extraction_prompt(file_name: &str, document_text: Option<&str>) -> String {
    match document_text {
        Some(text) => EXTRACTION_PROMPT_WITH_TEXT
            .replace("{file_name}", file_name)
            .replace("{document_text}", text)
            .replace("{schema}", EXTRACTION_SCHEMA),
        None => EXTRACTION_PROMPT_FILE_ONLY
            .replace("{file_name}", file_name)
            .replace("{schema}", EXTRACTION_SCHEMA),
    }
}

/// Parses the LLM reply into `ExtractedFacts`. Blank names count as missing.
pub fn parse_extracted_facts(raw: &str) -> Result<ExtractedFacts, AppError> {
    let mut facts: ExtractedFacts = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| AppError::ExtractionParse(e.to_string()))?;

    facts.company_name = facts.company_name.trim().to_string();
    facts.product_name = facts.product_name.trim().to_string();
    if facts.company_name.is_empty() {
        return Err(AppError::ExtractionParse("company_name is empty".to_string()));
    }
    if facts.product_name.is_empty() {
        return Err(AppError::ExtractionParse("product_name is empty".to_string()));
    }
    facts.category = facts
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Ok(facts)
}
