//! Factbook synthesis — generates the six template sections in order.
//!
//! Calls run strictly one after another so each section's order matches its
//! template position. Any failure aborts the run; partial section sets are
//! never returned.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::Completer;
use crate::models::factbook::{FactbookInput, Section, Source};
use crate::synthesis::prompts::{
    GENERATED_MEDIA_LABEL, PLACEHOLDER_URL, SECTION_PROMPT_TEMPLATE, SECTION_SYSTEM,
};
use crate::synthesis::template::SectionTopic;

const SECTION_TEMPERATURE: f32 = 0.7;

pub async fn synthesize(
    llm: &dyn Completer,
    facts: &FactbookInput,
) -> Result<Vec<Section>, AppError> {
    let mut sections = Vec::with_capacity(SectionTopic::ALL.len());

    for topic in SectionTopic::ALL {
        let prompt = build_section_prompt(topic, facts);

        let content = llm
            .complete(SECTION_SYSTEM, &prompt, SECTION_TEMPERATURE)
            .await
            .map_err(|e| {
                warn!(
                    "Section {} ({}) failed for {}: {e}",
                    topic.order(),
                    topic.title(),
                    facts.company_name
                );
                AppError::Synthesis(format!("{} generation failed: {e}", topic.title()))
            })?;

        if content.trim().is_empty() {
            return Err(AppError::Synthesis(format!(
                "{} generation returned no text",
                topic.title()
            )));
        }

        sections.push(Section {
            id: topic.order().to_string(),
            section_order: topic.order(),
            title: topic.title().to_string(),
            content,
            sources: vec![generated_source(topic, &facts.company_name)],
        });
    }

    info!(
        "Synthesized {} sections for {} ({})",
        sections.len(),
        facts.company_name,
        facts.product_name
    );
    Ok(sections)
}

fn build_section_prompt(topic: SectionTopic, facts: &FactbookInput) -> String {
    let competitors = if facts.competitors.is_empty() {
        "none listed".to_string()
    } else {
        facts.competitors.join(", ")
    };

    SECTION_PROMPT_TEMPLATE
        .replace("{topic}", topic.title())
        .replace("{company_name}", &facts.company_name)
        .replace("{product_name}", &facts.product_name)
        .replace("{competitors}", &competitors)
}

fn generated_source(topic: SectionTopic, company_name: &str) -> Source {
    Source {
        title: format!("{} information", topic.title()),
        content: format!("{} of {company_name}", topic.title().to_lowercase()),
        media: GENERATED_MEDIA_LABEL.to_string(),
        url: PLACEHOLDER_URL.to_string(),
    }
}
