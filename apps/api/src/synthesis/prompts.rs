// Factbook synthesis prompt templates.

pub const SECTION_SYSTEM: &str = "\
You are a business analyst creating comprehensive factbooks about companies. \
Create informative, professional content.";

pub const SECTION_PROMPT_TEMPLATE: &str = "\
Create a {topic} section for {company_name} ({product_name}). \
Competitors: {competitors}. Include 2-3 sentences.";

/// Provenance label for generated sections.
pub const GENERATED_MEDIA_LABEL: &str = "AI-generated content";

/// Placeholder citation when no real source exists.
pub const PLACEHOLDER_URL: &str = "#";
