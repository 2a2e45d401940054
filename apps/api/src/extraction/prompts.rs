// RFP extraction prompt templates.

pub const EXTRACTION_SYSTEM: &str = "\
You are an expert at extracting structured business information from RFP documents. \
Extract and return JSON with: company_name, product_name, competitors (list), \
proposal_areas (list), category.";

pub const EXTRACTION_SCHEMA: &str = r#"OUTPUT SCHEMA (return exactly this structure):
{
  "company_name": "string",
  "product_name": "string",
  "competitors": ["string"],
  "proposal_areas": ["string"],
  "category": "string" | null
}"#;

pub const EXTRACTION_PROMPT_FILE_ONLY: &str = "\
Extract information from this RFP file: {file_name}

{schema}";

pub const EXTRACTION_PROMPT_WITH_TEXT: &str = "\
Extract information from this RFP file: {file_name}

DOCUMENT TEXT:
{document_text}

{schema}";
