// RFP extraction: upload validation, optional PDF text read, and the LLM call
// that turns an RFP into `ExtractedFacts`.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod service;
pub mod text;
pub mod validation;
