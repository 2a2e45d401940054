// Factbook synthesis: the fixed six-topic template and the sequential
// generation pipeline that fills it.
// All LLM calls go through llm_client.

pub mod pipeline;
pub mod prompts;
pub mod template;
