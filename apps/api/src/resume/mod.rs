// Resume ingestion: PDF text extraction, local summary, and LLM-backed
// experience extraction. All LLM calls go through llm_client.

pub mod experience;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod summary;
