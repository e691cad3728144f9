// Resume analysis pipeline: upload validation, PDF text extraction, prompt
// construction, structured inference, result presentation.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod postprocess;
pub mod prompts;
pub mod report;
pub mod upload;
pub mod view;
