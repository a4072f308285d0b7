// Resume analysis: keyword extraction, match scoring, report rendering.
// The first three modules are synchronous and side-effect free apart from the report write.
// All LLM calls go through llm_client, never direct Anthropic calls here.

pub mod advisor;
pub mod handlers;
pub mod keywords;
pub mod matching;
pub mod pdf;
pub mod pipeline;
pub mod prompts;
pub mod report;
