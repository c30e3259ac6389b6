// Content generation: platform profiles, instruction composition, the single LLM
// call and response normalization.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod parser;
pub mod platform;
pub mod prompts;
