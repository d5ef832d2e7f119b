// Interview simulation: roles, prompts, per-candidate orchestration,
// batch running, and result persistence.
// All LLM calls go through llm_client::ChatCompletion.

pub mod batch;
pub mod catalog;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod roles;
pub mod writer;
