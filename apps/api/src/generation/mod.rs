// Generation: prompt building, reply parsing, the image pipeline and session state.
// All generative calls go through llm_client::GenerativeBackend.

pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod session;
