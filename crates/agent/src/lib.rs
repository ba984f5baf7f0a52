//! Advisor runtime - prompt assembly, model gateway, and reply pipeline
//!
//! This crate turns an on-topic shopping question plus the loaded catalog
//! into a user-facing reply:
//! 1. **Topic gate** - off-domain questions get a fixed redirect reply
//! 2. **Reply cache** (`cache`) - memoizes final replies per query text
//! 3. **Prompt assembly** (`prompt`) - template + query + product shortlist
//! 4. **Model gateway** (`llm`, `gemini`) - opaque text-in/text-out call
//! 5. **Reply policy** (`validation`) - length and keyword checks on the
//!    model output before anything reaches the user
//!
//! # Key Types
//!
//! - `AdvisorService` - the per-request pipeline (see `advisor` module)
//! - `LlmClient` - pluggable gateway trait; `GeminiClient` is the real one
//! - `ReplyPolicy` - acceptance rules for raw model output
//!
//! # Failure principle
//!
//! Nothing downstream of the HTTP handler returns an error: gateway
//! failures and rejected model output both collapse into fixed fallback
//! replies, so every question gets *some* answer.

pub mod advisor;
pub mod cache;
pub mod gemini;
pub mod llm;
pub mod prompt;
pub mod validation;

pub use advisor::AdvisorService;
pub use cache::{CacheConfig, ReplyCache};
pub use gemini::GeminiClient;
pub use llm::LlmClient;
pub use prompt::{PromptError, PromptTemplate};
pub use validation::{RejectReason, ReplyPolicy, ReplyVerdict};
