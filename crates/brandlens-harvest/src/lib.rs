//! Live interaction layer: drives browser sessions against the target
//! surfaces, detects streamed answer completion, and degrades gracefully
//! when a surface blocks or fails.
//!
//! Nothing in this crate aborts a batch. Every failure becomes a structured
//! error field on an [`brandlens_core::AnswerRecord`].

pub mod driver;
pub mod fallback;
pub mod orchestrator;
pub mod selectors;
pub mod stream;
mod timing;

pub use driver::interact;
pub use fallback::{synthesize, synthesize_batch};
pub use orchestrator::{run_batch, NullSink, RunSink};
pub use stream::await_stable;
pub use timing::HarvestTiming;
