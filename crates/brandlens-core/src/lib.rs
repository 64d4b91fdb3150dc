//! Shared types for the brandlens pipeline.
//!
//! Every stage of the pipeline (harvest → parse → aggregate) communicates
//! through the types defined here. Records are append-only: a stage fully
//! builds its output before handing it to the next stage and never mutates
//! a record after creation.

pub mod config;
pub mod prompts;
pub mod report;
pub mod types;

pub use config::{load_app_config, load_app_config_from_env, AppConfig, ConfigError};
pub use report::{
    AnalysisData, AnalysisRecord, BatchMetrics, CompetitorCount, DomainCount, RecordCounts,
    ScoreBreakdown, SurfaceMetrics,
};
pub use types::{
    AnswerError, AnswerRecord, BatchInput, CitedDomain, CoreError, ParsedFact, Sentiment, Surface,
};
