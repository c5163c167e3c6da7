//! CI Pipeline Risk Validator — deterministic checks + ML scoring.
//!
//! Assesses whether a CI pipeline config (JSON) is safe to execute before
//! the pipeline runs: parse once, validate syntax and schema, scan content
//! heuristics, extract a fixed feature vector, score it with a pre-trained
//! classifier, and fold everything into one 0-100 risk score and a
//! LOW/MEDIUM/HIGH level.
//!
//! The engine never propagates an error to its caller: every call returns
//! a [`ValidationRecord`], with unexpected failures forced to HIGH.
//!
//! No DB, no network; pure computation + in-memory stats.

pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod features;
pub mod predictor;
pub mod schema;
pub mod scoring;
pub mod stats;
pub mod syntax;
pub mod types;

pub use config::Config;
pub use content::{BaselineAnalyzer, ContentAnalyzer, KeywordAnalyzer};
pub use engine::Engine;
pub use error::EngineError;
pub use predictor::RiskPredictor;
pub use schema::SchemaValidator;
pub use stats::StatsSnapshot;
pub use types::{RiskLevel, ValidationRecord};
