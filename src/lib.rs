//! Day-quality engine: four-pillar relation analysis and composite day scoring.

pub mod config;
pub mod error;
pub mod saju;
pub mod scoring;
pub mod telemetry;

pub use saju::{analyze_relations, FourPillars, RelationFact, RelationOptions};
pub use scoring::{calculate_total_score, ScoreEngine, ScoreResult};
