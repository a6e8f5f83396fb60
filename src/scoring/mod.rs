//! Composite day-quality scoring: ten bounded categories, a cross-verification adjustment,
//! and a grade.

mod aggregate;
pub mod astro;
mod config;
mod grade;
pub mod normalize;
mod policy;
pub mod saju;
mod weights;

pub use aggregate::{AstroDeltas, ScoreBreakdown, ScoreResult};
pub use astro::{
    AspectType, AstroScoreInput, EclipseInput, EclipseKind, LunarPhase, LunarPhaseInput,
    MajorPlanetsInput, OuterPlanetsInput, PlanetTransit, ProgressionTone, SolarReturnInput,
    SolarReturnProximity, SpecialPointsInput, TransitMoonInput, TransitSunInput,
};
pub use config::{GradeCutoffs, ScoringConfig, ScoringConfigError};
pub use grade::{GradeLabel, GradingService};
pub use normalize::{calculate_adjusted_score, normalize_to_category};
pub use saju::{
    DaeunInput, IljinInput, PeriodFlags, SajuScoreInput, SeunInput, SibsinGroup, WolunInput,
    YongsinInput, YongsinRelation,
};
pub use weights::ScoreCategory;

use normalize::round1;
use policy::decide_cross_bonus;
use tracing::debug;

const HALF_MAX: f64 = 50.0;
const TOTAL_MAX: f64 = 100.0;

/// Stateless evaluator that applies a scoring rubric to one day's inputs.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    config: ScoringConfig,
    grading: GradingService,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
            grading: GradingService::default(),
        }
    }
}

impl ScoreEngine {
    /// Fails when the grade cutoffs are not ordered best ≥ good ≥ normal ≥ bad.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        let grading = GradingService::new(config.grade_cutoffs)?;
        Ok(Self { config, grading })
    }

    pub fn grading(&self) -> &GradingService {
        &self.grading
    }

    pub fn score(&self, saju: &SajuScoreInput, astro: &AstroScoreInput) -> ScoreResult {
        let (breakdown, astro_deltas) = aggregate::score_categories(saju, astro);

        let saju_score = round1(breakdown.saju_sum().clamp(0.0, HALF_MAX));
        let astro_score =
            round1((breakdown.astro_sum() + astro_deltas.total()).clamp(0.0, HALF_MAX));

        let elements_aligned = matches!(
            (saju.yongsin.yongsin_element, astro.dominant_element),
            (Some(yongsin), Some(dominant)) if yongsin == dominant
        );
        let verdict = decide_cross_bonus(saju_score, astro_score, elements_aligned, &self.config);

        let total_score = round1((saju_score + astro_score + verdict.bonus).clamp(0.0, TOTAL_MAX));
        let grade = self.grading.from_score(total_score);

        debug!(
            saju_score,
            astro_score,
            cross_bonus = verdict.bonus,
            total_score,
            grade,
            "day score computed"
        );

        ScoreResult {
            saju_score,
            astro_score,
            cross_bonus: verdict.bonus,
            total_score,
            grade,
            label: self.grading.label(grade),
            breakdown,
            astro_deltas,
            saju_positive: verdict.saju_positive,
            saju_negative: verdict.saju_negative,
            astro_positive: verdict.astro_positive,
            astro_negative: verdict.astro_negative,
            cross_verified: verdict.verified,
            cross_agreement_percent: breakdown.agreement_percent(),
        }
    }
}

/// Scores one day with the default rubric.
pub fn calculate_total_score(saju: &SajuScoreInput, astro: &AstroScoreInput) -> ScoreResult {
    ScoreEngine::default().score(saju, astro)
}
