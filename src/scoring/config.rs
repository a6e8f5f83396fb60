use serde::{Deserialize, Serialize};

/// Rubric for combining the two halves and grading the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// A half above this (0–50 scale) counts as positive.
    pub positive_threshold: f64,
    /// A half below this counts as negative.
    pub negative_threshold: f64,
    pub both_positive_bonus: f64,
    pub both_negative_penalty: f64,
    pub element_align_bonus: f64,
    pub grade_cutoffs: GradeCutoffs,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 25.0,
            negative_threshold: 20.0,
            both_positive_bonus: 3.0,
            both_negative_penalty: -3.0,
            element_align_bonus: 1.0,
            grade_cutoffs: GradeCutoffs::default(),
        }
    }
}

/// Minimum total for grades 0 through 3; anything lower is grade 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GradeCutoffs {
    pub best: f64,
    pub good: f64,
    pub normal: f64,
    pub bad: f64,
}

impl Default for GradeCutoffs {
    fn default() -> Self {
        Self {
            best: 68.0,
            good: 56.0,
            normal: 42.0,
            bad: 28.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("grade cutoffs must not rise from best to bad ({best}/{good}/{normal}/{bad})")]
    NonMonotoneCutoffs {
        best: f64,
        good: f64,
        normal: f64,
        bad: f64,
    },
}

impl GradeCutoffs {
    /// Rejects tables where a worse grade would need a higher total than a better one.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let GradeCutoffs {
            best,
            good,
            normal,
            bad,
        } = *self;
        if best >= good && good >= normal && normal >= bad {
            Ok(())
        } else {
            Err(ScoringConfigError::NonMonotoneCutoffs {
                best,
                good,
                normal,
                bad,
            })
        }
    }
}
