use super::config::{GradeCutoffs, ScoringConfigError};
use serde::{Deserialize, Serialize};

/// Display label for a grade in both supported locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeLabel {
    pub ko: String,
    pub en: String,
}

const LABELS: [(&str, &str); 5] = [
    ("최고", "Best"),
    ("좋음", "Good"),
    ("보통", "Normal"),
    ("나쁨", "Bad"),
    ("최악", "Worst"),
];

/// Maps a total score to grade 0 (best) … 4 (worst). Labels come from the same table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradingService {
    cutoffs: GradeCutoffs,
}

impl GradingService {
    pub fn new(cutoffs: GradeCutoffs) -> Result<Self, ScoringConfigError> {
        cutoffs.validate()?;
        Ok(Self { cutoffs })
    }

    pub fn from_score(&self, score: f64) -> u8 {
        let GradeCutoffs {
            best,
            good,
            normal,
            bad,
        } = self.cutoffs;
        if score >= best {
            0
        } else if score >= good {
            1
        } else if score >= normal {
            2
        } else if score >= bad {
            3
        } else {
            4
        }
    }

    pub fn label(&self, grade: u8) -> GradeLabel {
        let (ko, en) = LABELS[usize::from(grade.min(4))];
        GradeLabel {
            ko: ko.to_string(),
            en: en.to_string(),
        }
    }
}
