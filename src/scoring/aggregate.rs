use super::astro::{self, AstroScoreInput};
use super::grade::GradeLabel;
use super::saju::{self, SajuScoreInput};
use super::weights::ScoreCategory;
use serde::{Deserialize, Serialize};

/// Normalized score of every category, each within `[0, category max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub daeun: f64,
    pub seun: f64,
    pub wolun: f64,
    pub iljin: f64,
    pub yongsin: f64,
    pub transit_sun: f64,
    pub transit_moon: f64,
    pub major_planets: f64,
    pub lunar_phase: f64,
    pub solar_return: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Daeun => self.daeun,
            ScoreCategory::Seun => self.seun,
            ScoreCategory::Wolun => self.wolun,
            ScoreCategory::Iljin => self.iljin,
            ScoreCategory::Yongsin => self.yongsin,
            ScoreCategory::TransitSun => self.transit_sun,
            ScoreCategory::TransitMoon => self.transit_moon,
            ScoreCategory::MajorPlanets => self.major_planets,
            ScoreCategory::LunarPhase => self.lunar_phase,
            ScoreCategory::SolarReturn => self.solar_return,
        }
    }

    pub fn saju_sum(&self) -> f64 {
        ScoreCategory::SAJU.iter().map(|category| self.get(*category)).sum()
    }

    pub fn astro_sum(&self) -> f64 {
        ScoreCategory::ASTRO.iter().map(|category| self.get(*category)).sum()
    }

    /// Share (0–100) of leaning categories that lean the majority way.
    pub fn agreement_percent(&self) -> u8 {
        let (positive, negative) = ScoreCategory::all().fold((0u32, 0u32), |(pos, neg), category| {
            let score = self.get(category);
            let midpoint = category.midpoint();
            if score > midpoint {
                (pos + 1, neg)
            } else if score < midpoint {
                (pos, neg + 1)
            } else {
                (pos, neg)
            }
        });
        let leaning = positive + negative;
        if leaning == 0 {
            return 0;
        }
        let percent = (100.0 * f64::from(positive.max(negative)) / f64::from(leaning)).round();
        percent as u8
    }
}

/// Additive astrology adjustments outside the normalized categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstroDeltas {
    pub outer_planets: f64,
    pub special_points: f64,
    pub eclipse: f64,
}

impl AstroDeltas {
    pub fn total(&self) -> f64 {
        self.outer_planets + self.special_points + self.eclipse
    }
}

/// One evaluation. Built once per call and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub saju_score: f64,
    pub astro_score: f64,
    pub cross_bonus: f64,
    pub total_score: f64,
    pub grade: u8,
    pub label: GradeLabel,
    pub breakdown: ScoreBreakdown,
    pub astro_deltas: AstroDeltas,
    pub saju_positive: bool,
    pub saju_negative: bool,
    pub astro_positive: bool,
    pub astro_negative: bool,
    pub cross_verified: bool,
    pub cross_agreement_percent: u8,
}

pub(crate) fn score_categories(
    saju_input: &SajuScoreInput,
    astro_input: &AstroScoreInput,
) -> (ScoreBreakdown, AstroDeltas) {
    let breakdown = ScoreBreakdown {
        daeun: saju::score_daeun(&saju_input.daeun),
        seun: saju::score_seun(&saju_input.seun),
        wolun: saju::score_wolun(&saju_input.wolun),
        iljin: saju::score_iljin(&saju_input.iljin),
        yongsin: saju::score_yongsin(&saju_input.yongsin),
        transit_sun: astro::score_transit_sun(&astro_input.transit_sun),
        transit_moon: astro::score_transit_moon(&astro_input.transit_moon),
        major_planets: astro::score_major_planets(&astro_input.major_planets),
        lunar_phase: astro::score_lunar_phase(&astro_input.lunar_phase),
        solar_return: astro::score_solar_return(&astro_input.solar_return),
    };
    let deltas = AstroDeltas {
        outer_planets: astro::outer_planets_delta(&astro_input.outer_planets),
        special_points: astro::special_points_delta(&astro_input.special_points),
        eclipse: astro::eclipse_delta(&astro_input.eclipse),
    };
    (breakdown, deltas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midpoints() -> ScoreBreakdown {
        let (breakdown, _) =
            score_categories(&SajuScoreInput::default(), &AstroScoreInput::default());
        breakdown
    }

    #[test]
    fn neutral_breakdown_has_no_agreement() {
        let breakdown = midpoints();
        assert_eq!(breakdown.saju_sum(), 25.0);
        assert_eq!(breakdown.astro_sum(), 25.0);
        assert_eq!(breakdown.agreement_percent(), 0);
    }

    #[test]
    fn agreement_counts_the_majority_lean() {
        let mut breakdown = midpoints();
        breakdown.daeun = 8.0;
        breakdown.seun = 10.0;
        breakdown.transit_sun = 9.0;
        breakdown.lunar_phase = 1.0;
        assert_eq!(breakdown.agreement_percent(), 75);

        breakdown.lunar_phase = 4.0;
        assert_eq!(breakdown.agreement_percent(), 100);
    }
}
