use super::config::ScoringConfig;

/// Sign of each half plus the resulting cross-verification adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CrossVerdict {
    pub saju_positive: bool,
    pub saju_negative: bool,
    pub astro_positive: bool,
    pub astro_negative: bool,
    pub verified: bool,
    pub bonus: f64,
}

pub(crate) fn decide_cross_bonus(
    saju_score: f64,
    astro_score: f64,
    elements_aligned: bool,
    config: &ScoringConfig,
) -> CrossVerdict {
    let saju_positive = saju_score > config.positive_threshold;
    let saju_negative = saju_score < config.negative_threshold;
    let astro_positive = astro_score > config.positive_threshold;
    let astro_negative = astro_score < config.negative_threshold;

    let (bonus, verified) = if saju_positive && astro_positive {
        (config.both_positive_bonus, true)
    } else if saju_negative && astro_negative {
        (config.both_negative_penalty, false)
    } else if elements_aligned {
        (config.element_align_bonus, false)
    } else {
        (0.0, false)
    };

    CrossVerdict {
        saju_positive,
        saju_negative,
        astro_positive,
        astro_negative,
        verified,
        bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_in_either_direction_moves_the_total() {
        let config = ScoringConfig::default();

        let up = decide_cross_bonus(30.0, 26.0, false, &config);
        assert!(up.verified);
        assert_eq!(up.bonus, 3.0);

        let down = decide_cross_bonus(15.0, 19.9, true, &config);
        assert!(!down.verified);
        assert_eq!(down.bonus, -3.0);
    }

    #[test]
    fn thresholds_are_strict() {
        let config = ScoringConfig::default();
        let edge = decide_cross_bonus(25.0, 20.0, false, &config);
        assert!(!edge.saju_positive && !edge.saju_negative);
        assert!(!edge.astro_positive && !edge.astro_negative);
        assert_eq!(edge.bonus, 0.0);
    }

    #[test]
    fn element_alignment_only_helps_mixed_days() {
        let config = ScoringConfig::default();
        assert_eq!(decide_cross_bonus(30.0, 18.0, true, &config).bonus, 1.0);
        assert_eq!(decide_cross_bonus(22.0, 22.0, true, &config).bonus, 1.0);
        assert_eq!(decide_cross_bonus(22.0, 22.0, false, &config).bonus, 0.0);
        assert_eq!(decide_cross_bonus(30.0, 30.0, true, &config).bonus, 3.0);
    }
}
