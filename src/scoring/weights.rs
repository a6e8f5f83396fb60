//! Category ceilings and signed point tables shared by the calculators.

use serde::{Deserialize, Serialize};

/// The ten scored categories. The first five make up the saju half, the rest the astrology half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    Daeun,
    Seun,
    Wolun,
    Iljin,
    Yongsin,
    TransitSun,
    TransitMoon,
    MajorPlanets,
    LunarPhase,
    SolarReturn,
}

impl ScoreCategory {
    pub const SAJU: [ScoreCategory; 5] = [
        ScoreCategory::Daeun,
        ScoreCategory::Seun,
        ScoreCategory::Wolun,
        ScoreCategory::Iljin,
        ScoreCategory::Yongsin,
    ];

    pub const ASTRO: [ScoreCategory; 5] = [
        ScoreCategory::TransitSun,
        ScoreCategory::TransitMoon,
        ScoreCategory::MajorPlanets,
        ScoreCategory::LunarPhase,
        ScoreCategory::SolarReturn,
    ];

    pub fn all() -> impl Iterator<Item = ScoreCategory> {
        Self::SAJU.into_iter().chain(Self::ASTRO)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreCategory::Daeun => "daeun",
            ScoreCategory::Seun => "seun",
            ScoreCategory::Wolun => "wolun",
            ScoreCategory::Iljin => "iljin",
            ScoreCategory::Yongsin => "yongsin",
            ScoreCategory::TransitSun => "transitSun",
            ScoreCategory::TransitMoon => "transitMoon",
            ScoreCategory::MajorPlanets => "majorPlanets",
            ScoreCategory::LunarPhase => "lunarPhase",
            ScoreCategory::SolarReturn => "solarReturn",
        }
    }

    /// Ceiling of the normalized category score. Each half sums to 50.
    pub fn max(self) -> f64 {
        match self {
            ScoreCategory::Daeun => 8.0,
            ScoreCategory::Seun => 12.0,
            ScoreCategory::Wolun => 12.0,
            ScoreCategory::Iljin => 13.0,
            ScoreCategory::Yongsin => 5.0,
            ScoreCategory::TransitSun => 10.0,
            ScoreCategory::TransitMoon => 10.0,
            ScoreCategory::MajorPlanets => 15.0,
            ScoreCategory::LunarPhase => 8.0,
            ScoreCategory::SolarReturn => 7.0,
        }
    }

    /// Symmetric bound on the raw contribution sum.
    pub fn max_raw(self) -> f64 {
        match self {
            ScoreCategory::Daeun => 0.5,
            ScoreCategory::Seun => 0.6,
            ScoreCategory::Wolun => 0.6,
            ScoreCategory::Iljin => 0.7,
            ScoreCategory::Yongsin => 0.5,
            ScoreCategory::TransitSun => 0.5,
            ScoreCategory::TransitMoon => 0.5,
            ScoreCategory::MajorPlanets => 0.8,
            ScoreCategory::LunarPhase => 0.4,
            ScoreCategory::SolarReturn => 0.5,
        }
    }

    pub fn midpoint(self) -> f64 {
        self.max() / 2.0
    }
}

// Period relation flags shared by daeun, seun, wolun.
pub(crate) const YUKHAP: f64 = 0.15;
pub(crate) const SAMHAP: f64 = 0.2;
pub(crate) const CHUNG: f64 = -0.25;
pub(crate) const HYEONG: f64 = -0.15;
pub(crate) const YONGSIN_ELEMENT: f64 = 0.2;
pub(crate) const GISIN_ELEMENT: f64 = -0.2;

// Seun.
pub(crate) const SEUN_GWIIN: f64 = 0.15;
pub(crate) const SAMJAE_BASE: f64 = -0.2;
pub(crate) const SAMJAE_GWIIN_OFFSET: f64 = 0.25;
pub(crate) const SAMJAE_CHUNG_EXTRA: f64 = -0.15;

// Wolun.
pub(crate) const WOLUN_PA: f64 = -0.05;
pub(crate) const WOLUN_HAE: f64 = -0.05;

// Iljin.
pub(crate) const ILJIN_STEM_COMBINE: f64 = 0.1;
pub(crate) const ILJIN_YUKHAP: f64 = 0.15;
pub(crate) const ILJIN_SAMHAP: f64 = 0.2;
pub(crate) const ILJIN_BANHAP: f64 = 0.1;
pub(crate) const ILJIN_STEM_CLASH: f64 = -0.1;
pub(crate) const ILJIN_CHUNG: f64 = -0.3;
pub(crate) const ILJIN_HYEONG: f64 = -0.2;
pub(crate) const ILJIN_PA: f64 = -0.1;
pub(crate) const ILJIN_HAE: f64 = -0.1;
pub(crate) const ILJIN_WONJIN: f64 = -0.1;
pub(crate) const ILJIN_GONGMANG: f64 = -0.15;
pub(crate) const GWIIN_CHEONEUL: f64 = 0.3;
pub(crate) const GWIIN_TAEGEUK: f64 = 0.2;
pub(crate) const GWIIN_CHEONDEOK: f64 = 0.2;
pub(crate) const GWIIN_WOLDEOK: f64 = 0.2;
pub(crate) const GWIIN_MUNCHANG: f64 = 0.15;

// Yongsin.
pub(crate) const SEASONAL_SUPPORT: f64 = 0.1;
pub(crate) const ELEMENT_OVERLOAD: f64 = -0.1;

// Astrology.
pub(crate) const MOON_VOID_OF_COURSE: f64 = -0.15;
pub(crate) const PROGRESSION_SUPPORT: f64 = 0.15;
pub(crate) const PROGRESSION_CHALLENGE: f64 = -0.15;
pub(crate) const OUTER_PLANETS_LIMIT: f64 = 3.0;
pub(crate) const SPECIAL_POINTS_LIMIT: f64 = 2.0;
pub(crate) const SOLAR_ECLIPSE: f64 = 2.0;
pub(crate) const LUNAR_ECLIPSE: f64 = 1.0;
pub(crate) const ECLIPSE_NATAL_HIT: f64 = 0.5;
