use super::normalize::{calculate_adjusted_score, clamp_raw, normalize_to_category};
use super::weights::*;
use crate::saju::{Element, RelationFlags};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ten-god family of the period's stem relative to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SibsinGroup {
    Bigeop,
    Siksang,
    Jaeseong,
    Gwanseong,
    Inseong,
}

impl SibsinGroup {
    fn weight(self) -> f64 {
        match self {
            SibsinGroup::Inseong => 0.2,
            SibsinGroup::Jaeseong => 0.15,
            SibsinGroup::Siksang => 0.1,
            SibsinGroup::Gwanseong => 0.05,
            SibsinGroup::Bigeop => -0.05,
        }
    }
}

/// Role of the period element in the chart's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YongsinRelation {
    Yongsin,
    Huisin,
    Hansin,
    Gusin,
    Gisin,
}

impl YongsinRelation {
    fn weight(self) -> f64 {
        match self {
            YongsinRelation::Yongsin => 0.3,
            YongsinRelation::Huisin => 0.15,
            YongsinRelation::Hansin => 0.0,
            YongsinRelation::Gusin => -0.15,
            YongsinRelation::Gisin => -0.3,
        }
    }
}

/// Flags every period granularity shares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeriodFlags {
    pub sibsin: Option<SibsinGroup>,
    pub has_yukhap: bool,
    pub has_samhap: bool,
    pub has_chung: bool,
    pub has_hyeong: bool,
    pub is_yongsin_element: bool,
    pub is_gisin_element: bool,
}

impl PeriodFlags {
    fn tally(&self, tally: &mut Tally) {
        if let Some(sibsin) = self.sibsin {
            tally.add(sibsin.weight());
        }
        tally.add_if(self.has_yukhap, YUKHAP);
        tally.add_if(self.has_samhap, SAMHAP);
        tally.add_if(self.has_chung, CHUNG);
        tally.add_if(self.has_hyeong, HYEONG);
        tally.add_if(self.is_yongsin_element, YONGSIN_ELEMENT);
        tally.add_if(self.is_gisin_element, GISIN_ELEMENT);
    }
}

/// 대운: ten-year luck period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DaeunInput {
    #[serde(flatten)]
    pub period: PeriodFlags,
}

/// 세운: the year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeunInput {
    #[serde(flatten)]
    pub period: PeriodFlags,
    pub has_samjae: bool,
    pub has_gwiin: bool,
}

/// 월운: the month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WolunInput {
    #[serde(flatten)]
    pub period: PeriodFlags,
    pub has_pa: bool,
    pub has_hae: bool,
}

/// 일진: the day itself, usually filled from the day's relation facts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IljinInput {
    pub sibsin: Option<SibsinGroup>,
    pub has_stem_combine: bool,
    pub has_stem_clash: bool,
    pub has_yukhap: bool,
    pub has_samhap: bool,
    pub has_banhap: bool,
    pub has_chung: bool,
    pub has_hyeong: bool,
    pub has_pa: bool,
    pub has_hae: bool,
    pub has_wonjin: bool,
    pub has_gongmang: bool,
    pub has_cheoneul_gwiin: bool,
    pub has_taegeuk_gwiin: bool,
    pub has_cheondeok_gwiin: bool,
    pub has_woldeok_gwiin: bool,
    pub has_munchang_gwiin: bool,
    pub is_yongsin_element: bool,
    pub is_gisin_element: bool,
    /// Fine adjustment applied after normalization.
    pub adjustment: Option<f64>,
}

impl IljinInput {
    /// Raises every relation flag present in `flags`; flags already set stay set.
    pub fn with_relation_flags(mut self, flags: &RelationFlags) -> Self {
        self.has_stem_combine |= flags.has_stem_combine;
        self.has_stem_clash |= flags.has_stem_clash;
        self.has_yukhap |= flags.has_yukhap;
        self.has_samhap |= flags.has_samhap;
        self.has_banhap |= flags.has_banhap;
        self.has_chung |= flags.has_chung;
        self.has_hyeong |= flags.has_hyeong;
        self.has_pa |= flags.has_pa;
        self.has_hae |= flags.has_hae;
        self.has_wonjin |= flags.has_wonjin;
        self.has_gongmang |= flags.has_gongmang;
        self
    }

    fn gwiin_total(&self) -> f64 {
        [
            (self.has_cheoneul_gwiin, GWIIN_CHEONEUL),
            (self.has_taegeuk_gwiin, GWIIN_TAEGEUK),
            (self.has_cheondeok_gwiin, GWIIN_CHEONDEOK),
            (self.has_woldeok_gwiin, GWIIN_WOLDEOK),
            (self.has_munchang_gwiin, GWIIN_MUNCHANG),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, weight)| weight)
        .sum()
    }
}

/// 용신: how the period treats the chart's beneficial element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YongsinInput {
    pub relation: Option<YongsinRelation>,
    /// The chart's beneficial element; read by cross-verification, not scored here.
    pub yongsin_element: Option<Element>,
    pub has_seasonal_support: bool,
    pub has_element_overload: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SajuScoreInput {
    pub daeun: DaeunInput,
    pub seun: SeunInput,
    pub wolun: WolunInput,
    pub iljin: IljinInput,
    pub yongsin: YongsinInput,
}

#[derive(Debug, Default)]
pub(crate) struct Tally {
    raw: f64,
}

impl Tally {
    pub(crate) fn add(&mut self, weight: f64) {
        self.raw += weight;
    }

    pub(crate) fn add_if(&mut self, present: bool, weight: f64) {
        if present {
            self.raw += weight;
        }
    }

    pub(crate) fn finish(self, category: ScoreCategory) -> f64 {
        let max_raw = category.max_raw();
        let raw = clamp_raw(self.raw, max_raw);
        let score = normalize_to_category(raw, max_raw, category.max());
        debug!(category = category.as_str(), raw = self.raw, clamped = raw, score, "category scored");
        score
    }
}

pub fn score_daeun(input: &DaeunInput) -> f64 {
    let mut tally = Tally::default();
    input.period.tally(&mut tally);
    tally.finish(ScoreCategory::Daeun)
}

pub fn score_seun(input: &SeunInput) -> f64 {
    let mut tally = Tally::default();
    input.period.tally(&mut tally);
    tally.add_if(input.has_gwiin, SEUN_GWIIN);

    if input.has_samjae {
        // Gwiin outranks chung when both accompany samjae.
        let samjae = if input.has_gwiin {
            SAMJAE_BASE + SAMJAE_GWIIN_OFFSET
        } else if input.period.has_chung {
            SAMJAE_BASE + SAMJAE_CHUNG_EXTRA
        } else {
            SAMJAE_BASE
        };
        tally.add(samjae);
    }

    tally.finish(ScoreCategory::Seun)
}

pub fn score_wolun(input: &WolunInput) -> f64 {
    let mut tally = Tally::default();
    input.period.tally(&mut tally);
    tally.add_if(input.has_pa, WOLUN_PA);
    tally.add_if(input.has_hae, WOLUN_HAE);
    tally.finish(ScoreCategory::Wolun)
}

pub fn score_iljin(input: &IljinInput) -> f64 {
    let mut tally = Tally::default();
    if let Some(sibsin) = input.sibsin {
        tally.add(sibsin.weight());
    }
    tally.add_if(input.has_stem_combine, ILJIN_STEM_COMBINE);
    tally.add_if(input.has_yukhap, ILJIN_YUKHAP);
    tally.add_if(input.has_samhap, ILJIN_SAMHAP);
    tally.add_if(input.has_banhap, ILJIN_BANHAP);
    tally.add_if(input.has_stem_clash, ILJIN_STEM_CLASH);
    tally.add_if(input.has_chung, ILJIN_CHUNG);
    tally.add_if(input.has_hyeong, ILJIN_HYEONG);
    tally.add_if(input.has_pa, ILJIN_PA);
    tally.add_if(input.has_hae, ILJIN_HAE);
    tally.add_if(input.has_wonjin, ILJIN_WONJIN);
    tally.add_if(input.has_gongmang, ILJIN_GONGMANG);
    tally.add(input.gwiin_total());
    tally.add_if(input.is_yongsin_element, YONGSIN_ELEMENT);
    tally.add_if(input.is_gisin_element, GISIN_ELEMENT);

    let category = ScoreCategory::Iljin;
    let score = tally.finish(category);
    match input.adjustment {
        Some(adjustment) => calculate_adjusted_score(score, adjustment, category.max()),
        None => score,
    }
}

pub fn score_yongsin(input: &YongsinInput) -> f64 {
    let mut tally = Tally::default();
    if let Some(relation) = input.relation {
        tally.add(relation.weight());
    }
    tally.add_if(input.has_seasonal_support, SEASONAL_SUPPORT);
    tally.add_if(input.has_element_overload, ELEMENT_OVERLOAD);
    tally.finish(ScoreCategory::Yongsin)
}
