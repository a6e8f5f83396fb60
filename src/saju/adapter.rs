//! Bridge from the upstream chart model, where every stem and branch is an object carrying
//! a `name`, into the flat pillar strings the analyzer reads.

use super::options::{RelationOptions, RelationOptionsOverride, DEFAULT_RELATION_OPTIONS};
use super::relations::{FourPillars, PillarInput};
use super::symbols::{normalize_branch_name, normalize_stem_name};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedSymbol {
    pub name: String,
}

impl NamedSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpstreamPillar {
    #[serde(alias = "stem")]
    pub heavenly_stem: Option<NamedSymbol>,
    #[serde(alias = "branch")]
    pub earthly_branch: Option<NamedSymbol>,
}

impl UpstreamPillar {
    pub fn new(stem: &str, branch: &str) -> Self {
        Self {
            heavenly_stem: Some(NamedSymbol::new(stem)),
            earthly_branch: Some(NamedSymbol::new(branch)),
        }
    }

    fn stem_name(&self) -> &str {
        self.heavenly_stem.as_ref().map_or("", |symbol| symbol.name.as_str())
    }

    fn branch_name(&self) -> &str {
        self.earthly_branch.as_ref().map_or("", |symbol| symbol.name.as_str())
    }

    fn flatten(&self) -> PillarInput {
        PillarInput::new(
            normalize_stem_name(self.stem_name()),
            normalize_branch_name(self.branch_name()),
        )
    }
}

/// Upstream chart. The hour pillar is commonly absent when the birth time is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SajuPillars {
    pub year: Option<UpstreamPillar>,
    pub month: Option<UpstreamPillar>,
    pub day: Option<UpstreamPillar>,
    pub time: Option<UpstreamPillar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeInput {
    pub pillars: FourPillars,
    pub options: RelationOptions,
}

/// Flattens an upstream chart. `day_master_stem` fills the day stem when the chart leaves it blank.
pub fn to_analyze_input_from_saju(
    saju: &SajuPillars,
    day_master_stem: Option<&str>,
    options: Option<&RelationOptionsOverride>,
) -> AnalyzeInput {
    let flatten = |pillar: &Option<UpstreamPillar>| {
        pillar.as_ref().map(UpstreamPillar::flatten).unwrap_or_default()
    };

    let mut day = flatten(&saju.day);
    if day.stem.is_empty() {
        if let Some(stem) = day_master_stem {
            day.stem = normalize_stem_name(stem);
        }
    }

    AnalyzeInput {
        pillars: FourPillars::new(flatten(&saju.year), flatten(&saju.month), day, flatten(&saju.time)),
        options: options
            .map(|overrides| overrides.apply(DEFAULT_RELATION_OPTIONS))
            .unwrap_or(DEFAULT_RELATION_OPTIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saju::options::GongmangPolicy;

    #[test]
    fn flattens_named_symbols_and_normalizes_script() {
        let saju = SajuPillars {
            year: Some(UpstreamPillar::new("갑", "자")),
            month: Some(UpstreamPillar::new("己", "丑")),
            day: Some(UpstreamPillar::new(" 병 ", "인")),
            time: None,
        };
        let input = to_analyze_input_from_saju(&saju, None, None);
        assert_eq!(input.pillars.year, PillarInput::new("甲", "子"));
        assert_eq!(input.pillars.day, PillarInput::new("丙", "寅"));
        assert_eq!(input.pillars.time, PillarInput::default());
        assert_eq!(input.options, DEFAULT_RELATION_OPTIONS);
    }

    #[test]
    fn day_master_fills_missing_day_stem_only() {
        let saju = SajuPillars {
            day: Some(UpstreamPillar {
                heavenly_stem: None,
                earthly_branch: Some(NamedSymbol::new("午")),
            }),
            ..Default::default()
        };
        let input = to_analyze_input_from_saju(&saju, Some("임"), None);
        assert_eq!(input.pillars.day, PillarInput::new("壬", "午"));

        let saju = SajuPillars {
            day: Some(UpstreamPillar::new("甲", "午")),
            ..Default::default()
        };
        let input = to_analyze_input_from_saju(&saju, Some("壬"), None);
        assert_eq!(input.pillars.day.stem, "甲");
    }

    #[test]
    fn overrides_merge_onto_defaults() {
        let overrides = RelationOptionsOverride {
            gongmang_policy: Some(GongmangPolicy::DayMasterBasic),
            ..Default::default()
        };
        let input = to_analyze_input_from_saju(&SajuPillars::default(), None, Some(&overrides));
        assert_eq!(input.options.gongmang_policy, GongmangPolicy::DayMasterBasic);
        assert!(input.options.include_heavenly);
    }

    #[test]
    fn upstream_json_accepts_short_field_names() {
        let saju: SajuPillars = serde_json::from_str(
            r#"{"year":{"stem":{"name":"甲"},"branch":{"name":"자"}},"day":{"heavenlyStem":{"name":"丙"}}}"#,
        )
        .expect("upstream chart parses");
        let input = to_analyze_input_from_saju(&saju, None, None);
        assert_eq!(input.pillars.year, PillarInput::new("甲", "子"));
        assert_eq!(input.pillars.day, PillarInput::new("丙", ""));
    }
}
