use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convention used to locate the two void (空亡) branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GongmangPolicy {
    /// Decade (旬) of the day pillar in the sixty-term cycle.
    #[serde(rename = "dayPillar-60jiazi")]
    DayPillar60Jiazi,
    /// Day stem alone.
    #[serde(rename = "dayMaster-basic")]
    DayMasterBasic,
    /// Year stem alone.
    #[serde(rename = "yearPillar-basic")]
    YearPillarBasic,
}

impl GongmangPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            GongmangPolicy::DayPillar60Jiazi => "dayPillar-60jiazi",
            GongmangPolicy::DayMasterBasic => "dayMaster-basic",
            GongmangPolicy::YearPillarBasic => "yearPillar-basic",
        }
    }
}

impl FromStr for GongmangPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dayPillar-60jiazi" => Ok(GongmangPolicy::DayPillar60Jiazi),
            "dayMaster-basic" => Ok(GongmangPolicy::DayMasterBasic),
            "yearPillar-basic" => Ok(GongmangPolicy::YearPillarBasic),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Number of stem pairs treated as 천간충.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeavenlyClashMode {
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "10")]
    Ten,
}

impl HeavenlyClashMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HeavenlyClashMode::Four => "4",
            HeavenlyClashMode::Five => "5",
            HeavenlyClashMode::Ten => "10",
        }
    }
}

impl FromStr for HeavenlyClashMode {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "4" => Ok(HeavenlyClashMode::Four),
            "5" => Ok(HeavenlyClashMode::Five),
            "10" => Ok(HeavenlyClashMode::Ten),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown policy value '{}'", self.0)
    }
}

impl std::error::Error for UnknownPolicy {}

/// Toggles controlling which relation families the analyzer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationOptions {
    pub include_heavenly: bool,
    pub include_earthly: bool,
    pub include_heavenly_transform_note: bool,
    pub include_earthly_transform_note: bool,
    pub include_self_punish: bool,
    pub include_gongmang: bool,
    pub gongmang_policy: GongmangPolicy,
    pub heavenly_clash_mode: HeavenlyClashMode,
}

pub const DEFAULT_RELATION_OPTIONS: RelationOptions = RelationOptions {
    include_heavenly: true,
    include_earthly: true,
    include_heavenly_transform_note: true,
    include_earthly_transform_note: true,
    include_self_punish: true,
    include_gongmang: true,
    gongmang_policy: GongmangPolicy::DayPillar60Jiazi,
    heavenly_clash_mode: HeavenlyClashMode::Five,
};

impl Default for RelationOptions {
    fn default() -> Self {
        DEFAULT_RELATION_OPTIONS
    }
}

impl RelationOptions {
    /// Returns a copy with every field set in `overrides` replacing the current value.
    pub fn merged(self, overrides: &RelationOptionsOverride) -> Self {
        overrides.apply(self)
    }
}

/// Caller-supplied partial options; absent fields keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationOptionsOverride {
    pub include_heavenly: Option<bool>,
    pub include_earthly: Option<bool>,
    pub include_heavenly_transform_note: Option<bool>,
    pub include_earthly_transform_note: Option<bool>,
    pub include_self_punish: Option<bool>,
    pub include_gongmang: Option<bool>,
    pub gongmang_policy: Option<GongmangPolicy>,
    pub heavenly_clash_mode: Option<HeavenlyClashMode>,
}

impl RelationOptionsOverride {
    pub fn apply(&self, base: RelationOptions) -> RelationOptions {
        RelationOptions {
            include_heavenly: self.include_heavenly.unwrap_or(base.include_heavenly),
            include_earthly: self.include_earthly.unwrap_or(base.include_earthly),
            include_heavenly_transform_note: self
                .include_heavenly_transform_note
                .unwrap_or(base.include_heavenly_transform_note),
            include_earthly_transform_note: self
                .include_earthly_transform_note
                .unwrap_or(base.include_earthly_transform_note),
            include_self_punish: self.include_self_punish.unwrap_or(base.include_self_punish),
            include_gongmang: self.include_gongmang.unwrap_or(base.include_gongmang),
            gongmang_policy: self.gongmang_policy.unwrap_or(base.gongmang_policy),
            heavenly_clash_mode: self.heavenly_clash_mode.unwrap_or(base.heavenly_clash_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let options = RelationOptions::default();
        assert!(options.include_heavenly && options.include_earthly);
        assert!(options.include_self_punish && options.include_gongmang);
        assert_eq!(options.gongmang_policy, GongmangPolicy::DayPillar60Jiazi);
        assert_eq!(options.heavenly_clash_mode, HeavenlyClashMode::Five);
    }

    #[test]
    fn override_only_touches_supplied_fields() {
        let overrides = RelationOptionsOverride {
            include_gongmang: Some(false),
            heavenly_clash_mode: Some(HeavenlyClashMode::Four),
            ..Default::default()
        };
        let merged = DEFAULT_RELATION_OPTIONS.merged(&overrides);
        assert!(!merged.include_gongmang);
        assert_eq!(merged.heavenly_clash_mode, HeavenlyClashMode::Four);
        assert!(merged.include_heavenly);
        assert_eq!(merged.gongmang_policy, GongmangPolicy::DayPillar60Jiazi);
    }

    #[test]
    fn partial_json_deserializes_into_override() {
        let overrides: RelationOptionsOverride =
            serde_json::from_str(r#"{"gongmangPolicy":"yearPillar-basic","heavenlyClashMode":"10"}"#)
                .expect("override parses");
        assert_eq!(overrides.gongmang_policy, Some(GongmangPolicy::YearPillarBasic));
        assert_eq!(overrides.heavenly_clash_mode, Some(HeavenlyClashMode::Ten));
        assert_eq!(overrides.include_heavenly, None);
    }

    #[test]
    fn policy_strings_round_trip_through_from_str() {
        for policy in [
            GongmangPolicy::DayPillar60Jiazi,
            GongmangPolicy::DayMasterBasic,
            GongmangPolicy::YearPillarBasic,
        ] {
            assert_eq!(policy.as_str().parse::<GongmangPolicy>(), Ok(policy));
        }
        assert!("weekly".parse::<GongmangPolicy>().is_err());
        assert!("7".parse::<HeavenlyClashMode>().is_err());
    }
}
