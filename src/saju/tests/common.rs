use crate::saju::options::{RelationOptions, DEFAULT_RELATION_OPTIONS};
use crate::saju::relations::{analyze_relations, FourPillars, RelationFact, RelationKind};

pub(super) fn chart(year: &str, month: &str, day: &str, time: &str) -> FourPillars {
    FourPillars::from_ganzhi(year, month, day, time)
}

pub(super) fn analyze(pillars: &FourPillars) -> Vec<RelationFact> {
    analyze_relations(pillars, &DEFAULT_RELATION_OPTIONS)
}

pub(super) fn analyze_with(pillars: &FourPillars, options: RelationOptions) -> Vec<RelationFact> {
    analyze_relations(pillars, &options)
}

pub(super) fn of_kind(facts: &[RelationFact], kind: RelationKind) -> Vec<&RelationFact> {
    facts.iter().filter(|fact| fact.kind == kind).collect()
}

pub(super) fn details(facts: &[RelationFact], kind: RelationKind) -> Vec<String> {
    of_kind(facts, kind)
        .into_iter()
        .map(|fact| fact.detail.clone())
        .collect()
}

/// A handful of charts that exercise most relation families between them.
pub(super) fn sample_charts() -> Vec<FourPillars> {
    vec![
        chart("甲子", "己丑", "丙寅", "丁卯"),
        chart("庚申", "甲子", "壬辰", "丙午"),
        chart("戊辰", "辛酉", "甲午", "癸亥"),
        chart("丙寅", "癸巳", "庚申", "乙亥"),
        chart("乙丑", "丙戌", "丁未", "壬子"),
        chart("辛亥", "壬辰", "癸酉", "甲午"),
        chart("갑자", "병자", "무오", "경신"),
        chart("", "", "甲子", ""),
    ]
}
