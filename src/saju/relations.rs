use super::gongmang;
use super::options::{RelationOptions, DEFAULT_RELATION_OPTIONS};
use super::symbols::{Branch, Pillar, PillarPosition, Stem};
use super::tables::{
    pair_matches, stem_clashes, BRANCH_BREAKS, BRANCH_CLASHES, BRANCH_HARMS,
    BRANCH_SIX_COMBINES, BRANCH_YUANJIN, PUNISHMENT_PAIR, PUNISHMENT_TRIPLES, SELF_PUNISHMENTS,
    STEM_COMBINES, THREE_HARMONIES,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Stem and branch text for one pillar, as supplied by the calendrical collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PillarInput {
    pub stem: String,
    pub branch: String,
}

impl PillarInput {
    pub fn new(stem: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            branch: branch.into(),
        }
    }

    /// Splits a two-character pillar such as `甲子` or `갑자`.
    pub fn from_ganzhi(value: &str) -> Self {
        let mut chars = value.trim().chars();
        let stem = chars.next().map(String::from).unwrap_or_default();
        let branch: String = chars.collect();
        Self { stem, branch }
    }

    pub fn is_empty(&self) -> bool {
        self.stem.trim().is_empty() && self.branch.trim().is_empty()
    }

    /// True when both halves name a known symbol.
    pub fn is_recognized(&self) -> bool {
        let pillar = self.parse();
        pillar.stem.is_some() && pillar.branch.is_some()
    }

    fn parse(&self) -> Pillar {
        Pillar::parse(&self.stem, &self.branch)
    }
}

/// Year, month, day, and time pillars. Any stem may sit with any branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FourPillars {
    pub year: PillarInput,
    pub month: PillarInput,
    pub day: PillarInput,
    pub time: PillarInput,
}

impl FourPillars {
    pub fn new(year: PillarInput, month: PillarInput, day: PillarInput, time: PillarInput) -> Self {
        Self {
            year,
            month,
            day,
            time,
        }
    }

    /// Builds the chart from four two-character pillars in year, month, day, time order.
    pub fn from_ganzhi(year: &str, month: &str, day: &str, time: &str) -> Self {
        Self::new(
            PillarInput::from_ganzhi(year),
            PillarInput::from_ganzhi(month),
            PillarInput::from_ganzhi(day),
            PillarInput::from_ganzhi(time),
        )
    }

    pub fn get(&self, position: PillarPosition) -> &PillarInput {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Time => &self.time,
        }
    }

    pub(crate) fn parsed(&self) -> [Pillar; 4] {
        let parsed = PillarPosition::ordered().map(|position| self.get(position).parse());
        for (position, pillar) in PillarPosition::ordered().iter().zip(parsed.iter()) {
            let raw = self.get(*position);
            if pillar.stem.is_none() && !raw.stem.trim().is_empty() {
                warn!(?position, stem = %raw.stem, "unrecognized stem ignored");
            }
            if pillar.branch.is_none() && !raw.branch.trim().is_empty() {
                warn!(?position, branch = %raw.branch, "unrecognized branch ignored");
            }
        }
        parsed
    }
}

/// Relation family reported by the analyzer. Serialized with the Korean label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    #[serde(rename = "천간합")]
    StemCombine,
    #[serde(rename = "천간충")]
    StemClash,
    #[serde(rename = "지지육합")]
    BranchSixCombine,
    #[serde(rename = "지지충")]
    BranchClash,
    #[serde(rename = "지지형")]
    BranchPunishment,
    #[serde(rename = "지지파")]
    BranchBreak,
    #[serde(rename = "지지해")]
    BranchHarm,
    #[serde(rename = "원진")]
    Yuanjin,
    #[serde(rename = "지지삼합")]
    ThreeHarmony,
    #[serde(rename = "지지방합")]
    HalfHarmony,
    #[serde(rename = "공망")]
    Gongmang,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::StemCombine => "천간합",
            RelationKind::StemClash => "천간충",
            RelationKind::BranchSixCombine => "지지육합",
            RelationKind::BranchClash => "지지충",
            RelationKind::BranchPunishment => "지지형",
            RelationKind::BranchBreak => "지지파",
            RelationKind::BranchHarm => "지지해",
            RelationKind::Yuanjin => "원진",
            RelationKind::ThreeHarmony => "지지삼합",
            RelationKind::HalfHarmony => "지지방합",
            RelationKind::Gongmang => "공망",
        }
    }
}

/// One detected relation between pillars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationFact {
    pub kind: RelationKind,
    pub pillars: Vec<PillarPosition>,
    pub detail: String,
}

impl RelationFact {
    pub(crate) fn new(kind: RelationKind, pillars: Vec<PillarPosition>, detail: String) -> Self {
        Self {
            kind,
            pillars,
            detail,
        }
    }
}

/// Total order used for analyzer output: kind, pillar count, detail, then the pillars themselves.
pub fn compare_facts(a: &RelationFact, b: &RelationFact) -> Ordering {
    a.kind
        .as_str()
        .cmp(b.kind.as_str())
        .then(a.pillars.len().cmp(&b.pillars.len()))
        .then_with(|| a.detail.cmp(&b.detail))
        .then_with(|| a.pillars.cmp(&b.pillars))
}

/// Stateless analyzer applying one set of options to any number of charts.
#[derive(Debug, Clone, Copy)]
pub struct RelationAnalyzer {
    options: RelationOptions,
}

impl Default for RelationAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_RELATION_OPTIONS)
    }
}

impl RelationAnalyzer {
    pub fn new(options: RelationOptions) -> Self {
        Self { options }
    }

    pub fn analyze(&self, pillars: &FourPillars) -> Vec<RelationFact> {
        let parsed = pillars.parsed();
        let options = &self.options;
        let mut facts = Vec::new();

        if options.include_heavenly {
            collect_stem_combines(&parsed, options, &mut facts);
            collect_stem_clashes(&parsed, options, &mut facts);
        }

        if options.include_earthly {
            collect_six_combines(&parsed, options, &mut facts);
            collect_pair_table(&parsed, &BRANCH_CLASHES, RelationKind::BranchClash, "충", &mut facts);
            collect_punishments(&parsed, options, &mut facts);
            collect_pair_table(&parsed, &BRANCH_BREAKS, RelationKind::BranchBreak, "파", &mut facts);
            collect_pair_table(&parsed, &BRANCH_HARMS, RelationKind::BranchHarm, "해", &mut facts);
            collect_pair_table(&parsed, &BRANCH_YUANJIN, RelationKind::Yuanjin, "원진", &mut facts);
            collect_harmonies(&parsed, options, &mut facts);
        }

        if options.include_gongmang {
            facts.extend(gongmang::void_facts(&parsed, options.gongmang_policy));
        }

        facts.sort_by(compare_facts);
        debug!(
            facts = facts.len(),
            policy = options.gongmang_policy.as_str(),
            clash_mode = options.heavenly_clash_mode.as_str(),
            "pillar relation analysis complete"
        );
        facts
    }
}

/// Analyzes the four pillars with the given options.
pub fn analyze_relations(pillars: &FourPillars, options: &RelationOptions) -> Vec<RelationFact> {
    RelationAnalyzer::new(*options).analyze(pillars)
}

fn positions() -> [PillarPosition; 4] {
    PillarPosition::ordered()
}

/// Every unordered pair of pillar slots, in (earlier, later) order.
fn pillar_pairs() -> impl Iterator<Item = (usize, usize)> {
    (0..4).flat_map(|i| ((i + 1)..4).map(move |j| (i, j)))
}

fn branch_pairs(parsed: &[Pillar; 4]) -> impl Iterator<Item = (usize, usize, Branch, Branch)> + '_ {
    pillar_pairs().filter_map(move |(i, j)| match (parsed[i].branch, parsed[j].branch) {
        (Some(a), Some(b)) => Some((i, j, a, b)),
        _ => None,
    })
}

fn stem_pairs(parsed: &[Pillar; 4]) -> impl Iterator<Item = (usize, usize, Stem, Stem)> + '_ {
    pillar_pairs().filter_map(move |(i, j)| match (parsed[i].stem, parsed[j].stem) {
        (Some(a), Some(b)) => Some((i, j, a, b)),
        _ => None,
    })
}

fn pair_positions(i: usize, j: usize) -> Vec<PillarPosition> {
    let slots = positions();
    vec![slots[i], slots[j]]
}

fn collect_stem_combines(parsed: &[Pillar; 4], options: &RelationOptions, facts: &mut Vec<RelationFact>) {
    for (i, j, a, b) in stem_pairs(parsed) {
        for (first, second, element) in STEM_COMBINES.iter() {
            if !pair_matches(&(*first, *second), &a, &b) {
                continue;
            }
            let detail = if options.include_heavenly_transform_note {
                format!("{first}-{second} 합화{}", element.label())
            } else {
                format!("{first}-{second} 합")
            };
            facts.push(RelationFact::new(
                RelationKind::StemCombine,
                pair_positions(i, j),
                detail,
            ));
        }
    }
}

fn collect_stem_clashes(parsed: &[Pillar; 4], options: &RelationOptions, facts: &mut Vec<RelationFact>) {
    let table = stem_clashes(options.heavenly_clash_mode);
    for (i, j, a, b) in stem_pairs(parsed) {
        if let Some((first, second)) = table.iter().find(|pair| pair_matches(pair, &a, &b)) {
            facts.push(RelationFact::new(
                RelationKind::StemClash,
                pair_positions(i, j),
                format!("{first}-{second} 충"),
            ));
        }
    }
}

fn collect_six_combines(parsed: &[Pillar; 4], options: &RelationOptions, facts: &mut Vec<RelationFact>) {
    for (i, j, a, b) in branch_pairs(parsed) {
        for (first, second, element) in BRANCH_SIX_COMBINES.iter() {
            if !pair_matches(&(*first, *second), &a, &b) {
                continue;
            }
            let detail = if options.include_earthly_transform_note {
                format!("{first}-{second} 합화{}", element.label())
            } else {
                format!("{first}-{second} 육합")
            };
            facts.push(RelationFact::new(
                RelationKind::BranchSixCombine,
                pair_positions(i, j),
                detail,
            ));
        }
    }
}

fn collect_pair_table(
    parsed: &[Pillar; 4],
    table: &[(Branch, Branch)],
    kind: RelationKind,
    suffix: &str,
    facts: &mut Vec<RelationFact>,
) {
    for (i, j, a, b) in branch_pairs(parsed) {
        if let Some((first, second)) = table.iter().find(|pair| pair_matches(pair, &a, &b)) {
            facts.push(RelationFact::new(
                kind,
                pair_positions(i, j),
                format!("{first}-{second} {suffix}"),
            ));
        }
    }
}

/// Slots whose branch belongs to `set`, plus whether every member of `set` is present.
fn set_coverage(parsed: &[Pillar; 4], set: &[Branch]) -> (Vec<PillarPosition>, bool) {
    let slots = positions();
    let members: Vec<PillarPosition> = (0..4)
        .filter(|idx| parsed[*idx].branch.is_some_and(|branch| set.contains(&branch)))
        .map(|idx| slots[idx])
        .collect();
    let complete = set
        .iter()
        .all(|wanted| parsed.iter().any(|pillar| pillar.branch == Some(*wanted)));
    (members, complete)
}

/// Orders a pair by its position inside `set` so details read in table order.
fn ordered_in_set(set: &[Branch], a: Branch, b: Branch) -> (Branch, Branch) {
    let rank = |branch: Branch| set.iter().position(|member| *member == branch);
    if rank(a) <= rank(b) {
        (a, b)
    } else {
        (b, a)
    }
}

fn join_branches(set: &[Branch]) -> String {
    set.iter()
        .map(|branch| branch.as_str())
        .collect::<Vec<_>>()
        .join("-")
}

fn collect_punishments(parsed: &[Pillar; 4], options: &RelationOptions, facts: &mut Vec<RelationFact>) {
    for triple in PUNISHMENT_TRIPLES.iter() {
        let (members, complete) = set_coverage(parsed, triple);
        if complete {
            facts.push(RelationFact::new(
                RelationKind::BranchPunishment,
                members,
                format!("{} 삼형", join_branches(triple)),
            ));
            continue;
        }

        for (i, j, a, b) in branch_pairs(parsed) {
            if a != b && triple.contains(&a) && triple.contains(&b) {
                let (first, second) = ordered_in_set(triple, a, b);
                facts.push(RelationFact::new(
                    RelationKind::BranchPunishment,
                    pair_positions(i, j),
                    format!("{first}-{second} 형"),
                ));
            }
        }
    }

    for (i, j, a, b) in branch_pairs(parsed) {
        if pair_matches(&PUNISHMENT_PAIR, &a, &b) {
            let (first, second) = PUNISHMENT_PAIR;
            facts.push(RelationFact::new(
                RelationKind::BranchPunishment,
                pair_positions(i, j),
                format!("{first}-{second} 형"),
            ));
        }

        if options.include_self_punish && a == b && SELF_PUNISHMENTS.contains(&a) {
            facts.push(RelationFact::new(
                RelationKind::BranchPunishment,
                pair_positions(i, j),
                format!("{a}-{b} 자형"),
            ));
        }
    }
}

/// Three-harmony and half-harmony. A complete triple hides every half-harmony drawn from it.
fn collect_harmonies(parsed: &[Pillar; 4], options: &RelationOptions, facts: &mut Vec<RelationFact>) {
    for (triple, element) in THREE_HARMONIES.iter() {
        let (members, complete) = set_coverage(parsed, triple);
        if complete {
            let detail = if options.include_earthly_transform_note {
                format!("{} 삼합{}국", join_branches(triple), element.label())
            } else {
                format!("{} 삼합", join_branches(triple))
            };
            facts.push(RelationFact::new(RelationKind::ThreeHarmony, members, detail));
            continue;
        }

        for (i, j, a, b) in branch_pairs(parsed) {
            if a == b || !triple.contains(&a) || !triple.contains(&b) {
                continue;
            }
            let (first, second) = ordered_in_set(triple, a, b);
            let detail = if options.include_earthly_transform_note {
                format!("{first}-{second} 반합{}", element.label())
            } else {
                format!("{first}-{second} 반합")
            };
            facts.push(RelationFact::new(
                RelationKind::HalfHarmony,
                pair_positions(i, j),
                detail,
            ));
        }
    }
}
