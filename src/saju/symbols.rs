use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-phase element shared by stems, branches, and the astrology element mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Korean single-syllable name used in transform annotations (e.g. `합화토`).
    pub fn label(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }

    /// Element this one feeds in the generating cycle (wood → fire → earth → metal → water).
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// Element this one overcomes in the controlling cycle.
    pub fn controls(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a natal element relates to an incoming (transit or period) element.
///
/// Read from the natal side: `GeneratedBy` means the incoming element feeds the natal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementRelation {
    Same,
    GeneratedBy,
    Generates,
    Neutral,
    Controls,
    ControlledBy,
}

impl ElementRelation {
    pub fn between(natal: Element, incoming: Element) -> Self {
        if natal == incoming {
            ElementRelation::Same
        } else if incoming.generates() == natal {
            ElementRelation::GeneratedBy
        } else if natal.generates() == incoming {
            ElementRelation::Generates
        } else if incoming.controls() == natal {
            ElementRelation::ControlledBy
        } else if natal.controls() == incoming {
            ElementRelation::Controls
        } else {
            ElementRelation::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    Yang,
    Yin,
}

/// Heavenly stem in canonical cycle order 甲(0) … 癸(9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

const STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const STEM_HANGUL: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

impl Stem {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Stem {
        STEMS[index % 10]
    }

    /// Parses a stem written in canonical or Korean script.
    pub fn parse(value: &str) -> Option<Stem> {
        let canonical = normalize_stem_name(value);
        STEM_HANJA
            .iter()
            .position(|symbol| *symbol == canonical)
            .map(Stem::from_index)
    }

    pub fn as_str(self) -> &'static str {
        STEM_HANJA[self.index()]
    }

    pub fn element(self) -> Element {
        match self {
            Stem::Gap | Stem::Eul => Element::Wood,
            Stem::Byeong | Stem::Jeong => Element::Fire,
            Stem::Mu | Stem::Gi => Element::Earth,
            Stem::Gyeong | Stem::Sin => Element::Metal,
            Stem::Im | Stem::Gye => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Earthly branch in canonical cycle order 子(0) … 亥(11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

const BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

const BRANCH_HANJA: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const BRANCH_HANGUL: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];

impl Branch {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Branch {
        BRANCHES[index % 12]
    }

    /// Parses a branch written in canonical or Korean script.
    pub fn parse(value: &str) -> Option<Branch> {
        let canonical = normalize_branch_name(value);
        BRANCH_HANJA
            .iter()
            .position(|symbol| *symbol == canonical)
            .map(Branch::from_index)
    }

    pub fn as_str(self) -> &'static str {
        BRANCH_HANJA[self.index()]
    }

    pub fn element(self) -> Element {
        match self {
            Branch::In | Branch::Myo => Element::Wood,
            Branch::Sa | Branch::O => Element::Fire,
            Branch::Chuk | Branch::Jin | Branch::Mi | Branch::Sul => Element::Earth,
            Branch::Sin | Branch::Yu => Element::Metal,
            Branch::Ja | Branch::Hae => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a pillar within the four-pillar chart, ordered year → time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Time,
}

impl PillarPosition {
    pub fn ordered() -> [PillarPosition; 4] {
        [
            PillarPosition::Year,
            PillarPosition::Month,
            PillarPosition::Day,
            PillarPosition::Time,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PillarPosition::Year => "year",
            PillarPosition::Month => "month",
            PillarPosition::Day => "day",
            PillarPosition::Time => "time",
        }
    }
}

/// A parsed stem/branch pair. Either half may be unknown when the caller's text did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pillar {
    pub stem: Option<Stem>,
    pub branch: Option<Branch>,
}

impl Pillar {
    pub fn parse(stem: &str, branch: &str) -> Self {
        Self {
            stem: Stem::parse(stem),
            branch: Branch::parse(branch),
        }
    }

    /// Position (0..60) in the sexagenary cycle, defined only when stem and branch share polarity.
    pub fn sexagenary_index(&self) -> Option<usize> {
        let stem = self.stem?;
        let branch = self.branch?;
        if stem.polarity() != branch.polarity() {
            return None;
        }
        let s = stem.index() as i32;
        let b = branch.index() as i32;
        Some((6 * s - 5 * b).rem_euclid(60) as usize)
    }
}

/// Maps a Korean-script branch name to its canonical form.
///
/// Empty input yields `""`; anything unrecognized is returned trimmed but otherwise untouched.
pub fn normalize_branch_name(value: &str) -> String {
    let trimmed = value.trim();
    match BRANCH_HANGUL.iter().position(|name| *name == trimmed) {
        Some(index) => BRANCH_HANJA[index].to_string(),
        None => trimmed.to_string(),
    }
}

/// Stem counterpart of [`normalize_branch_name`]. Kept separate because 신 is 辛 as a stem
/// but 申 as a branch.
pub fn normalize_stem_name(value: &str) -> String {
    let trimmed = value.trim();
    match STEM_HANGUL.iter().position(|name| *name == trimmed) {
        Some(index) => STEM_HANJA[index].to_string(),
        None => trimmed.to_string(),
    }
}

/// Optional-input form of the normalizer; `None` behaves like an empty string.
pub fn normalize_branch_opt(value: Option<&str>) -> String {
    value.map(normalize_branch_name).unwrap_or_default()
}
