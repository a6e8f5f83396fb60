use super::normalize::round1;
use super::saju::Tally;
use super::weights::*;
use crate::saju::{Element, ElementRelation};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    /// Base weight for a transiting body aspecting a natal point.
    fn weight(self) -> f64 {
        match self {
            AspectType::Trine => 0.2,
            AspectType::Sextile => 0.15,
            AspectType::Conjunction => 0.1,
            AspectType::Square => -0.15,
            AspectType::Opposition => -0.2,
        }
    }

    fn outer_weight(self) -> f64 {
        match self {
            AspectType::Trine => 1.0,
            AspectType::Sextile => 0.7,
            AspectType::Conjunction => 0.3,
            AspectType::Square => -1.0,
            AspectType::Opposition => -0.8,
        }
    }

    fn special_point_weight(self) -> f64 {
        match self {
            AspectType::Trine => 0.8,
            AspectType::Sextile => 0.6,
            AspectType::Conjunction => 0.5,
            AspectType::Square => -0.6,
            AspectType::Opposition => -0.5,
        }
    }
}

fn element_relation_weight(relation: ElementRelation) -> f64 {
    match relation {
        ElementRelation::Same => 0.3,
        ElementRelation::GeneratedBy => 0.2,
        ElementRelation::Generates => 0.15,
        ElementRelation::Neutral => 0.0,
        ElementRelation::Controls => -0.1,
        ElementRelation::ControlledBy => -0.3,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitSunInput {
    pub element_relation: Option<ElementRelation>,
    pub aspect: Option<AspectType>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitMoonInput {
    pub element_relation: Option<ElementRelation>,
    pub aspect: Option<AspectType>,
    pub is_void_of_course: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanetTransit {
    pub aspect: Option<AspectType>,
    pub retrograde: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MajorPlanetsInput {
    pub mercury: Option<PlanetTransit>,
    pub venus: Option<PlanetTransit>,
    pub mars: Option<PlanetTransit>,
    pub jupiter: Option<PlanetTransit>,
    pub saturn: Option<PlanetTransit>,
}

impl MajorPlanetsInput {
    /// (transit, aspect multiplier, retrograde penalty) per planet.
    fn planets(&self) -> [(Option<PlanetTransit>, f64, f64); 5] {
        [
            (self.mercury, 0.8, -0.2),
            (self.venus, 1.0, -0.1),
            (self.mars, 0.8, -0.12),
            (self.jupiter, 1.2, -0.05),
            (self.saturn, 1.0, -0.08),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

const LUNAR_PHASES: [LunarPhase; 8] = [
    LunarPhase::NewMoon,
    LunarPhase::WaxingCrescent,
    LunarPhase::FirstQuarter,
    LunarPhase::WaxingGibbous,
    LunarPhase::FullMoon,
    LunarPhase::WaningGibbous,
    LunarPhase::LastQuarter,
    LunarPhase::WaningCrescent,
];

impl LunarPhase {
    /// Buckets the sun-moon elongation (degrees, any range) into 45° sectors centered on each phase.
    pub fn from_elongation(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        LUNAR_PHASES[sector]
    }

    fn weight(self) -> f64 {
        match self {
            LunarPhase::NewMoon => 0.1,
            LunarPhase::WaxingCrescent => 0.15,
            LunarPhase::FirstQuarter => -0.1,
            LunarPhase::WaxingGibbous => 0.2,
            LunarPhase::FullMoon => 0.3,
            LunarPhase::WaningGibbous => 0.05,
            LunarPhase::LastQuarter => -0.1,
            LunarPhase::WaningCrescent => -0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LunarPhaseInput {
    pub phase: Option<LunarPhase>,
}

/// Distance from the day to the nearest birthday anniversary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolarReturnProximity {
    Exact,
    WithinOneDay,
    WithinThreeDays,
    WithinSevenDays,
    Distant,
}

impl SolarReturnProximity {
    pub fn from_days(days: i64) -> Self {
        match days.unsigned_abs() {
            0 => SolarReturnProximity::Exact,
            1 => SolarReturnProximity::WithinOneDay,
            2..=3 => SolarReturnProximity::WithinThreeDays,
            4..=7 => SolarReturnProximity::WithinSevenDays,
            _ => SolarReturnProximity::Distant,
        }
    }

    /// Nearest anniversary of `birth` around `target`. Feb 29 birthdays fall on Feb 28 in common years.
    pub fn from_dates(birth: NaiveDate, target: NaiveDate) -> Self {
        let days = [target.year() - 1, target.year(), target.year() + 1]
            .into_iter()
            .filter_map(|year| anniversary(birth, year))
            .map(|date| (date - target).num_days().abs())
            .min()
            .unwrap_or(i64::MAX);
        Self::from_days(days)
    }

    fn weight(self) -> f64 {
        match self {
            SolarReturnProximity::Exact => 0.3,
            SolarReturnProximity::WithinOneDay => 0.2,
            SolarReturnProximity::WithinThreeDays => 0.12,
            SolarReturnProximity::WithinSevenDays => 0.05,
            SolarReturnProximity::Distant => 0.0,
        }
    }
}

fn anniversary(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day()).or_else(|| {
        if birth.month() == 2 && birth.day() == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressionTone {
    Support,
    Challenge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolarReturnInput {
    pub proximity: Option<SolarReturnProximity>,
    pub progression: Option<ProgressionTone>,
}

/// Uranus, Neptune, Pluto aspects to the natal chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OuterPlanetsInput {
    pub uranus: Option<AspectType>,
    pub neptune: Option<AspectType>,
    pub pluto: Option<AspectType>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecialPointsInput {
    pub north_node: Option<AspectType>,
    pub south_node: Option<AspectType>,
    pub part_of_fortune: Option<AspectType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EclipseKind {
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EclipseInput {
    pub kind: Option<EclipseKind>,
    pub hits_natal_point: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AstroScoreInput {
    pub transit_sun: TransitSunInput,
    pub transit_moon: TransitMoonInput,
    pub major_planets: MajorPlanetsInput,
    pub lunar_phase: LunarPhaseInput,
    pub solar_return: SolarReturnInput,
    pub outer_planets: OuterPlanetsInput,
    pub special_points: SpecialPointsInput,
    pub eclipse: EclipseInput,
    /// Element emphasized by the day's transits, compared against the chart's yongsin.
    pub dominant_element: Option<Element>,
}

pub fn score_transit_sun(input: &TransitSunInput) -> f64 {
    let mut tally = Tally::default();
    if let Some(relation) = input.element_relation {
        tally.add(element_relation_weight(relation));
    }
    if let Some(aspect) = input.aspect {
        tally.add(aspect.weight());
    }
    tally.finish(ScoreCategory::TransitSun)
}

pub fn score_transit_moon(input: &TransitMoonInput) -> f64 {
    let mut tally = Tally::default();
    if let Some(relation) = input.element_relation {
        tally.add(element_relation_weight(relation));
    }
    if let Some(aspect) = input.aspect {
        tally.add(aspect.weight());
    }
    tally.add_if(input.is_void_of_course, MOON_VOID_OF_COURSE);
    tally.finish(ScoreCategory::TransitMoon)
}

pub fn score_major_planets(input: &MajorPlanetsInput) -> f64 {
    let mut tally = Tally::default();
    for (transit, multiplier, retrograde_penalty) in input.planets() {
        let Some(transit) = transit else {
            continue;
        };
        if let Some(aspect) = transit.aspect {
            tally.add(aspect.weight() * multiplier);
        }
        tally.add_if(transit.retrograde, retrograde_penalty);
    }
    tally.finish(ScoreCategory::MajorPlanets)
}

pub fn score_lunar_phase(input: &LunarPhaseInput) -> f64 {
    let mut tally = Tally::default();
    if let Some(phase) = input.phase {
        tally.add(phase.weight());
    }
    tally.finish(ScoreCategory::LunarPhase)
}

pub fn score_solar_return(input: &SolarReturnInput) -> f64 {
    let mut tally = Tally::default();
    if let Some(proximity) = input.proximity {
        tally.add(proximity.weight());
    }
    match input.progression {
        Some(ProgressionTone::Support) => tally.add(PROGRESSION_SUPPORT),
        Some(ProgressionTone::Challenge) => tally.add(PROGRESSION_CHALLENGE),
        None => {}
    }
    tally.finish(ScoreCategory::SolarReturn)
}

pub fn outer_planets_delta(input: &OuterPlanetsInput) -> f64 {
    let sum: f64 = [input.uranus, input.neptune, input.pluto]
        .into_iter()
        .flatten()
        .map(AspectType::outer_weight)
        .sum();
    let delta = round1(sum.clamp(-OUTER_PLANETS_LIMIT, OUTER_PLANETS_LIMIT));
    debug!(delta, "outer planet delta");
    delta
}

pub fn special_points_delta(input: &SpecialPointsInput) -> f64 {
    let sum: f64 = [
        (input.north_node, 1.0),
        (input.south_node, 0.5),
        (input.part_of_fortune, 1.0),
    ]
    .into_iter()
    .filter_map(|(aspect, multiplier)| {
        aspect.map(|aspect| aspect.special_point_weight() * multiplier)
    })
    .sum();
    let delta = round1(sum.clamp(-SPECIAL_POINTS_LIMIT, SPECIAL_POINTS_LIMIT));
    debug!(delta, "special point delta");
    delta
}

pub fn eclipse_delta(input: &EclipseInput) -> f64 {
    let base = match input.kind {
        Some(EclipseKind::Solar) => SOLAR_ECLIPSE,
        Some(EclipseKind::Lunar) => LUNAR_ECLIPSE,
        None => return 0.0,
    };
    if input.hits_natal_point {
        base + ECLIPSE_NATAL_HIT
    } else {
        base
    }
}
