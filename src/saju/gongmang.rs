use super::options::GongmangPolicy;
use super::relations::{FourPillars, RelationFact, RelationKind};
use super::symbols::{Branch, Pillar, PillarPosition};
use super::tables::{stem_void, DECADE_VOIDS};

/// The two void branches for a chart under `policy`, or `None` when the anchor pillar is unusable.
pub fn void_branches(pillars: &FourPillars, policy: GongmangPolicy) -> Option<(Branch, Branch)> {
    resolve(&pillars.parsed(), policy)
}

pub(crate) fn resolve(parsed: &[Pillar; 4], policy: GongmangPolicy) -> Option<(Branch, Branch)> {
    match policy {
        GongmangPolicy::DayPillar60Jiazi => {
            let index = parsed[2].sexagenary_index()?;
            Some(DECADE_VOIDS[index / 10])
        }
        GongmangPolicy::DayMasterBasic => parsed[2].stem.map(stem_void),
        GongmangPolicy::YearPillarBasic => parsed[0].stem.map(stem_void),
    }
}

/// One fact per void branch that actually appears in the chart.
pub(crate) fn void_facts(parsed: &[Pillar; 4], policy: GongmangPolicy) -> Vec<RelationFact> {
    let Some((first, second)) = resolve(parsed, policy) else {
        return Vec::new();
    };

    [first, second]
        .into_iter()
        .filter_map(|void| {
            let hits: Vec<PillarPosition> = PillarPosition::ordered()
                .into_iter()
                .zip(parsed.iter())
                .filter(|(_, pillar)| pillar.branch == Some(void))
                .map(|(position, _)| position)
                .collect();
            (!hits.is_empty())
                .then(|| RelationFact::new(RelationKind::Gongmang, hits, format!("{void} 공망")))
        })
        .collect()
}
