use super::relations::{RelationFact, RelationKind};
use serde::{Deserialize, Serialize};

/// Boolean digest of a relation fact list, consumed by the period scorers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationFlags {
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
}

impl RelationFlags {
    pub fn from_facts(facts: &[RelationFact]) -> Self {
        facts.iter().fold(Self::default(), |mut flags, fact| {
            match fact.kind {
                RelationKind::StemCombine => flags.has_stem_combine = true,
                RelationKind::StemClash => flags.has_stem_clash = true,
                RelationKind::BranchSixCombine => flags.has_yukhap = true,
                RelationKind::ThreeHarmony => flags.has_samhap = true,
                RelationKind::HalfHarmony => flags.has_banhap = true,
                RelationKind::BranchClash => flags.has_chung = true,
                RelationKind::BranchPunishment => flags.has_hyeong = true,
                RelationKind::BranchBreak => flags.has_pa = true,
                RelationKind::BranchHarm => flags.has_hae = true,
                RelationKind::Yuanjin => flags.has_wonjin = true,
                RelationKind::Gongmang => flags.has_gongmang = true,
            }
            flags
        })
    }

    /// Clash or punishment present; the report layer may downgrade a best-day grade on this.
    pub fn has_conflict(&self) -> bool {
        self.has_chung || self.has_hyeong
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saju::symbols::PillarPosition;

    fn fact(kind: RelationKind) -> RelationFact {
        RelationFact::new(
            kind,
            vec![PillarPosition::Year, PillarPosition::Day],
            String::new(),
        )
    }

    #[test]
    fn empty_fact_list_sets_nothing() {
        let flags = RelationFlags::from_facts(&[]);
        assert_eq!(flags, RelationFlags::default());
        assert!(!flags.has_conflict());
    }

    #[test]
    fn clash_and_punishment_raise_conflict() {
        let flags = RelationFlags::from_facts(&[fact(RelationKind::BranchClash)]);
        assert!(flags.has_chung && flags.has_conflict());

        let flags = RelationFlags::from_facts(&[
            fact(RelationKind::BranchPunishment),
            fact(RelationKind::HalfHarmony),
        ]);
        assert!(flags.has_hyeong && flags.has_banhap);
        assert!(flags.has_conflict());
    }

    #[test]
    fn stem_clash_alone_is_not_a_conflict() {
        let flags = RelationFlags::from_facts(&[
            fact(RelationKind::StemClash),
            fact(RelationKind::Gongmang),
        ]);
        assert!(flags.has_stem_clash && flags.has_gongmang);
        assert!(!flags.has_conflict());
    }
}
