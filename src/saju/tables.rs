//! Fixed stem/branch rule tables.
//!
//! Every table is plain `const`/`static` data; nothing writes to it after compilation.
//!
//! Stems: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! Branches: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)

use super::options::HeavenlyClashMode;
use super::symbols::{Branch, Element, Stem};

/// 천간합: the five stem combinations and the element each transforms into.
pub(crate) const STEM_COMBINES: [(Stem, Stem, Element); 5] = [
    (Stem::Gap, Stem::Gi, Element::Earth),     // 甲己合土
    (Stem::Eul, Stem::Gyeong, Element::Metal), // 乙庚合金
    (Stem::Byeong, Stem::Sin, Element::Water), // 丙辛合水
    (Stem::Jeong, Stem::Im, Element::Wood),    // 丁壬合木
    (Stem::Mu, Stem::Gye, Element::Fire),      // 戊癸合火
];

/// 천간충 candidates. All ten lie at circular distance 4 in the stem cycle; the clash mode
/// decides how many of them count, taking a prefix of this list.
const STEM_CLASHES: [(Stem, Stem); 10] = [
    (Stem::Gap, Stem::Gyeong),    // 甲庚
    (Stem::Eul, Stem::Sin),       // 乙辛
    (Stem::Byeong, Stem::Im),     // 丙壬
    (Stem::Jeong, Stem::Gye),     // 丁癸
    (Stem::Mu, Stem::Gap),        // 戊甲
    (Stem::Gi, Stem::Eul),        // 己乙
    (Stem::Gyeong, Stem::Byeong), // 庚丙
    (Stem::Sin, Stem::Jeong),     // 辛丁
    (Stem::Im, Stem::Mu),         // 壬戊
    (Stem::Gye, Stem::Gi),        // 癸己
];

pub(crate) fn stem_clashes(mode: HeavenlyClashMode) -> &'static [(Stem, Stem)] {
    let count = match mode {
        HeavenlyClashMode::Four => 4,
        HeavenlyClashMode::Five => 5,
        HeavenlyClashMode::Ten => 10,
    };
    &STEM_CLASHES[..count]
}

/// 지지육합 with the element each pair transforms into.
pub(crate) const BRANCH_SIX_COMBINES: [(Branch, Branch, Element); 6] = [
    (Branch::Ja, Branch::Chuk, Element::Earth), // 子丑合土
    (Branch::In, Branch::Hae, Element::Wood),   // 寅亥合木
    (Branch::Myo, Branch::Sul, Element::Fire),  // 卯戌合火
    (Branch::Jin, Branch::Yu, Element::Metal),  // 辰酉合金
    (Branch::Sa, Branch::Sin, Element::Water),  // 巳申合水
    (Branch::O, Branch::Mi, Element::Fire),     // 午未合火
];

/// 지지충
pub(crate) const BRANCH_CLASHES: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::O),
    (Branch::Chuk, Branch::Mi),
    (Branch::In, Branch::Sin),
    (Branch::Myo, Branch::Yu),
    (Branch::Jin, Branch::Sul),
    (Branch::Sa, Branch::Hae),
];

/// 지지파
pub(crate) const BRANCH_BREAKS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Yu),
    (Branch::Chuk, Branch::Jin),
    (Branch::In, Branch::Hae),
    (Branch::Myo, Branch::O),
    (Branch::Sa, Branch::Sin),
    (Branch::Mi, Branch::Sul),
];

/// 지지해
pub(crate) const BRANCH_HARMS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Mi),
    (Branch::Chuk, Branch::O),
    (Branch::In, Branch::Sa),
    (Branch::Myo, Branch::Jin),
    (Branch::Sin, Branch::Hae),
    (Branch::Yu, Branch::Sul),
];

/// 원진
pub(crate) const BRANCH_YUANJIN: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Mi),
    (Branch::Chuk, Branch::O),
    (Branch::In, Branch::Yu),
    (Branch::Myo, Branch::Sin),
    (Branch::Jin, Branch::Hae),
    (Branch::Sa, Branch::Sul),
];

/// 삼형 sets. A complete set is reported as one fact; otherwise each punishing pair
/// inside a set is reported on its own.
pub(crate) const PUNISHMENT_TRIPLES: [[Branch; 3]; 2] = [
    [Branch::In, Branch::Sa, Branch::Sin],   // 寅巳申 지세지형
    [Branch::Chuk, Branch::Sul, Branch::Mi], // 丑戌未 무은지형
];

/// 子卯 무례지형, the third of the three punishments.
pub(crate) const PUNISHMENT_PAIR: (Branch, Branch) = (Branch::Ja, Branch::Myo);

/// 자형: branches that punish themselves when doubled.
pub(crate) const SELF_PUNISHMENTS: [Branch; 4] = [Branch::Jin, Branch::O, Branch::Yu, Branch::Hae];

/// 지지삼합 triples with their resultant element, listed as (birth, peak, tomb).
pub(crate) const THREE_HARMONIES: [([Branch; 3], Element); 4] = [
    ([Branch::Sin, Branch::Ja, Branch::Jin], Element::Water), // 申子辰 수국
    ([Branch::Hae, Branch::Myo, Branch::Mi], Element::Wood),  // 亥卯未 목국
    ([Branch::In, Branch::O, Branch::Sul], Element::Fire),    // 寅午戌 화국
    ([Branch::Sa, Branch::Yu, Branch::Chuk], Element::Metal), // 巳酉丑 금국
];

/// Void pair for each 10-day decade (旬) of the sexagenary cycle, indexed by `index / 10`.
pub(crate) const DECADE_VOIDS: [(Branch, Branch); 6] = [
    (Branch::Sul, Branch::Hae), // 甲子旬
    (Branch::Sin, Branch::Yu),  // 甲戌旬
    (Branch::O, Branch::Mi),    // 甲申旬
    (Branch::Jin, Branch::Sa),  // 甲午旬
    (Branch::In, Branch::Myo),  // 甲辰旬
    (Branch::Ja, Branch::Chuk), // 甲寅旬
];

/// Stem-only void pairs (截路空亡 layout) used by the basic policies.
pub(crate) fn stem_void(stem: Stem) -> (Branch, Branch) {
    match stem {
        Stem::Gap | Stem::Gi => (Branch::Sin, Branch::Yu),
        Stem::Eul | Stem::Gyeong => (Branch::O, Branch::Mi),
        Stem::Byeong | Stem::Sin => (Branch::Jin, Branch::Sa),
        Stem::Jeong | Stem::Im => (Branch::In, Branch::Myo),
        Stem::Mu | Stem::Gye => (Branch::Ja, Branch::Chuk),
    }
}

pub(crate) fn pair_matches<T: PartialEq>(pair: &(T, T), a: &T, b: &T) -> bool {
    (pair.0 == *a && pair.1 == *b) || (pair.0 == *b && pair.1 == *a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clash_pairs_sit_at_distance_four() {
        for (a, b) in stem_clashes(HeavenlyClashMode::Ten) {
            let diff = (a.index() as i32 - b.index() as i32).rem_euclid(10);
            assert!(diff == 4 || diff == 6, "{a}-{b} has distance {diff}");
        }
    }

    #[test]
    fn clash_modes_nest() {
        let four = stem_clashes(HeavenlyClashMode::Four);
        let five = stem_clashes(HeavenlyClashMode::Five);
        assert!(!four.contains(&(Stem::Mu, Stem::Gap)));
        assert!(five.contains(&(Stem::Mu, Stem::Gap)));
        assert!(four.iter().all(|pair| five.contains(pair)));
        assert_eq!(stem_clashes(HeavenlyClashMode::Ten).len(), 10);
    }

    #[test]
    fn decade_voids_cover_the_two_missing_branches() {
        for (decade, (first, second)) in DECADE_VOIDS.iter().enumerate() {
            let start = Branch::from_index(12 - (decade * 2) % 12);
            let covered: Vec<Branch> = (0..10)
                .map(|i| Branch::from_index(start.index() + i))
                .collect();
            assert!(!covered.contains(first));
            assert!(!covered.contains(second));
        }
    }
}
