//! Four-pillar symbols and the pillar relation analyzer.
//!
//! Inputs are plain stem/branch strings in canonical or Korean script. Unknown symbols never
//! fail; they simply match nothing.

pub mod adapter;
pub mod flags;
pub mod gongmang;
pub mod import;
pub mod options;
pub mod relations;
pub mod symbols;
pub(crate) mod tables;

#[cfg(test)]
mod tests;

pub use adapter::{to_analyze_input_from_saju, AnalyzeInput, NamedSymbol, SajuPillars, UpstreamPillar};
pub use flags::RelationFlags;
pub use gongmang::void_branches;
pub use import::{PillarBatchEntry, PillarBatchImporter, PillarImportError};
pub use options::{
    GongmangPolicy, HeavenlyClashMode, RelationOptions, RelationOptionsOverride, UnknownPolicy,
    DEFAULT_RELATION_OPTIONS,
};
pub use relations::{
    analyze_relations, compare_facts, FourPillars, PillarInput, RelationAnalyzer, RelationFact,
    RelationKind,
};
pub use symbols::{
    normalize_branch_name, normalize_branch_opt, normalize_stem_name, Branch, Element,
    ElementRelation, Pillar, PillarPosition, Polarity, Stem,
};
