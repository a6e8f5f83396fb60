use unse::saju::{
    analyze_relations, to_analyze_input_from_saju, GongmangPolicy, PillarBatchImporter,
    PillarImportError, PillarPosition, RelationAnalyzer, RelationFlags, RelationKind,
    RelationOptionsOverride, SajuPillars, UpstreamPillar, DEFAULT_RELATION_OPTIONS,
};
use unse::FourPillars;

fn sample_csv() -> &'static str {
    "Label,Year,Month,Day,Time\n\
     earth-combine,甲子,己丑,丙寅,丁卯\n\
     water-frame,庚申,甲子,壬辰,丙午\n\
     no-hour,갑술,병자,갑자,\n"
}

#[test]
fn upstream_chart_flows_through_the_analyzer() {
    let saju = SajuPillars {
        year: Some(UpstreamPillar::new("갑", "자")),
        month: Some(UpstreamPillar::new("기", "축")),
        day: Some(UpstreamPillar::new("병", "인")),
        time: Some(UpstreamPillar::new("정", "묘")),
    };
    let input = to_analyze_input_from_saju(&saju, None, None);
    let facts = analyze_relations(&input.pillars, &input.options);

    let canonical = FourPillars::from_ganzhi("甲子", "己丑", "丙寅", "丁卯");
    assert_eq!(facts, analyze_relations(&canonical, &DEFAULT_RELATION_OPTIONS));

    let kinds: Vec<_> = facts.iter().map(|fact| fact.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RelationKind::BranchSixCombine,
            RelationKind::BranchPunishment,
            RelationKind::StemCombine,
        ]
    );
}

#[test]
fn override_policy_reaches_the_gongmang_family() {
    let saju = SajuPillars {
        year: Some(UpstreamPillar::new("丙", "午")),
        month: Some(UpstreamPillar::new("丁", "酉")),
        day: Some(UpstreamPillar::new("甲", "申")),
        time: Some(UpstreamPillar::new("壬", "辰")),
    };
    let overrides = RelationOptionsOverride {
        gongmang_policy: Some(GongmangPolicy::YearPillarBasic),
        include_heavenly: Some(false),
        ..Default::default()
    };
    let input = to_analyze_input_from_saju(&saju, None, Some(&overrides));
    let facts = RelationAnalyzer::new(input.options).analyze(&input.pillars);

    assert!(facts.iter().all(|fact| fact.kind != RelationKind::StemCombine));
    assert!(facts.iter().all(|fact| fact.kind != RelationKind::StemClash));
    let voids: Vec<_> = facts
        .iter()
        .filter(|fact| fact.kind == RelationKind::Gongmang)
        .collect();
    assert_eq!(voids.len(), 1);
    assert_eq!(voids[0].detail, "辰 공망");
    assert_eq!(voids[0].pillars, vec![PillarPosition::Time]);
}

#[test]
fn facts_serialize_with_korean_kinds() {
    let pillars = FourPillars::from_ganzhi("甲子", "丙午", "", "");
    let facts = analyze_relations(&pillars, &DEFAULT_RELATION_OPTIONS);
    let json = serde_json::to_value(&facts).expect("facts serialize");

    let clash = json
        .as_array()
        .and_then(|items| items.iter().find(|item| item["kind"] == "지지충"))
        .expect("branch clash present");
    assert_eq!(clash["detail"], "子-午 충");
    assert_eq!(clash["pillars"], serde_json::json!(["year", "month"]));
}

#[test]
fn csv_batch_is_analyzed_row_by_row() {
    let importer = PillarBatchImporter::default();
    let entries = importer
        .from_reader(sample_csv().as_bytes())
        .expect("csv imports");

    let labels: Vec<_> = entries.iter().map(|entry| entry.label.as_str()).collect();
    assert_eq!(labels, vec!["earth-combine", "water-frame", "no-hour"]);

    assert_eq!(entries[0].facts.len(), 3);
    assert!(entries[1]
        .facts
        .iter()
        .any(|fact| fact.detail == "申-子-辰 삼합수국"));

    let no_hour = &entries[2];
    assert!(no_hour.pillars.time.is_empty());
    let flags = RelationFlags::from_facts(&no_hour.facts);
    assert!(flags.has_gongmang);
}

#[test]
fn csv_batch_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("unse-pillars-{}.csv", std::process::id()));
    std::fs::write(&path, sample_csv()).expect("write temp csv");

    let entries = PillarBatchImporter::default()
        .from_path(&path)
        .expect("csv imports from disk");
    std::fs::remove_file(&path).ok();

    assert_eq!(entries.len(), 3);
}

#[test]
fn missing_export_reports_io_error() {
    let path = std::env::temp_dir().join("unse-missing-export.csv");
    match PillarBatchImporter::default().from_path(&path) {
        Err(PillarImportError::Io(_)) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
