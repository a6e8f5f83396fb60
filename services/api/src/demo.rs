use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use unse::config::AppConfig;
use unse::error::AppError;
use unse::saju::{Element, ElementRelation, PillarBatchImporter, RelationFlags};
use unse::scoring::{
    AspectType, AstroScoreInput, DaeunInput, IljinInput, LunarPhase, PeriodFlags, PlanetTransit,
    ProgressionTone, SajuScoreInput, ScoreCategory, ScoreResult, SeunInput, SibsinGroup,
    SolarReturnProximity, WolunInput, YongsinRelation,
};
use unse::ScoreEngine;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// CSV export with a `Label,Year,Month,Day,Time` header
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit the analyzed rows as JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Birth date (YYYY-MM-DD) used for the best day's solar return
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) birth_date: Option<NaiveDate>,
    /// Day being scored (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs { csv, json } = args;
    let config = AppConfig::load()?;
    let importer = PillarBatchImporter::new(config.analysis.relation_options);
    let entries = importer.from_path(&csv)?;

    if json {
        let rendered = serde_json::to_string_pretty(&entries).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Relation analysis for {}", csv.display());
    for entry in &entries {
        let flags = RelationFlags::from_facts(&entry.facts);
        let marker = if flags.has_conflict() { " (conflict)" } else { "" };
        println!("\n{}{marker}", entry.label);
        if entry.facts.is_empty() {
            println!("  - no relations");
        }
        for fact in &entry.facts {
            let pillars: Vec<_> = fact
                .pillars
                .iter()
                .map(|position| position.as_str())
                .collect();
            println!(
                "  - [{}] {} ({})",
                fact.kind.as_str(),
                fact.detail,
                pillars.join(", ")
            );
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { birth_date, today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let engine = ScoreEngine::default();

    println!("Day-quality demo for {today}");

    let normal = engine.score(&SajuScoreInput::default(), &AstroScoreInput::default());
    render_score("Normal day (no signals)", &normal);

    let (saju, mut astro) = best_day_inputs();
    if let Some(birth) = birth_date {
        astro.solar_return.proximity = Some(SolarReturnProximity::from_dates(birth, today));
    }
    let best = engine.score(&saju, &astro);
    render_score("Best day (aligned signals)", &best);

    Ok(())
}

fn render_score(title: &str, result: &ScoreResult) {
    println!("\n{title}");
    println!(
        "- total {:.1} | grade {} {} ({})",
        result.total_score, result.grade, result.label.ko, result.label.en
    );
    println!(
        "- saju {:.1} | astro {:.1} | cross {:+.1}{}",
        result.saju_score,
        result.astro_score,
        result.cross_bonus,
        if result.cross_verified { " verified" } else { "" }
    );
    println!("- {}% of categories agree", result.cross_agreement_percent);
    for category in ScoreCategory::all() {
        println!(
            "    {:<13} {:>5.1} / {:.0}",
            category.as_str(),
            result.breakdown.get(category),
            category.max()
        );
    }
}

fn best_day_inputs() -> (SajuScoreInput, AstroScoreInput) {
    let period = PeriodFlags {
        sibsin: Some(SibsinGroup::Inseong),
        has_yukhap: true,
        has_samhap: true,
        is_yongsin_element: true,
        ..Default::default()
    };
    let mut saju = SajuScoreInput {
        daeun: DaeunInput { period },
        seun: SeunInput {
            period,
            has_samjae: false,
            has_gwiin: true,
        },
        wolun: WolunInput {
            period,
            ..Default::default()
        },
        iljin: IljinInput {
            sibsin: Some(SibsinGroup::Jaeseong),
            has_cheoneul_gwiin: true,
            is_yongsin_element: true,
            ..Default::default()
        },
        ..Default::default()
    };
    saju.yongsin.relation = Some(YongsinRelation::Yongsin);
    saju.yongsin.yongsin_element = Some(Element::Wood);
    saju.yongsin.has_seasonal_support = true;

    let trine = Some(PlanetTransit {
        aspect: Some(AspectType::Trine),
        retrograde: false,
    });
    let mut astro = AstroScoreInput::default();
    astro.transit_sun.element_relation = Some(ElementRelation::Same);
    astro.transit_sun.aspect = Some(AspectType::Trine);
    astro.transit_moon.element_relation = Some(ElementRelation::GeneratedBy);
    astro.transit_moon.aspect = Some(AspectType::Sextile);
    astro.major_planets.venus = trine;
    astro.major_planets.jupiter = trine;
    astro.major_planets.saturn = trine;
    astro.lunar_phase.phase = Some(LunarPhase::FullMoon);
    astro.solar_return.proximity = Some(SolarReturnProximity::WithinThreeDays);
    astro.solar_return.progression = Some(ProgressionTone::Support);
    astro.outer_planets.uranus = Some(AspectType::Sextile);
    astro.dominant_element = Some(Element::Wood);
    (saju, astro)
}
