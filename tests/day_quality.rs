use unse::saju::{
    analyze_relations, Element, ElementRelation, FourPillars, RelationFlags,
    DEFAULT_RELATION_OPTIONS,
};
use unse::scoring::{
    calculate_total_score, AspectType, AstroScoreInput, DaeunInput, EclipseInput, EclipseKind,
    IljinInput, LunarPhase, LunarPhaseInput, MajorPlanetsInput, OuterPlanetsInput, PeriodFlags,
    PlanetTransit, ProgressionTone, SajuScoreInput, ScoreCategory, ScoreEngine, ScoringConfig,
    ScoringConfigError, SeunInput, SibsinGroup, SolarReturnInput, SolarReturnProximity,
    TransitMoonInput, TransitSunInput, WolunInput, YongsinInput, YongsinRelation,
};

fn good_period() -> PeriodFlags {
    PeriodFlags {
        sibsin: Some(SibsinGroup::Inseong),
        has_yukhap: true,
        has_samhap: true,
        is_yongsin_element: true,
        ..Default::default()
    }
}

fn bad_period() -> PeriodFlags {
    PeriodFlags {
        sibsin: Some(SibsinGroup::Bigeop),
        has_chung: true,
        has_hyeong: true,
        is_gisin_element: true,
        ..Default::default()
    }
}

fn trine(retrograde: bool) -> Option<PlanetTransit> {
    Some(PlanetTransit {
        aspect: Some(AspectType::Trine),
        retrograde,
    })
}

fn best_day() -> (SajuScoreInput, AstroScoreInput) {
    let saju = SajuScoreInput {
        daeun: DaeunInput {
            period: good_period(),
        },
        seun: SeunInput {
            period: good_period(),
            has_samjae: false,
            has_gwiin: true,
        },
        wolun: WolunInput {
            period: good_period(),
            ..Default::default()
        },
        iljin: IljinInput {
            sibsin: Some(SibsinGroup::Jaeseong),
            has_yukhap: true,
            has_samhap: true,
            has_cheoneul_gwiin: true,
            has_cheondeok_gwiin: true,
            is_yongsin_element: true,
            ..Default::default()
        },
        yongsin: YongsinInput {
            relation: Some(YongsinRelation::Yongsin),
            yongsin_element: Some(Element::Water),
            has_seasonal_support: true,
            has_element_overload: false,
        },
    };
    let astro = AstroScoreInput {
        transit_sun: TransitSunInput {
            element_relation: Some(ElementRelation::Same),
            aspect: Some(AspectType::Trine),
        },
        transit_moon: TransitMoonInput {
            element_relation: Some(ElementRelation::GeneratedBy),
            aspect: Some(AspectType::Sextile),
            is_void_of_course: false,
        },
        major_planets: MajorPlanetsInput {
            mercury: trine(false),
            venus: trine(false),
            mars: None,
            jupiter: trine(false),
            saturn: trine(false),
        },
        lunar_phase: LunarPhaseInput {
            phase: Some(LunarPhase::FullMoon),
        },
        solar_return: SolarReturnInput {
            proximity: Some(SolarReturnProximity::WithinOneDay),
            progression: Some(ProgressionTone::Support),
        },
        outer_planets: OuterPlanetsInput {
            uranus: Some(AspectType::Trine),
            ..Default::default()
        },
        dominant_element: Some(Element::Water),
        ..Default::default()
    };
    (saju, astro)
}

fn worst_day() -> (SajuScoreInput, AstroScoreInput) {
    let saju = SajuScoreInput {
        daeun: DaeunInput {
            period: bad_period(),
        },
        seun: SeunInput {
            period: bad_period(),
            has_samjae: true,
            has_gwiin: false,
        },
        wolun: WolunInput {
            period: bad_period(),
            has_pa: true,
            has_hae: true,
        },
        iljin: IljinInput {
            has_chung: true,
            has_hyeong: true,
            has_wonjin: true,
            has_gongmang: true,
            is_gisin_element: true,
            ..Default::default()
        },
        yongsin: YongsinInput {
            relation: Some(YongsinRelation::Gisin),
            has_element_overload: true,
            ..Default::default()
        },
    };
    let astro = AstroScoreInput {
        transit_sun: TransitSunInput {
            element_relation: Some(ElementRelation::ControlledBy),
            aspect: Some(AspectType::Opposition),
        },
        transit_moon: TransitMoonInput {
            element_relation: Some(ElementRelation::ControlledBy),
            aspect: Some(AspectType::Square),
            is_void_of_course: true,
        },
        major_planets: MajorPlanetsInput {
            mercury: Some(PlanetTransit {
                aspect: Some(AspectType::Square),
                retrograde: true,
            }),
            mars: Some(PlanetTransit {
                aspect: Some(AspectType::Opposition),
                retrograde: true,
            }),
            ..Default::default()
        },
        lunar_phase: LunarPhaseInput {
            phase: Some(LunarPhase::LastQuarter),
        },
        solar_return: SolarReturnInput {
            proximity: None,
            progression: Some(ProgressionTone::Challenge),
        },
        outer_planets: OuterPlanetsInput {
            uranus: Some(AspectType::Square),
            neptune: Some(AspectType::Opposition),
            pluto: Some(AspectType::Square),
        },
        ..Default::default()
    };
    (saju, astro)
}

#[test]
fn empty_inputs_score_a_normal_day() {
    let result = calculate_total_score(&SajuScoreInput::default(), &AstroScoreInput::default());
    assert!(result.total_score > 30.0 && result.total_score < 70.0);
    assert_eq!(result.grade, 2);
    assert_eq!(result.label.ko, "보통");
    assert_eq!(result.saju_score, 25.0);
    assert_eq!(result.astro_score, 25.0);
    assert_eq!(result.cross_bonus, 0.0);
    assert!(!result.cross_verified);
    assert!(!result.saju_positive && !result.saju_negative);
    assert_eq!(result.cross_agreement_percent, 0);
}

#[test]
fn best_day_sample_grades_high() {
    let (saju, astro) = best_day();
    let result = calculate_total_score(&saju, &astro);
    assert!(result.total_score > 60.0, "total {}", result.total_score);
    assert!(result.grade <= 1);
    assert!(result.cross_verified);
    assert_eq!(result.cross_bonus, 3.0);
    assert!(result.saju_positive && result.astro_positive);
    assert_eq!(result.cross_agreement_percent, 100);
    assert_eq!(result.astro_deltas.outer_planets, 1.0);
}

#[test]
fn worst_day_sample_grades_low() {
    let (saju, astro) = worst_day();
    let result = calculate_total_score(&saju, &astro);
    assert!(result.saju_negative && result.astro_negative);
    assert_eq!(result.cross_bonus, -3.0);
    assert_eq!(result.grade, 4);
    assert_eq!(result.label.en, "Worst");
    assert!(result.total_score >= 0.0);
}

#[test]
fn every_output_stays_within_bounds() {
    for (saju, astro) in [
        best_day(),
        worst_day(),
        (SajuScoreInput::default(), AstroScoreInput::default()),
    ] {
        let result = calculate_total_score(&saju, &astro);
        for category in ScoreCategory::all() {
            let score = result.breakdown.get(category);
            assert!(
                (0.0..=category.max()).contains(&score),
                "{} = {score}",
                category.as_str()
            );
        }
        assert!((0.0..=50.0).contains(&result.saju_score));
        assert!((0.0..=50.0).contains(&result.astro_score));
        assert!((0.0..=100.0).contains(&result.total_score));
        assert!(result.cross_agreement_percent <= 100);
    }
}

#[test]
fn positive_flags_never_lower_the_day() {
    let base = IljinInput {
        has_chung: true,
        ..Default::default()
    };
    let positives: [fn(&mut IljinInput); 9] = [
        |input| input.has_stem_combine = true,
        |input| input.has_yukhap = true,
        |input| input.has_samhap = true,
        |input| input.has_banhap = true,
        |input| input.has_cheoneul_gwiin = true,
        |input| input.has_taegeuk_gwiin = true,
        |input| input.has_woldeok_gwiin = true,
        |input| input.has_munchang_gwiin = true,
        |input| input.is_yongsin_element = true,
    ];

    let mut current = base;
    let mut previous = unse::scoring::saju::score_iljin(&current);
    for raise in positives {
        raise(&mut current);
        let score = unse::scoring::saju::score_iljin(&current);
        assert!(score >= previous, "{previous} -> {score}");
        previous = score;
    }
    assert_eq!(previous, ScoreCategory::Iljin.max());
}

#[test]
fn element_alignment_lifts_a_mixed_day() {
    let saju = SajuScoreInput {
        daeun: DaeunInput {
            period: good_period(),
        },
        yongsin: YongsinInput {
            yongsin_element: Some(Element::Fire),
            ..Default::default()
        },
        ..Default::default()
    };
    let aligned = AstroScoreInput {
        dominant_element: Some(Element::Fire),
        ..Default::default()
    };
    let result = calculate_total_score(&saju, &aligned);
    assert!(result.saju_positive && !result.astro_positive);
    assert_eq!(result.cross_bonus, 1.0);

    let misaligned = AstroScoreInput {
        dominant_element: Some(Element::Metal),
        ..Default::default()
    };
    assert_eq!(calculate_total_score(&saju, &misaligned).cross_bonus, 0.0);
}

#[test]
fn solar_eclipse_outweighs_lunar() {
    let with_eclipse = |kind| AstroScoreInput {
        eclipse: EclipseInput {
            kind: Some(kind),
            hits_natal_point: false,
        },
        ..Default::default()
    };
    let saju = SajuScoreInput::default();
    let solar = calculate_total_score(&saju, &with_eclipse(EclipseKind::Solar));
    let lunar = calculate_total_score(&saju, &with_eclipse(EclipseKind::Lunar));
    assert!(solar.astro_score > lunar.astro_score);
    assert!(lunar.astro_score > 25.0);
}

#[test]
fn custom_rubric_changes_the_grade() {
    let strict = ScoringConfig {
        grade_cutoffs: unse::scoring::GradeCutoffs {
            best: 95.0,
            good: 85.0,
            normal: 60.0,
            bad: 40.0,
        },
        ..Default::default()
    };
    let engine = ScoreEngine::new(strict).expect("strict rubric is ordered");
    let result = engine.score(&SajuScoreInput::default(), &AstroScoreInput::default());
    assert_eq!(result.total_score, 50.0);
    assert_eq!(result.grade, 3);
}

#[test]
fn inverted_rubric_is_refused() {
    let config: ScoringConfig = serde_json::from_str(
        r#"{"gradeCutoffs":{"best":40,"good":60,"normal":42,"bad":28}}"#,
    )
    .expect("rubric parses");
    match ScoreEngine::new(config) {
        Err(ScoringConfigError::NonMonotoneCutoffs { best, good, .. }) => {
            assert_eq!(best, 40.0);
            assert_eq!(good, 60.0);
        }
        Ok(_) => panic!("expected cutoff error, got an engine"),
    }
}

#[test]
fn day_relations_feed_the_iljin_category() {
    let clashing = FourPillars::from_ganzhi("甲子", "丙寅", "庚午", "戊寅");
    let facts = analyze_relations(&clashing, &DEFAULT_RELATION_OPTIONS);
    let flags = RelationFlags::from_facts(&facts);
    assert!(flags.has_chung);
    assert!(flags.has_conflict());

    let saju = SajuScoreInput {
        iljin: IljinInput::default().with_relation_flags(&flags),
        ..Default::default()
    };
    let result = calculate_total_score(&saju, &AstroScoreInput::default());
    assert!(result.breakdown.iljin < ScoreCategory::Iljin.midpoint());
}
