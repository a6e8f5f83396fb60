use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use unse::error::AppError;
use unse::saju::{
    to_analyze_input_from_saju, FourPillars, RelationAnalyzer, RelationFact, RelationFlags,
    RelationOptionsOverride, SajuPillars,
};
use unse::scoring::{
    AstroScoreInput, GradeLabel, SajuScoreInput, ScoreResult, SolarReturnProximity,
};

/// Chart supplied either as flat pillar strings or in the upstream named-symbol shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ChartRequest {
    pub(crate) pillars: Option<FourPillars>,
    pub(crate) saju: Option<SajuPillars>,
    pub(crate) day_master_stem: Option<String>,
    pub(crate) options: Option<RelationOptionsOverride>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelationsResponse {
    pub(crate) pillars: FourPillars,
    pub(crate) facts: Vec<RelationFact>,
    pub(crate) flags: RelationFlags,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ScoreRequest {
    pub(crate) saju: SajuScoreInput,
    pub(crate) astro: AstroScoreInput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct DayReportRequest {
    #[serde(flatten)]
    pub(crate) chart: ChartRequest,
    pub(crate) scores: ScoreRequest,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub(crate) birth_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub(crate) target_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayReportResponse {
    pub(crate) facts: Vec<RelationFact>,
    pub(crate) flags: RelationFlags,
    pub(crate) score: ScoreResult,
    pub(crate) grade: u8,
    pub(crate) label: GradeLabel,
    pub(crate) conflict_downgrade: bool,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/relations", axum::routing::post(relations_endpoint))
        .route("/api/v1/score", axum::routing::post(score_endpoint))
        .route("/api/v1/day-report", axum::routing::post(day_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn analyze_chart(
    state: &AppState,
    chart: ChartRequest,
) -> Result<(FourPillars, Vec<RelationFact>), AppError> {
    let ChartRequest {
        pillars,
        saju,
        day_master_stem,
        options,
    } = chart;
    let overrides = options.unwrap_or_default();

    let pillars = match (pillars, saju) {
        (Some(pillars), _) => pillars,
        (None, Some(saju)) => {
            to_analyze_input_from_saju(&saju, day_master_stem.as_deref(), None).pillars
        }
        (None, None) => {
            return Err(AppError::InvalidRequest(
                "either `pillars` or `saju` must be supplied".to_string(),
            ))
        }
    };

    let analyzer = RelationAnalyzer::new(state.relation_options.merged(&overrides));
    let facts = analyzer.analyze(&pillars);
    Ok((pillars, facts))
}

pub(crate) async fn relations_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ChartRequest>,
) -> Result<Json<RelationsResponse>, AppError> {
    let (pillars, facts) = analyze_chart(&state, payload)?;
    let flags = RelationFlags::from_facts(&facts);
    Ok(Json(RelationsResponse {
        pillars,
        facts,
        flags,
    }))
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Json<ScoreResult> {
    let result = state.engine.score(&payload.saju, &payload.astro);
    info!(
        total = result.total_score,
        grade = result.grade,
        cross_verified = result.cross_verified,
        "day scored"
    );
    Json(result)
}

pub(crate) async fn day_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DayReportRequest>,
) -> Result<Json<DayReportResponse>, AppError> {
    let DayReportRequest {
        chart,
        scores,
        birth_date,
        target_date,
    } = payload;
    let ScoreRequest {
        mut saju,
        mut astro,
    } = scores;

    let (_, facts) = analyze_chart(&state, chart)?;
    let flags = RelationFlags::from_facts(&facts);
    saju.iljin = saju.iljin.with_relation_flags(&flags);

    if let (Some(birth), None) = (birth_date, astro.solar_return.proximity) {
        let target = target_date.unwrap_or_else(|| Local::now().date_naive());
        astro.solar_return.proximity = Some(SolarReturnProximity::from_dates(birth, target));
    }

    let score = state.engine.score(&saju, &astro);
    let conflict_downgrade = score.grade == 0 && flags.has_conflict();
    let grade = if conflict_downgrade { 1 } else { score.grade };
    let label = state.engine.grading().label(grade);

    info!(
        total = score.total_score,
        grade,
        conflict_downgrade,
        facts = facts.len(),
        "day report built"
    );

    Ok(Json(DayReportResponse {
        facts,
        flags,
        score,
        grade,
        label,
        conflict_downgrade,
    }))
}
