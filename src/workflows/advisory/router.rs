use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::eligibility::EligibilityVerdict;
use super::matching::RankedMatch;
use super::profile::BusinessProfile;
use super::service::{AdvisoryService, ReviewReport};

/// Router builder exposing the advisory HTTP endpoints.
pub fn advisory_router(service: Arc<AdvisoryService>) -> Router {
    Router::new()
        .route("/api/v1/advisory/eligibility", post(eligibility_handler))
        .route("/api/v1/advisory/match", post(match_handler))
        .route("/api/v1/advisory/review", post(review_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    profile: BusinessProfile,
    /// Programme codes to evaluate; all canonical programmes when omitted.
    #[serde(default)]
    programs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    generated_on: NaiveDate,
    verdicts: Vec<EligibilityVerdict>,
}

pub(crate) async fn eligibility_handler(
    State(service): State<Arc<AdvisoryService>>,
    Json(request): Json<EligibilityRequest>,
) -> Response {
    let EligibilityRequest { profile, programs } = request;

    let verdicts = if programs.is_empty() {
        service.eligibility_matrix(&profile)
    } else {
        let mut verdicts = Vec::with_capacity(programs.len());
        for program in &programs {
            match service.check_eligibility(&profile, program) {
                Ok(verdict) => verdicts.push(verdict),
                Err(error) => {
                    let payload = json!({ "error": error.to_string() });
                    return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
                }
            }
        }
        verdicts
    };

    let body = EligibilityResponse {
        generated_on: Local::now().date_naive(),
        verdicts,
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    profile: BusinessProfile,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    generated_on: NaiveDate,
    matches: Vec<RankedMatch>,
}

pub(crate) async fn match_handler(
    State(service): State<Arc<AdvisoryService>>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let matches = service.match_scores(&request.profile);
    Json(MatchResponse {
        generated_on: Local::now().date_naive(),
        matches,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    /// Plain text already extracted from the uploaded document by the
    /// PDF/OCR collaborator.
    document_text: String,
    profile: BusinessProfile,
}

pub(crate) async fn review_handler(
    State(service): State<Arc<AdvisoryService>>,
    Json(request): Json<ReviewRequest>,
) -> Json<ReviewReport> {
    Json(service.review_document(&request.document_text, &request.profile))
}
