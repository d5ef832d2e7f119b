//! Axum route handlers for the Interview API.

use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::batch::Simulation;
use crate::interview::catalog::{
    default_roster, AVAILABLE_MODELS, DEFAULT_NUM_QUESTIONS, JOB_TITLES,
};
use crate::interview::models::{CandidateSlot, JobTitle, RunResult};
use crate::interview::writer::{latest_results, read_results};
use crate::state::AppState;

/// Upper bound on questions per candidate for a single HTTP request.
pub const MAX_QUESTIONS_PER_REQUEST: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartInterviewRequest {
    pub job_title: String,
    pub num_questions: Option<usize>,
    /// Roster override, in interview order. Defaults to the built-in roster.
    pub models: Option<Vec<CandidateSlot>>,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub filename: String,
    pub result: RunResult,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub job_titles: Vec<&'static str>,
    pub available_models: Vec<&'static str>,
    pub default_roster: Vec<CandidateSlot>,
    pub default_num_questions: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
///
/// Lists selectable job titles and models, plus the default roster.
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        job_titles: JOB_TITLES.to_vec(),
        available_models: AVAILABLE_MODELS.to_vec(),
        default_roster: default_roster(),
        default_num_questions: DEFAULT_NUM_QUESTIONS,
    })
}

/// POST /api/v1/interviews
///
/// Runs a full simulation synchronously, writes the result file, and returns it.
/// Provider failures are absorbed by the fallbacks; only validation and
/// result-file errors surface as HTTP errors.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Json(request): Json<StartInterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let (job_title, num_questions, roster) = validate_request(request)?;

    info!(
        "Starting simulation over HTTP: {} ({} candidates, {} questions)",
        job_title,
        roster.len(),
        num_questions
    );

    let mut settings = state.settings.clone();
    settings.num_questions = num_questions;

    let simulation = Simulation::new(state.llm.clone(), job_title, roster, settings);
    let (path, result) = simulation.run_and_save(&state.config.results_dir).await?;

    Ok(Json(InterviewResponse {
        filename: path.display().to_string(),
        result,
    }))
}

/// GET /api/v1/interviews/latest
///
/// Returns the newest results file in the results directory.
pub async fn handle_latest_interview(
    State(state): State<AppState>,
) -> Result<Json<InterviewResponse>, AppError> {
    let path = latest_results(&state.config.results_dir)?
        .ok_or_else(|| AppError::NotFound("No previous results found".to_string()))?;
    let result = read_results(&path)?;

    Ok(Json(InterviewResponse {
        filename: path.display().to_string(),
        result,
    }))
}

fn validate_request(
    request: StartInterviewRequest,
) -> Result<(JobTitle, usize, Vec<CandidateSlot>), AppError> {
    let job_title = request.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let num_questions = request.num_questions.unwrap_or(DEFAULT_NUM_QUESTIONS);
    if !(1..=MAX_QUESTIONS_PER_REQUEST).contains(&num_questions) {
        return Err(AppError::Validation(format!(
            "num_questions must be between 1 and {MAX_QUESTIONS_PER_REQUEST}"
        )));
    }

    let roster = request.models.unwrap_or_else(default_roster);
    if roster.is_empty() {
        return Err(AppError::Validation("models cannot be empty".to_string()));
    }

    let mut seen = HashSet::new();
    for slot in &roster {
        if slot.key.trim().is_empty() || slot.model.trim().is_empty() {
            return Err(AppError::Validation(
                "every candidate needs a key and a model".to_string(),
            ));
        }
        if !seen.insert(slot.key.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate candidate key '{}'",
                slot.key
            )));
        }
    }

    Ok((JobTitle::new(job_title), num_questions, roster))
}
