//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{BudgetRequest, BudgetResponse, CategoryResponse, ErrorResponse};
use crate::budget::{Quantity, RandomIds, compute};
use crate::config::DIVERSITY_RANGE_PCT;
use crate::error::BudgetError;
use crate::report;
use crate::session::{DEFAULT_DIVERSITY_FACTOR_PCT, Session};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// NotFound → 404, InvalidQuantity → 422.
fn budget_error(e: &BudgetError) -> ApiError {
    let status = if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    api_error(status, e.to_string())
}

/// Builds an isolated session for one request.
fn session_for(state: &AppState, req: &BudgetRequest) -> Result<Session<RandomIds>, ApiError> {
    let pct = req
        .diversity_factor_pct
        .unwrap_or(DEFAULT_DIVERSITY_FACTOR_PCT);
    if !DIVERSITY_RANGE_PCT.contains(&pct) {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "`diversity_factor_pct` must be in [{}, {}], got {pct}",
                DIVERSITY_RANGE_PCT.start(),
                DIVERSITY_RANGE_PCT.end()
            ),
        ));
    }

    let mut session = Session::new(Arc::clone(&state.catalog), RandomIds::from_os_rng());
    session.set_site_name(req.site_name.clone());
    session.set_diversity_factor_pct(pct);
    for item in &req.items {
        Quantity::try_from(item.quantity)
            .and_then(|q| match &item.category {
                Some(category) => session.add(category, &item.model, q.get()),
                None => session.add_model(&item.model, q.get()),
            })
            .map_err(|e| budget_error(&e))?;
    }
    Ok(session)
}

/// Lists every category with its models.
///
/// `GET /catalog` → 200 + `Vec<CategoryResponse>` JSON
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryResponse>> {
    let categories = state
        .catalog
        .categories()
        .into_iter()
        .map(|name| CategoryResponse {
            name: name.to_string(),
            models: state.catalog.models(name).unwrap_or_default().to_vec(),
        })
        .collect();
    Json(categories)
}

/// Lists the models of one category.
///
/// `GET /catalog/{category}` → 200, or 404 for an unknown category
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let models = state
        .catalog
        .models(&category)
        .map_err(|e| budget_error(&e))?;
    Ok(Json(CategoryResponse {
        name: category,
        models: models.to_vec(),
    }))
}

/// Computes a budget. An empty item list yields a zero result.
///
/// `POST /budget` → 200 + `BudgetResponse` JSON, 404 for unknown
/// categories/models, 422 for invalid quantity or diversity factor
pub async fn post_budget(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BudgetRequest>,
) -> Result<Json<BudgetResponse>, ApiError> {
    let session = session_for(&state, &req)?;
    let result = compute(session.items(), session.diversity_factor_pct());
    Ok(Json(BudgetResponse {
        site_name: session.site_name().to_string(),
        diversity_factor_pct: session.diversity_factor_pct(),
        items: session.items().clone(),
        result,
        figures: result.figures(),
    }))
}

/// Renders the text report for a budget request.
///
/// `POST /report` → 200 + `text/plain`, 422 when no items are given
pub async fn post_report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BudgetRequest>,
) -> Result<String, ApiError> {
    let mut session = session_for(&state, &req)?;
    session.save().map(report::format).ok_or_else(|| {
        api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "at least one item is required for a report",
        )
    })
}
