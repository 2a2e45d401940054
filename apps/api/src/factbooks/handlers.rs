//! Axum route handlers for the Factbook API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::factbook::{FactbookDetail, FactbookInput, Section};
use crate::state::AppState;
use crate::store::{FactbookPage, FactbookQuery, SortBy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::synthesis::pipeline::synthesize;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateFactbookResponse {
    pub id: Uuid,
    pub message: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query string for the list endpoint. `sort` is accepted as an alias of `sort_by`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    fn into_query(self) -> Result<FactbookQuery, AppError> {
        let search = non_blank(self.search);
        let category = non_blank(self.category).filter(|c| c != "all");
        let sort_by = match non_blank(self.sort_by.or(self.sort)) {
            Some(raw) => raw.parse::<SortBy>()?,
            None => SortBy::default(),
        };

        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::Validation("page starts at 1".to_string()));
        }
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(FactbookQuery {
            search,
            category,
            sort_by,
            page,
            limit,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unparseable ids cannot name a stored factbook.
fn parse_factbook_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Factbook {raw} not found")))
}

fn validate_input(input: &FactbookInput) -> Result<(), AppError> {
    if input.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "company_name cannot be empty".to_string(),
        ));
    }
    if input.product_name.trim().is_empty() {
        return Err(AppError::Validation(
            "product_name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/factbooks
///
/// Generates all six sections, then stores the factbook and its sections in
/// one transaction. Nothing is stored if any section fails.
pub async fn handle_create_factbook(
    State(state): State<AppState>,
    Json(input): Json<FactbookInput>,
) -> Result<Json<CreateFactbookResponse>, AppError> {
    validate_input(&input)?;

    let sections = synthesize(state.llm.as_ref(), &input).await?;
    let id = state.store.create_factbook(&input, &sections).await?;

    info!("Created factbook {id} for {}", input.company_name);

    Ok(Json(CreateFactbookResponse {
        id,
        message: "Factbook created".to_string(),
        sections,
    }))
}

/// GET /api/factbooks?search=&category=&sort_by=recent&page=1&limit=20
pub async fn handle_list_factbooks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<FactbookPage>, AppError> {
    let query = params.into_query()?;
    let page = state.store.list_factbooks(&query).await?;
    Ok(Json(page))
}

/// GET /api/factbooks/:id
///
/// Returns the factbook with its ordered sections and counts the view.
pub async fn handle_get_factbook(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<FactbookDetail>, AppError> {
    let id = parse_factbook_id(&raw_id)?;
    let detail = state
        .store
        .view_factbook(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Factbook {id} not found")))?;
    Ok(Json(detail))
}

/// DELETE /api/factbooks/:id
///
/// Removes the factbook and its sections. Unknown ids are a 404.
pub async fn handle_delete_factbook(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_factbook_id(&raw_id)?;
    if !state.store.delete_factbook(id).await? {
        return Err(AppError::NotFound(format!("Factbook {id} not found")));
    }
    Ok(Json(MessageResponse {
        message: "Factbook deleted".to_string(),
    }))
}
