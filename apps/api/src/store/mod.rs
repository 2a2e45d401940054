//! Document store — persistence for factbooks, their sections, and RFP uploads.
//!
//! Handlers depend on the `FactbookStore` trait, carried in `AppState` as
//! `Arc<dyn FactbookStore>`. `PgFactbookStore` is the production backend.

pub mod postgres;

use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::factbook::{Factbook, FactbookDetail, FactbookInput, Section};
use crate::models::rfp::{ExtractedFacts, RfpUpload};

pub use postgres::PgFactbookStore;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// List ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Most recently updated first.
    #[default]
    Recent,
    /// Company name, A to Z.
    Name,
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(SortBy::Recent),
            "name" => Ok(SortBy::Name),
            other => Err(AppError::Validation(format!(
                "unsupported sort_by '{other}' (expected 'recent' or 'name')"
            ))),
        }
    }
}

/// Filters and paging for listing factbooks.
#[derive(Debug, Clone)]
pub struct FactbookQuery {
    /// Case-insensitive substring over company and product name.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    pub sort_by: SortBy,
    /// 1-based.
    pub page: u32,
    pub limit: u32,
}

impl Default for FactbookQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            sort_by: SortBy::Recent,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FactbookQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FactbookPage {
    pub factbooks: Vec<Factbook>,
    /// Matches across all pages.
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
pub trait FactbookStore: Send + Sync {
    /// Persists a factbook and its sections atomically, returning the new id.
    async fn create_factbook(
        &self,
        input: &FactbookInput,
        sections: &[Section],
    ) -> Result<Uuid, AppError>;

    async fn list_factbooks(&self, query: &FactbookQuery) -> Result<FactbookPage, AppError>;

    /// Loads a factbook with its ordered sections, counting the view.
    /// `None` if absent.
    async fn view_factbook(&self, id: Uuid) -> Result<Option<FactbookDetail>, AppError>;

    /// Deletes a factbook and its sections. `false` if nothing was deleted.
    async fn delete_factbook(&self, id: Uuid) -> Result<bool, AppError>;

    async fn record_rfp_upload(
        &self,
        filename: &str,
        file_path: &str,
        extracted: &ExtractedFacts,
    ) -> Result<RfpUpload, AppError>;
}

/// Section orders must run 1, 2, 3, ... with no gaps or repeats.
pub fn ensure_dense_order(sections: &[Section]) -> Result<(), AppError> {
    for (idx, section) in sections.iter().enumerate() {
        let expected = idx as i32 + 1;
        if section.section_order != expected {
            return Err(AppError::Internal(anyhow::anyhow!(
                "section '{}' has order {} but position {} expects {}",
                section.title,
                section.section_order,
                idx,
                expected
            )));
        }
    }
    Ok(())
}

/// Escapes LIKE metacharacters so user search text matches literally.
pub(crate) fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
