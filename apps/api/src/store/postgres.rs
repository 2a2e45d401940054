use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::factbook::{
    Factbook, FactbookDetail, FactbookInput, Section, Source, StoredSection,
};
use crate::models::rfp::{ExtractedFacts, RfpUpload};
use crate::store::{
    ensure_dense_order, like_pattern, FactbookPage, FactbookQuery, FactbookStore, SortBy,
};

const FACTBOOK_COLUMNS: &str = "id, company_name, product_name, category, competitors, \
    proposal_areas, advertising_types, created_at, updated_at, view_count";

// Matches the list filters: $1 = LIKE pattern or NULL, $2 = category or NULL.
const LIST_FILTER: &str = "($1::text IS NULL OR company_name ILIKE $1 OR product_name ILIKE $1) \
    AND ($2::text IS NULL OR category = $2)";

#[derive(Debug, FromRow)]
struct FactbookRow {
    id: Uuid,
    company_name: String,
    product_name: String,
    category: String,
    competitors: Json<Vec<String>>,
    proposal_areas: Json<Vec<String>>,
    advertising_types: Json<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    view_count: i32,
}

impl From<FactbookRow> for Factbook {
    fn from(row: FactbookRow) -> Self {
        Factbook {
            id: row.id,
            company_name: row.company_name,
            product_name: row.product_name,
            category: row.category,
            competitors: row.competitors.0,
            proposal_areas: row.proposal_areas.0,
            advertising_types: row.advertising_types.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            view_count: row.view_count,
        }
    }
}

#[derive(Debug, FromRow)]
struct SectionRow {
    id: Uuid,
    factbook_id: Uuid,
    section_order: i32,
    title: String,
    content: String,
    sources: Json<Vec<Source>>,
}

impl From<SectionRow> for StoredSection {
    fn from(row: SectionRow) -> Self {
        StoredSection {
            id: row.id,
            factbook_id: row.factbook_id,
            section_order: row.section_order,
            title: row.title,
            content: row.content,
            sources: row.sources.0,
        }
    }
}

#[derive(Debug, FromRow)]
struct RfpUploadRow {
    id: Uuid,
    filename: String,
    file_path: String,
    extracted_data: Json<ExtractedFacts>,
    created_at: DateTime<Utc>,
}

/// PostgreSQL-backed store. The pool is owned by `main` and closed on shutdown.
#[derive(Clone)]
pub struct PgFactbookStore {
    pool: PgPool,
}

impl PgFactbookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Recent => "updated_at DESC, created_at DESC, id",
        SortBy::Name => "company_name ASC, product_name ASC, id",
    }
}

#[async_trait]
impl FactbookStore for PgFactbookStore {
    async fn create_factbook(
        &self,
        input: &FactbookInput,
        sections: &[Section],
    ) -> Result<Uuid, AppError> {
        ensure_dense_order(sections)?;

        let factbook_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO factbooks
                (id, company_name, product_name, category,
                 competitors, proposal_areas, advertising_types)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(factbook_id)
        .bind(&input.company_name)
        .bind(&input.product_name)
        .bind(&input.category)
        .bind(Json(&input.competitors))
        .bind(Json(&input.proposal_areas))
        .bind(Json(&input.advertising_types))
        .execute(&mut *tx)
        .await?;

        for section in sections {
            sqlx::query(
                r#"
                INSERT INTO factbook_sections
                    (id, factbook_id, section_order, title, content, sources)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(factbook_id)
            .bind(section.section_order)
            .bind(&section.title)
            .bind(&section.content)
            .bind(Json(&section.sources))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "Stored factbook {} with {} sections",
            factbook_id,
            sections.len()
        );
        Ok(factbook_id)
    }

    async fn list_factbooks(&self, query: &FactbookQuery) -> Result<FactbookPage, AppError> {
        let pattern = query.search.as_deref().map(like_pattern);
        let category = query.category.as_deref();

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM factbooks WHERE {LIST_FILTER}"))
                .bind(pattern.as_deref())
                .bind(category)
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT {FACTBOOK_COLUMNS} FROM factbooks WHERE {LIST_FILTER} \
             ORDER BY {} LIMIT $3 OFFSET $4",
            order_clause(query.sort_by)
        );
        let rows = sqlx::query_as::<_, FactbookRow>(&sql)
            .bind(pattern.as_deref())
            .bind(category)
            .bind(i64::from(query.limit))
            .bind(query.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(FactbookPage {
            factbooks: rows.into_iter().map(Factbook::from).collect(),
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn view_factbook(&self, id: Uuid) -> Result<Option<FactbookDetail>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, FactbookRow>(&format!(
            "UPDATE factbooks SET view_count = view_count + 1 WHERE id = $1 \
             RETURNING {FACTBOOK_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let sections = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, factbook_id, section_order, title, content, sources
            FROM factbook_sections
            WHERE factbook_id = $1
            ORDER BY section_order ASC
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(FactbookDetail {
            factbook: row.into(),
            sections: sections.into_iter().map(StoredSection::from).collect(),
        }))
    }

    async fn delete_factbook(&self, id: Uuid) -> Result<bool, AppError> {
        // factbook_sections rows go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM factbooks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted factbook {id}");
        }
        Ok(deleted)
    }

    async fn record_rfp_upload(
        &self,
        filename: &str,
        file_path: &str,
        extracted: &ExtractedFacts,
    ) -> Result<RfpUpload, AppError> {
        let row = sqlx::query_as::<_, RfpUploadRow>(
            r#"
            INSERT INTO rfp_uploads (id, filename, file_path, extracted_data)
            VALUES ($1, $2, $3, $4)
            RETURNING id, filename, file_path, extracted_data, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(filename)
        .bind(file_path)
        .bind(Json(extracted))
        .fetch_one(&self.pool)
        .await?;

        Ok(RfpUpload {
            id: row.id,
            filename: row.filename,
            file_path: row.file_path,
            extracted_data: row.extracted_data.0,
            created_at: row.created_at,
        })
    }
}
