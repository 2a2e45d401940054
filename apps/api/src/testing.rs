//! In-memory doubles for the LLM, the document store, and upload storage.
//! Used by unit tests and router tests so neither Postgres, S3 nor a live
//! LLM is needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{Completer, LlmError};
use crate::models::factbook::{Factbook, FactbookDetail, FactbookInput, Section, StoredSection};
use crate::models::rfp::{ExtractedFacts, RfpUpload};
use crate::state::AppState;
use crate::store::{ensure_dense_order, FactbookPage, FactbookQuery, FactbookStore, SortBy};
use crate::uploads::UploadStorage;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

type Reply = dyn Fn(usize, &str) -> Result<String, LlmError> + Send + Sync;

/// Completer whose reply is computed from the 0-based call index and the user prompt.
pub struct ScriptedCompleter {
    reply: Box<Reply>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCompleter {
    pub fn new(
        reply: impl Fn(usize, &str) -> Result<String, LlmError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    pub fn failing(err: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::new(move |_, _| Err(err()))
    }

    /// Numbered prose for every call except `fail_at`, which returns a 503.
    pub fn failing_at(fail_at: usize) -> Self {
        Self::new(move |n, _| {
            if n == fail_at {
                Err(LlmError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                })
            } else {
                Ok(format!("Generated paragraph {}.", n + 1))
            }
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                system: system_prompt.to_string(),
                user: user_prompt.to_string(),
                temperature,
            });
            calls.len() - 1
        };
        (self.reply)(n, user_prompt)
    }
}

#[derive(Default)]
struct MemoryTables {
    factbooks: Vec<Factbook>,
    sections: Vec<StoredSection>,
    uploads: Vec<RfpUpload>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
    fail_upload_records: AtomicBool,
}

impl MemoryStore {
    /// Makes every later `record_rfp_upload` fail as if the database were down.
    pub fn fail_upload_records(&self) {
        self.fail_upload_records.store(true, Ordering::SeqCst);
    }

    pub fn section_count(&self) -> usize {
        self.tables.lock().unwrap().sections.len()
    }

    pub fn uploads(&self) -> Vec<RfpUpload> {
        self.tables.lock().unwrap().uploads.clone()
    }
}

#[async_trait]
impl FactbookStore for MemoryStore {
    async fn create_factbook(
        &self,
        input: &FactbookInput,
        sections: &[Section],
    ) -> Result<Uuid, AppError> {
        ensure_dense_order(sections)?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut tables = self.tables.lock().unwrap();
        tables.factbooks.push(Factbook {
            id,
            company_name: input.company_name.clone(),
            product_name: input.product_name.clone(),
            category: input.category.clone(),
            competitors: input.competitors.clone(),
            proposal_areas: input.proposal_areas.clone(),
            advertising_types: input.advertising_types.clone(),
            created_at: now,
            updated_at: now,
            view_count: 0,
        });
        tables
            .sections
            .extend(sections.iter().map(|s| StoredSection {
                id: Uuid::new_v4(),
                factbook_id: id,
                section_order: s.section_order,
                title: s.title.clone(),
                content: s.content.clone(),
                sources: s.sources.clone(),
            }));
        Ok(id)
    }

    async fn list_factbooks(&self, query: &FactbookQuery) -> Result<FactbookPage, AppError> {
        let tables = self.tables.lock().unwrap();
        let needle = query.search.as_ref().map(|s| s.to_lowercase());

        let mut matches: Vec<Factbook> = tables
            .factbooks
            .iter()
            .filter(|f| {
                needle.as_ref().map_or(true, |n| {
                    f.company_name.to_lowercase().contains(n)
                        || f.product_name.to_lowercase().contains(n)
                })
            })
            .filter(|f| query.category.as_ref().map_or(true, |c| &f.category == c))
            .cloned()
            .collect();

        // Same tie-breakers as the Postgres ORDER BY.
        match query.sort_by {
            SortBy::Recent => matches.sort_by(|a, b| {
                b.updated_at
                    .cmp(&a.updated_at)
                    .then(b.created_at.cmp(&a.created_at))
                    .then(a.id.cmp(&b.id))
            }),
            SortBy::Name => matches.sort_by(|a, b| {
                a.company_name
                    .cmp(&b.company_name)
                    .then(a.product_name.cmp(&b.product_name))
                    .then(a.id.cmp(&b.id))
            }),
        }

        let total = matches.len() as i64;
        let factbooks = matches
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();

        Ok(FactbookPage {
            factbooks,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    async fn view_factbook(&self, id: Uuid) -> Result<Option<FactbookDetail>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(factbook) = tables.factbooks.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        factbook.view_count += 1;
        let factbook = factbook.clone();

        let mut sections: Vec<StoredSection> = tables
            .sections
            .iter()
            .filter(|s| s.factbook_id == id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.section_order);

        Ok(Some(FactbookDetail { factbook, sections }))
    }

    async fn delete_factbook(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.factbooks.len();
        tables.factbooks.retain(|f| f.id != id);
        if tables.factbooks.len() == before {
            return Ok(false);
        }
        tables.sections.retain(|s| s.factbook_id != id);
        Ok(true)
    }

    async fn record_rfp_upload(
        &self,
        filename: &str,
        file_path: &str,
        extracted: &ExtractedFacts,
    ) -> Result<RfpUpload, AppError> {
        if self.fail_upload_records.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let upload = RfpUpload {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            file_path: file_path.to_string(),
            extracted_data: extracted.clone(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().uploads.push(upload.clone());
        Ok(upload)
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub len: usize,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryUploads {
    objects: Mutex<Vec<StoredObject>>,
}

impl MemoryUploads {
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadStorage for MemoryUploads {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, AppError> {
        self.objects.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            len: body.len(),
            content_type: content_type.to_string(),
        });
        Ok(format!("memory://{key}"))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().retain(|o| o.key != key);
        Ok(())
    }
}

/// Handles to the doubles behind a test `AppState`.
pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub uploads: Arc<MemoryUploads>,
    pub llm: Arc<ScriptedCompleter>,
}

pub fn harness(llm: ScriptedCompleter) -> TestHarness {
    let store = Arc::new(MemoryStore::default());
    let uploads = Arc::new(MemoryUploads::default());
    let llm = Arc::new(llm);
    TestHarness {
        state: AppState {
            store: store.clone(),
            uploads: uploads.clone(),
            llm: llm.clone(),
        },
        store,
        uploads,
        llm,
    }
}
