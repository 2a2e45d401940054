//! Text layer extraction for uploaded RFPs.
//!
//! Only PDFs are read. PPTX, DOCX and HWP uploads, and PDFs without a usable
//! text layer, fall back to a file-name-only prompt.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::extraction::validation::RfpFormat;

/// Upper bound on document text forwarded to the LLM.
pub const MAX_PROMPT_TEXT_CHARS: usize = 20_000;

/// Returns normalized document text, or `None` when nothing usable was found.
pub async fn extract_text(format: RfpFormat, bytes: Bytes) -> Option<String> {
    match format {
        RfpFormat::Pdf => {
            // pdf-extract is synchronous and CPU bound.
            let result =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                    .await;
            match result {
                Ok(Ok(text)) => {
                    let normalized = normalize_text(&text);
                    debug!(
                        "Read {} characters from PDF text layer",
                        normalized.as_ref().map_or(0, |t| t.chars().count())
                    );
                    normalized
                }
                Ok(Err(e)) => {
                    warn!("PDF text extraction failed: {e:?}");
                    None
                }
                Err(e) => {
                    warn!("PDF text extraction task aborted: {e}");
                    None
                }
            }
        }
        RfpFormat::Pptx | RfpFormat::Docx | RfpFormat::Hwp => None,
    }
}

/// Collapses whitespace runs and truncates to `MAX_PROMPT_TEXT_CHARS`.
fn normalize_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(MAX_PROMPT_TEXT_CHARS).collect())
}
