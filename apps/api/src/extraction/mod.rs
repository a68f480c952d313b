//! Text extraction: turns an uploaded resume into the plain text fed to the prompt builder.
//!
//! The extractor is a trait so the analysis service and route handlers can be exercised
//! without real PDF fixtures. `AppState` carries an `Arc<dyn TextExtractor>`.

use bytes::Bytes;
use thiserror::Error;

pub mod pdf;

pub use pdf::PdfTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no document was uploaded")]
    MissingInput,

    #[error("document is unreadable: {0}")]
    Unreadable(String),

    #[error("document has no pages")]
    NoPages,

    #[error("document contains no extractable text")]
    NoText,
}

/// An uploaded resume, consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub file_name: Option<String>,
}

impl UploadedDocument {
    pub fn new(bytes: impl Into<Bytes>, file_name: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name,
        }
    }
}

/// Page-ordered text of a document. Page boundaries are not marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ExtractedText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: Option<&UploadedDocument>) -> Result<ExtractedText, ExtractionError>;
}

/// Joins page texts in order with no separator.
///
/// Fails with `NoPages` for an empty page list and `NoText` when every page is blank,
/// so an unreadable scan never turns into a silent empty analysis.
pub fn concat_pages<I, S>(pages: I) -> Result<ExtractedText, ExtractionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    let mut page_count = 0usize;
    for page in pages {
        text.push_str(page.as_ref());
        page_count += 1;
    }

    if page_count == 0 {
        return Err(ExtractionError::NoPages);
    }
    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(ExtractedText(text))
}
