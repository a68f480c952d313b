//! PDF backend for the text extractor, built on `pdf-extract`.

use pdf_extract::{Document, PlainTextOutput};
use tracing::debug;

use crate::extraction::{concat_pages, ExtractedText, ExtractionError, TextExtractor, UploadedDocument};

/// PDF files must carry the `%PDF-` marker within the first KiB.
const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extracts text page by page and concatenates it in page order.
/// Any page failing to decode fails the whole document; there is no partial result.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: Option<&UploadedDocument>) -> Result<ExtractedText, ExtractionError> {
        let document = document.ok_or(ExtractionError::MissingInput)?;

        if document.bytes.is_empty() {
            return Err(ExtractionError::Unreadable("uploaded file is empty".to_string()));
        }
        if !looks_like_pdf(&document.bytes) {
            return Err(ExtractionError::Unreadable(
                "uploaded file is not a PDF document".to_string(),
            ));
        }

        let doc = load_document(&document.bytes)?;
        let pages = extract_pages(&doc)?;

        debug!(
            "Extracted {} page(s) from {}",
            pages.len(),
            document.file_name.as_deref().unwrap_or("upload")
        );

        concat_pages(pages)
    }
}

fn load_document(bytes: &[u8]) -> Result<Document, ExtractionError> {
    let mut doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| ExtractionError::Unreadable(format!("encrypted document: {e}")))?;
    }
    Ok(doc)
}

/// One entry per page of the page tree, in page order.
fn extract_pages(doc: &Document) -> Result<Vec<String>, ExtractionError> {
    doc.get_pages()
        .keys()
        .map(|&page_num| extract_page(doc, page_num))
        .collect()
}

fn extract_page(doc: &Document, page_num: u32) -> Result<String, ExtractionError> {
    let mut text = String::new();
    {
        let mut output = PlainTextOutput::new(&mut text);
        pdf_extract::output_doc_page(doc, &mut output, page_num)
            .map_err(|e| ExtractionError::Unreadable(format!("page {page_num}: {e}")))?;
    }
    Ok(text)
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}
