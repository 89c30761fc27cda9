//! Text extraction from uploaded résumé documents (PDF and DOCX).

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

#[derive(Debug, Clone, Error)]
#[error("Unsupported document format '{0}' (expected PDF or DOCX)")]
pub struct UnsupportedFormatError(pub String);

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX archive: {0}")]
    Docx(String),
}

impl DocumentFormat {
    /// Detects the format from a file name's extension.
    pub fn from_filename(filename: &str) -> Result<Self, UnsupportedFormatError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(UnsupportedFormatError(filename.to_string())),
        }
    }
}

/// Extracts plain text from an in-memory document.
pub fn extract_text(document: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(document)
            .map_err(|e| ExtractionError::Pdf(e.to_string())),
        DocumentFormat::Docx => extract_docx(document),
    }
}

static RE_PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>").unwrap());
static RE_TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").unwrap());

/// Reads `word/document.xml` out of the DOCX zip container and joins the text
/// runs of each paragraph, one paragraph per line.
fn extract_docx(document: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(document))
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(docx_xml_to_text(&xml))
}

fn docx_xml_to_text(xml: &str) -> String {
    RE_PARAGRAPH_END
        .split(xml)
        .map(|paragraph| {
            RE_TEXT_RUN
                .captures_iter(paragraph)
                .filter_map(|c| c.get(1))
                .map(|m| unescape_xml(m.as_str()))
                .collect::<String>()
        })
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Python </w:t></w:r><w:r><w:t>&amp; Kubernetes</w:t></w:r></w:p>
    <w:p></w:p>
  </w:body>
</w:document>"#;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(
            DocumentFormat::from_filename("resume.pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("My.Resume.DOCX").unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_formats_rejected() {
        for name in ["resume.txt", "resume.doc", "resume", "pdf"] {
            let err = DocumentFormat::from_filename(name).unwrap_err();
            assert_eq!(err.0, name);
        }
    }

    #[test]
    fn test_docx_xml_to_text_joins_runs_per_paragraph() {
        let text = docx_xml_to_text(DOCUMENT_XML);
        assert_eq!(text, "Jane Doe\nPython & Kubernetes");
    }

    #[test]
    fn test_extract_docx_from_zip() {
        let bytes = build_docx(DOCUMENT_XML);
        let text = extract_text(&bytes, DocumentFormat::Docx).unwrap();
        assert!(text.contains("Python & Kubernetes"));
    }

    #[test]
    fn test_docx_without_document_xml_fails() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("other.xml", zip::write::FileOptions::default())
                .unwrap();
            writer.finish().unwrap();
        }
        let result = extract_text(&buf.into_inner(), DocumentFormat::Docx);
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }

    #[test]
    fn test_garbage_is_not_a_pdf() {
        let result = extract_text(b"definitely not a pdf", DocumentFormat::Pdf);
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }
}
