use anyhow::{anyhow, bail};
use async_trait::async_trait;
use std::io::Write;

use docqa_core::traits::TextExtractor;

/// Treats the document payload as UTF-8 text.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, data: &[u8]) -> anyhow::Result<String> {
        let text = std::str::from_utf8(data)
            .map_err(|_| anyhow!("document is not valid UTF-8 text"))?;
        Ok(text.to_string())
    }
}

/// Extracts PDF text by shelling out to the `pdftotext` system binary
/// (poppler). The payload is written to a temp file that lives until the
/// subprocess exits.
pub struct PdftotextExtractor;

#[async_trait]
impl TextExtractor for PdftotextExtractor {
    async fn extract(&self, data: &[u8]) -> anyhow::Result<String> {
        let mut temp_pdf = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        temp_pdf.write_all(data)?;
        temp_pdf.flush()?;

        let output = tokio::process::Command::new("pdftotext")
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(temp_pdf.path())
            .arg("-")
            .output()
            .await
            .map_err(|e| anyhow!("pdftotext command failed: {} (is poppler installed?)", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("pdftotext failed: {}", stderr.trim());
        }
        let text = String::from_utf8_lossy(&output.stdout).to_string();
        if text.trim().is_empty() {
            bail!("pdftotext produced no text output");
        }
        tracing::debug!(chars = text.chars().count(), "extracted pdf text");
        Ok(text)
    }
}
