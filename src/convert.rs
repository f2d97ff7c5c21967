use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Upload gate: only Word documents, legacy or modern, get past this.
pub fn check_extension(path: &Path) -> Result<(), Error> {
    let ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("doc") || e.eq_ignore_ascii_case("docx"));
    if ok {
        Ok(())
    } else {
        Err(Error::UnsupportedFileType(path.to_path_buf()))
    }
}

pub fn is_legacy_doc(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("doc"))
}

/// Turns a legacy binary .doc into a .docx next to it. Backed by an external
/// office-automation process; any failure aborts the run.
pub trait LegacyConverter {
    fn convert_to_docx(&self, doc_path: &Path) -> Result<PathBuf, Error>;
}

/// LibreOffice-based converter (`soffice --headless --convert-to docx`).
pub struct SofficeConverter {
    program: String,
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self {
            program: "soffice".to_string(),
        }
    }
}

impl SofficeConverter {
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl LegacyConverter for SofficeConverter {
    fn convert_to_docx(&self, doc_path: &Path) -> Result<PathBuf, Error> {
        let out_dir = doc_path.parent().unwrap_or_else(|| Path::new("."));
        let output = Command::new(&self.program)
            .args(["--headless", "--convert-to", "docx", "--outdir"])
            .arg(out_dir)
            .arg(doc_path)
            .output()
            .map_err(|e| Error::Conversion(format!("failed to spawn {}: {e}", self.program)))?;
        if !output.status.success() {
            return Err(Error::Conversion(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let converted = doc_path.with_extension("docx");
        if !converted.exists() {
            return Err(Error::Conversion(format!(
                "converter produced no file at {}",
                converted.display()
            )));
        }
        log::info!("converted {} -> {}", doc_path.display(), converted.display());
        Ok(converted)
    }
}

/// Removes edit-restriction protection from a package in place. Idempotent:
/// an unprotected document is left untouched.
pub trait ProtectionRemover {
    fn remove_protection(&self, docx_path: &Path) -> Result<(), Error>;
}

static DOC_PROTECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:documentProtection\b[^>]*/>").unwrap());

/// Drops w:documentProtection from word/settings.xml by rewriting the
/// package. Parts other than settings.xml are copied through untouched.
pub struct SettingsStrip;

impl ProtectionRemover for SettingsStrip {
    fn remove_protection(&self, docx_path: &Path) -> Result<(), Error> {
        let file = std::fs::File::open(docx_path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

        let settings = {
            let mut content = String::new();
            match archive.by_name("word/settings.xml") {
                Ok(mut entry) => {
                    entry.read_to_string(&mut content)?;
                    Some(content)
                }
                Err(_) => None,
            }
        };
        let Some(settings) = settings else {
            return Ok(());
        };
        if !DOC_PROTECTION.is_match(&settings) {
            return Ok(());
        }
        let stripped = DOC_PROTECTION.replace_all(&settings, "").into_owned();

        let parent = docx_path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        {
            let mut writer = zip::ZipWriter::new(tmp.as_file_mut());
            let options = zip::write::SimpleFileOptions::default();
            for i in 0..archive.len() {
                let entry = archive.by_index_raw(i)?;
                if entry.name() == "word/settings.xml" {
                    drop(entry);
                    writer.start_file("word/settings.xml", options)?;
                    writer.write_all(stripped.as_bytes())?;
                } else {
                    writer.raw_copy_file(entry)?;
                }
            }
            writer.finish()?;
        }
        tmp.persist(docx_path).map_err(|e| Error::Io(e.error))?;
        log::info!("removed document protection from {}", docx_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_accepts_word_extensions_case_insensitively() {
        assert!(check_extension(Path::new("report.docx")).is_ok());
        assert!(check_extension(Path::new("REPORT.DOC")).is_ok());
        assert!(check_extension(Path::new("report.pdf")).is_err());
        assert!(check_extension(Path::new("report")).is_err());
    }

    #[test]
    fn legacy_detection() {
        assert!(is_legacy_doc(Path::new("a.doc")));
        assert!(!is_legacy_doc(Path::new("a.docx")));
    }

    #[test]
    fn protection_element_pattern() {
        let xml = r#"<w:settings><w:documentProtection w:edit="readOnly" w:enforcement="1"/><w:zoom w:percent="100"/></w:settings>"#;
        let out = DOC_PROTECTION.replace_all(xml, "");
        assert!(!out.contains("documentProtection"));
        assert!(out.contains("w:zoom"));
    }
}
