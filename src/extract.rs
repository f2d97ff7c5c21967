use std::path::{Path, PathBuf};

use crate::docx::OutputDocument;
use crate::error::Error;
use crate::findings::collect_findings;
use crate::images::extract_paragraph_images;
use crate::model::{Document, Paragraph};
use crate::progress::Progress;
use crate::spelling::{Dictionary, correct_text};
use crate::text::normalize;

/// Paragraphs with exactly this text (trimmed) mark the start of one
/// vulnerability's write-up and trigger record interleaving.
pub const SUBHEADING_MARKERS: [&str; 4] =
    ["Description", "Severity", "Proof of Concept", "Remediations"];

fn is_marker(trimmed: &str) -> bool {
    SUBHEADING_MARKERS.contains(&trimmed)
}

fn contains_marker(text: &str) -> bool {
    SUBHEADING_MARKERS.iter().any(|m| text.contains(m))
}

pub struct ExtractOptions {
    /// Trimmed text of the heading that opens the target section.
    pub start_heading: String,
    /// Where the result document is written.
    pub output: PathBuf,
}

/// For every heading at `level`, whether the region up to (excluding) the
/// next same-level heading contains a subheading marker anywhere in its
/// text. Single reverse pass; entries at non-heading indices are unused.
///
/// A same-level heading's own text never counts toward the region before it;
/// sub-level headings participate like any other paragraph.
fn marker_region_index(paragraphs: &[Paragraph], level: u32) -> Vec<bool> {
    let mut index = vec![false; paragraphs.len()];
    let mut seen_marker = false;
    for (i, para) in paragraphs.iter().enumerate().rev() {
        if para.heading_level() == Some(level) {
            index[i] = seen_marker;
            seen_marker = false;
        } else if contains_marker(&para.text) {
            seen_marker = true;
        }
    }
    index
}

/// Extract the configured section into a new document at `options.output`.
///
/// One run-to-completion pass: collect vulnerability records from the
/// tables, then walk the paragraph list with an `in_section` flag, emitting
/// cleaned text, embedded images, and interleaved records. Scratch files
/// live in a temp dir that is removed however the run ends; progress hits
/// 100 only after the output document is on disk.
pub fn extract_section(
    doc: &Document,
    options: &ExtractOptions,
    dict: &dyn Dictionary,
    progress: &Progress,
) -> Result<(), Error> {
    let start_level = doc
        .paragraphs
        .iter()
        .find(|p| p.is_heading() && p.text.trim() == options.start_heading)
        .and_then(|p| p.heading_level())
        .ok_or_else(|| Error::StartHeadingNotFound(options.start_heading.clone()))?;
    log::info!(
        "start heading {:?} found at level {start_level}",
        options.start_heading
    );

    let scratch = tempfile::Builder::new().prefix("docx-findings-").tempdir()?;
    let out = build_section(doc, options, start_level, dict, scratch.path(), progress)?;

    out.save(&options.output)?;
    scratch.close()?;
    progress.set(100);
    Ok(())
}

fn build_section(
    doc: &Document,
    options: &ExtractOptions,
    start_level: u32,
    dict: &dyn Dictionary,
    scratch_dir: &Path,
    progress: &Progress,
) -> Result<OutputDocument, Error> {
    let records = collect_findings(doc, dict);
    let region_has_marker = marker_region_index(&doc.paragraphs, start_level);

    let mut out = OutputDocument::new();
    let mut in_section = false;
    let mut record_cursor = 0usize;
    let total = doc.paragraphs.len();

    for (idx, para) in doc.paragraphs.iter().enumerate() {
        let trimmed = para.text.trim();

        let mut emit = true;
        if para.is_heading() {
            if trimmed == options.start_heading {
                in_section = true;
            } else if in_section
                && para.heading_level() == Some(start_level)
                && !region_has_marker[idx]
            {
                // Sibling heading with no findings content ahead closes the
                // section; one whose region still carries markers is kept and
                // flows through as body text below.
                in_section = false;
                emit = false;
            }
        }

        if in_section && emit {
            if is_marker(trimmed) && record_cursor < records.len() {
                let record = &records[record_cursor];
                out.add_paragraph(&format!(
                    "Vulnerability Name: {}",
                    record.name.as_deref().unwrap_or("")
                ));
                out.add_paragraph(&format!(
                    "Affected Host: {}",
                    record.host.as_deref().unwrap_or("")
                ));
                out.add_paragraph(&format!(
                    "Risk Rating: {}",
                    record.risk_rating.as_deref().unwrap_or("")
                ));
                out.add_paragraph(trimmed);
                record_cursor += 1;
            } else {
                let corrected = correct_text(dict, &para.text);
                out.add_paragraph(&normalize(&corrected));
                extract_paragraph_images(doc, para, scratch_dir, &mut out)?;
            }
        }

        progress.set((100 * idx / total) as u8);
    }

    log::info!(
        "section pass done: {} paragraphs out, {}/{} records consumed",
        out.paragraph_count(),
        record_cursor,
        records.len()
    );
    Ok(out)
}
