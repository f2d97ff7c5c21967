use std::path::{Path, PathBuf};

use crate::docx::OutputDocument;
use crate::error::Error;
use crate::model::{Document, Paragraph};

/// Display width for re-embedded pictures, in inches.
pub const DISPLAY_WIDTH_IN: f32 = 3.0;

fn decode_to_png(rel_id: &str, blob: &[u8], path: &Path) -> Result<(), Error> {
    let img = image::load_from_memory(blob).map_err(|e| Error::ImageDecode {
        rel_id: rel_id.to_string(),
        reason: e.to_string(),
    })?;
    img.save(path).map_err(|e| Error::ImageDecode {
        rel_id: rel_id.to_string(),
        reason: e.to_string(),
    })
}

/// Re-embed the pictures referenced by a paragraph's runs: each resolvable
/// reference is transcoded to `<scratch>/image_<rel_id>.png` and appended to
/// the output document after the paragraph's text, at fixed display width.
/// An undecodable blob aborts the run; a dangling reference is skipped.
pub fn extract_paragraph_images(
    doc: &Document,
    para: &Paragraph,
    scratch_dir: &Path,
    out: &mut OutputDocument,
) -> Result<(), Error> {
    for run in &para.runs {
        let Some(rel_id) = run.image_rel_id.as_deref() else {
            continue;
        };
        let Some(blob) = doc.image_blob(rel_id) else {
            log::warn!("run references unknown image relationship {rel_id}");
            continue;
        };
        let path = scratch_dir.join(format!("image_{rel_id}.png"));
        decode_to_png(rel_id, blob, &path)?;
        out.add_image(&path, DISPLAY_WIDTH_IN)?;
        log::debug!("embedded image {rel_id} ({} bytes)", blob.len());
    }
    Ok(())
}

/// Standalone mode: transcode every image part of the document to
/// `<scratch>/image_<index>.png`, in relationship order. Returns the paths
/// written; the count is the caller-facing result.
pub fn extract_all_images(doc: &Document, scratch_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();
    for (index, rel) in doc.image_rels.iter().enumerate() {
        let path = scratch_dir.join(format!("image_{index}.png"));
        decode_to_png(&rel.rel_id, &rel.data, &path)?;
        written.push(path);
    }
    log::info!("extracted {} images", written.len());
    Ok(written)
}
