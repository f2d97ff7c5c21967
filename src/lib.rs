mod convert;
mod docx;
mod error;
mod extract;
mod findings;
mod images;
mod model;
mod progress;
mod spelling;
mod text;

pub use convert::{
    LegacyConverter, ProtectionRemover, SettingsStrip, SofficeConverter, check_extension,
    is_legacy_doc,
};
pub use docx::{OutputDocument, parse, parse_bytes};
pub use error::Error;
pub use extract::{ExtractOptions, SUBHEADING_MARKERS, extract_section};
pub use findings::collect_findings;
pub use images::{DISPLAY_WIDTH_IN, extract_all_images, extract_paragraph_images};
pub use model::{Document, ImageRel, Paragraph, Run, Table, TableRow, VulnerabilityRecord};
pub use progress::Progress;
pub use spelling::{Dictionary, NoDictionary, WordList, correct_text};
pub use text::normalize;

use std::path::Path;
use std::time::Instant;

/// Full pipeline with the default external collaborators: extension gate,
/// LibreOffice legacy conversion, in-package protection strip, then the
/// section extraction run.
pub fn extract_findings(
    input: &Path,
    options: &ExtractOptions,
    dict: &dyn Dictionary,
    progress: &Progress,
) -> Result<(), Error> {
    extract_findings_with(
        input,
        options,
        dict,
        &SofficeConverter::default(),
        &SettingsStrip,
        progress,
    )
}

/// Same pipeline with injected conversion/protection collaborators, so the
/// core stays testable without the external office process.
pub fn extract_findings_with(
    input: &Path,
    options: &ExtractOptions,
    dict: &dyn Dictionary,
    converter: &dyn LegacyConverter,
    protection: &dyn ProtectionRemover,
    progress: &Progress,
) -> Result<(), Error> {
    let t0 = Instant::now();

    check_extension(input)?;
    let docx_path = if is_legacy_doc(input) {
        converter.convert_to_docx(input)?
    } else {
        input.to_path_buf()
    };
    protection.remove_protection(&docx_path)?;

    let doc = docx::parse(&docx_path)?;
    let t_parse = t0.elapsed();

    extract_section(&doc, options, dict, progress)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, extract={:.1}ms, total={:.1}ms (output {})",
        t_parse.as_secs_f64() * 1000.0,
        (t_total - t_parse).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        options.output.display(),
    );

    Ok(())
}
