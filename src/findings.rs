use crate::model::{Document, VulnerabilityRecord};
use crate::spelling::{Dictionary, correct_text};

const NAME_LABEL: &str = "Vulnerability Name";
const HOST_LABEL: &str = "Affected Host";
const RISK_LABEL: &str = "Risk Rating";

/// Flatten the source document's tables into vulnerability records, one per
/// table, in table order. A row contributes when its first cell contains one
/// of the three labels; the second cell's text is trimmed and spell-corrected
/// before it is stored. Later rows with the same label overwrite earlier
/// ones. Tables where no label matched yield nothing; partially filled
/// records are kept.
pub fn collect_findings(doc: &Document, dict: &dyn Dictionary) -> Vec<VulnerabilityRecord> {
    let mut records = Vec::new();
    for table in &doc.tables {
        let mut record = VulnerabilityRecord::default();
        for row in &table.rows {
            let (Some(label_cell), Some(value_cell)) = (row.cells.first(), row.cells.get(1))
            else {
                continue;
            };
            let value = || correct_text(dict, value_cell.trim());
            if label_cell.contains(NAME_LABEL) {
                record.name = Some(value());
            } else if label_cell.contains(HOST_LABEL) {
                record.host = Some(value());
            } else if label_cell.contains(RISK_LABEL) {
                record.risk_rating = Some(value());
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }
    log::debug!("collected {} vulnerability records", records.len());
    records
}
