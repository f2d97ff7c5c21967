use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("not a valid DOCX package: {0}")]
    InvalidDocx(String),

    #[error("start heading {0:?} not found in document")]
    StartHeadingNotFound(String),

    #[error("could not decode embedded image {rel_id}: {reason}")]
    ImageDecode { rel_id: String, reason: String },

    #[error("document conversion failed: {0}")]
    Conversion(String),

    #[error("unsupported file type: {}", .0.display())]
    UnsupportedFileType(PathBuf),
}
