//! Synthetic DOCX fixtures built directly with zip, so tests control the
//! exact package contents without binary fixture files.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

/// Valid 2x1 red RGB PNG.
pub const TINY_PNG: [u8; 70] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x7b,
    0x40, 0xe8, 0xdd, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8,
    0xcf, 0xc0, 0x00, 0x44, 0x00, 0x08, 0xfe, 0x01, 0xff, 0xc6, 0x9e, 0x79, 0xf7, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[derive(Default)]
pub struct FixtureDoc {
    body: String,
    media: Vec<(String, Vec<u8>)>,
    protected: bool,
}

impl FixtureDoc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: u32, text: &str) -> &mut Self {
        self.styled_paragraph(Some(&format!("Heading{level}")), text)
    }

    pub fn paragraph(&mut self, text: &str) -> &mut Self {
        self.styled_paragraph(None, text)
    }

    pub fn styled_paragraph(&mut self, style_id: Option<&str>, text: &str) -> &mut Self {
        self.body.push_str("<w:p>");
        if let Some(id) = style_id {
            self.body
                .push_str(&format!("<w:pPr><w:pStyle w:val=\"{id}\"/></w:pPr>"));
        }
        self.body.push_str(&format!(
            "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text)
        ));
        self
    }

    /// Paragraph whose single run carries text plus an embedded picture.
    pub fn paragraph_with_image(&mut self, text: &str, rel_id: &str, png: &[u8]) -> &mut Self {
        self.media.push((rel_id.to_string(), png.to_vec()));
        self.body.push_str(&format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t>\
             <w:drawing><a:blip r:embed=\"{rel_id}\"/></w:drawing></w:r></w:p>",
            escape(text)
        ));
        self
    }

    /// Two-cell rows, first cell label, second value.
    pub fn table(&mut self, rows: &[(&str, &str)]) -> &mut Self {
        self.body.push_str("<w:tbl>");
        for (label, value) in rows {
            self.body.push_str(&format!(
                "<w:tr>\
                 <w:tc><w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p></w:tc>\
                 <w:tc><w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p></w:tc>\
                 </w:tr>",
                escape(label),
                escape(value)
            ));
        }
        self.body.push_str("</w:tbl>");
        self
    }

    pub fn protected(&mut self) -> &mut Self {
        self.protected = true;
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(PACKAGE_RELS.as_bytes()).unwrap();

        zip.start_file("word/styles.xml", options).unwrap();
        zip.write_all(STYLES.as_bytes()).unwrap();

        if self.protected {
            zip.start_file("word/settings.xml", options).unwrap();
            zip.write_all(PROTECTED_SETTINGS.as_bytes()).unwrap();
        }

        zip.start_file("word/_rels/document.xml.rels", options)
            .unwrap();
        let mut rels = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        );
        for (i, (rel_id, _)) in self.media.iter().enumerate() {
            rels.push_str(&format!(
                "<Relationship Id=\"{rel_id}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/image{}.png\"/>",
                i + 1
            ));
        }
        rels.push_str("</Relationships>");
        zip.write_all(rels.as_bytes()).unwrap();

        zip.start_file("word/document.xml", options).unwrap();
        let document = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document \
             xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
             xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
             xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
             <w:body>{}</w:body></w:document>",
            self.body
        );
        zip.write_all(document.as_bytes()).unwrap();

        for (i, (_, data)) in self.media.iter().enumerate() {
            zip.start_file(format!("word/media/image{}.png", i + 1), options)
                .unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.bytes()).unwrap();
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

const CONTENT_TYPES: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
     <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
     <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
     <Default Extension=\"png\" ContentType=\"image/png\"/>\
     <Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
     </Types>";

const PACKAGE_RELS: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
     </Relationships>";

const STYLES: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
     <w:style w:type=\"paragraph\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/></w:style>\
     <w:style w:type=\"paragraph\" w:styleId=\"Heading1\"><w:name w:val=\"Heading 1\"/></w:style>\
     <w:style w:type=\"paragraph\" w:styleId=\"Heading2\"><w:name w:val=\"Heading 2\"/></w:style>\
     <w:style w:type=\"paragraph\" w:styleId=\"Heading3\"><w:name w:val=\"Heading 3\"/></w:style>\
     </w:styles>";

const PROTECTED_SETTINGS: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <w:settings xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
     <w:documentProtection w:edit=\"readOnly\" w:enforcement=\"1\"/>\
     <w:zoom w:percent=\"100\"/>\
     </w:settings>";
