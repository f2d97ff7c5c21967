use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Error;

const EMU_PER_INCH: i64 = 914_400;

enum BodyItem {
    Paragraph(String),
    /// Index into `media`.
    Image(usize),
}

struct MediaPart {
    data: Vec<u8>,
    pixel_width: u32,
    pixel_height: u32,
    display_width_in: f32,
}

/// Freshly built result document. Content is accumulated in memory and
/// serialized as a minimal DOCX package on save — one body part, one rels
/// part per package level, media copied in as-is.
#[derive(Default)]
pub struct OutputDocument {
    body: Vec<BodyItem>,
    media: Vec<MediaPart>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph(&mut self, text: &str) {
        self.body.push(BodyItem::Paragraph(text.to_string()));
    }

    /// Append an inline picture scaled to `width_in` inches; height follows
    /// the pixel aspect ratio. The file must be a PNG produced by the image
    /// extractor.
    pub fn add_image(&mut self, path: &Path, width_in: f32) -> Result<(), Error> {
        let (pixel_width, pixel_height) =
            image::image_dimensions(path).map_err(|e| Error::ImageDecode {
                rel_id: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let data = fs::read(path)?;
        self.media.push(MediaPart {
            data,
            pixel_width,
            pixel_height,
            display_width_in: width_in,
        });
        self.body.push(BodyItem::Image(self.media.len() - 1));
        Ok(())
    }

    pub fn paragraph_count(&self) -> usize {
        self.body
            .iter()
            .filter(|item| matches!(item, BodyItem::Paragraph(_)))
            .count()
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let file = fs::File::create(path)?;
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(self.content_types_xml().as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(PACKAGE_RELS.as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(self.document_rels_xml().as_bytes())?;

        zip.start_file("word/document.xml", options)?;
        zip.write_all(self.document_xml().as_bytes())?;

        for (i, part) in self.media.iter().enumerate() {
            zip.start_file(format!("word/media/image{}.png", i + 1), options)?;
            zip.write_all(&part.data)?;
        }

        zip.finish()?;
        log::debug!(
            "wrote {} ({} paragraphs, {} images)",
            path.display(),
            self.paragraph_count(),
            self.media.len()
        );
        Ok(())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
             <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
             <Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        );
        if !self.media.is_empty() {
            xml.push_str("<Default Extension=\"png\" ContentType=\"image/png\"/>");
        }
        xml.push_str(
            "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
             </Types>",
        );
        xml
    }

    fn document_rels_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
        );
        for i in 0..self.media.len() {
            xml.push_str(&format!(
                "<Relationship Id=\"rId{id}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/image{id}.png\"/>",
                id = i + 1
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn document_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document \
             xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
             xmlns:wp=\"http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing\" \
             xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
             xmlns:pic=\"http://schemas.openxmlformats.org/drawingml/2006/picture\" \
             xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
             <w:body>",
        );
        for item in &self.body {
            match item {
                BodyItem::Paragraph(text) => {
                    xml.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
                    xml.push_str(&escape_xml(text));
                    xml.push_str("</w:t></w:r></w:p>");
                }
                BodyItem::Image(idx) => {
                    let part = &self.media[*idx];
                    xml.push_str(&inline_drawing_xml(*idx, part));
                }
            }
        }
        xml.push_str("</w:body></w:document>");
        xml
    }
}

const PACKAGE_RELS: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
     </Relationships>";

fn inline_drawing_xml(idx: usize, part: &MediaPart) -> String {
    // 914400 EMU per inch; height keeps the source aspect ratio.
    let cx = (part.display_width_in as f64 * EMU_PER_INCH as f64) as i64;
    let cy = if part.pixel_width == 0 {
        cx
    } else {
        (cx as f64 * part.pixel_height as f64 / part.pixel_width as f64) as i64
    };
    let id = idx + 1;
    format!(
        "<w:p><w:r><w:drawing>\
         <wp:inline distT=\"0\" distB=\"0\" distL=\"0\" distR=\"0\">\
         <wp:extent cx=\"{cx}\" cy=\"{cy}\"/>\
         <wp:docPr id=\"{id}\" name=\"Picture {id}\"/>\
         <a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">\
         <pic:pic>\
         <pic:nvPicPr><pic:cNvPr id=\"{id}\" name=\"image{id}.png\"/><pic:cNvPicPr/></pic:nvPicPr>\
         <pic:blipFill><a:blip r:embed=\"rId{id}\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>\
         <pic:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></pic:spPr>\
         </pic:pic>\
         </a:graphicData></a:graphic>\
         </wp:inline></w:drawing></w:r></w:p>"
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
