/// A source report parsed into the pieces the extractor needs: the flat
/// paragraph sequence, the tables, and the package's image relationships.
#[derive(Debug)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
    /// Image parts keyed by relationship id, in document.xml.rels order.
    pub image_rels: Vec<ImageRel>,
}

impl Document {
    pub fn image_blob(&self, rel_id: &str) -> Option<&[u8]> {
        self.image_rels
            .iter()
            .find(|r| r.rel_id == rel_id)
            .map(|r| r.data.as_slice())
    }
}

#[derive(Debug)]
pub struct Paragraph {
    /// Resolved style name, e.g. "Normal" or "Heading 2".
    pub style: String,
    /// Concatenated run text.
    pub text: String,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn is_heading(&self) -> bool {
        self.style.starts_with("Heading")
    }

    /// Heading depth taken from the first digit group in the style name
    /// ("Heading 2" → 2). None for non-heading styles or unnumbered ones.
    pub fn heading_level(&self) -> Option<u32> {
        if !self.is_heading() {
            return None;
        }
        let digits: String = self
            .style
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[derive(Debug)]
pub struct Run {
    pub text: String,
    /// Relationship id of the first embedded picture in this run, if any.
    pub image_rel_id: Option<String>,
}

#[derive(Debug)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug)]
pub struct TableRow {
    /// Plain cell text, one entry per w:tc.
    pub cells: Vec<String>,
}

/// One entry of the package relationship table that points at an image part.
#[derive(Debug)]
pub struct ImageRel {
    pub rel_id: String,
    /// Target as written in the rels file, e.g. "media/image1.png".
    pub target: String,
    pub data: Vec<u8>,
}

/// One vulnerability flattened out of a source table. Fields a table never
/// populated stay None and render as empty strings on output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VulnerabilityRecord {
    pub name: Option<String>,
    pub host: Option<String>,
    pub risk_rating: Option<String>,
}

impl VulnerabilityRecord {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.host.is_none() && self.risk_rating.is_none()
    }
}
