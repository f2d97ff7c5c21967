mod writer;

pub use writer::OutputDocument;

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{Document, ImageRel, Paragraph, Run, Table, TableRow};

pub(crate) const WML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) fn wml<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

pub(crate) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

fn read_zip_text<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Map style ids to their display names from word/styles.xml. Paragraphs
/// reference styles by id ("Heading1") while heading matching works on the
/// name ("Heading 1"), so unknown ids fall back to themselves.
fn parse_style_names<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> HashMap<String, String> {
    let mut names = HashMap::new();
    let Some(xml_content) = read_zip_text(zip, "word/styles.xml") else {
        return names;
    };
    let Ok(xml) = roxmltree::Document::parse(&xml_content) else {
        return names;
    };
    for node in xml.root_element().children() {
        if node.tag_name().name() != "style" || node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        if let (Some(id), Some(name)) =
            (node.attribute((WML_NS, "styleId")), wml_attr(node, "name"))
        {
            names.insert(id.to_string(), name.to_string());
        }
    }
    names
}

struct RelEntry {
    id: String,
    target: String,
    external: bool,
}

fn parse_relationships(xml_content: &str) -> Vec<RelEntry> {
    let mut rels = Vec::new();
    let Ok(xml) = roxmltree::Document::parse(xml_content) else {
        return rels;
    };
    for node in xml.root_element().children() {
        if node.tag_name().name() != "Relationship" {
            continue;
        }
        if let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target")) {
            rels.push(RelEntry {
                id: id.to_string(),
                target: target.to_string(),
                external: node.attribute("TargetMode") == Some("External"),
            });
        }
    }
    rels
}

/// Resolve a rels-file target to a path inside the package. Absolute targets
/// are package-rooted; relative ones hang off word/.
fn rel_target_to_zip_path(target: &str) -> String {
    target
        .strip_prefix('/')
        .map(String::from)
        .unwrap_or_else(|| format!("word/{}", target))
}

/// Load the blobs of every relationship whose target points at an image,
/// preserving rels-file order for the whole-document extraction path.
fn load_image_rels<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> Vec<ImageRel> {
    let Some(rels_xml) = read_zip_text(zip, "word/_rels/document.xml.rels") else {
        return Vec::new();
    };
    let mut image_rels = Vec::new();
    for entry in parse_relationships(&rels_xml) {
        if entry.external || !entry.target.contains("image") {
            continue;
        }
        let zip_path = rel_target_to_zip_path(&entry.target);
        let Ok(mut part) = zip.by_name(&zip_path) else {
            log::warn!("image relationship {} points at missing part {}", entry.id, zip_path);
            continue;
        };
        let mut data = Vec::new();
        if part.read_to_end(&mut data).is_err() {
            continue;
        }
        image_rels.push(ImageRel {
            rel_id: entry.id,
            target: entry.target,
            data,
        });
    }
    image_rels
}

/// Flatten SDT wrappers: descend into w:sdtContent and collect effective
/// children.
fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if child.tag_name().name() == "sdt" && child.tag_name().namespace() == Some(WML_NS) {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}

fn find_blip_embed<'a>(run_node: roxmltree::Node<'a, 'a>) -> Option<&'a str> {
    run_node
        .descendants()
        .find(|n| n.tag_name().name() == "blip" && n.tag_name().namespace() == Some(DML_NS))
        .and_then(|n| n.attribute((REL_NS, "embed")))
}

/// Text of a single w:r in document order: w:t content, tabs as \t, line
/// breaks as \n.
fn run_text(run_node: roxmltree::Node) -> String {
    let mut text = String::new();
    for child in run_node.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn collect_run_nodes<'a>(
    parent: roxmltree::Node<'a, 'a>,
    out: &mut Vec<roxmltree::Node<'a, 'a>>,
) {
    for child in parent.children() {
        let name = child.tag_name().name();
        let is_wml = child.tag_name().namespace() == Some(WML_NS);
        if is_wml && name == "r" {
            out.push(child);
        } else if is_wml && (name == "hyperlink" || name == "smartTag") {
            collect_run_nodes(child, out);
        } else if is_wml && name == "sdt" {
            if let Some(content) = wml(child, "sdtContent") {
                collect_run_nodes(content, out);
            }
        }
    }
}

fn parse_paragraph(
    para_node: roxmltree::Node,
    style_names: &HashMap<String, String>,
) -> Paragraph {
    let style_id = wml(para_node, "pPr")
        .and_then(|ppr| wml_attr(ppr, "pStyle"))
        .unwrap_or("Normal");
    let style = style_names
        .get(style_id)
        .cloned()
        .unwrap_or_else(|| style_id.to_string());

    let mut run_nodes = Vec::new();
    collect_run_nodes(para_node, &mut run_nodes);

    let runs: Vec<Run> = run_nodes
        .into_iter()
        .map(|node| Run {
            text: run_text(node),
            image_rel_id: find_blip_embed(node).map(str::to_string),
        })
        .collect();

    let text: String = runs.iter().map(|r| r.text.as_str()).collect();

    Paragraph { style, text, runs }
}

/// Cell text the way a flat reader sees it: paragraph texts joined with
/// newlines.
fn parse_cell_text(tc: roxmltree::Node, style_names: &HashMap<String, String>) -> String {
    let texts: Vec<String> = collect_block_nodes(tc)
        .into_iter()
        .filter(|n| n.tag_name().name() == "p" && n.tag_name().namespace() == Some(WML_NS))
        .map(|p| parse_paragraph(p, style_names).text)
        .collect();
    texts.join("\n")
}

fn parse_table(tbl_node: roxmltree::Node, style_names: &HashMap<String, String>) -> Table {
    let rows = collect_block_nodes(tbl_node)
        .into_iter()
        .filter(|n| n.tag_name().name() == "tr" && n.tag_name().namespace() == Some(WML_NS))
        .map(|tr| TableRow {
            cells: collect_block_nodes(tr)
                .into_iter()
                .filter(|n| {
                    n.tag_name().name() == "tc" && n.tag_name().namespace() == Some(WML_NS)
                })
                .map(|tc| parse_cell_text(tc, style_names))
                .collect(),
        })
        .collect();
    Table { rows }
}

pub fn parse(path: &Path) -> Result<Document, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
    parse_archive(&mut zip)
}

pub fn parse_bytes(input: &[u8]) -> Result<Document, Error> {
    let mut zip = zip::ZipArchive::new(Cursor::new(input))
        .map_err(|_| Error::InvalidDocx("input is not a ZIP archive".into()))?;
    parse_archive(&mut zip)
}

fn parse_archive<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> Result<Document, Error> {
    let style_names = parse_style_names(zip);
    let image_rels = load_image_rels(zip);

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();
    for node in collect_block_nodes(body) {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => paragraphs.push(parse_paragraph(node, &style_names)),
            "tbl" => tables.push(parse_table(node, &style_names)),
            _ => {}
        }
    }

    log::debug!(
        "parsed document: {} paragraphs, {} tables, {} image parts",
        paragraphs.len(),
        tables.len(),
        image_rels.len()
    );

    Ok(Document {
        paragraphs,
        tables,
        image_rels,
    })
}
