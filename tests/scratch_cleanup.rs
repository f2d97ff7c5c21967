mod common;

use std::collections::HashSet;

use common::{FixtureDoc, TINY_PNG};
use docx_findings::{ExtractOptions, NoDictionary, Progress, extract_section};

fn scratch_dirs() -> HashSet<String> {
    let mut names = HashSet::new();
    if let Ok(entries) = std::fs::read_dir(std::env::temp_dir()) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with("docx-findings-") {
                names.insert(name);
            }
        }
    }
    names
}

#[test]
fn scratch_image_directory_is_removed_after_a_run() {
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().unwrap();

    let mut fixture = FixtureDoc::new();
    fixture
        .heading(1, "Detailed Findings")
        .paragraph_with_image("pic", "rId3", &TINY_PNG);
    let doc = docx_findings::parse_bytes(&fixture.bytes()).unwrap();

    let before = scratch_dirs();
    let options = ExtractOptions {
        start_heading: "Detailed Findings".to_string(),
        output: dir.path().join("out.docx"),
    };
    extract_section(&doc, &options, &NoDictionary, &Progress::new()).unwrap();
    let after = scratch_dirs();

    let leftover: Vec<_> = after.difference(&before).collect();
    assert!(leftover.is_empty(), "scratch dirs left behind: {leftover:?}");
}
