use std::path::PathBuf;

use clap::Parser;

use docx_findings::{
    Dictionary, Error, ExtractOptions, LegacyConverter, NoDictionary, Progress, SofficeConverter,
    WordList, check_extension, extract_all_images, extract_findings, is_legacy_doc,
};

#[derive(Parser)]
#[command(name = "docx-findings", version, about = "Extract the findings section of a Word assessment report into a clean new document")]
struct Args {
    /// Input report (.doc or .docx)
    input: PathBuf,

    /// Heading that opens the section to extract
    #[arg(long, default_value = "Detailed Findings")]
    start_heading: String,

    /// Output document path
    #[arg(short, long, default_value = "output.docx")]
    output: PathBuf,

    /// Two-column misspelling/correction word list file
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// Extract every embedded image into DIR as PNG and exit
    #[arg(long, value_name = "DIR")]
    extract_images: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    check_extension(&args.input)?;

    if let Some(dir) = &args.extract_images {
        let input = if is_legacy_doc(&args.input) {
            SofficeConverter::default().convert_to_docx(&args.input)?
        } else {
            args.input.clone()
        };
        let doc = docx_findings::parse(&input)?;
        std::fs::create_dir_all(dir)?;
        let written = extract_all_images(&doc, dir)?;
        println!("extracted {} images to {}", written.len(), dir.display());
        return Ok(());
    }

    let dict: Box<dyn Dictionary> = match &args.wordlist {
        Some(path) => Box::new(WordList::from_path(path)?),
        None => Box::new(NoDictionary),
    };

    let options = ExtractOptions {
        start_heading: args.start_heading.clone(),
        output: args.output.clone(),
    };
    let progress = Progress::new();
    extract_findings(&args.input, &options, dict.as_ref(), &progress)?;
    println!("wrote {}", args.output.display());
    Ok(())
}
