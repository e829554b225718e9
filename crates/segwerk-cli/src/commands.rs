// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand execution. Progress and results go to stdout; diagnostics go
// through `tracing` (stderr).

use std::io::Write;
use std::path::PathBuf;

use segwerk_core::{MergeReport, Result, SegmentationMetadata, SegwerkConfig};
use segwerk_document::pdf::reader::derived_text_path;
use segwerk_document::{Merger, PdfTextExtractor, Segmenter};

use crate::cli::{Cli, Command, ExtractArgs, MergeArgs, SegmentArgs};

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    match cli.command {
        Command::Segment(args) => {
            let metadata = segment(&args, config)?;
            println!("\nSegmented into {} segments.", metadata.num_segments);
        }
        Command::Merge(args) => {
            let report = merge(&args, config)?;
            for missing in &report.missing {
                eprintln!(
                    "warning: no translation for segment {} (lines {}-{}) at {}, skipped",
                    missing.index,
                    missing.start_line,
                    missing.end_line,
                    missing.expected_path.display()
                );
            }
            println!("\nMerged document: {}", report.output_path.display());
        }
        Command::Extract(args) => extract(&args)?,
    }
    Ok(())
}

/// `segwerk segment`: flags override the settings file.
pub fn segment(args: &SegmentArgs, mut config: SegwerkConfig) -> Result<SegmentationMetadata> {
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(size) = args.segment_size {
        config.segment_size = size;
    }
    if args.max_segments.is_some() {
        config.max_segments = args.max_segments;
    }

    println!("Segmenting {}", args.input.display());
    let segmenter = Segmenter::new(config.layout());
    let metadata = segmenter.segment(&args.input, config.segment_size, config.max_segments)?;

    println!(
        "{} lines, {} segments of up to {} lines ({} lines processed)",
        metadata.total_lines,
        metadata.num_segments,
        metadata.segment_size,
        metadata.processed_lines()
    );
    for segment in &metadata.segments {
        println!(
            "  segment {}: lines {}-{} -> {}",
            segment.index, segment.start_line, segment.end_line, segment.file
        );
    }
    println!(
        "Segmentation record: {}",
        segmenter.layout().metadata_path().display()
    );
    println!(
        "Place translations in: {}",
        segmenter.layout().translations_dir().display()
    );
    Ok(metadata)
}

/// `segwerk merge`.
pub fn merge(args: &MergeArgs, mut config: SegwerkConfig) -> Result<MergeReport> {
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    let merger = Merger::new(config.layout());
    merger.merge(args.input.as_deref())
}

/// `segwerk extract`: text goes to stdout unless `--output` or `--save`.
pub fn extract(args: &ExtractArgs) -> Result<()> {
    let extractor = PdfTextExtractor::open(&args.input)?;
    let text = extractor.extract_range(&args.pages)?;

    let target: Option<PathBuf> = match (&args.output, args.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(derived_text_path(&args.input)),
        (None, false) => None,
    };

    match target {
        Some(path) => {
            std::fs::write(&path, text.as_bytes())?;
            println!("Extracted text written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
