// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use segwerk_core::{Result, SegwerkConfig};

/// Split large documents into line-aligned segments for out-of-band
/// translation, then merge the translated segments back in order.
#[derive(Debug, Parser)]
#[command(name = "segwerk")]
#[command(version)]
pub struct Cli {
    /// JSON settings file; command-line flags take precedence over it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a text document into segment files plus a segmentation record.
    Segment(SegmentArgs),
    /// Merge translated segments into one document, in segment order.
    Merge(MergeArgs),
    /// Extract plain text from a PDF, optionally limited to some pages.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Document to segment.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Lines per segment [default: 1000].
    #[arg(long)]
    pub segment_size: Option<usize>,

    /// Stop after this many segments; remaining lines are not segmented.
    #[arg(long)]
    pub max_segments: Option<usize>,

    /// Root of the output tree [default: output].
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Root of the output tree [default: output].
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Source name to show in the header and use for the output file name,
    /// instead of the one in the segmentation record.
    #[arg(long, short = 'i')]
    pub input: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// PDF file to read.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Pages to extract, e.g. "1-3,5,7-8" (1-based). Default: every page.
    #[arg(long, short = 'p', default_value = "")]
    pub pages: String,

    /// Write the text to this file instead of standard output.
    #[arg(long, short = 'o', conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write the text next to the input, as <name>.txt.
    #[arg(long)]
    pub save: bool,
}

impl Cli {
    /// Settings from `--config`, or the defaults when none was given.
    pub fn load_config(&self) -> Result<SegwerkConfig> {
        match &self.config {
            Some(path) => SegwerkConfig::load(path),
            None => Ok(SegwerkConfig::default()),
        }
    }
}
