use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::opts::{input_file, InputFile};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Don't display a progress bar/spinner
    #[clap(long, global = true, value_parser)]
    pub no_progress: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a FASTA file
    Compress {
        /// Input FASTA file path
        #[clap(short, long, value_parser = input_file)]
        input: InputFile,

        /// Output file path; defaults to the input path with `.dnac`
        /// extension
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,

        /// Do not store the FASTA header line
        #[clap(long, value_parser)]
        no_header: bool,
    },

    /// Decompress a compressed file to a FASTA file
    Decompress {
        /// Input compressed file path
        #[clap(short, long, value_parser = input_file)]
        input: InputFile,

        /// Output file path; defaults to the input path with `.fa` extension
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },
}
