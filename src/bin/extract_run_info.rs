//! extract_run_info reads the RunInfo.xml of a sequencing run and writes
//! a delimited summary: run barcode, flowcell, date, read structure, lanes.

use clap::{App, Arg};
use env_logger::Env;
use log::debug;
use std::{path::PathBuf, process};

use common::run_metadata::extract_run_metadata;

/// Allow `--delim '\t'` to mean a tab, since shells make a literal one awkward
fn unescape_delim(delim: &str) -> String {
    delim.replace("\\t", "\t")
}

/// Parses command line arguments and writes the run metadata
fn main() {
    env_logger::from_env(Env::default().default_filter_or("info")).init();

    let matches = App::new("extract_run_info")
        .version(clap::crate_version!())
        .arg(
            Arg::with_name("input")
                .long("input")
                .help("path to RunInfo.xml")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .help("output path for the metadata file")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("delim")
                .long("delim")
                .help("field separator for the output")
                .default_value("\t")
                .takes_value(true),
        )
        .get_matches();

    let input = PathBuf::from(matches.value_of("input").unwrap());
    if !input.is_file() {
        eprintln!("Could not find input file {}", input.display());
        process::exit(1);
    }

    let output = PathBuf::from(matches.value_of("output").unwrap());
    if output.is_dir() {
        eprintln!("Output path {} is a directory", output.display());
        process::exit(1);
    }
    let output_dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !output_dir.is_dir() {
        eprintln!("Could not find output directory {}", output_dir.display());
        process::exit(1);
    }

    let delim = unescape_delim(matches.value_of("delim").unwrap());
    debug!("using delimiter {:?}", delim);

    if let Err(e) = extract_run_metadata(&input, &output, &delim) {
        eprintln!("Error extracting run metadata: {}", e);
        process::exit(1);
    }
}
