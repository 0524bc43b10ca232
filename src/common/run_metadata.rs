//! Summarizes a run as a single delimited row: run barcode, flowcell barcode,
//! run date, read structure and number of lanes.

use std::{
    fs::File,
    io::prelude::*,
    path::Path,
};

use chrono::NaiveDate;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::read_structure::ReadStructure;
use crate::run_date::parse_run_date;
use crate::run_info_parser::{parse_run_info, RunInfo};


/// Column names, in output order
pub const HEADER: [&str; 5] = [
    "run_barcode",
    "flowcell_barcode",
    "run_date",
    "read_structure",
    "num_lanes",
];


/// The fields derived from a RunInfo.xml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    /// `{instrument}_{flowcell}`
    pub run_barcode: String,
    pub flowcell_barcode: String,
    pub run_date: NaiveDate,
    pub read_structure: ReadStructure,
    pub num_lanes: usize,
}


impl RunMetadata {
    pub fn from_run_info(run_info: &RunInfo) -> Result<RunMetadata> {
        let run_date = parse_run_date(&run_info.date)?;
        let read_structure = ReadStructure::from_reads(&run_info.reads)?;

        debug!("read structure: {}", read_structure);

        Ok(RunMetadata {
            run_barcode: format!("{}_{}", run_info.instrument, run_info.flowcell),
            flowcell_barcode: run_info.flowcell.clone(),
            run_date,
            read_structure,
            num_lanes: run_info.flowcell_layout.lane_count,
        })
    }

    /// The header line, without a newline
    pub fn header(delim: &str) -> String {
        HEADER.join(delim)
    }

    /// The data line, without a newline
    pub fn row(&self, delim: &str) -> String {
        [
            self.run_barcode.clone(),
            self.flowcell_barcode.clone(),
            self.run_date.to_string(),
            self.read_structure.to_string(),
            self.num_lanes.to_string(),
        ]
        .join(delim)
    }

    /// Header and data line, each terminated by a newline
    pub fn to_lines(&self, delim: &str) -> String {
        format!("{}\n{}\n", RunMetadata::header(delim), self.row(delim))
    }
}


/// Write the header and data line to `output_path`, replacing its contents
pub fn write_run_metadata(
    run_metadata: &RunMetadata,
    output_path: &Path,
    delim: &str,
) -> Result<()> {
    // render first so a failure never leaves a partial file behind
    let contents = run_metadata.to_lines(delim);

    let mut writer = File::create(output_path).map_err(|e| Error::io(output_path, e))?;
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| Error::io(output_path, e))?;

    info!("wrote run metadata to {}", output_path.display());

    Ok(())
}


/// Read `input_path`, derive the run metadata and write it to `output_path`
pub fn extract_run_metadata(
    input_path: &Path,
    output_path: &Path,
    delim: &str,
) -> Result<RunMetadata> {
    let run_info = parse_run_info(input_path)?;
    info!(
        "loaded {} with {} reads",
        input_path.display(),
        run_info.reads.len()
    );

    let run_metadata = RunMetadata::from_run_info(&run_info)?;
    write_run_metadata(&run_metadata, output_path, delim)?;

    Ok(run_metadata)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use crate::run_info_parser::parse_run_info_str;

    fn output_file(name: &str) -> PathBuf {
        let output_path = Path::new("test_data/test_output");
        if !output_path.exists() {
            fs::create_dir_all(output_path).unwrap();
        }
        output_path.join(name)
    }

    fn minimal() -> RunMetadata {
        let run_info = parse_run_info(Path::new("test_data/minimal_RunInfo.xml")).unwrap();
        RunMetadata::from_run_info(&run_info).unwrap()
    }

    #[test]
    fn from_run_info() {
        let run_metadata = minimal();

        assert_eq!(run_metadata.run_barcode, "INST1_FC1");
        assert_eq!(run_metadata.flowcell_barcode, "FC1");
        assert_eq!(run_metadata.run_date.to_string(), "2020-01-01");
        assert_eq!(run_metadata.read_structure.to_string(), "76T8B");
        assert_eq!(run_metadata.num_lanes, 4);
    }

    #[test]
    fn tab_row() {
        assert_eq!(minimal().row("\t"), "INST1_FC1\tFC1\t2020-01-01\t76T8B\t4");
    }

    #[test]
    fn comma_row() {
        let run_metadata = minimal();
        let tab: Vec<String> = run_metadata.row("\t").split('\t').map(String::from).collect();
        let comma: Vec<String> = run_metadata.row(",").split(',').map(String::from).collect();

        assert_eq!(tab, comma);
        assert_eq!(run_metadata.row(","), "INST1_FC1,FC1,2020-01-01,76T8B,4");
    }

    #[test]
    fn header_ignores_values() {
        assert_eq!(
            RunMetadata::header("\t"),
            "run_barcode\tflowcell_barcode\trun_date\tread_structure\tnum_lanes"
        );
        assert_eq!(
            RunMetadata::header(" | "),
            "run_barcode | flowcell_barcode | run_date | read_structure | num_lanes"
        );
    }

    #[test]
    fn bad_date() {
        let run_info = parse_run_info(Path::new("test_data/bad_RunInfo_date.xml")).unwrap();
        let err = RunMetadata::from_run_info(&run_info).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid run date '1234567': expected YYMMDD or YYYYMMDD"
        );
    }

    #[test]
    fn full_run() {
        let input_path = Path::new("test_data/190414_A00111_0296_AHJCWWDSXX/RunInfo.xml");
        let output_path = output_file("full_run.tsv");

        let run_metadata = extract_run_metadata(input_path, &output_path, "\t").unwrap();
        assert_eq!(run_metadata.read_structure.to_string(), "151T8B8B151T");

        let contents = fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "run_barcode\tflowcell_barcode\trun_date\tread_structure\tnum_lanes",
                "A00111_HJCWWDSXX\tHJCWWDSXX\t2019-04-14\t151T8B8B151T\t2",
            ]
        );
    }

    #[test]
    fn overwrites_output() {
        let output_path = output_file("overwrite.csv");
        fs::write(&output_path, "stale\nstale\nstale\n").unwrap();

        write_run_metadata(&minimal(), &output_path, ",").unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        assert_eq!(
            contents,
            "run_barcode,flowcell_barcode,run_date,read_structure,num_lanes\n\
             INST1_FC1,FC1,2020-01-01,76T8B,4\n"
        );
    }

    #[test]
    fn no_output_dir() {
        let output_path = Path::new("test_data/no_such_dir/out.tsv");
        let err = write_run_metadata(&minimal(), output_path, "\t").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!output_path.exists());
    }

    #[test]
    fn bad_input_writes_nothing() {
        let output_path = output_file("never_written.tsv");
        if output_path.exists() {
            fs::remove_file(&output_path).unwrap();
        }

        let err = extract_run_metadata(
            Path::new("test_data/no_RunInfo.xml"),
            &output_path,
            "\t",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!output_path.exists());

        extract_run_metadata(
            Path::new("test_data/bad_RunInfo_date.xml"),
            &output_path,
            "\t",
        )
        .unwrap_err();
        assert!(!output_path.exists());
    }

    #[test]
    fn read_structure_round_trips() {
        let run_info = parse_run_info_str(
            r#"<RunInfo><Run><Flowcell>F</Flowcell><Instrument>I</Instrument>
            <Date>20200101</Date><Reads>
            <Read NumCycles="26" IsIndexedRead="N" />
            <Read NumCycles="10" IsIndexedRead="Y" />
            <Read NumCycles="10" IsIndexedRead="Y" />
            <Read NumCycles="90" IsIndexedRead="N" />
            </Reads><FlowcellLayout LaneCount="1" /></Run></RunInfo>"#,
        )
        .unwrap();
        let run_metadata = RunMetadata::from_run_info(&run_info).unwrap();

        let rendered = run_metadata.read_structure.to_string();
        assert_eq!(rendered, "26T10B10B90T");
        assert_eq!(rendered.parse::<ReadStructure>().unwrap(), run_metadata.read_structure);
    }
}
