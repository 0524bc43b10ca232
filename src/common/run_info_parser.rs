//! Deserializes the `RunInfo.xml` file from a sequencing run into a struct
//! holding the run's identity and read layout.

use std::{
    fs,
    path::Path,
};
use log::debug;
use serde::{de, Deserialize};
use serde_xml_rs::from_str;

use crate::error::{Error, Result};


/// The top-level struct for the contents of RunInfo.xml
#[derive(Debug, PartialEq, Eq)]
pub struct RunInfo {
    /// Version number of this file (depends on the sequencer), 0 if absent
    pub version: u32,
    /// Full run id string (date, instrument, number, flowcell), if present
    pub id: String,
    /// Number representing how many runs this instrument has performed
    pub number: u64,
    /// Flowcell serial number
    pub flowcell: String,
    /// Instrument serial number/identifier
    pub instrument: String,
    /// The raw date of the run, as written by the instrument
    pub date: String,
    /// Format of the run: read lengths and which are indexes
    pub reads: Vec<Read>,
    /// Flowcell information
    pub flowcell_layout: FlowcellLayout,
}


/// Deserialize RunInfo, flattening the inner Run struct into the top level
impl<'de> Deserialize<'de> for RunInfo {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Outer {
            #[serde(rename = "Version", default)]
            version: u32,
            #[serde(rename = "Run")]
            run: Inner,
        }

        #[derive(Deserialize)]
        struct Inner {
            #[serde(rename = "Id", default)]
            id: String,
            #[serde(rename = "Number", default)]
            number: u64,
            #[serde(rename = "Flowcell")]
            flowcell: String,
            #[serde(rename = "Instrument")]
            instrument: String,
            #[serde(rename = "Date")]
            date: String,
            #[serde(rename = "Reads", deserialize_with = "reads_to_vec")]
            reads: Vec<Read>,
            #[serde(rename = "FlowcellLayout")]
            flowcell_layout: FlowcellLayout,
        }

        #[derive(Deserialize)]
        struct Reads {
            #[serde(rename = "Read")]
            read: Vec<Read>,
        }

        fn reads_to_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<Read>, D::Error>
        where
            D: de::Deserializer<'de>,
        {
            let reads = Reads::deserialize(deserializer)?;

            Ok(reads.read)
        }

        let helper = Outer::deserialize(deserializer)?;

        Ok(RunInfo {
            version: helper.version,
            id: helper.run.id,
            number: helper.run.number,
            flowcell: helper.run.flowcell,
            instrument: helper.run.instrument,
            date: helper.run.date,
            reads: helper.run.reads,
            flowcell_layout: helper.run.flowcell_layout,
        })
    }
}


/// Information about one of the reads in a run
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Read {
    /// Which read this is, 0 if absent
    #[serde(rename = "Number", default)]
    pub number: u64,
    /// How many cycles (e.g. bases) in the read
    #[serde(rename = "NumCycles")]
    pub num_cycles: usize,
    /// Whether or not it is an index read
    #[serde(rename = "IsIndexedRead", deserialize_with = "bool_from_string")]
    pub is_indexed_read: bool,
}


/// Convert from Y or N character to a boolean
fn bool_from_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: de::Deserializer<'de>,
{
    match String::deserialize(deserializer)?.as_ref() {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(de::Error::invalid_value(
            de::Unexpected::Str(other),
            &"Y or N",
        )),
    }
}


/// Information about the flowcell used in the run
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct FlowcellLayout {
    /// Number of lanes
    #[serde(rename = "LaneCount")]
    pub lane_count: usize,
}


/// Reject documents that parse but can't describe a real run
fn validate(run_info: &RunInfo) -> Result<()> {
    if run_info.reads.is_empty() {
        return Err(Error::InvalidRunInfo("no reads found".to_owned()));
    }

    if let Some(i) = run_info.reads.iter().position(|r| r.num_cycles == 0) {
        return Err(Error::InvalidRunInfo(format!(
            "read {} has zero cycles",
            i + 1
        )));
    }

    run_info
        .reads
        .iter()
        .try_fold(0usize, |total, r| total.checked_add(r.num_cycles))
        .ok_or_else(|| Error::InvalidRunInfo("total number of cycles is too large".to_owned()))?;

    if run_info.flowcell_layout.lane_count == 0 {
        return Err(Error::InvalidRunInfo("lane count is zero".to_owned()));
    }

    Ok(())
}


/// Parse the text of a `RunInfo.xml` into a `RunInfo` struct
pub fn parse_run_info_str(run_xml: &str) -> Result<RunInfo> {
    let run_info: RunInfo = from_str(run_xml)?;
    validate(&run_info)?;

    debug!(
        "parsed RunInfo for flowcell {} with {} reads",
        run_info.flowcell,
        run_info.reads.len()
    );

    Ok(run_info)
}


/// Parse a `RunInfo.xml` file into a `RunInfo` struct
pub fn parse_run_info(run_info_path: &Path) -> Result<RunInfo> {
    let run_xml =
        fs::read_to_string(run_info_path).map_err(|e| Error::io(run_info_path, e))?;

    parse_run_info_str(&run_xml)
}
