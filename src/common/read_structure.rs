//! A read structure describes which cycles of a run are template bases and
//! which are sample barcode bases, e.g. `151T8B8B151T`.

use std::{convert::TryFrom, fmt, str::FromStr};

use crate::error::{Error, Result};
use crate::run_info_parser::Read;


/// The kind of bases a segment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    Template,
    SampleBarcode,
}


impl SegmentType {
    /// One-character code used when rendering a read structure
    pub fn code(self) -> char {
        match self {
            SegmentType::Template => 'T',
            SegmentType::SampleBarcode => 'B',
        }
    }
}


impl TryFrom<char> for SegmentType {
    type Error = char;

    fn try_from(code: char) -> std::result::Result<Self, Self::Error> {
        match code {
            'T' => Ok(SegmentType::Template),
            'B' => Ok(SegmentType::SampleBarcode),
            other => Err(other),
        }
    }
}


impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}


/// A contiguous block of cycles of one type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSegment {
    pub kind: SegmentType,
    /// zero-based cycle where the segment starts
    pub offset: usize,
    /// number of cycles in the segment
    pub length: usize,
}


impl ReadSegment {
    /// One past the last cycle of this segment
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}


impl fmt::Display for ReadSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.length, self.kind)
    }
}


/// Ordered, contiguous segments covering every cycle of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStructure {
    segments: Vec<ReadSegment>,
}


impl ReadStructure {
    /// Build a read structure from `(type, length)` pairs. Offsets are always
    /// recomputed so the first segment starts at 0 and each following segment
    /// starts where the previous one ends. `None` if the total number of
    /// cycles doesn't fit in a `usize`.
    pub fn new<I>(segments: I) -> Option<ReadStructure>
    where
        I: IntoIterator<Item = (SegmentType, usize)>,
    {
        let mut offset = 0usize;
        let mut built = Vec::new();

        for (kind, length) in segments {
            let end = offset.checked_add(length)?;
            built.push(ReadSegment { kind, offset, length });
            offset = end;
        }

        Some(ReadStructure { segments: built })
    }

    /// One segment per read, in document order: index reads become sample
    /// barcodes and everything else is template
    pub fn from_reads(reads: &[Read]) -> Result<ReadStructure> {
        ReadStructure::new(reads.iter().map(|r| {
            let kind = if r.is_indexed_read {
                SegmentType::SampleBarcode
            } else {
                SegmentType::Template
            };
            (kind, r.num_cycles)
        }))
        .ok_or_else(|| {
            Error::InvalidRunInfo("total number of cycles is too large".to_owned())
        })
    }

    pub fn segments(&self) -> &[ReadSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of cycles across all segments
    pub fn total_cycles(&self) -> usize {
        self.segments.last().map_or(0, |s| s.end())
    }

    pub fn templates(&self) -> impl Iterator<Item = &ReadSegment> {
        self.of_kind(SegmentType::Template)
    }

    pub fn sample_barcodes(&self) -> impl Iterator<Item = &ReadSegment> {
        self.of_kind(SegmentType::SampleBarcode)
    }

    fn of_kind(&self, kind: SegmentType) -> impl Iterator<Item = &ReadSegment> {
        self.segments.iter().filter(move |s| s.kind == kind)
    }
}


impl fmt::Display for ReadStructure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}


/// Parse a rendered read structure such as `76T8B76T`
impl FromStr for ReadStructure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidReadStructure(s.to_owned(), reason);

        if s.is_empty() {
            return Err(invalid("no segments".to_owned()));
        }

        let mut pairs = Vec::new();
        let mut digits = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }

            let kind = SegmentType::try_from(c)
                .map_err(|c| invalid(format!("unknown segment type '{}'", c)))?;

            if digits.is_empty() {
                return Err(invalid(format!("missing length before '{}'", c)));
            }

            let length: usize = digits
                .parse()
                .map_err(|e| invalid(format!("bad length {}: {}", digits, e)))?;
            if length == 0 {
                return Err(invalid("segment length must be positive".to_owned()));
            }

            pairs.push((kind, length));
            digits.clear();
        }

        if !digits.is_empty() {
            return Err(invalid(format!("length {} has no segment type", digits)));
        }

        ReadStructure::new(pairs)
            .ok_or_else(|| invalid("total number of cycles is too large".to_owned()))
    }
}
