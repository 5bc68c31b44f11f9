//! This crate reads the video maps out of a vSTARS facility bundle: the XML file a STARS radar
//! display loads its background maps from. A `raw::FacilityBundle` is a direct representation
//! of the XML. That's further reduced to `VideoMap`s, which only keep line segments, expressed as
//! pairs of `LonLat` endpoints.
//!
//! The transformations:
//!
//! - Elements that aren't `xsi:type="Line"` are ignored
//! - Lines with all four coordinates exactly "0" are placeholders and ignored
//! - A line with any unparseable coordinate is dropped, and the problem recorded in `skipped`

#[macro_use]
extern crate log;

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;

use geom::LonLat;
use util::Timer;

pub use self::extract::extract;
pub use self::raw::FacilityBundle;

mod extract;
pub mod raw;

/// One named map, ready to be drawn by something else.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMap {
    /// The `LongName`, which is how other tools refer to the map. Not necessarily unique.
    pub name: String,
    /// `STARSGroup`. Nothing downstream uses it.
    pub group: String,
    /// Every two points form one line segment, in the order they appeared in the XML.
    pub points: Vec<LonLat>,
    /// Line segments that couldn't be parsed, in order
    pub skipped: Vec<SegmentError>,
}

/// One of the four coordinate attributes on a line element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    StartLat,
    StartLon,
    EndLat,
    EndLon,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Field::StartLat => "StartLat",
            Field::StartLon => "StartLon",
            Field::EndLat => "EndLat",
            Field::EndLon => "EndLon",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseProblem {
    InvalidSyntax,
    /// A finite number too large for 32 bits
    OutOfRange,
}

/// Why a single line segment was dropped. Only the first bad coordinate is reported.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentError {
    pub field: Field,
    pub input: String,
    pub problem: ParseProblem,
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "parsing {} {:?}: {}",
            self.field,
            self.input,
            match self.problem {
                ParseProblem::InvalidSyntax => "invalid syntax",
                ParseProblem::OutOfRange => "value out of range",
            }
        )
    }
}

impl std::error::Error for SegmentError {}

/// Reads a facility bundle and returns every video map in it, including ones that wound up with
/// no line segments.
pub fn load(path: &str, timer: &mut Timer) -> Result<Vec<VideoMap>> {
    let bundle = FacilityBundle::load(path, timer)?;
    timer.start("extract video maps");
    let maps = extract(&bundle);
    timer.stop("extract video maps");
    Ok(maps)
}

/// Keeps the maps with at least one line segment, keyed by name. If two maps share a name, the
/// later one wins.
pub fn convert(maps: Vec<VideoMap>) -> BTreeMap<String, Vec<LonLat>> {
    maps.into_iter()
        .filter(|map| !map.points.is_empty())
        .map(|map| (map.name, map.points))
        .collect()
}
