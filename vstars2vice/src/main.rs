//! Converts the video maps in a vSTARS facility bundle into the JSON format that vice reads: an
//! object keyed by map name, where each value lists line segment endpoints as DMS strings.

#[macro_use]
extern crate log;

use anyhow::Result;
use structopt::StructOpt;

use geom::GPSBounds;
use util::{prettyprint_usize, Timer};

#[derive(StructOpt)]
#[structopt(
    name = "vstars2vice",
    about = "Converts vSTARS video maps to vice's JSON format"
)]
struct Flags {
    /// The vSTARS facility bundle (XML) to read
    #[structopt()]
    input: String,
    /// The JSON file to write. It'll be overwritten if it already exists.
    #[structopt()]
    output: String,
}

fn main() -> Result<()> {
    let flags = Flags::from_args();
    util::logger::setup();

    let mut timer = Timer::new("convert video maps");
    let maps = vstars::load(&flags.input, &mut timer)?;

    // Report in document order, so problems show up next to the map they belong to
    let mut bounds = GPSBounds::new();
    let mut num_skipped = 0;
    for map in &maps {
        for err in &map.skipped {
            eprintln!("{}: {}. Skipping this segment.", map.name, err);
        }
        num_skipped += map.skipped.len();
        if !map.points.is_empty() {
            println!(
                "Video map: \"{}\" with {} line segments",
                map.name,
                map.points.len()
            );
            for pt in &map.points {
                bounds.update(*pt);
            }
        }
    }
    if num_skipped > 0 {
        timer.warn(format!(
            "Skipped {} malformed line segments",
            prettyprint_usize(num_skipped)
        ));
    }

    let output = vstars::convert(maps);
    timer.start(format!("write {}", flags.output));
    let result = util::write_json(&flags.output, &output);
    timer.stop(format!("write {}", flags.output));
    result?;

    info!(
        "Wrote {} video maps to {}, covering {}",
        prettyprint_usize(output.len()),
        flags.output,
        bounds
    );
    Ok(())
}
