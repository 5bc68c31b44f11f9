//! Small pieces shared by the video map tools: logging, timing, and reading/writing files.

#[macro_use]
extern crate log;

mod io;
pub mod logger;
mod time;

pub use crate::io::{slurp_file, to_json, write_json};
pub use crate::time::{elapsed_seconds, prettyprint_time, prettyprint_usize, Timer};
