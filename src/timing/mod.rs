pub mod duration;
pub mod parse;

pub use duration::{duration_label, elapsed_between, record_duration, Elapsed, UNKNOWN_LABEL};
pub use parse::parse_time_of_day;
