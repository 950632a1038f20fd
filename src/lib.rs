//! Stress-test evaluation engine for devices under multi-hour battery tests.
//!
//! Operators check a device in with starting conditions and later check it
//! out with ending conditions. The engine derives the elapsed test duration
//! from the recorded 12-hour time strings, classifies completed tests
//! Pass/Fail against a fixed policy, and keeps the persisted `condition`
//! field in sync with the record's source fields on every read.

pub mod db;
pub mod evaluation;
pub mod metrics;
pub mod timing;
pub mod utils;

pub use db::{Database, DeviceDraft, DeviceRecord, DeviceStatus, Verdict};
pub use evaluation::{evaluate, DeviceRow, Evaluation, Evaluator};
pub use metrics::FleetStats;
pub use timing::{duration_label, parse_time_of_day, record_duration, Elapsed};
