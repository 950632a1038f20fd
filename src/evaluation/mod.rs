pub mod engine;
pub mod policy;

pub use engine::{DeviceRow, Evaluator};
pub use policy::{classify, evaluate, Evaluation, MIN_AFTER_BATTERY, MIN_TEST_HOURS};
