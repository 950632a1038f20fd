mod device;

pub use device::{DeviceDraft, DeviceRecord, DeviceStatus, Verdict};
