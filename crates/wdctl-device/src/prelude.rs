//! Prelude for wdctl-device.

pub use crate::backend::{MAGIC_CLOSE, WatchdogBackend, WatchdogHandle, WatchdogInfo};
pub use crate::error::{DeviceError, DeviceResult, QueryWarning};
pub use crate::memory::{MemoryEvent, MemoryWatchdog};
pub use crate::query::{QueryOutcome, query_device, query_with};
pub use crate::session::DeviceSession;
