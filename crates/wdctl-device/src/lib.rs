//! # wdctl-device
//!
//! Reads the state of a watchdog device without leaving it armed.
//!
//! Opening `/dev/watchdog` starts the timer. A query therefore runs inside
//! a [`DeviceSession`] that always ends the same way, on success, on a
//! failed ioctl, or while unwinding:
//!
//! 1. all signals are blocked before the open
//! 2. the magic close byte `'V'` is written, retrying on `EINTR`
//! 3. the handle is closed
//! 4. the previous signal mask is restored
//!
//! The protocol is written against the [`WatchdogBackend`] and
//! [`WatchdogHandle`] traits. [`linux::LinuxWatchdog`] talks to the kernel
//! driver; [`memory::MemoryWatchdog`] is a scripted fake for tests.
//!
//! ## Example
//!
//! ```rust
//! use wdctl_device::prelude::*;
//!
//! let watchdog = MemoryWatchdog::new()
//!     .with_identity("softdog", 0)
//!     .with_options(0x8180)
//!     .with_timeout(60);
//!
//! let outcome = query_with(&watchdog, "/dev/watchdog")?;
//! assert_eq!(outcome.snapshot.timeout, Some(60));
//! assert!(outcome.warnings.is_empty());
//! assert_eq!(watchdog.written(), b"V");
//! # Ok::<(), DeviceError>(())
//! ```

#![deny(clippy::unwrap_used, missing_debug_implementations)]

pub mod backend;
pub mod error;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod memory;
pub mod prelude;
pub mod query;
pub mod session;
#[cfg(unix)]
pub mod signal;

pub use backend::{MAGIC_CLOSE, WatchdogBackend, WatchdogHandle, WatchdogInfo};
pub use error::{DeviceError, DeviceResult, QueryWarning};
pub use query::{QueryOutcome, query_device, query_with};
pub use session::DeviceSession;
