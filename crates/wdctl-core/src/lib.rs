//! # wdctl-core
//!
//! Everything wdctl knows about watchdog status except how to talk to the
//! device:
//!
//! - [`flags`]: the catalog of `WDIOF_*` capability flags
//! - [`columns`]: the catalog of report columns and the user's selection
//! - [`snapshot`]: the status record filled in by a device query
//! - [`report`]: turns a snapshot into flag rows and a rendered table
//! - [`output`]: identity and timeout lines around the flags table
//!
//! ## Example
//!
//! ```rust
//! use wdctl_core::prelude::*;
//!
//! let snapshot = WatchdogSnapshot::new("/dev/watchdog")
//!     .with_identity("iTCO_wdt", 0)
//!     .with_options(WDIOF_SETTIMEOUT | WDIOF_MAGICCLOSE);
//!
//! let report = build_report(
//!     &snapshot,
//!     &ColumnSelection::default(),
//!     FlagFilter::all(),
//!     TableOptions::default(),
//! )?;
//! assert_eq!(report.table().rows().len(), 2);
//! assert!(report.warnings().is_empty());
//! # Ok::<(), wdctl_core::CoreError>(())
//! ```

#![deny(clippy::unwrap_used)]

pub mod bitmask;
pub mod columns;
pub mod error;
pub mod flags;
pub mod list;
pub mod output;
pub mod prelude;
pub mod report;
pub mod snapshot;

pub use columns::{COLUMNS, ColumnDescriptor, ColumnId, ColumnSelection};
pub use error::{CoreError, CoreResult};
pub use flags::{FLAGS, FlagDescriptor, FlagFilter};
pub use output::{DisplayOptions, print_snapshot};
pub use report::{Report, ReportWarning, build_report};
pub use snapshot::{DEFAULT_DEVICE, WatchdogSnapshot};
