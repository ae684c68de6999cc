//! Prelude for wdctl-core.

pub use crate::columns::{COLUMNS, ColumnDescriptor, ColumnId, ColumnSelection};
pub use crate::error::{CoreError, CoreResult};
pub use crate::flags::*;
pub use crate::output::{DisplayOptions, print_snapshot};
pub use crate::report::{Report, ReportWarning, build_report};
pub use crate::snapshot::{DEFAULT_DEVICE, WatchdogSnapshot};
pub use wdctl_table::{OutputMode, TableOptions};
