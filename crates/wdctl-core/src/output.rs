//! Full wdctl output: identity, timeouts and the flags table.

use std::io::{self, Write};

use serde_json::{Map, Value, json};
use wdctl_table::{OutputMode, TableOptions};

use crate::columns::ColumnSelection;
use crate::error::CoreResult;
use crate::flags::FlagFilter;
use crate::report::{ReportWarning, build_report};
use crate::snapshot::WatchdogSnapshot;

const LABEL_WIDTH: usize = 15;

/// What to print and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Print the identity line.
    pub identity: bool,
    /// Print the timeout lines.
    pub timeouts: bool,
    /// Print the flags table.
    pub flags: bool,
    /// Flags table columns.
    pub columns: ColumnSelection,
    /// Flags table row restriction.
    pub filter: FlagFilter,
    /// Renderer options for the flags table.
    pub table: TableOptions,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            identity: true,
            timeouts: true,
            flags: true,
            columns: ColumnSelection::default(),
            filter: FlagFilter::all(),
            table: TableOptions {
                name: String::from("flags"),
                ..TableOptions::default()
            },
        }
    }
}

/// Print `Identity:  <identity> [version <hex>]`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_identity<W: Write>(snapshot: &WatchdogSnapshot, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<LABEL_WIDTH$}{} [version {:x}]",
        "Identity:", snapshot.identity, snapshot.firmware_version
    )
}

fn timings(snapshot: &WatchdogSnapshot) -> [(&'static str, &'static str, Option<i32>); 3] {
    [
        ("Timeout:", "timeout", snapshot.timeout),
        ("Pre-timeout:", "pretimeout", snapshot.pretimeout),
        ("Timeleft:", "timeleft", snapshot.timeleft),
    ]
}

/// Print one line per timing value the device reported.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_timeouts<W: Write>(snapshot: &WatchdogSnapshot, out: &mut W) -> io::Result<()> {
    for (label, _, value) in timings(snapshot) {
        if let Some(seconds) = value {
            writeln!(out, "{label:<LABEL_WIDTH$}{seconds:>2} seconds")?;
        }
    }
    Ok(())
}

/// Print everything `options` asks for and return the report warnings.
///
/// In normal, raw and pairs modes the identity and timeout lines come
/// first, then a blank line, then the flags table. In JSON mode the whole
/// output is one object.
///
/// # Errors
///
/// Returns an error if the report cannot be built or writing fails.
pub fn print_snapshot<W: Write>(
    snapshot: &WatchdogSnapshot,
    options: &DisplayOptions,
    out: &mut W,
) -> CoreResult<Vec<ReportWarning>> {
    if options.table.mode == OutputMode::Json {
        return print_json(snapshot, options, out);
    }

    if options.identity {
        print_identity(snapshot, out)?;
    }
    if options.timeouts {
        print_timeouts(snapshot, out)?;
    }
    if options.flags && (options.identity || options.timeouts) {
        writeln!(out)?;
    }

    if !options.flags {
        return Ok(Vec::new());
    }
    let report = build_report(
        snapshot,
        &options.columns,
        options.filter,
        options.table.clone(),
    )?;
    report.print(out)?;
    Ok(report.into_warnings())
}

fn print_json<W: Write>(
    snapshot: &WatchdogSnapshot,
    options: &DisplayOptions,
    out: &mut W,
) -> CoreResult<Vec<ReportWarning>> {
    let mut root = Map::new();
    root.insert("device".into(), json!(snapshot.device));

    if options.identity {
        root.insert("identity".into(), json!(snapshot.identity));
        root.insert(
            "firmware_version".into(),
            json!(snapshot.firmware_version),
        );
    }
    if options.timeouts {
        for (_, key, value) in timings(snapshot) {
            if let Some(seconds) = value {
                root.insert(key.into(), json!(seconds));
            }
        }
    }

    let mut warnings = Vec::new();
    if options.flags {
        let report = build_report(
            snapshot,
            &options.columns,
            options.filter,
            options.table.clone(),
        )?;
        root.insert(options.table.name.clone(), report.table().json_rows());
        warnings = report.into_warnings();
    }

    serde_json::to_writer_pretty(&mut *out, &Value::Object(root))?;
    writeln!(out)?;
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn render(snapshot: &WatchdogSnapshot, options: &DisplayOptions) -> CoreResult<String> {
        let mut buf = Vec::new();
        print_snapshot(snapshot, options, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    #[test]
    fn test_identity_line() -> TestResult {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog").with_identity("iTCO_wdt", 0x1a);
        let mut buf = Vec::new();
        print_identity(&snapshot, &mut buf)?;
        assert_eq!(String::from_utf8(buf)?, "Identity:      iTCO_wdt [version 1a]\n");
        Ok(())
    }

    #[test]
    fn test_timeouts_only_present_fields() -> TestResult {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog")
            .with_timeout(5)
            .with_pretimeout(120);
        let mut buf = Vec::new();
        print_timeouts(&snapshot, &mut buf)?;
        assert_eq!(
            String::from_utf8(buf)?,
            "Timeout:        5 seconds\nPre-timeout:   120 seconds\n"
        );
        Ok(())
    }

    #[test]
    fn test_no_separator_without_header_section() -> TestResult {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog").with_options(0x0080);
        let options = DisplayOptions {
            identity: false,
            timeouts: false,
            ..DisplayOptions::default()
        };
        let out = render(&snapshot, &options)?;
        assert!(out.starts_with("FLAG "));
        Ok(())
    }

    #[test]
    fn test_no_flags_no_separator() -> TestResult {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog")
            .with_identity("wd", 1)
            .with_options(0x0080);
        let options = DisplayOptions {
            flags: false,
            ..DisplayOptions::default()
        };
        assert_eq!(render(&snapshot, &options)?, "Identity:      wd [version 1]\n");
        Ok(())
    }

    #[test]
    fn test_json_document() -> TestResult {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog")
            .with_identity("wd", 2)
            .with_options(0x0100)
            .with_status(0x0100, 0)
            .with_timeleft(7);
        let mut options = DisplayOptions::default();
        options.table.mode = OutputMode::Json;

        let value: Value = serde_json::from_str(&render(&snapshot, &options)?)?;
        let expected = json!({
            "device": "/dev/watchdog",
            "identity": "wd",
            "firmware_version": 2,
            "timeleft": 7,
            "flags": [{
                "flag": "MAGICCLOSE",
                "description": "Supports magic close char",
                "status": true,
                "boot-status": false
            }]
        });
        assert_eq!(value, expected);
        Ok(())
    }
}
