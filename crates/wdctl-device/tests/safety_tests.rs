//! Safety tests for the device session.
//!
//! Every path through a query must leave the device closed exactly once,
//! disarmed if it was opened, and the signal mask restored exactly once.
//! All tests use `Result<>` return types and avoid `unwrap`/`expect`.

#![cfg(test)]

use wdctl_device::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn assert_released(watchdog: &MemoryWatchdog) {
    assert!(!watchdog.is_open(), "device left open: {:?}", watchdog.events());
    assert!(
        !watchdog.signals_blocked(),
        "signals left blocked: {:?}",
        watchdog.events()
    );
    assert_eq!(watchdog.blocks(), 1);
    assert_eq!(watchdog.restores(), 1);
}

/// Tests the full event order of a successful query.
#[test]
fn test_success_path_order() -> TestResult {
    let watchdog = MemoryWatchdog::new()
        .with_identity("wd", 1)
        .with_options(0x0100)
        .with_status(0, 0)
        .with_timeout(30)
        .with_pretimeout(5)
        .with_timeleft(29);

    query_with(&watchdog, "/dev/watchdog")?;

    assert_eq!(
        watchdog.events(),
        vec![
            MemoryEvent::BlockSignals,
            MemoryEvent::Open,
            MemoryEvent::Query("support"),
            MemoryEvent::Query("status"),
            MemoryEvent::Query("boot_status"),
            MemoryEvent::Query("timeout"),
            MemoryEvent::Query("pretimeout"),
            MemoryEvent::Query("timeleft"),
            MemoryEvent::Write(b'V'),
            MemoryEvent::Close,
            MemoryEvent::RestoreSignals,
        ]
    );
    assert_released(&watchdog);
    Ok(())
}

/// Tests that a refused identity query skips the other queries but still
/// disarms.
#[test]
fn test_info_failure_still_disarms() -> TestResult {
    let watchdog = MemoryWatchdog::new().with_timeout(30);

    let outcome = query_with(&watchdog, "/dev/watchdog")?;

    assert_eq!(
        watchdog.events(),
        vec![
            MemoryEvent::BlockSignals,
            MemoryEvent::Open,
            MemoryEvent::QueryFailed("support"),
            MemoryEvent::Write(b'V'),
            MemoryEvent::Close,
            MemoryEvent::RestoreSignals,
        ]
    );
    assert_eq!(outcome.snapshot.timeout, None);
    assert_released(&watchdog);
    Ok(())
}

/// Tests that interrupted writes are retried until the byte gets through.
#[test]
fn test_interrupted_write_is_retried() -> TestResult {
    let watchdog = MemoryWatchdog::new().with_identity("wd", 0).interrupt_writes(3);

    let outcome = query_with(&watchdog, "/dev/watchdog")?;

    let interrupted = watchdog
        .events()
        .iter()
        .filter(|e| **e == MemoryEvent::WriteInterrupted)
        .count();
    assert_eq!(interrupted, 3);
    assert_eq!(watchdog.written(), b"V".to_vec());
    assert!(outcome.warnings.is_empty());
    assert_released(&watchdog);
    Ok(())
}

/// Tests that a failed write is reported and the device still closes.
#[test]
fn test_write_failure_warns_and_closes() -> TestResult {
    let watchdog = MemoryWatchdog::new().with_identity("wd", 0).fail_writes();

    let outcome = query_with(&watchdog, "/dev/watchdog")?;

    assert!(matches!(
        outcome.warnings.as_slice(),
        [QueryWarning::DisarmFailed { device, .. }] if device == "/dev/watchdog"
    ));
    assert!(watchdog.written().is_empty());
    assert_released(&watchdog);
    Ok(())
}

/// Tests that a busy device restores signals and never opens.
#[test]
fn test_busy_device_restores_signals() {
    let watchdog = MemoryWatchdog::new().busy();

    let result = query_with(&watchdog, "/dev/watchdog");

    assert!(matches!(result, Err(DeviceError::Busy { .. })));
    assert_eq!(watchdog.opens(), 0);
    assert_eq!(watchdog.closes(), 0);
    assert!(watchdog.written().is_empty());
    assert_released(&watchdog);
}

/// Tests that a missing device restores signals.
#[test]
fn test_open_failure_restores_signals() {
    let watchdog = MemoryWatchdog::new().missing();

    let result = query_with(&watchdog, "/dev/watchdog7");

    assert!(matches!(
        result,
        Err(DeviceError::Open { ref device, .. }) if device == "/dev/watchdog7"
    ));
    assert_released(&watchdog);
}

/// Tests that an empty path fails before any backend call.
#[test]
fn test_empty_path_touches_nothing() {
    let watchdog = MemoryWatchdog::new();

    let result = query_with(&watchdog, "");

    assert!(matches!(result, Err(DeviceError::EmptyPath)));
    assert!(watchdog.events().is_empty());
}

/// Tests that a dropped session releases the device without `finish`.
#[test]
fn test_dropped_session_releases() -> TestResult {
    let watchdog = MemoryWatchdog::new();
    {
        let session = DeviceSession::open(&watchdog, "/dev/watchdog")?;
        assert_eq!(session.device(), "/dev/watchdog");
        assert!(watchdog.is_open());
        assert!(watchdog.signals_blocked());
    }
    assert_eq!(watchdog.written(), b"V".to_vec());
    assert_released(&watchdog);
    Ok(())
}

/// Tests that `finish` releases once and the drop that follows does nothing.
#[test]
fn test_finish_releases_once() -> TestResult {
    let watchdog = MemoryWatchdog::new();
    let session = DeviceSession::open(&watchdog, "/dev/watchdog")?;
    let warnings = session.finish();
    assert!(warnings.is_empty());
    assert_eq!(watchdog.closes(), 1);
    assert_released(&watchdog);
    Ok(())
}

/// Tests that a failed restore is reported without losing the close.
#[test]
fn test_restore_failure_is_a_warning() -> TestResult {
    let watchdog = MemoryWatchdog::new().with_identity("wd", 0).fail_restore();

    let outcome = query_with(&watchdog, "/dev/watchdog")?;

    assert!(matches!(
        outcome.warnings.as_slice(),
        [QueryWarning::SignalRestore { .. }]
    ));
    assert_eq!(watchdog.closes(), 1);
    assert_eq!(watchdog.restores(), 1);
    Ok(())
}
