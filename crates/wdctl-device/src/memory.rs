//! In-memory watchdog backend for hardware-free tests.
//!
//! [`MemoryWatchdog`] answers the protocol from a scripted device model and
//! records every call in an event journal shared with its handles, so tests
//! can check the exact order of block, open, write, close and restore.
//!
//! ```rust
//! use wdctl_device::memory::{MemoryEvent, MemoryWatchdog};
//! use wdctl_device::query_with;
//!
//! let watchdog = MemoryWatchdog::new().with_identity("softdog", 0);
//! let outcome = query_with(&watchdog, "/dev/watchdog")?;
//! assert_eq!(outcome.snapshot.identity, "softdog");
//! assert_eq!(watchdog.closes(), 1);
//! assert_eq!(watchdog.events().last(), Some(&MemoryEvent::RestoreSignals));
//! # Ok::<(), wdctl_device::DeviceError>(())
//! ```

use std::cell::{Cell, RefCell};
use std::io;
use std::path::Path;
use std::rc::Rc;

use crate::backend::{WatchdogBackend, WatchdogHandle, WatchdogInfo};

/// One recorded backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryEvent {
    /// Signals blocked.
    BlockSignals,
    /// Device opened.
    Open,
    /// Open refused.
    OpenFailed,
    /// A query that the device answered.
    Query(&'static str),
    /// A query that the device refused.
    QueryFailed(&'static str),
    /// A byte written.
    Write(u8),
    /// A write interrupted by a signal.
    WriteInterrupted,
    /// A write that failed outright.
    WriteFailed,
    /// Device closed.
    Close,
    /// Signal mask restored.
    RestoreSignals,
}

/// How the fake device reacts to `open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OpenBehavior {
    #[default]
    Succeed,
    Busy,
    Missing,
}

#[derive(Debug, Clone, Default)]
struct Model {
    open: OpenBehavior,
    info: Option<WatchdogInfo>,
    status: Option<u32>,
    boot_status: Option<u32>,
    timeout: Option<i32>,
    pretimeout: Option<i32>,
    timeleft: Option<i32>,
    interrupted_writes: u32,
    write_error: bool,
    restore_error: bool,
}

#[derive(Debug, Default)]
struct Journal {
    events: RefCell<Vec<MemoryEvent>>,
    pending_interrupts: Cell<u32>,
}

impl Journal {
    fn record(&self, event: MemoryEvent) {
        self.events.borrow_mut().push(event);
    }

    fn count(&self, event: MemoryEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }
}

/// Scripted watchdog backend.
///
/// By default the device opens, refuses `WDIOC_GETSUPPORT` and accepts the
/// magic close write. Builder methods script the rest.
#[derive(Debug, Clone, Default)]
pub struct MemoryWatchdog {
    model: Model,
    journal: Rc<Journal>,
}

/// Mask token handed out by [`MemoryWatchdog`].
#[derive(Debug, PartialEq, Eq)]
pub struct MemoryMask;

impl MemoryWatchdog {
    /// A device that opens but answers no queries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `WDIOC_GETSUPPORT` with this identity and firmware version,
    /// keeping any options already set.
    #[must_use]
    pub fn with_identity(mut self, identity: &str, firmware_version: u32) -> Self {
        let info = self.model.info.get_or_insert_with(WatchdogInfo::default);
        info.identity = identity.to_string();
        info.firmware_version = firmware_version;
        self
    }

    /// Answer `WDIOC_GETSUPPORT` with these options.
    #[must_use]
    pub fn with_options(mut self, options: u32) -> Self {
        self.model
            .info
            .get_or_insert_with(WatchdogInfo::default)
            .options = options;
        self
    }

    /// Answer the status queries.
    #[must_use]
    pub fn with_status(mut self, status: u32, boot_status: u32) -> Self {
        self.model.status = Some(status);
        self.model.boot_status = Some(boot_status);
        self
    }

    /// Answer `WDIOC_GETTIMEOUT` with `seconds`.
    #[must_use]
    pub fn with_timeout(mut self, seconds: i32) -> Self {
        self.model.timeout = Some(seconds);
        self
    }

    /// Answer `WDIOC_GETPRETIMEOUT` with `seconds`.
    #[must_use]
    pub fn with_pretimeout(mut self, seconds: i32) -> Self {
        self.model.pretimeout = Some(seconds);
        self
    }

    /// Answer `WDIOC_GETTIMELEFT` with `seconds`.
    #[must_use]
    pub fn with_timeleft(mut self, seconds: i32) -> Self {
        self.model.timeleft = Some(seconds);
        self
    }

    /// Refuse `open` with `EBUSY`.
    #[must_use]
    pub fn busy(mut self) -> Self {
        self.model.open = OpenBehavior::Busy;
        self
    }

    /// Refuse `open` with `ENOENT`.
    #[must_use]
    pub fn missing(mut self) -> Self {
        self.model.open = OpenBehavior::Missing;
        self
    }

    /// Interrupt the first `count` writes with `EINTR`.
    #[must_use]
    pub fn interrupt_writes(mut self, count: u32) -> Self {
        self.model.interrupted_writes = count;
        self
    }

    /// Fail every write that is not interrupted.
    #[must_use]
    pub fn fail_writes(mut self) -> Self {
        self.model.write_error = true;
        self
    }

    /// Fail to restore the signal mask.
    #[must_use]
    pub fn fail_restore(mut self) -> Self {
        self.model.restore_error = true;
        self
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<MemoryEvent> {
        self.journal.events.borrow().clone()
    }

    /// Successful opens.
    #[must_use]
    pub fn opens(&self) -> usize {
        self.journal.count(MemoryEvent::Open)
    }

    /// Handles closed.
    #[must_use]
    pub fn closes(&self) -> usize {
        self.journal.count(MemoryEvent::Close)
    }

    /// Times signals were blocked.
    #[must_use]
    pub fn blocks(&self) -> usize {
        self.journal.count(MemoryEvent::BlockSignals)
    }

    /// Times the signal mask was restored, failed attempts included.
    #[must_use]
    pub fn restores(&self) -> usize {
        self.journal.count(MemoryEvent::RestoreSignals)
    }

    /// Bytes that reached the device.
    #[must_use]
    pub fn written(&self) -> Vec<u8> {
        self.journal
            .events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                MemoryEvent::Write(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    /// Whether a handle is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.opens() > self.closes()
    }

    /// Whether signals are still blocked.
    #[must_use]
    pub fn signals_blocked(&self) -> bool {
        self.blocks() > self.restores()
    }
}

impl WatchdogBackend for MemoryWatchdog {
    type Handle = MemoryHandle;
    type SavedMask = MemoryMask;

    fn block_signals(&self) -> io::Result<MemoryMask> {
        self.journal.record(MemoryEvent::BlockSignals);
        Ok(MemoryMask)
    }

    fn restore_signals(&self, _saved: MemoryMask) -> io::Result<()> {
        self.journal.record(MemoryEvent::RestoreSignals);
        if self.model.restore_error {
            return Err(io::Error::from(io::ErrorKind::InvalidInput));
        }
        Ok(())
    }

    fn open(&self, _path: &Path) -> io::Result<MemoryHandle> {
        let kind = match self.model.open {
            OpenBehavior::Succeed => None,
            OpenBehavior::Busy => Some(io::ErrorKind::ResourceBusy),
            OpenBehavior::Missing => Some(io::ErrorKind::NotFound),
        };
        if let Some(kind) = kind {
            self.journal.record(MemoryEvent::OpenFailed);
            return Err(io::Error::from(kind));
        }

        self.journal.record(MemoryEvent::Open);
        self.journal
            .pending_interrupts
            .set(self.model.interrupted_writes);
        Ok(MemoryHandle {
            model: self.model.clone(),
            journal: Rc::clone(&self.journal),
        })
    }
}

/// Open handle of a [`MemoryWatchdog`]. Records [`MemoryEvent::Close`] on drop.
#[derive(Debug)]
pub struct MemoryHandle {
    model: Model,
    journal: Rc<Journal>,
}

impl MemoryHandle {
    fn answer<T: Clone>(&self, name: &'static str, value: Option<&T>) -> io::Result<T> {
        match value {
            Some(value) => {
                self.journal.record(MemoryEvent::Query(name));
                Ok(value.clone())
            }
            None => {
                self.journal.record(MemoryEvent::QueryFailed(name));
                Err(io::Error::from(io::ErrorKind::Unsupported))
            }
        }
    }
}

impl WatchdogHandle for MemoryHandle {
    fn support(&mut self) -> io::Result<WatchdogInfo> {
        self.answer("support", self.model.info.as_ref())
    }

    fn status(&mut self) -> io::Result<u32> {
        self.answer("status", self.model.status.as_ref())
    }

    fn boot_status(&mut self) -> io::Result<u32> {
        self.answer("boot_status", self.model.boot_status.as_ref())
    }

    fn timeout(&mut self) -> io::Result<i32> {
        self.answer("timeout", self.model.timeout.as_ref())
    }

    fn pretimeout(&mut self) -> io::Result<i32> {
        self.answer("pretimeout", self.model.pretimeout.as_ref())
    }

    fn timeleft(&mut self) -> io::Result<i32> {
        self.answer("timeleft", self.model.timeleft.as_ref())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let pending = self.journal.pending_interrupts.get();
        if pending > 0 {
            self.journal.pending_interrupts.set(pending.saturating_sub(1));
            self.journal.record(MemoryEvent::WriteInterrupted);
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        if self.model.write_error {
            self.journal.record(MemoryEvent::WriteFailed);
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        for byte in buf {
            self.journal.record(MemoryEvent::Write(*byte));
        }
        Ok(buf.len())
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        self.journal.record(MemoryEvent::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_handle_records_close_on_drop() -> TestResult {
        let watchdog = MemoryWatchdog::new();
        let handle = watchdog.open(Path::new("/dev/watchdog"))?;
        assert!(watchdog.is_open());
        drop(handle);
        assert!(!watchdog.is_open());
        assert_eq!(watchdog.events(), vec![MemoryEvent::Open, MemoryEvent::Close]);
        Ok(())
    }

    #[test]
    fn test_interrupts_then_write() -> TestResult {
        let watchdog = MemoryWatchdog::new().interrupt_writes(2);
        let mut handle = watchdog.open(Path::new("/dev/watchdog"))?;
        for _ in 0..2 {
            assert!(handle.write(b"V").is_err_and(|e| e.kind() == io::ErrorKind::Interrupted));
        }
        assert_eq!(handle.write(b"V")?, 1);
        assert_eq!(watchdog.written(), b"V".to_vec());
        Ok(())
    }

    #[test]
    fn test_options_and_identity_combine() -> TestResult {
        let watchdog = MemoryWatchdog::new()
            .with_options(0x8000)
            .with_identity("wd", 3);
        let mut handle = watchdog.open(Path::new("/dev/watchdog"))?;
        let info = handle.support()?;
        assert_eq!(info.options, 0x8000);
        assert_eq!(info.identity, "wd");
        assert_eq!(info.firmware_version, 3);
        Ok(())
    }
}
