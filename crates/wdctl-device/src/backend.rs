//! Seams between the query protocol and the operating system.

use std::io;
use std::path::Path;

/// Byte that tells the driver to stop the timer on close.
pub const MAGIC_CLOSE: u8 = b'V';

/// Identity block returned by `WDIOC_GETSUPPORT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchdogInfo {
    /// Supported `WDIOF_*` options.
    pub options: u32,
    /// Firmware version.
    pub firmware_version: u32,
    /// Driver identity.
    pub identity: String,
}

/// An open watchdog device.
///
/// Dropping the handle closes the device.
pub trait WatchdogHandle {
    /// Capabilities and identity.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the driver rejects the request.
    fn support(&mut self) -> io::Result<WatchdogInfo>;

    /// Live status bits.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the driver rejects the request.
    fn status(&mut self) -> io::Result<u32>;

    /// Status bits latched at boot.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the driver rejects the request.
    fn boot_status(&mut self) -> io::Result<u32>;

    /// Timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the driver rejects the request.
    fn timeout(&mut self) -> io::Result<i32>;

    /// Pre-timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the driver rejects the request.
    fn pretimeout(&mut self) -> io::Result<i32>;

    /// Seconds left before the timer fires.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the driver rejects the request.
    fn timeleft(&mut self) -> io::Result<i32>;

    /// One `write(2)` call. Interrupted writes surface as
    /// [`io::ErrorKind::Interrupted`] and are not retried here.
    ///
    /// # Errors
    ///
    /// Returns the OS error of the write.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

/// Opens devices and masks signals.
pub trait WatchdogBackend {
    /// Open device type.
    type Handle: WatchdogHandle;
    /// Signal mask saved by [`WatchdogBackend::block_signals`].
    type SavedMask;

    /// Block every signal and return the previous mask.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the mask cannot be changed.
    fn block_signals(&self) -> io::Result<Self::SavedMask>;

    /// Put back a mask saved by [`WatchdogBackend::block_signals`].
    ///
    /// # Errors
    ///
    /// Returns the OS error when the mask cannot be changed.
    fn restore_signals(&self, saved: Self::SavedMask) -> io::Result<()>;

    /// Open `path` write-only and close-on-exec.
    ///
    /// # Errors
    ///
    /// Returns the OS error of the open; `EBUSY` must surface as
    /// [`io::ErrorKind::ResourceBusy`].
    fn open(&self, path: &Path) -> io::Result<Self::Handle>;
}
