//! Watchdog status snapshot.

/// Device opened when `--device` is not given.
pub const DEFAULT_DEVICE: &str = "/dev/watchdog";

/// Everything one query learned about a watchdog device.
///
/// The timing fields are `None` when the driver does not answer the
/// corresponding ioctl, so an unsupported value is never shown as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchdogSnapshot {
    /// Device node path.
    pub device: String,
    /// Driver identity string.
    pub identity: String,
    /// Firmware version reported with the identity.
    pub firmware_version: u32,
    /// Supported `WDIOF_*` options.
    pub options: u32,
    /// Live status bits.
    pub status: u32,
    /// Status bits latched at boot.
    pub boot_status: u32,
    /// Timeout in seconds.
    pub timeout: Option<i32>,
    /// Pre-timeout in seconds.
    pub pretimeout: Option<i32>,
    /// Seconds left before reset.
    pub timeleft: Option<i32>,
}

impl WatchdogSnapshot {
    /// Empty snapshot for `device`.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }

    /// Set the identity string and firmware version.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>, firmware_version: u32) -> Self {
        self.identity = identity.into();
        self.firmware_version = firmware_version;
        self
    }

    /// Set the supported options mask.
    #[must_use]
    pub fn with_options(mut self, options: u32) -> Self {
        self.options = options;
        self
    }

    /// Set the status and boot status masks.
    #[must_use]
    pub fn with_status(mut self, status: u32, boot_status: u32) -> Self {
        self.status = status;
        self.boot_status = boot_status;
        self
    }

    /// Set the timeout, in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: i32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the pretimeout, in seconds.
    #[must_use]
    pub fn with_pretimeout(mut self, seconds: i32) -> Self {
        self.pretimeout = Some(seconds);
        self
    }

    /// Set the time left before reboot, in seconds.
    #[must_use]
    pub fn with_timeleft(mut self, seconds: i32) -> Self {
        self.timeleft = Some(seconds);
        self
    }

    /// Whether `bit` is set in the live status.
    #[must_use]
    pub fn status_set(&self, bit: u32) -> bool {
        self.status & bit != 0
    }

    /// Whether `bit` is set in the boot status.
    #[must_use]
    pub fn boot_status_set(&self, bit: u32) -> bool {
        self.boot_status & bit != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshot_has_no_timing() {
        let snapshot = WatchdogSnapshot::new(DEFAULT_DEVICE);
        assert_eq!(snapshot.device, "/dev/watchdog");
        assert_eq!(snapshot.timeout, None);
        assert_eq!(snapshot.pretimeout, None);
        assert_eq!(snapshot.timeleft, None);
        assert_eq!(snapshot.options, 0);
    }

    #[test]
    fn test_status_bits() {
        let snapshot = WatchdogSnapshot::new("/dev/watchdog1").with_status(0x8000, 0x20);
        assert!(snapshot.status_set(0x8000));
        assert!(!snapshot.status_set(0x20));
        assert!(snapshot.boot_status_set(0x20));
    }
}
