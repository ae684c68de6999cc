//! Linux watchdog backend: `/dev/watchdog*` through `<linux/watchdog.h>` ioctls.
#![expect(unsafe_code, reason = "watchdog ioctls are only reachable through libc::ioctl")]

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use tracing::trace;

use crate::backend::{WatchdogBackend, WatchdogHandle, WatchdogInfo};
use crate::signal::{self, SavedSignals};

const WATCHDOG_IOCTL_BASE: u8 = b'W';

const WDIOC_NR_GETSUPPORT: u8 = 0;
const WDIOC_NR_GETSTATUS: u8 = 1;
const WDIOC_NR_GETBOOTSTATUS: u8 = 2;
const WDIOC_NR_GETTIMEOUT: u8 = 7;
const WDIOC_NR_GETPRETIMEOUT: u8 = 9;
const WDIOC_NR_GETTIMELEFT: u8 = 10;

const IOC_NRBITS: u32 = 8;
const IOC_TYPEBITS: u32 = 8;
const IOC_SIZEBITS: u32 = 14;
const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = IOC_NRSHIFT + IOC_NRBITS;
const IOC_SIZESHIFT: u32 = IOC_TYPESHIFT + IOC_TYPEBITS;
const IOC_DIRSHIFT: u32 = IOC_SIZESHIFT + IOC_SIZEBITS;
const IOC_READ: u32 = 2;

const IDENTITY_LEN: usize = 32;

/// `struct watchdog_info`
#[repr(C)]
#[derive(Debug, Default)]
struct RawWatchdogInfo {
    options: u32,
    firmware_version: u32,
    identity: [u8; IDENTITY_LEN],
}

const fn ioctl_code(direction: u32, kind: u8, nr: u8, size: usize) -> libc::c_ulong {
    ((direction << IOC_DIRSHIFT)
        | ((kind as u32) << IOC_TYPESHIFT)
        | ((nr as u32) << IOC_NRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)) as libc::c_ulong
}

const fn ior_read<T>(kind: u8, nr: u8) -> libc::c_ulong {
    ioctl_code(IOC_READ, kind, nr, std::mem::size_of::<T>())
}

const WDIOC_GETSUPPORT: libc::c_ulong =
    ior_read::<RawWatchdogInfo>(WATCHDOG_IOCTL_BASE, WDIOC_NR_GETSUPPORT);
const WDIOC_GETSTATUS: libc::c_ulong =
    ior_read::<libc::c_int>(WATCHDOG_IOCTL_BASE, WDIOC_NR_GETSTATUS);
const WDIOC_GETBOOTSTATUS: libc::c_ulong =
    ior_read::<libc::c_int>(WATCHDOG_IOCTL_BASE, WDIOC_NR_GETBOOTSTATUS);
const WDIOC_GETTIMEOUT: libc::c_ulong =
    ior_read::<libc::c_int>(WATCHDOG_IOCTL_BASE, WDIOC_NR_GETTIMEOUT);
const WDIOC_GETPRETIMEOUT: libc::c_ulong =
    ior_read::<libc::c_int>(WATCHDOG_IOCTL_BASE, WDIOC_NR_GETPRETIMEOUT);
const WDIOC_GETTIMELEFT: libc::c_ulong =
    ior_read::<libc::c_int>(WATCHDOG_IOCTL_BASE, WDIOC_NR_GETTIMELEFT);

/// Identity bytes up to the first NUL.
fn parse_identity(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(raw.get(..end).unwrap_or_default()).into_owned()
}

/// The real watchdog driver interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxWatchdog;

impl WatchdogBackend for LinuxWatchdog {
    type Handle = DeviceFile;
    type SavedMask = SavedSignals;

    fn block_signals(&self) -> io::Result<SavedSignals> {
        signal::block_all()
    }

    fn restore_signals(&self, saved: SavedSignals) -> io::Result<()> {
        signal::restore(saved)
    }

    fn open(&self, path: &Path) -> io::Result<DeviceFile> {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_CLOEXEC)
            .open(path)?;
        Ok(DeviceFile { file })
    }
}

/// An open watchdog device node. Closed on drop.
#[derive(Debug)]
pub struct DeviceFile {
    file: File,
}

impl DeviceFile {
    fn read_int(&self, request: libc::c_ulong) -> io::Result<libc::c_int> {
        let mut value: libc::c_int = 0;
        // SAFETY: every int-sized WDIOC_GET* request writes one c_int into
        // the pointer, which refers to a live local.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), request, &mut value) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            trace!(request, error = %err, "watchdog ioctl failed");
            return Err(err);
        }
        Ok(value)
    }

    fn read_bits(&self, request: libc::c_ulong) -> io::Result<u32> {
        self.read_int(request)
            .map(|value| u32::from_ne_bytes(value.to_ne_bytes()))
    }
}

impl WatchdogHandle for DeviceFile {
    fn support(&mut self) -> io::Result<WatchdogInfo> {
        let mut raw = RawWatchdogInfo::default();
        // SAFETY: WDIOC_GETSUPPORT fills a `struct watchdog_info`, which
        // RawWatchdogInfo mirrors with #[repr(C)].
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), WDIOC_GETSUPPORT, &mut raw) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(WatchdogInfo {
            options: raw.options,
            firmware_version: raw.firmware_version,
            identity: parse_identity(&raw.identity),
        })
    }

    fn status(&mut self) -> io::Result<u32> {
        self.read_bits(WDIOC_GETSTATUS)
    }

    fn boot_status(&mut self) -> io::Result<u32> {
        self.read_bits(WDIOC_GETBOOTSTATUS)
    }

    fn timeout(&mut self) -> io::Result<i32> {
        self.read_int(WDIOC_GETTIMEOUT)
    }

    fn pretimeout(&mut self) -> io::Result<i32> {
        self.read_int(WDIOC_GETPRETIMEOUT)
    }

    fn timeleft(&mut self) -> io::Result<i32> {
        self.read_int(WDIOC_GETTIMELEFT)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }
}
