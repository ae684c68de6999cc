//! Thread signal mask control.
#![expect(unsafe_code, reason = "sigset_t and pthread_sigmask are only reachable through libc")]

use std::fmt;
use std::io;

/// Signal mask in effect before [`block_all`].
pub struct SavedSignals {
    set: libc::sigset_t,
}

impl fmt::Debug for SavedSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedSignals").finish_non_exhaustive()
    }
}

fn empty_set() -> libc::sigset_t {
    // SAFETY: sigset_t is a plain C bit array; all-zero is a valid value
    // and is overwritten by sigemptyset/sigfillset or the kernel anyway.
    unsafe { std::mem::zeroed() }
}

fn check(rc: libc::c_int) -> io::Result<()> {
    // pthread_sigmask returns the error number instead of setting errno.
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::from_raw_os_error(rc))
    }
}

/// Block every blockable signal for the calling thread.
///
/// # Errors
///
/// Returns the OS error when the mask cannot be changed.
pub fn block_all() -> io::Result<SavedSignals> {
    let mut all = empty_set();
    let mut old = empty_set();

    // SAFETY: `all` is a live, exclusively borrowed sigset_t.
    let rc = unsafe { libc::sigfillset(&mut all) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: both pointers refer to live sigset_t locals for the duration
    // of the call.
    let rc = unsafe { libc::pthread_sigmask(libc::SIG_BLOCK, &all, &mut old) };
    check(rc)?;
    Ok(SavedSignals { set: old })
}

/// Reinstall a mask returned by [`block_all`].
///
/// # Errors
///
/// Returns the OS error when the mask cannot be changed.
pub fn restore(saved: SavedSignals) -> io::Result<()> {
    // SAFETY: `saved.set` was filled in by pthread_sigmask and outlives the
    // call; a null old-set pointer is allowed.
    let rc = unsafe {
        libc::pthread_sigmask(libc::SIG_SETMASK, &saved.set, std::ptr::null_mut())
    };
    check(rc)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn current() -> Result<libc::sigset_t, io::Error> {
        let mut now = empty_set();
        // SAFETY: null new-set only reads the mask into `now`.
        let rc = unsafe { libc::pthread_sigmask(libc::SIG_BLOCK, std::ptr::null(), &mut now) };
        check(rc)?;
        Ok(now)
    }

    fn is_member(set: &libc::sigset_t, signal: libc::c_int) -> bool {
        // SAFETY: `set` is a valid sigset_t borrowed for the call.
        unsafe { libc::sigismember(set, signal) == 1 }
    }

    #[test]
    fn test_block_and_restore_round_trip() -> TestResult {
        let before = is_member(&current()?, libc::SIGTERM);

        let saved = block_all()?;
        assert!(is_member(&current()?, libc::SIGTERM));
        assert!(is_member(&current()?, libc::SIGINT));

        restore(saved)?;
        assert_eq!(is_member(&current()?, libc::SIGTERM), before);
        Ok(())
    }
}
