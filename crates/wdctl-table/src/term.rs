//! Terminal width detection.

/// Width assumed when stdout is not a terminal.
pub const DEFAULT_TERM_WIDTH: usize = 80;

/// Environment variable overriding the detected width.
pub const COLUMNS_ENV: &str = "COLUMNS";

fn parse_columns(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|w| *w > 0)
}

/// Width of the terminal attached to stdout.
///
/// `COLUMNS` wins over the tty size; without either the width is
/// [`DEFAULT_TERM_WIDTH`].
#[must_use]
pub fn terminal_width() -> usize {
    std::env::var(COLUMNS_ENV)
        .ok()
        .as_deref()
        .and_then(parse_columns)
        .or_else(stdout_tty_width)
        .unwrap_or(DEFAULT_TERM_WIDTH)
}

#[cfg(unix)]
#[expect(unsafe_code, reason = "TIOCGWINSZ is only reachable through libc::ioctl")]
fn stdout_tty_width() -> Option<usize> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ writes a `winsize` into the pointer we pass, which
    // points at a live, properly aligned local.
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
    (rc == 0 && size.ws_col > 0).then_some(usize::from(size.ws_col))
}

#[cfg(not(unix))]
fn stdout_tty_width() -> Option<usize> {
    None
}
