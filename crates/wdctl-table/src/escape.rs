//! Cell escaping for raw and key="value" output.

fn push_hex(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    for byte in c.encode_utf8(&mut buf).bytes() {
        out.push_str(&format!("\\x{byte:02x}"));
    }
}

/// Escape a cell for raw mode: whitespace, backslash and control chars
/// become `\xHH` so every row stays a single space-separated line.
pub(crate) fn raw(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for c in data.chars() {
        if c == '\\' || c.is_whitespace() || c.is_control() {
            push_hex(&mut out, c);
        } else {
            out.push(c);
        }
    }
    out
}

/// Quote a cell for key="value" mode.
pub(crate) fn quoted(data: &str) -> String {
    let mut out = String::with_capacity(data.len().saturating_add(2));
    out.push('"');
    for c in data.chars() {
        match c {
            '"' | '\\' | '`' | '$' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => push_hex(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
