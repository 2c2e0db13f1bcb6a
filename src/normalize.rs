//! URL normalization applied before any other check.

/// Percent-decode and ASCII-lowercase a raw URL.
///
/// `+` becomes a space and `%XX` escapes are decoded; a `%` not followed by two
/// hex digits is kept as-is. A decoded byte is scanned again together with the
/// bytes before it, so `%252e` ends up as `.` and the result is stable under a
/// second call. Runs in time linear in the input however deep the nesting.
/// Bytes that do not form valid UTF-8 after decoding become U+FFFD.
pub fn normalize(raw: &str) -> String {
    let mut out = Vec::with_capacity(raw.len());
    for &byte in raw.as_bytes() {
        push_decoded(&mut out, byte);
    }
    let mut normalized = String::from_utf8_lossy(&out).into_owned();
    normalized.make_ascii_lowercase();
    normalized
}

/// Append `byte`, collapsing any `%XX` it completes at the tail of `out`.
///
/// Each collapse removes two bytes net, so the work is bounded by the number
/// of bytes ever pushed.
fn push_decoded(out: &mut Vec<u8>, mut byte: u8) {
    loop {
        out.push(if byte == b'+' { b' ' } else { byte });
        let n = out.len();
        if n < 3 || out[n - 3] != b'%' {
            return;
        }
        match (hex_value(out[n - 2]), hex_value(out[n - 1])) {
            (Some(hi), Some(lo)) => {
                out.truncate(n - 3);
                byte = hi << 4 | lo;
            }
            _ => return,
        }
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
