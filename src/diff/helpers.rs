//! Helper functions for diff parsing.

/// Resolve the text after `+++ ` to a repository path.
///
/// Git appends a tab after names containing spaces, so the path ends at the
/// first tab. `strip_count` leading segments are removed (each one ends at a
/// `/`), then any leftover leading slashes.
///
/// Names git still quotes (control characters, `"` or `\\`) are decoded
/// first.
///
/// Returns `None` for deleted files (`/dev/null`), for paths with fewer than
/// `strip_count` segments, and when nothing is left after stripping.
pub(super) fn new_file_path(header: &str, strip_count: usize) -> Option<String> {
    let decoded;
    let raw = if header.starts_with('"') {
        decoded = unquote_path(header)?;
        decoded.as_str()
    } else {
        let raw = header.split_once('\t').map_or(header, |(path, _)| path);
        raw.trim_end()
    };

    if raw == "/dev/null" {
        return None;
    }

    let path = strip_path_segments(raw, strip_count)?.trim_start_matches('/');
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Decode a C-style quoted name as git writes it, e.g. `"b/caf\303\251.py"`.
///
/// Octal escapes are raw bytes, so the result is rebuilt from bytes. Returns
/// `None` when the closing quote is missing.
fn unquote_path(quoted: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(quoted.len());
    let mut chars = quoted.strip_prefix('"')?.chars();

    loop {
        match chars.next()? {
            '"' => break,
            '\\' => {
                let escaped = chars.next()?;
                let byte = match escaped {
                    'a' => 0x07,
                    'b' => 0x08,
                    't' => b'\t',
                    'n' => b'\n',
                    'v' => 0x0b,
                    'f' => 0x0c,
                    'r' => b'\r',
                    '0'..='7' => {
                        let mut value = escaped.to_digit(8)?;
                        for _ in 0..2 {
                            value = value * 8 + chars.next()?.to_digit(8)?;
                        }
                        u8::try_from(value).ok()?
                    }
                    other => {
                        let mut buf = [0; 4];
                        bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
                        continue;
                    }
                };
                bytes.push(byte);
            }
            c => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Drop `count` leading `/`-terminated segments from `path`.
fn strip_path_segments(path: &str, count: usize) -> Option<&str> {
    let mut rest = path;
    for _ in 0..count {
        let (_, tail) = rest.split_once('/')?;
        rest = tail;
    }
    Some(rest)
}

/// Parse the new-file side of a hunk header.
///
/// Format: "@@ -old_start,old_len +new_start,new_len @@ optional context".
/// The first `+<digits>` after the leading `@@` is the new start line, and an
/// optional `,<digits>` right after it is the line count (1 when omitted).
/// The old-file side is not inspected.
///
/// Returns `(new_start, new_count)` or `None` if the line is not a hunk header.
pub(super) fn parse_hunk_header(line: &str) -> Option<(usize, usize)> {
    let mut search = line.strip_prefix("@@")?;

    while let Some(plus) = search.find('+') {
        let after = &search[plus + 1..];
        let (start, after_start) = split_leading_digits(after);
        if start.is_empty() {
            search = after;
            continue;
        }

        let start: usize = start.parse().ok()?;
        let count = match after_start.strip_prefix(',') {
            Some(tail) => match split_leading_digits(tail) {
                ("", _) => 1,
                (count, _) => count.parse().ok()?,
            },
            None => 1,
        };
        return Some((start, count));
    }

    None
}

/// Number of old-file lines a hunk header announces (`-<start>[,<count>]`).
///
/// Headers whose old side does not parse count as zero old lines.
pub(super) fn old_line_count(line: &str) -> usize {
    let Some(old) = line
        .strip_prefix("@@")
        .and_then(|rest| rest.trim_start().strip_prefix('-'))
    else {
        return 0;
    };

    let (start, rest) = split_leading_digits(old);
    if start.is_empty() {
        return 0;
    }
    match rest.strip_prefix(',') {
        Some(tail) => split_leading_digits(tail).0.parse().unwrap_or(0),
        None => 1,
    }
}

fn split_leading_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}
