//! Core diff parsing logic.

use super::api::{ChangedLineRange, FileChangeSet};
use super::helpers::{new_file_path, old_line_count, parse_hunk_header};
use tracing::trace;

/// Parse changed line ranges from raw diff output.
///
/// # Arguments
///
/// * `diff_output` - Raw unified diff output, ideally produced with `-U0`
/// * `strip_count` - Leading path segments to drop from each `+++` header
///
/// Hunk headers seen before any usable `+++` header are ignored, as are
/// pure-deletion hunks (`+N,0`). A `+++` header that resolves to no path
/// (deleted file, too few segments) stops attributing hunks to the previous
/// file.
///
/// When a hunk header is followed by its complete body, the body is skipped
/// so that an added line starting with `++ ` is not read as a file header.
/// A `+++ ` line right after a `--- ` line is always a file header.
pub fn parse_changed_lines(diff_output: &str, strip_count: usize) -> FileChangeSet {
    let lines: Vec<&str> = diff_output.lines().collect();
    let mut changes = FileChangeSet::default();
    let mut current_file: Option<String> = None;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        index += 1;

        if let Some(header) = line.strip_prefix("+++ ") {
            current_file = new_file_path(header, strip_count);
            continue;
        }

        let Some((start, count)) = parse_hunk_header(line) else {
            continue;
        };
        index += hunk_body_len(&lines[index..], old_line_count(line), count);

        let Some(file) = &current_file else {
            continue;
        };

        if let Some(range) = ChangedLineRange::from_hunk(start, count) {
            trace!(file = %file, %range, "hunk");
            changes.push(file, range);
        }
    }

    changes
}

/// Number of lines at the front of `lines` that make up a hunk body with
/// `old` removed and `new` added lines.
///
/// A `--- ` line directly followed by a `+++ ` line is always the next file's
/// header pair and ends the body. Returns 0 unless every announced added
/// line is present, so header-only input is still read line by line.
fn hunk_body_len(lines: &[&str], mut old: usize, mut new: usize) -> usize {
    let mut consumed = 0;

    for (i, line) in lines.iter().enumerate() {
        if old == 0 && new == 0 {
            break;
        }
        let next_is_header = lines.get(i + 1).is_some_and(|next| next.starts_with("+++ "));
        if line.starts_with("--- ") && next_is_header {
            break;
        }
        match line.as_bytes().first() {
            Some(b'+') if new > 0 => new -= 1,
            Some(b'-') if old > 0 => old -= 1,
            Some(b' ') if old > 0 && new > 0 => {
                old -= 1;
                new -= 1;
            }
            Some(b'\\') => {}
            _ => break,
        }
        consumed += 1;
    }

    if new == 0 { consumed } else { 0 }
}
