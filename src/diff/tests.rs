//! Tests for diff parsing.

use super::helpers::{new_file_path, old_line_count, parse_hunk_header};
use super::{ChangedLineRange, parse_changed_lines, repository_diff};
use crate::error::LintDiffError;
use crate::test_support::{commit_file, create_test_repo, git};

fn range(start: usize, end: usize) -> ChangedLineRange {
    ChangedLineRange::new(start, end).unwrap()
}

/// Test a typical git diff with one modified file.
#[test]
fn test_parse_simple_hunk() {
    let diff = r#"diff --git a/src/x.py b/src/x.py
index abc1234..def5678 100644
--- a/src/x.py
+++ b/src/x.py
@@ -a,b +10,3 @@ def existing():
+    x = 42
+    y = 43
+    z = 44
"#;

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes.get("src/x.py"), Some(&[range(10, 13)][..]));
}

#[test]
fn test_count_defaults_to_one() {
    let diff = "+++ b/src/x.py\n@@ -a,b +5 @@\n+changed\n";
    let changes = parse_changed_lines(diff, 1);
    assert_eq!(changes.get("src/x.py"), Some(&[range(5, 6)][..]));
}

/// Pure deletions leave nothing to check in the new file.
#[test]
fn test_pure_deletion_records_nothing() {
    let diff = r#"--- a/src/lib.rs
+++ b/src/lib.rs
@@ -5,2 +7,0 @@ fn main() {
-    let x = 1;
-    let y = 2;
"#;

    let changes = parse_changed_lines(diff, 1);

    assert!(changes.is_empty());
    assert_eq!(changes.get("src/lib.rs"), None);
}

#[test]
fn test_hunks_attributed_to_latest_file_header() {
    let diff = r#"diff --git a/one.py b/one.py
--- a/one.py
+++ b/one.py
@@ -1 +1 @@
-old
+new
@@ -10,0 +11,2 @@
+a
+b
diff --git a/two.py b/two.py
--- a/two.py
+++ b/two.py
@@ -3,2 +3,4 @@
-x
-y
+1
+2
+3
+4
"#;

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.len(), 2);
    assert_eq!(
        changes.get("one.py"),
        Some(&[range(1, 2), range(11, 13)][..])
    );
    assert_eq!(changes.get("two.py"), Some(&[range(3, 7)][..]));
}

#[test]
fn test_headers_without_bodies() {
    let diff = "+++ b/a.py\n@@ -1 +1,2 @@\n+++ b/b.py\n@@ -4 +4 @@\n@@ -9 +10,3 @@\n";

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.get("a.py"), Some(&[range(1, 3)][..]));
    assert_eq!(changes.get("b.py"), Some(&[range(4, 5), range(10, 13)][..]));
}

/// An added line whose content starts with `++ ` shows up as `+++ ...`.
#[test]
fn test_added_line_resembling_file_header() {
    let diff = "+++ b/a.py\n@@ -1 +1,2 @@\n+++ x\n+y\n@@ -9 +10 @@\n";

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes.get("a.py"), Some(&[range(1, 3), range(10, 11)][..]));
}

#[test]
fn test_header_pair_ends_hunk_body() {
    let diff = "+++ b/a.py\n@@ -1 +1 @@\n--- a/b.py\n+++ b/b.py\n@@ -4 +4 @@\n";

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.get("a.py"), Some(&[range(1, 2)][..]));
    assert_eq!(changes.get("b.py"), Some(&[range(4, 5)][..]));
}

#[test]
fn test_full_hunk_bodies_are_skipped() {
    let diff = r#"diff --git a/notes.txt b/notes.txt
--- a/notes.txt
+++ b/notes.txt
@@ -2,2 +2,3 @@
--- removed rule
-old
+++ added rule
+new
+@@ -1 +99 @@
\ No newline at end of file
diff --git a/other.txt b/other.txt
--- a/other.txt
+++ b/other.txt
@@ -5,0 +6 @@
+tail
"#;

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.len(), 2);
    assert_eq!(changes.get("notes.txt"), Some(&[range(2, 5)][..]));
    assert_eq!(changes.get("other.txt"), Some(&[range(6, 7)][..]));
}

#[test]
fn test_quoted_header_is_decoded() {
    let diff = "+++ \"b/src/caf\\303\\251.py\"\n@@ -1 +1 @@\n";

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.get("src/café.py"), Some(&[range(1, 2)][..]));
}

#[test]
fn test_strip_one_segment() {
    let diff = "+++ b/a/b/file.py\n@@ -1,2 +3,4 @@\n";
    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes.get("a/b/file.py"), Some(&[range(3, 7)][..]));
}

#[test]
fn test_strip_zero_keeps_diff_prefix() {
    let diff = "+++ b/src/x.py\n@@ -1 +1 @@\n";
    let changes = parse_changed_lines(diff, 0);
    assert_eq!(changes.get("b/src/x.py"), Some(&[range(1, 2)][..]));
}

#[test]
fn test_strip_more_segments_than_present_excludes_file() {
    let diff = "+++ b/x.py\n@@ -1 +1,2 @@\n";
    let changes = parse_changed_lines(diff, 3);
    assert!(changes.is_empty());
}

/// A header that cannot be resolved must not leak hunks into the previous file.
#[test]
fn test_unresolvable_header_unsets_current_file() {
    let diff = "+++ b/deep/dir/a.py\n@@ -1 +1 @@\n--- a/x.py\n+++ b/x.py\n@@ -5 +5,2 @@\n";

    let changes = parse_changed_lines(diff, 2);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes.get("dir/a.py"), Some(&[range(1, 2)][..]));
}

#[test]
fn test_deleted_file_records_nothing() {
    let diff = r#"diff --git a/gone.py b/gone.py
deleted file mode 100644
index abc1234..0000000
--- a/gone.py
+++ /dev/null
@@ -1,3 +0,0 @@
-a
-b
-c
"#;

    assert!(parse_changed_lines(diff, 0).is_empty());
    assert!(parse_changed_lines(diff, 1).is_empty());
}

#[test]
fn test_new_file() {
    let diff = r#"diff --git a/src/new.py b/src/new.py
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/src/new.py
@@ -0,0 +1,3 @@
+import os
+
+print(os.name)
"#;

    let changes = parse_changed_lines(diff, 1);
    assert_eq!(changes.get("src/new.py"), Some(&[range(1, 4)][..]));
}

#[test]
fn test_hunk_before_any_file_header_is_ignored() {
    let diff = "@@ -1 +1,5 @@\n+++ b/a.py\n@@ -2 +2 @@\n";

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes.get("a.py"), Some(&[range(2, 3)][..]));
}

#[test]
fn test_no_file_headers_yields_empty_mapping() {
    assert!(parse_changed_lines("", 0).is_empty());
    assert!(parse_changed_lines("just some text\nnothing to see\n", 0).is_empty());
}

#[test]
fn test_overlapping_hunks_are_kept_in_order() {
    let diff = "+++ b/a.py\n@@ -1 +5,3 @@\n@@ -1 +2,5 @@\n@@ -1 +5,3 @@\n";

    let changes = parse_changed_lines(diff, 1);

    assert_eq!(
        changes.get("a.py"),
        Some(&[range(5, 8), range(2, 7), range(5, 8)][..])
    );
}

#[test]
fn test_parsing_is_deterministic() {
    let diff = "+++ b/z.py\n@@ -1 +1 @@\n--- a/a.py\n+++ b/a.py\n@@ -3 +3,2 @@\n\
                --- a/m.cpp\n+++ b/m.cpp\n@@ -7 +8 @@\n";

    let first = parse_changed_lines(diff, 1);
    let second = parse_changed_lines(diff, 1);

    assert_eq!(first, second);
    let paths: Vec<&str> = first.iter().map(|(path, _)| path).collect();
    assert_eq!(paths, vec!["a.py", "m.cpp", "z.py"]);
}

#[test]
fn test_crlf_diff() {
    let diff = "+++ b/win.py\r\n@@ -1 +2,2 @@\r\n";
    let changes = parse_changed_lines(diff, 1);
    assert_eq!(changes.get("win.py"), Some(&[range(2, 4)][..]));
}

#[test]
fn test_change_set_serializes_as_path_map() {
    let changes = parse_changed_lines("+++ b/a.py\n@@ -1 +3,2 @@\n", 1);
    let json = serde_json::to_value(&changes).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "a.py": [{ "start": 3, "end": 5 }] })
    );
}

// =========================================================================
// Helpers
// =========================================================================

#[test]
fn test_parse_hunk_header_formats() {
    assert_eq!(parse_hunk_header("@@ -1,2 +3,4 @@"), Some((3, 4)));
    assert_eq!(parse_hunk_header("@@ -1 +3 @@ fn main() {"), Some((3, 1)));
    assert_eq!(parse_hunk_header("@@ -7,2 +7,0 @@"), Some((7, 0)));
    assert_eq!(parse_hunk_header("@@ -a,b +10,3 @@"), Some((10, 3)));
    assert_eq!(parse_hunk_header("@@@ -1 -1 +1,2 @@@"), Some((1, 2)));
}

#[test]
fn test_parse_hunk_header_rejects_other_lines() {
    assert_eq!(parse_hunk_header("+@@ -1 +1 @@"), None);
    assert_eq!(parse_hunk_header("@@ no numbers here @@"), None);
    assert_eq!(parse_hunk_header("@@ -1 + @@"), None);
    assert_eq!(parse_hunk_header(""), None);
}

#[test]
fn test_parse_hunk_header_skips_plus_without_digits() {
    assert_eq!(parse_hunk_header("@@ +x +12,2 @@"), Some((12, 2)));
}

#[test]
fn test_parse_hunk_header_comma_without_count() {
    assert_eq!(parse_hunk_header("@@ -1 +4, @@"), Some((4, 1)));
}

#[test]
fn test_parse_hunk_header_overflow_is_not_a_hunk() {
    assert_eq!(
        parse_hunk_header("@@ -1 +99999999999999999999999999 @@"),
        None
    );
}

#[test]
fn test_new_file_path() {
    assert_eq!(new_file_path("b/src/x.py", 1), Some("src/x.py".to_string()));
    assert_eq!(new_file_path("b/src/x.py", 2), Some("x.py".to_string()));
    assert_eq!(new_file_path("b/src/x.py", 3), None);
    assert_eq!(new_file_path("b/", 1), None);
    assert_eq!(new_file_path("b//x.py", 1), Some("x.py".to_string()));
    assert_eq!(new_file_path("/dev/null", 0), None);
    assert_eq!(
        new_file_path("b/my file.py\t", 1),
        Some("my file.py".to_string())
    );
}

#[test]
fn test_new_file_path_quoted() {
    assert_eq!(
        new_file_path(r#""b/caf\303\251.py""#, 1),
        Some("café.py".to_string())
    );
    assert_eq!(
        new_file_path(r#""b/tab\there \"q\".py""#, 1),
        Some("tab\there \"q\".py".to_string())
    );
    assert_eq!(
        new_file_path(r#""b/back\\slash.py""#, 1),
        Some("back\\slash.py".to_string())
    );
    assert_eq!(new_file_path(r#""b/unterminated.py"#, 1), None);
}

#[test]
fn test_old_line_count() {
    assert_eq!(old_line_count("@@ -1,2 +3,4 @@"), 2);
    assert_eq!(old_line_count("@@ -7 +7,0 @@"), 1);
    assert_eq!(old_line_count("@@ -0,0 +1,3 @@"), 0);
    assert_eq!(old_line_count("@@ -a,b +10,3 @@"), 0);
    assert_eq!(old_line_count("not a hunk"), 0);
}

#[test]
fn test_changed_line_range_bounds() {
    let r = ChangedLineRange::from_hunk(10, 3).unwrap();
    assert_eq!(r.start(), 10);
    assert_eq!(r.end(), 13);
    assert_eq!(r.last(), 12);
    assert_eq!(r.to_string(), "[10, 13)");

    assert_eq!(ChangedLineRange::from_hunk(7, 0), None);
    assert_eq!(ChangedLineRange::new(5, 5), None);
    assert_eq!(ChangedLineRange::from_hunk(usize::MAX, 1), None);
}

// =========================================================================
// Repository diff provider
// =========================================================================

#[test]
fn test_repository_diff_covers_branch_and_working_tree() {
    let temp_dir = create_test_repo();
    let path = temp_dir.path();
    let lines: Vec<String> = (1..=10).map(|i| format!("line{}", i)).collect();
    commit_file(path, "src/app.py", &(lines.join("\n") + "\n"), "Add app");

    git(path, &["checkout", "-b", "feature"]);
    let mut changed = lines.clone();
    changed[2] = "changed3".to_string();
    commit_file(path, "src/app.py", &(changed.join("\n") + "\n"), "Edit line 3");

    changed.push("line11".to_string());
    changed.push("line12".to_string());
    std::fs::write(path.join("src/app.py"), changed.join("\n") + "\n").unwrap();

    let diff = repository_diff(path.join("src"), "main").unwrap();
    let changes = parse_changed_lines(&diff.text, 1);

    assert_eq!(
        diff.root.canonicalize().unwrap(),
        path.canonicalize().unwrap()
    );
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes.get("src/app.py"),
        Some(&[range(3, 4), range(11, 13)][..])
    );
}

#[test]
fn test_repository_diff_non_ascii_path() {
    let temp_dir = create_test_repo();
    let path = temp_dir.path();
    commit_file(path, "src/café.py", "a = 1\nb = 2\n", "Add café");
    std::fs::write(path.join("src/café.py"), "a = 1\nb = 3\n").unwrap();

    let diff = repository_diff(path, "main").unwrap();
    let changes = parse_changed_lines(&diff.text, 1);

    let paths: Vec<&str> = changes.iter().map(|(path, _)| path).collect();
    assert_eq!(paths, vec!["src/café.py"]);
    assert_eq!(changes.get("src/café.py"), Some(&[range(2, 3)][..]));
}

#[test]
fn test_repository_diff_ignores_changes_already_on_reference() {
    let temp_dir = create_test_repo();
    let path = temp_dir.path();

    git(path, &["checkout", "-b", "feature"]);
    git(path, &["checkout", "main"]);
    commit_file(path, "main_only.py", "x = 1\n", "Main-only change");
    git(path, &["checkout", "feature"]);

    let diff = repository_diff(path, "main").unwrap();
    assert!(parse_changed_lines(&diff.text, 1).is_empty());
}

#[test]
fn test_repository_diff_unknown_reference() {
    let temp_dir = create_test_repo();
    let err = repository_diff(temp_dir.path(), "does-not-exist").unwrap_err();
    assert!(matches!(err, LintDiffError::ReferenceResolution { .. }));
}

#[test]
fn test_repository_diff_outside_repository() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let err = repository_diff(temp_dir.path(), "main").unwrap_err();
    assert!(matches!(err, LintDiffError::RepositoryNotFound(_)));
}
