//! Input loading
//!
//! Reads the batch input file: one item per line, whitespace trimmed, empty
//! lines and `#` comments skipped. Invalid UTF-8 is replaced rather than
//! rejected so a stray byte cannot fail a whole batch file.

use crate::error::Result;
use std::path::Path;

/// Load inputs from a file, one per line
///
/// Returns lines in file order. The result may be empty; the executor is
/// responsible for rejecting empty batches before dispatch.
pub async fn load_inputs(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes);

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    async fn write_input(contents: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.txt");
        tokio::fs::write(&path, contents).await.unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn loads_lines_in_order() {
        let (_dir, path) = write_input(b"alpha\nbeta\ngamma\n").await;
        let inputs = load_inputs(&path).await.unwrap();
        assert_eq!(inputs, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn skips_blank_lines_and_comments() {
        let (_dir, path) = write_input(b"# header comment\n\nalpha\n   \n# another\nbeta\n").await;
        let inputs = load_inputs(&path).await.unwrap();
        assert_eq!(inputs, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn trims_surrounding_whitespace() {
        let (_dir, path) = write_input(b"  alpha  \n\tbeta\t\n").await;
        let inputs = load_inputs(&path).await.unwrap();
        assert_eq!(inputs, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn keeps_duplicate_lines_distinct() {
        let (_dir, path) = write_input(b"same\nsame\nother\nsame\n").await;
        let inputs = load_inputs(&path).await.unwrap();
        assert_eq!(inputs, vec!["same", "same", "other", "same"]);
    }

    #[tokio::test]
    async fn replaces_invalid_utf8() {
        let (_dir, path) = write_input(b"ok\n\xff\xfe broken\n").await;
        let inputs = load_inputs(&path).await.unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], "ok");
        assert!(inputs[1].contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let result = load_inputs("/nonexistent/inputs.txt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_file_yields_empty_vec() {
        let (_dir, path) = write_input(b"").await;
        let inputs = load_inputs(&path).await.unwrap();
        assert!(inputs.is_empty());
    }
}
