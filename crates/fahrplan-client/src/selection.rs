//! Reading the selected-events file.

use std::io::ErrorKind;
use std::path::Path;

use fahrplan_core::Selection;
use tracing::debug;

use crate::error::ClientResult;

/// Parses one id per line, ignoring blank lines.
pub fn parse_selection(content: &str) -> Selection {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Loads the selection file. A missing file is an empty selection.
pub fn load_selection(path: &Path) -> ClientResult<Selection> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let selection = parse_selection(&content);
            debug!(path = %path.display(), count = selection.len(), "loaded selection");
            Ok(selection)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no selection file");
            Ok(Selection::new())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn ids_per_line() {
        let selection = parse_selection("8425\n\n  8167 \n8425\n");
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("8425"));
        assert!(selection.contains("8167"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let selection = load_selection(&dir.path().join("selected.lst")).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "8425").unwrap();
        writeln!(file, "8167").unwrap();

        let selection = load_selection(file.path()).unwrap();
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_selection(dir.path()).is_err());
    }
}
