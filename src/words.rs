//! Dictionary word lists.

use std::{fs, path::Path};

use tracing::info;

use crate::{Error, Result};

/// The dictionary shipped with most Unix systems.
pub const DEFAULT_DICTIONARY: &str = "/usr/share/dict/words";

/// Read the dictionary file at `path`, one word per line.
///
/// Line terminators are removed and blank lines skipped, so the returned words
/// can be used both to build a filter and as ground truth when measuring it.
pub fn read_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| Error::WordSourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let words: Vec<String> = data
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect();

    info!(path = %path.display(), words = words.len(), "read dictionary");

    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "apple\nBanana\r\n\ncafé\n").unwrap();

        let words = read_words(file.path()).unwrap();
        assert_eq!(words, vec!["apple", "Banana", "café"]);
    }

    #[test]
    fn test_read_words_missing() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            read_words(dir.path().join("words")),
            Err(Error::WordSourceUnreadable { .. })
        ));
    }
}
