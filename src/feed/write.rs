use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FeedError;

// Parent directories are not created; a missing one is a write failure.
pub fn write_feed(path: &Path, xml: &str) -> Result<PathBuf, FeedError> {
    fs::write(path, xml).map_err(|source| FeedError::OutputWrite { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reports_path() {
        let path = std::env::temp_dir().join(format!("feedgen-out-{}.xml", uuid::Uuid::new_v4()));
        let written = write_feed(&path, "<rss/>\n").unwrap();
        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<rss/>\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_parent_is_output_write_error() {
        let path = std::env::temp_dir()
            .join(format!("feedgen-nodir-{}", uuid::Uuid::new_v4()))
            .join("feed.xml");
        let err = write_feed(&path, "x").unwrap_err();
        assert!(matches!(err, FeedError::OutputWrite { .. }));
    }
}
