use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Fixed target for imported entries: `<home>/.anima/entries`.
///
/// This is the same store the Anima journal reads, so imported days sit
/// next to hand-written ones.
pub fn entries_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().context("could not determine the user home directory")?;
    Ok(base.home_dir().join(".anima").join("entries"))
}

/// Document path for one date: `<dir>/<date>.md`.
pub fn entry_file(dir: &Path, date: &str) -> PathBuf {
    dir.join(format!("{date}.md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_file_appends_date_and_extension() {
        let p = entry_file(Path::new("/tmp/entries"), "2024-01-01");
        assert_eq!(p, PathBuf::from("/tmp/entries/2024-01-01.md"));
    }

    #[test]
    fn entries_dir_is_home_relative() {
        if let Some(b) = BaseDirs::new() {
            let expected = b.home_dir().join(".anima").join("entries");
            assert_eq!(entries_dir().unwrap(), expected);
        }
    }
}
