use std::path::{Path, PathBuf};

use pairaug_io::functional::has_image_extension;

use crate::error::DatasetError;

/// List the image files directly inside a directory, sorted by path.
///
/// Only files with a `.png`, `.jpg` or `.jpeg` extension are returned, in any letter case.
/// Subdirectories are not visited.
///
/// # Errors
///
/// Returns an error if `dir` is not a readable directory.
pub fn list_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, DatasetError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(DatasetError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_images_sorted() -> Result<(), DatasetError> {
        let tmp = tempfile::tempdir()?;
        for name in ["b.png", "a.JPG", "c.jpeg", "notes.txt", "d.gif"] {
            std::fs::write(tmp.path().join(name), b"")?;
        }
        std::fs::create_dir(tmp.path().join("nested.png"))?;

        let names = list_images(tmp.path())?
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect::<Vec<_>>();

        assert_eq!(names, ["a.JPG", "b.png", "c.jpeg"]);
        Ok(())
    }

    #[test]
    fn missing_dir_fails() {
        let result = list_images("/definitely/not/here");
        assert!(matches!(result, Err(DatasetError::NotADirectory(_))));
    }
}
