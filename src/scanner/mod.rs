use crate::error::{StudioError, Result};
use photo_studio_common::upload::mime_from_name;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

/// フォルダ直下の画像ファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(StudioError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(mime) = mime_from_name(&file_name) {
            images.push(ImageInfo {
                path: path.to_path_buf(),
                file_name,
                mime,
            });
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(StudioError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let temp_dir = tempfile::tempdir().unwrap();

        // Create dummy image files
        File::create(temp_dir.path().join("test1.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("test2.JPG")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("test3.webp")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(temp_dir.path().join("nested.png")).unwrap();

        let result = scan_folder(temp_dir.path()).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].file_name, "test1.jpg");
        assert_eq!(result[1].file_name, "test2.JPG");
        assert_eq!(result[1].mime, "image/jpeg");
        assert_eq!(result[2].mime, "image/webp");
    }

    #[test]
    fn test_images_sorted_by_filename() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("c.jpg")).unwrap();
        File::create(temp_dir.path().join("a.png")).unwrap();
        File::create(temp_dir.path().join("b.gif")).unwrap();

        let result = scan_folder(temp_dir.path()).unwrap();
        let names: Vec<_> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.gif", "c.jpg"]);
    }
}
