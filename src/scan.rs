use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// extensions that take part in an import; everything else is left in place
const MEDIA_EXTS: &[&str] = &["jpg", "jpeg", "png", "mp4", "mov"];

pub fn is_candidate(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => MEDIA_EXTS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// one-shot recursive listing of the media files under `dir`
pub fn scan_path(dir: &str) -> Vec<PathBuf>
{
    // a photo pile is not a source tree: gitignore rules and hidden-file
    // skipping would silently drop files
    let walk = WalkBuilder::new(dir).standard_filters(false).build();

    let mut files: Vec<PathBuf> = Vec::new();
    for res in walk {
        if let Ok(entry) = res {
            let is_file = entry.file_type().map_or(false, |ft| ft.is_file());
            if is_file && is_candidate(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn t_candidate_extensions() {
        assert!(is_candidate(Path::new("x/y/IMG_1.JpG")));
        assert!(is_candidate(Path::new("clip.MOV")));
        assert!(!is_candidate(Path::new("x/y/readme")));
        assert!(!is_candidate(Path::new("x/y/anim.gif")));
        assert!(!is_candidate(Path::new("notes.txt")));
    }

    #[test]
    fn t_scan_path_filters_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        for name in &["a.jpg", "b.JPEG", "c.png", "d.mp4", "notes.txt", "f.gif", "Thumbs.db"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("g.mov")).unwrap();

        let mut found: Vec<String> = scan_path(dir.path().to_str().unwrap())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        found.sort();
        assert_eq!(found, ["a.jpg", "b.JPEG", "c.png", "d.mp4", "g.mov"]);
    }
}
