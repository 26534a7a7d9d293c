use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use log::warn;

use crate::error::{Error, Result};

const EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Lowercased extension, empty when there is none.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_image(path: &Path) -> bool {
    EXTENSIONS.contains(&extension(path).as_str())
}

/// Image files of `dir`, sorted by file name.
pub fn load_sorted_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let io = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(Error::NoImages(dir.to_path_buf()))
    } else {
        Ok(paths)
    }
}

/// EXIF orientations that only need a rotation. Mirrored ones are drawn as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,     // 1
    HalfTurn,   // 3
    QuarterCw,  // 6
    QuarterCcw, // 8
}

impl Orientation {
    pub fn from_exif(value: u16) -> Self {
        match value {
            3 => Orientation::HalfTurn,
            6 => Orientation::QuarterCw,
            8 => Orientation::QuarterCcw,
            _ => Orientation::Normal,
        }
    }
}

/// Reads the orientation tag of a JPEG. Anything else, or a JPEG without
/// usable EXIF data, is `Normal`.
pub fn read_orientation(bytes: &[u8], path: &Path) -> Orientation {
    let ext = extension(path);
    if ext != "jpg" && ext != "jpeg" {
        return Orientation::Normal;
    }

    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            warn!("could not read EXIF data for {}: {}", path.display(), e);
            return Orientation::Normal;
        }
    };

    match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
        Some(Value::Short(values)) if !values.is_empty() => Orientation::from_exif(values[0]),
        _ => Orientation::Normal,
    }
}

/// Source crop `(x, y, width, height)` that fills a frame of `aspect`
/// (width / height) without distortion, cutting the overflow evenly.
pub fn cover_crop(width: f32, height: f32, aspect: f32) -> (f32, f32, f32, f32) {
    if width <= 0.0 || height <= 0.0 || aspect <= 0.0 {
        return (0.0, 0.0, width, height);
    }
    if width / height > aspect {
        let w = height * aspect;
        ((width - w) / 2.0, 0.0, w, height)
    } else {
        let h = width / aspect;
        (0.0, (height - h) / 2.0, width, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_crop_trims_the_long_side() {
        // Landscape into a 3:4 portrait frame: sides are cut.
        assert_eq!(cover_crop(800.0, 600.0, 0.75), (175.0, 0.0, 450.0, 600.0));
        // Tall strip into the same frame: top and bottom are cut.
        assert_eq!(cover_crop(300.0, 800.0, 0.75), (0.0, 200.0, 300.0, 400.0));
        assert_eq!(cover_crop(300.0, 400.0, 0.75), (0.0, 0.0, 300.0, 400.0));
    }

    #[test]
    fn recognises_image_extensions() {
        assert!(is_image(Path::new("me.JPG")));
        assert!(is_image(Path::new("dir/me2.jpeg")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn orientation_values() {
        assert_eq!(Orientation::from_exif(1), Orientation::Normal);
        assert_eq!(Orientation::from_exif(3), Orientation::HalfTurn);
        assert_eq!(Orientation::from_exif(6), Orientation::QuarterCw);
        assert_eq!(Orientation::from_exif(8), Orientation::QuarterCcw);
        assert_eq!(Orientation::from_exif(2), Orientation::Normal);
    }

    #[test]
    fn non_jpeg_skips_exif() {
        assert_eq!(read_orientation(b"not a png", Path::new("a.png")), Orientation::Normal);
    }

    #[test]
    fn broken_jpeg_falls_back_to_normal() {
        assert_eq!(read_orientation(b"garbage", Path::new("a.jpg")), Orientation::Normal);
    }

    #[test]
    fn lists_and_sorts_images() {
        let dir = std::env::temp_dir().join(format!("photodeck-images-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["me3.jpg", "me.jpg", "notes.txt", "me2.png"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        let names: Vec<_> = load_sorted_image_paths(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(names, vec!["me.jpg", "me2.png", "me3.jpg"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = std::env::temp_dir().join(format!("photodeck-empty-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let result = load_sorted_image_paths(&dir);
        fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(result, Err(Error::NoImages(_))));
    }
}
