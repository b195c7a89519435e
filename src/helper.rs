use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::ImageFormat;

use crate::error::Error;
use crate::render::Image;

/*---- Utilities ----*/

/// Directory used by [`save_png`] when none is given.
pub const DEFAULT_DIRECTORY: &str = "generated";

/// Encodes the QR code as PNG bytes.
///
/// # Example
///
/// ```rust
/// use wifiqr::config::Config;
/// use wifiqr::helper::to_png_bytes;
///
/// let img = wifiqr::new(&Config::new("Foo")).unwrap();
/// let png = to_png_bytes(&img).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn to_png_bytes(img: &Image) -> Result<Vec<u8>, Error> {
    let mut buf = Cursor::new(Vec::new());
    img.to_image().write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Writes the QR code as PNG to `w`, for example standard output.
pub fn write_png<W: Write>(img: &Image, mut w: W) -> Result<(), Error> {
    w.write_all(&to_png_bytes(img)?)?;
    w.flush()?;
    Ok(())
}

/// Saves the QR code as a PNG file and returns its path.
///
/// # Arguments
///
/// * `img` - The QR code to save.
/// * `directory_path` - Optional. The directory the file is written to, created if missing.
///   Defaults to [`DEFAULT_DIRECTORY`].
/// * `filename` - Optional. The file name without extension. Defaults to a timestamp.
pub fn save_png(
    img: &Image,
    directory_path: Option<&Path>,
    filename: Option<&str>,
) -> Result<PathBuf, Error> {
    let directory_path = directory_path.unwrap_or_else(|| Path::new(DEFAULT_DIRECTORY));
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            // A clock before the epoch only affects the generated name.
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("wifiqr-{}", since_the_epoch.as_millis())
        }
    };

    if !directory_path.exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = directory_path.join(format!("{filename}.png"));
    img.to_image().save_with_format(&file_path, ImageFormat::Png)?;
    tracing::debug!(path = %file_path.display(), "saved QR code image");

    Ok(file_path)
}

/// Writes the SVG rendering of the QR code to `path`.
pub fn save_svg(img: &Image, path: &Path) -> Result<(), Error> {
    fs::write(path, img.to_svg())?;
    tracing::debug!(path = %path.display(), "saved QR code SVG");
    Ok(())
}
