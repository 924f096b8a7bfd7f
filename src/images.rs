use image::imageops::FilterType;
use image::GenericImageView;
use std::error::Error;
use std::io::Cursor;
use std::path::{Component, Path};

/// Load an asset from the images directory and resize it to `width`
/// pixels, preserving the aspect ratio, re-encoded as PNG.
///
/// Any failure (missing file, decode error, hostile path) is reported to
/// the caller, which degrades to a textual placeholder; the render never
/// aborts over an image.
///
/// # Arguments
/// * `images_dir` - Directory the datasheet's image file names resolve in
/// * `file` - File name as recorded in the logo/photo column
/// * `width` - Target width in pixels
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - PNG bytes or an error
pub fn load_resized(images_dir: &Path, file: &str, width: u32) -> Result<Vec<u8>, Box<dyn Error>> {
    let file = file.trim();
    if file.is_empty() {
        return Err("empty image file name".into());
    }
    // File names come from the spreadsheet but are echoed through a query
    // parameter; only plain names below the images directory are served.
    let relative = Path::new(file);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(format!("refusing image path {:?}", file).into());
    }

    let img = image::open(images_dir.join(relative))?;
    let (w, h) = img.dimensions();
    let height = ((h as f64) * (width as f64) / (w as f64)).round().max(1.0) as u32;
    let resized = img.resize_exact(width, height, FilterType::Triangle);

    let mut buffer = Vec::new();
    resized.write_to(&mut Cursor::new(&mut buffer), image::ImageOutputFormat::Png)?;
    Ok(buffer)
}
