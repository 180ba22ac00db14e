//! Image output.
//!
//! Converts the linear float buffer to gamma-corrected 8-bit color and
//! writes it either as a plain-text PPM (`P3`) stream or as a PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use strahl_math::Interval;

use crate::{Color, ImageBuffer, RenderError, RenderResult};

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let channel = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Write the image as a `P3` stream: header, then one `R G B` line per
/// pixel, row-major from the top-left.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

/// Convert to an 8-bit RGB image.
pub fn to_rgb_image(image: &ImageBuffer) -> RgbImage {
    RgbImage::from_fn(image.width, image.height, |x, y| {
        Rgb(color_to_rgb(image.get(x, y)))
    })
}

/// Output formats, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ppm,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "ppm" => Ok(OutputFormat::Ppm),
            "png" => Ok(OutputFormat::Png),
            _ => Err(RenderError::UnsupportedFormat(format!(
                "'{}' (expected .ppm or .png)",
                path.display()
            ))),
        }
    }
}

/// Save the image, picking the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();

    match OutputFormat::from_path(path)? {
        OutputFormat::Ppm => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(image, &mut writer)?;
        }
        OutputFormat::Png => {
            to_rgb_image(image).save_with_format(path, ImageFormat::Png)?;
        }
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        // Over-exposed and negative values are clamped
        assert_eq!(color_to_rgb(Color::new(4.0, -1.0, f32::NAN)), [255, 0, 0]);
        // 0.25 linear -> 0.5 gamma -> 128
        assert_eq!(color_to_rgb(Color::splat(0.25)), [128, 128, 128]);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(1, 0, Color::ONE);
        image.set(0, 1, Color::new(0.25, 0.0, 1.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "P3\n2 2\n255\n0 0 0\n255 255 255\n128 0 255\n0 0 0\n"
        );
    }

    #[test]
    fn test_rgb_image_layout() {
        let mut image = ImageBuffer::new(3, 1);
        image.set(2, 0, Color::ONE);

        let rgb = to_rgb_image(&image);
        assert_eq!(rgb.dimensions(), (3, 1));
        assert_eq!(rgb.get_pixel(2, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.ppm")).unwrap(), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path(Path::new("OUT.PNG")).unwrap(), OutputFormat::Png);
        assert!(matches!(
            OutputFormat::from_path(Path::new("out.exr")),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_save_and_reload_ppm() {
        let path = std::env::temp_dir().join(format!("strahl-output-{}.ppm", std::process::id()));
        let image = ImageBuffer::new(4, 3);

        save_image(&image, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.starts_with("P3\n4 3\n255\n"));
        assert_eq!(text.lines().count(), 3 + 12);
    }
}
