//! Iconset generation and ICNS compilation.
//!
//! Variants are produced with `sips` from a single 1024x1024 source image and
//! compiled with `iconutil`. The largest variant (`512x512@2x`) is the source
//! itself, copied rather than resized.

use crate::bundler::{
    error::{Context, Error, Result},
    settings::Settings,
    utils::{
        fs,
        process::{ToolCommand, ToolRunner},
    },
};
use std::path::Path;

/// Point sizes every iconset must contain, each at 1x and 2x.
pub const ICON_BASE_SIZES: [u32; 5] = [16, 32, 128, 256, 512];

/// Edge length the source image must have.
pub const SOURCE_ICON_SIZE: u32 = 1024;

/// How a variant file is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSource {
    /// Resized from the source image with `sips`.
    Resize,
    /// The source image copied unchanged.
    Copy,
}

/// One file in the iconset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconVariant {
    /// File name inside the iconset, e.g. `icon_32x32@2x.png`.
    pub file_name: String,
    /// Pixel edge length of the image.
    pub pixels: u32,
    /// How the file is produced.
    pub source: VariantSource,
}

/// All ten iconset variants in generation order.
pub fn iconset_variants() -> Vec<IconVariant> {
    let mut variants = Vec::with_capacity(ICON_BASE_SIZES.len() * 2);
    for size in ICON_BASE_SIZES {
        variants.push(IconVariant {
            file_name: format!("icon_{size}x{size}.png"),
            pixels: size,
            source: VariantSource::Resize,
        });
        let largest = size == ICON_BASE_SIZES[ICON_BASE_SIZES.len() - 1];
        variants.push(IconVariant {
            file_name: format!("icon_{size}x{size}@2x.png"),
            pixels: size * 2,
            source: if largest {
                VariantSource::Copy
            } else {
                VariantSource::Resize
            },
        });
    }
    variants
}

/// Verifies the source icon can stand in for `512x512@2x` unchanged.
pub fn check_source_icon(path: &Path) -> Result<()> {
    let (width, height) = image::image_dimensions(path)
        .map_err(Error::from)
        .with_context(|| format!("reading dimensions of {}", path.display()))?;

    if width != SOURCE_ICON_SIZE || height != SOURCE_ICON_SIZE {
        return Err(Error::IconDimensions {
            path: path.to_path_buf(),
            width,
            height,
            expected: SOURCE_ICON_SIZE,
        });
    }
    Ok(())
}

/// Fills the iconset directory with every variant.
pub async fn generate_iconset<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    let source = settings.source_icon();
    check_source_icon(&source)?;

    let iconset = settings.iconset_dir();
    fs::create_dir_all(&iconset, false).await?;

    for variant in iconset_variants() {
        let out = iconset.join(&variant.file_name);
        match variant.source {
            VariantSource::Resize => {
                let pixels = variant.pixels.to_string();
                let cmd = ToolCommand::new("sips")
                    .args(["-z", pixels.as_str(), pixels.as_str()])
                    .arg(&source)
                    .arg("--out")
                    .arg(&out);
                runner.run(&cmd).await?;
            }
            VariantSource::Copy => {
                fs::copy_file(&source, &out).await?;
            }
        }
        log::debug!("Wrote {}", out.display());
    }

    log::info!("Generated iconset at {}", iconset.display());
    Ok(())
}

/// Compiles the iconset into a single `.icns` resource.
pub async fn compile_icns<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    let icns = settings.icns_path();
    let cmd = ToolCommand::new("iconutil")
        .args(["-c", "icns"])
        .arg(settings.iconset_dir())
        .arg("-o")
        .arg(&icns);
    runner.run(&cmd).await?;

    log::info!("Created ICNS file: {}", icns.display());
    Ok(())
}

/// Removes the iconset directory and the intermediate `.icns`.
pub async fn remove_intermediates(settings: &Settings) -> Result<()> {
    fs::remove_dir_all(&settings.iconset_dir()).await?;
    fs::remove_file(&settings.icns_path()).await?;
    Ok(())
}
