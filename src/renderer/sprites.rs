//! Directional agent sprites
//!
//! Eight PNGs, one per facing, decoded once at startup into a single RGBA
//! sheet (one layer per direction) ready for upload.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::sim::Direction;

/// Edge length of every sheet layer in texels
pub const SPRITE_TEXELS: u32 = 32;
/// One layer per facing direction
pub const SPRITE_LAYERS: u32 = Direction::ALL.len() as u32;

/// A required sprite could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("missing sprite {}", path.display())]
    Missing { path: PathBuf },
    #[error("cannot decode sprite {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// File holding the sprite for `direction`
pub fn sprite_path(dir: &Path, direction: Direction) -> PathBuf {
    dir.join(format!("pacman_{}.png", direction.as_str()))
}

/// Decode one sprite, resized to the sheet's layer size
pub fn load_sprite(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }

    let image = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    if image.dimensions() == (SPRITE_TEXELS, SPRITE_TEXELS) {
        Ok(image)
    } else {
        Ok(imageops::resize(&image, SPRITE_TEXELS, SPRITE_TEXELS, FilterType::Triangle))
    }
}

/// All eight facings, layer `Direction::layer()` holding that direction
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pixels: Vec<u8>,
}

impl SpriteSheet {
    /// Load every sprite from `dir`; the first missing or broken file fails
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let layer_bytes = (SPRITE_TEXELS * SPRITE_TEXELS * 4) as usize;
        let mut pixels = vec![0; layer_bytes * SPRITE_LAYERS as usize];

        for direction in Direction::ALL {
            let sprite = load_sprite(&sprite_path(dir, direction))?;
            let offset = direction.layer() as usize * layer_bytes;
            pixels[offset..offset + layer_bytes].copy_from_slice(sprite.as_raw());
        }

        log::info!("Loaded {} sprites from {}", SPRITE_LAYERS, dir.display());
        Ok(Self { pixels })
    }

    /// Tightly packed RGBA8 texels, layer after layer
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pacman-duel-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// RGBA of one texel in the packed sheet
    fn texel(sheet: &SpriteSheet, direction: Direction, x: u32, y: u32) -> [u8; 4] {
        let i = (((direction.layer() * SPRITE_TEXELS + y) * SPRITE_TEXELS + x) * 4) as usize;
        let p = sheet.pixels();
        [p[i], p[i + 1], p[i + 2], p[i + 3]]
    }

    /// Write all eight sprites, each filled with a color keyed by its layer
    fn write_sprites(dir: &Path, size: u32) {
        for direction in Direction::ALL {
            let shade = direction.layer() as u8 * 30;
            let image = RgbaImage::from_pixel(size, size, Rgba([shade, 0, 0, 255]));
            image.save(sprite_path(dir, direction)).unwrap();
        }
    }

    #[test]
    fn test_sprite_path_names() {
        let path = sprite_path(Path::new("resources"), Direction::DownLeft);
        assert_eq!(path, Path::new("resources").join("pacman_down_left.png"));
    }

    #[test]
    fn test_load_full_sheet() {
        let dir = scratch_dir("sheet");
        write_sprites(&dir, SPRITE_TEXELS);

        let sheet = SpriteSheet::load(&dir).unwrap();
        assert_eq!(
            sheet.pixels().len(),
            (SPRITE_TEXELS * SPRITE_TEXELS * 4 * SPRITE_LAYERS) as usize
        );
        assert_eq!(texel(&sheet, Direction::Up, 16, 16), [0, 0, 0, 255]);
        assert_eq!(texel(&sheet, Direction::DownRight, 0, 0), [210, 0, 0, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_odd_sized_sprite_is_resized() {
        let dir = scratch_dir("resize");
        let path = dir.join("odd.png");
        RgbaImage::from_pixel(30, 30, Rgba([255, 255, 0, 255]))
            .save(&path)
            .unwrap();

        let sprite = load_sprite(&path).unwrap();
        assert_eq!(sprite.dimensions(), (SPRITE_TEXELS, SPRITE_TEXELS));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_sprite_is_fatal() {
        let dir = scratch_dir("missing");
        write_sprites(&dir, SPRITE_TEXELS);
        let gone = sprite_path(&dir, Direction::UpRight);
        std::fs::remove_file(&gone).unwrap();

        match SpriteSheet::load(&dir) {
            Err(AssetError::Missing { path }) => assert_eq!(path, gone),
            other => panic!("expected missing sprite, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_sprite_is_fatal() {
        let dir = scratch_dir("corrupt");
        write_sprites(&dir, SPRITE_TEXELS);
        std::fs::write(sprite_path(&dir, Direction::Left), b"not a png").unwrap();

        assert!(matches!(
            SpriteSheet::load(&dir),
            Err(AssetError::Decode { .. })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
