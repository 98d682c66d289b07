//! Sprite loading
//!
//! Loading is best effort: a ship asks once when it is built and keeps the
//! texture if it got one. Hosts decide where textures come from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a texture is unavailable
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no texture source configured")]
    Unavailable,
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a PNG image")]
    NotPng(String),
    #[error("{0} has not finished loading")]
    Pending(String),
}

/// Handle to a host-owned image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    /// Host-specific identifier
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Something that can hand out textures by path
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> Result<Texture, LoadError>;
}

/// Loader for hosts that never draw sprites
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextures;

impl TextureLoader for NoTextures {
    fn load(&mut self, _path: &str) -> Result<Texture, LoadError> {
        Err(LoadError::Unavailable)
    }
}

/// Native loader that reads the PNG header for the image size.
///
/// Every distinct path gets its own id, in load order starting at 1.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct PngProbe {
    loaded: Vec<(String, Texture)>,
}

#[cfg(not(target_arch = "wasm32"))]
impl PngProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TextureLoader for PngProbe {
    fn load(&mut self, path: &str) -> Result<Texture, LoadError> {
        if let Some((_, texture)) = self.loaded.iter().find(|(p, _)| p == path) {
            return Ok(*texture);
        }

        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_string(),
            source,
        })?;
        let (width, height) =
            png_dimensions(&bytes).ok_or_else(|| LoadError::NotPng(path.to_string()))?;

        let texture = Texture {
            id: self.loaded.len() as u32 + 1,
            width,
            height,
        };
        self.loaded.push((path.to_string(), texture));
        log::info!("Loaded sprite {} ({}x{})", path, width, height);
        Ok(texture)
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Width and height from a PNG's IHDR chunk
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    // signature, chunk length, "IHDR", width, height
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(png_dimensions(&png_header(99, 75)), Some((99, 75)));
        assert_eq!(png_dimensions(b"GIF89a not a png at all"), None);
        assert_eq!(png_dimensions(&png_header(0, 75)), None);
        assert_eq!(png_dimensions(&PNG_SIGNATURE), None);
    }

    #[test]
    fn test_no_textures_always_fails() {
        assert!(matches!(NoTextures.load("ship.png"), Err(LoadError::Unavailable)));
    }

    #[test]
    fn test_probe_missing_file() {
        let mut probe = PngProbe::new();
        let err = probe.load("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_probe_reads_and_caches() {
        let path = std::env::temp_dir().join(format!("shipgrid-probe-{}.png", std::process::id()));
        std::fs::write(&path, png_header(30, 100)).unwrap();
        let path = path.to_string_lossy().into_owned();

        let mut probe = PngProbe::new();
        let first = probe.load(&path).unwrap();
        let second = probe.load(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!((first.width, first.height), (30, 100));
        assert_eq!(first.id, 1);

        let _ = std::fs::remove_file(&path);
    }
}
