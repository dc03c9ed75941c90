use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{CoreError, Dimensions, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes a packed `0xAARRGGBB` sample. The alpha byte is ignored, so
    /// sign-extended negative values decode the same as their unsigned form.
    pub fn from_packed(value: i64) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(CoreError::InvalidColor(raw.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| CoreError::InvalidColor(raw.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Hex colours travel as `#rrggbb` strings wherever a colour is a user value
/// (layer payloads, recipes). Pixel samples keep the record form.
pub(crate) mod hex {
    use super::*;

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Rgb, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of a `linear` sample array as the remote service sends it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawSample {
    Packed(i64),
    Record(Rgb),
}

impl RawSample {
    pub fn to_rgb(self) -> Rgb {
        match self {
            Self::Packed(value) => Rgb::from_packed(value),
            Self::Record(rgb) => rgb,
        }
    }
}

/// Immutable grid of RGB samples, stored row-major as `[y, x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    samples: Array2<Rgb>,
}

impl PixelBuffer {
    pub fn new(dimensions: Dimensions, samples: Vec<Rgb>) -> Result<Self> {
        let actual = samples.len();
        let samples = Array2::from_shape_vec((dimensions.height, dimensions.width), samples)
            .map_err(|_| CoreError::SampleCountMismatch {
                width: dimensions.width,
                height: dimensions.height,
                expected: dimensions.sample_count(),
                actual,
            })?;
        Ok(Self { samples })
    }

    pub fn empty() -> Self {
        Self {
            samples: Array2::default((0, 0)),
        }
    }

    /// Normalizes mixed packed/record samples into the canonical form.
    pub fn from_raw(dimensions: Dimensions, raw: Vec<RawSample>) -> Result<Self> {
        Self::new(dimensions, raw.into_iter().map(RawSample::to_rgb).collect())
    }

    pub fn from_rgb_image(image: &image::RgbImage) -> Self {
        let dimensions = Dimensions::new(image.width() as usize, image.height() as usize);
        let samples = image
            .pixels()
            .map(|pixel| Rgb::new(pixel[0], pixel[1], pixel[2]))
            .collect::<Vec<_>>();
        let samples = Array2::from_shape_vec((dimensions.height, dimensions.width), samples)
            .unwrap_or_else(|_| Array2::default((0, 0)));
        Self { samples }
    }

    pub fn dimensions(&self) -> Dimensions {
        let (height, width) = self.samples.dim();
        Dimensions::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        if !self.dimensions().contains(x, y) {
            return None;
        }
        self.samples.get((y as usize, x as usize)).copied()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Rgb> {
        self.samples.iter()
    }
}
