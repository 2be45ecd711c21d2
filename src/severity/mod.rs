//! Coverage percentage to visual severity buckets.
//!
//! Renderers colour each hierarchy node by the bucket of its overall
//! percentage. There are eleven buckets: `0` (worst, below 5%) through `10`
//! (exactly 100%). Classification is a pure, total function; every `f64`,
//! including NaN and infinities, maps to a bucket.

use serde::Serialize;

/// Number of buckets in [`SEVERITY_PALETTE`].
pub const BUCKET_COUNT: usize = 11;

/// Highest bucket reachable below 100%.
const MAX_PARTIAL_INDEX: usize = 9;

/// Lowest bucket reachable at or above 10%.
const MIN_RANGED_INDEX: usize = 2;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A severity bucket with its display colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityBucket {
    pub index: usize,
    pub foreground: Rgb,
    pub background: Rgb,
}

const fn bucket(index: usize, foreground: Rgb, background: Rgb) -> SeverityBucket {
    SeverityBucket {
        index,
        foreground,
        background,
    }
}

const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Red through amber to green.
pub static SEVERITY_PALETTE: [SeverityBucket; BUCKET_COUNT] = [
    bucket(0, WHITE, Rgb::new(0x8b, 0x00, 0x00)),
    bucket(1, WHITE, Rgb::new(0xb2, 0x22, 0x22)),
    bucket(2, WHITE, Rgb::new(0xd7, 0x30, 0x27)),
    bucket(3, WHITE, Rgb::new(0xf4, 0x6d, 0x43)),
    bucket(4, BLACK, Rgb::new(0xfd, 0xae, 0x61)),
    bucket(5, BLACK, Rgb::new(0xfe, 0xe0, 0x8b)),
    bucket(6, BLACK, Rgb::new(0xff, 0xff, 0xbf)),
    bucket(7, BLACK, Rgb::new(0xd9, 0xef, 0x8b)),
    bucket(8, BLACK, Rgb::new(0xa6, 0xd9, 0x6a)),
    bucket(9, WHITE, Rgb::new(0x66, 0xbd, 0x63)),
    bucket(10, WHITE, Rgb::new(0x1a, 0x98, 0x50)),
];

/// Map a percentage to a bucket index in `0..=10`.
///
/// - below 5: `0`; below 10: `1`; 100 and above: `10`
/// - otherwise two buckets per decade, `floor(p / 10) * 2`, bumped by one in
///   the upper half of the decade, held within `2..=9`
///
/// NaN is treated as 0.
pub fn percentage_to_style_index(percentage: f64) -> usize {
    let p = clamp_percentage(percentage);

    if p < 5.0 {
        return 0;
    }
    if p < 10.0 {
        return 1;
    }
    if p >= 100.0 {
        return BUCKET_COUNT - 1;
    }

    let range_index = (p / 10.0).floor() as usize;
    let mut index = range_index * 2;
    if p % 10.0 >= 5.0 {
        index = (index + 1).min(MAX_PARTIAL_INDEX);
    }
    index.clamp(MIN_RANGED_INDEX, MAX_PARTIAL_INDEX)
}

/// Clamp into `[0, 100]`; NaN becomes 0.
pub fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    }
}

/// Palette entry for an index; unknown indices get bucket 0's colours.
pub fn bucket_for_index(index: usize) -> &'static SeverityBucket {
    SEVERITY_PALETTE.get(index).unwrap_or(&SEVERITY_PALETTE[0])
}

/// Classify a percentage straight to its palette entry.
pub fn classify(percentage: f64) -> &'static SeverityBucket {
    bucket_for_index(percentage_to_style_index(percentage))
}
