// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-alpha RGBA colors.

/// An RGBA color with `f32` channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Converts HSL (hue 0–360, saturation 0–1, lightness 0–1) to an opaque
    /// color.
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = libm::fmod(h, 360.0);
        let h = if h < 0.0 { h + 360.0 } else { h };
        let c = (1.0 - libm::fabs(2.0 * l - 1.0)) * s;
        let h_prime = h / 60.0;
        let x = c * (1.0 - libm::fabs(h_prime % 2.0 - 1.0));
        let (r1, g1, b1) = if h_prime < 1.0 {
            (c, x, 0.0)
        } else if h_prime < 2.0 {
            (x, c, 0.0)
        } else if h_prime < 3.0 {
            (0.0, c, x)
        } else if h_prime < 4.0 {
            (0.0, x, c)
        } else if h_prime < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };
        let m = l - c / 2.0;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "channels are constrained to 0.0..=1.0"
        )]
        Self::rgb((r1 + m) as f32, (g1 + m) as f32, (b1 + m) as f32)
    }
}
