// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Smallest accepted magnification factor.
pub const MIN_MAGNIFICATION: f64 = 0.1;
/// Largest accepted magnification factor.
pub const MAX_MAGNIFICATION: f64 = 10.0;
/// Magnification used when none (or a non-finite value) is supplied.
pub const DEFAULT_MAGNIFICATION: f64 = 2.0;

/// Smallest accepted lens radius, in scene units.
pub const MIN_RADIUS: f64 = 10.0;
/// Largest accepted lens radius, in scene units.
pub const MAX_RADIUS: f64 = 500.0;
/// Radius used when none (or a non-finite value) is supplied.
pub const DEFAULT_RADIUS: f64 = 100.0;

/// Lens configuration: magnification factor and radius.
///
/// Both values are always within their accepted ranges. Every way of
/// producing or changing a `LensConfig` goes through the same sanitizing
/// step:
/// - finite values outside the range are clamped to the nearest bound;
/// - non-finite values (`NaN`, `±∞`) are replaced by the field's default.
///
/// ```rust
/// use understory_lens::LensConfig;
///
/// let mut config = LensConfig::default().with_radius(1_000.0);
/// assert_eq!(config.radius(), 500.0);
///
/// assert!(config.set_magnification(999.0));
/// assert_eq!(config.magnification(), 10.0);
///
/// config.set_magnification(f64::NAN);
/// assert_eq!(config.magnification(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensConfig {
    magnification: f64,
    radius: f64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            magnification: DEFAULT_MAGNIFICATION,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl LensConfig {
    /// Creates a configuration from raw values, sanitizing both.
    #[must_use]
    pub fn new(magnification: f64, radius: f64) -> Self {
        Self::default()
            .with_magnification(magnification)
            .with_radius(radius)
    }

    /// Returns a copy with the given magnification, sanitized.
    #[must_use]
    pub fn with_magnification(mut self, magnification: f64) -> Self {
        self.set_magnification(magnification);
        self
    }

    /// Returns a copy with the given radius, sanitized.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.set_radius(radius);
        self
    }

    /// Returns the magnification factor.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        self.magnification
    }

    /// Returns the lens radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the magnification factor.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_magnification(&mut self, magnification: f64) -> bool {
        let next = sanitize(
            magnification,
            MIN_MAGNIFICATION,
            MAX_MAGNIFICATION,
            DEFAULT_MAGNIFICATION,
        );
        replace_if_changed(&mut self.magnification, next)
    }

    /// Sets the lens radius.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_radius(&mut self, radius: f64) -> bool {
        let next = sanitize(radius, MIN_RADIUS, MAX_RADIUS, DEFAULT_RADIUS);
        replace_if_changed(&mut self.radius, next)
    }
}

fn sanitize(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}

fn replace_if_changed(slot: &mut f64, next: f64) -> bool {
    if (*slot - next).abs() < f64::EPSILON {
        return false;
    }
    *slot = next;
    true
}
