// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

use crate::geometry::LENS_OFFSET;

/// Computes the transform applied to snapshot content inside the lens.
///
/// Content is scaled uniformly by `magnification`, then translated so that
/// `scene_point` lands on the clip center `(0, radius + LENS_OFFSET)` in the
/// lens group's local frame:
///
/// ```rust
/// use kurbo::Point;
/// use understory_lens::{LENS_OFFSET, magnification_transform};
///
/// let p = Point::new(42.0, 17.0);
/// let t = magnification_transform(p, 3.0, 80.0);
/// let q = t * p;
/// assert!(q.x.abs() < 1e-9);
/// assert!((q.y - (80.0 + LENS_OFFSET)).abs() < 1e-9);
/// ```
#[must_use]
pub fn magnification_transform(scene_point: Point, magnification: f64, radius: f64) -> Affine {
    let translation = Vec2::new(
        -magnification * scene_point.x,
        (radius + LENS_OFFSET) - magnification * scene_point.y,
    );
    Affine::translate(translation) * Affine::scale(magnification)
}
