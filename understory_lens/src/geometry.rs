// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Circle, Point, Rect, Vec2};

/// Gap between the pointer and the lower edge of the lens, in scene units.
pub const LENS_OFFSET: f64 = 10.0;

/// Where the lens group and its clip boundary go for one pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensPlacement {
    /// Origin of the lens group in scene space.
    ///
    /// The group sits above the pointer so that the pointer stays just
    /// outside the lens's lower edge.
    pub lens_origin: Point,
    /// Center of the clip boundary and border circle, in the lens group's
    /// local frame.
    pub clip_center: Point,
}

impl LensPlacement {
    /// Returns the clip boundary circle in the lens group's local frame.
    #[must_use]
    pub fn clip_circle(&self, radius: f64) -> Circle {
        Circle::new(self.clip_center, radius)
    }

    /// Returns the scene-space bounds covered by the visible lens.
    #[must_use]
    pub fn scene_bounds(&self, radius: f64) -> Rect {
        let center = self.lens_origin + self.clip_center.to_vec2();
        Rect::from_center_size(center, (2.0 * radius, 2.0 * radius))
    }
}

/// Computes lens placement for a scene-space pointer position.
#[must_use]
pub fn place_lens(scene_point: Point, radius: f64) -> LensPlacement {
    let lift = radius + LENS_OFFSET;
    LensPlacement {
        lens_origin: scene_point - Vec2::new(0.0, lift),
        clip_center: Point::new(0.0, lift),
    }
}
