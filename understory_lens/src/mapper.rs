// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};

use crate::error::HostError;
use crate::host::CoordinateSource;

/// Which tier produced a [`MappedPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingSource {
    /// The host's authoritative device → scene transform.
    Transform,
    /// Offset from the top-left corner of the scene's screen bounds.
    BoundsOffset,
}

/// A scene-space point plus the tier that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedPoint {
    /// Point in scene coordinates.
    pub point: Point,
    /// How `point` was obtained.
    pub source: MappingSource,
}

/// Converts device/pointer coordinates into scene coordinates.
///
/// The authoritative transform is preferred. When it is unavailable, exactly
/// singular, or produces non-finite output, the mapper subtracts the origin of the
/// scene's screen bounds instead. Only a collaborator *fault* is returned as
/// an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Maps `device` into scene space using `source`.
    pub fn to_scene_space<C>(&self, source: &C, device: Point) -> Result<MappedPoint, HostError>
    where
        C: CoordinateSource + ?Sized,
    {
        if let Some(point) = source
            .device_to_scene()?
            .and_then(|affine| apply_checked(affine, device))
        {
            return Ok(MappedPoint {
                point,
                source: MappingSource::Transform,
            });
        }

        let bounds = source.screen_bounds()?;
        Ok(MappedPoint {
            point: device - bounds.origin().to_vec2(),
            source: MappingSource::BoundsOffset,
        })
    }
}

/// Applies `affine` to `pt` if the transform is usable.
///
/// Small but nonzero scales are valid; only degenerate matrices are rejected.
fn apply_checked(affine: Affine, pt: Point) -> Option<Point> {
    if !affine.is_finite() || affine.determinant() == 0.0 {
        return None;
    }
    let mapped = affine * pt;
    mapped.is_finite().then_some(mapped)
}
