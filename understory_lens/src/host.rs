// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits implemented by the embedder.
//!
//! The lens owns no scene, no renderer and no clock. Everything it needs from
//! the outside world is expressed here and passed by `&mut` into each command,
//! so the lens never stores callbacks or shared handles.

use core::sync::atomic::{AtomicUsize, Ordering};

use kurbo::{Affine, Rect};

use crate::LensFrame;
use crate::error::HostError;

/// Process-unique identifier of a lens clip boundary.
///
/// Hosts use it to name the clip path the overlay references. Identifiers
/// are never reused within a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(usize);

static NEXT_CLIP_ID: AtomicUsize = AtomicUsize::new(1);

impl ClipId {
    /// Allocates a fresh identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_CLIP_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Source of device → scene coordinate information.
pub trait CoordinateSource {
    /// Returns the current device → scene transform.
    ///
    /// - `Ok(Some(affine))`: the authoritative transform. It may still be
    ///   singular, in which case the lens uses the fallback.
    /// - `Ok(None)`: temporarily unavailable (for example during layout).
    /// - `Err(_)`: the coordinate system faulted; the update is abandoned.
    fn device_to_scene(&self) -> Result<Option<Affine>, HostError>;

    /// Returns the scene's on-screen bounding rectangle in device coordinates.
    ///
    /// Used as the fallback coordinate source and to find the scene center.
    fn screen_bounds(&self) -> Result<Rect, HostError>;
}

/// Source of immutable content snapshots.
pub trait ContentSource {
    /// Mountable copy of the scene content.
    type Snapshot;

    /// Clones the current scene content into a new snapshot.
    fn capture(&mut self) -> Result<Self::Snapshot, HostError>;

    /// Takes back a snapshot that the lens no longer displays.
    ///
    /// The default implementation drops it.
    fn release(&mut self, snapshot: Self::Snapshot) {
        drop(snapshot);
    }
}

/// Display refresh clock.
pub trait FrameClock {
    /// Requests that [`Lens::on_frame`](crate::Lens::on_frame) be called at
    /// the next display refresh.
    ///
    /// The lens calls this at most once per pending frame.
    fn request_frame(&mut self);
}

/// Mount point for the lens overlay.
///
/// The overlay displays snapshots produced by the same host's
/// [`ContentSource`].
pub trait OverlaySink: ContentSource {
    /// Attaches the (hidden) lens group and its clip boundary.
    fn mount(&mut self, clip_id: ClipId);

    /// Shows the lens with the given placement and content.
    fn present(&mut self, frame: &LensFrame, snapshot: &Self::Snapshot);

    /// Hides the lens group.
    fn hide(&mut self);

    /// Detaches the lens group and clip boundary mounted under `clip_id`.
    fn unmount(&mut self, clip_id: ClipId);
}

/// Everything a [`Lens`](crate::Lens) needs from its host.
///
/// Implemented automatically for any type that implements the collaborator
/// traits.
pub trait LensHost: CoordinateSource + OverlaySink + FrameClock {}

impl<T> LensHost for T where T: CoordinateSource + OverlaySink + FrameClock {}
