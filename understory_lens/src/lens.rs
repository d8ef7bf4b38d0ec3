// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Circle, Point, Rect};

use crate::cache::ContentCache;
use crate::config::LensConfig;
use crate::error::LensError;
use crate::geometry::{LensPlacement, place_lens};
use crate::host::{ClipId, LensHost};
use crate::mapper::CoordinateMapper;
use crate::scheduler::UpdateScheduler;
use crate::transform::magnification_transform;

/// Lifecycle state of a [`Lens`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LensState {
    /// Hidden; pointer moves are recorded but never rendered.
    #[default]
    Inactive,
    /// Visible and following the pointer.
    Active,
}

/// Render instructions for one lens update.
///
/// Positions are in scene space except where noted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensFrame {
    /// Clip boundary the overlay was mounted with.
    pub clip_id: ClipId,
    /// Scene-space point under the pointer.
    pub scene_point: Point,
    /// Origin of the lens group.
    pub lens_origin: Point,
    /// Clip and border center, in the lens group's local frame.
    pub clip_center: Point,
    /// Clip and border radius.
    pub radius: f64,
    /// Magnification used for `content_transform`.
    pub magnification: f64,
    /// Transform applied to the snapshot, in the lens group's local frame.
    pub content_transform: Affine,
}

impl LensFrame {
    fn placement(&self) -> LensPlacement {
        LensPlacement {
            lens_origin: self.lens_origin,
            clip_center: self.clip_center,
        }
    }

    /// Clip boundary and border circle, in the lens group's local frame.
    #[must_use]
    pub fn clip_circle(&self) -> Circle {
        self.placement().clip_circle(self.radius)
    }

    /// Scene-space area covered by the visible lens.
    ///
    /// Hosts that track damage can union this with the previous frame's
    /// bounds.
    #[must_use]
    pub fn scene_bounds(&self) -> Rect {
        self.placement().scene_bounds(self.radius)
    }
}

/// A single magnifying lens.
///
/// The lens owns its configuration, lifecycle state, the last pointer
/// position and the cached content snapshot. Everything else comes from the
/// host passed into each command. See the [crate docs](crate) for an
/// end-to-end example.
#[derive(Debug)]
pub struct Lens<S> {
    config: LensConfig,
    state: LensState,
    clip_id: ClipId,
    mapper: CoordinateMapper,
    cache: ContentCache<S>,
    scheduler: UpdateScheduler,
    last_pointer: Option<Point>,
    last_scene_point: Option<Point>,
    last_error: Option<LensError>,
}

impl<S> Lens<S> {
    /// Creates an inactive lens and mounts its (hidden) overlay on `host`.
    pub fn new<H>(config: LensConfig, host: &mut H) -> Self
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        let clip_id = ClipId::next();
        host.mount(clip_id);
        Self {
            config,
            state: LensState::Inactive,
            clip_id,
            mapper: CoordinateMapper,
            cache: ContentCache::new(),
            scheduler: UpdateScheduler::new(),
            last_pointer: None,
            last_scene_point: None,
            last_error: None,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LensState {
        self.state
    }

    /// Returns `true` while the lens is [`LensState::Active`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == LensState::Active
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> LensConfig {
        self.config
    }

    /// Returns the current magnification factor.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        self.config.magnification()
    }

    /// Returns the current lens radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.config.radius()
    }

    /// Returns the identifier of this lens's clip boundary.
    #[must_use]
    pub fn clip_id(&self) -> ClipId {
        self.clip_id
    }

    /// Last pointer position reported through
    /// [`note_pointer_position`](Self::note_pointer_position), in device space.
    #[must_use]
    pub fn last_pointer_position(&self) -> Option<Point> {
        self.last_pointer
    }

    /// Scene point used by the most recent successful update.
    ///
    /// Cleared on deactivation.
    #[must_use]
    pub fn last_scene_point(&self) -> Option<Point> {
        self.last_scene_point
    }

    /// Failure that most recently forced the lens inactive, if any.
    ///
    /// Cleared on the next activation.
    #[must_use]
    pub fn last_error(&self) -> Option<LensError> {
        self.last_error
    }

    /// Snapshot currently displayed inside the lens.
    #[must_use]
    pub fn snapshot(&self) -> Option<&S> {
        self.cache.snapshot()
    }

    /// Number of snapshots captured so far.
    #[must_use]
    pub fn captures(&self) -> u64 {
        self.cache.captures()
    }

    /// Returns `true` while a frame has been requested but not yet run.
    #[must_use]
    pub fn is_update_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Shows the lens and renders it immediately.
    ///
    /// The lens is placed at the last known pointer position, or at the center
    /// of the scene's screen bounds if the pointer has not been seen yet. The
    /// content snapshot is always re-captured. Does nothing if already active.
    pub fn activate<H>(&mut self, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if self.is_active() {
            return;
        }
        self.state = LensState::Active;
        self.last_error = None;
        self.cache.invalidate();
        tracing::debug!(clip = self.clip_id.get(), "lens activated");
        self.update(host);
    }

    /// Hides the lens. Safe to call in either state.
    ///
    /// The last pointer position is kept so that a later activation can reuse
    /// it; the last computed scene point is cleared.
    pub fn deactivate<H>(&mut self, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if self.is_active() {
            tracing::debug!(clip = self.clip_id.get(), "lens deactivated");
        }
        self.state = LensState::Inactive;
        self.last_scene_point = None;
        host.hide();
    }

    /// Deactivates an active lens, activates an inactive one.
    pub fn toggle<H>(&mut self, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        match self.state {
            LensState::Active => self.deactivate(host),
            LensState::Inactive => self.activate(host),
        }
    }

    /// Records a raw pointer position in device space.
    ///
    /// Call this for every pointer move regardless of state. While active, an
    /// update is scheduled for the next frame; bursts of moves before that
    /// frame collapse into a single update.
    pub fn note_pointer_position<H>(&mut self, device: Point, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        self.last_pointer = Some(device);
        if self.is_active() {
            self.scheduler.request(host);
        }
    }

    /// Frame callback; call once per [`FrameClock::request_frame`](crate::FrameClock::request_frame).
    ///
    /// Returns the frame that was presented, or `None` if no update was owed,
    /// the lens is inactive, or the update failed (in which case the lens is
    /// now inactive and [`last_error`](Self::last_error) says why).
    pub fn on_frame<H>(&mut self, host: &mut H) -> Option<LensFrame>
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if !self.scheduler.begin_frame() {
            return None;
        }
        self.update(host)
    }

    /// Sets the magnification factor, clamping it into range.
    ///
    /// If the value changed while the lens is showing, the lens is re-presented
    /// at once with the new transform; the snapshot is not re-captured.
    /// Returns the stored magnification.
    pub fn set_magnification<H>(&mut self, magnification: f64, host: &mut H) -> f64
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if self.config.set_magnification(magnification) {
            self.represent(host);
        }
        self.config.magnification()
    }

    /// Sets the lens radius, clamping it into range.
    ///
    /// Behaves like [`set_magnification`](Self::set_magnification): the lens
    /// is repositioned without re-capturing content. Returns the stored radius.
    pub fn set_radius<H>(&mut self, radius: f64, host: &mut H) -> f64
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if self.config.set_radius(radius) {
            self.represent(host);
        }
        self.config.radius()
    }

    /// Marks the displayed content stale.
    ///
    /// Use this when the scene changed while the lens is showing. An active
    /// lens schedules an update that re-captures the snapshot.
    pub fn invalidate_content<H>(&mut self, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        self.cache.invalidate();
        if self.is_active() {
            self.scheduler.request(host);
        }
    }

    /// Hides the lens, releases its snapshot and unmounts the overlay.
    pub fn destroy<H>(mut self, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        self.deactivate(host);
        self.cache.clear(host);
        host.unmount(self.clip_id);
    }

    fn frame_at(&self, scene_point: Point) -> LensFrame {
        let radius = self.config.radius();
        let magnification = self.config.magnification();
        let placement = place_lens(scene_point, radius);
        LensFrame {
            clip_id: self.clip_id,
            scene_point,
            lens_origin: placement.lens_origin,
            clip_center: placement.clip_center,
            radius,
            magnification,
            content_transform: magnification_transform(scene_point, magnification, radius),
        }
    }

    /// Runs one update and folds any failure into deactivation.
    fn update<H>(&mut self, host: &mut H) -> Option<LensFrame>
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if !self.is_active() {
            host.hide();
            return None;
        }
        match self.try_update(host) {
            Ok(frame) => Some(frame),
            Err(err) => {
                tracing::warn!(error = %err, "lens update failed; deactivating");
                self.last_error = Some(err);
                self.deactivate(host);
                None
            }
        }
    }

    fn try_update<H>(&mut self, host: &mut H) -> Result<LensFrame, LensError>
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        let device = match self.last_pointer {
            Some(pointer) => pointer,
            None => host.screen_bounds().map_err(LensError::Mapping)?.center(),
        };
        let mapped = self
            .mapper
            .to_scene_space(&*host, device)
            .map_err(LensError::Mapping)?;
        let frame = self.frame_at(mapped.point);
        tracing::trace!(
            source = ?mapped.source,
            bounds = ?frame.scene_bounds(),
            "mapped pointer into scene space"
        );
        let snapshot = self
            .cache
            .ensure_snapshot(false, host)
            .map_err(LensError::Capture)?;
        host.present(&frame, snapshot);
        self.last_scene_point = Some(mapped.point);
        Ok(frame)
    }

    /// Re-presents the current snapshot with the current configuration.
    fn represent<H>(&mut self, host: &mut H)
    where
        H: LensHost<Snapshot = S> + ?Sized,
    {
        if !self.is_active() {
            return;
        }
        let Some(scene_point) = self.last_scene_point else {
            return;
        };
        let frame = self.frame_at(scene_point);
        if let Some(snapshot) = self.cache.snapshot() {
            host.present(&frame, snapshot);
        }
    }
}
