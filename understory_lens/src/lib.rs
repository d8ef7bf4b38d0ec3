// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Lens: a magnifying lens overlay that follows the pointer.
//!
//! This crate is the headless core of a circular magnifier over a vector
//! scene. It covers:
//! - Converting device/pointer coordinates into scene space, with a fallback
//!   when the host's transform is unavailable.
//! - Placing the lens just above the pointer and positioning its clip circle
//!   in the lens's local frame.
//! - Computing the affine transform that magnifies scene content around the
//!   point under the pointer.
//! - Caching the cloned scene snapshot so that pointer moves only recompute
//!   the transform.
//! - Coalescing bursts of pointer moves into one update per display frame.
//!
//! It does **not** own a scene graph, a renderer or an event loop. Callers
//! implement the collaborator traits in [`host`] ([`CoordinateSource`],
//! [`ContentSource`], [`FrameClock`], [`OverlaySink`]) and forward three
//! logical commands from their input layer: [`Lens::activate`] /
//! [`Lens::deactivate`] (or [`Lens::toggle`]) and
//! [`Lens::note_pointer_position`]. The host is passed by `&mut` into each
//! command, so the lens never stores callbacks.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect};
//! use understory_lens::{
//!     ClipId, ContentSource, CoordinateSource, FrameClock, HostError, Lens, LensConfig,
//!     LensFrame, OverlaySink,
//! };
//!
//! #[derive(Default)]
//! struct Scene {
//!     frame_requested: bool,
//!     shown: Option<LensFrame>,
//! }
//!
//! impl CoordinateSource for Scene {
//!     fn device_to_scene(&self) -> Result<Option<Affine>, HostError> {
//!         Ok(Some(Affine::IDENTITY))
//!     }
//!     fn screen_bounds(&self) -> Result<Rect, HostError> {
//!         Ok(Rect::new(0.0, 0.0, 800.0, 600.0))
//!     }
//! }
//!
//! impl ContentSource for Scene {
//!     type Snapshot = ();
//!     fn capture(&mut self) -> Result<(), HostError> {
//!         Ok(())
//!     }
//! }
//!
//! impl FrameClock for Scene {
//!     fn request_frame(&mut self) {
//!         self.frame_requested = true;
//!     }
//! }
//!
//! impl OverlaySink for Scene {
//!     fn mount(&mut self, _clip_id: ClipId) {}
//!     fn present(&mut self, frame: &LensFrame, _snapshot: &()) {
//!         self.shown = Some(*frame);
//!     }
//!     fn hide(&mut self) {
//!         self.shown = None;
//!     }
//!     fn unmount(&mut self, _clip_id: ClipId) {}
//! }
//!
//! let mut scene = Scene::default();
//! let mut lens = Lens::new(LensConfig::default(), &mut scene);
//!
//! // Pointer moves are recorded even while the lens is hidden.
//! lens.note_pointer_position(Point::new(120.0, 80.0), &mut scene);
//! assert!(!scene.frame_requested);
//!
//! lens.activate(&mut scene);
//! let shown = scene.shown.unwrap();
//! assert_eq!(shown.scene_point, Point::new(120.0, 80.0));
//!
//! // While active, moves are coalesced into the next frame.
//! lens.note_pointer_position(Point::new(130.0, 80.0), &mut scene);
//! lens.note_pointer_position(Point::new(140.0, 80.0), &mut scene);
//! assert!(scene.frame_requested);
//! let frame = lens.on_frame(&mut scene).unwrap();
//! assert_eq!(frame.scene_point, Point::new(140.0, 80.0));
//!
//! lens.destroy(&mut scene);
//! ```
//!
//! ## Failure handling
//!
//! - Out-of-range or non-finite configuration values are clamped or reset to
//!   defaults by [`LensConfig`]; they are never errors.
//! - A missing or singular device → scene transform silently falls back to
//!   an offset from the scene's screen bounds (see [`CoordinateMapper`]).
//! - Any collaborator fault during an update deactivates the lens. No error
//!   escapes the commands; [`Lens::last_error`] records what happened.
//!
//! ## Logging
//!
//! Lifecycle changes and snapshot captures are reported at `debug` level
//! through [`tracing`]. Coalesced requests and the [`MappingSource`] tier
//! used by each update go out at `trace`, failed updates at `warn`. Install a subscriber in the application to see them.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod cache;
mod config;
mod error;
mod geometry;
pub mod host;
mod lens;
mod mapper;
mod scheduler;
mod transform;

pub use cache::ContentCache;
pub use config::{
    DEFAULT_MAGNIFICATION, DEFAULT_RADIUS, LensConfig, MAX_MAGNIFICATION, MAX_RADIUS,
    MIN_MAGNIFICATION, MIN_RADIUS,
};
pub use error::{HostError, LensError};
pub use geometry::{LENS_OFFSET, LensPlacement, place_lens};
pub use host::{ClipId, ContentSource, CoordinateSource, FrameClock, LensHost, OverlaySink};
pub use lens::{Lens, LensFrame, LensState};
pub use mapper::{CoordinateMapper, MappedPoint, MappingSource};
pub use scheduler::UpdateScheduler;
pub use transform::magnification_transform;
