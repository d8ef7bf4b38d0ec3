// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::host::FrameClock;

/// Coalesces update requests into at most one pending frame.
///
/// Requests made while a frame is already pending are dropped: the frame
/// reads the live pointer state when it runs, so it already covers them.
#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateScheduler {
    pending: bool,
}

impl UpdateScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Returns `true` between a successful [`request`](Self::request) and the
    /// matching [`begin_frame`](Self::begin_frame).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests a frame from `clock` unless one is already pending.
    ///
    /// Returns `true` if a new frame was requested.
    pub fn request<C>(&mut self, clock: &mut C) -> bool
    where
        C: FrameClock + ?Sized,
    {
        if self.pending {
            tracing::trace!("lens update coalesced into pending frame");
            return false;
        }
        self.pending = true;
        clock.request_frame();
        true
    }

    /// Clears the pending flag at the start of a frame.
    ///
    /// Returns whether a frame was owed.
    pub fn begin_frame(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }
}
