// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for collaborator faults and failed lens updates.

use core::fmt;

/// A fault reported by a host collaborator.
///
/// This is distinct from a capability being *absent*: a coordinate source
/// with no transform available returns `Ok(None)` and the lens falls back
/// silently. A `HostError` means the collaborator itself failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HostError {
    reason: &'static str,
}

impl HostError {
    /// Creates a host error with a short static description.
    #[must_use]
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Returns the description passed to [`HostError::new`].
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host collaborator failed: {}", self.reason)
    }
}

impl core::error::Error for HostError {}

/// Why a lens update could not complete.
///
/// Update failures never escape the public commands of
/// [`Lens`](crate::Lens); they deactivate the lens instead. The value is
/// kept as [`Lens::last_error`](crate::Lens::last_error) for inspection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LensError {
    /// The coordinate system faulted while mapping the pointer into scene space.
    Mapping(HostError),
    /// The content source failed to produce a snapshot.
    Capture(HostError),
}

impl fmt::Display for LensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(err) => write!(f, "mapping pointer into scene space: {err}"),
            Self::Capture(err) => write!(f, "capturing scene snapshot: {err}"),
        }
    }
}

impl core::error::Error for LensError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Mapping(err) | Self::Capture(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::error::Error;

    use super::{HostError, LensError};

    #[test]
    fn display_includes_reason() {
        let err = LensError::Mapping(HostError::new("screen CTM lost"));
        assert_eq!(
            err.to_string(),
            "mapping pointer into scene space: host collaborator failed: screen CTM lost"
        );
        assert!(err.source().is_some(), "lens errors expose the host fault");
    }
}
