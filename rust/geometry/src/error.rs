// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building plan geometry.
///
/// All of these are recoverable at the room or cutout granularity: the
/// plan-level builder skips the failing item, records the error, and
/// keeps processing siblings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate polygon: {0} corners (need at least 3)")]
    DegeneratePolygon(usize),

    #[error("Material count mismatch on {side} faces: {materials} materials for {edges} edges")]
    MaterialCountMismatch {
        side: &'static str,
        materials: usize,
        edges: usize,
    },

    #[error("Cutout '{id}': no wall within {threshold} units (nearest {nearest:.3})")]
    NoWallWithinThreshold {
        id: String,
        nearest: f64,
        threshold: f64,
    },

    #[error("Cutout '{id}': invalid span ({reason})")]
    InvalidCutoutSpan { id: String, reason: String },

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),
}
