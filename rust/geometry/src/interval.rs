// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interval subtraction of openings from a wall face
//!
//! A wall face is the rectangle [0, length) x [0, height) in
//! edge-local coordinates (u along the wall, v up). Subtracting the
//! door/window spans leaves a minimal set of solid rectangles: full
//! height panels between openings, below-sill and above-lintel strips
//! across them.
//!
//! Overlapping openings on one edge are processed independently and
//! may emit overlapping strips. That mirrors the established opening-
//! overlap policy; merging the spans first would change built plans.

use crate::cutout::ResolvedCutout;

/// Tolerance for degenerate rectangle suppression, world units
pub const EPSILON: f64 = 1e-3;

/// Solid sub-rectangle of a wall face in edge-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRect {
    /// Start along the edge
    pub u0: f64,
    /// End along the edge
    pub u1: f64,
    /// Bottom, from the floor
    pub v0: f64,
    /// Top
    pub v1: f64,
}

impl FaceRect {
    pub fn width(&self) -> f64 {
        self.u1 - self.u0
    }

    pub fn height(&self) -> f64 {
        self.v1 - self.v0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Opening span in edge-local coordinates
#[derive(Debug, Clone, Copy)]
pub struct OpeningSpan {
    /// Center position along the edge
    pub position: f64,
    pub width: f64,
    pub sill_height: f64,
    pub height: f64,
}

impl From<&ResolvedCutout> for OpeningSpan {
    fn from(resolved: &ResolvedCutout) -> Self {
        Self {
            position: resolved.position_along_edge,
            width: resolved.cutout.width,
            sill_height: resolved.cutout.sill_height,
            height: resolved.cutout.height,
        }
    }
}

/// Subtract `openings` (ordered by position) from the face
/// [0, length) x [0, height).
///
/// For non-overlapping openings the result is disjoint and, together
/// with the opening spans, covers the face exactly (within EPSILON).
pub fn subtract_openings(length: f64, height: f64, openings: &[OpeningSpan]) -> Vec<FaceRect> {
    let mut rects = Vec::with_capacity(openings.len() * 2 + 1);
    let mut cursor = 0.0;

    for opening in openings {
        let a = (opening.position - opening.width / 2.0).clamp(0.0, length);
        let b = (opening.position + opening.width / 2.0).clamp(0.0, length);

        // Full-height panel before the opening
        if a > cursor + EPSILON {
            rects.push(FaceRect {
                u0: cursor,
                u1: a,
                v0: 0.0,
                v1: height,
            });
        }

        if b > a + EPSILON {
            // Below-sill strip (windows; doors have sill 0)
            if opening.sill_height > EPSILON {
                rects.push(FaceRect {
                    u0: a,
                    u1: b,
                    v0: 0.0,
                    v1: opening.sill_height,
                });
            }

            // Above-lintel strip
            let lintel = opening.sill_height + opening.height;
            if lintel < height - EPSILON {
                rects.push(FaceRect {
                    u0: a,
                    u1: b,
                    v0: lintel,
                    v1: height,
                });
            }
        }

        cursor = cursor.max(b);
    }

    // Trailing full-height panel
    if cursor < length - EPSILON {
        rects.push(FaceRect {
            u0: cursor,
            u1: length,
            v0: 0.0,
            v1: height,
        });
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn span(position: f64, width: f64, sill_height: f64, height: f64) -> OpeningSpan {
        OpeningSpan {
            position,
            width,
            sill_height,
            height,
        }
    }

    fn total_area(rects: &[FaceRect]) -> f64 {
        rects.iter().map(|r| r.area()).sum()
    }

    #[test]
    fn test_no_openings_single_panel() {
        let rects = subtract_openings(10.0, 10.0, &[]);
        assert_eq!(
            rects,
            vec![FaceRect {
                u0: 0.0,
                u1: 10.0,
                v0: 0.0,
                v1: 10.0
            }]
        );
    }

    #[test]
    fn test_centered_door() {
        // Door width 3 at position 5 on a 10-unit edge, wall height 10,
        // door height 7: left panel, above-lintel strip, right panel
        let rects = subtract_openings(10.0, 10.0, &[span(5.0, 3.0, 0.0, 7.0)]);

        assert_eq!(
            rects,
            vec![
                FaceRect {
                    u0: 0.0,
                    u1: 3.5,
                    v0: 0.0,
                    v1: 10.0
                },
                FaceRect {
                    u0: 3.5,
                    u1: 6.5,
                    v0: 7.0,
                    v1: 10.0
                },
                FaceRect {
                    u0: 6.5,
                    u1: 10.0,
                    v0: 0.0,
                    v1: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_window_with_sill() {
        // Window width 2 at position 5, sill 3, height 4, wall 10x10:
        // before, below-sill, above-lintel, after
        let rects = subtract_openings(10.0, 10.0, &[span(5.0, 2.0, 3.0, 4.0)]);

        assert_eq!(
            rects,
            vec![
                FaceRect {
                    u0: 0.0,
                    u1: 4.0,
                    v0: 0.0,
                    v1: 10.0
                },
                FaceRect {
                    u0: 4.0,
                    u1: 6.0,
                    v0: 0.0,
                    v1: 3.0
                },
                FaceRect {
                    u0: 4.0,
                    u1: 6.0,
                    v0: 7.0,
                    v1: 10.0
                },
                FaceRect {
                    u0: 6.0,
                    u1: 10.0,
                    v0: 0.0,
                    v1: 10.0
                },
            ]
        );
    }

    #[test]
    fn test_area_closure() {
        // Solid rectangles + opening areas must tile the whole face
        let openings = [span(2.0, 2.0, 0.0, 7.0), span(7.0, 2.0, 3.0, 4.0)];
        let rects = subtract_openings(10.0, 10.0, &openings);

        let opening_area: f64 = openings.iter().map(|o| o.width * o.height).sum();
        assert_relative_eq!(total_area(&rects) + opening_area, 100.0, epsilon = 1e-3);

        // Non-overlapping openings: rectangles must be disjoint
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                let u_overlap = a.u1.min(b.u1) - a.u0.max(b.u0);
                let v_overlap = a.v1.min(b.v1) - a.v0.max(b.v0);
                assert!(u_overlap <= EPSILON || v_overlap <= EPSILON);
            }
        }
    }

    #[test]
    fn test_opening_clamped_to_edge() {
        // Door hanging off the edge start: span clamps to [0, 1.5)
        let rects = subtract_openings(10.0, 10.0, &[span(0.0, 3.0, 0.0, 7.0)]);

        assert_eq!(rects.len(), 2);
        assert_relative_eq!(rects[0].u0, 0.0);
        assert_relative_eq!(rects[0].u1, 1.5);
        assert_relative_eq!(rects[0].v0, 7.0);
        assert_relative_eq!(rects[1].u0, 1.5);
        assert_relative_eq!(rects[1].u1, 10.0);
    }

    #[test]
    fn test_full_height_opening_leaves_side_panels_only() {
        // Opening as tall as the wall: no lintel strip
        let rects = subtract_openings(10.0, 10.0, &[span(5.0, 2.0, 0.0, 10.0)]);

        assert_eq!(rects.len(), 2);
        assert!(rects.iter().all(|r| (r.height() - 10.0).abs() < 1e-9));
    }

    #[test]
    fn test_overlapping_openings_kept_independent() {
        // Two overlapping doors: each emits its own lintel strip, the
        // strips overlap. Documented policy, not merged.
        let openings = [span(4.0, 4.0, 0.0, 7.0), span(6.0, 4.0, 0.0, 7.0)];
        let rects = subtract_openings(10.0, 10.0, &openings);

        let lintels: Vec<_> = rects.iter().filter(|r| r.v0 == 7.0).collect();
        assert_eq!(lintels.len(), 2);
        assert!(lintels[0].u1 > lintels[1].u0);
    }
}
