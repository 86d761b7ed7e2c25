//! Grid positions and the two-column crossing test.
//!
//! Every node sits on an integer grid: `x` selects the column (0 for the
//! left set, 1 for the right set) and `y` selects the slot within that
//! column. Because every edge runs from column 0 to column 1, two edges
//! cross exactly when their endpoints appear in opposite vertical order on
//! the two columns. No general segment intersection is needed.

/// A cell on the layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Column: 0 = left set, 1 = right set.
    pub x: i32,
    /// Slot within the column.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A drawn edge: a straight segment from a left-column cell to a
/// right-column cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Position,
    pub to: Position,
}

impl Segment {
    /// Creates a segment between two cells.
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Returns `true` if the two segments cross.
    ///
    /// With `a, b` the endpoint slots of `self` and `c, d` those of `other`,
    /// the segments cross when `(a < c && b > d) || (a > c && b < d)`.
    /// Segments with identical endpoint slots are counted as crossing
    /// (they overlap completely).
    ///
    /// The test is symmetric: `s.crosses(&t) == t.crosses(&s)`.
    pub fn crosses(&self, other: &Segment) -> bool {
        slots_cross(self.from.y, self.to.y, other.from.y, other.to.y)
    }
}

/// Crossing test on raw endpoint slots `(a, b)` against `(c, d)`.
#[inline]
pub(crate) fn slots_cross(a: i32, b: i32, c: i32, d: i32) -> bool {
    (a < c && b > d) || (a > c && b < d) || (a == c && b == d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: i32, b: i32) -> Segment {
        Segment::new(Position::new(0, a), Position::new(1, b))
    }

    #[test]
    fn parallel_segments_do_not_cross() {
        assert!(!seg(0, 0).crosses(&seg(1, 1)));
        assert!(!seg(0, 2).crosses(&seg(1, 3)));
    }

    #[test]
    fn opposite_order_crosses() {
        assert!(seg(0, 1).crosses(&seg(1, 0)));
        assert!(seg(3, 0).crosses(&seg(0, 2)));
    }

    #[test]
    fn identical_segments_count_as_crossing() {
        assert!(seg(2, 5).crosses(&seg(2, 5)));
    }

    #[test]
    fn shared_endpoint_does_not_cross() {
        // Fan-out from one left node.
        assert!(!seg(0, 0).crosses(&seg(0, 1)));
        // Fan-in to one right node.
        assert!(!seg(0, 1).crosses(&seg(2, 1)));
    }

    #[test]
    fn crossing_is_symmetric() {
        for a in 0..3 {
            for b in 0..3 {
                for c in 0..3 {
                    for d in 0..3 {
                        assert_eq!(
                            seg(a, b).crosses(&seg(c, d)),
                            seg(c, d).crosses(&seg(a, b))
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(1, 7).to_string(), "1,7");
    }
}
