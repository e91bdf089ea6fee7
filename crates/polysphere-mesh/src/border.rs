//! Border predicates: which polygon adjacencies are meaningful discontinuities.

/// Decides whether the edge shared by two adjacent polygons is a border.
///
/// Smoothed meshes share shading across non-border edges and keep a hard
/// crease across border edges. Implementations must be symmetric in `a`
/// and `b`.
pub trait BorderPredicate {
    /// `true` if the edge between `a` and `b` is a border.
    fn is_border(&self, a: usize, b: usize) -> bool;
}

impl<F> BorderPredicate for F
where
    F: Fn(usize, usize) -> bool,
{
    fn is_border(&self, a: usize, b: usize) -> bool {
        self(a, b)
    }
}

/// No edge is a border: the whole sphere smooths as one surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoBorders;

impl BorderPredicate for NoBorders {
    fn is_border(&self, _a: usize, _b: usize) -> bool {
        false
    }
}
