//! Geometric primitives and the parabola kernel behind the sweep.
//!
//! The sweep line is vertical and moves in the direction of increasing `x`.
//! Every site to the left of it defines a parabola (the points equidistant
//! from the site and the sweep line), and the beachline is made of the
//! rightmost pieces of those parabolas. The functions here answer the only
//! three geometric questions the sweep ever asks: where two neighboring arcs
//! meet, whether a new site lands under a given arc, and when three
//! neighboring arcs converge.

use crate::num::CheapOrderedFloat;

/// A two-dimensional point.
///
/// Points are sorted by `x` and then by `y`, for the convenience of our
/// sweep-line algorithm (which moves in increasing `x`).
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate, the direction in which the sweep moves.
    pub x: f64,
    /// Vertical coordinate, the direction along which the beachline is ordered.
    pub y: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.x),
            CheapOrderedFloat::from(self.y),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.x),
                CheapOrderedFloat::from(other.y),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Are both coordinates finite?
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The squared Euclidean distance between `self` and `other`.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// The Euclidean distance between `self` and `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Convert to a `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// An index into the registered sites.
///
/// Sites are numbered in the order they were added, starting from zero.
#[derive(
    Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SiteIdx(pub usize);

/// A vector indexed by [`SiteIdx`].
#[derive(Clone)]
pub(crate) struct SiteVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(SiteVec, SiteIdx, "site");

/// A circle through three sites, as seen by the sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// The circumcenter, which becomes a vertex of the diagram.
    pub center: Point,
    /// The sweep position at which the sweep line touches the circle on its
    /// far side; this is when the middle arc vanishes.
    pub event_x: f64,
}

/// Returns the `x` coordinate of the point at height `y` on the parabola with
/// the given focus and the vertical directrix at `directrix`.
///
/// Returns `None` if the focus lies on the directrix, in which case the
/// "parabola" is a horizontal ray and has no well-defined `x` at any height.
fn parabola_x(focus: Point, y: f64, directrix: f64) -> Option<f64> {
    let denom = 2.0 * (focus.x - directrix);
    if denom == 0.0 {
        return None;
    }
    let dy = focus.y - y;
    Some((focus.x * focus.x + dy * dy - directrix * directrix) / denom)
}

/// The breakpoint between the arc of `lower` and the arc of `upper`, when the
/// sweep line is at `directrix`.
///
/// `lower` is the site whose arc comes first in beachline order (smaller `y`)
/// and `upper` the one after it. The two parabolas generally meet twice; the
/// breakpoint between the arcs in this order is the one with the smaller
/// `y` coordinate.
///
/// Degenerate configurations are handled without dividing by zero:
///
/// - if both sites have the same `x`, the bisector is horizontal and the
///   breakpoint is at their mid-height;
/// - if one of the sites is on the directrix, its parabola is a horizontal ray
///   and the breakpoint is at that site's height;
/// - if both sites are on the directrix, the breakpoint's `x` is negative
///   infinity. This only ever happens while comparing heights, so the
///   infinite coordinate never reaches the output.
pub fn breakpoint(lower: Point, upper: Point, directrix: f64) -> Point {
    let mut focus = lower;
    let y = if lower.x == upper.x {
        (lower.y + upper.y) / 2.0
    } else if upper.x == directrix {
        upper.y
    } else if lower.x == directrix {
        focus = upper;
        lower.y
    } else {
        // Subtract the two parabolas (written as x in terms of y) and solve
        // the resulting quadratic in y.
        let z0 = 2.0 * (lower.x - directrix);
        let z1 = 2.0 * (upper.x - directrix);

        let a = 1.0 / z0 - 1.0 / z1;
        let b = -2.0 * (lower.y / z0 - upper.y / z1);
        let c = (lower.y * lower.y + lower.x * lower.x - directrix * directrix) / z0
            - (upper.y * upper.y + upper.x * upper.x - directrix * directrix) / z1;

        // The discriminant is a sum of squares in exact arithmetic, but
        // rounding can push it slightly negative.
        let disc = (b * b - 4.0 * a * c).max(0.0);
        (-b - disc.sqrt()) / (2.0 * a)
    };

    let x = parabola_x(focus, y, directrix).unwrap_or(f64::NEG_INFINITY);
    Point::new(x, y)
}

/// Does the arc with focus `focus` span the height of `site`, given that the
/// sweep line has just reached `site`?
///
/// `prev` and `next` are the foci of the arcs neighboring this one in the
/// beachline, if there are any. If the arc spans the site's height, returns
/// the point on the arc at that height: this is where the new site's
/// (infinitely thin) parabola first touches the beachline.
///
/// An arc whose focus has the same `x` coordinate as `site` is degenerate
/// (its parabola is a horizontal ray) and never spans anything.
pub fn intersect(
    site: Point,
    focus: Point,
    prev: Option<Point>,
    next: Option<Point>,
) -> Option<Point> {
    if focus.x == site.x {
        return None;
    }

    let directrix = site.x;
    if let Some(prev) = prev {
        if breakpoint(prev, focus, directrix).y > site.y {
            return None;
        }
    }
    if let Some(next) = next {
        if site.y > breakpoint(focus, next, directrix).y {
            return None;
        }
    }

    let x = parabola_x(focus, site.y, directrix)?;
    Some(Point::new(x, site.y))
}

/// The twice-signed area of the triangle `a`, `b`, `c`.
///
/// Positive if the triangle is counter-clockwise.
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// The circle event for three consecutive arcs, if they ever converge.
///
/// `a`, `b` and `c` are the sites of three neighboring arcs, in beachline
/// order. The middle arc only shrinks to a point if the sites turn clockwise;
/// colinear sites and counter-clockwise turns give `None`. So does a
/// circumcenter too far away to represent.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Circle> {
    if orientation(a, b, c) > 0.0 {
        return None;
    }

    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let ac_x = c.x - a.x;
    let ac_y = c.y - a.y;
    let e = ab_x * (a.x + b.x) + ab_y * (a.y + b.y);
    let f = ac_x * (a.x + c.x) + ac_y * (a.y + c.y);
    let g = 2.0 * (ab_x * (c.y - b.y) - ab_y * (c.x - b.x));

    if g == 0.0 {
        return None;
    }

    let center = Point::new((ac_y * e - ab_y * f) / g, (ab_x * f - ac_x * e) / g);
    if !center.is_finite() {
        return None;
    }

    let event_x = center.x + center.distance(&a);
    event_x.is_finite().then_some(Circle { center, event_x })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use proptest::prelude::*;

    impl Reasonable for Point {
        type Strategy = BoxedStrategy<Point>;

        fn reasonable() -> Self::Strategy {
            (f64::reasonable(), f64::reasonable())
                .prop_map(|(x, y)| Point::new(x, y))
                .boxed()
        }
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn points_sort_in_sweep_order() {
        let mut points = vec![p(1.0, 0.0), p(0.0, 5.0), p(0.0, -1.0)];
        points.sort();
        assert_eq!(points, vec![p(0.0, -1.0), p(0.0, 5.0), p(1.0, 0.0)]);
    }

    #[test]
    fn breakpoint_same_x_is_mid_height() {
        let b = breakpoint(p(0.0, 0.0), p(0.0, 2.0), 4.0);
        assert_eq!(b.y, 1.0);
        assert_eq!(b.distance(&p(0.0, 0.0)), 4.0 - b.x);
    }

    #[test]
    fn breakpoint_site_on_directrix() {
        let b = breakpoint(p(0.0, 0.0), p(2.0, 1.0), 2.0);
        assert_eq!(b.y, 1.0);
        // (0 + 1 - 4) / (2 * (0 - 2))
        assert_eq!(b.x, 0.75);

        let b = breakpoint(p(2.0, 1.0), p(0.0, 0.0), 2.0);
        assert_eq!(b.y, 1.0);
        assert_eq!(b.x, 0.75);
    }

    #[test]
    fn breakpoint_both_on_directrix_is_not_nan() {
        let b = breakpoint(p(1.0, 0.0), p(1.0, 2.0), 1.0);
        assert_eq!(b.y, 1.0);
        assert_eq!(b.x, f64::NEG_INFINITY);
    }

    #[test]
    fn intersect_lone_arc() {
        let z = intersect(p(2.0, 0.0), p(0.0, 0.0), None, None).unwrap();
        assert_eq!(z, p(1.0, 0.0));
    }

    #[test]
    fn intersect_same_x_is_degenerate() {
        assert_eq!(intersect(p(0.0, 3.0), p(0.0, 0.0), None, None), None);
    }

    #[test]
    fn intersect_respects_neighbors() {
        let focus = p(1.0, 0.0);
        let lower = p(0.0, -10.0);
        let upper = p(0.0, 10.0);
        assert!(intersect(p(2.0, 0.0), focus, Some(lower), Some(upper)).is_some());
        assert!(intersect(p(2.0, 9.0), focus, Some(lower), Some(upper)).is_none());
        assert!(intersect(p(2.0, -9.0), focus, Some(lower), Some(upper)).is_none());
    }

    #[test]
    fn circumcenter_colinear() {
        assert_eq!(circumcenter(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)), None);
        assert_eq!(circumcenter(p(0.0, 0.0), p(0.0, 1.0), p(0.0, 2.0)), None);
    }

    #[test]
    fn circumcenter_orientation() {
        // Clockwise: the middle arc is squeezed out.
        let c = circumcenter(p(0.0, 1.0), p(1.0, 0.0), p(0.0, -1.0)).unwrap();
        assert_eq!(c.center, p(0.0, 0.0));
        assert_eq!(c.event_x, 1.0);

        // Counter-clockwise: the arcs diverge.
        assert_eq!(circumcenter(p(0.0, -1.0), p(1.0, 0.0), p(0.0, 1.0)), None);
    }

    proptest! {
        #[test]
        fn breakpoint_is_equidistant(
            lower in Point::reasonable(),
            upper in Point::reasonable(),
            ahead in 1.0..1e4f64,
        ) {
            prop_assume!((lower.x - upper.x).abs() >= 1.0);
            let directrix = lower.x.max(upper.x) + ahead;
            let b = breakpoint(lower, upper, directrix);
            let d0 = b.distance(&lower);
            let d1 = b.distance(&upper);
            let scale = 1.0 + d0.max(d1);
            prop_assert!((d0 - d1).abs() <= 1e-6 * scale, "{b:?}: {d0} vs {d1}");
            prop_assert!((d0 - (directrix - b.x)).abs() <= 1e-6 * scale);
        }

        #[test]
        fn circumcenter_is_equidistant(
            a in Point::reasonable(),
            b in Point::reasonable(),
            c in Point::reasonable(),
        ) {
            if let Some(circle) = circumcenter(a, b, c) {
                let r = circle.center.distance(&a);
                let scale = 1.0 + r;
                prop_assert!((circle.center.distance(&b) - r).abs() <= 1e-6 * scale);
                prop_assert!((circle.center.distance(&c) - r).abs() <= 1e-6 * scale);
                prop_assert!(circle.event_x >= a.x.max(b.x).max(c.x) - 1e-6 * scale);
            }
        }
    }
}
