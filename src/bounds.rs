//! The bounding box of a diagram, and clipping segments against it.

use crate::geom::Point;

/// An axis-aligned rectangle.
///
/// While sites are being added, this tracks their exact extent. When the
/// sweep starts, a margin is added (see [`Config`](crate::Config)) and the
/// result is the box that the finished diagram gets clipped to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// The smallest `x` coordinate inside the box.
    pub x_min: f64,
    /// The largest `x` coordinate inside the box.
    pub x_max: f64,
    /// The smallest `y` coordinate inside the box.
    pub y_min: f64,
    /// The largest `y` coordinate inside the box.
    pub y_max: f64,
}

impl BoundingBox {
    /// The degenerate box containing just one point.
    pub fn around(p: Point) -> Self {
        BoundingBox {
            x_min: p.x,
            x_max: p.x,
            y_min: p.y,
            y_max: p.y,
        }
    }

    /// Grows this box, if necessary, to contain `p`.
    pub fn include(&mut self, p: Point) {
        self.x_min = self.x_min.min(p.x);
        self.x_max = self.x_max.max(p.x);
        self.y_min = self.y_min.min(p.y);
        self.y_max = self.y_max.max(p.y);
    }

    /// The horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// The vertical extent.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns a copy of this box, grown on each side.
    ///
    /// Along each axis, the margin is `(extent + bias) * ratio`. The bias keeps
    /// the box from being empty when all the sites share a coordinate.
    pub fn with_margin(&self, ratio: f64, bias: f64) -> Self {
        let dx = (self.width() + bias) * ratio;
        let dy = (self.height() + bias) * ratio;
        BoundingBox {
            x_min: self.x_min - dx,
            x_max: self.x_max + dx,
            y_min: self.y_min - dy,
            y_max: self.y_max + dy,
        }
    }

    /// Is `p` inside this box (boundary included)?
    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }

    /// Clips the segment from `p0` to `p1` to this box.
    ///
    /// Returns the part of the segment inside the box, with the same
    /// orientation, or `None` if the segment misses the box entirely (or the
    /// box is empty). This is
    /// the Liang–Barsky algorithm: each side of the box cuts the segment's
    /// parameter range `[0, 1]` from one end.
    pub fn clip(&self, p0: Point, p1: Point) -> Option<(Point, Point)> {
        if !(self.x_min <= self.x_max && self.y_min <= self.y_max) {
            return None;
        }

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;

        // Each pair is (direction, distance), such that the segment is inside
        // the half-plane when `direction * t <= distance`.
        let sides = [
            (-dx, p0.x - self.x_min),
            (dx, self.x_max - p0.x),
            (-dy, p0.y - self.y_min),
            (dy, self.y_max - p0.y),
        ];

        for (dir, dist) in sides {
            if dir == 0.0 {
                // Parallel to this side.
                if dist < 0.0 {
                    return None;
                }
            } else {
                let t = dist / dir;
                if dir < 0.0 {
                    if t > t1 {
                        return None;
                    }
                    t0 = t0.max(t);
                } else {
                    if t < t0 {
                        return None;
                    }
                    t1 = t1.min(t);
                }
            }
        }

        // Far-away endpoints lose precision when interpolating, so clamp
        // the interpolated points back onto the box.
        let at = |t: f64| {
            if t == 0.0 {
                p0
            } else if t == 1.0 {
                p1
            } else {
                Point::new(
                    (p0.x + t * dx).clamp(self.x_min, self.x_max),
                    (p0.y + t * dy).clamp(self.y_min, self.y_max),
                )
            }
        };
        Some((at(t0), at(t1)))
    }

    /// Convert to a `kurbo` rectangle.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }
}
