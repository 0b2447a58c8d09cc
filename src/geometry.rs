use serde::{Deserialize, Serialize};

/// A point in continuous world coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Point `distance` units away from this one, heading `degrees`
    pub fn offset(&self, degrees: f32, distance: f32) -> Point {
        let rad = to_radians(degrees);
        Point::new(self.x + rad.cos() * distance, self.y + rad.sin() * distance)
    }
}

/// Directed segment from `p1` to `p2`.
///
/// Occlusion edges carry a winding: walking from `p1` to `p2`, floor lies on
/// the left (`side_of > 0`) and wall lies on the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Segment { p1, p2 }
    }

    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn length(&self) -> f32 {
        distance(self.p1, self.p2)
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    pub fn reversed(&self) -> Segment {
        Segment::new(self.p2, self.p1)
    }

    /// Cross product of the segment direction with `p - p1`.
    /// Positive on the left (floor) side, negative on the right (wall) side.
    pub fn side_of(&self, p: Point) -> f32 {
        let dx = self.p2.x - self.p1.x;
        let dy = self.p2.y - self.p1.y;
        dx * (p.y - self.p1.y) - dy * (p.x - self.p1.x)
    }

    /// Unit normal pointing to the left (floor) side
    pub fn left_normal(&self) -> Point {
        let len = self.length();
        if len == 0.0 {
            return Point::default();
        }
        let dx = (self.p2.x - self.p1.x) / len;
        let dy = (self.p2.y - self.p1.y) / len;
        Point::new(-dy, dx)
    }

    /// Axis-aligned bounding box of the segment
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.p1, self.p2)
    }
}

/// Axis-aligned rectangle given by two opposite corners in any order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub p1: Point,
    pub p2: Point,
}

impl Bounds {
    pub fn new(p1: Point, p2: Point) -> Self {
        Bounds { p1, p2 }
    }

    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Bounds::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn center(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    /// (min_x, min_y, max_x, max_y)
    pub fn normalized(&self) -> (f32, f32, f32, f32) {
        (
            self.p1.x.min(self.p2.x),
            self.p1.y.min(self.p2.y),
            self.p1.x.max(self.p2.x),
            self.p1.y.max(self.p2.y),
        )
    }
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI * 2.0 / 360.0
}

/// Radians to degrees, truncated to a tenth of a degree
pub fn to_degrees(radians: f32) -> f32 {
    (radians.to_degrees() * 10.0).floor() / 10.0
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Heading in degrees from `from` towards `to`
pub fn angle_between(from: Point, to: Point) -> f32 {
    to_degrees((to.y - from.y).atan2(to.x - from.x))
}

pub fn distance(p1: Point, p2: Point) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest distance from `p` to any point on `segment`
pub fn point_segment_distance(p: Point, segment: &Segment) -> f32 {
    let dx = segment.p2.x - segment.p1.x;
    let dy = segment.p2.y - segment.p1.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(p, segment.p1);
    }
    let t = (((p.x - segment.p1.x) * dx + (p.y - segment.p1.y) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(segment.p1.x + t * dx, segment.p1.y + t * dy))
}

/// Rectangle containment, widened by `fudge` on every side
pub fn point_in_bounds(p: Point, bounds: &Bounds, fudge: f32) -> bool {
    let (min_x, min_y, max_x, max_y) = bounds.normalized();
    p.x >= min_x - fudge && p.x <= max_x + fudge && p.y >= min_y - fudge && p.y <= max_y + fudge
}

/// Intersection of two segments.
///
/// Each segment is turned into the line `Ax + By = C` and the pair is solved
/// with the determinant. Parallel or identical lines never intersect. The
/// intersection must lie within both segments' bounding boxes, widened by `slack`.
pub fn intersection(line1: &Segment, line2: &Segment, slack: f32) -> Option<Point> {
    let a1 = line1.p2.y - line1.p1.y;
    let b1 = line1.p1.x - line1.p2.x;
    let c1 = a1 * line1.p1.x + b1 * line1.p1.y;

    let a2 = line2.p2.y - line2.p1.y;
    let b2 = line2.p1.x - line2.p2.x;
    let c2 = a2 * line2.p1.x + b2 * line2.p1.y;

    let det = a1 * b2 - a2 * b1;
    if det == 0.0 {
        return None;
    }

    let p = Point::new((b2 * c1 - b1 * c2) / det, (a1 * c2 - a2 * c1) / det);
    if !p.x.is_finite() || !p.y.is_finite() {
        return None;
    }

    if point_in_bounds(p, &line1.bounds(), slack) && point_in_bounds(p, &line2.bounds(), slack) {
        Some(p)
    } else {
        None
    }
}

/// Even-odd point in polygon test
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let cross_x = pi.x + (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y);
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
