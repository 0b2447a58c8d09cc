use crate::config::VisionConfig;
use crate::geometry::{intersection, point_in_polygon, wrap_degrees, Bounds, Point, Segment};
use tracing::trace;

/// Upper bound on rays per cone, a tenth of a degree over a full circle
pub const MAX_RAYS: usize = 3600;

/// A closed visible region. `opacity` only matters for drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub opacity: f32,
}

impl Polygon {
    pub fn new(points: Vec<Point>, opacity: f32) -> Self {
        Polygon { points, opacity }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        point_in_polygon(p, &self.points)
    }
}

/// One observer's cone for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSpec {
    pub origin: Point,
    /// Degrees, 0 = east, 90 = south
    pub facing: f32,
    /// Field of view in degrees
    pub fov: f32,
    /// Distance from the origin to the start of each ray (a camera lens, a player's nose)
    pub offset: f32,
    /// Pull the apparent origin back along the facing before casting
    pub backwalk: f32,
    pub opacity: f32,
}

/// Sweep rays across the cone and build the visible region as a single ring.
///
/// Every ray runs from its source point (`offset` out from the origin) toward
/// a far point `ray_length` away, and is cut short at each edge it crosses, so
/// it ends at the nearest one. Far points are prepended and sources appended:
/// walking the result goes out along the far arc and back along the near arc.
pub fn cast_vision_cone(
    cone: &ConeSpec,
    static_edges: &[Segment],
    dynamic_edges: &[Segment],
    settings: &VisionConfig,
) -> Polygon {
    let fov = cone.fov.min(360.0);
    if fov <= 0.0 || settings.sweep_step <= 0.0 {
        return Polygon::new(Vec::new(), cone.opacity);
    }

    let start_angle = wrap_degrees(cone.facing - fov / 2.0);

    let origin = cone.origin.offset(cone.facing, -cone.backwalk);

    // A step too fine for MAX_RAYS is widened so the rays still span the cone
    let step = settings.sweep_step.max(fov / MAX_RAYS as f32);
    let rays = ((fov / step).ceil() as usize).clamp(1, MAX_RAYS);
    let mut far = Vec::with_capacity(rays);
    let mut near = Vec::with_capacity(rays);

    for i in 0..rays {
        let angle = start_angle + i as f32 * step;
        let source = origin.offset(angle, cone.offset);
        let mut ray = origin.offset(angle, settings.ray_length);

        for edge in static_edges.iter().chain(dynamic_edges) {
            if let Some(hit) = intersection(&Segment::new(source, ray), edge, settings.intersection_slack) {
                ray = hit;
            }
        }

        far.push(ray);
        near.push(source);
    }

    trace!(
        rays = near.len(),
        edges = static_edges.len() + dynamic_edges.len(),
        "cast vision cone"
    );

    far.reverse();
    far.extend(near);
    Polygon::new(far, cone.opacity)
}

/// An always-visible rectangle, such as a level's entry or exit zone
pub fn bounds_polygon(bounds: &Bounds, opacity: f32) -> Polygon {
    Polygon::new(
        vec![
            Point::new(bounds.p1.x, bounds.p1.y),
            Point::new(bounds.p2.x, bounds.p1.y),
            Point::new(bounds.p2.x, bounds.p2.y),
            Point::new(bounds.p1.x, bounds.p2.y),
        ],
        opacity,
    )
}
