use crate::geometry::Point;
use crate::vision::Polygon;

/// Anything with a rectangular footprint centered on its position
pub trait EntityFootprint {
    fn center(&self) -> Point;
    /// Full width and height of the footprint
    fn size(&self) -> (f32, f32);
}

/// Every polygon visible this frame: cones plus always-visible zones.
/// The polygons are kept separate, not merged into one region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisionSet {
    polygons: Vec<Polygon>,
}

impl VisionSet {
    pub fn new() -> Self {
        VisionSet {
            polygons: Vec::new(),
        }
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// True if the point lies inside any polygon
    pub fn is_point_visible(&self, x: f32, y: f32) -> bool {
        let p = Point::new(x, y);
        self.polygons.iter().any(|polygon| polygon.contains(p))
    }

    /// True if the center or any corner of the entity is visible
    pub fn is_entity_visible<E: EntityFootprint + ?Sized>(&self, entity: &E) -> bool {
        let c = entity.center();
        let (width, height) = entity.size();
        let dx = width / 2.0;
        let dy = height / 2.0;

        [
            (c.x, c.y),
            (c.x - dx, c.y - dy),
            (c.x + dx, c.y + dy),
            (c.x - dx, c.y + dy),
            (c.x + dx, c.y - dy),
        ]
        .iter()
        .any(|&(x, y)| self.is_point_visible(x, y))
    }
}

pub fn is_point_visible(x: f32, y: f32, vision: &VisionSet) -> bool {
    vision.is_point_visible(x, y)
}

pub fn is_entity_visible<E: EntityFootprint + ?Sized>(entity: &E, vision: &VisionSet) -> bool {
    vision.is_entity_visible(entity)
}

impl FromIterator<Polygon> for VisionSet {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        VisionSet {
            polygons: iter.into_iter().collect(),
        }
    }
}
