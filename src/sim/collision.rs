//! Bounding-box collision against the spider's interaction zone
//!
//! Falling objects are tested against a single fixed band near the bottom of
//! the field, centered horizontally on the spider's lane. Object boxes start
//! at the object's x (they are not centered the way they are drawn).

use super::state::FallingObject;

/// Axis-aligned box with half-open extents `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x,
            max_x: min_x + width,
            min_y,
            max_y: min_y + height,
        }
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// The region where droplets hit and flies get collected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionZone {
    bounds: Aabb,
}

impl InteractionZone {
    /// Zone for a spider at `spider_x`, spanning `[top, bottom)` vertically
    pub fn new(spider_x: f32, spider_width: f32, top: f32, bottom: f32) -> Self {
        let half = spider_width / 2.0;
        Self {
            bounds: Aabb {
                min_x: spider_x - half,
                max_x: spider_x + half,
                min_y: top,
                max_y: bottom,
            },
        }
    }

    /// Whether a square object of `width` overlaps the zone
    #[inline]
    pub fn contains(&self, object: &FallingObject, width: f32) -> bool {
        Aabb::new(object.x, object.y, width, width).overlaps(&self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference layout: spider in the middle lane (x=300, width 40), field 600 high
    fn zone() -> InteractionZone {
        InteractionZone::new(300.0, 40.0, 500.0, 550.0)
    }

    #[test]
    fn test_object_in_band_on_spider_lane_hits() {
        assert!(zone().contains(&FallingObject::at(300.0, 510.0), 30.0));
    }

    #[test]
    fn test_vertical_band_edges() {
        let zone = zone();
        // Bottom edge sits at y + 30 > 500
        assert!(!zone.contains(&FallingObject::at(300.0, 470.0), 30.0));
        assert!(zone.contains(&FallingObject::at(300.0, 471.0), 30.0));
        // Top edge must be < 550
        assert!(zone.contains(&FallingObject::at(300.0, 549.0), 30.0));
        assert!(!zone.contains(&FallingObject::at(300.0, 550.0), 30.0));
    }

    #[test]
    fn test_adjacent_lane_misses() {
        let zone = zone();
        assert!(!zone.contains(&FallingObject::at(200.0, 520.0), 30.0));
        assert!(!zone.contains(&FallingObject::at(400.0, 520.0), 30.0));
    }

    #[test]
    fn test_box_extends_right_from_x() {
        let zone = zone();
        // Zone spans x in (280, 320); box [x, x+30)
        assert!(zone.contains(&FallingObject::at(251.0, 520.0), 30.0));
        assert!(!zone.contains(&FallingObject::at(250.0, 520.0), 30.0));
        assert!(zone.contains(&FallingObject::at(319.0, 520.0), 30.0));
        assert!(!zone.contains(&FallingObject::at(320.0, 520.0), 30.0));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Aabb::new(9.5, 9.5, 1.0, 1.0)));
    }
}
