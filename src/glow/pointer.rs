#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn lerp(&self, to: Point, t: f32) -> Point {
        Point::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

/// Element bounds in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Center in the rectangle's own coordinates.
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Pointer position relative to the element's top-left corner.
pub fn relative_offset(pointer: Point, rect: Rect) -> Point {
    Point::new(pointer.x - rect.x, pointer.y - rect.y)
}

/// Brightness of a grid dot `distance` away from the spotlight.
pub fn falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_relative_to_top_left() {
        let rect = Rect::new(100.0, 50.0, 300.0, 200.0);
        assert_eq!(relative_offset(Point::new(130.0, 70.0), rect), Point::new(30.0, 20.0));
        assert_eq!(relative_offset(Point::new(90.0, 40.0), rect), Point::new(-10.0, -10.0));
    }

    #[test]
    fn contains_includes_edges() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(10.0, 0.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn falloff_fades_to_zero_at_radius() {
        assert_eq!(falloff(0.0, 300.0), 1.0);
        assert_eq!(falloff(150.0, 300.0), 0.5);
        assert_eq!(falloff(450.0, 300.0), 0.0);
        assert_eq!(falloff(10.0, 0.0), 0.0);
    }
}
