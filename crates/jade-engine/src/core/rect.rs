use glam::IVec2;

/// Axis-aligned integer rectangle: top-left position plus size.
/// The engine works in pixel coordinates, Y down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub position: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    pub fn from_pos_size(position: IVec2, size: IVec2) -> Self {
        Self { position, size }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn right(&self) -> i32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> IVec2 {
        self.position + self.size / 2
    }

    /// Whether a point lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x < self.right()
            && point.y < self.bottom()
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x().max(other.x());
        let y0 = self.y().max(other.y());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// Translate by an offset.
    pub fn offset(&self, by: IVec2) -> Rect {
        Rect::from_pos_size(self.position + by, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_edge_exclusive() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(IVec2::new(10, 10)));
        assert!(r.contains(IVec2::new(29, 29)));
        assert!(!r.contains(IVec2::new(30, 10)));
        assert!(!r.contains(IVec2::new(10, 30)));
    }

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let i = a.intersect(&b).unwrap();
        assert_eq!(i, Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 0, 10, 10);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn center_of_odd_rect() {
        let r = Rect::new(0, 0, 11, 11);
        assert_eq!(r.center(), IVec2::new(5, 5));
    }
}
