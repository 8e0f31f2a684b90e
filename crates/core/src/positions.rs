//! Position and rectangle types for level objects

/// Screen and tile dimensions used to place grid cells in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Edge length of one grid cell in pixels
    pub tile_size: i32,
    /// Viewport width in pixels
    pub screen_width: i32,
    /// Viewport height in pixels
    pub screen_height: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            tile_size: 16,
            screen_width: 1200,
            screen_height: 600,
        }
    }
}

impl Geometry {
    pub const fn new(tile_size: i32, screen_width: i32, screen_height: i32) -> Self {
        Self { tile_size, screen_width, screen_height }
    }

    /// Top-left world position of a grid cell.
    ///
    /// Grid y grows upward from the bottom of the screen while world y grows
    /// downward, so row 0 occupies the last `tile_size` pixels of the screen.
    pub const fn cell_to_world(&self, cell: GridPosition) -> WorldPosition {
        WorldPosition {
            x: cell.x * self.tile_size,
            y: self.screen_height - (cell.y + 1) * self.tile_size,
        }
    }

    /// Rectangle for a zone given in grid units.
    ///
    /// Unlike [`Geometry::cell_to_world`] the y edge is not offset by one row.
    pub const fn zone_rect(&self, x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect {
            x: x * self.tile_size,
            y: self.screen_height - y * self.tile_size,
            w: w * self.tile_size,
            h: h * self.tile_size,
        }
    }

    /// Left scroll boundary (a quarter of the screen width)
    pub const fn scroll_left(&self) -> i32 {
        self.screen_width / 4
    }

    /// Right scroll boundary (three quarters of the screen width)
    pub const fn scroll_right(&self) -> i32 {
        3 * self.screen_width / 4
    }
}

/// Grid cell coordinates as stored in level files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer world position in pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WorldPosition {
    pub x: i32,
    pub y: i32,
}

impl WorldPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same position moved horizontally by `dx`
    pub const fn shifted(self, dx: i32) -> Self {
        Self { x: self.x.saturating_add(dx), y: self.y }
    }
}

/// Sub-pixel position (for particles)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPosition {
    pub x: f32,
    pub y: f32,
}

impl PixelPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at `pos` with the given size
    pub const fn at(pos: WorldPosition, w: i32, h: i32) -> Self {
        Self { x: pos.x, y: pos.y, w, h }
    }

    pub const fn top_left(&self) -> WorldPosition {
        WorldPosition { x: self.x, y: self.y }
    }

    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Move horizontally so that the center lands on `cx`
    pub fn set_center_x(&mut self, cx: i32) {
        self.x = cx - self.w / 2;
    }

    /// Same rectangle moved horizontally by `dx`, saturating at the `i32` range
    pub const fn translated_x(self, dx: i32) -> Self {
        Self { x: self.x.saturating_add(dx), ..self }
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether the two rectangles overlap.
    ///
    /// Edges that only touch do not count, and degenerate rectangles never
    /// intersect anything. Far edges are computed in `i64`, so rectangles
    /// reaching past `i32::MAX` compare correctly.
    pub const fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (ax, ay, aw, ah) = (self.x as i64, self.y as i64, self.w as i64, self.h as i64);
        let (bx, by, bw, bh) = (other.x as i64, other.y as i64, other.w as i64, other.h as i64);
        ax < bx + bw && ay < by + bh && ax + aw > bx && ay + ah > by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_world_conversion() {
        let geometry = Geometry::new(16, 1200, 600);
        let pos = geometry.cell_to_world(GridPosition::new(2, 3));
        assert_eq!(pos, WorldPosition::new(32, 536));
    }

    #[test]
    fn test_bottom_row_sits_on_screen_edge() {
        let geometry = Geometry::new(16, 1200, 600);
        let pos = geometry.cell_to_world(GridPosition::new(0, 0));
        assert_eq!(pos.y + geometry.tile_size, geometry.screen_height);
    }

    #[test]
    fn test_zone_rect() {
        let geometry = Geometry::new(16, 1200, 600);
        let rect = geometry.zone_rect(1, 2, 3, 4);
        assert_eq!(rect, Rect::new(16, 568, 48, 64));
    }

    #[test]
    fn test_scroll_boundaries() {
        let geometry = Geometry::new(16, 800, 600);
        assert_eq!(geometry.scroll_left(), 200);
        assert_eq!(geometry.scroll_right(), 600);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(a.intersects(&Rect::new(2, 2, 2, 2)));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 10, 5, 5)));
        // Degenerate
        assert!(!a.intersects(&Rect::new(1, 1, 0, 5)));
        assert!(!a.intersects(&Rect::new(1, 1, -16, 5)));
    }

    #[test]
    fn test_intersection_near_i32_max() {
        let far = Rect::new(i32::MAX - 16, 0, i32::MAX, 16);
        assert!(far.intersects(&Rect::new(i32::MAX - 8, 0, 8, 8)));
        assert!(!far.intersects(&Rect::new(0, 0, 16, 16)));
        assert!(Rect::new(i32::MAX - 4, 0, 16, 16).intersects(&far));
    }

    #[test]
    fn test_translation_saturates() {
        let rect = Rect::new(i32::MAX - 10, 0, 16, 16);
        assert_eq!(rect.translated_x(100).x, i32::MAX);
        assert_eq!(Rect::new(i32::MIN + 5, 0, 1, 1).translated_x(-10).x, i32::MIN);
        assert_eq!(WorldPosition::new(i32::MAX, 3).shifted(1), WorldPosition::new(i32::MAX, 3));
    }

    #[test]
    fn test_center_x() {
        let mut rect = Rect::new(10, 0, 20, 40);
        assert_eq!(rect.center_x(), 20);
        rect.set_center_x(100);
        assert_eq!(rect.x, 90);
        assert_eq!(rect.center_x(), 100);
    }
}
