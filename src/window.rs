//! Clipping of draw requests to the panel

/// Inclusive pixel rectangle that lies entirely on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Left column
    pub x1: u16,
    /// Top row
    pub y1: u16,
    /// Right column, inclusive
    pub x2: u16,
    /// Bottom row, inclusive
    pub y2: u16,
}

impl Window {
    /// Intersect the request `(x1, y1)..=(x2, y2)` with a `width` x `height` panel.
    ///
    /// Returns `None` when nothing of the request is visible, including
    /// inverted requests (`x1 > x2` or `y1 > y2`).
    pub fn clip(x1: i32, y1: i32, x2: i32, y2: i32, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 || x1 > x2 || y1 > y2 {
            return None;
        }
        let max_x = i32::from(width) - 1;
        let max_y = i32::from(height) - 1;
        if x2 < 0 || y2 < 0 || x1 > max_x || y1 > max_y {
            return None;
        }

        // All four are within 0..=max now, so the casts cannot truncate
        Some(Window {
            x1: x1.max(0) as u16,
            y1: y1.max(0) as u16,
            x2: x2.min(max_x) as u16,
            y2: y2.min(max_y) as u16,
        })
    }

    /// Columns covered
    pub fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    /// Rows covered
    pub fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels in the window
    pub fn pixel_count(&self) -> u32 {
        u32::from(self.width()) * u32::from(self.height())
    }

    /// `SET_COLUMN_ADDRESS` parameters, start and end big endian
    pub fn column_params(&self) -> [u8; 4] {
        let [s_h, s_l] = self.x1.to_be_bytes();
        let [e_h, e_l] = self.x2.to_be_bytes();
        [s_h, s_l, e_h, e_l]
    }

    /// `SET_PAGE_ADDRESS` parameters, start and end big endian
    pub fn page_params(&self) -> [u8; 4] {
        let [s_h, s_l] = self.y1.to_be_bytes();
        let [e_h, e_l] = self.y2.to_be_bytes();
        [s_h, s_l, e_h, e_l]
    }

    /// Whether the point lies inside the window
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= i32::from(self.x1)
            && x <= i32::from(self.x2)
            && y >= i32::from(self.y1)
            && y <= i32::from(self.y2)
    }
}
