#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, p: Pos) -> bool {
        if self.is_empty() {
            return false;
        }
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn intersect(&self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// One-row strip at `row` (relative), or an empty rect when out of range.
    pub fn row(&self, row: u16) -> Rect {
        if row >= self.h {
            return Rect::new(self.x, self.y, 0, 0);
        }
        Rect::new(self.x, self.y + row, self.w, 1)
    }

    /// Split off `h` rows from the bottom: `(rest, bottom)`.
    pub fn split_bottom(&self, h: u16) -> (Rect, Rect) {
        let h = h.min(self.h);
        let top = Rect::new(self.x, self.y, self.w, self.h - h);
        let bottom = Rect::new(self.x, self.y + self.h - h, self.w, h);
        (top, bottom)
    }

    /// `w x h` rect centered in `self`, shrunk to fit.
    pub fn centered(&self, w: u16, h: u16) -> Rect {
        let w = w.min(self.w);
        let h = h.min(self.h);
        Rect::new(
            self.x + (self.w - w) / 2,
            self.y + (self.h - h) / 2,
            w,
            h,
        )
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/geom.rs"]
mod tests;
