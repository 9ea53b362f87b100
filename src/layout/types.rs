/// Largest magnitude accepted for a coordinate or size. Sums of a few such
/// values stay well inside `i64`, and every value is exact as an `f64`.
pub const MAX_COORDINATE: i64 = 1 << 53;

/// Axis-aligned integer rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i64 {
        self.x
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn top(&self) -> i64 {
        self.y
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x as f64 + self.width as f64 / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y as f64 + self.height as f64 / 2.0
    }

    /// Closed-interval test: rectangles that only touch still overlap.
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        !(self.right() < other.left() || self.left() > other.right())
    }

    /// Closed-interval test: rectangles that only touch still overlap.
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        !(self.bottom() < other.top() || self.top() > other.bottom())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Open-interval vertical overlap: shared edges do not count.
    pub fn shares_rows_with(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Smallest rectangle covering every input, or `None` for an empty input.
    pub fn bounding<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut iter = rects.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y) = (first.left(), first.top());
        let (mut max_x, mut max_y) = (first.right(), first.bottom());
        for rect in iter {
            min_x = min_x.min(rect.left());
            min_y = min_y.min(rect.top());
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}
