use super::Vec2;

/// Axis-aligned rectangle (origin is the minimum corner).
///
/// Width and height are expected to be non-negative. Zero-area rectangles are
/// legal; the content-fit operations turn them into zero-size results instead
/// of failing.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Smallest rectangle containing every point in `points`.
    ///
    /// Returns the default (zero) rect for an empty slice.
    pub fn bounding(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Rect::default();
        };

        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }

        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.size.x * 0.5,
            self.origin.y + self.size.y * 0.5,
        )
    }

    /// The four corners, counter-clockwise from the origin.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// True when `other` lies entirely inside `self`, allowing `tolerance` of slack
    /// on every edge.
    pub fn covers(self, other: Rect, tolerance: f32) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.min().x <= b.min().x + tolerance
            && a.min().y <= b.min().y + tolerance
            && a.max().x + tolerance >= b.max().x
            && a.max().y + tolerance >= b.max().y
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    pub fn approx_eq(self, other: Rect, tolerance: f32) -> bool {
        self.origin.approx_eq(other.origin, tolerance) && self.size.approx_eq(other.size, tolerance)
    }

    /// Scales `self` uniformly so it fits entirely inside `target`, centered on
    /// `target`'s center.
    ///
    /// The width-driven scale is tried first; it is replaced by the
    /// height-driven scale only when it would overflow `target` vertically.
    /// A degenerate `self` yields a zero-size rect at `target.center()`.
    pub fn aspect_fit(self, target: Rect) -> Rect {
        if self.is_empty() {
            return Rect::from_origin_size(target.center(), Vec2::zero());
        }

        let scale = {
            let scale = target.width() / self.width();
            if self.height() * scale <= target.height() {
                scale
            } else {
                target.height() / self.height()
            }
        };

        let size = self.size * scale;
        let center = target.center();
        Rect::from_origin_size(center - size * 0.5, size)
    }

    /// Scales `self` uniformly so it covers all of `target`, centered on the
    /// overflowing axis. The result may extend past `target` on one axis.
    ///
    /// A degenerate `self` is treated like [`aspect_fit`](Self::aspect_fit):
    /// zero-size output at `target.center()`.
    pub fn aspect_fill(self, target: Rect) -> Rect {
        if self.is_empty() {
            return self.aspect_fit(target);
        }

        let from_ratio = self.width() / self.height();
        let to_ratio = target.width() / target.height();

        let mut fill = target;
        if from_ratio > to_ratio {
            fill.size.x = target.height() * from_ratio;
            fill.origin.x += (target.width() - fill.size.x) * 0.5;
        } else {
            fill.size.y = target.width() / from_ratio;
            fill.origin.y += (target.height() - fill.size.y) * 0.5;
        }
        fill
    }
}
