use super::{Rect, Vec2};

/// 2×3 affine transform.
///
/// Maps a point as:
///
/// ```text
///   x' = a·x + c·y + tx
///   y' = b·x + d·y + ty
/// ```
///
/// Composition order matters. [`then`](Self::then) appends a transform (it is
/// applied after `self`). The builder helpers [`rotate`](Self::rotate),
/// [`scale`](Self::scale) and [`translate`](Self::translate) prepend: the new
/// operation is applied to points *before* `self`, which is how transforms are
/// concatenated onto a current transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Counter-clockwise rotation by `angle` radians (y-up space).
    ///
    /// Components within `f32::EPSILON` of zero are snapped so quarter turns
    /// produce exact matrices.
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let snap = |v: f32| if v.abs() < f32::EPSILON { 0.0 } else { v };
        let (sin, cos) = (snap(sin), snap(cos));
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    #[inline]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(self, next: Affine) -> Affine {
        Affine {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            tx: self.tx * next.a + self.ty * next.c + next.tx,
            ty: self.tx * next.b + self.ty * next.d + next.ty,
        }
    }

    /// Prepends a rotation.
    #[inline]
    pub fn rotate(self, angle: f32) -> Affine {
        Affine::rotation(angle).then(self)
    }

    /// Prepends a scale.
    #[inline]
    pub fn scale(self, sx: f32, sy: f32) -> Affine {
        Affine::scaling(sx, sy).then(self)
    }

    /// Prepends a translation.
    #[inline]
    pub fn translate(self, tx: f32, ty: f32) -> Affine {
        Affine::translation(tx, ty).then(self)
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Bounding box of the four transformed corners of `rect`.
    pub fn apply_rect(self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|p| self.apply(p));
        Rect::bounding(&corners)
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Inverse transform, or `None` for singular matrices.
    pub fn invert(self) -> Option<Affine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let inv = 1.0 / det;
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        Some(Affine {
            a,
            b,
            c,
            d,
            tx: -(self.tx * a + self.ty * c),
            ty: -(self.tx * b + self.ty * d),
        })
    }

    pub fn approx_eq(self, other: Affine, tolerance: f32) -> bool {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.tx - other.tx,
            self.ty - other.ty,
        ]
        .iter()
        .all(|delta| delta.abs() <= tolerance)
    }
}
