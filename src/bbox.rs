use num_traits::Float;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

pub trait BBoxFormat: fmt::Debug + Copy {}

/// Left-top-width-height format, contains left top corner and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ltwh;
impl BBoxFormat for Ltwh {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// Integer pixel box. The format marker only exists at compile time, on the
/// wire a box is a plain `[i32; 4]`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BBox<F: BBoxFormat>([i32; 4], PhantomData<F>);

impl<F: BBoxFormat> BBox<F> {
    #[inline(always)]
    pub fn left(&self) -> i32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> i32 {
        self.0[1]
    }
}

impl BBox<Ltwh> {
    #[inline]
    pub fn ltwh(x1: i32, x2: i32, x3: i32, x4: i32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.0[3]
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: i32, x2: i32, x3: i32, x4: i32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline]
    pub fn as_ltwh(&self) -> BBox<Ltwh> {
        self.into()
    }

    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.0[3]
    }

    /// Area in pixels, widened so that large frames can not overflow.
    #[inline]
    pub fn area(&self) -> i64 {
        (i64::from(self.right()) - i64::from(self.left()))
            * (i64::from(self.bottom()) - i64::from(self.top()))
    }

    /// Area of the overlapping rectangle, zero for disjoint or touching boxes.
    #[inline]
    pub fn intersection(&self, other: &Self) -> i64 {
        let ix1 = i64::from(self.left().max(other.left()));
        let iy1 = i64::from(self.top().max(other.top()));
        let ix2 = i64::from(self.right().min(other.right()));
        let iy2 = i64::from(self.bottom().min(other.bottom()));

        (ix2 - ix1).max(0) * (iy2 - iy1).max(0)
    }

    #[inline]
    pub fn iou(&self, other: &Self) -> f64 {
        self.iou_as(other)
    }

    /// Intersection over union computed in `T`. The denominator carries
    /// `T::epsilon()` so two degenerate boxes give `0` instead of `NaN`.
    pub fn iou_as<T: Float>(&self, other: &Self) -> T {
        let inter = self.intersection(other);
        let union = self.area() + other.area() - inter;

        let inter = T::from(inter).unwrap_or_else(T::zero);
        let union = T::from(union).unwrap_or_else(T::zero);

        inter / (union + T::epsilon())
    }
}

impl<'a> From<&'a BBox<Ltwh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Ltwh>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2] + v.0[0], v.0[3] + v.0[1]],
            PhantomData,
        )
    }
}

impl<'a> From<&'a BBox<Ltrb>> for BBox<Ltwh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2] - v.0[0], v.0[3] - v.0[1]],
            PhantomData,
        )
    }
}

impl<F: BBoxFormat> fmt::Display for BBox<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}
