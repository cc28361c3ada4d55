//! Path segments and their tight bounding boxes

use crate::{ArrayIter, BBox, EPSILON, EllipArc, Point, Scalar, Transform, quadratic_solve};
use std::fmt;

pub type CurveExtremities = ArrayIter<[Option<Scalar>; 6]>;

/// Set of operations common to all path segments.
pub trait Curve: Sized + Into<Segment> {
    /// Apply affine transformation to the curve
    fn transform(&self, tr: Transform) -> Self;

    /// Point at which curve starts
    fn start(&self) -> Point;

    /// Point at which curve ends
    fn end(&self) -> Point;

    /// Evaluate curve at parameter value `t` in (0.0..=1.0)
    fn at(&self, t: Scalar) -> Point;

    /// Find all extermities of the curve `curve'(t)_x = 0 || curve'(t)_y = 0`
    /// with `t` in (0.0..=1.0)
    fn extremities(&self) -> CurveExtremities;

    /// Extend provided `init` bounding box with the tight bounding box of the curve
    fn bbox(&self, init: Option<BBox>) -> BBox {
        let bbox = BBox::new(self.start(), self.end()).union_opt(init);
        self.extremities()
            .fold(bbox, |bbox, t| bbox.extend(self.at(t)))
    }
}

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

/// Line segment curve
#[derive(Clone, Copy, PartialEq)]
pub struct Line(pub [Point; 2]);

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Start and end points of the line
    pub fn points(&self) -> [Point; 2] {
        self.0
    }
}

impl Curve for Line {
    fn transform(&self, tr: Transform) -> Self {
        let Line([p0, p1]) = self;
        Self([tr.apply(*p0), tr.apply(*p1)])
    }

    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[1]
    }

    fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1]) = *self;
        (1.0 - t) * p0 + t * p1
    }

    fn extremities(&self) -> CurveExtremities {
        CurveExtremities::new()
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let Self([p0, p1]) = *self;
        BBox::new(p0, p1).union_opt(init)
    }
}

// -----------------------------------------------------------------------------
// Quadratic bezier curve
// -----------------------------------------------------------------------------

/// Quadratic bezier curve
///
/// Polynimial form:
/// `(1 - t) ^ 2 * p0 + 2 * (1 - t) * t * p1 + t ^ 2 * p2`
#[derive(Clone, Copy, PartialEq)]
pub struct Quad(pub [Point; 3]);

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quad([p0, p1, p2]) = self;
        write!(f, "Quad {:?} {:?} {:?}", p0, p1, p2)
    }
}

impl Quad {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into(), p2.into()])
    }

    pub fn points(&self) -> [Point; 3] {
        self.0
    }
}

impl Curve for Quad {
    fn transform(&self, tr: Transform) -> Self {
        let Quad([p0, p1, p2]) = self;
        Self([tr.apply(*p0), tr.apply(*p1), tr.apply(*p2)])
    }

    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[2]
    }

    fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1, p2]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        t_2 * p0 + 2.0 * t1 * t_1 * p1 + t2 * p2
    }

    fn extremities(&self) -> CurveExtremities {
        let mut result = CurveExtremities::new();
        let Self([p0, p1, p2]) = *self;
        // curve'(t) / 2 = a * t + b
        let Point([a0, a1]) = p2 - 2.0 * p1 + p0;
        let Point([b0, b1]) = p1 - p0;
        for (a, b) in [(a0, b0), (a1, b1)] {
            if a.abs() > EPSILON {
                let t = -b / a;
                if (0.0..=1.0).contains(&t) {
                    result.push(t)
                }
            }
        }
        result
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let Self([p0, p1, p2]) = *self;
        let bbox = BBox::new(p0, p2).union_opt(init);
        if bbox.contains(p1) {
            return bbox;
        }
        self.extremities()
            .fold(bbox, |bbox, t| bbox.extend(self.at(t)))
    }
}

// -----------------------------------------------------------------------------
// Cubic bezier curve
// -----------------------------------------------------------------------------

/// Cubic bezier curve
///
/// Polynimial form:
/// `(1 - t) ^ 3 * p0 + 3 * (1 - t) ^ 2 * t * p1 + 3 * (1 - t) * t ^ 2 * p2 + t ^ 3 * p3`
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }
}

impl Curve for Cubic {
    fn transform(&self, tr: Transform) -> Self {
        let Cubic([p0, p1, p2, p3]) = self;
        Self([tr.apply(*p0), tr.apply(*p1), tr.apply(*p2), tr.apply(*p3)])
    }

    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[3]
    }

    fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1, p2, p3]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        t_3 * p0 + 3.0 * t1 * t_2 * p1 + 3.0 * t2 * t_1 * p2 + t3 * p3
    }

    fn extremities(&self) -> CurveExtremities {
        let Self([p0, p1, p2, p3]) = *self;
        // curve'(t) / 3 = a * t ^ 2 + b * t + c
        let Point([a0, a1]) = -1.0 * p0 + 3.0 * p1 - 3.0 * p2 + p3;
        let Point([b0, b1]) = 2.0 * p0 - 4.0 * p1 + 2.0 * p2;
        let Point([c0, c1]) = p1 - p0;

        // Solve for `curve'(t)_x = 0 || curve'(t)_y = 0`
        quadratic_solve(a0, b0, c0)
            .chain(quadratic_solve(a1, b1, c1))
            .filter(|t| (0.0..=1.0).contains(t))
            .collect()
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let Self([p0, p1, p2, p3]) = *self;
        let bbox = BBox::new(p0, p3).union_opt(init);
        if bbox.contains(p1) && bbox.contains(p2) {
            return bbox;
        }
        self.extremities()
            .fold(bbox, |bbox, t| bbox.extend(self.at(t)))
    }
}

// -----------------------------------------------------------------------------
// Segment
// -----------------------------------------------------------------------------

/// Drawing segment of a path with its start point resolved
#[derive(Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Quad(Quad),
    Cubic(Cubic),
    Arc(EllipArc),
}

/// Forward call to the curve wrapped by the segment
macro_rules! segment_dispatch {
    ($segment:expr, $curve:ident => $call:expr) => {
        match $segment {
            Segment::Line($curve) => $call,
            Segment::Quad($curve) => $call,
            Segment::Cubic($curve) => $call,
            Segment::Arc($curve) => $call,
        }
    };
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        segment_dispatch!(self, curve => fmt::Debug::fmt(curve, f))
    }
}

impl Curve for Segment {
    fn transform(&self, tr: Transform) -> Self {
        segment_dispatch!(self, curve => curve.transform(tr).into())
    }

    fn start(&self) -> Point {
        segment_dispatch!(self, curve => curve.start())
    }

    fn end(&self) -> Point {
        segment_dispatch!(self, curve => curve.end())
    }

    fn at(&self, t: Scalar) -> Point {
        segment_dispatch!(self, curve => curve.at(t))
    }

    fn extremities(&self) -> CurveExtremities {
        segment_dispatch!(self, curve => curve.extremities())
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        segment_dispatch!(self, curve => curve.bbox(init))
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Quad> for Segment {
    fn from(quad: Quad) -> Self {
        Self::Quad(quad)
    }
}

impl From<Cubic> for Segment {
    fn from(cubic: Cubic) -> Self {
        Self::Cubic(cubic)
    }
}

impl From<EllipArc> for Segment {
    fn from(arc: EllipArc) -> Self {
        Self::Arc(arc)
    }
}
