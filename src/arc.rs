use crate::{BBox, Curve, CurveExtremities, Point, Scalar, Transform, geometry::degrees_norm};
use std::fmt;

/// Tolerance in degrees used to snap sweeps to empty or full turns
const ANGLE_EPSILON: Scalar = 1e-9;

/// Elliptical arc inscribed into an axis aligned rectangle
///
/// Angles are in degrees, `0` points along positive x-axis and angles grow
/// counter-clockwise on the screen (y-axis pointing down). Clockwise arcs
/// are traced with decreasing angle.
#[derive(Clone, Copy, PartialEq)]
pub struct EllipArc {
    /// top-left corner of the bounding rectangle
    top_left: Point,
    /// bottom-right corner of the bounding rectangle
    bottom_right: Point,
    /// angular start in degrees
    start_angle: Scalar,
    /// signed angular size in degrees, negative for clockwise arcs
    sweep: Scalar,
}

impl fmt::Debug for EllipArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arc {:?} {:?} start:{:.3?} sweep:{:.3?}",
            self.top_left, self.bottom_right, self.start_angle, self.sweep
        )
    }
}

impl EllipArc {
    /// Construct arc from the rectangle corners, start and end angles and orientation
    ///
    /// Equal start and end angles produce an empty sweep, while angles that differ
    /// by a multiple of `360` produce a full ellipse.
    pub fn new(
        top_left: impl Into<Point>,
        bottom_right: impl Into<Point>,
        start_angle: Scalar,
        end_angle: Scalar,
        clockwise: bool,
    ) -> Self {
        let delta = if clockwise {
            start_angle - end_angle
        } else {
            end_angle - start_angle
        };
        let mut sweep = degrees_norm(delta);
        if sweep < ANGLE_EPSILON || sweep > 360.0 - ANGLE_EPSILON {
            sweep = if delta.abs() < ANGLE_EPSILON { 0.0 } else { 360.0 };
        }
        Self {
            top_left: top_left.into(),
            bottom_right: bottom_right.into(),
            start_angle,
            sweep: if clockwise { -sweep } else { sweep },
        }
    }

    /// Center of the ellipse
    pub fn center(&self) -> Point {
        0.5 * (self.top_left + self.bottom_right)
    }

    /// Radii of the ellipse along x and y axes
    pub fn radii(&self) -> Point {
        let Point([w, h]) = self.bottom_right - self.top_left;
        Point::new(w.abs() / 2.0, h.abs() / 2.0)
    }

    /// Angular start in degrees
    pub fn start_angle(&self) -> Scalar {
        self.start_angle
    }

    /// Signed angular size in degrees, negative if arc is clockwise
    pub fn sweep(&self) -> Scalar {
        self.sweep
    }

    /// Whether arc is traced clockwise
    pub fn is_clockwise(&self) -> bool {
        self.sweep < 0.0
    }

    /// Point on the ellipse at provided angle in degrees
    pub fn at_angle(&self, angle: Scalar) -> Point {
        let Point([cx, cy]) = self.center();
        let Point([rx, ry]) = self.radii();
        let (sin, cos) = angle.to_radians().sin_cos();
        Point::new(cx + rx * cos, cy - ry * sin)
    }
}

impl Curve for EllipArc {
    /// Only rectangle corners are transformed, angles are preserved
    fn transform(&self, tr: Transform) -> Self {
        Self {
            top_left: tr.apply(self.top_left),
            bottom_right: tr.apply(self.bottom_right),
            ..*self
        }
    }

    fn start(&self) -> Point {
        self.at(0.0)
    }

    fn end(&self) -> Point {
        self.at(1.0)
    }

    fn at(&self, t: Scalar) -> Point {
        self.at_angle(self.start_angle + t * self.sweep)
    }

    /// Parameters at which arc crosses one of the ellipse axes
    fn extremities(&self) -> CurveExtremities {
        let mut result = CurveExtremities::new();
        let sweep = self.sweep.abs();
        if sweep < ANGLE_EPSILON {
            return result;
        }
        for axis in [0.0, 90.0, 180.0, 270.0] {
            // angular distance from the start to the axis along the direction of the arc
            let offset = degrees_norm((axis - self.start_angle) * self.sweep.signum());
            if offset <= sweep {
                result.push(offset / sweep);
            }
        }
        result
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let bbox = BBox::new(self.start(), self.end()).union_opt(init);
        self.extremities()
            .fold(bbox, |bbox, t| bbox.extend(self.at(t)))
    }
}
