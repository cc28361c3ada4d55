//! Mutable 2D vector path that records drawing commands.
//!
//! Main features:
//!  - Move, line, quadratic and cubic bezier, elliptical arc and close commands
//!  - Tight bounding box, cached until the next mutation
//!  - Rotation and affine transformation producing new paths
//!  - Slot for a renderer specific realization of the path
//!  - Ellipse, rectangle and rounded rectangle builders
//!
#![deny(warnings)]

mod arc;
mod curve;
mod error;
mod geometry;
mod native;
mod path;
mod shapes;
mod utils;

pub use arc::EllipArc;
pub use curve::{Cubic, Curve, CurveExtremities, Line, Quad, Segment};
pub use error::Error;
pub use geometry::{BBox, EPSILON, PI, Point, Scalar, Transform, scalar_fmt};
pub use native::{NativePath, NativeSlot};
pub use path::{Path, PathCmd, PathOperation, PathSegmentIter};
pub use shapes::ELLIPSE_HANDLE_RATIO;
use utils::{ArrayIter, clamp, quadratic_solve};
