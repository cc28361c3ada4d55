use crate::{
    ArrayIter, BBox, Cubic, Curve, EllipArc, Error, Line, NativePath, NativeSlot, Point, Quad,
    Scalar, Segment, Transform,
};
use std::{cell::Cell, fmt, ops::Index, slice};

/// Kind of the path command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOperation {
    MoveTo,
    Line,
    Quad,
    Cubic,
    Arc,
    Close,
}

impl PathOperation {
    /// Number of points consumed by the operation
    pub fn points_count(self) -> usize {
        match self {
            PathOperation::MoveTo | PathOperation::Line => 1,
            PathOperation::Quad | PathOperation::Arc => 2,
            PathOperation::Cubic => 3,
            PathOperation::Close => 0,
        }
    }
}

/// Single path command together with all of its arguments
///
/// Drawing commands (`Line`, `Quad`, `Cubic`) start at the previous point of the path.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCmd {
    /// Start new sub-path at the point
    MoveTo(Point),
    /// Line to the point
    Line(Point),
    /// Quadratic bezier curve with control point and end point
    Quad(Point, Point),
    /// Cubic bezier curve with two control points and end point
    Cubic(Point, Point, Point),
    /// Elliptical arc inscribed into rectangle, angles are in degrees
    Arc {
        top_left: Point,
        bottom_right: Point,
        start_angle: Scalar,
        end_angle: Scalar,
        clockwise: bool,
    },
    /// Close current sub-path
    Close,
}

impl fmt::Debug for PathCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCmd::MoveTo(p) => write!(f, "MoveTo {:?}", p),
            PathCmd::Line(p) => write!(f, "Line {:?}", p),
            PathCmd::Quad(p1, p2) => write!(f, "Quad {:?} {:?}", p1, p2),
            PathCmd::Cubic(p1, p2, p3) => write!(f, "Cubic {:?} {:?} {:?}", p1, p2, p3),
            PathCmd::Arc {
                top_left,
                bottom_right,
                start_angle,
                end_angle,
                clockwise,
            } => write!(
                f,
                "Arc {:?} {:?} {:?} {:?} {}",
                top_left,
                bottom_right,
                start_angle,
                end_angle,
                if *clockwise { "cw" } else { "ccw" },
            ),
            PathCmd::Close => write!(f, "Close"),
        }
    }
}

impl PathCmd {
    pub fn operation(&self) -> PathOperation {
        match self {
            PathCmd::MoveTo(_) => PathOperation::MoveTo,
            PathCmd::Line(_) => PathOperation::Line,
            PathCmd::Quad(..) => PathOperation::Quad,
            PathCmd::Cubic(..) => PathOperation::Cubic,
            PathCmd::Arc { .. } => PathOperation::Arc,
            PathCmd::Close => PathOperation::Close,
        }
    }

    /// Points consumed by the command in emission order
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        self.points_ref()
            .copied()
            .collect::<ArrayIter<[Option<Point>; 4]>>()
    }

    fn points_ref(&self) -> ArrayIter<[Option<&Point>; 4]> {
        let mut points = ArrayIter::new();
        match self {
            PathCmd::MoveTo(p) | PathCmd::Line(p) => points.push(p),
            PathCmd::Quad(p1, p2) => points.extend([p1, p2]),
            PathCmd::Cubic(p1, p2, p3) => points.extend([p1, p2, p3]),
            PathCmd::Arc {
                top_left,
                bottom_right,
                ..
            } => points.extend([top_left, bottom_right]),
            PathCmd::Close => {}
        }
        points
    }

    /// Map all points of the command, arc angles and orientation are preserved
    pub fn transform(&self, tr: Transform) -> Self {
        match *self {
            PathCmd::MoveTo(p) => PathCmd::MoveTo(tr.apply(p)),
            PathCmd::Line(p) => PathCmd::Line(tr.apply(p)),
            PathCmd::Quad(p1, p2) => PathCmd::Quad(tr.apply(p1), tr.apply(p2)),
            PathCmd::Cubic(p1, p2, p3) => {
                PathCmd::Cubic(tr.apply(p1), tr.apply(p2), tr.apply(p3))
            }
            PathCmd::Arc {
                top_left,
                bottom_right,
                start_angle,
                end_angle,
                clockwise,
            } => PathCmd::Arc {
                top_left: tr.apply(top_left),
                bottom_right: tr.apply(bottom_right),
                start_angle,
                end_angle,
                clockwise,
            },
            PathCmd::Close => PathCmd::Close,
        }
    }
}

/// Mutable log of path commands
///
/// Bounding box is computed lazily and cached until the next mutation. Path can
/// also hold a single renderer specific realization of itself (see [`NativePath`]),
/// which is released whenever path is mutated, disposed or dropped.
#[derive(Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Vec<PathCmd>", from = "Vec<PathCmd>")
)]
pub struct Path {
    cmds: Vec<PathCmd>,
    points_count: usize,
    arcs_count: usize,
    bounds: Cell<Option<BBox>>,
    native: NativeSlot,
}

impl Clone for Path {
    /// Native realization is never cloned
    fn clone(&self) -> Self {
        Self {
            cmds: self.cmds.clone(),
            points_count: self.points_count,
            arcs_count: self.arcs_count,
            bounds: self.bounds.clone(),
            native: NativeSlot::new(),
        }
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.cmds == other.cmds
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cmds.is_empty() {
            write!(f, "Empty")?;
        } else {
            for cmd in self.cmds.iter() {
                writeln!(f, "{:?}", cmd)?;
            }
        }
        Ok(())
    }
}

impl Path {
    /// Create empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create path with the sub-path started at the point
    pub fn starting_at(point: impl Into<Point>) -> Self {
        let mut path = Self::new();
        path.move_to(point);
        path
    }

    /// Path is closed if its last command is `Close`
    pub fn is_closed(&self) -> bool {
        matches!(self.cmds.last(), Some(PathCmd::Close))
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Number of points in the path
    pub fn points_count(&self) -> usize {
        self.points_count
    }

    /// Number of operations in the path
    pub fn operations_count(&self) -> usize {
        self.cmds.len()
    }

    /// Number of arc operations in the path
    pub fn arcs_count(&self) -> usize {
        self.arcs_count
    }

    /// All commands of the path
    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn operations(&self) -> impl Iterator<Item = PathOperation> + '_ {
        self.cmds.iter().map(PathCmd::operation)
    }

    /// Flat sequence of points consumed by the operations
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.cmds.iter().flat_map(PathCmd::points)
    }

    /// Flat sequence of arc angles, start and end angle for each arc
    pub fn arc_angles(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.cmds
            .iter()
            .filter_map(|cmd| match cmd {
                PathCmd::Arc {
                    start_angle,
                    end_angle,
                    ..
                } => Some([*start_angle, *end_angle]),
                _ => None,
            })
            .flatten()
    }

    /// Flat sequence of arc orientations, one for each arc
    pub fn arc_clockwise_flags(&self) -> impl Iterator<Item = bool> + '_ {
        self.cmds.iter().filter_map(|cmd| match cmd {
            PathCmd::Arc { clockwise, .. } => Some(*clockwise),
            _ => None,
        })
    }

    /// Operation at the index
    pub fn operation(&self, index: usize) -> Result<PathOperation, Error> {
        self.cmds
            .get(index)
            .map(PathCmd::operation)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.cmds.len(),
            })
    }

    /// Point at the index of the flat points sequence
    pub fn point(&self, index: usize) -> Result<Point, Error> {
        self.points().nth(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.points_count,
        })
    }

    /// Arc angle at the index of the flat arc angles sequence
    pub fn arc_angle(&self, index: usize) -> Result<Scalar, Error> {
        self.arc_angles().nth(index).ok_or(Error::IndexOutOfRange {
            index,
            len: 2 * self.arcs_count,
        })
    }

    /// Arc orientation at the index of the flat arc orientations sequence
    pub fn arc_clockwise(&self, index: usize) -> Result<bool, Error> {
        self.arc_clockwise_flags()
            .nth(index)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.arcs_count,
            })
    }

    pub fn first_point(&self) -> Option<Point> {
        self.points().next()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.cmds.iter().rev().find_map(|cmd| cmd.points().last())
    }

    /// Start new sub-path, previous sub-path is left open
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.push(PathCmd::MoveTo(p.into()))
    }

    /// Add line from the previous point, acts as `move_to` if path has no points
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        if self.points_count == 0 {
            self.push(PathCmd::MoveTo(p))
        } else {
            self.push(PathCmd::Line(p))
        }
    }

    /// Add quadratic bezier curve
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        self.push(PathCmd::Quad(p1.into(), p2.into()))
    }

    /// Add cubic bezier curve
    pub fn cubic_to(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> &mut Self {
        self.push(PathCmd::Cubic(p1.into(), p2.into(), p3.into()))
    }

    /// Add elliptical arc inscribed into rectangle with provided corners
    ///
    /// Angles are in degrees, see [`EllipArc`] for the conventions used.
    pub fn add_arc(
        &mut self,
        top_left: impl Into<Point>,
        bottom_right: impl Into<Point>,
        start_angle: Scalar,
        end_angle: Scalar,
        clockwise: bool,
    ) -> &mut Self {
        self.push(PathCmd::Arc {
            top_left: top_left.into(),
            bottom_right: bottom_right.into(),
            start_angle,
            end_angle,
            clockwise,
        })
    }

    /// Close current sub-path, does not add anything if path is already closed
    pub fn close(&mut self) -> &mut Self {
        if self.is_closed() {
            self.invalidate();
            self
        } else {
            self.push(PathCmd::Close)
        }
    }

    /// Append command using the same rules as corresponding primitive
    pub fn append(&mut self, cmd: PathCmd) -> &mut Self {
        match cmd {
            PathCmd::MoveTo(p) => self.move_to(p),
            PathCmd::Line(p) => self.line_to(p),
            PathCmd::Quad(p1, p2) => self.quad_to(p1, p2),
            PathCmd::Cubic(p1, p2, p3) => self.cubic_to(p1, p2, p3),
            PathCmd::Arc {
                top_left,
                bottom_right,
                start_angle,
                end_angle,
                clockwise,
            } => self.add_arc(top_left, bottom_right, start_angle, end_angle, clockwise),
            PathCmd::Close => self.close(),
        }
    }

    fn push(&mut self, cmd: PathCmd) -> &mut Self {
        self.invalidate();
        let op = cmd.operation();
        self.points_count += op.points_count();
        if op == PathOperation::Arc {
            self.arcs_count += 1;
        }
        self.cmds.push(cmd);
        self
    }

    /// Drop cached bounds and native realization
    fn invalidate(&mut self) {
        self.bounds.set(None);
        self.native.release();
    }

    /// Iterator over drawing segments with resolved start points
    pub fn segments(&self) -> PathSegmentIter<'_> {
        PathSegmentIter::new(self)
    }

    /// Tight bounding box of the path
    ///
    /// Fails with [`Error::EmptyBounds`] if path does not have any drawing
    /// commands, stand alone `MoveTo` points do not contribute to the bounds.
    pub fn bounds(&self) -> Result<BBox, Error> {
        if let Some(bbox) = self.bounds.get() {
            return Ok(bbox);
        }
        tracing::trace!(operations = self.cmds.len(), "[path:bounds]");
        let mut bbox = None;
        for segment in self.segments() {
            bbox = Some(segment?.bbox(bbox));
        }
        let bbox = bbox.ok_or(Error::EmptyBounds)?;
        self.bounds.set(Some(bbox));
        Ok(bbox)
    }

    /// Create new path with all points mapped by the transformation
    ///
    /// Operations, arc angles and arc orientations are copied as is.
    pub fn transform(&self, tr: Transform) -> Path {
        Path {
            cmds: self.cmds.iter().map(|cmd| cmd.transform(tr)).collect(),
            points_count: self.points_count,
            arcs_count: self.arcs_count,
            bounds: Cell::new(None),
            native: NativeSlot::new(),
        }
    }

    /// Create new path rotated by `angle` degrees around the center of its bounds
    pub fn rotate(&self, angle: Scalar) -> Result<Path, Error> {
        Ok(self.rotate_around(angle, self.bounds()?.center()))
    }

    /// Create new path rotated by `angle` degrees around the `pivot`
    ///
    /// Only arc rectangle corners are rotated, arc angles are copied as is.
    pub fn rotate_around(&self, angle: Scalar, pivot: impl Into<Point>) -> Path {
        let pivot = pivot.into();
        let _span = tracing::debug_span!("[rotate]", angle, ?pivot).entered();
        let tr = Transform::identity().rotate_around(angle.to_radians(), pivot);
        self.cmds.iter().map(|cmd| cmd.transform(tr)).collect()
    }

    /// Current native realization of the path if it has type `T`
    pub fn native<T: NativePath>(&self) -> Option<&T> {
        self.native.get()
    }

    pub fn native_mut<T: NativePath>(&mut self) -> Option<&mut T> {
        self.native.get_mut()
    }

    pub fn has_native(&self) -> bool {
        self.native.is_set()
    }

    /// Set native realization, previous one is released first
    pub fn set_native<T: NativePath>(&mut self, handle: T) {
        self.native.replace(handle)
    }

    /// Remove native realization without releasing it
    pub fn take_native<T: NativePath>(&mut self) -> Option<Box<T>> {
        self.native.take()
    }

    /// Release native realization
    pub fn dispose(&mut self) {
        self.native.release()
    }
}

impl Index<usize> for Path {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        match self.cmds.iter().flat_map(PathCmd::points_ref).nth(index) {
            Some(point) => point,
            None => panic!(
                "point index {} is out of range, length is {}",
                index, self.points_count
            ),
        }
    }
}

impl Extend<PathCmd> for Path {
    fn extend<T: IntoIterator<Item = PathCmd>>(&mut self, iter: T) {
        for cmd in iter {
            self.append(cmd);
        }
    }
}

impl FromIterator<PathCmd> for Path {
    fn from_iter<T: IntoIterator<Item = PathCmd>>(iter: T) -> Self {
        let mut path = Path::new();
        path.extend(iter);
        path
    }
}

impl From<Vec<PathCmd>> for Path {
    fn from(cmds: Vec<PathCmd>) -> Self {
        cmds.into_iter().collect()
    }
}

impl From<Path> for Vec<PathCmd> {
    fn from(path: Path) -> Self {
        path.cmds
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathCmd;
    type IntoIter = slice::Iter<'a, PathCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

/// Replays path commands, producing drawing segments
///
/// Each drawing segment starts at the previous point of the path, failing
/// with [`Error::MissingStartPoint`] if there is no such point.
pub struct PathSegmentIter<'a> {
    cmds: std::iter::Enumerate<slice::Iter<'a, PathCmd>>,
    last: Option<Point>,
}

impl<'a> PathSegmentIter<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            cmds: path.cmds.iter().enumerate(),
            last: None,
        }
    }
}

impl Iterator for PathSegmentIter<'_> {
    type Item = Result<Segment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, cmd) = self.cmds.next()?;
            let segment: Option<Segment> = match *cmd {
                PathCmd::MoveTo(p) => {
                    self.last = Some(p);
                    continue;
                }
                PathCmd::Close => continue,
                PathCmd::Line(p1) => self.last.replace(p1).map(|p0| Line([p0, p1]).into()),
                PathCmd::Quad(p1, p2) => self.last.replace(p2).map(|p0| Quad([p0, p1, p2]).into()),
                PathCmd::Cubic(p1, p2, p3) => self
                    .last
                    .replace(p3)
                    .map(|p0| Cubic([p0, p1, p2, p3]).into()),
                PathCmd::Arc {
                    top_left,
                    bottom_right,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    self.last = Some(bottom_right);
                    let arc =
                        EllipArc::new(top_left, bottom_right, start_angle, end_angle, clockwise);
                    Some(arc.into())
                }
            };
            return Some(segment.ok_or(Error::MissingStartPoint { index }));
        }
    }
}
