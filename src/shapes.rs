//! Composite shapes built from the primitive path commands
use crate::{BBox, Path, Point, Scalar, clamp};

/// Ratio of the bezier handle length to the radius used to approximate
/// quarter of an ellipse with a cubic curve.
pub const ELLIPSE_HANDLE_RATIO: Scalar = 0.55;

impl Path {
    /// Add closed ellipse inscribed into the rectangle
    ///
    /// Ellipse is approximated with four cubic curves starting at the middle
    /// of the left side.
    pub fn append_ellipse(&mut self, rect: BBox) -> &mut Self {
        let (min, max, mid) = (rect.min(), rect.max(), rect.center());
        let offset_x = rect.width() / 2.0 * ELLIPSE_HANDLE_RATIO;
        let offset_y = rect.height() / 2.0 * ELLIPSE_HANDLE_RATIO;

        let left = Point::new(min.x(), mid.y());
        let top = Point::new(mid.x(), min.y());
        let right = Point::new(max.x(), mid.y());
        let bottom = Point::new(mid.x(), max.y());
        let dx = Point::new(offset_x, 0.0);
        let dy = Point::new(0.0, offset_y);

        self.move_to(left)
            .cubic_to(left - dy, top - dx, top)
            .cubic_to(top + dx, right - dy, right)
            .cubic_to(right + dy, bottom + dx, bottom)
            .cubic_to(bottom - dx, left + dy, left)
            .close()
    }

    /// Add closed rectangle starting at its top-left corner
    ///
    /// If `include_last` is set, explicit line back to the first corner is
    /// added before closing the sub-path.
    pub fn append_rectangle(&mut self, rect: BBox, include_last: bool) -> &mut Self {
        let (min, max) = (rect.min(), rect.max());
        self.move_to(min)
            .line_to((max.x(), min.y()))
            .line_to(max)
            .line_to((min.x(), max.y()));
        if include_last {
            self.line_to(min);
        }
        self.close()
    }

    /// Add closed rectangle with rounded corners
    ///
    /// Corner radius is clamped to half of the smaller side of the rectangle.
    pub fn append_rounded_rectangle(
        &mut self,
        rect: BBox,
        corner_radius: Scalar,
        include_last: bool,
    ) -> &mut Self {
        let radius = clamp(
            corner_radius,
            0.0,
            rect.width().min(rect.height()) / 2.0,
        );
        let (Point([lx, ly]), Point([hx, hy])) = (rect.min(), rect.max());
        let handle = radius * ELLIPSE_HANDLE_RATIO;
        let corner = radius - handle;

        self.move_to((lx, ly + radius))
            .cubic_to((lx, ly + corner), (lx + corner, ly), (lx + radius, ly))
            .line_to((hx - radius, ly))
            .cubic_to((hx - corner, ly), (hx, ly + corner), (hx, ly + radius))
            .line_to((hx, hy - radius))
            .cubic_to((hx, hy - corner), (hx - corner, hy), (hx - radius, hy))
            .line_to((lx + radius, hy))
            .cubic_to((lx + corner, hy), (lx, hy - corner), (lx, hy - radius));
        if include_last {
            self.line_to((lx, ly + radius));
        }
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, PathOperation, assert_approx_eq};

    #[test]
    fn test_rectangle() -> Result<(), Error> {
        let mut path = Path::new();
        path.append_rectangle(BBox::from_rect(3.0, 4.0, 10.0, 20.0), false);
        assert_eq!(path.bounds()?, BBox::from_rect(3.0, 4.0, 10.0, 20.0));
        assert_eq!(path.operations_count(), 5);
        assert_eq!(path.points_count(), 4);
        assert!(path.is_closed());

        let mut path = Path::new();
        path.append_rectangle(BBox::from_rect(3.0, 4.0, 10.0, 20.0), true);
        assert_eq!(path.operations_count(), 6);
        assert_eq!(path.points_count(), 5);
        assert_eq!(path.first_point(), path.last_point());
        assert_eq!(path.operation(4)?, PathOperation::Line);
        assert_eq!(path.operation(5)?, PathOperation::Close);
        Ok(())
    }

    #[test]
    fn test_ellipse() -> Result<(), Error> {
        let rect = BBox::from_rect(-5.0, 2.0, 30.0, 12.0);
        let mut path = Path::new();
        path.append_ellipse(rect);
        assert!(path.bounds()?.is_close_to_eps(rect, 1e-9));
        assert_eq!(path.operations_count(), 6);
        assert_eq!(path.points_count(), 13);
        assert!(path.is_closed());
        assert_eq!(path.point(0)?, Point::new(-5.0, 8.0));
        assert_eq!(path.last_point(), Some(Point::new(-5.0, 8.0)));

        // approximation is close to an actual ellipse at 45 degrees
        let segment = path.segments().next().expect("ellipse is empty")?;
        let center = rect.center();
        let p = crate::Curve::at(&segment, 0.5) - center;
        let radius = ((p.x() / 15.0).powi(2) + (p.y() / 6.0).powi(2)).sqrt();
        assert_approx_eq!(radius, 1.0, 0.01);
        Ok(())
    }

    #[test]
    fn test_rounded_rectangle() -> Result<(), Error> {
        let rect = BBox::from_rect(0.0, 0.0, 40.0, 20.0);
        let mut path = Path::new();
        path.append_rounded_rectangle(rect, 5.0, false);
        assert!(path.bounds()?.is_close_to_eps(rect, 1e-9));
        assert_eq!(path.operations_count(), 9);
        assert_eq!(path.point(0)?, Point::new(0.0, 5.0));

        let mut path = Path::new();
        path.append_rounded_rectangle(rect, 5.0, true);
        assert_eq!(path.operations_count(), 10);
        assert_eq!(path.first_point(), path.last_point());
        Ok(())
    }

    #[test]
    fn test_rounded_rectangle_radius_clamp() -> Result<(), Error> {
        let rect = BBox::from_rect(0.0, 0.0, 40.0, 20.0);
        let mut path = Path::new();
        path.append_rounded_rectangle(rect, 100.0, false);
        // radius is clamped to half of the height
        assert_eq!(path.point(0)?, Point::new(0.0, 10.0));
        assert_eq!(path.point(3)?, Point::new(10.0, 0.0));
        assert!(path.bounds()?.is_close_to_eps(rect, 1e-9));
        Ok(())
    }

    #[test]
    fn test_shapes_chain() -> Result<(), Error> {
        let mut path = Path::new();
        path.append_rectangle(BBox::from_rect(0.0, 0.0, 1.0, 1.0), false)
            .append_ellipse(BBox::from_rect(10.0, 10.0, 2.0, 2.0));
        assert_eq!(path.operations_count(), 11);
        assert!(path.bounds()?.is_close_to_eps(BBox::from_rect(0.0, 0.0, 12.0, 12.0), 1e-9));
        Ok(())
    }
}
