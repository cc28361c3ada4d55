//! Build a few shapes, print their bounds and rotated copies
//!
//! Run with `RUST_LOG=trace` to see bounds computations and rotation spans.
use pathf::*;
use std::env;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

/// Native realization that only reports when it is released
struct LoggingHandle(&'static str);

impl NativePath for LoggingHandle {
    fn release(&mut self) {
        tracing::info!(name = self.0, "[handle:released]");
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let angle: Scalar = match env::args().nth(1) {
        Some(angle) => angle.parse()?,
        None => 45.0,
    };
    let rect = BBox::from_rect(10.0, 10.0, 200.0, 100.0);

    let mut shapes = Vec::new();
    let mut path = Path::new();
    path.append_ellipse(rect);
    shapes.push(("ellipse", path));

    let mut path = Path::new();
    path.append_rectangle(rect, false);
    shapes.push(("rectangle", path));

    let mut path = Path::new();
    path.append_rounded_rectangle(rect, 20.0, true);
    shapes.push(("rounded rectangle", path));

    let mut path = Path::new();
    path.move_to((10.0, 60.0))
        .line_to((60.0, 10.0))
        .add_arc((60.0, 10.0), (160.0, 110.0), 180.0, 0.0, true)
        .quad_to((210.0, 110.0), (110.0, 110.0))
        .close();
    shapes.push(("arc", path));

    for (name, mut path) in shapes {
        path.set_native(LoggingHandle(name));
        let bounds = path.bounds()?;
        let rotated = path.rotate(angle)?;
        println!("{name}: {bounds:?}");
        println!("{name} rotated by {angle}: {:?}", rotated.bounds()?);
        print!("{:?}", rotated);

        // any mutation releases native realization
        path.close();
        if !path.has_native() {
            tracing::debug!(name, "[handle:invalidated]");
        }
    }

    Ok(())
}
