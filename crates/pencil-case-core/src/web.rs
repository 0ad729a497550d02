//! Browser adapters, enabled with the `web` feature.
//!
//! The page crate hands DOM events to these helpers instead of reaching into
//! the core types itself.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

use crate::geometry::SurfaceRect;

impl From<&web_sys::DomRect> for SurfaceRect {
    #[allow(clippy::cast_possible_truncation)]
    fn from(rect: &web_sys::DomRect) -> Self {
        Self::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }
}

/// Current bounding box of the surface element.
pub fn surface_rect(element: &web_sys::Element) -> SurfaceRect {
    SurfaceRect::from(&element.get_bounding_client_rect())
}

/// Client-space pointer position of a mouse event.
#[allow(clippy::cast_precision_loss)]
pub fn pointer_position(event: &web_sys::MouseEvent) -> (f32, f32) {
    (event.client_x() as f32, event.client_y() as f32)
}

/// Installs the browser console subscriber.
///
/// `filter` uses `EnvFilter` syntax, e.g. `"info,pencil_case_core=debug"`.
pub fn init_tracing(filter: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new(filter));

    tracing_subscriber::registry().with(fmt_layer).init();
}
