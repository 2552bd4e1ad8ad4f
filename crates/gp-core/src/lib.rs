pub mod color;
pub mod geom;
pub mod surface;

pub use color::Color;
pub use geom::{Point, ellipse_cells, line_cells, rectangle_cells};
pub use surface::{PixelGrid, Surface, SurfaceError};
