pub mod geom;
pub mod painter;
pub mod raster;
pub mod style;
