//! CPU raster surface with a canvas-like drawing API over `vello_cpu`.

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod paint;
pub(crate) mod surface;
pub(crate) mod text;
