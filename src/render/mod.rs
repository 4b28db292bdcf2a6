pub(crate) mod compositor;
pub(crate) mod groups;
pub(crate) mod raster;
