pub(crate) mod component;
pub(crate) mod model;
pub(crate) mod resources;
pub(crate) mod style;
