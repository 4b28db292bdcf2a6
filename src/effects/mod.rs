pub(crate) mod clip;
pub(crate) mod composite;
pub(crate) mod engine;
pub(crate) mod transitions;
