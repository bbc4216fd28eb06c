pub(crate) mod common;
pub(crate) mod document;
pub(crate) mod step;
