mod document;
pub(crate) mod expect;
mod info;
mod step;

pub use document::SequenceDocument;
pub use expect::{status_matches, StatusExpectation};
pub use info::Info;
pub use step::{Method, StepDef};
