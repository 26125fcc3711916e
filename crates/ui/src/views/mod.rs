mod state;
mod study;

pub use state::ViewError;
pub use study::{Panel, StudyActions, StudyState, StudyView};
