mod actions;
mod components;
mod feed;
mod state;
mod view;

pub use actions::StudyActions;
pub use state::{Panel, StudyState};
pub use view::StudyView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod study_smoke;
