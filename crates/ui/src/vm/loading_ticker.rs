use std::time::Duration;

pub const LOADING_MESSAGES: [&str; 6] = [
    "Analyzing document...",
    "Crafting insightful questions...",
    "Generating comprehensive answers...",
    "Assembling your personalized quiz...",
    "Almost ready! Just a few more seconds...",
    "Optimizing for maximum learning...",
];

pub const TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Progress text cycled while a quiz is being generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingTicker {
    index: usize,
}

impl LoadingTicker {
    #[must_use]
    pub fn message(self) -> &'static str {
        LOADING_MESSAGES[self.index % LOADING_MESSAGES.len()]
    }

    pub fn tick(&mut self) {
        self.index = (self.index + 1) % LOADING_MESSAGES.len();
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
