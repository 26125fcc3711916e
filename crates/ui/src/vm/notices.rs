use std::time::Duration;

use crate::views::ViewError;

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Notice {
    text: String,
    generation: u64,
}

/// One error slot and one info slot. Setting a slot replaces its notice.
///
/// Every set hands back a generation number; a dismiss timer only clears
/// the slot while that generation is still the one on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    error: Option<Notice>,
    info: Option<Notice>,
    next_generation: u64,
}

impl Notices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|notice| notice.text.as_str())
    }

    #[must_use]
    pub fn info(&self) -> Option<&str> {
        self.info.as_ref().map(|notice| notice.text.as_str())
    }

    #[must_use]
    pub fn error_generation(&self) -> Option<u64> {
        self.error.as_ref().map(|notice| notice.generation)
    }

    #[must_use]
    pub fn info_generation(&self) -> Option<u64> {
        self.info.as_ref().map(|notice| notice.generation)
    }

    pub fn set_error(&mut self, text: impl Into<String>) -> u64 {
        let generation = self.bump();
        self.error = Some(Notice {
            text: text.into(),
            generation,
        });
        generation
    }

    pub fn set_info(&mut self, text: impl Into<String>) -> u64 {
        let generation = self.bump();
        self.info = Some(Notice {
            text: text.into(),
            generation,
        });
        generation
    }

    pub fn report(&mut self, err: ViewError) -> u64 {
        self.set_error(err.message())
    }

    /// Info that also clears whatever error was showing.
    pub fn succeed(&mut self, text: impl Into<String>) -> u64 {
        self.error = None;
        self.set_info(text)
    }

    /// Returns `true` when the slot was cleared.
    pub fn dismiss_error(&mut self, generation: u64) -> bool {
        if self.error_generation() == Some(generation) {
            self.error = None;
            true
        } else {
            false
        }
    }

    /// Returns `true` when the slot was cleared.
    pub fn dismiss_info(&mut self, generation: u64) -> bool {
        if self.info_generation() == Some(generation) {
            self.info = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.info = None;
    }

    fn bump(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }
}
