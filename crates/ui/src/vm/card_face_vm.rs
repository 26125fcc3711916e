use std::time::Duration;

/// Length of the bookmark pulse after a save.
pub const SAVE_PULSE: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookmarkAction {
    Save,
    Unsave,
}

/// The card a face belongs to: which session run, and which position in it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardSlot {
    pub run: u64,
    pub position: usize,
}

/// Flip and bookmark state of the card on screen.
///
/// State belongs to a `CardSlot`, never to the card text, so two identical
/// cards at different positions (or in a later session) each start face down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardFaceVm {
    slot: CardSlot,
    flipped: bool,
    just_saved: bool,
}

impl CardFaceVm {
    #[must_use]
    pub fn new(slot: CardSlot) -> Self {
        Self {
            slot,
            flipped: false,
            just_saved: false,
        }
    }

    fn show(&mut self, slot: CardSlot) {
        if self.slot != slot {
            *self = Self::new(slot);
        }
    }

    #[must_use]
    pub fn flipped(&self, slot: CardSlot) -> bool {
        self.slot == slot && self.flipped
    }

    #[must_use]
    pub fn just_saved(&self, slot: CardSlot) -> bool {
        self.slot == slot && self.just_saved
    }

    pub fn reveal(&mut self, slot: CardSlot) {
        self.show(slot);
        self.flipped = !self.flipped;
    }

    /// Returns `false` while the answer is still hidden.
    pub fn advance(&mut self, slot: CardSlot) -> bool {
        self.show(slot);
        if !self.flipped {
            return false;
        }
        self.flipped = false;
        true
    }

    pub fn bookmark(&mut self, slot: CardSlot, already_saved: bool) -> BookmarkAction {
        self.show(slot);
        if already_saved {
            BookmarkAction::Unsave
        } else {
            self.just_saved = true;
            BookmarkAction::Save
        }
    }

    /// Ends the pulse started for `slot`; a newer card is left alone.
    pub fn end_save_pulse(&mut self, slot: CardSlot) {
        if self.slot == slot {
            self.just_saved = false;
        }
    }
}

#[must_use]
pub fn bookmark_label(already_saved: bool) -> &'static str {
    if already_saved { "Unsave" } else { "Save" }
}
