//! Keyboard shortcuts for the study screen.
//!
//! Holding a key makes the OS send repeated press events. Each logical action keeps a
//! "pressed" latch that is set on the first press and cleared on key release, so one
//! physical key press moves the session exactly one step.

use egui::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyAction {
    Advance,
    Retreat,
}

impl StudyAction {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowRight | Key::Space | Key::Enter => Some(StudyAction::Advance),
            Key::ArrowLeft | Key::Backspace => Some(StudyAction::Retreat),
            _ => None,
        }
    }
}

/// True for key events that drive the study session.
pub fn is_shortcut(event: &egui::Event) -> bool {
    matches!(event, egui::Event::Key { key, .. } if StudyAction::from_key(*key).is_some())
}

#[derive(Debug, Default)]
pub struct KeyLatch {
    advance_held: bool,
    retreat_held: bool,
}

impl KeyLatch {
    fn slot(&mut self, action: StudyAction) -> &mut bool {
        match action {
            StudyAction::Advance => &mut self.advance_held,
            StudyAction::Retreat => &mut self.retreat_held,
        }
    }

    /// Returns true if this press should trigger the action.
    pub fn press(&mut self, action: StudyAction) -> bool {
        let held = self.slot(action);
        if *held {
            return false;
        }
        *held = true;
        true
    }

    pub fn release(&mut self, action: StudyAction) {
        *self.slot(action) = false;
    }

    /// Turns raw key events into actions to run, one per physical press.
    pub fn actions_for(&mut self, events: &[egui::Event]) -> Vec<StudyAction> {
        let mut fired = Vec::new();
        for event in events {
            if let egui::Event::Key { key, pressed, .. } = event {
                let Some(action) = StudyAction::from_key(*key) else {
                    continue;
                };
                if !*pressed {
                    self.release(action);
                } else if self.press(action) {
                    fired.push(action);
                }
            }
        }
        fired
    }
}
