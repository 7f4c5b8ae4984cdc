//! TUI state and key handling
//!
//! Key handling is a plain state transition over the controller; the event
//! loop only feeds it keys and redraws.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quest_common::{newly_unlocked, ProgressController, Storage, ToggleOutcome};

/// Kind of status-line notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
}

/// One-line message shown under the checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Cursor, notice and quit flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiState {
    pub selected: usize,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub emojis: bool,
}

impl TuiState {
    pub fn new(emojis: bool) -> Self {
        Self {
            selected: 0,
            notice: None,
            should_quit: false,
            emojis,
        }
    }

    /// Start on the first level that still needs doing
    pub fn focus_next_level<S: Storage>(&mut self, controller: &ProgressController<S>) {
        if let Some(next) = controller.view().next_level() {
            self.selected = next.index;
        }
    }

    pub fn handle_key<S: Storage>(&mut self, key: KeyEvent, controller: &mut ProgressController<S>) {
        let count = controller.curriculum().len();

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => self.should_quit = true,
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.selected = self.selected.saturating_sub(1);
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            (KeyCode::Home, _) | (KeyCode::Char('g'), _) => self.selected = 0,
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => self.selected = count.saturating_sub(1),
            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => self.toggle_selected(controller),
            _ => {}
        }
    }

    fn toggle_selected<S: Storage>(&mut self, controller: &mut ProgressController<S>) {
        let Some(level) = controller.curriculum().get(self.selected).copied() else {
            return;
        };

        let before = controller.view();
        let outcome = controller.toggle_level(level.key);
        let after = controller.view();

        self.notice = Some(match outcome {
            ToggleOutcome::Completed => {
                let unlocked: Vec<&str> = newly_unlocked(&before, &after)
                    .iter()
                    .map(|l| l.level.title)
                    .collect();
                let mut text = format!("Completed {} (+{} XP)", level.title, level.xp);
                if !unlocked.is_empty() {
                    text.push_str(&format!(". Unlocked: {}", unlocked.join(", ")));
                }
                if after.is_finished() {
                    text.push_str(". All levels completed!");
                }
                Notice::new(NoticeKind::Success, text)
            }
            ToggleOutcome::Reset => Notice::new(
                NoticeKind::Info,
                format!("Reset {} (-{} XP)", level.title, level.xp),
            ),
            ToggleOutcome::Locked => {
                let hint = self
                    .selected
                    .checked_sub(1)
                    .and_then(|p| controller.curriculum().get(p))
                    .map(|prev| format!(": complete {} first", prev.title))
                    .unwrap_or_default();
                Notice::new(NoticeKind::Warning, format!("{} is locked{}", level.title, hint))
            }
            ToggleOutcome::UnknownLevel | ToggleOutcome::Unchanged => return,
        });

        if let Some(warning) = controller.persist_warning() {
            self.notice = Some(Notice::new(NoticeKind::Warning, warning));
        }
    }
}
