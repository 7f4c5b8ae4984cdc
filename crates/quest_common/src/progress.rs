//! Progress controller: completion state, unlock rules and XP totals.
//!
//! The controller owns the completed set and the storage it came from. Every
//! view value is derived on demand by [`compute_view`], a pure function of the
//! curriculum, the completed set and the unlock policy. Front ends pull a
//! fresh view after each event instead of being notified.

use crate::curriculum::{Curriculum, Level};
use crate::error::Result;
use crate::storage::{Storage, COMPLETED_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// How a completed level is treated once its predecessor is reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnlockPolicy {
    /// Unlocked iff first level or predecessor completed, evaluated live.
    /// A completed level can end up locked; its xp still counts.
    #[default]
    Strict,
    /// Like `Strict`, but a completed level always stays unlocked so it can
    /// be reset.
    RetainCompleted,
}

impl UnlockPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnlockPolicy::Strict => "strict",
            UnlockPolicy::RetainCompleted => "retain-completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(UnlockPolicy::Strict),
            "retain-completed" | "retain" => Some(UnlockPolicy::RetainCompleted),
            _ => None,
        }
    }
}

/// Per-level display status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    Locked,
    Available,
    Completed,
}

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Key added to the completed set
    Completed,
    /// Key removed from the completed set
    Reset,
    /// Level is locked; nothing changed
    Locked,
    /// No level with that key; nothing changed
    UnknownLevel,
    /// `complete`/`reset` found the level already in the requested state
    Unchanged,
}

impl ToggleOutcome {
    /// Whether the completed set was mutated
    pub fn changed(&self) -> bool {
        matches!(self, ToggleOutcome::Completed | ToggleOutcome::Reset)
    }
}

/// Derived state of one level
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LevelView {
    pub index: usize,
    #[serde(flatten)]
    pub level: Level,
    pub is_unlocked: bool,
    pub is_completed: bool,
    pub status: LevelStatus,
}

impl LevelView {
    pub fn key(&self) -> &'static str {
        self.level.key
    }
}

/// Everything a front end needs to draw the checklist
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProgressView {
    pub levels: Vec<LevelView>,
    pub earned_xp: u32,
    pub total_xp: u32,
}

impl ProgressView {
    /// Earned share of total xp in `0.0..=1.0`
    pub fn ratio(&self) -> f64 {
        if self.total_xp == 0 {
            0.0
        } else {
            self.earned_xp as f64 / self.total_xp as f64
        }
    }

    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn level(&self, key: &str) -> Option<&LevelView> {
        self.levels.iter().find(|l| l.key() == key)
    }

    /// First unlocked level that is not yet completed
    pub fn next_level(&self) -> Option<&LevelView> {
        self.levels.iter().find(|l| l.is_unlocked && !l.is_completed)
    }

    pub fn completed_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_completed).count()
    }

    pub fn is_finished(&self) -> bool {
        !self.levels.is_empty() && self.completed_count() == self.levels.len()
    }
}

// ============================================================================
// Pure derivation
// ============================================================================

/// Parse the persisted value. Anything other than a JSON array of strings
/// yields `None`.
pub fn parse_completed(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).ok()
}

/// Unlock rule for the level at `index`
pub fn is_unlocked(
    curriculum: &Curriculum,
    completed: &HashSet<String>,
    index: usize,
    policy: UnlockPolicy,
) -> bool {
    let Some(level) = curriculum.get(index) else {
        return false;
    };
    if index == 0 {
        return true;
    }
    let predecessor_done = curriculum
        .get(index - 1)
        .map(|prev| completed.contains(prev.key))
        .unwrap_or(false);

    match policy {
        UnlockPolicy::Strict => predecessor_done,
        UnlockPolicy::RetainCompleted => predecessor_done || completed.contains(level.key),
    }
}

/// Sum of xp over completed levels
pub fn earned_xp(curriculum: &Curriculum, completed: &HashSet<String>) -> u32 {
    curriculum
        .levels()
        .iter()
        .filter(|l| completed.contains(l.key))
        .map(|l| l.xp)
        .sum()
}

/// Derive the full view. No side effects.
pub fn compute_view(
    curriculum: &Curriculum,
    completed: &HashSet<String>,
    policy: UnlockPolicy,
) -> ProgressView {
    let levels = curriculum
        .levels()
        .iter()
        .enumerate()
        .map(|(index, level)| {
            let is_unlocked = is_unlocked(curriculum, completed, index, policy);
            let is_completed = completed.contains(level.key);
            let status = if is_completed {
                LevelStatus::Completed
            } else if is_unlocked {
                LevelStatus::Available
            } else {
                LevelStatus::Locked
            };
            LevelView {
                index,
                level: *level,
                is_unlocked,
                is_completed,
                status,
            }
        })
        .collect();

    ProgressView {
        levels,
        earned_xp: earned_xp(curriculum, completed),
        total_xp: curriculum.total_xp(),
    }
}

/// Levels unlocked in `after` that were locked in `before`
pub fn newly_unlocked<'a>(before: &ProgressView, after: &'a ProgressView) -> Vec<&'a LevelView> {
    after
        .levels
        .iter()
        .filter(|l| l.is_unlocked)
        .filter(|l| {
            !before
                .level(l.key())
                .map(|old| old.is_unlocked)
                .unwrap_or(false)
        })
        .collect()
}

// ============================================================================
// Controller
// ============================================================================

/// Owner of the completed set
pub struct ProgressController<S: Storage> {
    curriculum: Curriculum,
    completed: HashSet<String>,
    storage: S,
    policy: UnlockPolicy,
    persist_warning: Option<String>,
}

impl<S: Storage> ProgressController<S> {
    /// Load completion state from `storage`. Never fails: a missing,
    /// unreadable or malformed entry starts with no progress.
    pub fn initialize(curriculum: Curriculum, storage: S, policy: UnlockPolicy) -> Self {
        let completed = load_completed(&curriculum, &storage);
        info!(
            completed = completed.len(),
            levels = curriculum.len(),
            policy = policy.as_str(),
            "progress loaded"
        );
        Self {
            curriculum,
            completed,
            storage,
            policy,
            persist_warning: None,
        }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn policy(&self) -> UnlockPolicy {
        self.policy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Completed keys in curriculum order
    pub fn completed_keys(&self) -> Vec<&'static str> {
        self.curriculum
            .levels()
            .iter()
            .filter(|l| self.completed.contains(l.key))
            .map(|l| l.key)
            .collect()
    }

    pub fn is_completed(&self, key: &str) -> bool {
        self.completed.contains(key)
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        is_unlocked(&self.curriculum, &self.completed, index, self.policy)
    }

    pub fn earned_xp(&self) -> u32 {
        earned_xp(&self.curriculum, &self.completed)
    }

    pub fn total_xp(&self) -> u32 {
        self.curriculum.total_xp()
    }

    pub fn view(&self) -> ProgressView {
        compute_view(&self.curriculum, &self.completed, self.policy)
    }

    /// Flip completion of an unlocked level and persist. Locked and unknown
    /// levels are left alone.
    pub fn toggle_level(&mut self, key: &str) -> ToggleOutcome {
        let Some(index) = self.curriculum.index_of(key) else {
            debug!(key, "toggle ignored: unknown level");
            return ToggleOutcome::UnknownLevel;
        };
        if !self.is_unlocked(index) {
            debug!(key, "toggle ignored: level locked");
            return ToggleOutcome::Locked;
        }

        let outcome = if self.completed.remove(key) {
            ToggleOutcome::Reset
        } else {
            self.completed.insert(key.to_string());
            ToggleOutcome::Completed
        };
        info!(key, ?outcome, earned_xp = self.earned_xp(), "level toggled");

        self.persist_after_mutation();
        outcome
    }

    /// Mark a level completed, toggling only if it is not already
    pub fn complete(&mut self, key: &str) -> ToggleOutcome {
        if self.is_completed(key) {
            return ToggleOutcome::Unchanged;
        }
        self.toggle_level(key)
    }

    /// Clear a level's completion, toggling only if it is completed
    pub fn reset(&mut self, key: &str) -> ToggleOutcome {
        if !self.curriculum.contains(key) {
            return ToggleOutcome::UnknownLevel;
        }
        if !self.is_completed(key) {
            return ToggleOutcome::Unchanged;
        }
        self.toggle_level(key)
    }

    /// Overwrite the stored entry with the current completed set
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.completed_keys())?;
        self.storage.set(COMPLETED_KEY, &json)?;
        debug!(value = %json, "progress persisted");
        Ok(())
    }

    /// Last write failure, cleared by the next successful write
    pub fn persist_warning(&self) -> Option<&str> {
        self.persist_warning.as_deref()
    }

    fn persist_after_mutation(&mut self) {
        match self.persist() {
            Ok(()) => self.persist_warning = None,
            Err(e) => {
                // In-memory state stays authoritative for the session
                warn!(error = %e, "failed to save progress");
                self.persist_warning = Some(format!("Progress not saved: {}", e));
            }
        }
    }
}

fn load_completed<S: Storage>(curriculum: &Curriculum, storage: &S) -> HashSet<String> {
    let raw = match storage.get(COMPLETED_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return HashSet::new(),
        Err(e) => {
            warn!(error = %e, "could not read saved progress, starting fresh");
            return HashSet::new();
        }
    };

    let Some(keys) = parse_completed(&raw) else {
        warn!("saved progress is not a JSON array of strings, starting fresh");
        return HashSet::new();
    };

    keys.into_iter()
        .filter(|k| {
            let known = curriculum.contains(k);
            if !known {
                debug!(key = %k, "dropping unknown level key from saved progress");
            }
            known
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn controller_with(raw: Option<&str>) -> ProgressController<MemoryStorage> {
        let storage = match raw {
            Some(v) => MemoryStorage::with_entry(COMPLETED_KEY, v),
            None => MemoryStorage::new(),
        };
        ProgressController::initialize(Curriculum::builtin(), storage, UnlockPolicy::Strict)
    }

    #[test]
    fn test_parse_completed() {
        assert_eq!(
            parse_completed(r#"["lvl1","lvl2"]"#),
            Some(vec!["lvl1".to_string(), "lvl2".to_string()])
        );
        assert_eq!(parse_completed("[]"), Some(vec![]));
        assert_eq!(parse_completed("not json"), None);
        assert_eq!(parse_completed("{}"), None);
        assert_eq!(parse_completed("[1,2,3]"), None);
        assert_eq!(parse_completed("null"), None);
        assert_eq!(parse_completed(r#""lvl1""#), None);
    }

    #[test]
    fn test_fresh_state() {
        let c = controller_with(None);
        let view = c.view();
        assert_eq!(view.earned_xp, 0);
        assert_eq!(view.total_xp, 1000);
        let unlocked: Vec<bool> = view.levels.iter().map(|l| l.is_unlocked).collect();
        assert_eq!(unlocked, vec![true, false, false, false, false]);
        assert_eq!(view.levels[0].status, LevelStatus::Available);
        assert_eq!(view.levels[1].status, LevelStatus::Locked);
    }

    #[test]
    fn test_toggle_first_level() {
        let mut c = controller_with(None);
        assert_eq!(c.toggle_level("lvl1"), ToggleOutcome::Completed);
        assert_eq!(c.completed_keys(), vec!["lvl1"]);
        assert_eq!(c.earned_xp(), 100);
        assert!(c.is_unlocked(1));
        assert!(!c.is_unlocked(2));
        assert_eq!(
            c.storage().get(COMPLETED_KEY).unwrap().as_deref(),
            Some(r#"["lvl1"]"#)
        );
    }

    #[test]
    fn test_locked_toggle_is_noop() {
        let mut c = controller_with(None);
        assert_eq!(c.toggle_level("lvl3"), ToggleOutcome::Locked);
        assert!(c.completed_keys().is_empty());
        // Nothing was written
        assert_eq!(c.storage().get(COMPLETED_KEY).unwrap(), None);
    }

    #[test]
    fn test_unknown_toggle_is_noop() {
        let mut c = controller_with(None);
        assert_eq!(c.toggle_level("lvl42"), ToggleOutcome::UnknownLevel);
        assert_eq!(c.reset("lvl42"), ToggleOutcome::UnknownLevel);
        assert!(!ToggleOutcome::UnknownLevel.changed());
    }

    #[test]
    fn test_decomplete_predecessor_strict() {
        let mut c = controller_with(Some(r#"["lvl1","lvl2"]"#));
        assert_eq!(c.toggle_level("lvl1"), ToggleOutcome::Reset);
        assert_eq!(c.completed_keys(), vec!["lvl2"]);

        let view = c.view();
        let lvl2 = view.level("lvl2").unwrap();
        assert!(lvl2.is_completed);
        assert!(!lvl2.is_unlocked);
        assert_eq!(lvl2.status, LevelStatus::Completed);
        assert!(view.level("lvl3").unwrap().is_unlocked);
        assert_eq!(view.earned_xp, 150);

        // Locked-but-completed cannot be reset until lvl1 is done again
        assert_eq!(c.toggle_level("lvl2"), ToggleOutcome::Locked);
    }

    #[test]
    fn test_decomplete_predecessor_retain_completed() {
        let storage = MemoryStorage::with_entry(COMPLETED_KEY, r#"["lvl1","lvl2"]"#);
        let mut c = ProgressController::initialize(
            Curriculum::builtin(),
            storage,
            UnlockPolicy::RetainCompleted,
        );
        c.toggle_level("lvl1");
        let view = c.view();
        let lvl2 = view.level("lvl2").unwrap();
        assert!(lvl2.is_completed && lvl2.is_unlocked);
        assert_eq!(view.earned_xp, 150);
        assert_eq!(c.toggle_level("lvl2"), ToggleOutcome::Reset);
    }

    #[test]
    fn test_complete_and_reset_helpers() {
        let mut c = controller_with(None);
        assert_eq!(c.reset("lvl1"), ToggleOutcome::Unchanged);
        assert_eq!(c.complete("lvl1"), ToggleOutcome::Completed);
        assert_eq!(c.complete("lvl1"), ToggleOutcome::Unchanged);
        assert_eq!(c.reset("lvl1"), ToggleOutcome::Reset);
        assert!(c.completed_keys().is_empty());
    }

    #[test]
    fn test_unknown_keys_dropped_on_load() {
        let c = controller_with(Some(r#"["lvl1","bogus","lvl1"]"#));
        assert_eq!(c.completed_keys(), vec!["lvl1"]);
    }

    #[test]
    fn test_newly_unlocked() {
        let mut c = controller_with(None);
        let before = c.view();
        c.toggle_level("lvl1");
        let after = c.view();
        let fresh: Vec<&str> = newly_unlocked(&before, &after).iter().map(|l| l.key()).collect();
        assert_eq!(fresh, vec!["lvl2"]);
        assert!(newly_unlocked(&after, &after).is_empty());
    }

    #[test]
    fn test_view_helpers() {
        let c = controller_with(Some(r#"["lvl1","lvl2"]"#));
        let view = c.view();
        assert_eq!(view.percent(), 25);
        assert_eq!(view.next_level().map(|l| l.key()), Some("lvl3"));
        assert_eq!(view.completed_count(), 2);
        assert!(!view.is_finished());

        let done = controller_with(Some(r#"["lvl1","lvl2","lvl3","lvl4","lvl5"]"#)).view();
        assert!(done.is_finished());
        assert!(done.next_level().is_none());
        assert_eq!(done.percent(), 100);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(UnlockPolicy::parse("STRICT"), Some(UnlockPolicy::Strict));
        assert_eq!(UnlockPolicy::parse("retain-completed"), Some(UnlockPolicy::RetainCompleted));
        assert_eq!(UnlockPolicy::parse("loose"), None);
        assert_eq!(UnlockPolicy::default(), UnlockPolicy::Strict);
    }

    #[test]
    fn test_view_serializes_flat() {
        let view = controller_with(None).view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["total_xp"], 1000);
        assert_eq!(json["levels"][0]["key"], "lvl1");
        assert_eq!(json["levels"][0]["status"], "available");
        assert_eq!(json["levels"][1]["status"], "locked");
        assert_eq!(json["levels"][4]["resources"][2]["label"], "Hugging Face TRL Library");
    }
}
