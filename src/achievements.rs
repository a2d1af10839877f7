//! Achievement collaborator

use std::collections::HashSet;

use crate::sim::AchievementId;

/// Unlocked achievements for the lifetime of the process.
///
/// Unlocking is idempotent; only the first unlock of an id notifies.
#[derive(Debug, Clone, Default)]
pub struct AchievementBoard {
    unlocked: HashSet<AchievementId>,
}

impl AchievementBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call unlocked `id`
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if !self.unlocked.insert(id) {
            return false;
        }
        log::info!("Achievement unlocked: {} - {}", id.title(), id.description());
        true
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Unlocked ids in declaration order
    pub fn unlocked(&self) -> Vec<AchievementId> {
        AchievementId::ALL
            .into_iter()
            .filter(|id| self.unlocked.contains(id))
            .collect()
    }
}
