use serde::{Deserialize, Serialize};

use crate::api::types::{Category, Difficulty, LevelId};

/// Immutable description of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Stable identifier, unique within a catalog.
    pub id: LevelId,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Levels that must be completed first. Empty means always playable.
    #[serde(default)]
    pub dependencies: Vec<LevelId>,
}

impl LevelDescriptor {
    pub fn new(id: impl Into<LevelId>, category: Category, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            category,
            difficulty,
            dependencies: Vec::new(),
        }
    }

    /// Builder: add a prerequisite level.
    pub fn depends_on(mut self, dep: impl Into<LevelId>) -> Self {
        self.dependencies.push(dep.into());
        self
    }

    /// Key of the level title in the translation table.
    pub fn title_key(&self) -> String {
        format!("{}.title", self.id)
    }

    /// Key of the level description in the translation table.
    pub fn description_key(&self) -> String {
        format!("{}.description", self.id)
    }
}
