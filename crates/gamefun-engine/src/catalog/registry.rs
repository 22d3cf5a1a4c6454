use std::collections::{HashMap, HashSet};

use crate::api::error::ProgressError;
use crate::api::types::{Category, Difficulty, LevelId};
use crate::catalog::descriptor::LevelDescriptor;

/// Read-only set of levels, validated once at construction.
///
/// Levels keep their declaration order; listings built from the catalog are
/// reported in that order.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDescriptor>,
    index: HashMap<LevelId, usize>,
}

impl LevelCatalog {
    /// Build a catalog, rejecting duplicate ids, dangling or repeated
    /// dependencies, and dependency cycles.
    pub fn new(levels: Vec<LevelDescriptor>) -> Result<Self, ProgressError> {
        let mut index = HashMap::with_capacity(levels.len());
        for (i, level) in levels.iter().enumerate() {
            if index.insert(level.id.clone(), i).is_some() {
                return Err(ProgressError::invalid_catalog(format!(
                    "duplicate level id '{}'",
                    level.id
                )));
            }
        }

        for level in &levels {
            let mut seen = HashSet::with_capacity(level.dependencies.len());
            for dep in &level.dependencies {
                if !index.contains_key(dep) {
                    return Err(ProgressError::invalid_catalog(format!(
                        "level '{}' depends on unknown level '{}'",
                        level.id, dep
                    )));
                }
                if !seen.insert(dep) {
                    return Err(ProgressError::invalid_catalog(format!(
                        "level '{}' lists dependency '{}' twice",
                        level.id, dep
                    )));
                }
            }
        }

        let catalog = Self { levels, index };
        catalog.check_acyclic()?;
        log::info!("Level catalog loaded: {} levels", catalog.len());
        Ok(catalog)
    }

    /// Parse and validate a catalog from a JSON array of level descriptors.
    pub fn from_json(json: &str) -> Result<Self, ProgressError> {
        let levels: Vec<LevelDescriptor> = serde_json::from_str(json)
            .map_err(|e| ProgressError::invalid_catalog(e.to_string()))?;
        Self::new(levels)
    }

    /// The nine levels shipped with the game, validated like any other catalog.
    pub fn standard() -> Result<Self, ProgressError> {
        use Category::*;
        use Difficulty::*;

        let levels = vec![
            LevelDescriptor::new("alphabet", Basic, Easy),
            LevelDescriptor::new("words", Basic, Easy).depends_on("alphabet"),
            LevelDescriptor::new("drag-drop", Basic, Medium).depends_on("words"),
            LevelDescriptor::new("stories", Reading, Easy).depends_on("drag-drop"),
            LevelDescriptor::new("comics", Reading, Medium).depends_on("stories"),
            LevelDescriptor::new("advanced-reading", Reading, Hard).depends_on("comics"),
            LevelDescriptor::new("memory-game", Interactive, Easy).depends_on("comics"),
            LevelDescriptor::new("word-puzzle", Interactive, Medium).depends_on("memory-game"),
            LevelDescriptor::new("speaking-practice", Interactive, Hard).depends_on("word-puzzle"),
        ];
        Self::new(levels)
    }

    /// Look up a level. Fails with `UnknownLevel` if absent.
    pub fn get(&self, id: &str) -> Result<&LevelDescriptor, ProgressError> {
        self.index
            .get(id)
            .map(|&i| &self.levels[i])
            .ok_or_else(|| ProgressError::unknown_level(id))
    }

    /// Direct dependencies only.
    pub fn dependencies_of(&self, id: &str) -> Result<&[LevelId], ProgressError> {
        self.get(id).map(|level| level.dependencies.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }

    /// Levels grouped by category. Categories appear in the order they are
    /// first seen; levels keep declaration order within a group.
    pub fn by_category(&self) -> Vec<(Category, Vec<&LevelDescriptor>)> {
        let mut groups: Vec<(Category, Vec<&LevelDescriptor>)> = Vec::new();
        for level in &self.levels {
            match groups.iter_mut().find(|(c, _)| *c == level.category) {
                Some((_, members)) => members.push(level),
                None => groups.push((level.category, vec![level])),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Three-colour DFS over the dependency edges.
    fn check_acyclic(&self) -> Result<(), ProgressError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        let mut marks = vec![Mark::New; self.levels.len()];
        for start in 0..self.levels.len() {
            if marks[start] != Mark::New {
                continue;
            }
            // (node, next dependency to visit)
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::Active;
            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let deps = &self.levels[node].dependencies;
                if next < deps.len() {
                    frame.1 += 1;
                    let child = self.index[&deps[next]];
                    match marks[child] {
                        Mark::Active => {
                            return Err(ProgressError::invalid_catalog(format!(
                                "dependency cycle through level '{}'",
                                self.levels[child].id
                            )));
                        }
                        Mark::New => {
                            marks[child] = Mark::Active;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[node] = Mark::Done;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}
