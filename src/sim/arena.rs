//! Live entity storage
//!
//! Entities are keyed by `EntityId` and iterated in id order, so two runs with
//! the same seed visit them identically.

use std::collections::BTreeMap;

/// Identifier for any spawned entity (unique within a play scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

/// A set of live entities of one kind
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: BTreeMap<EntityId, T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity under a freshly allocated id
    pub fn spawn(&mut self, id: EntityId, item: T) {
        debug_assert!(!self.items.contains_key(&id), "entity id reused: {id:?}");
        self.items.insert(id, item);
    }

    /// Remove an entity; `None` if it was already gone
    pub fn despawn(&mut self, id: EntityId) -> Option<T> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids in iteration order (snapshot, safe to mutate the arena while walking it)
    pub fn ids(&self) -> Vec<EntityId> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Remove every entity for which `keep` returns false, returning their ids
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId, &T) -> bool) -> Vec<EntityId> {
        let removed: Vec<EntityId> = self
            .items
            .iter()
            .filter(|(id, item)| !keep(**id, item))
            .map(|(id, _)| *id)
            .collect();
        for id in &removed {
            self.items.remove(id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_id_ordered() {
        let mut arena = Arena::new();
        arena.spawn(EntityId(7), "c");
        arena.spawn(EntityId(2), "a");
        arena.spawn(EntityId(5), "b");

        let order: Vec<_> = arena.values().copied().collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_despawn_twice() {
        let mut arena = Arena::new();
        arena.spawn(EntityId(1), 10);
        assert_eq!(arena.despawn(EntityId(1)), Some(10));
        assert_eq!(arena.despawn(EntityId(1)), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_retain_reports_removed() {
        let mut arena = Arena::new();
        for i in 1..=4 {
            arena.spawn(EntityId(i), i);
        }
        let removed = arena.retain(|_, v| v % 2 == 0);
        assert_eq!(removed, vec![EntityId(1), EntityId(3)]);
        assert_eq!(arena.len(), 2);
    }
}
