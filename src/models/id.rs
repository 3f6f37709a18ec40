use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier shared by doctors, patients, appointments and emergencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntityId)
    }
}

/// Raised once every representable id has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no entity ids left to allocate")]
pub struct SequenceExhausted;

/// Monotonic id allocator. Ids handed out are never handed out again, even
/// after the entity holding them is removed.
///
/// `u64::MAX` is never allocated; a sequence that reaches it stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next == u64::MAX
    }

    pub fn allocate(&mut self) -> Result<EntityId, SequenceExhausted> {
        if self.is_exhausted() {
            return Err(SequenceExhausted);
        }
        let id = EntityId(self.next);
        self.next += 1;
        Ok(id)
    }

    /// Moves the sequence past `id` if it has not been passed already.
    pub fn observe(&mut self, id: EntityId) {
        if id.0 >= self.next {
            self.next = id.0.saturating_add(1);
        }
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
