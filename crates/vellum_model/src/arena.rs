//! Dense, id-indexed storage for syntax nodes and documents.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::Index;

/// Trait for opaque id types used as arena keys.
pub trait ArenaId: Copy {
    /// Creates an id from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// An append-only container handing out stable ids.
///
/// Items are never reordered or removed, so an id stays valid for the life
/// of the arena and allocation order doubles as insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Appends an item and returns its id.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns the item with the given id, or `None` if it was never allocated.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.items.get_mut(id.as_raw() as usize)
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(id, &item)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the id was not allocated by this arena.
    fn index(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }
}
