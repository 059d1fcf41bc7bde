//! Generational arena backing nodes and edges.
//!
//! Slots are addressed by `(index, generation)`. Removing a value bumps the
//! slot's generation and puts the index on the free list, so handles issued
//! before the removal stop resolving even after the slot is reused.
//!
//! Each slot also remembers the highest generation it has ever carried.
//! `restore` may wind a slot back to an older generation, but the next
//! removal advances past the high-water mark, so a generation is never
//! issued twice for the same index.

/// A single arena slot.
#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    high_water: u32,
    value: Option<T>,
}

/// Generational arena.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no value is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a value, reusing a free slot if one exists.
    ///
    /// Returns `(index, generation)`.
    pub fn insert(&mut self, value: T) -> (u32, u32) {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return (index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            high_water: 0,
            value: Some(value),
        });
        (index, 0)
    }

    /// Remove the value at `(index, generation)` if it is still live.
    pub fn remove(&mut self, index: u32, generation: u32) -> Option<T> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.max(slot.high_water).wrapping_add(1);
        slot.high_water = slot.generation;
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }

    /// Put a removed value back under its original handle.
    ///
    /// Only valid for a slot that is currently empty, which holds when undo
    /// records are replayed in reverse order.
    pub fn restore(&mut self, index: u32, generation: u32, value: T) {
        let i = index as usize;
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, || Slot {
                generation: 0,
                high_water: 0,
                value: None,
            });
        }
        let slot = &mut self.slots[i];
        debug_assert!(slot.value.is_none(), "restoring into an occupied slot");
        slot.high_water = slot.high_water.max(slot.generation).max(generation);
        slot.generation = generation;
        slot.value = Some(value);
        if let Some(pos) = self.free.iter().rposition(|&f| f == index) {
            self.free.swap_remove(pos);
        }
        self.len += 1;
    }

    /// Borrow the value at `(index, generation)`.
    #[inline]
    pub fn get(&self, index: u32, generation: u32) -> Option<&T> {
        self.slots
            .get(index as usize)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Mutably borrow the value at `(index, generation)`.
    #[inline]
    pub fn get_mut(&mut self, index: u32, generation: u32) -> Option<&mut T> {
        self.slots
            .get_mut(index as usize)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Iterate live values in slot order as `(index, generation, &value)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|value| (i as u32, slot.generation, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut arena = Arena::new();
        let (i, g) = arena.insert("a");
        assert_eq!(arena.get(i, g), Some(&"a"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn remove_invalidates_handle() {
        let mut arena = Arena::new();
        let (i, g) = arena.insert(1);
        assert_eq!(arena.remove(i, g), Some(1));
        assert_eq!(arena.get(i, g), None);
        assert_eq!(arena.remove(i, g), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut arena = Arena::new();
        let (i1, g1) = arena.insert(1);
        arena.remove(i1, g1);
        let (i2, g2) = arena.insert(2);
        assert_eq!(i1, i2);
        assert_ne!(g1, g2);
        assert_eq!(arena.get(i1, g1), None);
        assert_eq!(arena.get(i2, g2), Some(&2));
    }

    #[test]
    fn restore_brings_back_old_handle() {
        let mut arena = Arena::new();
        let (i, g) = arena.insert("x");
        let v = arena.remove(i, g).unwrap();
        arena.restore(i, g, v);
        assert_eq!(arena.get(i, g), Some(&"x"));
        assert_eq!(arena.len(), 1);
        // The slot is no longer free.
        let (i2, _) = arena.insert("y");
        assert_ne!(i, i2);
    }

    #[test]
    fn restored_slot_never_reissues_a_generation() {
        let mut arena = Arena::new();
        let (i, gx) = arena.insert("x");
        let x = arena.remove(i, gx).unwrap();
        let (iy, gy) = arena.insert("y");
        assert_eq!(iy, i);
        // Undo in reverse: drop y, bring x back under its old handle.
        arena.remove(iy, gy);
        arena.restore(i, gx, x);
        assert_eq!(arena.get(i, gx), Some(&"x"));

        arena.remove(i, gx);
        let (iz, gz) = arena.insert("z");
        assert_eq!(iz, i);
        assert_ne!(gz, gy);
        assert_ne!(gz, gx);
        assert_eq!(arena.get(iy, gy), None);
        assert_eq!(arena.get(iz, gz), Some(&"z"));
    }

    #[test]
    fn iter_skips_empty_slots() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let _c = arena.insert('c');
        arena.remove(b.0, b.1);
        let live: Vec<char> = arena.iter().map(|(_, _, v)| *v).collect();
        assert_eq!(live, vec!['a', 'c']);
        assert_eq!(arena.get(a.0, a.1), Some(&'a'));
    }
}
