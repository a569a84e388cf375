//! Fixed-capacity object storage with per-slot locks and lowest-index reuse.

use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use glam::Vec4;
use parking_lot::{Mutex, MutexGuard};

use crate::{
    core::{fruit::Fruit, object::PhysicsObject},
    error::{Error, Result},
};

/// One pool entry. Occupancy is only written from the simulation thread,
/// between solver phases.
pub struct Slot {
    occupied: AtomicBool,
    object: Mutex<PhysicsObject>,
}

impl Slot {
    fn empty() -> Self {
        Self {
            occupied: AtomicBool::new(false),
            object: Mutex::new(PhysicsObject::new(Vec4::ZERO, Fruit::Cherry, false, true)),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied.load(Ordering::Acquire)
    }

    pub fn lock(&self) -> MutexGuard<'_, PhysicsObject> {
        self.object.lock()
    }
}

/// Object pool: slots shared with worker tasks plus the free index set.
///
/// The free set and the occupancy flags always partition `[0, capacity)`.
pub struct ObjectPool {
    slots: Arc<[Slot]>,
    free: BTreeSet<usize>,
}

impl ObjectPool {
    pub fn with_capacity(capacity: usize) -> Self {
        let slots: Vec<Slot> = (0..capacity).map(|_| Slot::empty()).collect();
        Self {
            slots: slots.into(),
            free: (0..capacity).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.capacity() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.len() == self.capacity()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_occupied)
    }

    /// Installs `object` in the lowest free slot.
    pub fn insert(&mut self, object: PhysicsObject) -> Result<usize> {
        let Some(index) = self.free.pop_first() else {
            return Err(Error::PoolExhausted {
                capacity: self.capacity(),
            });
        };
        let slot = &self.slots[index];
        *slot.lock() = object;
        slot.occupied.store(true, Ordering::Release);
        Ok(index)
    }

    /// Frees `index`. Out-of-range and already-free indices are ignored.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get(index) else {
            return false;
        };
        if !slot.is_occupied() {
            return false;
        }
        slot.lock().disable();
        slot.occupied.store(false, Ordering::Release);
        self.free.insert(index);
        true
    }

    pub fn clear(&mut self) {
        for index in 0..self.capacity() {
            self.remove(index);
        }
    }

    /// Copy of the object in an occupied slot.
    pub fn get(&self, index: usize) -> Option<PhysicsObject> {
        let slot = self.slots.get(index)?;
        slot.is_occupied().then(|| *slot.lock())
    }

    /// Applies `f` to the object in an occupied slot.
    pub fn with_mut<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut PhysicsObject) -> R,
    ) -> Option<R> {
        let slot = self.slots.get(index)?;
        if !slot.is_occupied() {
            return None;
        }
        let mut object = slot.lock();
        Some(f(&mut object))
    }

    pub fn occupied_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.capacity()).filter(|&index| self.slots[index].is_occupied())
    }

    /// Handle shared with worker tasks.
    pub(crate) fn shared_slots(&self) -> Arc<[Slot]> {
        Arc::clone(&self.slots)
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cherry() -> PhysicsObject {
        PhysicsObject::new(Vec4::ZERO, Fruit::Cherry, true, false)
    }

    #[test]
    fn free_set_and_occupancy_stay_complementary() {
        let mut pool = ObjectPool::with_capacity(4);
        let a = pool.insert(cherry()).unwrap();
        let b = pool.insert(cherry()).unwrap();
        assert_eq!((a, b), (0, 1));
        assert!(pool.remove(a));
        assert!(!pool.remove(a));
        assert!(!pool.remove(99));

        for index in 0..pool.capacity() {
            assert_ne!(pool.is_occupied(index), pool.free.contains(&index));
        }
        assert_eq!(pool.len() + pool.free_count(), pool.capacity());
    }

    #[test]
    fn exhausted_pool_rejects_without_side_effects() {
        let mut pool = ObjectPool::with_capacity(2);
        pool.insert(cherry()).unwrap();
        pool.insert(cherry()).unwrap();
        assert!(matches!(
            pool.insert(cherry()),
            Err(Error::PoolExhausted { capacity: 2 })
        ));
        assert_eq!(pool.len(), 2);
    }
}
