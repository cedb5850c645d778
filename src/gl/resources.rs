//! Handle-indexed slot tables backing buffers, vertex arrays, shaders,
//! programs and windows

use std::fmt;

/// Index into a [`ResourceTable`]. Zero is reserved and never refers to an object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(pub u32);

impl Handle {
    pub const NULL: Handle = Handle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Handle {
    fn from(v: u32) -> Self {
        Handle(v)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Growable arena of optionally-occupied slots. Slot 0 is permanently empty.
#[derive(Debug)]
pub struct ResourceTable<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for ResourceTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceTable<T> {
    pub fn new() -> Self {
        Self { slots: vec![None] }
    }

    /// Fill `count` slots with objects from `make`.
    ///
    /// Empty slots are reused first, scanning up from index 1; the rest are
    /// appended at the end of the table.
    pub fn allocate_with(&mut self, count: usize, mut make: impl FnMut() -> T) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(count);

        for (index, slot) in self.slots.iter_mut().enumerate().skip(1) {
            if handles.len() == count {
                break;
            }
            if slot.is_none() {
                *slot = Some(make());
                handles.push(Handle(index as u32));
            }
        }

        while handles.len() < count {
            handles.push(Handle(self.slots.len() as u32));
            self.slots.push(Some(make()));
        }

        handles
    }

    /// Place a single object in the first free slot
    pub fn insert(&mut self, value: T) -> Handle {
        if let Some(offset) = self.slots.iter().skip(1).position(Option::is_none) {
            let index = offset + 1;
            self.slots[index] = Some(value);
            return Handle(index as u32);
        }
        self.slots.push(Some(value));
        Handle((self.slots.len() - 1) as u32)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        if handle.is_null() {
            return None;
        }
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if handle.is_null() {
            return None;
        }
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn vacate(&mut self, handle: Handle) {
        self.slots[handle.index()] = None;
    }
}

impl<T: Default> ResourceTable<T> {
    /// Allocate `count` default-constructed objects
    pub fn allocate(&mut self, count: usize) -> Vec<Handle> {
        self.allocate_with(count, T::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(handles: &[Handle]) -> Vec<u32> {
        handles.iter().map(|h| h.0).collect()
    }

    #[test]
    fn test_allocate_on_empty_table() {
        let mut table: ResourceTable<Vec<u8>> = ResourceTable::new();
        assert_eq!(ids(&table.allocate(4)), vec![1, 2, 3, 4]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_repeated_allocation_is_increasing() {
        let mut table: ResourceTable<u32> = ResourceTable::new();
        let mut last = 0;
        for n in 1..5 {
            for h in table.allocate(n) {
                assert!(h.0 > last);
                last = h.0;
            }
        }
        assert_eq!(last, 10);
    }

    #[test]
    fn test_null_handle_is_never_valid() {
        let mut table: ResourceTable<u32> = ResourceTable::new();
        table.allocate(2);
        assert!(table.get(Handle::NULL).is_none());
        assert!(!table.contains(Handle(0)));
        assert!(!table.contains(Handle(3)));
    }

    #[test]
    fn test_gaps_are_filled_before_growing() {
        let mut table: ResourceTable<u32> = ResourceTable::new();
        table.allocate(5);
        table.vacate(Handle(2));
        table.vacate(Handle(4));
        assert_eq!(ids(&table.allocate(3)), vec![2, 4, 6]);
    }

    #[test]
    fn test_insert_uses_first_gap() {
        let mut table: ResourceTable<&str> = ResourceTable::new();
        let a = table.insert("a");
        let b = table.insert("b");
        assert_eq!((a.0, b.0), (1, 2));
        table.vacate(a);
        assert_eq!(table.insert("c"), Handle(1));
        assert_eq!(table.get(Handle(1)), Some(&"c"));
    }
}
