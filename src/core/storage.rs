use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Generic storage trait for collision objects
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle.
    ///
    /// Panics once the storage has run out of handles; use a fallible
    /// variant where the implementation offers one.
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Removes an item from the storage
    fn remove(&mut self, handle: H) -> Option<T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Clears all items from the storage
    fn clear(&mut self);

    /// Returns an iterator over all items
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a;

    /// Returns a mutable iterator over all items
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a;
}

/// Arena of bodies addressed by [`BodyHandle`].
///
/// Slots are never reused: once a body is removed its handle resolves to
/// `None` forever, so partner sets holding that handle degrade to "no
/// collision" instead of aliasing a newer body.
#[derive(Debug, Clone)]
pub struct BodyStorage<T> {
    slots: Vec<Option<T>>,
    len: usize,
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        <Self as Storage<T, BodyHandle>>::new()
    }
}

impl<T> Storage<T, BodyHandle> for BodyStorage<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    fn add(&mut self, item: T) -> BodyHandle {
        match self.try_add(item) {
            Ok(handle) => handle,
            Err(err) => panic!("{}", err),
        }
    }

    fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        let removed = self.slots.get_mut(handle.index()).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn clear(&mut self) {
        // Keep the slot count so handles issued before the clear stay stale.
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (BodyHandle, &'a T)> + 'a where T: 'a {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (BodyHandle(index as u32), item)))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (BodyHandle, &'a mut T)> + 'a where T: 'a {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|item| (BodyHandle(index as u32), item)))
    }
}

impl<T> BodyStorage<T> {
    /// Adds a body, failing once all `u32::MAX + 1` handles have been issued.
    ///
    /// Removed slots count toward the limit because they are never reused.
    pub fn try_add(&mut self, item: T) -> Result<BodyHandle> {
        let handle = handle_for_slot(self.slots.len())?;
        self.slots.push(Some(item));
        self.len += 1;
        Ok(handle)
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }
}

fn handle_for_slot(index: usize) -> Result<BodyHandle> {
    u32::try_from(index)
        .map(BodyHandle)
        .map_err(|_| PhysicsError::CapacityExceeded(format!("no body handle left for slot {}", index)))
}
