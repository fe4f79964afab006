//! Fixed-capacity circular FIFO buffer.

/// A ring buffer with explicit front/rear indices.
///
/// `size` tells a full buffer apart from an empty one when `front` and the
/// slot after `rear` coincide.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    front: usize,
    rear: usize,
    size: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A `capacity` of 0 is raised to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            front: 0,
            rear: capacity - 1,
            size: 0,
        }
    }

    /// Insert at the rear. Hands the item back when the buffer is full.
    ///
    /// # Errors
    ///
    /// Returns `Err(item)` if there is no free slot.
    pub fn enqueue(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.rear = (self.rear + 1) % self.capacity();
        self.slots[self.rear] = Some(item);
        self.size += 1;
        Ok(())
    }

    /// Remove from the front, clearing the slot.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.size -= 1;
        item
    }

    /// Items oldest first, without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let capacity = self.capacity();
        (0..self.size)
            .filter_map(move |offset| self.slots[(self.front + offset) % capacity].as_ref())
    }

    /// The oldest item matching `predicate`, mutably.
    pub fn find_mut(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<&mut T> {
        let capacity = self.capacity();
        let index = (0..self.size)
            .map(|offset| (self.front + offset) % capacity)
            .find(|&index| self.slots[index].as_ref().is_some_and(&mut predicate))?;
        self.slots[index].as_mut()
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether every slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empty the buffer and reset the indices.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.front = 0;
        self.rear = self.capacity() - 1;
        self.size = 0;
    }
}
