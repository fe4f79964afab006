//! Fixed-capacity LIFO stack.

/// A stack that refuses pushes once it holds `capacity` items.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Create an empty stack holding at most `capacity` items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Push onto the top. Returns `false` and drops nothing when full.
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove and return the top item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The top item, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Items from top to bottom.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }

    /// Number of items on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another push would be refused.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Maximum number of items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = BoundedStack::new(3);
        assert!(stack.push(1));
        assert!(stack.push(2));
        assert!(stack.push(3));

        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_push_refused_when_full() {
        let mut stack = BoundedStack::new(2);
        assert!(stack.push("a"));
        assert!(stack.push("b"));
        assert!(stack.is_full());
        assert!(!stack.push("c"));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek(), Some(&"b"));
    }

    #[test]
    fn test_zero_capacity_is_always_full() {
        let mut stack = BoundedStack::new(0);
        assert!(stack.is_full());
        assert!(!stack.push(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_large_capacity_allocates_lazily() {
        let mut stack = BoundedStack::new(usize::MAX);
        assert!(stack.push(7u8));
        assert_eq!(stack.capacity(), usize::MAX);
        assert!(!stack.is_full());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut stack = BoundedStack::new(4);
        assert_eq!(stack.peek(), None);
        stack.push(7);
        assert_eq!(stack.peek(), Some(&7));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_iter_newest_first() {
        let mut stack = BoundedStack::new(4);
        for i in 1..=3 {
            stack.push(i);
        }
        let order: Vec<_> = stack.iter_newest_first().copied().collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_pop_frees_room() {
        let mut stack = BoundedStack::new(1);
        stack.push(1);
        assert!(!stack.push(2));
        stack.pop();
        assert!(stack.push(2));
        assert_eq!(stack.capacity(), 1);
    }
}
