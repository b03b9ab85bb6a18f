//! Fixed-capacity ring buffer backing the violation log.

use std::iter::FusedIterator;

/// A fixed-capacity circular buffer with O(1) push.
///
/// Once full, each push evicts the oldest element. Iteration is oldest first.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be greater than 0");

        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Appends `item`, returning the evicted oldest element if the buffer was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let capacity = self.capacity();
        let tail = (self.head + self.len) % capacity;
        let evicted = self.slots[tail].replace(item);

        if self.len == capacity {
            self.head = (self.head + 1) % capacity;
        } else {
            self.len += 1;
        }
        evicted
    }

    /// Element at logical `index` (0 is the oldest).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[(self.head + index) % self.capacity()].as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            front: 0,
        }
    }

    /// Clones the contents into a `Vec`, oldest first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// Iterator over a [`RingBuffer`], oldest to newest.
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    front: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.front)?;
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _: RingBuffer<i32> = RingBuffer::new(0);
    }

    #[test]
    fn test_push_within_capacity() {
        let mut buffer = RingBuffer::new(3);
        assert_eq!(buffer.push(1), None);
        assert_eq!(buffer.push(2), None);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0), Some(&1));
        assert_eq!(buffer.get(2), None);
    }

    #[test]
    fn test_push_overflow_evicts_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 1..=3 {
            buffer.push(i);
        }
        assert_eq!(buffer.push(4), Some(1));
        assert_eq!(buffer.push(5), Some(2));
        assert_eq!(buffer.to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_fifty_five_into_fifty() {
        let mut buffer = RingBuffer::new(50);
        for i in 1..=55 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 50);
        assert_eq!(buffer.to_vec(), (6..=55).collect::<Vec<_>>());
    }

    #[test]
    fn test_clear_resets() {
        let mut buffer = RingBuffer::new(2);
        buffer.push("a");
        buffer.push("b");
        buffer.push("c");
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.get(0), None);
        buffer.push("d");
        assert_eq!(buffer.to_vec(), vec!["d"]);
    }

    #[test]
    fn test_iter_exact_size() {
        let mut buffer = RingBuffer::new(4);
        buffer.push(1);
        buffer.push(2);
        assert_eq!(buffer.iter().len(), 2);
        assert_eq!((&buffer).into_iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}
