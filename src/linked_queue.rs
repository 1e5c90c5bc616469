use alloc::{boxed::Box, vec::Vec};
use ::core::{fmt, marker::PhantomData};

use crate::{
    error::{Collection, CollectionError},
    node::{self, Link, ListIter, Node},
    traits::Queue,
};

/// An unbounded FIFO queue over a singly linked chain.
///
/// The queue owns the chain through `front`; `rear` is a non-owning pointer
/// to the last cell so that `enqueue` stays O(1).
pub struct LinkedListQueue<T> {
    front: Link<T>,
    rear: Link<T>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedListQueue<T> {
    /// Creates an empty queue.
    #[inline]
    pub const fn new() -> Self {
        Self {
            front: None,
            rear: None,
            len: 0,
            marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    /// Adds an element at the rear of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::LinkedListQueue;
    ///
    /// let mut queue = LinkedListQueue::new();
    /// queue.enqueue("a");
    /// queue.enqueue("b");
    ///
    /// assert_eq!(queue.peek(), Ok(&"a"));
    /// assert_eq!(queue.peek_rear(), Ok(&"b"));
    /// ```
    pub fn enqueue(&mut self, value: T) {
        let node = Node::alloc(value, None);
        match self.rear {
            None => self.front = Some(node),
            Some(rear) => unsafe { (*rear.as_ptr()).next = Some(node) },
        }
        self.rear = Some(node);
        self.len += 1;
    }

    /// Removes the front element and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::LinkedListQueue;
    ///
    /// let mut queue = LinkedListQueue::new();
    /// assert!(queue.dequeue().is_err());
    ///
    /// queue.enqueue(1);
    /// queue.enqueue(2);
    ///
    /// assert_eq!(queue.dequeue(), Ok(1));
    /// assert_eq!(queue.dequeue(), Ok(2));
    /// assert!(queue.dequeue().is_err());
    /// ```
    pub fn dequeue(&mut self) -> Result<T, CollectionError<T>> {
        let front = self.front.ok_or_else(|| CollectionError::underflow(Collection::Queue))?;
        let (value, next) = unsafe { Node::free(front) };
        self.front = next;
        if self.front.is_none() {
            self.rear = None;
        }
        self.len -= 1;
        Ok(value)
    }

    /// Provides a reference to the front element.
    pub fn peek(&self) -> Result<&T, CollectionError<T>> {
        match self.front {
            Some(front) => Ok(unsafe { &(*front.as_ptr()).data }),
            None => Err(CollectionError::underflow(Collection::Queue)),
        }
    }

    /// Provides a reference to the rear element.
    pub fn peek_rear(&self) -> Result<&T, CollectionError<T>> {
        match self.rear {
            Some(rear) => Ok(unsafe { &(*rear.as_ptr()).data }),
            None => Err(CollectionError::underflow(Collection::Queue)),
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        let front = self.front.take();
        self.rear = None;
        self.len = 0;
        unsafe { node::free_chain(front) };
    }

    /// Reverses the queue in place: the rear becomes the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::LinkedListQueue;
    ///
    /// let mut queue: LinkedListQueue<_> = (1..=4).collect();
    /// queue.reverse();
    ///
    /// assert_eq!(queue.to_vec(), vec![4, 3, 2, 1]);
    /// assert_eq!(queue.peek_rear(), Ok(&1));
    /// ```
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        self.rear = self.front;
        self.front = unsafe { node::reverse(self.front) };
    }

    /// Iterates from front to rear.
    #[inline]
    pub fn iter(&self) -> ListIter<'_, T> {
        unsafe { ListIter::new(self.front, self.len) }
    }
}

impl<T: PartialEq> LinkedListQueue<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Returns the 1-based position of `value` counted from the front, or
    /// `None` if absent.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value).map(|pos| pos + 1)
    }
}

impl<T: Clone> LinkedListQueue<T> {
    /// Copies the elements, front to rear, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for LinkedListQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedListQueue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Deep copy: new cells holding clones of the values, in the same order.
impl<T: Clone> Clone for LinkedListQueue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for LinkedListQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for LinkedListQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedListQueue<T> {
    type Item = &'a T;
    type IntoIter = ListIter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for LinkedListQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedListQueue<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedListQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedListQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Queue: [] (empty)");
        }
        f.write_str("Queue (front to rear): [")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" <- ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T> Queue<T> for LinkedListQueue<T> {
    #[inline]
    fn enqueue(&mut self, value: T) -> Result<(), CollectionError<T>> {
        LinkedListQueue::enqueue(self, value);
        Ok(())
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, CollectionError<T>> {
        LinkedListQueue::dequeue(self)
    }

    #[inline]
    fn peek(&self) -> Result<&T, CollectionError<T>> {
        LinkedListQueue::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

unsafe impl<T: Send> Send for LinkedListQueue<T> {}
unsafe impl<T: Sync> Sync for LinkedListQueue<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;
    use std::{cell::Cell, rc::Rc};

    #[derive(Debug)]
    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    /// Walks the chain and checks the front/rear/len bookkeeping.
    fn assert_well_formed<T>(queue: &LinkedListQueue<T>) {
        assert_eq!(queue.front.is_none(), queue.len == 0);
        assert_eq!(queue.rear.is_none(), queue.len == 0);

        let mut last = None;
        let mut cursor = queue.front;
        let mut count = 0;
        while let Some(node) = cursor {
            count += 1;
            last = Some(node);
            cursor = unsafe { (*node.as_ptr()).next };
        }
        assert_eq!(count, queue.len);
        assert_eq!(last, queue.rear);
    }

    #[test]
    fn test_enqueue_dequeue_bookkeeping() {
        let mut queue = LinkedListQueue::new();
        assert_well_formed(&queue);

        queue.enqueue(1);
        assert_well_formed(&queue);
        assert_eq!(queue.front, queue.rear);

        queue.enqueue(2);
        queue.enqueue(3);
        assert_well_formed(&queue);

        assert_eq!(queue.dequeue(), Ok(1));
        assert_eq!(queue.dequeue(), Ok(2));
        assert_eq!(queue.dequeue(), Ok(3));
        assert_well_formed(&queue);
        assert!(queue.rear.is_none());
    }

    #[test]
    fn test_underflow() {
        let mut queue = LinkedListQueue::<u8>::new();
        assert_eq!(queue.dequeue().unwrap_err().kind(), ErrorKind::Underflow);
        assert_eq!(queue.peek().unwrap_err().kind(), ErrorKind::Underflow);
        assert_eq!(queue.peek_rear().unwrap_err().kind(), ErrorKind::Underflow);
        assert_eq!(queue.len(), 0);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1])]
    #[case(vec![1, 2])]
    #[case(vec![1, 2, 3, 4, 5])]
    fn test_reverse_is_involution(#[case] values: Vec<i32>) {
        let mut queue: LinkedListQueue<i32> = values.iter().copied().collect();

        queue.reverse();
        assert_well_formed(&queue);
        let reversed: Vec<i32> = values.iter().rev().copied().collect();
        assert_eq!(queue.to_vec(), reversed);

        queue.reverse();
        assert_well_formed(&queue);
        assert_eq!(queue.to_vec(), values);
    }

    #[test]
    fn test_reverse_then_enqueue() {
        let mut queue: LinkedListQueue<i32> = (1..=3).collect();
        queue.reverse();
        queue.enqueue(0);
        assert_well_formed(&queue);
        assert_eq!(queue.to_vec(), vec![3, 2, 1, 0]);
        assert_eq!(queue.peek(), Ok(&3));
        assert_eq!(queue.peek_rear(), Ok(&0));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original: LinkedListQueue<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.dequeue().unwrap();
        copy.enqueue("d".to_owned());
        assert_eq!(original.to_vec(), vec!["a", "b", "c"]);

        original.reverse();
        assert_eq!(copy.to_vec(), vec!["b", "c", "d"]);
        assert_well_formed(&copy);
    }

    #[test]
    fn test_contains_and_index_of() {
        let queue: LinkedListQueue<char> = "xyz".chars().collect();
        assert!(queue.contains(&'y'));
        assert!(!queue.contains(&'w'));
        assert_eq!(queue.index_of(&'x'), Some(1));
        assert_eq!(queue.index_of(&'z'), Some(3));
        assert_eq!(queue.index_of(&'w'), None);
    }

    #[test]
    fn test_to_vec_round_trip() {
        let queue: LinkedListQueue<i32> = (1..=5).collect();
        let rebuilt: LinkedListQueue<i32> = queue.to_vec().into_iter().collect();
        assert_eq!(rebuilt, queue);
    }

    #[test]
    fn test_size_accounting() {
        let mut queue = LinkedListQueue::new();
        for i in 0..10 {
            queue.enqueue(i);
        }
        for _ in 0..7 {
            queue.dequeue().unwrap();
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.iter().len(), 3);
    }

    #[test]
    fn test_clear_and_drop_release_values() {
        let drops = Rc::new(Cell::new(0));
        let mut queue = LinkedListQueue::new();
        for _ in 0..3 {
            queue.enqueue(DropCounter(drops.clone()));
        }
        queue.clear();
        assert_eq!(drops.get(), 3);
        assert_well_formed(&queue);

        queue.enqueue(DropCounter(drops.clone()));
        queue.enqueue(DropCounter(drops.clone()));
        drop(queue.dequeue().unwrap());
        assert_eq!(drops.get(), 4);
        drop(queue);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn test_long_chain_drop() {
        let queue: LinkedListQueue<u32> = (0..200_000).collect();
        assert_eq!(queue.len(), 200_000);
        drop(queue);
    }

    #[test]
    fn test_display_and_debug() {
        let mut queue = LinkedListQueue::<&str>::new();
        assert_eq!(queue.to_string(), "Queue: [] (empty)");

        queue.extend(["a", "b", "c"]);
        assert_eq!(queue.to_string(), "Queue (front to rear): [a <- b <- c]");
        assert_eq!(format!("{queue:?}"), r#"["a", "b", "c"]"#);
    }
}
