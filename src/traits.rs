use crate::error::CollectionError;

/// First-in first-out container.
///
/// Implemented by [`ArrayQueue`](crate::ArrayQueue) and
/// [`LinkedListQueue`](crate::LinkedListQueue). The unbounded implementation
/// never returns an overflow from `enqueue`.
///
/// # Examples
///
/// ```
/// use fifo_lifo::{ArrayQueue, LinkedListQueue, Queue};
///
/// fn drain<Q: Queue<u32>>(queue: &mut Q) -> Vec<u32> {
///     let mut out = Vec::new();
///     while let Ok(value) = queue.dequeue() {
///         out.push(value);
///     }
///     out
/// }
///
/// let mut bounded = ArrayQueue::new(2).unwrap();
/// let mut unbounded = LinkedListQueue::new();
/// for value in [1, 2] {
///     Queue::enqueue(&mut bounded, value).unwrap();
///     Queue::enqueue(&mut unbounded, value).unwrap();
/// }
///
/// assert_eq!(drain(&mut bounded), drain(&mut unbounded));
/// ```
pub trait Queue<T> {
    /// Adds `value` at the rear.
    fn enqueue(&mut self, value: T) -> Result<(), CollectionError<T>>;

    /// Removes and returns the front element.
    fn dequeue(&mut self) -> Result<T, CollectionError<T>>;

    /// Borrows the front element.
    fn peek(&self) -> Result<&T, CollectionError<T>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last-in first-out container.
///
/// Implemented by [`ArrayStack`](crate::ArrayStack) and
/// [`LinkedListStack`](crate::LinkedListStack).
pub trait Stack<T> {
    /// Places `value` on top.
    fn push(&mut self, value: T) -> Result<(), CollectionError<T>>;

    /// Removes and returns the top element.
    fn pop(&mut self) -> Result<T, CollectionError<T>>;

    /// Borrows the top element.
    fn peek(&self) -> Result<&T, CollectionError<T>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
