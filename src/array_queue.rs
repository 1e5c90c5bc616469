use alloc::vec::Vec;
use ::core::{
    fmt,
    iter::{Chain, FusedIterator},
    ops::Range,
    ptr, slice,
};

use crate::{
    buffer::{Slots, assume_init_slice, assume_init_slice_mut, try_uninit_slots, uninit_slots},
    error::{Collection, CollectionError},
    traits::Queue,
};

/// A fixed capacity FIFO queue over a circular buffer.
///
/// `enqueue` writes behind `rear`, `dequeue` reads at `front`, and both
/// indices wrap around the end of the buffer.
pub struct ArrayQueue<T> {
    buf: Slots<T>,
    front: usize,
    rear: usize,
    len: usize,
}

impl<T> ArrayQueue<T> {
    /// Creates an empty queue holding at most `capacity` elements.
    ///
    /// Returns `Err` if `capacity` is 0 or too large to allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::{ArrayQueue, ErrorKind};
    ///
    /// let queue: ArrayQueue<u8> = ArrayQueue::new(3).unwrap();
    /// assert_eq!(queue.capacity(), 3);
    ///
    /// let err = ArrayQueue::<u8>::new(0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CollectionError<T>> {
        if capacity < 1 {
            return Err(CollectionError::invalid_capacity(Collection::Queue, capacity));
        }
        let buf = try_uninit_slots(capacity)
            .map_err(|_| CollectionError::invalid_capacity(Collection::Queue, capacity))?;
        Ok(Self {
            buf,
            front: 0,
            rear: capacity - 1,
            len: 0,
        })
    }

    /// Returns the maximum number of elements.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of elements in the queue.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    fn wrap_next(&self, idx: usize) -> usize {
        let next = idx + 1;
        if next == self.capacity() { 0 } else { next }
    }

    /// Back to the canonical empty state: the next write lands on slot 0.
    #[inline]
    fn reset(&mut self) {
        self.front = 0;
        self.rear = self.capacity() - 1;
        self.len = 0;
    }

    /// # Safety
    ///
    /// Must not be full.
    #[inline]
    pub unsafe fn enqueue_unchecked(&mut self, value: T) {
        debug_assert!(!self.is_full());

        self.rear = self.wrap_next(self.rear);
        unsafe { self.buf.get_unchecked_mut(self.rear) }.write(value);
        self.len += 1;
    }

    /// # Safety
    ///
    /// Must not be empty.
    #[inline]
    pub unsafe fn dequeue_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty());

        let value = unsafe { self.buf.get_unchecked(self.front).assume_init_read() };
        if self.len == 1 {
            self.reset();
        } else {
            self.front = self.wrap_next(self.front);
            self.len -= 1;
        }
        value
    }

    /// Adds an element at the rear of the queue.
    ///
    /// Returns `Err` holding `value` if the queue is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::{ArrayQueue, ErrorKind};
    ///
    /// let mut queue = ArrayQueue::new(2).unwrap();
    ///
    /// queue.enqueue(1).unwrap();
    /// queue.enqueue(2).unwrap();
    ///
    /// let overflow = queue.enqueue(3).unwrap_err();
    ///
    /// assert_eq!(overflow.kind(), ErrorKind::Overflow);
    /// assert_eq!(overflow.into_value(), Some(3));
    /// assert_eq!(queue.len(), 2);
    /// ```
    #[inline]
    pub fn enqueue(&mut self, value: T) -> Result<(), CollectionError<T>> {
        if self.is_full() {
            return Err(CollectionError::overflow(Collection::Queue, value, self.capacity()));
        }
        unsafe { self.enqueue_unchecked(value) };
        Ok(())
    }

    /// Removes the front element and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayQueue;
    ///
    /// let mut queue = ArrayQueue::new(2).unwrap();
    /// assert!(queue.dequeue().is_err());
    ///
    /// queue.enqueue(1).unwrap();
    /// queue.enqueue(2).unwrap();
    ///
    /// assert_eq!(queue.dequeue(), Ok(1));
    /// assert_eq!(queue.dequeue(), Ok(2));
    /// assert!(queue.dequeue().is_err());
    /// ```
    #[inline]
    pub fn dequeue(&mut self) -> Result<T, CollectionError<T>> {
        if self.is_empty() {
            return Err(CollectionError::underflow(Collection::Queue));
        }
        Ok(unsafe { self.dequeue_unchecked() })
    }

    /// Provides a reference to the front element.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayQueue;
    ///
    /// let mut queue = ArrayQueue::new(2).unwrap();
    /// assert!(queue.peek().is_err());
    ///
    /// queue.enqueue(1).unwrap();
    /// queue.enqueue(2).unwrap();
    ///
    /// assert_eq!(queue.peek(), Ok(&1));
    /// assert_eq!(queue.peek_rear(), Ok(&2));
    /// ```
    #[inline]
    pub fn peek(&self) -> Result<&T, CollectionError<T>> {
        if self.is_empty() {
            return Err(CollectionError::underflow(Collection::Queue));
        }
        Ok(unsafe { self.buf.get_unchecked(self.front).assume_init_ref() })
    }

    /// Provides a reference to the rear element.
    #[inline]
    pub fn peek_rear(&self) -> Result<&T, CollectionError<T>> {
        if self.is_empty() {
            return Err(CollectionError::underflow(Collection::Queue));
        }
        Ok(unsafe { self.buf.get_unchecked(self.rear).assume_init_ref() })
    }

    /// Physical ranges of the occupied slots, front part first.
    #[inline]
    fn occupied_ranges(&self) -> (Range<usize>, Range<usize>) {
        let head_len = (self.capacity() - self.front).min(self.len);
        (self.front..self.front + head_len, 0..self.len - head_len)
    }

    /// Returns a pair of slices which contain, in front to rear order, the
    /// contents of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayQueue;
    ///
    /// let mut queue = ArrayQueue::new(3).unwrap();
    ///
    /// assert_eq!(queue.as_slices(), (&[][..], &[][..]));
    ///
    /// queue.enqueue(1).unwrap();
    /// queue.enqueue(2).unwrap();
    /// queue.enqueue(3).unwrap();
    /// queue.dequeue().unwrap();
    /// queue.enqueue(4).unwrap();
    ///
    /// assert_eq!(queue.as_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (head, tail) = self.occupied_ranges();
        unsafe {
            (
                assume_init_slice(self.buf.get_unchecked(head)),
                assume_init_slice(self.buf.get_unchecked(tail)),
            )
        }
    }

    /// Mutable variant of [`as_slices`](Self::as_slices).
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (head, tail) = self.occupied_ranges();
        let (left, right) = self.buf.split_at_mut(head.start);
        unsafe {
            (
                assume_init_slice_mut(right.get_unchecked_mut(..head.len())),
                assume_init_slice_mut(left.get_unchecked_mut(tail)),
            )
        }
    }

    /// Iterates from front to rear.
    #[inline]
    pub fn iter(&self) -> ArrayQueueIter<'_, T> {
        let (head, tail) = self.as_slices();
        ArrayQueueIter(head.iter().chain(tail))
    }

    fn drop_values(&mut self) {
        let (head, tail) = self.as_mut_slices();
        let (head, tail) = (head as *mut [T], tail as *mut [T]);
        // indexes go first so a panicking drop cannot lead to a double drop
        self.reset();
        unsafe {
            ptr::drop_in_place(head);
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element and resets the queue to its empty state.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayQueue;
    ///
    /// let mut queue = ArrayQueue::new(4).unwrap();
    ///
    /// queue.enqueue(1).unwrap();
    /// queue.enqueue(2).unwrap();
    /// queue.clear();
    ///
    /// assert!(queue.is_empty());
    /// assert_eq!(queue.capacity(), 4);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.drop_values();
    }

    /// Diagnostic view of the raw slots, see [`DetailedView`].
    pub fn detailed(&self) -> DetailedView<'_, T> {
        DetailedView(self)
    }
}

impl<T: PartialEq> ArrayQueue<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Returns the 1-based position of `value` counted from the front, or
    /// `None` if absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayQueue;
    ///
    /// let mut queue = ArrayQueue::new(3).unwrap();
    /// queue.enqueue('a').unwrap();
    /// queue.enqueue('b').unwrap();
    ///
    /// assert_eq!(queue.index_of(&'b'), Some(2));
    /// assert_eq!(queue.index_of(&'z'), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value).map(|pos| pos + 1)
    }
}

impl<T: Clone> ArrayQueue<T> {
    /// Copies the elements, front to rear, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone> Clone for ArrayQueue<T> {
    fn clone(&self) -> Self {
        let mut out = Self {
            buf: uninit_slots(self.capacity()),
            front: self.front,
            rear: self.rear,
            len: 0,
        };
        // same physical slots as the original; `len` tracks what is written
        let mut idx = self.front;
        for value in self.iter() {
            unsafe { out.buf.get_unchecked_mut(idx) }.write(value.clone());
            out.len += 1;
            idx = self.wrap_next(idx);
        }
        out
    }
}

impl<T> Drop for ArrayQueue<T> {
    #[inline(always)]
    fn drop(&mut self) {
        self.drop_values();
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayQueue")
            .field("items", &self.as_slices())
            .field("front", &self.front)
            .field("rear", &self.rear)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayQueue<T> {
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
        write!(f, "] | Size: {}/{}", self.len, self.capacity())
    }
}

/// Compares the logical front to rear sequence; capacity is ignored.
impl<T: PartialEq> PartialEq for ArrayQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ArrayQueue<T> {}

impl<'a, T> IntoIterator for &'a ArrayQueue<T> {
    type Item = &'a T;
    type IntoIter = ArrayQueueIter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Queue<T> for ArrayQueue<T> {
    #[inline]
    fn enqueue(&mut self, value: T) -> Result<(), CollectionError<T>> {
        ArrayQueue::enqueue(self, value)
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, CollectionError<T>> {
        ArrayQueue::dequeue(self)
    }

    #[inline]
    fn peek(&self) -> Result<&T, CollectionError<T>> {
        ArrayQueue::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

/// Front to rear iterator over an [`ArrayQueue`].
pub struct ArrayQueueIter<'a, T>(Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>);

impl<T> Clone for ArrayQueueIter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, T> Iterator for ArrayQueueIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> DoubleEndedIterator for ArrayQueueIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<T> ExactSizeIterator for ArrayQueueIter<'_, T> {}

impl<T> FusedIterator for ArrayQueueIter<'_, T> {}

/// Raw slot layout of an [`ArrayQueue`], for diagnostics.
///
/// Vacant slots print as `_`; the front and rear slots are marked `(F)` and
/// `(R)`, or `(F,R)` when they coincide. An empty queue only marks `(F)`.
///
/// ```
/// use fifo_lifo::ArrayQueue;
///
/// let mut queue = ArrayQueue::new(3).unwrap();
/// queue.enqueue(1).unwrap();
/// queue.enqueue(2).unwrap();
/// queue.dequeue().unwrap();
///
/// assert_eq!(
///     queue.detailed().to_string(),
///     "Array state: [_, 2(F,R), _]\nfront=1, rear=1, size=1/3"
/// );
/// ```
pub struct DetailedView<'a, T>(&'a ArrayQueue<T>);

impl<T: fmt::Display> fmt::Display for DetailedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.0;
        let cap = queue.capacity();

        f.write_str("Array state: [")?;
        for idx in 0..cap {
            if idx > 0 {
                f.write_str(", ")?;
            }
            // distance from front, in slots
            let offset = (idx + cap - queue.front) % cap;
            if offset < queue.len {
                let value = unsafe { queue.buf.get_unchecked(idx).assume_init_ref() };
                write!(f, "{value}")?;
            } else {
                f.write_str("_")?;
            }
            // an empty queue has no rear slot, only the front marker
            match (idx == queue.front, idx == queue.rear && !queue.is_empty()) {
                (true, true) => f.write_str("(F,R)")?,
                (true, false) => f.write_str("(F)")?,
                (false, true) => f.write_str("(R)")?,
                (false, false) => {}
            }
        }
        f.write_str("]\n")?;

        if queue.is_empty() {
            write!(f, "front={}, rear=-1, size=0/{}", queue.front, cap)
        } else {
            write!(f, "front={}, rear={}, size={}/{}", queue.front, queue.rear, queue.len, cap)
        }
    }
}
