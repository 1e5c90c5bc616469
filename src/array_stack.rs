use ::core::{fmt, ptr, slice};

use crate::{
    buffer::{Slots, assume_init_slice, assume_init_slice_mut, try_uninit_slots, uninit_slots},
    error::{Collection, CollectionError},
    traits::Stack,
};

/// A fixed capacity LIFO stack. Slots `0..len` are occupied, the top being
/// at `len - 1`.
pub struct ArrayStack<T> {
    buf: Slots<T>,
    len: usize,
}

impl<T> ArrayStack<T> {
    /// Creates an empty stack holding at most `capacity` elements.
    ///
    /// Returns `Err` if `capacity` is 0 or too large to allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayStack;
    ///
    /// let stack: ArrayStack<u8> = ArrayStack::new(2).unwrap();
    /// assert_eq!(stack.capacity(), 2);
    /// assert!(ArrayStack::<u8>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CollectionError<T>> {
        if capacity < 1 {
            return Err(CollectionError::invalid_capacity(Collection::Stack, capacity));
        }
        let buf = try_uninit_slots(capacity)
            .map_err(|_| CollectionError::invalid_capacity(Collection::Stack, capacity))?;
        Ok(Self {
            buf,
            len: 0,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

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

    /// # Safety
    ///
    /// Must not be full.
    #[inline]
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(!self.is_full());

        unsafe { self.buf.get_unchecked_mut(self.len) }.write(value);
        self.len += 1;
    }

    /// # Safety
    ///
    /// Must not be empty.
    #[inline]
    pub unsafe fn pop_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty());

        self.len -= 1;
        unsafe { self.buf.get_unchecked(self.len).assume_init_read() }
    }

    /// Places an element on top of the stack.
    ///
    /// Returns `Err` holding `value` if the stack is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayStack;
    ///
    /// let mut stack = ArrayStack::new(2).unwrap();
    ///
    /// stack.push(1).unwrap();
    /// stack.push(2).unwrap();
    ///
    /// let overflow = stack.push(3);
    ///
    /// assert!(overflow.is_err());
    /// assert_eq!(stack.peek(), Ok(&2));
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), CollectionError<T>> {
        if self.is_full() {
            return Err(CollectionError::overflow(Collection::Stack, value, self.capacity()));
        }
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Removes the top element and returns it.
    #[inline]
    pub fn pop(&mut self) -> Result<T, CollectionError<T>> {
        if self.is_empty() {
            return Err(CollectionError::underflow(Collection::Stack));
        }
        Ok(unsafe { self.pop_unchecked() })
    }

    /// Provides a reference to the top element.
    #[inline]
    pub fn peek(&self) -> Result<&T, CollectionError<T>> {
        if self.is_empty() {
            return Err(CollectionError::underflow(Collection::Stack));
        }
        Ok(unsafe { self.buf.get_unchecked(self.len - 1).assume_init_ref() })
    }

    /// Returns the elements from bottom to top.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { assume_init_slice(self.buf.get_unchecked(..self.len)) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { assume_init_slice_mut(self.buf.get_unchecked_mut(..self.len)) }
    }

    /// Iterates from bottom to top.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Drops every element.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayStack;
    ///
    /// let mut stack = ArrayStack::new(3).unwrap();
    /// stack.push('a').unwrap();
    /// stack.push('b').unwrap();
    /// stack.clear();
    ///
    /// assert!(stack.is_empty());
    /// assert!(stack.pop().is_err());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        let values = self.as_mut_slice() as *mut [T];
        self.len = 0;
        unsafe { ptr::drop_in_place(values) };
    }
}

impl<T: Clone> Clone for ArrayStack<T> {
    fn clone(&self) -> Self {
        let mut out = Self {
            buf: uninit_slots(self.capacity()),
            len: 0,
        };
        for value in self.iter() {
            unsafe { out.push_unchecked(value.clone()) };
        }
        out
    }
}

impl<T> Drop for ArrayStack<T> {
    #[inline(always)]
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayStack")
            .field("items", &self.as_slice())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Stack: []");
        }
        f.write_str("Stack: [")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("] <- top")
    }
}

/// Compares the bottom to top sequence; capacity is ignored.
impl<T: PartialEq> PartialEq for ArrayStack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArrayStack<T> {}

impl<'a, T> IntoIterator for &'a ArrayStack<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Stack<T> for ArrayStack<T> {
    #[inline]
    fn push(&mut self, value: T) -> Result<(), CollectionError<T>> {
        ArrayStack::push(self, value)
    }

    #[inline]
    fn pop(&mut self) -> Result<T, CollectionError<T>> {
        ArrayStack::pop(self)
    }

    #[inline]
    fn peek(&self) -> Result<&T, CollectionError<T>> {
        ArrayStack::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

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

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(16)]
    fn test_overflow_at_capacity(#[case] capacity: usize) {
        let mut stack = ArrayStack::new(capacity).unwrap();
        for i in 0..capacity {
            stack.push(i).unwrap();
        }
        assert!(stack.is_full());

        let err = stack.push(capacity).unwrap_err();
        assert_eq!(err, CollectionError::Overflow { kind: Collection::Stack, value: capacity });
        assert_eq!(stack.len(), capacity);
        assert_eq!(stack.peek(), Ok(&(capacity - 1)));
    }

    #[test]
    fn test_invalid_capacity() {
        let err = ArrayStack::<i32>::new(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.collection(), Collection::Stack);
    }

    #[rstest]
    #[case(usize::MAX)]
    #[case(usize::MAX / 4)]
    fn test_unallocatable_capacity(#[case] capacity: usize) {
        let err = ArrayStack::<u64>::new(capacity).unwrap_err();
        assert_eq!(err, CollectionError::InvalidArgument { kind: Collection::Stack, capacity });
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = ArrayStack::new(4).unwrap();
        stack.push("a").unwrap();
        stack.push("b").unwrap();
        stack.push("c").unwrap();
        assert_eq!(stack.pop(), Ok("c"));
        stack.push("d").unwrap();
        assert_eq!(stack.pop(), Ok("d"));
        assert_eq!(stack.pop(), Ok("b"));
        assert_eq!(stack.pop(), Ok("a"));
        assert_eq!(stack.pop().unwrap_err().kind(), ErrorKind::Underflow);
        assert_eq!(stack.peek().unwrap_err().kind(), ErrorKind::Underflow);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_size_accounting() {
        let mut stack = ArrayStack::new(10).unwrap();
        for i in 0..7 {
            stack.push(i).unwrap();
        }
        for _ in 0..5 {
            stack.pop().unwrap();
        }
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_clone() {
        let mut a = ArrayStack::new(3).unwrap();
        a.push("1".to_owned()).unwrap();
        a.push("2".to_owned()).unwrap();

        let mut b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.capacity(), 3);

        b.as_mut_slice()[0].push('x');
        b.pop().unwrap();
        assert_eq!(a.as_slice(), &["1", "2"]);
        assert_eq!(b.as_slice(), &["1x"]);
    }

    #[test]
    fn test_drops_every_value_once() {
        let drops = Rc::new(Cell::new(0));
        let mut stack = ArrayStack::new(4).unwrap();
        for _ in 0..4 {
            stack.push(DropCounter(drops.clone())).unwrap();
        }
        drop(stack.pop().unwrap());
        assert_eq!(drops.get(), 1);

        stack.clear();
        assert_eq!(drops.get(), 4);
        assert!(stack.is_empty());

        stack.push(DropCounter(drops.clone())).unwrap();
        drop(stack);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn test_display() {
        let mut stack = ArrayStack::<i32>::new(3).unwrap();
        assert_eq!(stack.to_string(), "Stack: []");

        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.push(3).unwrap();
        assert_eq!(stack.to_string(), "Stack: [1, 2, 3] <- top");
    }

    #[test]
    fn test_iter_bottom_to_top() {
        let mut stack = ArrayStack::new(3).unwrap();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!((&stack).into_iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}
