use alloc::boxed::Box;
use ::core::{fmt, marker::PhantomData, ptr::NonNull};

use crate::{
    error::{Collection, CollectionError},
    node::{self, Link, ListIter, Node},
    traits::Stack,
};

/// An unbounded LIFO stack over a singly linked chain owned through `top`.
pub struct LinkedListStack<T> {
    top: Link<T>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedListStack<T> {
    /// Creates an empty stack.
    #[inline]
    pub const fn new() -> Self {
        Self {
            top: None,
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
        self.top.is_none()
    }

    /// Places an element on top of the stack.
    pub fn push(&mut self, value: T) {
        self.top = Some(Node::alloc(value, self.top));
        self.len += 1;
    }

    /// Removes the top element and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::LinkedListStack;
    ///
    /// let mut stack = LinkedListStack::new();
    /// stack.push(1);
    /// stack.push(2);
    ///
    /// assert_eq!(stack.pop(), Ok(2));
    /// assert_eq!(stack.pop(), Ok(1));
    /// assert!(stack.pop().is_err());
    /// ```
    pub fn pop(&mut self) -> Result<T, CollectionError<T>> {
        let top = self.top.ok_or_else(|| CollectionError::underflow(Collection::Stack))?;
        let (value, next) = unsafe { Node::free(top) };
        self.top = next;
        self.len -= 1;
        Ok(value)
    }

    /// Provides a reference to the top element.
    pub fn peek(&self) -> Result<&T, CollectionError<T>> {
        match self.top {
            Some(top) => Ok(unsafe { &(*top.as_ptr()).data }),
            None => Err(CollectionError::underflow(Collection::Stack)),
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        let top = self.top.take();
        self.len = 0;
        unsafe { node::free_chain(top) };
    }

    /// Reverses the stack in place: the bottom element becomes the top.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::LinkedListStack;
    ///
    /// let mut stack: LinkedListStack<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(stack.peek(), Ok(&3));
    ///
    /// stack.reverse();
    /// assert_eq!(stack.peek(), Ok(&1));
    /// ```
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        self.top = unsafe { node::reverse(self.top) };
    }

    /// Iterates from top to bottom.
    #[inline]
    pub fn iter(&self) -> ListIter<'_, T> {
        unsafe { ListIter::new(self.top, self.len) }
    }
}

impl<T: PartialEq> LinkedListStack<T> {
    /// Returns the 1-based distance of `value` from the top, or `None` if
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::LinkedListStack;
    ///
    /// let mut stack = LinkedListStack::new();
    /// stack.push("a");
    /// stack.push("b");
    /// stack.push("c");
    ///
    /// assert_eq!(stack.search(&"c"), Some(1));
    /// assert_eq!(stack.search(&"a"), Some(3));
    /// assert_eq!(stack.search(&"z"), None);
    /// ```
    pub fn search(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value).map(|pos| pos + 1)
    }
}

impl<T> Default for LinkedListStack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedListStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Deep copy: new cells holding clones of the values, in the same order.
impl<T: Clone> Clone for LinkedListStack<T> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        // append below the copied prefix so the order is kept
        let mut bottom: Option<NonNull<Node<T>>> = None;
        for value in self.iter() {
            let node = Node::alloc(value.clone(), None);
            match bottom {
                None => out.top = Some(node),
                Some(bottom) => unsafe { (*bottom.as_ptr()).next = Some(node) },
            }
            bottom = Some(node);
            out.len += 1;
        }
        out
    }
}

/// Pushes in iteration order, so the last item ends up on top.
impl<T> FromIterator<T> for LinkedListStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T> Extend<T> for LinkedListStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedListStack<T> {
    type Item = &'a T;
    type IntoIter = ListIter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for LinkedListStack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedListStack<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedListStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedListStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Stack: [] (empty)");
        }
        f.write_str("Stack (top to bottom): [")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T> Stack<T> for LinkedListStack<T> {
    #[inline]
    fn push(&mut self, value: T) -> Result<(), CollectionError<T>> {
        LinkedListStack::push(self, value);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Result<T, CollectionError<T>> {
        LinkedListStack::pop(self)
    }

    #[inline]
    fn peek(&self) -> Result<&T, CollectionError<T>> {
        LinkedListStack::peek(self)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

unsafe impl<T: Send> Send for LinkedListStack<T> {}
unsafe impl<T: Sync> Sync for LinkedListStack<T> {}
