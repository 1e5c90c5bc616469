use alloc::boxed::Box;
use ::core::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

/// Link to the next cell of a chain.
///
/// A non-null link owns the cell it points to: every cell is reachable from
/// exactly one link, either a predecessor's `next` or the head slot of its
/// container. Cells are allocated by [`Node::alloc`] and released by
/// [`Node::free`].
pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    #[inline]
    pub(crate) fn alloc(data: T, next: Link<T>) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { data, next })))
    }

    /// Releases a cell, handing back its value and its outgoing link.
    ///
    /// # Safety
    ///
    /// `node` must come from [`Node::alloc`], must not have been freed, and
    /// no link or reference to it may be used afterwards.
    #[inline]
    pub(crate) unsafe fn free(node: NonNull<Node<T>>) -> (T, Link<T>) {
        let node = unsafe { Box::from_raw(node.as_ptr()) };
        (node.data, node.next)
    }
}

/// Drops every cell reachable from `head`, one at a time.
///
/// # Safety
///
/// `head` must own its chain and nothing may use the chain afterwards.
pub(crate) unsafe fn free_chain<T>(mut head: Link<T>) {
    while let Some(node) = head {
        let (data, next) = unsafe { Node::free(node) };
        head = next;
        drop(data);
    }
}

/// Reverses the links of the chain starting at `head` and returns the new
/// head, which is the former last cell.
///
/// # Safety
///
/// `head` must own a well formed chain.
pub(crate) unsafe fn reverse<T>(head: Link<T>) -> Link<T> {
    let mut prev = None;
    let mut current = head;
    while let Some(node) = current {
        let next = unsafe { (*node.as_ptr()).next };
        unsafe { (*node.as_ptr()).next = prev };
        prev = Some(node);
        current = next;
    }
    prev
}

/// Borrowing iterator over a chain of cells, following `next` links.
///
/// Yields front to rear for [`LinkedListQueue`](crate::LinkedListQueue) and
/// top to bottom for [`LinkedListStack`](crate::LinkedListStack).
pub struct ListIter<'a, T> {
    head: Link<T>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> ListIter<'a, T> {
    /// # Safety
    ///
    /// `head` must start a chain of at least `len` cells that stays alive and
    /// unmodified for `'a`.
    #[inline]
    pub(crate) unsafe fn new(head: Link<T>, len: usize) -> Self {
        Self {
            head,
            len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            let node = unsafe { &*node.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.data
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for ListIter<'_, T> {}

impl<T> FusedIterator for ListIter<'_, T> {}

impl<T> Clone for ListIter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for ListIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

unsafe impl<T: Sync> Send for ListIter<'_, T> {}
unsafe impl<T: Sync> Sync for ListIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(values: &[i32]) -> Link<i32> {
        values.iter().rev().fold(None, |next, &v| Some(Node::alloc(v, next)))
    }

    fn collect(head: Link<i32>, len: usize) -> Vec<i32> {
        unsafe { ListIter::new(head, len) }.copied().collect()
    }

    #[test]
    fn test_reverse() {
        let head = chain(&[1, 2, 3]);
        let reversed = unsafe { reverse(head) };
        assert_eq!(collect(reversed, 3), vec![3, 2, 1]);

        let restored = unsafe { reverse(reversed) };
        assert_eq!(collect(restored, 3), vec![1, 2, 3]);
        unsafe { free_chain(restored) };
    }

    #[test]
    fn test_reverse_short_chains() {
        assert!(unsafe { reverse::<i32>(None) }.is_none());

        let single = chain(&[9]);
        let reversed = unsafe { reverse(single) };
        assert_eq!(reversed, single);
        unsafe { free_chain(reversed) };
    }

    #[test]
    fn test_free_hands_back_value() {
        let head = chain(&[4, 5]);
        let (value, next) = unsafe { Node::free(head.unwrap()) };
        assert_eq!(value, 4);
        assert_eq!(collect(next, 1), vec![5]);
        unsafe { free_chain(next) };
    }

    #[test]
    fn test_iter_stops_at_len() {
        let head = chain(&[1, 2, 3]);
        let iter = unsafe { ListIter::new(head, 2) };
        assert_eq!(iter.len(), 2);
        assert_eq!(format!("{iter:?}"), "[1, 2]");
        unsafe { free_chain(head) };
    }
}
