//! # FIFO / LIFO
//!
//! Queues and stacks, each backed either by a fixed-capacity circular array
//! or by a singly linked list.
//!
//! | | fixed capacity | unbounded |
//! |---|---|---|
//! | FIFO | [`ArrayQueue`] | [`LinkedListQueue`] |
//! | LIFO | [`ArrayStack`] | [`LinkedListStack`] |
//!
//! Every fallible operation returns a [`CollectionError`], and a failed
//! operation leaves the container untouched.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

mod array_queue;
mod array_stack;
mod buffer;
mod error;
mod linked_queue;
mod linked_stack;
mod node;
#[cfg(feature = "serde")]
mod serde_impls;
mod traits;

pub use array_queue::{ArrayQueue, ArrayQueueIter, DetailedView};
pub use array_stack::ArrayStack;
pub use error::{Collection, CollectionError, ErrorKind};
pub use linked_queue::LinkedListQueue;
pub use linked_stack::LinkedListStack;
pub use node::ListIter;
pub use traits::{Queue, Stack};
