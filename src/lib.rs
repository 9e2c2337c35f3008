//! This crate provides a doubly-linked list with owned nodes, implemented as a
//! cyclic list around a sentinel node, together with in-place list algorithms
//! and a queue of owned strings built on it.
//!
//! The [`List`] inserts and removes at both ends in constant time. Every other
//! operation (counting, deleting the middle element, collapsing duplicate
//! runs, swapping pairs, reversing, sorting, shuffling) only rewires links:
//! no node is allocated, copied or moved in memory.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use ring_queue::Queue;
//!
//! let mut queue = Queue::new();
//! for value in ["c", "a", "c", "b", "a"].iter() {
//!     queue.insert_tail(value).unwrap();
//! }
//!
//! queue.sort(); // a a b c c
//! queue.delete_duplicates(); // b
//! assert_eq!(queue.size(), 1);
//!
//! let element = queue.remove_head(None).unwrap();
//! assert_eq!(element.value(), "b");
//! element.release();
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑   ↑
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains only a pointer `ghost` to the ghost node. It keeps no
//! length counter; [`List::len`] walks the ring.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - the actual payload `T`, except the ghost node.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and `prev`
//! pointer point to itself.
//!
//! # Removing versus releasing
//!
//! [`List::pop_front_element`] and [`List::pop_back_element`] (and the queue's
//! `remove_head`/`remove_tail`) only unlink: the returned [`Element`] still owns
//! its node and payload until it is released or dropped. The deleting
//! algorithms ([`List::remove_middle`], [`List::remove_duplicate_runs`]) release
//! what they unlink.
//!
//! # Allocation failures
//!
//! Node storage comes straight from the global allocator, so failures are
//! reported as [`Error`] by [`List::try_new`], [`List::try_push_front_with`],
//! [`List::try_push_back_with`] and the queue inserts, instead of aborting.
//! A failed insert leaves the list untouched.
//!
//! # Features
//!
//! - `std-rng` (default): adds [`List::shuffle`] and [`queue::shuffle`], which
//!   draw from `rand::thread_rng()`. [`List::shuffle_with`] takes any
//!   [`rand::Rng`] and is always available.
//!
//! [`List`]: crate::List
//! [`Element`]: crate::Element

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use list::element::Element;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::Queue;

pub mod list;
pub mod queue;

mod error;
