//! Type aliases for shared state.
//!
//! Settings stores are handed to several widgets at once and nested stores
//! are referenced from their parent, so the crates pass them around as
//! `Rc<RefCell<T>>`. Everything here is single-threaded: the store is meant
//! to live on the GUI thread.
//!
//! ## Usage
//!
//! ```rust
//! use settingsbox_core::types::{shared, Shared};
//!
//! let counter: Shared<u32> = shared(0);
//! *counter.borrow_mut() += 1;
//! assert_eq!(*counter.borrow(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Cloning a `Shared<T>` clones the handle, not the value: both handles
/// observe the same state. `Rc::ptr_eq` tells whether two handles point at
/// the same value.
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new empty `SharedVec<T>`.
#[inline]
pub fn shared_vec<T>() -> SharedVec<T> {
    Rc::new(RefCell::new(Vec::new()))
}
