//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: `Shared<T>` and `SharedVec<T>` aliases over `Rc<RefCell<_>>`.

pub mod aliases;

pub use aliases::*;
