//! Ordered callback lists
//!
//! A widget may be given a single callback or several; either way they are
//! kept in a [`Callbacks`] list and invoked in the order they were added.

use std::fmt;

/// An ordered list of listeners receiving `&A`.
///
/// `Callbacks<()>` is the zero-argument form, fired with [`Callbacks::fire`].
pub struct Callbacks<A: ?Sized = ()> {
    listeners: Vec<Box<dyn Fn(&A)>>,
}

impl<A: ?Sized> Callbacks<A> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener
    pub fn push<F>(&mut self, callback: F)
    where
        F: Fn(&A) + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    /// Builder form of [`Callbacks::push`]
    pub fn with<F>(mut self, callback: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        self.push(callback);
        self
    }

    /// Invoke every listener, first added first
    pub fn invoke(&self, arg: &A) {
        if !self.listeners.is_empty() {
            tracing::trace!(count = self.listeners.len(), "invoking callbacks");
        }
        for listener in &self.listeners {
            listener(arg);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Callbacks<()> {
    /// Invoke every zero-argument listener
    pub fn fire(&self) {
        self.invoke(&());
    }
}

impl<A: ?Sized> Default for Callbacks<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for Callbacks<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("len", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{shared_vec, SharedVec};
    use std::rc::Rc;

    #[test]
    fn test_invoked_in_insertion_order() {
        let log: SharedVec<&'static str> = shared_vec();
        let mut callbacks = Callbacks::new();
        let first = Rc::clone(&log);
        callbacks.push(move |_: &()| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        callbacks.push(move |_: &()| second.borrow_mut().push("second"));

        callbacks.fire();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_argument_is_passed() {
        let seen: SharedVec<usize> = shared_vec();
        let sink = Rc::clone(&seen);
        let callbacks = Callbacks::new().with(move |index: &usize| sink.borrow_mut().push(*index));

        callbacks.invoke(&3);
        callbacks.invoke(&7);
        assert_eq!(*seen.borrow(), vec![3, 7]);
    }

    #[test]
    fn test_empty_list() {
        let callbacks: Callbacks = Callbacks::default();
        assert!(callbacks.is_empty());
        assert_eq!(callbacks.len(), 0);
        callbacks.fire();
        assert_eq!(format!("{:?}", callbacks), "Callbacks { len: 0 }");
    }
}
