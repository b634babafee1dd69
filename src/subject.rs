//! Subjects: streams you push events into by hand.
//!
//! A subject is both the producer-facing handle (it has `next`, `error`,
//! `complete`, `emit`) and an [`Observable`](crate::observable::Observable).
//! Hand consumers an erased view from
//! [`erase_to_any`](crate::observable::Observable::erase_to_any) when they
//! should only be able to listen.
//!
//! Cloning a subject clones the handle: every clone emits into, and
//! subscribes to, the same stream.

mod current_value;
mod passthrough;

pub use current_value::CurrentValueSubject;
pub use passthrough::PassthroughSubject;

/// An [`Observer`](crate::observer::Observer) that forwards every event into
/// a subject. Obtain one with `as_observer()`.
#[derive(Clone, Debug)]
pub struct SubjectObserver<S>(pub(crate) S);

/// The relay wraps a clone of the subject and calls its `&self` emit methods.
macro_rules! impl_observer_for_subject {
  ($subject:ident) => {
    impl<Item, Err> $crate::observer::Observer<Item, Err>
      for $crate::subject::SubjectObserver<$subject<Item, Err>>
    where
      Item: Clone + 'static,
      Err: Clone + 'static,
    {
      #[inline]
      fn next(&mut self, value: Item) { $subject::next(&self.0, value) }

      #[inline]
      fn error(self, err: Err) { $subject::error(&self.0, err) }

      #[inline]
      fn complete(self) { $subject::complete(&self.0) }

      #[inline]
      fn is_closed(&self) -> bool { self.0.is_terminated() }
    }
  };
}
pub(crate) use impl_observer_for_subject;
