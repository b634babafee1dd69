//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for failures), and
//! complete (for stream completion).

use std::{
  cell::Cell,
  convert::Infallible,
  fmt::{Debug, Formatter},
  rc::Rc,
};

// ============================================================================
// Event
// ============================================================================

/// One notification travelling through a stream.
///
/// `Completed` and `Failed` are terminal: once either has been delivered the
/// stream never produces anything else.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Event<Item, Err> {
  Next(Item),
  Completed,
  Failed(Err),
}

impl<Item, Err> Event<Item, Err> {
  /// Returns `true` for `Completed` and `Failed`.
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }

  /// The carried value, if this is a `Next`.
  pub fn into_next(self) -> Option<Item> {
    match self {
      Event::Next(v) => Some(v),
      _ => None,
    }
  }

  /// Push this event into an observer.
  pub fn dispatch<O: Observer<Item, Err>>(self, mut observer: O) {
    match self {
      Event::Next(v) => observer.next(v),
      Event::Completed => observer.complete(),
      Event::Failed(err) => observer.error(err),
    }
  }
}

impl<Item: Debug, Err: Debug> Debug for Event<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Event::Next(v) => f.debug_tuple("Next").field(v).finish(),
      Event::Completed => f.write_str("Completed"),
      Event::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
    }
  }
}

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// This consumes the observer, as no more values can be emitted after an
  /// error
  fn error(self, err: Err);

  /// Handle completion of the observable
  ///
  /// This consumes the observer, as no more values can be emitted after
  /// completion
  fn complete(self);

  /// Returns `true` if the observer will not accept more values.
  ///
  /// Cold sources (see `observable::create`) use this to stop producing
  /// early.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Helper trait to enable object-safe Observers (Box<dyn Observer>)
///
/// Standard Observer trait is not object-safe because the terminal methods
/// take `self` by value. DynObserver mirrors the interface but adapts it for
/// vtables.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { self.error(err); }
  fn box_complete(self: Box<Self>) { self.complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Every observer registered with a stream is stored in this form.
pub type BoxedObserver<Item, Err> = Box<dyn DynObserver<Item, Err>>;

impl<Item, Err> Observer<Item, Err> for Box<dyn DynObserver<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

/// Option observer - None ignores all events, Some delegates to inner
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(inner) = self {
      inner.error(err);
    }
  }

  fn complete(self) {
    if let Some(inner) = self {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, |o| o.is_closed()) }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Closure observer for streams that cannot fail.
///
/// The closure becomes the `next` handler and completion is ignored. It only
/// implements `Observer<Item, Infallible>`: subscribing it to a stream that
/// can fail is rejected at compile time, so failures are never silently
/// swallowed.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item, Infallible> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, err: Infallible) { match err {} }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Closure observer with a handler for every kind of event.
pub struct ObserverAll<N, C, E> {
  next: N,
  complete: C,
  error: E,
}

impl<N, C, E> ObserverAll<N, C, E> {
  pub fn new(next: N, complete: C, error: E) -> Self { Self { next, complete, error } }
}

impl<Item, Err, N, C, E> Observer<Item, Err> for ObserverAll<N, C, E>
where
  N: FnMut(Item),
  C: FnOnce(),
  E: FnOnce(Err),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(self) { (self.complete)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Closure observer that sees every notification as an [`Event`].
pub struct EventObserver<F>(pub F);

impl<Item, Err, F> Observer<Item, Err> for EventObserver<F>
where
  F: FnMut(Event<Item, Err>),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(Event::Next(value)) }

  #[inline]
  fn error(mut self, err: Err) { (self.0)(Event::Failed(err)) }

  #[inline]
  fn complete(mut self) { (self.0)(Event::Completed) }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Assign targets
// ============================================================================

/// Something a stream can write its values into, see `Observable::assign`.
pub trait AssignTarget<Item> {
  fn assign(&mut self, value: Item);
}

impl<T> AssignTarget<T> for Rc<std::cell::RefCell<T>> {
  #[inline]
  fn assign(&mut self, value: T) { *self.borrow_mut() = value; }
}

impl<T> AssignTarget<T> for Rc<Cell<T>> {
  #[inline]
  fn assign(&mut self, value: T) { self.set(value); }
}

impl<T> AssignTarget<T> for crate::rc::MutRc<T> {
  #[inline]
  fn assign(&mut self, value: T) { self.replace(value); }
}

/// Adapts a setter closure, e.g. one that writes a field of a model object.
pub struct Setter<F>(pub F);

impl<T, F: FnMut(T)> AssignTarget<T> for Setter<F> {
  #[inline]
  fn assign(&mut self, value: T) { (self.0)(value) }
}

/// Observer that writes each value into an [`AssignTarget`].
pub struct AssignObserver<A>(pub A);

impl<Item, A> Observer<Item, Infallible> for AssignObserver<A>
where
  A: AssignTarget<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.0.assign(value) }

  #[inline]
  fn error(self, err: Infallible) { match err {} }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Tests
// ============================================================================
