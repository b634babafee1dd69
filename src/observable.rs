//! The `Observable` trait and the sources that are not subjects.
//!
//! Every stream in the crate, whether a subject, an operator node or a cold
//! source built with [`create`] or [`from_iter`], implements [`Observable`]. Implementors only
//! provide [`Observable::actual_subscribe`]; the subscribe variants and the
//! operator methods are provided on top of it.

use crate::{
  observer::{AssignObserver, AssignTarget, BoxedObserver, Event, EventObserver, FnMutObserver,
             Observer, ObserverAll},
  ops::{
    combine_latest::combine_latest, compact_map::compact_map, filter::filter, map::map,
    node::OperatorNode,
  },
  subscription::Subscription,
};

mod any;
mod create;
mod from_iter;
pub use any::AnyObservable;
pub use create::{create, Create, Producer};
pub use from_iter::from_iter;

/// A source of events that observers can subscribe to.
pub trait Observable {
  type Item: Clone + 'static;
  type Err: Clone + 'static;

  /// Register a boxed observer. Everything else funnels into this.
  fn actual_subscribe(&self, observer: BoxedObserver<Self::Item, Self::Err>) -> Subscription;

  /// Subscribe any [`Observer`].
  fn subscribe_with<O>(&self, observer: O) -> Subscription
  where
    Self: Sized,
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    self.actual_subscribe(Box::new(observer))
  }

  /// Subscribe a `next` handler to a stream that cannot fail.
  ///
  /// Only streams whose error type is [`Infallible`] accept this, so a
  /// failure can never go unnoticed. Use [`subscribe_all`] otherwise.
  ///
  /// ```rust,compile_fail
  /// use rxlite::prelude::*;
  ///
  /// let responses = PassthroughSubject::<u16, String>::new();
  /// let _s = responses.subscribe(|_: u16| {});
  /// ```
  ///
  /// [`subscribe_all`]: Observable::subscribe_all
  /// [`Infallible`]: std::convert::Infallible
  fn subscribe<F>(&self, next: F) -> Subscription
  where
    Self: Sized,
    F: FnMut(Self::Item) + 'static,
    FnMutObserver<F>: Observer<Self::Item, Self::Err>,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  /// Subscribe with one handler per kind of event.
  fn subscribe_all<N, C, E>(&self, next: N, complete: C, error: E) -> Subscription
  where
    Self: Sized,
    N: FnMut(Self::Item) + 'static,
    C: FnOnce() + 'static,
    E: FnOnce(Self::Err) + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, complete, error))
  }

  /// Subscribe a single handler that sees every [`Event`].
  fn subscribe_event<F>(&self, handler: F) -> Subscription
  where
    Self: Sized,
    F: FnMut(Event<Self::Item, Self::Err>) + 'static,
  {
    self.subscribe_with(EventObserver(handler))
  }

  /// Write every value into `target`.
  ///
  /// ```rust
  /// use std::{cell::RefCell, convert::Infallible, rc::Rc};
  ///
  /// use rxlite::prelude::*;
  ///
  /// let name = CurrentValueSubject::<String, Infallible>::new("anon".into());
  /// let label = Rc::new(RefCell::new(String::new()));
  /// let _s = name.assign(label.clone());
  /// assert_eq!(*label.borrow(), "anon");
  ///
  /// name.set_value("ferris".into());
  /// assert_eq!(*label.borrow(), "ferris");
  /// ```
  ///
  /// Like `subscribe`, it refuses a stream that can fail:
  ///
  /// ```rust,compile_fail
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxlite::prelude::*;
  ///
  /// let status = PassthroughSubject::<u16, String>::new();
  /// let _s = status.assign(Rc::new(RefCell::new(0_u16)));
  /// ```
  fn assign<A>(&self, target: A) -> Subscription
  where
    Self: Sized,
    A: AssignTarget<Self::Item> + 'static,
    AssignObserver<A>: Observer<Self::Item, Self::Err>,
  {
    self.subscribe_with(AssignObserver(target))
  }

  /// Transform every value with `f`. Terminal events pass through.
  fn map<U, F>(&self, f: F) -> OperatorNode<U, Self::Err>
  where
    Self: Sized,
    U: Clone + 'static,
    F: FnMut(Self::Item) -> U + 'static,
  {
    map(self, f)
  }

  /// Forward only the values `predicate` accepts. Terminal events always pass.
  fn filter<F>(&self, predicate: F) -> OperatorNode<Self::Item, Self::Err>
  where
    Self: Sized,
    F: FnMut(&Self::Item) -> bool + 'static,
  {
    filter(self, predicate)
  }

  /// Transform every value with `f` and forward the `Some` results.
  fn compact_map<U, F>(&self, f: F) -> OperatorNode<U, Self::Err>
  where
    Self: Sized,
    U: Clone + 'static,
    F: FnMut(Self::Item) -> Option<U> + 'static,
  {
    compact_map(self, f)
  }

  /// Pair the latest values of `self` and `other`.
  ///
  /// Nothing is emitted until both sides produced a value. The result
  /// completes once both sides completed, and fails as soon as either side
  /// fails.
  fn combine_latest<S>(&self, other: &S) -> OperatorNode<(Self::Item, S::Item), Self::Err>
  where
    Self: Sized,
    S: Observable<Err = Self::Err>,
  {
    combine_latest(self, other)
  }

  /// Hide the concrete type, and with it any way to emit.
  fn erase_to_any(self) -> AnyObservable<Self::Item, Self::Err>
  where
    Self: Sized + 'static,
  {
    AnyObservable::new(self)
  }

  /// Adapt this stream into a [`futures::Stream`] of `Result`s.
  ///
  /// Values that arrive before the stream is polled are queued. Dropping the
  /// returned stream disposes the subscription.
  #[cfg(feature = "stream")]
  fn into_stream(&self) -> crate::ops::into_stream::ObservableStream<Self::Item, Self::Err>
  where
    Self: Sized,
  {
    crate::ops::into_stream::ObservableStream::new(self)
  }
}
