use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  channel::Channel,
  observable::Observable,
  observer::{BoxedObserver, Event},
  rc::{MutRc, RcDerefMut},
  subject::{impl_observer_for_subject, SubjectObserver},
  subscription::Subscription,
};

/// A subject that remembers its latest value.
///
/// Every new subscriber first receives the current value, synchronously
/// inside `subscribe`, then the values emitted afterwards. Setting the value
/// and emitting a value are the same thing.
///
/// Operators attach to their source when they are built, so the replay lands
/// in the operator before anything subscribes to it: a chain such as
/// `subject.map(f)` only delivers values set after the chain was built.
///
/// ```rust
/// use std::{cell::Cell, convert::Infallible, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let volume = CurrentValueSubject::<u8, Infallible>::new(3);
/// let seen = Rc::new(Cell::new(0));
/// let c_seen = seen.clone();
/// let _s = volume.subscribe(move |v| c_seen.set(v));
/// assert_eq!(seen.get(), 3);
///
/// volume.set_value(7);
/// assert_eq!(seen.get(), 7);
/// assert_eq!(volume.value(), 7);
/// ```
pub struct CurrentValueSubject<Item, Err> {
  channel: Rc<Channel<Item, Err>>,
  value: MutRc<Item>,
}

impl<Item, Err> CurrentValueSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  pub fn new(value: Item) -> Self {
    CurrentValueSubject { channel: Channel::new(), value: MutRc::own(value) }
  }

  /// The latest value. After termination this keeps the last value that was
  /// set before it.
  #[inline]
  pub fn value(&self) -> Item { self.value.get() }

  /// Store `value` and deliver it to every subscriber. Ignored once the
  /// subject has terminated.
  #[inline]
  pub fn set_value(&self, value: Item) { self.next(value) }

  pub fn emit(&self, event: Event<Item, Err>) {
    match event {
      Event::Next(v) => self.next(v),
      Event::Completed => self.complete(),
      Event::Failed(err) => self.error(err),
    }
  }

  pub fn next(&self, value: Item) {
    if !self.channel.is_terminated() {
      // The stored value is updated before delivery, so handlers reading
      // `value()` see the new one.
      *self.value.rc_deref_mut() = value.clone();
    }
    self.channel.next(value)
  }

  #[inline]
  pub fn error(&self, err: Err) { self.channel.error(err) }

  #[inline]
  pub fn complete(&self) { self.channel.complete() }

  /// An observer that relays another stream into this subject.
  pub fn as_observer(&self) -> SubjectObserver<Self> { SubjectObserver(self.clone()) }
}

impl<Item, Err> CurrentValueSubject<Item, Err> {
  #[inline]
  pub fn subscriber_count(&self) -> usize { self.channel.subscriber_count() }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.channel.is_terminated() }
}

impl<Item, Err> Observable for CurrentValueSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(&self, observer: BoxedObserver<Item, Err>) -> Subscription {
    self.channel.subscribe(observer, Some(self.value()))
  }
}

impl_observer_for_subject!(CurrentValueSubject);

impl<Item, Err> Clone for CurrentValueSubject<Item, Err> {
  fn clone(&self) -> Self {
    CurrentValueSubject { channel: self.channel.clone(), value: self.value.clone() }
  }
}

impl<Item, Err> Default for CurrentValueSubject<Item, Err>
where
  Item: Clone + Default + 'static,
  Err: Clone + 'static,
{
  fn default() -> Self { Self::new(Item::default()) }
}

impl<Item: Debug, Err> Debug for CurrentValueSubject<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CurrentValueSubject")
      .field("value", &self.value)
      .field("subscribers", &self.subscriber_count())
      .field("terminated", &self.is_terminated())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, convert::Infallible};

  use super::*;

  type Log<T> = Rc<RefCell<Vec<T>>>;

  fn record<T: Clone + 'static>(
    subject: &CurrentValueSubject<T, Infallible>,
  ) -> (Log<T>, Subscription) {
    let log: Log<T> = Rc::default();
    let c_log = log.clone();
    let s = subject.subscribe(move |v| c_log.borrow_mut().push(v));
    (log, s)
  }

  #[test]
  fn first_delivery_is_the_current_value() {
    let subject = CurrentValueSubject::<i32, Infallible>::new(0);
    let (first, _a) = record(&subject);
    subject.next(1);
    let (second, _b) = record(&subject);
    subject.set_value(2);

    assert_eq!(*first.borrow(), vec![0, 1, 2]);
    assert_eq!(*second.borrow(), vec![1, 2]);
    assert_eq!(subject.value(), 2);
  }

  #[test]
  fn handlers_read_the_new_value() {
    let subject = CurrentValueSubject::<i32, Infallible>::new(0);
    let seen: Log<i32> = Rc::default();
    let (c_subject, c_seen) = (subject.clone(), seen.clone());
    let _s = subject.subscribe(move |_| c_seen.borrow_mut().push(c_subject.value()));
    subject.next(5);
    assert_eq!(*seen.borrow(), vec![0, 5]);
  }

  #[cfg(not(feature = "strict-terminal"))]
  #[test]
  fn set_value_after_complete_is_ignored() {
    let subject = CurrentValueSubject::<i32, &str>::new(1);
    subject.complete();
    subject.set_value(9);
    assert_eq!(subject.value(), 1);

    let log: Log<Event<i32, &str>> = Rc::default();
    let c_log = log.clone();
    let s = subject.subscribe_event(move |e| c_log.borrow_mut().push(e));
    assert!(s.is_disposed());
    assert_eq!(*log.borrow(), vec![Event::Completed]);
  }

  #[test]
  fn relay_updates_the_value() {
    let source = CurrentValueSubject::<&str, Infallible>::new("a");
    let mirror = CurrentValueSubject::<&str, Infallible>::default();
    let _s = source.subscribe_with(mirror.as_observer());
    assert_eq!(mirror.value(), "a");
    source.set_value("b");
    assert_eq!(mirror.value(), "b");
  }
}
