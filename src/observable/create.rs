use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  channel::{Slot, Terminal},
  observable::Observable,
  observer::{BoxedObserver, Event},
  subscription::Subscription,
};

/// Build a cold stream from a producer function.
///
/// `producer` runs once for every subscriber and receives a [`Producer`]
/// connected to that subscriber alone. The subscription it returns is the
/// teardown: it is disposed when the subscriber disposes, or right after the
/// producer completes or fails.
///
/// ```rust
/// use std::{cell::RefCell, convert::Infallible, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let numbers = observable::create(|producer: Producer<i32, Infallible>| {
///   for i in 1..=3 {
///     producer.next(i);
///   }
///   producer.complete();
///   Subscription::new()
/// });
///
/// let got = Rc::new(RefCell::new(vec![]));
/// let c_got = got.clone();
/// let _s = numbers.subscribe(move |v| c_got.borrow_mut().push(v));
/// assert_eq!(*got.borrow(), vec![1, 2, 3]);
/// ```
pub fn create<Item, Err, F>(producer: F) -> Create<Item, Err>
where
  F: Fn(Producer<Item, Err>) -> Subscription + 'static,
{
  Create { producer: Rc::new(producer) }
}

/// A cold stream, see [`create`].
pub struct Create<Item, Err> {
  producer: Rc<dyn Fn(Producer<Item, Err>) -> Subscription>,
}

impl<Item, Err> Clone for Create<Item, Err> {
  fn clone(&self) -> Self { Create { producer: self.producer.clone() } }
}

impl<Item, Err> Observable for Create<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(&self, observer: BoxedObserver<Item, Err>) -> Subscription {
    let subscription = Subscription::new();
    let slot = Slot::new(observer);
    let c_slot = slot.clone();
    subscription.add_teardown(move || c_slot.clear());

    let teardown = (self.producer)(Producer { slot, subscription: subscription.share() });
    // A producer that already terminated has disposed `subscription`; `add`
    // then runs the teardown immediately.
    subscription.add(teardown);
    subscription
  }
}

/// The emitting end handed to a [`create`] producer.
///
/// Clone it to emit from somewhere else later on, e.g. from the handler of
/// another stream. Emitting after the consumer disposed, or after a terminal
/// event, does nothing.
pub struct Producer<Item, Err> {
  slot: Rc<Slot<Item, Err>>,
  subscription: Subscription,
}

impl<Item, Err> Producer<Item, Err> {
  pub fn next(&self, value: Item) {
    if !self.subscription.is_disposed() {
      self.slot.next(value);
    }
  }

  pub fn error(&self, err: Err) { self.terminate(Terminal::Failed(err)) }

  pub fn complete(&self) { self.terminate(Terminal::Completed) }

  pub fn emit(&self, event: Event<Item, Err>) {
    match event {
      Event::Next(v) => self.next(v),
      Event::Completed => self.complete(),
      Event::Failed(err) => self.error(err),
    }
  }

  /// Returns `true` once the consumer is gone, so a long-running producer
  /// can stop early.
  pub fn is_closed(&self) -> bool { self.subscription.is_disposed() || self.slot.is_closed() }

  fn terminate(&self, terminal: Terminal<Err>) {
    if self.subscription.is_disposed() {
      return;
    }
    self.slot.terminate(terminal);
    self.subscription.dispose();
  }
}

impl<Item, Err> Clone for Producer<Item, Err> {
  fn clone(&self) -> Self {
    Producer { slot: self.slot.clone(), subscription: self.subscription.share() }
  }
}

impl<Item, Err> Debug for Producer<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Producer").field("closed", &self.subscription.is_disposed()).finish()
  }
}
