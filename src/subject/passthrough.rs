use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  channel::Channel,
  observable::Observable,
  observer::{BoxedObserver, Event},
  subject::{impl_observer_for_subject, SubjectObserver},
  subscription::Subscription,
};

/// A subject without memory.
///
/// Subscribers only see events emitted after they subscribed. Once the
/// subject completes or fails, later subscribers receive that terminal event
/// straight away and further emits are ignored.
///
/// ```rust
/// use std::convert::Infallible;
///
/// use rxlite::prelude::*;
///
/// let clicks = PassthroughSubject::<u32, Infallible>::new();
/// clicks.next(1);
/// let _s = clicks.subscribe(|n| assert_eq!(n, 2));
/// clicks.next(2);
/// ```
pub struct PassthroughSubject<Item, Err> {
  channel: Rc<Channel<Item, Err>>,
}

impl<Item, Err> PassthroughSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  pub fn new() -> Self { PassthroughSubject { channel: Channel::new() } }

  /// Deliver `event` to every current subscriber, in subscription order.
  pub fn emit(&self, event: Event<Item, Err>) { self.channel.emit(event) }

  #[inline]
  pub fn next(&self, value: Item) { self.channel.next(value) }

  #[inline]
  pub fn error(&self, err: Err) { self.channel.error(err) }

  #[inline]
  pub fn complete(&self) { self.channel.complete() }

  /// An observer that relays another stream into this subject.
  pub fn as_observer(&self) -> SubjectObserver<Self> { SubjectObserver(self.clone()) }
}

impl<Item, Err> PassthroughSubject<Item, Err> {
  #[inline]
  pub fn subscriber_count(&self) -> usize { self.channel.subscriber_count() }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.channel.is_terminated() }
}

impl<Item, Err> Observable for PassthroughSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(&self, observer: BoxedObserver<Item, Err>) -> Subscription {
    self.channel.subscribe(observer, None)
  }
}

impl_observer_for_subject!(PassthroughSubject);

impl<Item, Err> Clone for PassthroughSubject<Item, Err> {
  fn clone(&self) -> Self { PassthroughSubject { channel: self.channel.clone() } }
}

impl<Item, Err> Default for PassthroughSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn default() -> Self { Self::new() }
}

impl<Item, Err> Debug for PassthroughSubject<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PassthroughSubject")
      .field("subscribers", &self.subscriber_count())
      .field("terminated", &self.is_terminated())
      .finish()
  }
}
