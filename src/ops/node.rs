use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  channel::Channel, observable::Observable, observer::BoxedObserver, subscription::Subscription,
};

/// The observable every operator returns.
///
/// A node owns the subscription(s) to its source(s) and republishes the
/// derived events to its own subscribers, in subscription order, exactly like
/// a subject does.
///
/// A node stays connected to its sources while a handle to it exists or
/// anything is subscribed to it. Once both are gone it disposes its upstream
/// subscriptions. In `subject.map(f).subscribe(h)` the node itself is a
/// temporary, so disposing the returned subscription also releases the
/// subscription to `subject`.
pub struct OperatorNode<Item, Err> {
  channel: Rc<Channel<Item, Err>>,
}

impl<Item, Err> OperatorNode<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  pub(crate) fn new() -> Self {
    let channel = Channel::new();
    channel.acquire();
    OperatorNode { channel }
  }

  /// The channel an operator observer pushes into. Observers hold it
  /// strongly so a subscribed node outlives its handles.
  pub(crate) fn downstream(&self) -> Rc<Channel<Item, Err>> { self.channel.clone() }

  pub(crate) fn attach_upstream(&self, subscription: Subscription) {
    self.channel.attach_upstream(subscription)
  }
}

impl<Item, Err> OperatorNode<Item, Err> {
  #[inline]
  pub fn subscriber_count(&self) -> usize { self.channel.subscriber_count() }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.channel.is_terminated() }

  /// Returns `true` while the node still listens to at least one source.
  #[inline]
  pub fn is_connected(&self) -> bool { self.channel.upstream_count() > 0 }
}

impl<Item, Err> Observable for OperatorNode<Item, Err>
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

impl<Item, Err> Clone for OperatorNode<Item, Err> {
  fn clone(&self) -> Self {
    self.channel.acquire();
    OperatorNode { channel: self.channel.clone() }
  }
}

impl<Item, Err> Drop for OperatorNode<Item, Err> {
  fn drop(&mut self) { self.channel.release(); }
}

impl<Item, Err> Debug for OperatorNode<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OperatorNode")
      .field("subscribers", &self.subscriber_count())
      .field("connected", &self.is_connected())
      .field("terminated", &self.is_terminated())
      .finish()
  }
}
