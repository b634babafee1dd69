use smallvec::SmallVec;

use super::Subscription;

/// Owns a set of subscriptions and disposes them together.
///
/// The owner of a bag decides when everything it observes goes away by
/// calling [`dispose_all`](SubscriptionBag::dispose_all). Nothing is
/// disposed implicitly on drop.
///
/// ```rust
/// use std::convert::Infallible;
///
/// use rxlite::prelude::*;
///
/// let subject = PassthroughSubject::<i32, Infallible>::new();
/// let mut bag = SubscriptionBag::default();
/// subject.subscribe(|v| println!("[1] {v}")).store(&mut bag);
/// subject.subscribe(|v| println!("[2] {v}")).store(&mut bag);
///
/// subject.next(1);
/// bag.dispose_all();
/// assert_eq!(subject.subscriber_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionBag {
  subscriptions: SmallVec<[Subscription; 4]>,
}

impl SubscriptionBag {
  pub fn new() -> Self { Self::default() }

  /// Take ownership of `subscription`.
  ///
  /// An already-disposed subscription is accepted and dropped. Members that
  /// closed on their own (their stream terminated) are pruned here.
  pub fn store(&mut self, subscription: Subscription) {
    if subscription.is_disposed() {
      return;
    }
    self.subscriptions.retain(|s| !s.is_disposed());
    self.subscriptions.push(subscription);
  }

  /// Dispose every member exactly once, then empty the bag. The bag can be
  /// reused afterwards.
  pub fn dispose_all(&mut self) {
    let subscriptions = std::mem::take(&mut self.subscriptions);
    tracing::trace!(count = subscriptions.len(), "disposing subscription bag");
    for s in subscriptions {
      s.dispose();
    }
  }

  #[inline]
  pub fn len(&self) -> usize { self.subscriptions.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.subscriptions.is_empty() }
}

impl Extend<Subscription> for SubscriptionBag {
  fn extend<T: IntoIterator<Item = Subscription>>(&mut self, iter: T) {
    for s in iter {
      self.store(s);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  fn counted(hits: &Rc<Cell<u32>>) -> Subscription {
    let hits = hits.clone();
    Subscription::from_fn(move || hits.set(hits.get() + 1))
  }

  #[test]
  fn dispose_all_disposes_each_member_once() {
    let hits = Rc::new(Cell::new(0));
    let mut bag = SubscriptionBag::default();
    bag.store(counted(&hits));
    bag.store(counted(&hits));
    bag.store(counted(&hits));
    assert_eq!(bag.len(), 3);

    bag.dispose_all();
    assert_eq!(hits.get(), 3);
    assert!(bag.is_empty());

    bag.dispose_all();
    assert_eq!(hits.get(), 3);
  }

  #[test]
  fn storing_disposed_subscription_is_noop() {
    let mut bag = SubscriptionBag::new();
    bag.store(Subscription::closed());
    assert!(bag.is_empty());
  }

  #[test]
  fn closed_members_are_pruned_on_store() {
    let mut bag = SubscriptionBag::new();
    let s = Subscription::new();
    let handle = s.share();
    bag.store(s);
    handle.dispose();
    bag.store(Subscription::new());
    assert_eq!(bag.len(), 1);
  }

  #[test]
  fn bag_is_reusable_after_dispose_all() {
    let hits = Rc::new(Cell::new(0));
    let mut bag = SubscriptionBag::new();
    counted(&hits).store(&mut bag);
    bag.dispose_all();
    bag.extend([counted(&hits), counted(&hits)]);
    assert_eq!(bag.len(), 2);
    bag.dispose_all();
    assert_eq!(hits.get(), 3);
  }
}
