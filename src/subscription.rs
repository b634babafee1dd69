use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  mem,
  rc::{Rc, Weak},
};

use smallvec::SmallVec;

mod bag;
pub use bag::SubscriptionBag;

/// Something a [`Subscription`] can unregister itself from.
///
/// Implemented by the multicast core shared by subjects and operator nodes.
/// The subscription only keeps a `Weak` handle, so holding a subscription
/// never keeps its emitter alive.
pub(crate) trait Detach {
  fn detach(&self, id: usize);
}

enum Teardown {
  Detach { source: Weak<dyn Detach>, id: usize },
  Action(Box<dyn FnOnce()>),
  Nested(Subscription),
}

impl Teardown {
  fn run(self) {
    match self {
      Teardown::Detach { source, id } => {
        if let Some(source) = source.upgrade() {
          source.detach(id);
        }
      }
      Teardown::Action(f) => f(),
      Teardown::Nested(s) => s.dispose(),
    }
  }
}

struct Inner {
  closed: bool,
  teardown: SmallVec<[Teardown; 1]>,
}

impl Default for Inner {
  fn default() -> Self { Inner { closed: false, teardown: SmallVec::new() } }
}

/// A cancellable handle for one active observation.
///
/// Returned by every `subscribe` call. A subscription goes from active to
/// disposed exactly once: [`dispose`](Subscription::dispose) severs delivery
/// before it returns, and calling it again does nothing. A subscription also
/// reports itself disposed once its stream has delivered a terminal event.
///
/// Dropping a subscription does **not** dispose it. Disposal is always an
/// explicit call, either directly or through a [`SubscriptionBag`].
#[must_use = "dropping a Subscription does not dispose it; store it or call `dispose`"]
pub struct Subscription(Rc<RefCell<Inner>>);

impl Default for Subscription {
  fn default() -> Self { Subscription(Rc::new(RefCell::new(Inner::default()))) }
}

impl Subscription {
  /// An active subscription with nothing to tear down yet.
  pub fn new() -> Self { Self::default() }

  /// A subscription that is already disposed.
  pub fn closed() -> Self {
    let inner = Inner { closed: true, teardown: SmallVec::new() };
    Subscription(Rc::new(RefCell::new(inner)))
  }

  /// An active subscription that runs `f` once when disposed.
  pub fn from_fn(f: impl FnOnce() + 'static) -> Self {
    let s = Self::default();
    s.add_teardown(f);
    s
  }

  pub(crate) fn detaching(source: Weak<dyn Detach>, id: usize) -> Self {
    let s = Self::default();
    s.push(Teardown::Detach { source, id });
    s
  }

  /// Another handle to the same subscription state. Crate-internal so that
  /// every subscription handed out to users keeps a single owner.
  pub(crate) fn share(&self) -> Self { Subscription(self.0.clone()) }

  /// Register `f` to run when this subscription is disposed. If it is
  /// already disposed `f` runs immediately.
  pub fn add_teardown(&self, f: impl FnOnce() + 'static) {
    self.push(Teardown::Action(Box::new(f)))
  }

  /// Dispose `other` together with this subscription.
  pub fn add(&self, other: Subscription) {
    if Rc::ptr_eq(&self.0, &other.0) {
      return;
    }
    self.push(Teardown::Nested(other))
  }

  fn push(&self, teardown: Teardown) {
    let rejected = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        Some(teardown)
      } else {
        inner.teardown.push(teardown);
        None
      }
    };
    if let Some(teardown) = rejected {
      teardown.run();
    }
  }

  /// Stop receiving events and release everything this subscription holds.
  /// Idempotent.
  pub fn dispose(&self) {
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      mem::take(&mut inner.teardown)
    };
    for t in teardown {
      t.run();
    }
  }

  #[inline]
  pub fn is_disposed(&self) -> bool { self.0.borrow().closed }

  /// Hand this subscription over to `bag`, which becomes its owner.
  pub fn store(self, bag: &mut SubscriptionBag) { bag.store(self) }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("Subscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}
