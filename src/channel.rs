//! The multicast core shared by subjects and operator nodes.
//!
//! A [`Channel`] owns the ordered set of registered observers, remembers
//! whether the stream has terminated, and (for operator nodes) holds the
//! subscriptions to its upstream sources.
//!
//! Delivery is synchronous and depth-first. Before dispatching a value the
//! channel snapshots its observer list and releases its own borrow, so
//! handlers may subscribe, dispose, or emit terminal events on the same
//! channel while a dispatch is in flight. A value aimed at a handler that is
//! still running waits until that handler returns; every other observer gets
//! it right away.

use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  mem,
  rc::{Rc, Weak},
};

use smallvec::SmallVec;

use crate::{
  observer::{BoxedObserver, Event, Observer},
  subscription::{Detach, Subscription},
};

mod subscribers;
use subscribers::Subscribers;

#[derive(Clone)]
pub(crate) enum Terminal<Err> {
  Completed,
  Failed(Err),
}

impl<Err> Terminal<Err> {
  fn deliver<Item>(self, observer: BoxedObserver<Item, Err>) {
    match self {
      Terminal::Completed => observer.complete(),
      Terminal::Failed(err) => observer.error(err),
    }
  }
}

fn ignored_after_terminal(kind: &'static str) {
  tracing::debug!(kind, "event ignored, stream already terminated");
  #[cfg(feature = "strict-terminal")]
  debug_assert!(false, "`{kind}` emitted after the stream terminated");
}

/// One registered observer.
///
/// Events that arrive while the observer is still running (its handler
/// emitted into a stream it is subscribed to) are parked: values in `queued`,
/// a terminal event in `pending`. The frame that is running the handler
/// delivers them, in arrival order, as soon as the handler returns.
pub(crate) struct Slot<Item, Err> {
  observer: RefCell<Option<BoxedObserver<Item, Err>>>,
  queued: RefCell<VecDeque<Item>>,
  pending: RefCell<Option<Terminal<Err>>>,
}

impl<Item, Err> Slot<Item, Err> {
  pub(crate) fn new(observer: BoxedObserver<Item, Err>) -> Rc<Self> {
    Rc::new(Slot {
      observer: RefCell::new(Some(observer)),
      queued: RefCell::new(VecDeque::new()),
      pending: RefCell::new(None),
    })
  }

  pub(crate) fn next(&self, value: Item) {
    match self.observer.try_borrow_mut() {
      Ok(mut observer) => {
        observer.next(value);
        while let Some(value) = self.pop_queued() {
          observer.next(value);
        }
      }
      Err(_) => {
        self.queued.borrow_mut().push_back(value);
        return;
      }
    }
    self.flush_pending();
  }

  pub(crate) fn terminate(&self, terminal: Terminal<Err>) {
    let observer = match self.observer.try_borrow_mut() {
      Ok(mut observer) => observer.take(),
      Err(_) => {
        *self.pending.borrow_mut() = Some(terminal);
        return;
      }
    };
    if let Some(observer) = observer {
      terminal.deliver(observer);
    }
  }

  fn pop_queued(&self) -> Option<Item> { self.queued.borrow_mut().pop_front() }

  fn flush_pending(&self) {
    let pending = self.pending.borrow_mut().take();
    if let Some(terminal) = pending {
      self.terminate(terminal);
    }
  }

  /// A busy slot counts as open: its handler is running right now.
  pub(crate) fn is_closed(&self) -> bool {
    match self.observer.try_borrow() {
      Ok(observer) => observer.is_closed(),
      Err(_) => false,
    }
  }

  /// Drop the observer without notifying it, along with the values parked
  /// for it. Values parked ahead of a terminal event are kept and delivered
  /// before it. A running observer is left in place; it is released with the
  /// slot itself.
  pub(crate) fn clear(&self) {
    if self.pending.borrow().is_none() {
      self.queued.borrow_mut().clear();
    }
    if let Ok(mut observer) = self.observer.try_borrow_mut() {
      observer.take();
    }
  }
}

struct Entry<Item, Err> {
  slot: Rc<Slot<Item, Err>>,
  subscription: Subscription,
}

struct State<Item, Err> {
  subscribers: Subscribers<Entry<Item, Err>>,
  terminal: Option<Terminal<Err>>,
  upstream: SmallVec<[Subscription; 2]>,
}

pub(crate) struct Channel<Item, Err> {
  state: RefCell<State<Item, Err>>,
  /// Live handles to the operator node built on this channel. Subjects never
  /// touch it.
  holders: Cell<usize>,
}

impl<Item, Err> Channel<Item, Err> {
  pub(crate) fn new() -> Rc<Self> {
    Rc::new(Channel {
      state: RefCell::new(State {
        subscribers: Subscribers::default(),
        terminal: None,
        upstream: SmallVec::new(),
      }),
      holders: Cell::new(0),
    })
  }

  #[inline]
  pub(crate) fn is_terminated(&self) -> bool { self.state.borrow().terminal.is_some() }

  #[inline]
  pub(crate) fn subscriber_count(&self) -> usize { self.state.borrow().subscribers.len() }

  #[inline]
  pub(crate) fn upstream_count(&self) -> usize { self.state.borrow().upstream.len() }

  pub(crate) fn acquire(&self) { self.holders.set(self.holders.get() + 1); }

  pub(crate) fn release(&self) {
    self.holders.set(self.holders.get().saturating_sub(1));
    self.release_upstream_if_idle();
  }

  /// Keep `subscription` alive for as long as this channel is in use.
  pub(crate) fn attach_upstream(&self, subscription: Subscription) {
    let rejected = {
      let mut state = self.state.borrow_mut();
      if state.terminal.is_some() {
        Some(subscription)
      } else {
        state.upstream.push(subscription);
        None
      }
    };
    if let Some(subscription) = rejected {
      subscription.dispose();
    }
  }

  /// An operator node nobody holds and nobody observes has no reason to keep
  /// listening to its sources.
  fn release_upstream_if_idle(&self) {
    let upstream = {
      let mut state = self.state.borrow_mut();
      if self.holders.get() > 0 || !state.subscribers.is_empty() || state.upstream.is_empty() {
        return;
      }
      mem::take(&mut state.upstream)
    };
    tracing::trace!(count = upstream.len(), "operator idle, releasing upstream");
    for subscription in upstream {
      subscription.dispose();
    }
  }
}

impl<Item, Err> Channel<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  /// Register `observer`. A terminated channel hands the terminal event to
  /// the observer right away and returns a closed subscription. `replay`,
  /// when given, is delivered to the new observer before this returns.
  pub(crate) fn subscribe(
    self: &Rc<Self>, observer: BoxedObserver<Item, Err>, replay: Option<Item>,
  ) -> Subscription {
    let terminal = self.state.borrow().terminal.clone();
    if let Some(terminal) = terminal {
      terminal.deliver(observer);
      return Subscription::closed();
    }

    let slot = Slot::new(observer);
    let subscription = {
      let mut state = self.state.borrow_mut();
      let id = state.subscribers.reserve_id();
      let weak = Rc::downgrade(self);
      let source: Weak<dyn Detach> = weak;
      let subscription = Subscription::detaching(source, id);
      state
        .subscribers
        .insert(id, Entry { slot: slot.clone(), subscription: subscription.share() });
      tracing::trace!(id, "observer attached");
      subscription
    };

    if let Some(value) = replay {
      slot.next(value);
    }
    subscription
  }

  pub(crate) fn emit(&self, event: Event<Item, Err>) {
    match event {
      Event::Next(v) => self.next(v),
      Event::Completed => self.complete(),
      Event::Failed(err) => self.error(err),
    }
  }

  /// Deliver `value` to every observer registered before this call, in
  /// registration order.
  pub(crate) fn next(&self, value: Item) {
    let targets: SmallVec<[(Rc<Slot<Item, Err>>, Subscription); 4]> = {
      let state = self.state.borrow();
      if state.terminal.is_some() {
        ignored_after_terminal("next");
        return;
      }
      state
        .subscribers
        .iter()
        .map(|e| (e.slot.clone(), e.subscription.share()))
        .collect()
    };

    let mut iter = targets.into_iter().peekable();
    while let Some((slot, subscription)) = iter.next() {
      // Disposed by an earlier handler of this very dispatch.
      if subscription.is_disposed() {
        continue;
      }
      if iter.peek().is_some() {
        slot.next(value.clone());
      } else {
        slot.next(value);
        break;
      }
    }
  }

  pub(crate) fn error(&self, err: Err) { self.terminate(Terminal::Failed(err)) }

  pub(crate) fn complete(&self) { self.terminate(Terminal::Completed) }

  fn terminate(&self, terminal: Terminal<Err>) {
    let (entries, upstream) = {
      let mut state = self.state.borrow_mut();
      if state.terminal.is_some() {
        ignored_after_terminal(match terminal {
          Terminal::Completed => "complete",
          Terminal::Failed(_) => "error",
        });
        return;
      }
      state.terminal = Some(terminal.clone());
      let entries: SmallVec<[Entry<Item, Err>; 4]> = state.subscribers.drain().collect();
      (entries, mem::take(&mut state.upstream))
    };

    for subscription in upstream {
      subscription.dispose();
    }
    for entry in entries {
      if entry.subscription.is_disposed() {
        continue;
      }
      entry.slot.terminate(terminal.clone());
      entry.subscription.dispose();
    }
  }
}

impl<Item, Err> Detach for Channel<Item, Err> {
  fn detach(&self, id: usize) {
    let removed = self.state.borrow_mut().subscribers.remove(id);
    if let Some(entry) = removed {
      tracing::trace!(id, "observer detached");
      entry.slot.clear();
      drop(entry);
      self.release_upstream_if_idle();
    }
  }
}
