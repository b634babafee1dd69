//! Bridge from a push-based stream to a pull-based [`futures::Stream`].
//!
//! The bridge is the boundary where a host hands events over to async code;
//! it does not schedule anything itself. Events are queued until polled.
//!
//! ```rust
//! use futures::{executor::block_on, StreamExt};
//! use rxlite::prelude::*;
//!
//! let subject = PassthroughSubject::<i32, String>::new();
//! let stream = subject.into_stream();
//! subject.next(1);
//! subject.next(2);
//! subject.complete();
//!
//! let got: Vec<_> = block_on(stream.collect());
//! assert_eq!(got, vec![Ok(1), Ok(2)]);
//! ```

use std::{
  collections::VecDeque,
  fmt::{Debug, Formatter},
  pin::Pin,
  task::{Context, Poll, Waker},
};

use futures::Stream;

use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

struct StreamState<Item, Err> {
  queue: VecDeque<Result<Item, Err>>,
  waker: Option<Waker>,
  done: bool,
}

impl<Item, Err> Default for StreamState<Item, Err> {
  fn default() -> Self { StreamState { queue: VecDeque::new(), waker: None, done: false } }
}

/// A `Stream` of the events of an observable.
///
/// - `Ok(item)` for every value.
/// - `Err(err)` when the observable fails, followed by the end of the stream.
/// - `None` once the observable completed and the queue is drained.
///
/// Created by [`Observable::into_stream`]. Dropping it disposes the
/// underlying subscription.
pub struct ObservableStream<Item, Err> {
  state: MutRc<StreamState<Item, Err>>,
  subscription: Subscription,
}

impl<Item, Err> ObservableStream<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  pub(crate) fn new<S>(source: &S) -> Self
  where
    S: Observable<Item = Item, Err = Err>,
  {
    let state = MutRc::own(StreamState::default());
    let subscription = source.subscribe_with(StreamObserver { state: state.clone() });
    ObservableStream { state, subscription }
  }
}

impl<Item, Err> ObservableStream<Item, Err> {
  /// Number of events received but not yet polled.
  pub fn pending(&self) -> usize { self.state.rc_deref().queue.len() }
}

impl<Item, Err> Stream for ObservableStream<Item, Err> {
  type Item = Result<Item, Err>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let mut state = self.state.rc_deref_mut();
    if let Some(item) = state.queue.pop_front() {
      return Poll::Ready(Some(item));
    }
    if state.done {
      return Poll::Ready(None);
    }
    state.waker = Some(cx.waker().clone());
    Poll::Pending
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let state = self.state.rc_deref();
    let queued = state.queue.len();
    (queued, state.done.then_some(queued))
  }
}

impl<Item, Err> Drop for ObservableStream<Item, Err> {
  fn drop(&mut self) { self.subscription.dispose(); }
}

impl<Item, Err> Debug for ObservableStream<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.state.rc_deref();
    f.debug_struct("ObservableStream")
      .field("pending", &state.queue.len())
      .field("done", &state.done)
      .finish()
  }
}

struct StreamObserver<Item, Err> {
  state: MutRc<StreamState<Item, Err>>,
}

impl<Item, Err> StreamObserver<Item, Err> {
  fn push(&self, event: Option<Result<Item, Err>>) {
    let waker = {
      let mut state = self.state.rc_deref_mut();
      match event {
        Some(item) => state.queue.push_back(item),
        None => state.done = true,
      }
      state.waker.take()
    };
    if let Some(waker) = waker {
      waker.wake();
    }
  }
}

impl<Item, Err> Observer<Item, Err> for StreamObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.push(Some(Ok(value))) }

  fn error(self, err: Err) {
    self.push(Some(Err(err)));
    self.push(None);
  }

  fn complete(self) { self.push(None) }

  fn is_closed(&self) -> bool { self.state.rc_deref().done }
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;

  use futures::{executor::block_on, StreamExt};

  use crate::prelude::*;

  #[test]
  fn yields_values_then_error() {
    let subject = PassthroughSubject::<i32, &str>::new();
    let stream = subject.into_stream();
    subject.next(1);
    subject.error("boom");
    assert_eq!(stream.pending(), 2);

    let got: Vec<_> = block_on(stream.collect());
    assert_eq!(got, vec![Ok(1), Err("boom")]);
  }

  #[test]
  fn current_value_is_the_first_item() {
    let subject = CurrentValueSubject::<&str, Infallible>::new("idle");
    let mut stream = subject.into_stream();
    subject.set_value("busy");
    assert_eq!(block_on(stream.next()), Some(Ok("idle")));
    assert_eq!(block_on(stream.next()), Some(Ok("busy")));
  }

  #[test]
  fn dropping_the_stream_disposes() {
    let subject = PassthroughSubject::<i32, Infallible>::new();
    let stream = subject.map(|v| v + 1).into_stream();
    assert_eq!(subject.subscriber_count(), 1);
    drop(stream);
    assert_eq!(subject.subscriber_count(), 0);
  }
}
