use std::rc::Rc;

use crate::{
  channel::Channel,
  observable::Observable,
  observer::Observer,
  ops::node::OperatorNode,
  rc::{MutRc, RcDerefMut},
};

pub(crate) fn combine_latest<A, B>(a: &A, b: &B) -> OperatorNode<(A::Item, B::Item), A::Err>
where
  A: Observable,
  B: Observable<Err = A::Err>,
{
  let node = OperatorNode::new();
  let combiner =
    Combiner { state: MutRc::own(CombineState::default()), downstream: node.downstream() };

  node.attach_upstream(a.subscribe_with(AObserver(combiner.clone())));
  // `a` may already have failed, which leaves nothing to combine with.
  if !node.is_terminated() {
    node.attach_upstream(b.subscribe_with(BObserver(combiner)));
  }
  node
}

enum CombineItem<A, B> {
  ItemA(A),
  ItemB(B),
}

#[derive(Clone, Copy)]
enum Side {
  A,
  B,
}

struct CombineState<A, B> {
  a: Option<A>,
  b: Option<B>,
  a_done: bool,
  b_done: bool,
}

impl<A, B> Default for CombineState<A, B> {
  fn default() -> Self { CombineState { a: None, b: None, a_done: false, b_done: false } }
}

struct Combiner<A, B, Err> {
  state: MutRc<CombineState<A, B>>,
  downstream: Rc<Channel<(A, B), Err>>,
}

impl<A, B, Err> Clone for Combiner<A, B, Err> {
  fn clone(&self) -> Self {
    Combiner { state: self.state.clone(), downstream: self.downstream.clone() }
  }
}

impl<A, B, Err> Combiner<A, B, Err>
where
  A: Clone + 'static,
  B: Clone + 'static,
  Err: Clone + 'static,
{
  fn next(&self, item: CombineItem<A, B>) {
    let pair = {
      let mut state = self.state.rc_deref_mut();
      match item {
        CombineItem::ItemA(v) => state.a = Some(v),
        CombineItem::ItemB(v) => state.b = Some(v),
      }
      match (&state.a, &state.b) {
        (Some(a), Some(b)) => Some((a.clone(), b.clone())),
        _ => None,
      }
    };
    // The state borrow is released before delivery so a handler may feed
    // the other side.
    if let Some(pair) = pair {
      self.downstream.next(pair);
    }
  }

  fn complete(&self, side: Side) {
    let both_done = {
      let mut state = self.state.rc_deref_mut();
      match side {
        Side::A => state.a_done = true,
        Side::B => state.b_done = true,
      }
      state.a_done && state.b_done
    };
    if both_done {
      self.downstream.complete();
    }
  }

  /// Terminating the node disposes both upstream subscriptions.
  fn error(&self, err: Err) { self.downstream.error(err) }

  fn is_closed(&self) -> bool { self.downstream.is_terminated() }
}

struct AObserver<A, B, Err>(Combiner<A, B, Err>);

impl<A, B, Err> Observer<A, Err> for AObserver<A, B, Err>
where
  A: Clone + 'static,
  B: Clone + 'static,
  Err: Clone + 'static,
{
  #[inline]
  fn next(&mut self, value: A) { self.0.next(CombineItem::ItemA(value)) }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete(Side::A) }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

struct BObserver<A, B, Err>(Combiner<A, B, Err>);

impl<A, B, Err> Observer<B, Err> for BObserver<A, B, Err>
where
  A: Clone + 'static,
  B: Clone + 'static,
  Err: Clone + 'static,
{
  #[inline]
  fn next(&mut self, value: B) { self.0.next(CombineItem::ItemB(value)) }

  #[inline]
  fn error(self, err: Err) { self.0.error(err) }

  #[inline]
  fn complete(self) { self.0.complete(Side::B) }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}
