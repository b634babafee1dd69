use std::rc::Rc;

use crate::{
  channel::Channel,
  observable::Observable,
  observer::Observer,
  ops::{forward_terminal_events, node::OperatorNode},
};

pub(crate) fn map<S, U, F>(source: &S, f: F) -> OperatorNode<U, S::Err>
where
  S: Observable,
  U: Clone + 'static,
  F: FnMut(S::Item) -> U + 'static,
{
  let node = OperatorNode::new();
  let upstream = source.subscribe_with(MapObserver { downstream: node.downstream(), map: f });
  node.attach_upstream(upstream);
  node
}

pub struct MapObserver<Item, Err, F> {
  downstream: Rc<Channel<Item, Err>>,
  map: F,
}

impl<In, Item, Err, F> Observer<In, Err> for MapObserver<Item, Err, F>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  F: FnMut(In) -> Item,
{
  #[inline]
  fn next(&mut self, value: In) { self.downstream.next((self.map)(value)) }

  forward_terminal_events!();
}
