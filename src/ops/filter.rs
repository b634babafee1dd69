use std::rc::Rc;

use crate::{
  channel::Channel,
  observable::Observable,
  observer::Observer,
  ops::{forward_terminal_events, node::OperatorNode},
};

pub(crate) fn filter<S, F>(source: &S, predicate: F) -> OperatorNode<S::Item, S::Err>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + 'static,
{
  let node = OperatorNode::new();
  let upstream = source.subscribe_with(FilterObserver { downstream: node.downstream(), predicate });
  node.attach_upstream(upstream);
  node
}

pub struct FilterObserver<Item, Err, F> {
  downstream: Rc<Channel<Item, Err>>,
  predicate: F,
}

impl<Item, Err, F> Observer<Item, Err> for FilterObserver<Item, Err, F>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.downstream.next(value)
    }
  }

  forward_terminal_events!();
}
