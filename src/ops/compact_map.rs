use std::rc::Rc;

use crate::{
  channel::Channel,
  observable::Observable,
  observer::Observer,
  ops::{forward_terminal_events, node::OperatorNode},
};

pub(crate) fn compact_map<S, U, F>(source: &S, f: F) -> OperatorNode<U, S::Err>
where
  S: Observable,
  U: Clone + 'static,
  F: FnMut(S::Item) -> Option<U> + 'static,
{
  let node = OperatorNode::new();
  let upstream = source.subscribe_with(CompactMapObserver { downstream: node.downstream(), f });
  node.attach_upstream(upstream);
  node
}

pub struct CompactMapObserver<Item, Err, F> {
  downstream: Rc<Channel<Item, Err>>,
  f: F,
}

impl<In, Item, Err, F> Observer<In, Err> for CompactMapObserver<Item, Err, F>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  F: FnMut(In) -> Option<Item>,
{
  fn next(&mut self, value: In) {
    if let Some(v) = (self.f)(value) {
      self.downstream.next(v)
    }
  }

  forward_terminal_events!();
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn drops_none_and_unwraps_some() {
    let input = PassthroughSubject::<&str, String>::new();
    let got = Rc::new(RefCell::new(vec![]));
    let c_got = got.clone();
    let _s = input
      .compact_map(|s| s.parse::<u8>().ok())
      .subscribe_event(move |e| c_got.borrow_mut().push(e));

    input.next("1");
    input.next("x");
    input.next("300");
    input.next("7");
    input.error("closed".to_owned());
    assert_eq!(
      *got.borrow(),
      vec![Event::Next(1), Event::Next(7), Event::Failed("closed".to_owned())]
    );
  }
}
