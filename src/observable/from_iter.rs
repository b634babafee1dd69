use std::convert::Infallible;

use crate::{
  observable::{create, Create, Producer},
  subscription::Subscription,
};

/// Creates a cold stream that emits every item of `iter`, then completes.
///
/// Each subscriber walks its own copy of the iterator. Iteration stops early
/// once the subscriber is closed. Never fails.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let got = Rc::new(RefCell::new(vec![]));
/// let c_got = got.clone();
/// let _s = observable::from_iter(vec![1, 2, 3]).subscribe(move |v| c_got.borrow_mut().push(v));
/// assert_eq!(*got.borrow(), vec![1, 2, 3]);
/// ```
pub fn from_iter<Iter>(iter: Iter) -> Create<Iter::Item, Infallible>
where
  Iter: IntoIterator + Clone + 'static,
  Iter::Item: Clone + 'static,
{
  create(move |producer: Producer<Iter::Item, Infallible>| {
    let mut values = iter.clone().into_iter();
    while !producer.is_closed() {
      match values.next() {
        Some(value) => producer.next(value),
        None => {
          producer.complete();
          break;
        }
      }
    }
    Subscription::new()
  })
}
