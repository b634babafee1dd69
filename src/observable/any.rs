use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{observable::Observable, observer::BoxedObserver, subscription::Subscription};

/// A read-only, type-erased view of a stream.
///
/// Exposes subscribing and the operator methods but nothing that emits, so a
/// component can hand out its subject without handing out the right to push
/// into it. Cloning is cheap and every clone observes the same stream.
pub struct AnyObservable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  source: Rc<dyn Observable<Item = Item, Err = Err>>,
}

impl<Item, Err> AnyObservable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  pub(crate) fn new<S>(source: S) -> Self
  where
    S: Observable<Item = Item, Err = Err> + 'static,
  {
    AnyObservable { source: Rc::new(source) }
  }
}

impl<Item, Err> Observable for AnyObservable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  #[inline]
  fn actual_subscribe(&self, observer: BoxedObserver<Item, Err>) -> Subscription {
    self.source.actual_subscribe(observer)
  }

  /// Erasing twice keeps the existing view instead of wrapping it again.
  fn erase_to_any(self) -> AnyObservable<Item, Err> { self }
}

impl<Item, Err> Clone for AnyObservable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn clone(&self) -> Self { AnyObservable { source: self.source.clone() } }
}

impl<Item, Err> Debug for AnyObservable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("AnyObservable") }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, convert::Infallible};

  use super::*;
  use crate::subject::{CurrentValueSubject, PassthroughSubject};

  #[test]
  fn erased_view_sees_subject_events() {
    let subject = PassthroughSubject::<i32, Infallible>::new();
    let view = subject.clone().erase_to_any();
    let got = Rc::new(RefCell::new(vec![]));
    let c_got = got.clone();
    let _s = view.subscribe(move |v| c_got.borrow_mut().push(v));
    subject.next(1);
    subject.next(2);
    assert_eq!(*got.borrow(), vec![1, 2]);
  }

  #[test]
  fn clones_share_the_source() {
    let subject = CurrentValueSubject::<&str, Infallible>::new("a");
    let view = subject.clone().erase_to_any();
    let other = view.clone().erase_to_any();
    let got = Rc::new(RefCell::new(vec![]));
    let (g1, g2) = (got.clone(), got.clone());
    let _a = view.subscribe(move |v| g1.borrow_mut().push(("view", v)));
    let _b = other.subscribe(move |v| g2.borrow_mut().push(("other", v)));
    subject.set_value("b");
    assert_eq!(
      *got.borrow(),
      vec![("view", "a"), ("other", "a"), ("view", "b"), ("other", "b")]
    );
    assert_eq!(subject.subscriber_count(), 2);
  }
}
