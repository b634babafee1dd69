//! Prelude module for convenient imports

#[cfg(feature = "stream")]
pub use crate::ops::into_stream::ObservableStream;
pub use crate::{
  observable::{self, create, from_iter, AnyObservable, Create, Observable, Producer},
  observer::{AssignTarget, Event, Observer, Setter},
  ops::OperatorNode,
  rc::MutRc,
  subject::{CurrentValueSubject, PassthroughSubject, SubjectObserver},
  subscription::{Subscription, SubscriptionBag},
};
