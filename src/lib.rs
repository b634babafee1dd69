//! # rxlite: a small, single-threaded reactive stream library
//!
//! Push-based streams with explicit subscription lifetimes, built for code
//! that wires a model to its consumers on one thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use rxlite::prelude::*;
//!
//! let temperature = CurrentValueSubject::<f32, Infallible>::new(21.5);
//! let mut bag = SubscriptionBag::new();
//!
//! temperature
//!   .filter(|t| *t > 25.0)
//!   .map(|t| format!("hot: {t}"))
//!   .subscribe(|msg| println!("{msg}"))
//!   .store(&mut bag);
//!
//! temperature.set_value(26.0);
//! bag.dispose_all();
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Anything you can subscribe to; carries the operator methods |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`PassthroughSubject`] / [`CurrentValueSubject`] | Streams you emit into by hand |
//! | [`AnyObservable`] | Read-only view of a stream |
//! | [`Subscription`] / [`SubscriptionBag`] | Handles that end an observation |
//!
//! Delivery is synchronous: `next` returns after every subscriber has seen
//! the value. Nothing here is `Send`.
//!
//! ## Feature Flags
//!
//! - **`stream`** (default): `Observable::into_stream`, backed by `futures`.
//! - **`strict-terminal`**: emitting into a terminated stream trips a debug
//!   assertion instead of being ignored.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`PassthroughSubject`]: subject::PassthroughSubject
//! [`CurrentValueSubject`]: subject::CurrentValueSubject
//! [`AnyObservable`]: observable::AnyObservable
//! [`Subscription`]: subscription::Subscription
//! [`SubscriptionBag`]: subscription::SubscriptionBag

mod channel;

pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod subject;
pub mod subscription;

pub use prelude::*;

#[cfg(doctest)]
mod readme {
  #![doc = include_str!("../README.md")]
}
