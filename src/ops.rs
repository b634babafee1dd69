//! Stream operators.
//!
//! Each operator subscribes to its source(s) as soon as it is created and
//! republishes the derived events through an [`OperatorNode`], which is an
//! observable in its own right.

pub mod combine_latest;
pub mod compact_map;
pub mod filter;
#[cfg(feature = "stream")]
pub mod into_stream;
pub mod map;
pub mod node;

pub use node::OperatorNode;

/// Forward the terminal events of an operator observer to the channel stored
/// in its `downstream` field.
macro_rules! forward_terminal_events {
  () => {
    #[inline]
    fn error(self, err: Err) { self.downstream.error(err) }

    #[inline]
    fn complete(self) { self.downstream.complete() }

    #[inline]
    fn is_closed(&self) -> bool { self.downstream.is_terminated() }
  };
}
pub(crate) use forward_terminal_events;
