use smallvec::SmallVec;

/// Ordered, ID-addressed storage for the observers of one channel.
///
/// # Design
///
/// - **Insertion order**: iteration follows registration order, which is the
///   delivery order a channel guarantees.
/// - **SmallVec Optimization**: Uses `SmallVec<[_; 2]>` to avoid heap
///   allocation for the common case of 0-2 observers.
/// - **Pre-allocation Pattern**: `reserve_id()` + `insert()` hands out the ID
///   before the entry exists, so a subscription can be built around its own
///   ID.
pub(crate) struct Subscribers<Ob> {
  next_id: usize,
  items: SmallVec<[(usize, Ob); 2]>,
}

impl<Ob> Default for Subscribers<Ob> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<Ob> Subscribers<Ob> {
  /// Reserve the next ID without adding an entry.
  #[inline]
  pub fn reserve_id(&mut self) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    id
  }

  /// Insert an entry with a pre-reserved ID.
  #[inline]
  pub fn insert(&mut self, id: usize, observer: Ob) { self.items.push((id, observer)); }

  /// Remove an entry by ID.
  pub fn remove(&mut self, id: usize) -> Option<Ob> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Drain all entries in registration order.
  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = Ob> + '_ {
    self.items.drain(..).map(|(_, item)| item)
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &Ob> { self.items.iter().map(|(_, item)| item) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_registration_order_across_removal() {
    let mut subs = Subscribers::default();
    let ids: Vec<_> = ["a", "b", "c"]
      .into_iter()
      .map(|v| {
        let id = subs.reserve_id();
        subs.insert(id, v);
        id
      })
      .collect();

    assert_eq!(subs.remove(ids[1]), Some("b"));
    assert_eq!(subs.remove(ids[1]), None);
    assert_eq!(subs.iter().copied().collect::<Vec<_>>(), vec!["a", "c"]);

    let id = subs.reserve_id();
    subs.insert(id, "d");
    assert_eq!(subs.drain().collect::<Vec<_>>(), vec!["a", "c", "d"]);
    assert!(subs.is_empty());
  }
}
