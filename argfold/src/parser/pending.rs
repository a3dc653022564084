//! Ordered set of definitions still eligible to match in the current scope.
//!
//! Entries are keyed by a signed position so a batch can be placed in front
//! of the existing entries without shifting them, and removed by identity.

use std::collections::{BTreeMap, HashMap};

use crate::DefId;

#[derive(Debug, Default)]
pub(crate) struct PendingSet {
    order: BTreeMap<i64, DefId>,
    positions: HashMap<DefId, i64>,
    front: i64,
    back: i64,
}

impl PendingSet {
    pub(crate) fn from_ids(ids: impl IntoIterator<Item = DefId>) -> Self {
        let mut set = Self::default();
        for id in ids {
            set.push_back(id);
        }
        set
    }

    fn push_back(&mut self, id: DefId) {
        if self.positions.contains_key(&id) {
            return;
        }
        self.order.insert(self.back, id);
        self.positions.insert(id, self.back);
        self.back += 1;
    }

    /// Places `ids` ahead of every current entry, keeping their relative
    /// order and skipping entries already present.
    pub(crate) fn prepend(&mut self, ids: impl IntoIterator<Item = DefId>) {
        let mut fresh: Vec<DefId> = Vec::new();
        for id in ids {
            if !self.positions.contains_key(&id) && !fresh.contains(&id) {
                fresh.push(id);
            }
        }
        for id in fresh.into_iter().rev() {
            self.front -= 1;
            self.order.insert(self.front, id);
            self.positions.insert(id, self.front);
        }
    }

    pub(crate) fn remove(&mut self, id: DefId) -> bool {
        self.positions
            .remove(&id)
            .is_some_and(|position| self.order.remove(&position).is_some())
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.positions.clear();
    }

    pub(crate) fn first(&self) -> Option<DefId> {
        self.order.values().next().copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = DefId> + '_ {
        self.order.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PendingSet;
    use crate::definition::TypedBinding;
    use crate::{DefId, DefKind, Decoder, Definition};

    fn ids(count: usize) -> Vec<DefId> {
        (0..count)
            .map(|n| {
                let binding = TypedBinding::<(), ()>::new(Decoder::of());
                Definition::new(DefKind::Option, format!("d{n}"), Arc::new(binding)).id()
            })
            .collect()
    }

    #[test]
    fn prepend_keeps_batch_order_ahead_of_existing() {
        let all = ids(4);
        let [a, b, c, d] = all.as_slice() else {
            panic!("expected four ids");
        };
        let mut set = PendingSet::from_ids([*a, *b]);
        set.prepend([*c, *a, *d, *c]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![*c, *d, *a, *b]);
        assert_eq!(set.first(), Some(*c));
    }

    #[test]
    fn removal_and_clear() {
        let all = ids(2);
        let [a, b] = all.as_slice() else {
            panic!("expected two ids");
        };
        let mut set = PendingSet::from_ids([*a, *b]);
        assert!(set.remove(*a));
        assert!(!set.remove(*a));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![*b]);
        set.clear();
        assert_eq!(set.first(), None);
        set.prepend([*a]);
        assert_eq!(set.first(), Some(*a));
    }
}
