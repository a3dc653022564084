//! Ordered arena of definitions keyed by identity.
//!
//! Declaration order decides matching priority and rendering, while lookups
//! and copy-on-write replacement go through the [`DefId`].

use indexmap::IndexMap;

use crate::{DefId, DefKind, Definition};

pub(crate) struct Registry<C> {
    defs: IndexMap<DefId, Definition<C>>,
}

impl<C> Registry<C> {
    pub(crate) fn new() -> Self {
        Self {
            defs: IndexMap::new(),
        }
    }

    pub(crate) fn push(&mut self, def: Definition<C>) -> DefId {
        let id = def.id();
        self.defs.insert(id, def);
        id
    }

    /// Substitutes the definition registered under `id` with a derived copy,
    /// keeping its position.
    pub(crate) fn replace_with(
        &mut self,
        id: DefId,
        derive: impl FnOnce(&Definition<C>) -> Definition<C>,
    ) -> bool {
        let Some(slot) = self.defs.get_mut(&id) else {
            return false;
        };
        let next = derive(slot);
        *slot = next;
        true
    }

    pub(crate) fn get(&self, id: DefId) -> Option<&Definition<C>> {
        self.defs.get(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Definition<C>> {
        self.defs.values()
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    fn descends_from(&self, id: DefId, ancestor: DefId) -> bool {
        let mut current = self.get(id).and_then(Definition::parent);
        for _ in 0..self.defs.len() {
            match current {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => current = self.get(parent).and_then(Definition::parent),
                None => return false,
            }
        }
        false
    }

    pub(crate) fn of_kind(&self, kind: DefKind) -> impl Iterator<Item = &Definition<C>> {
        self.iter().filter(move |def| def.kind() == kind)
    }

    /// Definitions of `kind` whose parent is `parent`, in declaration order.
    pub(crate) fn scoped(
        &self,
        kind: DefKind,
        parent: Option<DefId>,
    ) -> impl Iterator<Item = &Definition<C>> {
        self.of_kind(kind).filter(move |def| def.parent() == parent)
    }

    /// Links `child` under `parent`. A definition keeps the first parent it
    /// is given.
    pub(crate) fn adopt(&mut self, parent: DefId, child: DefId) {
        if parent == child {
            tracing::warn!(%child, "a definition cannot be its own child");
            return;
        }
        if self.descends_from(parent, child) {
            tracing::warn!(%parent, %child, "adoption would create a cycle");
            return;
        }
        match self.get(child).map(Definition::parent) {
            None => tracing::warn!(%parent, %child, "adopted an unregistered definition"),
            Some(Some(existing)) if existing != parent => {
                tracing::warn!(%child, %existing, %parent, "definition already has a parent");
            }
            Some(_) => {
                self.replace_with(child, |def| def.derive(|next| next.parent = Some(parent)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Registry;
    use crate::definition::TypedBinding;
    use crate::{DefKind, Decoder, Definition};

    fn registry_with(names: &[&str]) -> Registry<()> {
        let mut registry = Registry::new();
        for name in names {
            let binding = TypedBinding::<(), ()>::new(Decoder::of());
            registry.push(Definition::new(
                DefKind::Option,
                (*name).to_owned(),
                Arc::new(binding),
            ));
        }
        registry
    }

    fn names(registry: &Registry<()>) -> Vec<String> {
        registry.iter().map(|def| def.name().to_owned()).collect()
    }

    #[test]
    fn replacement_keeps_position() {
        let mut registry = registry_with(&["a", "b", "c"]);
        let ids: Vec<_> = registry.iter().map(Definition::id).collect();
        let Some(middle) = ids.get(1).copied() else {
            panic!("expected three definitions");
        };
        assert!(registry.replace_with(middle, |def| def.derive(|next| {
            next.name = "renamed".to_owned();
        })));
        assert_eq!(names(&registry), vec!["a", "renamed", "c"]);
    }

    #[test]
    fn first_parent_wins() {
        let mut registry = registry_with(&["parent", "other", "child"]);
        let ids: Vec<_> = registry.iter().map(Definition::id).collect();
        let [parent, other, child] = ids.as_slice() else {
            panic!("expected three definitions");
        };
        registry.adopt(*parent, *child);
        registry.adopt(*other, *child);
        registry.adopt(*child, *child);
        registry.adopt(*child, *parent);
        assert_eq!(registry.get(*parent).and_then(Definition::parent), None);
        assert_eq!(registry.get(*child).and_then(Definition::parent), Some(*parent));
        assert_eq!(registry.scoped(DefKind::Option, Some(*parent)).count(), 1);
        assert_eq!(registry.scoped(DefKind::Option, None).count(), 2);
    }
}
