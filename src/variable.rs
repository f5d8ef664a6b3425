use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::membership::Membership;

new_key_type! {
    /// A term key
    pub struct TermKey;
}

/// Identifies the controller a handle was issued by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ControllerId(u64);

impl ControllerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);

        ControllerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a linguistic term registered with a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub(crate) owner: ControllerId,
    pub(crate) key: TermKey,
}

/// Handle to one position of a controller's crisp sensor vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Input {
    pub(crate) owner: ControllerId,
    pub(crate) index: usize,
}

impl Input {
    pub fn index(self) -> usize {
        self.index
    }
}

/// Membership functions shared by every rule that names them.
pub(crate) struct Terms {
    owner: ControllerId,
    memberships: SlotMap<TermKey, Arc<Membership>>,
}

impl Terms {
    pub(crate) fn new(owner: ControllerId) -> Self {
        Self {
            owner,
            memberships: SlotMap::with_key(),
        }
    }

    pub(crate) fn add(&mut self, membership: impl Into<Arc<Membership>>) -> Term {
        Term {
            owner: self.owner,
            key: self.memberships.insert(membership.into()),
        }
    }

    /// `None` for terms issued by another registry, even when the key is in use here.
    pub(crate) fn get(&self, term: Term) -> Option<&Arc<Membership>> {
        if term.owner != self.owner {
            return None;
        }

        self.memberships.get(term.key)
    }

    pub(crate) fn len(&self) -> usize {
        self.memberships.len()
    }
}

#[test]
fn test_terms_reject_foreign_handles() {
    let mut ours = Terms::new(ControllerId::next());
    let mut theirs = Terms::new(ControllerId::next());

    let foreign = theirs.add(Membership::new(0. ..=1., 0.5).unwrap());
    let own = ours.add(Membership::new(0. ..=1., 0.5).unwrap());

    assert_eq!(own.key, foreign.key);
    assert!(ours.get(own).is_some());
    assert!(ours.get(foreign).is_none());
}
