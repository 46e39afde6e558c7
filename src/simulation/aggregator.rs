//! Fold pairwise cached forces into one net force per body
//!
//! Each evaluated pair contributes its stored force to `first` and the
//! negation of that same vector to `second`, so the two contributions are
//! equal and opposite by construction.

use std::collections::HashMap;

use crate::simulation::body::BodyId;
use crate::simulation::cache::{CacheEntry, ForceCache, PairKey};
use crate::simulation::registry::BodyRegistry;
use crate::simulation::vector::NVec3;

/// Net force per body for one tick. Rebuilt every tick, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetForces {
    forces: HashMap<BodyId, NVec3>,
}

impl NetForces {
    pub fn get(&self, id: BodyId) -> Option<NVec3> {
        self.forces.get(&id).copied()
    }

    pub(crate) fn remove(&mut self, id: BodyId) {
        self.forces.remove(&id);
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, NVec3)> + '_ {
        self.forces.iter().map(|(&id, &f)| (id, f))
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }
}

impl FromIterator<(BodyId, NVec3)> for NetForces {
    fn from_iter<I: IntoIterator<Item = (BodyId, NVec3)>>(iter: I) -> Self {
        Self {
            forces: iter.into_iter().collect(),
        }
    }
}

/// Contributions of one pair as (force on `first`, force on `second`),
/// `None` while the pair has never been evaluated
pub fn pair_contribution(entry: &CacheEntry) -> Option<(NVec3, NVec3)> {
    entry.last_force().map(|f| (f, -f))
}

/// Sum every pair in `keys` into net forces for all registered bodies.
/// Folding follows the order of `keys`, so a fixed order gives
/// bit-identical sums.
pub fn aggregate(registry: &BodyRegistry, cache: &ForceCache, keys: &[PairKey]) -> NetForces {
    // Every known body starts at zero, evaluated pairs or not
    let mut forces: HashMap<BodyId, NVec3> = registry.ids().map(|id| (id, NVec3::zeros())).collect();

    for key in keys {
        let Some((on_first, on_second)) = cache.get(key).and_then(pair_contribution) else {
            continue;
        };
        if let Some(f) = forces.get_mut(&key.first()) {
            *f += on_first;
        }
        if let Some(f) = forces.get_mut(&key.second()) {
            *f += on_second;
        }
    }

    NetForces { forces }
}
