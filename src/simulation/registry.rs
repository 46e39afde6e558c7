//! Ordered body storage.
//!
//! Bodies are kept in insertion order so every walk over the registry is
//! stable between runs. Handles come from a monotonically increasing
//! counter and are never recycled; a side table maps each handle to its
//! current slot and is rebuilt after a removal shifts the slots.

use std::collections::HashMap;

use crate::error::{Result, SimError};
use crate::simulation::body::{Body, BodyId, BodyRecord};

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    slots: HashMap<BodyId, usize>,
    next_id: u32,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `record` and append it, returning its new handle.
    /// Nothing is inserted when validation fails.
    pub fn insert(&mut self, record: BodyRecord) -> Result<BodyId> {
        if self.get_by_name(&record.name).is_some() {
            return Err(SimError::Configuration(format!(
                "a body named `{}` already exists",
                record.name
            )));
        }

        let id = BodyId(self.next_id);
        let body = Body::from_record(id, record)?;
        self.next_id = self.next_id.checked_add(1).ok_or_else(|| {
            SimError::Configuration("body handle space exhausted".into())
        })?;

        self.slots.insert(id, self.bodies.len());
        self.bodies.push(body);
        Ok(id)
    }

    /// Remove the body called `name`
    pub fn remove_by_name(&mut self, name: &str) -> Result<Body> {
        let slot = self
            .bodies
            .iter()
            .position(|b| b.name() == name)
            .ok_or_else(|| SimError::NotFound(format!("no body named `{name}`")))?;

        let body = self.bodies.remove(slot);
        self.slots.remove(&body.id());
        // Everything after the removed slot moved down by one
        for (i, b) in self.bodies.iter().enumerate().skip(slot) {
            self.slots.insert(b.id(), i);
        }
        Ok(body)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(&id).map(|&i| &self.bodies[i])
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    /// Like [`BodyRegistry::get`] but reports unknown handles as errors
    pub fn require(&self, id: BodyId) -> Result<&Body> {
        self.get(id)
            .ok_or_else(|| SimError::NotFound(format!("no body with handle {id}")))
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.iter().map(Body::id)
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
