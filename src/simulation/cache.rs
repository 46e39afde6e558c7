//! Adaptive force cache
//!
//! Every unordered pair of registered bodies owns one [`CacheEntry`]: the
//! last force computed for the pair and an integer freshness score. Each
//! tick the entry is either recomputed through the [`ForceLaw`] (score
//! burnt down to zero) or reused with its score decayed by the number of
//! ideal frames the timestep covers.
//!
//! Sign convention: a [`PairKey`] always orders its bodies by [`BodyId`],
//! and the stored force is the one exerted **on `first` by `second`**.
//! The force on `second` is its exact negation.

use std::collections::HashMap;

use crate::error::{Result, SimError};
use crate::simulation::body::{Body, BodyId};
use crate::simulation::gravity::ForceLaw;
use crate::simulation::params::FrameBudget;
use crate::simulation::registry::BodyRegistry;
use crate::simulation::vector::NVec3;

/// Unordered identity of two distinct bodies.
/// `PairKey::new(a, b) == PairKey::new(b, a)` for every `a != b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    first: BodyId,
    second: BodyId,
}

impl PairKey {
    pub fn new(a: BodyId, b: BodyId) -> Result<Self> {
        if a == b {
            return Err(SimError::Configuration(format!(
                "a pair needs two distinct bodies, got {a} twice"
            )));
        }
        Ok(Self {
            first: a.min(b),
            second: a.max(b),
        })
    }

    pub fn first(&self) -> BodyId {
        self.first
    }

    pub fn second(&self) -> BodyId {
        self.second
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.first == id || self.second == id
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    score: u32,
    last_force: Option<NVec3>, // None until the first recompute
}

impl CacheEntry {
    /// Entry for a pair that has never been evaluated
    pub fn pending() -> Self {
        Self {
            score: 0,
            last_force: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_force(&self) -> Option<NVec3> {
        self.last_force
    }

    pub fn needs_recompute(&self) -> bool {
        self.score == 0
    }
}

/// What a cache read reports for a pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairForce {
    Evaluated { score: u32, force: NVec3 },
    NotEvaluated,
}

/// How an entry was handled during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recomputed,
    Reused,
}

/// Constants of the log-compressed scoring curve.
///
/// Stronger forces get lower scores and are recomputed sooner. The defaults
/// are tuned for kilometre/kilogram magnitudes: forces below `10^log_base`
/// earn `max_score`, and the score falls across the next `log_range` decades.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub min_score: u32,
    pub max_score: u32,
    pub log_base: f64,
    pub log_range: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            min_score: 1,
            max_score: 100,
            log_base: 10.0,
            log_range: 15.0,
        }
    }
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.min_score < 1 {
            return Err(SimError::Configuration("min_score must be at least 1".into()));
        }
        if self.min_score > self.max_score {
            return Err(SimError::Configuration(format!(
                "min_score {} exceeds max_score {}",
                self.min_score, self.max_score
            )));
        }
        if !self.log_base.is_finite() || !(self.log_range.is_finite() && self.log_range > 0.0) {
            return Err(SimError::Configuration(format!(
                "log_base must be finite and log_range finite and > 0, got {} / {}",
                self.log_base, self.log_range
            )));
        }
        Ok(())
    }

    /// Score assigned right after a recompute that produced a force of `magnitude`
    ///
    /// `max - floor((log10(magnitude + 1) - log_base) / log_range * (max - min) * dt)`,
    /// clamped to `[min_score, max_score]`. A non-positive `dt` applies no
    /// decay pressure and yields `max_score`.
    pub fn fresh_score(&self, magnitude: f64, dt: f64) -> u32 {
        let span = f64::from(self.max_score.saturating_sub(self.min_score));
        let dt = dt.max(0.0);
        let pressure = ((magnitude + 1.0).log10() - self.log_base) / self.log_range * span * dt;
        let score = f64::from(self.max_score) - pressure.floor();

        if score.is_nan() {
            return self.min_score;
        }
        score.clamp(f64::from(self.min_score), f64::from(self.max_score)) as u32
    }

    /// Score after reusing an entry for one tick
    ///
    /// Burns down by the whole number of ideal frames `dt` spans at the target
    /// rate, floored at zero. A non-positive `dt` leaves the score alone.
    pub fn decay(&self, score: u32, budget: &FrameBudget) -> u32 {
        if budget.dt() <= 0.0 {
            return score;
        }
        let frames = (budget.dt() / budget.frame_time()).floor();
        let adjustment = if frames >= f64::from(u32::MAX) { u32::MAX } else { frames as u32 };
        score.saturating_sub(adjustment)
    }

    /// Next state of `entry` for one tick; never mutates anything
    pub fn next_entry(
        &self,
        entry: &CacheEntry,
        first: &Body,
        second: &Body,
        law: &dyn ForceLaw,
        budget: &FrameBudget,
    ) -> Result<(CacheEntry, Outcome)> {
        if entry.needs_recompute() {
            let force = law.force(first, second)?;
            let next = CacheEntry {
                score: self.fresh_score(force.magnitude(), budget.dt()),
                last_force: Some(force),
            };
            return Ok((next, Outcome::Recomputed));
        }

        let next = CacheEntry {
            score: self.decay(entry.score, budget),
            last_force: entry.last_force,
        };
        Ok((next, Outcome::Reused))
    }
}

/// Evaluated-but-not-yet-committed state of one pair
#[derive(Debug, Clone, Copy)]
pub struct StagedEntry {
    pub key: PairKey,
    pub entry: CacheEntry,
    pub outcome: Outcome,
}

/// Pair-keyed store of cached forces
#[derive(Debug, Clone, Default)]
pub struct ForceCache {
    entries: HashMap<PairKey, CacheEntry>,
    policy: ScoringPolicy,
}

impl ForceCache {
    pub fn new(policy: ScoringPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            policy,
        })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Add a pending entry for `id` paired with every body in `others`
    pub fn register_body(&mut self, id: BodyId, others: impl IntoIterator<Item = BodyId>) {
        for other in others {
            if let Ok(key) = PairKey::new(id, other) {
                self.entries.entry(key).or_insert_with(CacheEntry::pending);
            }
        }
    }

    /// Drop every entry that references `id`; returns how many went away
    pub fn forget_body(&mut self, id: BodyId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(id));
        before - self.entries.len()
    }

    pub fn get(&self, key: &PairKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Cache read for the pair (`a`, `b`), with the force oriented as the
    /// force exerted on `a` by `b`
    pub fn read(&self, a: BodyId, b: BodyId) -> Result<PairForce> {
        let key = PairKey::new(a, b)?;
        let entry = self
            .entries
            .get(&key)
            .ok_or_else(|| SimError::NotFound(format!("no cache entry for pair ({a}, {b})")))?;

        Ok(match entry.last_force {
            Some(force) => PairForce::Evaluated {
                score: entry.score,
                force: if a == key.first { force } else { -force },
            },
            None => PairForce::NotEvaluated,
        })
    }

    /// Apply the scoring policy to a single pair and store the result
    pub fn evaluate(
        &mut self,
        key: PairKey,
        registry: &BodyRegistry,
        law: &dyn ForceLaw,
        budget: &FrameBudget,
    ) -> Result<Outcome> {
        let staged = self.stage(key, registry, law, budget)?;
        self.entries.insert(staged.key, staged.entry);
        Ok(staged.outcome)
    }

    /// Compute the next state of `key` without storing it
    pub fn stage(
        &self,
        key: PairKey,
        registry: &BodyRegistry,
        law: &dyn ForceLaw,
        budget: &FrameBudget,
    ) -> Result<StagedEntry> {
        let entry = self
            .entries
            .get(&key)
            .ok_or_else(|| SimError::NotFound(format!("no cache entry for pair ({}, {})", key.first, key.second)))?;
        let first = registry.require(key.first)?;
        let second = registry.require(key.second)?;

        let (entry, outcome) = self.policy.next_entry(entry, first, second, law, budget)?;
        Ok(StagedEntry { key, entry, outcome })
    }

    /// Store staged entries produced by a completed evaluation pass
    pub fn commit(&mut self, staged: impl IntoIterator<Item = StagedEntry>) {
        for s in staged {
            if let Some(entry) = self.entries.get_mut(&s.key) {
                *entry = s.entry;
            }
        }
    }

    /// All keys, sorted, as an indexable sequence safe to split into ranges
    pub fn snapshot_keys(&self) -> Vec<PairKey> {
        let mut keys: Vec<PairKey> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Zero every score so the next tick recomputes every pair
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.score = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(dt: f64, fps: f64) -> FrameBudget {
        FrameBudget::new(dt, fps).unwrap()
    }

    #[test]
    fn weak_forces_earn_max_score() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.fresh_score(0.0, 1.0), 100);
        assert_eq!(policy.fresh_score(1.0e9, 1.0), 100);
    }

    #[test]
    fn strong_forces_score_lower() {
        let policy = ScoringPolicy::default();
        let earth_sun = policy.fresh_score(3.54e19, 1.0);
        let weaker = policy.fresh_score(3.54e13, 1.0);
        assert!(earth_sun < weaker, "{earth_sun} !< {weaker}");
        assert!(earth_sun >= policy.min_score);
    }

    #[test]
    fn huge_forces_clamp_to_min_score() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.fresh_score(1.0e300, 1.0), 1);
        assert_eq!(policy.fresh_score(f64::INFINITY, 1.0), 1);
    }

    #[test]
    fn non_positive_dt_gives_max_score() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.fresh_score(1.0e25, 0.0), 100);
        assert_eq!(policy.fresh_score(1.0e25, -3.0), 100);
    }

    #[test]
    fn decay_counts_ideal_frames() {
        let policy = ScoringPolicy::default();
        // 1 s at 30 fps spans 30 frames
        assert_eq!(policy.decay(100, &budget(1.0, 30.0)), 70);
        // 0.1 s at 30 fps spans 3 frames
        assert_eq!(policy.decay(10, &budget(0.1, 30.0)), 7);
        // floored at zero
        assert_eq!(policy.decay(5, &budget(1.0, 30.0)), 0);
    }

    #[test]
    fn decay_ignores_non_positive_dt() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.decay(42, &budget(0.0, 30.0)), 42);
        assert_eq!(policy.decay(42, &budget(-1.0, 30.0)), 42);
    }

    #[test]
    fn pair_key_is_canonical() {
        let (a, b) = (BodyId(7), BodyId(3));
        let ab = PairKey::new(a, b).unwrap();
        let ba = PairKey::new(b, a).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first(), b);
        assert_eq!(ab.second(), a);
        assert!(PairKey::new(a, a).is_err());
    }

    #[test]
    fn invalid_policies_are_rejected() {
        let base = ScoringPolicy::default();
        assert!(ScoringPolicy { min_score: 0, ..base }.validate().is_err());
        assert!(ScoringPolicy { min_score: 50, max_score: 10, ..base }.validate().is_err());
        assert!(ScoringPolicy { log_range: 0.0, ..base }.validate().is_err());
        assert!(base.validate().is_ok());
    }
}
