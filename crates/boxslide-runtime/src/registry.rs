#![forbid(unsafe_code)]

//! Progress registry: one entry per in-flight slide, keyed by token.
//!
//! # Invariants
//!
//! 1. Tokens are unique among live entries. A token may be handed out again
//!    once its entry is removed.
//! 2. New tokens come from a seeded [`SmallRng`] draw followed by an upward
//!    linear probe, so a given seed and call sequence always yields the same
//!    tokens.
//! 3. A `Cancelled` entry is indistinguishable from a missing one to every
//!    reader that asks [`ProgressEntry::is_running`]. The slider removes an
//!    entry right after cancelling it, so `Cancelled` is transient there.

use ahash::AHashMap;
use boxslide_core::{ProgressToken, ResolvedOptions};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::plan::{InterpolationPlan, SlideEnd};

/// Seed used by [`ProgressRegistry::new`].
pub const DEFAULT_SEED: u64 = 0x5EED_B0C5_11DE;

/// Lifecycle of a registered slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Ticking.
    Running,
    /// Superseded and about to be removed.
    Cancelled,
}

/// Per-slide state, owned by the registry and handed to each tick.
#[derive(Debug, Clone)]
pub struct ProgressEntry<E> {
    pub element: E,
    pub state: AnimationState,
    pub end: SlideEnd,
    pub plan: InterpolationPlan,
    pub options: ResolvedOptions,
    /// Timestamp of the first tick, in host milliseconds.
    pub started_at: Option<f64>,
}

impl<E> ProgressEntry<E> {
    #[must_use]
    pub fn new(element: E, plan: InterpolationPlan, options: ResolvedOptions) -> Self {
        Self {
            element,
            state: AnimationState::Running,
            end: plan.end(),
            plan,
            options,
            started_at: None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }
}

/// Token-keyed store of in-flight slides.
#[derive(Debug)]
pub struct ProgressRegistry<E> {
    entries: AHashMap<ProgressToken, ProgressEntry<E>>,
    rng: SmallRng,
}

impl<E> ProgressRegistry<E> {
    /// Empty registry seeded with [`DEFAULT_SEED`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Empty registry with an explicit token seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            entries: AHashMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Store `entry` under a fresh token.
    pub fn create(&mut self, entry: ProgressEntry<E>) -> ProgressToken {
        let raw = self.rng.random_range(1..=u32::MAX);
        let mut token = ProgressToken::new(raw).unwrap_or(ProgressToken::FIRST);
        while self.entries.contains_key(&token) {
            token = token.next();
        }
        self.entries.insert(token, entry);
        token
    }

    #[must_use]
    pub fn get(&self, token: ProgressToken) -> Option<&ProgressEntry<E>> {
        self.entries.get(&token)
    }

    pub fn get_mut(&mut self, token: ProgressToken) -> Option<&mut ProgressEntry<E>> {
        self.entries.get_mut(&token)
    }

    /// Entry for `token` only if it is still running.
    #[must_use]
    pub fn live(&self, token: ProgressToken) -> Option<&ProgressEntry<E>> {
        self.get(token).filter(|e| e.is_running())
    }

    #[must_use]
    pub fn contains(&self, token: ProgressToken) -> bool {
        self.entries.contains_key(&token)
    }

    /// Flag a running entry as cancelled. Returns `false` if there was none.
    pub fn mark_cancelled(&mut self, token: ProgressToken) -> bool {
        match self.entries.get_mut(&token) {
            Some(entry) if entry.is_running() => {
                entry.state = AnimationState::Cancelled;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, token: ProgressToken) -> Option<ProgressEntry<E>> {
        self.entries.remove(&token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokens of every stored entry, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = ProgressToken> + '_ {
        self.entries.keys().copied()
    }
}

impl<E> Default for ProgressRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
