//! Intersection coordination
//!
//! The intersection is a fixed body plus a single-permit semaphore. A car
//! must hold the permit for as long as it overlaps the intersection.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use log::trace;

use super::error::{SimError, SimResult};
use super::types::{AgentId, Body};

#[derive(Debug)]
struct PermitState {
    available: usize,
    holders: Vec<AgentId>,
}

/// Counting semaphore that also records who holds it.
///
/// Waiters are woken one at a time with no ordering guarantee.
#[derive(Debug)]
pub struct RegionPermit {
    state: Mutex<PermitState>,
    released: Condvar,
    acquisitions: AtomicU64,
    peak_holders: AtomicUsize,
}

impl RegionPermit {
    /// Create a permit pool. Zero permits would lock every car out forever.
    pub fn new(permits: usize) -> SimResult<Self> {
        if permits == 0 {
            return Err(SimError::Config(
                "intersection semaphore needs at least one permit".to_string(),
            ));
        }
        Ok(Self {
            state: Mutex::new(PermitState {
                available: permits,
                holders: Vec::with_capacity(permits),
            }),
            released: Condvar::new(),
            acquisitions: AtomicU64::new(0),
            peak_holders: AtomicUsize::new(0),
        })
    }

    fn lock(&self) -> MutexGuard<'_, PermitState> {
        // The state is two plain fields updated together; it stays valid
        // even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until a permit is free, then take it
    pub fn acquire(&self, agent: AgentId) -> RegionGuard<'_> {
        let mut state = self.lock();
        while state.available == 0 {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        self.take(&mut state, agent);
        RegionGuard {
            permit: self,
            agent,
        }
    }

    /// Take a permit only if one is free right now
    pub fn try_acquire(&self, agent: AgentId) -> Option<RegionGuard<'_>> {
        let mut state = self.lock();
        if state.available == 0 {
            return None;
        }
        self.take(&mut state, agent);
        Some(RegionGuard {
            permit: self,
            agent,
        })
    }

    fn take(&self, state: &mut PermitState, agent: AgentId) {
        state.available -= 1;
        state.holders.push(agent);
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        self.peak_holders
            .fetch_max(state.holders.len(), Ordering::Relaxed);
        trace!("{} acquired the intersection", agent);
    }

    fn release(&self, agent: AgentId) {
        let mut state = self.lock();
        if let Some(index) = state.holders.iter().position(|holder| *holder == agent) {
            state.holders.swap_remove(index);
        }
        state.available += 1;
        drop(state);
        self.released.notify_one();
        trace!("{} released the intersection", agent);
    }

    pub fn available_permits(&self) -> usize {
        self.lock().available
    }

    pub fn holders(&self) -> Vec<AgentId> {
        self.lock().holders.clone()
    }

    /// Total number of successful acquisitions
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }

    /// Largest number of simultaneous holders ever observed
    pub fn peak_holders(&self) -> usize {
        self.peak_holders.load(Ordering::Relaxed)
    }
}

/// Held permit. Dropping it returns the permit and wakes one waiter.
#[derive(Debug)]
#[must_use = "the intersection is released as soon as the guard is dropped"]
pub struct RegionGuard<'a> {
    permit: &'a RegionPermit,
    agent: AgentId,
}

impl RegionGuard<'_> {
    pub fn agent(&self) -> AgentId {
        self.agent
    }
}

impl Drop for RegionGuard<'_> {
    fn drop(&mut self) {
        self.permit.release(self.agent);
    }
}

/// The intersection body and the permit guarding it
#[derive(Debug)]
pub struct SimIntersection {
    body: Body,
    permit: RegionPermit,
}

impl SimIntersection {
    /// Create the intersection. Anything other than exactly one permit
    /// would break mutual exclusion, so it is refused.
    pub fn new(body: Body, permits: usize) -> SimResult<Self> {
        if permits != 1 {
            return Err(SimError::Config(format!(
                "intersection must start with exactly one permit, got {permits}"
            )));
        }
        Ok(Self {
            body,
            permit: RegionPermit::new(permits)?,
        })
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn permit(&self) -> &RegionPermit {
        &self.permit
    }

    /// The car currently holding the intersection, if any
    pub fn occupied_by(&self) -> Option<AgentId> {
        self.permit.holders().first().copied()
    }
}
