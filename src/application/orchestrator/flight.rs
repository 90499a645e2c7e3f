//! In-Flight Table
//!
//! Per-name de-duplication of slow work. The first caller to claim a name
//! becomes the leader and does the work; later callers for the same name get
//! the leader's flight and wait for its outcome instead of starting their own.
//!
//! Claims are decided under the table lock together with a "already done?"
//! check, so a name is either stored, in flight, or claimed by exactly one
//! caller. Leaders must make their results visible (store writes) before
//! completing the flight.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::value_objects::QualifiedName;

enum State<T> {
    Pending,
    Done(T),
    Abandoned,
}

/// What a follower observed while waiting
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome<T> {
    Ready(T),
    /// Leader dropped its claim without publishing
    Abandoned,
    TimedOut,
}

/// A shared pending result
pub struct Flight<T> {
    state: Mutex<State<T>>,
    done: Condvar,
}

impl<T: Clone> Flight<T> {
    fn new() -> Self {
        Self {
            state: Mutex::new(State::Pending),
            done: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until the leader finishes. `None` waits without bound.
    pub fn wait(&self, timeout: Option<Duration>) -> WaitOutcome<T> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut state = self.lock();
        loop {
            match &*state {
                State::Done(value) => return WaitOutcome::Ready(value.clone()),
                State::Abandoned => return WaitOutcome::Abandoned,
                State::Pending => {}
            }

            state = match deadline {
                None => self.done.wait(state).unwrap_or_else(|e| e.into_inner()),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return WaitOutcome::TimedOut;
                    }
                    self.done
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(|e| e.into_inner())
                        .0
                }
            };
        }
    }

    fn finish(&self, next: State<T>) {
        let mut state = self.lock();
        if matches!(*state, State::Pending) {
            *state = next;
        }
        drop(state);
        self.done.notify_all();
    }
}

/// Result of claiming a single name
pub enum Claim<'a, T: Clone> {
    /// Already done, nothing to wait for
    Done,
    Leader(FlightGuard<'a, T>),
    Follower(Arc<Flight<T>>),
}

/// Result of claiming a batch of names
pub struct BatchClaim<'a, T: Clone> {
    /// Names that were already done
    pub done: Vec<QualifiedName>,
    /// Names in flight elsewhere, with the flight to wait on
    pub followers: Vec<(QualifiedName, Arc<Flight<T>>)>,
    /// Claim over the remaining names, if any
    pub leader: Option<FlightGuard<'a, T>>,
}

/// Leader's handle. Completing it publishes the outcome; dropping it
/// without completing releases the names and wakes followers as abandoned.
pub struct FlightGuard<'a, T: Clone> {
    table: &'a FlightTable<T>,
    names: Vec<QualifiedName>,
    flight: Arc<Flight<T>>,
    finished: bool,
}

impl<T: Clone> FlightGuard<'_, T> {
    /// Names this guard leads, in claim order
    pub fn names(&self) -> &[QualifiedName] {
        &self.names
    }

    /// Publish the outcome to every follower
    pub fn complete(mut self, value: T) {
        self.release(State::Done(value));
    }

    fn release(&mut self, state: State<T>) {
        self.finished = true;
        self.table.remove(&self.names, &self.flight);
        self.flight.finish(state);
    }
}

impl<T: Clone> Drop for FlightGuard<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.release(State::Abandoned);
        }
    }
}

/// Map from qualified name to the flight currently working on it
pub struct FlightTable<T> {
    flights: Mutex<HashMap<QualifiedName, Arc<Flight<T>>>>,
}

impl<T> Default for FlightTable<T> {
    fn default() -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> FlightTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QualifiedName, Arc<Flight<T>>>> {
        self.flights.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of names currently in flight
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    /// Claim one name unless `is_done` says it needs no work
    pub fn claim(&self, name: &QualifiedName, is_done: impl Fn(&QualifiedName) -> bool) -> Claim<'_, T> {
        let mut batch = self.claim_batch(std::slice::from_ref(name), is_done);
        if let Some(guard) = batch.leader.take() {
            return Claim::Leader(guard);
        }
        match batch.followers.pop() {
            Some((_, flight)) => Claim::Follower(flight),
            None => Claim::Done,
        }
    }

    /// Claim every name of a batch that is neither done nor in flight.
    ///
    /// Duplicate names within the batch are considered once.
    pub fn claim_batch(
        &self,
        names: &[QualifiedName],
        is_done: impl Fn(&QualifiedName) -> bool,
    ) -> BatchClaim<'_, T> {
        let mut flights = self.lock();
        let flight = Arc::new(Flight::new());
        let mut seen = HashSet::new();
        let mut claim = BatchClaim {
            done: Vec::new(),
            followers: Vec::new(),
            leader: None,
        };
        let mut claimed = Vec::new();

        for name in names {
            if !seen.insert(name) {
                continue;
            }
            // In-flight check first: a leader stores before it leaves the table
            if let Some(existing) = flights.get(name) {
                claim.followers.push((name.clone(), Arc::clone(existing)));
            } else if is_done(name) {
                claim.done.push(name.clone());
            } else {
                flights.insert(name.clone(), Arc::clone(&flight));
                claimed.push(name.clone());
            }
        }

        if !claimed.is_empty() {
            claim.leader = Some(FlightGuard {
                table: self,
                names: claimed,
                flight,
                finished: false,
            });
        }
        claim
    }

    fn remove(&self, names: &[QualifiedName], flight: &Arc<Flight<T>>) {
        let mut flights = self.lock();
        for name in names {
            if flights.get(name).is_some_and(|f| Arc::ptr_eq(f, flight)) {
                flights.remove(name);
            }
        }
    }
}
