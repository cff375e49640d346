//! Named query caches with invalidation and optimistic writes
//!
//! Two logical caches exist: the image list and the vote tally. Each is a
//! [`Query`] holding the last fetched value, a staleness flag, and a fetch
//! sequence counter. Fetches take a ticket from [`Query::begin_fetch`] and a
//! response is installed only while its ticket is still the newest, so an
//! out-of-order response from an older fetch can never clobber fresher data
//! or a pending optimistic write.

use std::sync::Mutex;

use crate::model::Image;
use crate::votes::VoteTally;

/// A fetch ticket; valid until a newer fetch for the same query starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
struct QueryState<T> {
    value: Option<T>,
    stale: bool,
    seq: u64,
}

/// One named cache slot
#[derive(Debug)]
pub struct Query<T> {
    state: Mutex<QueryState<T>>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(QueryState {
                value: None,
                stale: false,
                seq: 0,
            }),
        }
    }
}

impl<T: Clone> Query<T> {
    /// The cached value if present and not invalidated
    pub fn get(&self) -> Option<T> {
        let state = self.state.lock().unwrap();
        if state.stale {
            None
        } else {
            state.value.clone()
        }
    }

    /// The cached value regardless of staleness
    pub fn get_stale(&self) -> Option<T> {
        self.state.lock().unwrap().value.clone()
    }

    /// Start a fetch, superseding any fetch already in flight
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut state = self.state.lock().unwrap();
        state.seq += 1;
        FetchTicket(state.seq)
    }

    /// Install a fetched value; returns false if the ticket was superseded
    pub fn complete_fetch(&self, ticket: FetchTicket, value: T) -> bool {
        let mut state = self.state.lock().unwrap();
        if ticket.0 != state.seq {
            return false;
        }
        state.value = Some(value);
        state.stale = false;
        true
    }

    /// Mark the cached value stale; the next read must re-fetch
    pub fn invalidate(&self) {
        self.state.lock().unwrap().stale = true;
    }

    /// Synchronously rewrite the cached value in place, if there is one
    ///
    /// This is the optimistic-update hook: the change is provisional and
    /// stands until a completed fetch replaces the whole value.
    pub fn mutate<F: FnOnce(&mut T)>(&self, f: F) {
        let mut state = self.state.lock().unwrap();
        if let Some(value) = state.value.as_mut() {
            f(value);
        }
    }

    /// Seed an empty slot with a provisional value
    ///
    /// The value is readable through [`get_stale`](Self::get_stale) but is
    /// installed already stale: it was never fetched, so the next read must
    /// still go to the API.
    pub fn set_provisional(&self, value: T) {
        let mut state = self.state.lock().unwrap();
        state.value = Some(value);
        state.stale = true;
    }
}

/// The injectable cache store holding both named queries
#[derive(Debug, Default)]
pub struct Store {
    pub cats: Query<Vec<Image>>,
    pub votes: Query<VoteTally>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
