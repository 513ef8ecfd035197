//! Search orchestration.
//!
//! A [`SearchSession`] owns the single "current result" slot of one user
//! session and moves it through `Idle -> Searching -> Success | Failed`.
//! `Success` and `Failed` re-enter `Searching` on the next query; no state
//! is terminal.
//!
//! ## Concurrency
//!
//! The slot lock is only held for the state write, never across the service
//! call. A new search does not cancel one already in flight. Whichever call
//! completes last is what the slot shows, even if it was submitted first; that
//! overwrite is logged but allowed.

use crate::client::GenerativeClient;
use crate::finder::MedicineFinder;
use crate::model::{MedicineQuery, SearchResult};
use crate::FinderResult;
use std::sync::{Arc, PoisonError, RwLock};

/// What the presentation layer should currently show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Success {
        query: String,
        result: Arc<SearchResult>,
    },
    /// Carries the query and a user-facing message; no result is retained.
    Failed {
        query: String,
        message: String,
    },
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            SearchState::Success { result, .. } => Some(result.as_ref()),
            _ => None,
        }
    }
}

/// Handle for one submitted search, returned by [`SearchSession::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: SearchState,
}

/// The per-session search state machine. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    slot: Arc<RwLock<Slot>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Enters `Searching` immediately, from any state.
    pub fn begin(&self, query: &MedicineQuery) -> SearchTicket {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.generation += 1;
        slot.state = SearchState::Searching {
            query: query.as_str().to_string(),
        };
        tracing::debug!(generation = slot.generation, medicine = %query, "search started");

        SearchTicket {
            generation: slot.generation,
            query: query.as_str().to_string(),
        }
    }

    /// Writes the outcome of a search wholesale and returns the new state.
    ///
    /// Failures are reduced to their user-facing message.
    pub fn complete(&self, ticket: SearchTicket, outcome: FinderResult<SearchResult>) -> SearchState {
        let state = match outcome {
            Ok(result) => SearchState::Success {
                query: ticket.query,
                result: Arc::new(result),
            },
            Err(e) => SearchState::Failed {
                query: ticket.query,
                message: e.user_message().to_string(),
            },
        };

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if ticket.generation < slot.generation {
            tracing::debug!(
                completed = ticket.generation,
                latest = slot.generation,
                "earlier search completed after a newer one started; overwriting current state"
            );
        }
        slot.state = state.clone();
        state
    }

    /// Runs one full search: begin, await the finder, complete.
    pub async fn search<C: GenerativeClient>(
        &self,
        finder: &MedicineFinder<C>,
        query: &MedicineQuery,
    ) -> SearchState {
        let ticket = self.begin(query);
        let outcome = finder.find_alternatives(query).await;
        self.complete(ticket, outcome)
    }
}
