// src/services/render_session.rs

//! Per-view depiction state.
//!
//! A [`RenderSession`] tracks which records have a depiction, which are
//! being rendered and which failed. Every request is tagged with a ticket;
//! when the view changes ([`RenderSession::reset`] or
//! [`RenderSession::retain`]) outstanding tickets become stale and their
//! results are discarded instead of being attached to the new view.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::stream::{self, StreamExt};

use crate::models::ChemicalRecord;

use super::renderer::{Depiction, RendererHandle};

/// Depiction state of a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Rendering { ticket: u64 },
    Rendered(Depiction),
    Failed(String),
}

/// What a render request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(Depiction),
    Failed(String),
    /// Another request for the same record is still running
    InFlight,
    /// The view changed before the result arrived
    Discarded,
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }
}

/// Tally of the session's states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounts {
    pub rendered: usize,
    pub failed: usize,
    pub in_flight: usize,
}

/// Clears a `Rendering` entry whose request was dropped before finishing.
struct PendingRender<'a> {
    states: &'a Mutex<HashMap<u64, RenderState>>,
    id: u64,
    ticket: u64,
    armed: bool,
}

impl Drop for PendingRender<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(
            states.get(&self.id),
            Some(RenderState::Rendering { ticket }) if *ticket == self.ticket
        ) {
            log::debug!("Render for CID_{} was cancelled", self.id);
            states.remove(&self.id);
        }
    }
}

pub struct RenderSession {
    handle: RendererHandle,
    max_concurrent: usize,
    next_ticket: AtomicU64,
    states: Mutex<HashMap<u64, RenderState>>,
}

impl RenderSession {
    pub fn new(handle: RendererHandle, max_concurrent: usize) -> Self {
        Self {
            handle,
            max_concurrent: max_concurrent.max(1),
            next_ticket: AtomicU64::new(1),
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn handle(&self) -> &RendererHandle {
        &self.handle
    }

    fn states(&self) -> MutexGuard<'_, HashMap<u64, RenderState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Render the structure for record `id`.
    ///
    /// Finished depictions and failures are returned from the session
    /// without calling the renderer again.
    pub async fn request(&self, id: u64, structure: &str) -> RenderOutcome {
        let ticket = {
            let mut states = self.states();
            match states.get(&id) {
                Some(RenderState::Rendered(depiction)) => {
                    return RenderOutcome::Rendered(depiction.clone());
                }
                Some(RenderState::Failed(message)) => {
                    return RenderOutcome::Failed(message.clone());
                }
                Some(RenderState::Rendering { .. }) => return RenderOutcome::InFlight,
                None => {}
            }
            let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
            states.insert(id, RenderState::Rendering { ticket });
            ticket
        };

        let mut pending = PendingRender {
            states: &self.states,
            id,
            ticket,
            armed: true,
        };
        let result = self.handle.render(structure).await;
        pending.armed = false;

        let mut states = self.states();
        let current = matches!(
            states.get(&id),
            Some(RenderState::Rendering { ticket: t }) if *t == ticket
        );
        if !current {
            log::debug!("Discarding stale depiction for CID_{}", id);
            return RenderOutcome::Discarded;
        }

        match result {
            Ok(depiction) => {
                let depiction = depiction.fit_to_container();
                states.insert(id, RenderState::Rendered(depiction.clone()));
                RenderOutcome::Rendered(depiction)
            }
            Err(e) => {
                log::warn!("Failed to render CID_{}: {}", id, e);
                let message = e.to_string();
                states.insert(id, RenderState::Failed(message.clone()));
                RenderOutcome::Failed(message)
            }
        }
    }

    pub async fn render_record(&self, record: &ChemicalRecord) -> RenderOutcome {
        self.request(record.id, &record.structure).await
    }

    /// Render the first `count` records with bounded concurrency.
    ///
    /// Outcomes are returned in completion order.
    pub async fn render_priority(
        &self,
        records: &[&ChemicalRecord],
        count: usize,
    ) -> Vec<(u64, RenderOutcome)> {
        let mut outcomes = Vec::new();
        let mut renders = stream::iter(records.iter().take(count))
            .map(|record| async move { (record.id, self.render_record(record).await) })
            .buffer_unordered(self.max_concurrent);

        while let Some(outcome) = renders.next().await {
            outcomes.push(outcome);
        }

        let rendered = outcomes.iter().filter(|(_, o)| o.is_rendered()).count();
        log::debug!("Priority renders: {}/{} succeeded", rendered, outcomes.len());
        outcomes
    }

    /// Forget everything; in-flight results will be discarded.
    pub fn reset(&self) {
        self.states().clear();
    }

    /// Keep state only for the given records.
    pub fn retain(&self, ids: &HashSet<u64>) {
        self.states().retain(|id, _| ids.contains(id));
    }

    /// Clear a failure for `id` and request the structure again.
    ///
    /// Rendered and in-flight records behave as in [`RenderSession::request`].
    pub async fn retry(&self, id: u64, structure: &str) -> RenderOutcome {
        {
            let mut states = self.states();
            if matches!(states.get(&id), Some(RenderState::Failed(_))) {
                log::debug!("Retrying render for CID_{}", id);
                states.remove(&id);
            }
        }
        self.request(id, structure).await
    }

    pub fn state(&self, id: u64) -> Option<RenderState> {
        self.states().get(&id).cloned()
    }

    pub fn counts(&self) -> RenderCounts {
        let states = self.states();
        let mut counts = RenderCounts::default();
        for state in states.values() {
            match state {
                RenderState::Rendering { .. } => counts.in_flight += 1,
                RenderState::Rendered(_) => counts.rendered += 1,
                RenderState::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }
}
