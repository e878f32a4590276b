//! Memoized SDK load.
//!
//! Loading MapKit JS happens once per page. The first requester starts it;
//! everyone else, before or after it settles, gets the same outcome. A
//! settled loader never goes back: a failure stays a failure until reload.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::cell::RefCell;

use futures::channel::oneshot;

use crate::error::LoadError;

type Outcome = Result<(), LoadError>;

#[derive(Debug)]
enum Phase {
    /// Nobody has started the load yet; subscribers wait here.
    Idle(Vec<oneshot::Sender<Outcome>>),
    Loading(Vec<oneshot::Sender<Outcome>>),
    Ready,
    Failed(LoadError),
}

/// Observable loader state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    Loading,
    Ready,
    Failed(LoadError),
}

#[derive(Debug)]
pub struct SdkLoader {
    phase: RefCell<Phase>,
}

impl Default for SdkLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SdkLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self { phase: RefCell::new(Phase::Idle(Vec::new())) }
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        match &*self.phase.borrow() {
            Phase::Idle(_) => LoadState::NotStarted,
            Phase::Loading(_) => LoadState::Loading,
            Phase::Ready => LoadState::Ready,
            Phase::Failed(err) => LoadState::Failed(err.clone()),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(&*self.phase.borrow(), Phase::Ready)
    }

    /// Request the SDK. `start` runs only for the very first request, after
    /// the loader has moved to `Loading`, so it may call [`Self::settle`]
    /// synchronously.
    pub fn load(&self, start: impl FnOnce()) -> LoadTicket {
        let (ticket, first) = {
            let mut phase = self.phase.borrow_mut();
            match &mut *phase {
                Phase::Ready => (LoadTicket::settled(Ok(())), false),
                Phase::Failed(err) => (LoadTicket::settled(Err(err.clone())), false),
                Phase::Loading(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    (LoadTicket::pending(rx), false)
                }
                Phase::Idle(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    let mut waiters = std::mem::take(waiters);
                    waiters.push(tx);
                    *phase = Phase::Loading(waiters);
                    (LoadTicket::pending(rx), true)
                }
            }
        };
        if first {
            log::info!("loading mapping SDK");
            start();
        }
        ticket
    }

    /// Wait for a load someone else starts. Never starts it.
    pub fn subscribe(&self) -> LoadTicket {
        let mut phase = self.phase.borrow_mut();
        match &mut *phase {
            Phase::Ready => LoadTicket::settled(Ok(())),
            Phase::Failed(err) => LoadTicket::settled(Err(err.clone())),
            Phase::Idle(waiters) | Phase::Loading(waiters) => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                LoadTicket::pending(rx)
            }
        }
    }

    /// Record the outcome and wake every waiter. Later settlements are ignored.
    pub fn settle(&self, outcome: Outcome) {
        let waiters = {
            let mut phase = self.phase.borrow_mut();
            if matches!(&*phase, Phase::Ready | Phase::Failed(_)) {
                log::warn!("mapping SDK already settled, ignoring {outcome:?}");
                return;
            }
            let next = match &outcome {
                Ok(()) => Phase::Ready,
                Err(err) => Phase::Failed(err.clone()),
            };
            match std::mem::replace(&mut *phase, next) {
                Phase::Idle(waiters) | Phase::Loading(waiters) => waiters,
                Phase::Ready | Phase::Failed(_) => Vec::new(),
            }
        };
        match &outcome {
            Ok(()) => log::info!("mapping SDK ready"),
            Err(err) => log::error!("mapping SDK failed: {err}"),
        }
        for waiter in waiters {
            if waiter.send(outcome.clone()).is_err() {
                log::debug!("load waiter went away before settlement");
            }
        }
    }
}

#[derive(Debug)]
enum Ticket {
    Settled(Outcome),
    Pending(oneshot::Receiver<Outcome>),
}

/// A pending or settled load outcome.
#[derive(Debug)]
pub struct LoadTicket(Ticket);

impl LoadTicket {
    fn settled(outcome: Outcome) -> Self {
        Self(Ticket::Settled(outcome))
    }

    fn pending(rx: oneshot::Receiver<Outcome>) -> Self {
        Self(Ticket::Pending(rx))
    }

    /// Wait for the outcome.
    ///
    /// # Errors
    ///
    /// The load's [`LoadError`]. A loader dropped before settling reports
    /// the SDK as unavailable.
    pub async fn wait(self) -> Outcome {
        match self.0 {
            Ticket::Settled(outcome) => outcome,
            Ticket::Pending(rx) => rx.await.unwrap_or_else(|_| Err(LoadError::unavailable())),
        }
    }
}
