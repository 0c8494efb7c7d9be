use dns_race_domain::Outcome;
use tokio_util::sync::CancellationToken;

/// Per-query bookkeeping of one race. Never shared between races.
#[derive(Debug)]
pub struct RaceState {
    dispatched: usize,
    received: usize,
    winner: Option<Outcome>,
    cancel: CancellationToken,
}

impl RaceState {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            dispatched: 0,
            received: 0,
            winner: None,
            cancel,
        }
    }

    pub fn record_dispatch(&mut self) {
        self.dispatched += 1;
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// Every dispatched worker has reported.
    pub fn is_exhausted(&self) -> bool {
        self.received >= self.dispatched
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Counts an arriving outcome and latches it if it is the first winner.
    /// Returns `true` when this outcome decided the race.
    pub fn observe(&mut self, outcome: Outcome) -> bool {
        self.received += 1;

        if self.winner.is_some() || !outcome.is_winner() {
            return false;
        }

        self.winner = Some(outcome);
        self.cancel();
        true
    }

    /// One-way; repeated calls are no-ops.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn into_winner(self) -> Option<Outcome> {
        self.cancel();
        self.winner
    }
}
