//! Destinations for candidates produced by a source.

use tokio::sync::mpsc::UnboundedSender;

use crate::models::Candidate;

/// Append-only receiver of candidates, in the order a source emits them
pub trait ResultSink: Send {
    fn put(&mut self, candidate: Candidate);
}

impl ResultSink for Vec<Candidate> {
    fn put(&mut self, candidate: Candidate) {
        self.push(candidate);
    }
}

impl ResultSink for UnboundedSender<Candidate> {
    fn put(&mut self, candidate: Candidate) {
        if self.send(candidate).is_err() {
            tracing::debug!("Result receiver dropped, discarding candidate");
        }
    }
}
