//! Core data models for identification requests and metadata candidates.

mod candidate;
mod request;

pub use candidate::{Candidate, CandidateBuilder};
pub use request::{IdentificationRequest, ISBN_KEY};
