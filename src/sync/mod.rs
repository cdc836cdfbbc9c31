//! The incremental sync protocol: cursor, poll loop, and submission flow.

pub mod cursor;
mod poll_loop;
mod submission;

#[cfg(test)]
pub(crate) mod testing;

pub use poll_loop::{PollLoop, PollOutcome, PollState, UNREACHABLE_MESSAGE};
pub use submission::{SubmissionCoordinator, SubmitOutcome, SubmitReport, SEND_FAILED_MESSAGE};
