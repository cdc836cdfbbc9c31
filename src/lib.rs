//! Client-side message sync for an agent chat view.
//!
//! The view only ever learns about new messages through [`sync::PollLoop`],
//! which asks the agent for everything after the last rendered message id and
//! keeps asking while the agent reports it is still busy. User sends go
//! through [`sync::SubmissionCoordinator`], which always hands over to the
//! poll loop once the send is done.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod sync;
pub mod view;
