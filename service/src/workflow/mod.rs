//! Multi-step workflows built upon [`Command`]s.
//!
//! A workflow collects and validates user input against a [`Snapshot`] before
//! issuing [`Command`]s, so invalid input never reaches the [`Service`].
//!
//! [`Command`]: crate::Command
//! [`Service`]: crate::Service
//! [`Snapshot`]: crate::read::Snapshot

pub mod dismissal;
