//! Read entities definitions.

pub mod company;
pub mod contract;
pub mod employee;
pub mod order;
pub mod snapshot;

pub use self::snapshot::Snapshot;
