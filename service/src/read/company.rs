//! [`Company`] read model definition.
//!
//! [`Company`]: crate::domain::Company

#[cfg(doc)]
use crate::domain::Company;

/// Selector of the [`Company`] currently worked with.
///
/// At most one non-deleted [`Company`] is current at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Current;
