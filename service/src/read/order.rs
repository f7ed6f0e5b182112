//! [`Order`] read model definition.
//!
//! [`Order`]: crate::domain::Order

pub mod list {
    //! [`Order`]s list definitions.

    use derive_more::{Display, From, Into};

    #[cfg(doc)]
    use crate::domain::{Company, Order};

    /// Total count of [`Order`]s issued by a [`Company`].
    #[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
