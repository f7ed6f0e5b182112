//! [`Employee`] read model definition.
//!
//! [`Employee`]: crate::domain::Employee

pub mod list {
    //! [`Employee`]s list definitions.

    use crate::domain::{company, Employee};
    #[cfg(doc)]
    use crate::domain::Company;

    /// Selector of [`Employee`]s registered in a [`Company`].
    #[derive(Clone, Debug)]
    pub struct Selector {
        /// ID of the [`Company`] to list [`Employee`]s of.
        pub company_id: company::Id,

        /// [`Filter`] of the listed [`Employee`]s.
        pub filter: Filter,
    }

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Indicator whether only employed [`Employee`]s should be listed.
        pub only_employed: bool,

        /// Part of an [`Employee::full_name()`] to search for,
        /// case-insensitively.
        pub name: Option<String>,
    }

    impl Filter {
        /// Checks whether the provided [`Employee`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, employee: &Employee) -> bool {
            if self.only_employed && !employee.is_employed {
                return false;
            }
            self.name.as_deref().map(str::trim).map_or(true, |name| {
                employee
                    .full_name()
                    .to_lowercase()
                    .contains(&name.to_lowercase())
            })
        }
    }
}
