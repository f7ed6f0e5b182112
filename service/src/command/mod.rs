//! [`Command`] definition.

pub mod create_company;
pub mod create_dismissal_order;
pub mod create_employee;
pub mod delete_company;
pub mod edit_dismissal_order;
pub mod hire_employee;
pub mod set_current_company;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_company::CreateCompany,
    create_dismissal_order::CreateDismissalOrder,
    create_employee::CreateEmployee, delete_company::DeleteCompany,
    edit_dismissal_order::EditDismissalOrder, hire_employee::HireEmployee,
    set_current_company::SetCurrentCompany,
};
