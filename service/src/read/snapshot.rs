//! [`Snapshot`] read model definition.

use crate::domain::{
    contract, employee, order, Company, Contract, Employee, Order,
};

use super::contract::Active;

/// Point-in-time view of all the records of a single [`Company`].
///
/// Used to initialize forms, so it's never refreshed in place: a new
/// [`Snapshot`] should be queried instead.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// [`Company`] this [`Snapshot`] is taken of.
    pub company: Company,

    /// [`Employee`]s registered in the [`Company`].
    pub employees: Vec<Employee>,

    /// [`Contract`]s of the [`Company`].
    pub contracts: Vec<Contract>,

    /// [`Order`]s issued by the [`Company`].
    pub orders: Vec<Order>,
}

impl Snapshot {
    /// Looks up an [`Employee`] by its ID.
    #[must_use]
    pub fn employee(&self, id: employee::Id) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Looks up a [`Contract`] by its ID.
    #[must_use]
    pub fn contract(&self, id: contract::Id) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    /// Looks up an [`Order`] by its ID.
    #[must_use]
    pub fn order(&self, id: order::Id) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    /// Looks up the active [`Contract`] of the [`Employee`] with the provided
    /// ID.
    #[must_use]
    pub fn active_contract(
        &self,
        employee_id: employee::Id,
    ) -> Option<Active<&Contract>> {
        self.contracts
            .iter()
            .find(|c| c.employee_id == employee_id && c.is_active())
            .map(Active)
    }

    /// Returns the [`order::Number`] a new [`Order`] of the [`Company`] is
    /// expected to have.
    #[must_use]
    pub fn next_order_number(&self) -> order::Number {
        order::Number::next_after(self.orders.len())
    }
}
