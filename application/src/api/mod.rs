//! GraphQL API definitions.

pub mod company;
pub mod contract;
pub mod dismissal;
pub mod employee;
mod mutation;
pub mod order;
mod query;
pub mod scalar;
pub mod snapshot;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    company::Company,
    contract::Contract,
    employee::Employee,
    mutation::Mutation,
    order::{Order, OrderValue},
    query::Query,
    snapshot::Snapshot,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;
