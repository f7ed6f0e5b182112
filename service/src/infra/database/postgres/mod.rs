//! Postgres [`Database`] implementation.

pub mod client;
pub mod connection;
mod fuzz_pattern;
mod impls;

use deadpool_postgres::Runtime;
use derive_more::{Deref, Display, Error as StdError, From};
use tokio_postgres::NoTls;
use tracerr::Traced;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use deadpool_postgres::Config;
pub use refinery::embed_migrations;

pub use self::{
    client::{Connection, NonTx, Tx},
    fuzz_pattern::FuzzPattern,
};

/// Postgres [`Database`] client.
///
/// Starts as a [`NonTx`] one, and becomes a [`Tx`] one for the time of a
/// single command.
#[derive(Clone, Debug, Deref)]
pub struct Postgres<T = NonTx>(T);

impl Postgres {
    /// Creates a new [`Postgres`] client over a new [`connection::Pool`]
    /// configured by the provided [`Config`].
    ///
    /// No connection is established until the first statement.
    ///
    /// # Errors
    ///
    /// If the provided [`Config`] is invalid.
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        conf.create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
            .map(NonTx::from_pool)
            .map(Self)
    }
}

/// Postgres database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// Statement error.
    #[display("Statement failed: {_0}")]
    Statement(connection::Error),

    /// [`connection::Pool`] cannot be created.
    #[display("Failed to create `connection::Pool`: {_0}")]
    PoolCreation(connection::PoolCreationError),

    /// [`connection::Pool`] cannot provide a connection.
    #[display("`connection::Pool` failed: {_0}")]
    Pool(connection::PoolError),

    /// Statement is run in an already committed [`Tx`].
    #[display("`Tx` is already committed")]
    #[from(ignore)]
    TxFinished,
}
