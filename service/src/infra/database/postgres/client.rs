//! Postgres database clients.

use std::{future::Future, sync::Arc};

use tokio::sync::{OnceCell, RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{self, postgres};

use super::connection;

/// Client running Postgres statements.
pub trait Connection {
    /// Runs the provided statement with the given parameters and returns the
    /// resulting rows.
    ///
    /// # Errors
    ///
    /// If the statement fails.
    fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Runs the provided statement with the given parameters and returns the
    /// single resulting row, if any.
    ///
    /// # Errors
    ///
    /// If the statement fails or returns more than one row.
    fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Runs the provided statement with the given parameters and returns the
    /// number of affected rows.
    ///
    /// # Errors
    ///
    /// If the statement fails.
    fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;
}

/// Non-transactional Postgres database client.
///
/// All its clones share a single [`connection::Pooled`] one, checked out on
/// first use.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to check connections out from.
    pool: connection::Pool,

    /// Connection shared by all the clones of this client.
    shared: Arc<OnceCell<connection::Pooled>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            shared: Arc::new(OnceCell::new()),
        }
    }

    /// Returns the [`connection::Pool`] of this [`NonTx`] client.
    pub(crate) fn pool(&self) -> &connection::Pool {
        &self.pool
    }

    /// Begins a new [`Tx`] on a separate connection, so that the statements
    /// of this [`NonTx`] client never get into it.
    ///
    /// # Errors
    ///
    /// If no connection can be checked out, or the transaction cannot begin.
    pub(crate) async fn begin(&self) -> Result<Tx, Traced<database::Error>> {
        let conn = connection::checkout(&self.pool)
            .await
            .map_err(tracerr::wrap!())?;
        connection::Tx::begin(conn)
            .await
            .map_err(tracerr::wrap!())
            .map(|tx| Tx(Arc::new(RwLock::new(Some(tx)))))
    }

    /// Returns the shared connection, checking it out if not yet.
    async fn connection(
        &self,
    ) -> Result<&connection::Pooled, Traced<database::Error>> {
        self.shared
            .get_or_try_init(|| connection::checkout(&self.pool))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl Connection for NonTx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transactional Postgres database client.
///
/// All its clones share the same transaction, begun eagerly by
/// [`NonTx::begin()`]. Once committed, any further statement is rejected with
/// [`postgres::Error::TxFinished`].
#[derive(Clone, Debug)]
pub struct Tx(Arc<RwLock<Option<connection::Tx>>>);

impl Tx {
    /// Returns the running transaction of this [`Tx`] client.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        RwLockReadGuard::try_map(self.0.read().await, Option::as_ref).map_err(
            |_| tracerr::new!(database::Error::from(postgres::Error::TxFinished)),
        )
    }

    /// Commits the transaction of this [`Tx`] client.
    ///
    /// # Errors
    ///
    /// If the transaction is already committed, or the `COMMIT` fails.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let tx = self.0.write().await.take().ok_or_else(|| {
            tracerr::new!(database::Error::from(postgres::Error::TxFinished))
        })?;
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .transaction()
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .transaction()
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .transaction()
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}
