//! In-memory [`Database`] implementation.
//!
//! Keeps everything in the process memory, so is suitable for tests and local
//! runs only.

mod impls;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use derive_more::Debug;
use tokio::sync::OwnedMutexGuard;

use crate::domain::{company, contract, employee, order};
#[cfg(doc)]
use crate::{
    domain::{Company, Contract, Employee, Order},
    infra::Database,
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Records stored in a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Stored [`Company`]s.
    companies: HashMap<company::Id, company::Company>,

    /// Stored [`Employee`]s.
    employees: HashMap<employee::Id, employee::Employee>,

    /// Stored [`Contract`]s.
    contracts: HashMap<contract::Id, contract::Contract>,

    /// Stored [`Order`]s.
    orders: HashMap<order::Id, order::Order>,
}

/// Access to the [`State`] of a [`Memory`] database.
pub trait Storage {
    /// Runs the provided function over the readable [`State`].
    fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R;

    /// Runs the provided function over the writable [`State`].
    fn write<R>(&self, f: impl FnOnce(&mut State) -> R) -> R;
}

/// Non-transactional [`Memory`] client.
///
/// Writes are visible immediately.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Committed [`State`].
    state: Arc<Mutex<State>>,

    /// Lock allowing a single [`Tx`] at a time.
    #[debug(skip)]
    writer: Arc<tokio::sync::Mutex<()>>,
}

impl NonTx {
    /// Starts a new [`Tx`] out of this [`NonTx`] client, waiting for the
    /// currently running one (if any) to finish.
    async fn begin(&self) -> Tx {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        let staged = self.read(State::clone);
        Tx {
            committed: Arc::clone(&self.state),
            staged: Arc::new(Mutex::new(staged)),
            _guard: Arc::new(guard),
        }
    }
}

impl Storage for NonTx {
    fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        f(&lock(&self.state))
    }

    fn write<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut lock(&self.state))
    }
}

/// Transactional [`Memory`] client.
///
/// Works upon a staged copy of the [`State`], which replaces the committed
/// one on commit. Dropping a [`Tx`] without committing discards its writes.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`State`] to apply the staged one to on commit.
    committed: Arc<Mutex<State>>,

    /// [`State`] modified by this [`Tx`].
    staged: Arc<Mutex<State>>,

    /// Guard preventing other [`Tx`]s from running concurrently.
    #[debug(skip)]
    _guard: Arc<OwnedMutexGuard<()>>,
}

impl Tx {
    /// Applies the staged [`State`] of this [`Tx`].
    fn commit(&self) {
        let staged = self.read(State::clone);
        *lock(&self.committed) = staged;
    }
}

impl Storage for Tx {
    fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        f(&lock(&self.staged))
    }

    fn write<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut lock(&self.staged))
    }
}

/// Locks the provided [`State`], ignoring poisoning.
fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
