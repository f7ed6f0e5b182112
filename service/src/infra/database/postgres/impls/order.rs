//! [`Order`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{company, contract, order, Order},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `orders` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, kind, number, date, \
    employee_id, contract_id, company_id, \
    hired_on, position, salary, \
    dismissed_on, grounds, compensation_days, average_salary, \
    created_at";

/// Builds an [`Order`] out of the provided [`Row`] selected with
/// [`COLUMNS`].
///
/// # Panics
///
/// If the kind-specific columns are `NULL`, which is prevented by the
/// `orders` table constraints.
fn from_row(row: &Row) -> Order {
    let id = row.get("id");
    let number = row.get("number");
    let date = row.get("date");
    let employee_id = row.get("employee_id");
    let contract_id = row.get("contract_id");
    let company_id = row.get("company_id");
    let created_at = row.get("created_at");
    match row.get("kind") {
        order::Kind::Hiring => order::Hiring {
            id,
            number,
            date,
            employee_id,
            contract_id,
            company_id,
            hired_on: row.get("hired_on"),
            position: row.get("position"),
            salary: row.get("salary"),
            created_at,
        }
        .into(),
        order::Kind::Dismissal => order::Dismissal {
            id,
            number,
            date,
            employee_id,
            contract_id,
            company_id,
            dismissed_on: row.get("dismissed_on"),
            grounds: row.get("grounds"),
            compensation_days: row.get("compensation_days"),
            average_salary: row.get("average_salary"),
            created_at,
        }
        .into(),
    }
}

impl<C> Database<Select<By<Option<Order>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM orders \
             WHERE id = $1::UUID"
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Order>, company::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Order>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM orders \
             WHERE company_id = $1::UUID \
             ORDER BY number, created_at, id"
        );
        Ok(self
            .query(&sql, &[&company_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<read::order::list::TotalCount, company::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::order::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::order::list::TotalCount, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let company_id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM orders \
            WHERE company_id = $1::UUID";
        self.query_opt(SQL, &[&company_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Insert<Order>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Order>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(order)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Order>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        let kind = order.kind();
        let id = order.id();
        let number = order.number();
        let date = order.date();
        let employee_id = order.employee_id();
        let contract_id = order.contract_id();
        let company_id = order.company_id();
        let created_at = order.created_at();

        // Avoid subtle change for SQL.
        #[expect(clippy::type_complexity, reason = "still readable")]
        let (
            hired_on,
            position,
            salary,
            dismissed_on,
            grounds,
            compensation_days,
            average_salary,
        ): (
            Option<contract::HiringDate>,
            Option<order::hiring::Position>,
            Option<Money>,
            Option<contract::DismissalDate>,
            Option<order::dismissal::Grounds>,
            Option<order::dismissal::CompensationDays>,
            Option<Money>,
        ) = match order {
            Order::Hiring(o) => (
                Some(o.hired_on),
                Some(o.position),
                Some(o.salary),
                None,
                None,
                None,
                None,
            ),
            Order::Dismissal(o) => (
                None,
                None,
                None,
                Some(o.dismissed_on),
                Some(o.grounds),
                Some(o.compensation_days),
                Some(o.average_salary),
            ),
        };

        const SQL: &str = "\
            INSERT INTO orders (\
                id, kind, number, date, \
                employee_id, contract_id, company_id, \
                hired_on, position, salary, \
                dismissed_on, grounds, compensation_days, average_salary, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT2, $3::INT4, $4::DATE, \
                $5::UUID, $6::UUID, $7::UUID, \
                $8::DATE, $9::VARCHAR, $10::NUMERIC, \
                $11::DATE, $12::VARCHAR, $13::INT4, $14::NUMERIC, \
                $15::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET kind = EXCLUDED.kind, \
                number = EXCLUDED.number, \
                date = EXCLUDED.date, \
                employee_id = EXCLUDED.employee_id, \
                contract_id = EXCLUDED.contract_id, \
                company_id = EXCLUDED.company_id, \
                hired_on = EXCLUDED.hired_on, \
                position = EXCLUDED.position, \
                salary = EXCLUDED.salary, \
                dismissed_on = EXCLUDED.dismissed_on, \
                grounds = EXCLUDED.grounds, \
                compensation_days = EXCLUDED.compensation_days, \
                average_salary = EXCLUDED.average_salary, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &kind,
                &number,
                &date,
                &employee_id,
                &contract_id,
                &company_id,
                &hired_on,
                &position,
                &salary,
                &dismissed_on,
                &grounds,
                &compensation_days,
                &average_salary,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Order, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO orders_lock (id) \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
