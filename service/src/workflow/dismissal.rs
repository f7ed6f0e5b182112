//! Workflow of creating and editing dismissal [`Order`]s.

use std::sync::Arc;

use common::{date::UtcOffset, Date, Money};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    command::{
        create_dismissal_order, edit_dismissal_order, CreateDismissalOrder,
        EditDismissalOrder,
    },
    domain::{
        company, contract, employee,
        order::{self, dismissal},
        Employee, Order,
    },
    read::{employee::list::Filter, Snapshot},
    Command,
};
#[cfg(doc)]
use crate::domain::{Company, Contract};

/// Values prefilled into a [`Workflow`] in [`Mode::Create`].
#[derive(Clone, Debug, SmartDefault)]
pub struct Defaults {
    /// Grounds of the dismissal.
    #[default("Заявление".to_owned())]
    pub grounds: String,

    /// Days of unused vacation to be compensated.
    #[default(5)]
    pub compensation_days: i32,

    /// Average monthly salary of the dismissed [`Employee`].
    #[default(Money::from(1_500_000))]
    pub average_salary: Money,

    /// Offset from UTC the prefilled dates are determined at.
    pub utc_offset: UtcOffset,
}

impl Defaults {
    /// Returns the current [`Date`] at the [`Defaults::utc_offset`].
    #[must_use]
    pub fn today(&self) -> Date {
        Date::today_at(self.utc_offset)
    }
}

/// Mode of a [`Workflow`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// New dismissal [`Order`] is being created.
    Create,

    /// Existing dismissal [`Order`] is being edited.
    ///
    /// Its [`Employee`] and [`Contract`] cannot be changed.
    Edit {
        /// ID of the edited [`Order`].
        order_id: order::Id,

        /// ID of the [`Contract`] closed by the edited [`Order`].
        contract_id: contract::Id,
    },
}

/// [`Employee`] chosen in a [`Workflow`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selection {
    /// ID of the chosen [`Employee`].
    pub employee_id: employee::Id,

    /// ID of the [`Company`] the chosen [`Employee`] is registered in.
    pub company_id: company::Id,

    /// Full name of the chosen [`Employee`].
    pub full_name: String,
}

impl From<&Employee> for Selection {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            company_id: employee.company_id,
            full_name: employee.full_name(),
        }
    }
}

/// Raw values entered into a [`Workflow`].
///
/// Nothing is checked until [`Workflow::validate()`] is called.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Form {
    /// Number of the [`Order`].
    pub number: Option<i32>,

    /// Date when the [`Order`] is issued.
    pub date: Option<order::IssueDate>,

    /// Date when the [`Employee`] is dismissed.
    pub dismissed_on: Option<contract::DismissalDate>,

    /// Grounds of the dismissal.
    pub grounds: String,

    /// Days of unused vacation to be compensated.
    pub compensation_days: Option<i32>,

    /// Average monthly salary of the dismissed [`Employee`].
    pub average_salary: Option<Decimal>,
}

impl Form {
    /// Returns the [`Form::average_salary`] with thousands separated, as it's
    /// displayed.
    ///
    /// [`None`] if the salary is absent or negative.
    #[must_use]
    pub fn average_salary_grouped(&self) -> Option<String> {
        self.average_salary
            .and_then(Money::new)
            .map(|m| m.grouped().to_string())
    }
}

/// Field of a [`Form`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Field {
    /// [`Form::number`].
    #[display("order number")]
    Number,

    /// [`Form::date`].
    #[display("order date")]
    Date,

    /// [`Workflow::selection()`].
    #[display("employee")]
    Employee,

    /// [`Form::dismissed_on`].
    #[display("dismissal date")]
    DismissedOn,

    /// [`Form::grounds`].
    #[display("grounds for dismissal")]
    Grounds,

    /// [`Form::compensation_days`].
    #[display("compensation days")]
    CompensationDays,

    /// [`Form::average_salary`].
    #[display("average salary")]
    AverageSalary,
}

/// Reason of a [`Field`] being invalid.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Reason {
    /// Value is absent.
    #[display("is required")]
    Required,

    /// Value is zero or negative.
    #[display("must be positive")]
    NotPositive,

    /// Value is negative.
    #[display("cannot be negative")]
    Negative,

    /// Value is too long.
    #[display("is too long")]
    TooLong,

    /// Date precedes the [`Company`] registration.
    #[display("cannot precede company registration date")]
    BeforeRegistration,
}

/// Error of a single [`Form`] [`Field`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("{field} {reason}")]
pub struct FieldError {
    /// Invalid [`Field`].
    pub field: Field,

    /// [`Reason`] of the [`Field`] being invalid.
    pub reason: Reason,
}

impl FieldError {
    /// Creates a new [`FieldError`].
    const fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }
}

/// Values of a [`Form`] that passed [`Workflow::validate()`].
#[derive(Clone, Debug)]
pub struct Valid {
    /// ID of the dismissed [`Employee`].
    pub employee_id: employee::Id,

    /// [`order::Number`] of the [`Order`].
    pub number: order::Number,

    /// Date when the [`Order`] is issued.
    pub date: order::IssueDate,

    /// Date when the [`Employee`] is dismissed.
    pub dismissed_on: contract::DismissalDate,

    /// Grounds of the dismissal.
    pub grounds: dismissal::Grounds,

    /// Days of unused vacation to be compensated.
    pub compensation_days: dismissal::CompensationDays,

    /// Average monthly salary of the dismissed [`Employee`].
    pub average_salary: Money,
}

/// Workflow of creating a new or editing an existing dismissal [`Order`].
///
/// Works upon a [`Snapshot`] taken at its initialization and never sees the
/// changes made after. Issues at most one [`Command`] per [`submit()`].
///
/// [`submit()`]: Workflow::submit
#[derive(Clone, Debug)]
pub struct Workflow {
    /// [`Snapshot`] this [`Workflow`] was initialized with.
    snapshot: Arc<Snapshot>,

    /// [`Mode`] of this [`Workflow`].
    mode: Mode,

    /// Values entered into this [`Workflow`].
    form: Form,

    /// [`Employee`] chosen in this [`Workflow`].
    selection: Option<Selection>,
}

impl Workflow {
    /// Initializes a new [`Workflow`] in [`Mode::Create`].
    #[must_use]
    pub fn create(
        snapshot: Arc<Snapshot>,
        defaults: &Defaults,
        today: Date,
    ) -> Self {
        let form = Form {
            number: Some(snapshot.next_order_number().into()),
            date: Some(today.coerce()),
            dismissed_on: Some(today.coerce()),
            grounds: defaults.grounds.clone(),
            compensation_days: Some(defaults.compensation_days),
            average_salary: Some(defaults.average_salary.amount()),
        };
        Self {
            snapshot,
            mode: Mode::Create,
            form,
            selection: None,
        }
    }

    /// Initializes a new [`Workflow`] in [`Mode::Edit`] of the dismissal
    /// [`Order`] with the provided ID.
    ///
    /// # Errors
    ///
    /// If the [`Snapshot`] has no such dismissal [`Order`] or its
    /// [`Employee`].
    pub fn edit(
        snapshot: Arc<Snapshot>,
        order_id: order::Id,
    ) -> Result<Self, InitError> {
        let Some(Order::Dismissal(d)) = snapshot.order(order_id) else {
            return Err(InitError::OrderNotExists(order_id));
        };
        let employee = snapshot
            .employee(d.employee_id)
            .ok_or(InitError::EmployeeNotExists(d.employee_id))?;

        let form = Form {
            number: Some(d.number.into()),
            date: Some(d.date),
            dismissed_on: Some(d.dismissed_on),
            grounds: d.grounds.to_string(),
            compensation_days: Some(d.compensation_days.into()),
            average_salary: Some(d.average_salary.amount()),
        };
        let mode = Mode::Edit {
            order_id,
            contract_id: d.contract_id,
        };
        let selection = Some(Selection::from(employee));

        Ok(Self {
            snapshot,
            mode,
            form,
            selection,
        })
    }

    /// Returns the [`Snapshot`] of this [`Workflow`].
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the [`Mode`] of this [`Workflow`].
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the values entered into this [`Workflow`].
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the values entered into this [`Workflow`] for modification.
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Returns the [`Employee`] chosen in this [`Workflow`], if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Returns the employed [`Employee`]s which may be chosen in this
    /// [`Workflow`], optionally filtered by a part of their full name.
    pub fn candidates<'s>(
        &'s self,
        name: Option<&str>,
    ) -> impl Iterator<Item = &'s Employee> + 's {
        let filter = Filter {
            only_employed: true,
            name: name.map(ToOwned::to_owned),
        };
        self.snapshot
            .employees
            .iter()
            .filter(move |e| filter.matches(e))
    }

    /// Chooses the [`Employee`] to be dismissed.
    ///
    /// # Errors
    ///
    /// - If this [`Workflow`] is in [`Mode::Edit`].
    /// - If the [`Employee`] is unknown or not employed.
    pub fn select_employee(
        &mut self,
        employee_id: employee::Id,
    ) -> Result<&Selection, SelectionError> {
        if let Mode::Edit { .. } = self.mode {
            return Err(SelectionError::EmployeeLocked);
        }
        let employee = self
            .snapshot
            .employee(employee_id)
            .filter(|e| e.is_employed)
            .ok_or(SelectionError::EmployeeNotAvailable(employee_id))?;
        Ok(self.selection.insert(Selection::from(employee)))
    }

    /// Validates the values entered into this [`Workflow`].
    ///
    /// # Errors
    ///
    /// With all the [`FieldError`]s found.
    pub fn validate(&self) -> Result<Valid, Vec<FieldError>> {
        use Field as F;
        use Reason as R;

        let company = &self.snapshot.company;
        let mut errors = Vec::new();

        let employee_id = self.selection.as_ref().map(|s| s.employee_id);
        if employee_id.is_none() {
            errors.push(FieldError::new(F::Employee, R::Required));
        }

        let number = match self.form.number {
            None => Err(R::Required),
            Some(n) => order::Number::new(n).ok_or(R::NotPositive),
        }
        .map_err(|r| errors.push(FieldError::new(F::Number, r)))
        .ok();

        let date = match self.form.date {
            None => Err(R::Required),
            Some(d) if !company.admits(d) => Err(R::BeforeRegistration),
            Some(d) => Ok(d),
        }
        .map_err(|r| errors.push(FieldError::new(F::Date, r)))
        .ok();

        let dismissed_on = match self.form.dismissed_on {
            None => Err(R::Required),
            Some(d) if !company.admits(d) => Err(R::BeforeRegistration),
            Some(d) => Ok(d),
        }
        .map_err(|r| errors.push(FieldError::new(F::DismissedOn, r)))
        .ok();

        let grounds = if self.form.grounds.trim().is_empty() {
            Err(R::Required)
        } else {
            dismissal::Grounds::new(&self.form.grounds).ok_or(R::TooLong)
        }
        .map_err(|r| errors.push(FieldError::new(F::Grounds, r)))
        .ok();

        let compensation_days = match self.form.compensation_days {
            None => Err(R::Required),
            Some(d) => dismissal::CompensationDays::new(d).ok_or(R::Negative),
        }
        .map_err(|r| errors.push(FieldError::new(F::CompensationDays, r)))
        .ok();

        let average_salary = match self.form.average_salary {
            None => Err(R::Required),
            Some(s) => Money::new(s).ok_or(R::Negative),
        }
        .map_err(|r| errors.push(FieldError::new(F::AverageSalary, r)))
        .ok();

        match (
            employee_id,
            number,
            date,
            dismissed_on,
            grounds,
            compensation_days,
            average_salary,
        ) {
            (
                Some(employee_id),
                Some(number),
                Some(date),
                Some(dismissed_on),
                Some(grounds),
                Some(compensation_days),
                Some(average_salary),
            ) if errors.is_empty() => Ok(Valid {
                employee_id,
                number,
                date,
                dismissed_on,
                grounds,
                compensation_days,
                average_salary,
            }),
            _ => Err(errors),
        }
    }

    /// Submits this [`Workflow`] by executing exactly one [`Command`] on the
    /// provided `backend`.
    ///
    /// Nothing is executed if the entered values are invalid, or if the
    /// chosen [`Employee`] has no active [`Contract`] in the [`Snapshot`].
    ///
    /// # Errors
    ///
    /// - If the entered values are invalid.
    /// - If the chosen [`Employee`] has no active [`Contract`].
    /// - If the executed [`Command`] fails.
    pub async fn submit<B>(
        &self,
        backend: &B,
    ) -> Result<Order, Traced<SubmitError>>
    where
        B: Command<
                CreateDismissalOrder,
                Ok = Order,
                Err = Traced<create_dismissal_order::ExecutionError>,
            > + Command<
                EditDismissalOrder,
                Ok = Order,
                Err = Traced<edit_dismissal_order::ExecutionError>,
            >,
    {
        use SubmitError as E;

        let valid = self
            .validate()
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?;

        match self.mode {
            Mode::Create => {
                let contract = self
                    .snapshot
                    .active_contract(valid.employee_id)
                    .ok_or(E::ContractNotFound(valid.employee_id))
                    .map_err(tracerr::wrap!())?;
                backend
                    .execute(CreateDismissalOrder {
                        employee_id: valid.employee_id,
                        contract_id: contract.0.id,
                        number: valid.number,
                        date: valid.date,
                        dismissed_on: valid.dismissed_on,
                        grounds: valid.grounds,
                        compensation_days: valid.compensation_days,
                        average_salary: valid.average_salary,
                    })
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
            }
            Mode::Edit { order_id, .. } => backend
                .execute(EditDismissalOrder {
                    order_id,
                    number: valid.number,
                    date: valid.date,
                    dismissed_on: valid.dismissed_on,
                    grounds: valid.grounds,
                    compensation_days: valid.compensation_days,
                    average_salary: valid.average_salary,
                })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E)),
        }
    }

    /// Cancels this [`Workflow`], discarding everything entered into it.
    pub fn cancel(self) {
        tracing::debug!(mode = ?self.mode, "dismissal workflow cancelled");
    }
}

/// Error of initializing a [`Workflow`] in [`Mode::Edit`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InitError {
    /// Dismissal [`Order`] does not exist.
    #[display("Dismissal `Order(id: {_0})` does not exist")]
    OrderNotExists(#[error(not(source))] order::Id),

    /// [`Employee`] of the dismissal [`Order`] does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),
}

/// Error of choosing an [`Employee`] in a [`Workflow`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum SelectionError {
    /// [`Employee`] cannot be changed in [`Mode::Edit`].
    #[display("`Employee` of an existing `Order` cannot be changed")]
    EmployeeLocked,

    /// [`Employee`] is unknown or not employed.
    #[display("`Employee(id: {_0})` is not available for dismissal")]
    EmployeeNotAvailable(#[error(not(source))] employee::Id),
}

/// Error of submitting a [`Workflow`].
#[derive(Debug, Display, Error, From)]
pub enum SubmitError {
    /// Entered values are invalid.
    #[display("{} field(s) are invalid", _0.len())]
    Invalid(#[error(not(source))] Vec<FieldError>),

    /// Chosen [`Employee`] has no active [`Contract`].
    #[display("No contract found for this person")]
    ContractNotFound(#[error(not(source))] employee::Id),

    /// [`CreateDismissalOrder`] [`Command`] failed.
    #[display("Failed to create dismissal `Order`: {_0}")]
    #[from]
    Create(create_dismissal_order::ExecutionError),

    /// [`EditDismissalOrder`] [`Command`] failed.
    #[display("Failed to edit dismissal `Order`: {_0}")]
    #[from]
    Edit(edit_dismissal_order::ExecutionError),
}

#[cfg(test)]
mod spec {
    use std::sync::{Arc, Mutex};

    use common::{
        operations::{By, Insert, Select},
        Money,
    };
    use rust_decimal::Decimal;
    use tracerr::Traced;

    use crate::{
        command::{
            create_dismissal_order, edit_dismissal_order,
            CreateDismissalOrder, EditDismissalOrder,
        },
        domain::{company, order, Contract, Employee, Order},
        fixture::{self, date},
        infra::{Database as _, Memory},
        query, read, Command, Config, Service,
    };

    use super::{
        Defaults, Field, FieldError, InitError, Mode, Reason, SelectionError,
        SubmitError, Workflow,
    };

    /// Executed [`Command`]s.
    #[derive(Clone, Debug)]
    enum Call {
        Create(CreateDismissalOrder),
        Edit(EditDismissalOrder),
    }

    /// [`Command`]s backend recording every execution before passing it to
    /// a [`Service`] over a [`Memory`] database.
    struct Recorder {
        service: Service<Memory>,
        calls: Mutex<Vec<Call>>,
    }

    impl Recorder {
        fn new(db: Memory) -> Self {
            Self {
                service: Service::new(Config::default(), db),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Command<CreateDismissalOrder> for Recorder {
        type Ok = Order;
        type Err = Traced<create_dismissal_order::ExecutionError>;

        async fn execute(
            &self,
            cmd: CreateDismissalOrder,
        ) -> Result<Self::Ok, Self::Err> {
            self.calls.lock().unwrap().push(Call::Create(cmd.clone()));
            self.service.execute(cmd).await
        }
    }

    impl Command<EditDismissalOrder> for Recorder {
        type Ok = Order;
        type Err = Traced<edit_dismissal_order::ExecutionError>;

        async fn execute(
            &self,
            cmd: EditDismissalOrder,
        ) -> Result<Self::Ok, Self::Err> {
            self.calls.lock().unwrap().push(Call::Edit(cmd.clone()));
            self.service.execute(cmd).await
        }
    }

    async fn snapshot_of(
        db: &Memory,
        company_id: company::Id,
    ) -> Arc<read::Snapshot> {
        let service = Service::new(Config::default(), db.clone());
        let snapshot = service
            .execute(query::Snapshot { company_id })
            .await
            .unwrap()
            .unwrap();
        Arc::new(snapshot)
    }

    /// Fills the [`Workflow`] with the values of the reference scenario.
    fn fill(workflow: &mut Workflow) {
        let form = workflow.form_mut();
        form.number = Some(1);
        form.date = Some(date(2024, 6, 1));
        form.dismissed_on = Some(date(2024, 6, 15));
        form.grounds = "Заявление".to_owned();
        form.compensation_days = Some(5);
        form.average_salary = Some(Decimal::from(1_500_000));
    }

    #[tokio::test]
    async fn prefills_create_mode() {
        let (db, company, _, _) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;

        let workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 5, 5));

        assert_eq!(workflow.mode(), Mode::Create);
        let form = workflow.form();
        assert_eq!(form.number, Some(1));
        assert_eq!(form.date, Some(date(2024, 5, 5)));
        assert_eq!(form.dismissed_on, Some(date(2024, 5, 5)));
        assert_eq!(form.grounds, "Заявление");
        assert_eq!(form.compensation_days, Some(5));
        assert_eq!(form.average_salary, Some(Decimal::from(1_500_000)));
        assert_eq!(
            form.average_salary_grouped().as_deref(),
            Some("1 500 000"),
        );
        assert!(workflow.selection().is_none());
    }

    #[tokio::test]
    async fn dismisses_employee() {
        let (db, company, employee, contract) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;
        let backend = Recorder::new(db.clone());

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));
        let selection = workflow.select_employee(employee.id).unwrap();
        assert_eq!(selection.company_id, company.id);
        fill(&mut workflow);

        let order = workflow.submit(&backend).await.unwrap();

        assert_eq!(order.kind().u8(), 2);
        assert_eq!(order.contract_id(), contract.id);
        assert_eq!(order.company_id(), employee.company_id);
        let calls = backend.calls();
        assert_eq!(calls.len(), 1, "wrong calls: {calls:?}");
        assert!(matches!(
            &calls[0],
            Call::Create(c) if c.contract_id == contract.id,
        ));

        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(contract.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.dismissed_on, Some(date(2024, 6, 15)));
    }

    #[tokio::test]
    async fn rejects_date_before_registration() {
        let (db, company, employee, _) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;
        let backend = Recorder::new(db);

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));
        _ = workflow.select_employee(employee.id).unwrap();
        fill(&mut workflow);
        workflow.form_mut().date = Some(date(2023, 12, 31));

        let err = workflow.submit(&backend).await.unwrap_err().into_inner();

        let SubmitError::Invalid(errors) = &err else {
            panic!("wrong error: {err}");
        };
        assert_eq!(
            errors,
            &[FieldError {
                field: Field::Date,
                reason: Reason::BeforeRegistration,
            }],
        );
        assert_eq!(
            errors[0].to_string(),
            "order date cannot precede company registration date",
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn rejects_dismissal_before_registration() {
        let (db, company, employee, _) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;
        let backend = Recorder::new(db);

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));
        _ = workflow.select_employee(employee.id).unwrap();
        fill(&mut workflow);
        workflow.form_mut().dismissed_on = Some(date(2023, 12, 31));

        let err = workflow.submit(&backend).await.unwrap_err().into_inner();

        let SubmitError::Invalid(errors) = &err else {
            panic!("wrong error: {err}");
        };
        assert_eq!(
            errors,
            &[FieldError::new(Field::DismissedOn, Reason::BeforeRegistration)],
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn admits_registration_date_itself() {
        let (db, company, employee, _) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;
        let backend = Recorder::new(db);

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));
        _ = workflow.select_employee(employee.id).unwrap();
        fill(&mut workflow);
        workflow.form_mut().date = Some(company.registered_on.coerce());
        workflow.form_mut().dismissed_on = Some(company.registered_on.coerce());

        assert!(workflow.validate().is_ok());

        _ = workflow.submit(&backend).await.unwrap();
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn collects_all_field_errors() {
        let (db, company, _, _) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));
        let form = workflow.form_mut();
        form.number = Some(0);
        form.dismissed_on = None;
        form.grounds = "  ".to_owned();
        form.compensation_days = Some(-1);
        form.average_salary = Some(Decimal::from(-10));

        let errors = workflow.validate().unwrap_err();

        assert_eq!(
            errors,
            [
                FieldError::new(Field::Employee, Reason::Required),
                FieldError::new(Field::Number, Reason::NotPositive),
                FieldError::new(Field::DismissedOn, Reason::Required),
                FieldError::new(Field::Grounds, Reason::Required),
                FieldError::new(Field::CompensationDays, Reason::Negative),
                FieldError::new(Field::AverageSalary, Reason::Negative),
            ],
        );
        assert_eq!(errors[2].to_string(), "dismissal date is required");
    }

    #[tokio::test]
    async fn rejects_employee_without_contract() {
        let (db, company, _, _) = fixture::seeded().await;
        let mut stale = fixture::employee(&company);
        stale.is_employed = true;
        db.execute(Insert(stale.clone())).await.unwrap();
        let snapshot = snapshot_of(&db, company.id).await;
        let backend = Recorder::new(db);

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));
        _ = workflow.select_employee(stale.id).unwrap();
        fill(&mut workflow);

        let err = workflow.submit(&backend).await.unwrap_err().into_inner();

        assert!(
            matches!(err, SubmitError::ContractNotFound(id) if id == stale.id),
            "wrong error: {err}",
        );
        assert_eq!(err.to_string(), "No contract found for this person");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn offers_employed_candidates_only() {
        let (db, company, employee, _) = fixture::seeded().await;
        let mut idle = fixture::employee(&company);
        idle.is_employed = false;
        db.execute(Insert(idle.clone())).await.unwrap();
        let snapshot = snapshot_of(&db, company.id).await;

        let mut workflow =
            Workflow::create(snapshot, &Defaults::default(), date(2024, 6, 1));

        let ids = workflow.candidates(None).map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, [employee.id]);
        assert_eq!(workflow.candidates(Some("otabek")).count(), 1);
        assert_eq!(workflow.candidates(Some("nobody")).count(), 0);

        let err = workflow.select_employee(idle.id).unwrap_err();
        assert!(
            matches!(
                err,
                SelectionError::EmployeeNotAvailable(id) if id == idle.id,
            ),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn reopens_edit_mode_identically() {
        let (db, company, employee, contract) = fixture::seeded().await;
        let backend = Recorder::new(db.clone());
        let mut workflow = Workflow::create(
            snapshot_of(&db, company.id).await,
            &Defaults::default(),
            date(2024, 6, 1),
        );
        _ = workflow.select_employee(employee.id).unwrap();
        fill(&mut workflow);
        let order = workflow.submit(&backend).await.unwrap();

        let snapshot = snapshot_of(&db, company.id).await;
        let first = Workflow::edit(Arc::clone(&snapshot), order.id()).unwrap();
        let second = Workflow::edit(snapshot, order.id()).unwrap();

        assert_eq!(first.form(), second.form());
        assert_eq!(first.selection(), second.selection());
        assert_eq!(
            first.mode(),
            Mode::Edit {
                order_id: order.id(),
                contract_id: contract.id,
            },
        );
        let selection = first.selection().unwrap();
        assert_eq!(selection.employee_id, employee.id);
        assert_eq!(selection.full_name, employee.full_name());
        assert_eq!(first.form().dismissed_on, Some(date(2024, 6, 15)));
    }

    #[tokio::test]
    async fn edits_dismissal() {
        let (db, company, employee, contract) = fixture::seeded().await;
        let backend = Recorder::new(db.clone());
        let mut workflow = Workflow::create(
            snapshot_of(&db, company.id).await,
            &Defaults::default(),
            date(2024, 6, 1),
        );
        _ = workflow.select_employee(employee.id).unwrap();
        fill(&mut workflow);
        let order = workflow.submit(&backend).await.unwrap();

        let mut workflow =
            Workflow::edit(snapshot_of(&db, company.id).await, order.id())
                .unwrap();
        let err = workflow.select_employee(employee.id).unwrap_err();
        assert!(matches!(err, SelectionError::EmployeeLocked));

        workflow.form_mut().dismissed_on = Some(date(2024, 7, 1));
        workflow.form_mut().average_salary = Some(Decimal::from(2_000_000));
        let edited = workflow.submit(&backend).await.unwrap();

        assert_eq!(edited.id(), order.id());
        let calls = backend.calls();
        assert_eq!(calls.len(), 2, "wrong calls: {calls:?}");
        assert!(matches!(
            &calls[1],
            Call::Edit(e) if e.order_id == order.id(),
        ));

        let Order::Dismissal(stored) = db
            .execute(Select(By::<Option<Order>, _>::new(order.id())))
            .await
            .unwrap()
            .unwrap()
        else {
            panic!("expected dismissal `Order`");
        };
        assert_eq!(stored.average_salary, Money::from(2_000_000));
        let stored = db
            .execute(Select(By::<Option<Contract>, _>::new(contract.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.dismissed_on, Some(date(2024, 7, 1)));
        let stored = db
            .execute(Select(By::<Option<Employee>, _>::new(employee.id)))
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_employed);
    }

    #[tokio::test]
    async fn rejects_editing_unknown_order() {
        let (db, company, _, _) = fixture::seeded().await;
        let snapshot = snapshot_of(&db, company.id).await;

        let err = Workflow::edit(snapshot, order::Id::new()).unwrap_err();

        assert!(matches!(err, InitError::OrderNotExists(_)));
    }
}
