//! Dismissal `Order` form definitions.

use common::{money::Amount, Date, DateOf, Money};
use itertools::Itertools as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject};
use service::workflow::dismissal::{
    Form as FormValues, InitError, Mode, SelectionError, SubmitError, Workflow,
};

use crate::{api, define_error, AsError, Context, Error};

/// Dismissal `Order` form, prefilled and ready to be shown.
#[derive(Clone, Debug)]
pub struct Form(Workflow);

impl From<Workflow> for Form {
    fn from(workflow: Workflow) -> Self {
        Self(workflow)
    }
}

/// Dismissal `Order` form, prefilled either with the configured defaults
/// for a new `Order`, or with the values of an existing one.
#[graphql_object(name = "DismissalOrderForm", context = Context)]
impl Form {
    /// Mode this form is opened in.
    pub fn mode(&self) -> FormMode {
        match self.0.mode() {
            Mode::Create => FormMode::Create,
            Mode::Edit { .. } => FormMode::Edit,
        }
    }

    /// ID of the edited `Order`.
    ///
    /// `null` in `CREATE` mode.
    pub fn order_id(&self) -> Option<api::order::Id> {
        match self.0.mode() {
            Mode::Create => None,
            Mode::Edit { order_id, .. } => Some(order_id.into()),
        }
    }

    /// ID of the `Contract` closed by the edited `Order`.
    ///
    /// `null` in `CREATE` mode.
    pub fn contract_id(&self) -> Option<api::contract::Id> {
        match self.0.mode() {
            Mode::Create => None,
            Mode::Edit { contract_id, .. } => Some(contract_id.into()),
        }
    }

    /// `Company` issuing the `Order`.
    pub fn company(&self) -> api::Company {
        self.0.snapshot().company.clone().into()
    }

    /// `Employee` chosen to be dismissed.
    ///
    /// Always present and unchangeable in `EDIT` mode.
    pub fn employee(&self) -> Option<Selection> {
        self.0.selection().map(|s| Selection {
            employee_id: s.employee_id.into(),
            full_name: s.full_name.clone(),
        })
    }

    /// Employed `Employee`s which may be chosen to be dismissed, optionally
    /// filtered by a part of their full name.
    pub fn candidates(&self, name: Option<String>) -> Vec<api::Employee> {
        self.0
            .candidates(name.as_deref())
            .cloned()
            .map(Into::into)
            .collect()
    }

    /// Number of the `Order`.
    pub fn number(&self) -> Option<i32> {
        self.0.form().number
    }

    /// `Date` when the `Order` is issued.
    pub fn date(&self) -> Option<Date> {
        self.0.form().date.map(DateOf::coerce)
    }

    /// `Date` when the `Employee` is dismissed.
    pub fn dismissed_on(&self) -> Option<Date> {
        self.0.form().dismissed_on.map(DateOf::coerce)
    }

    /// Grounds of the dismissal.
    pub fn grounds(&self) -> &str {
        &self.0.form().grounds
    }

    /// Days of unused vacation to be compensated.
    pub fn compensation_days(&self) -> Option<i32> {
        self.0.form().compensation_days
    }

    /// Average monthly salary of the dismissed `Employee`.
    pub fn average_salary(&self) -> Option<Money> {
        self.0.form().average_salary.and_then(Money::new)
    }

    /// `averageSalary` with thousands separated by spaces, as it's displayed.
    pub fn average_salary_grouped(&self) -> Option<String> {
        self.0.form().average_salary_grouped()
    }
}

/// Mode a `DismissalOrderForm` is opened in.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "DismissalOrderFormMode")]
pub enum FormMode {
    /// New dismissal `Order` is being created.
    Create,

    /// Existing dismissal `Order` is being edited.
    Edit,
}

/// `Employee` chosen in a `DismissalOrderForm`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "DismissalOrderFormEmployee")]
pub struct Selection {
    /// ID of the chosen `Employee`.
    pub employee_id: api::employee::Id,

    /// Full name of the chosen `Employee`.
    pub full_name: String,
}

/// Values entered into a dismissal `Order` form.
///
/// Omitted values keep the prefilled ones.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "DismissalOrderInput")]
pub struct Input {
    /// Number of the `Order`.
    pub number: Option<i32>,

    /// `Date` when the `Order` is issued.
    pub date: Option<Date>,

    /// `Date` when the `Employee` is dismissed.
    pub dismissed_on: Option<Date>,

    /// Grounds of the dismissal.
    pub grounds: Option<String>,

    /// Days of unused vacation to be compensated.
    pub compensation_days: Option<i32>,

    /// Average monthly salary of the dismissed `Employee`.
    pub average_salary: Option<Amount>,
}

impl Input {
    /// Enters the provided values into the [`FormValues`].
    pub(crate) fn enter_into(self, form: &mut FormValues) {
        let Self {
            number,
            date,
            dismissed_on,
            grounds,
            compensation_days,
            average_salary,
        } = self;

        if let Some(n) = number {
            form.number = Some(n);
        }
        if let Some(d) = date {
            form.date = Some(d.coerce());
        }
        if let Some(d) = dismissed_on {
            form.dismissed_on = Some(d.coerce());
        }
        if let Some(g) = grounds {
            form.grounds = g;
        }
        if let Some(d) = compensation_days {
            form.compensation_days = Some(d);
        }
        if let Some(s) = average_salary {
            form.average_salary = Some(s.into());
        }
    }
}

impl AsError for InitError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DISMISSAL_ORDER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "Dismissal `Order` with the provided ID does not \
                             exist"]
                OrderNotExists,

                #[code = "EMPLOYEE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Employee` of the dismissal `Order` does not \
                             exist"]
                EmployeeNotExists,
            }
        }

        Some(match self {
            Self::OrderNotExists(_) => Error::OrderNotExists.into(),
            Self::EmployeeNotExists(_) => Error::EmployeeNotExists.into(),
        })
    }
}

impl AsError for SelectionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMPLOYEE_LOCKED"]
                #[status = CONFLICT]
                #[message = "`Employee` of an existing `Order` cannot be \
                             changed"]
                EmployeeLocked,

                #[code = "EMPLOYEE_NOT_AVAILABLE"]
                #[status = NOT_FOUND]
                #[message = "`Employee` with the provided ID is not employed \
                             by the `Company`"]
                EmployeeNotAvailable,
            }
        }

        Some(match self {
            Self::EmployeeLocked => Error::EmployeeLocked.into(),
            Self::EmployeeNotAvailable(_) => {
                Error::EmployeeNotAvailable.into()
            }
        })
    }
}

impl AsError for SubmitError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONTRACT_NOT_FOUND"]
                #[status = NOT_FOUND]
                #[message = "No contract found for this person"]
                ContractNotFound,
            }
        }

        match self {
            Self::Invalid(errs) => Some(crate::Error {
                code: "INVALID_FIELDS",
                status_code: http::StatusCode::BAD_REQUEST,
                message: errs
                    .iter()
                    .format_with("; ", |e, f| f(&format_args!("{e}")))
                    .to_string(),
                backtrace: None,
            }),
            Self::ContractNotFound(_) => Some(Error::ContractNotFound.into()),
            Self::Create(e) => e.try_as_error(),
            Self::Edit(e) => e.try_as_error(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::money::Amount;
    use juniper::{DefaultScalarValue, FromInputValue as _, InputValue};
    use service::{
        command::create_dismissal_order,
        domain::employee,
        workflow::dismissal::{Field, FieldError, Form, Reason, SubmitError},
    };

    use crate::AsError as _;

    use super::Input;

    #[test]
    fn passes_negative_salary_to_form() {
        let salary = Amount::from_input_value(&InputValue::<
            DefaultScalarValue,
        >::scalar("-1 500"))
        .unwrap();
        let prefilled: Amount = "1500000".parse().unwrap();
        let mut form = Form {
            average_salary: Some(prefilled.into()),
            ..Form::default()
        };

        Input {
            average_salary: Some(salary),
            ..Input::default()
        }
        .enter_into(&mut form);

        assert_eq!(
            form.average_salary.map(Amount::from),
            Some("-1500".parse().unwrap()),
        );
    }

    #[test]
    fn lists_every_invalid_field() {
        let err = SubmitError::Invalid(vec![
            FieldError {
                field: Field::Date,
                reason: Reason::BeforeRegistration,
            },
            FieldError {
                field: Field::Grounds,
                reason: Reason::Required,
            },
        ])
        .as_error();

        assert_eq!(err.code, "INVALID_FIELDS");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "order date cannot precede company registration date; \
             grounds for dismissal is required",
        );
    }

    #[test]
    fn reports_missing_contract() {
        let id = employee::Id::new();

        for err in [
            SubmitError::ContractNotFound(id),
            SubmitError::Create(
                create_dismissal_order::ExecutionError::ContractNotFound(id),
            ),
        ] {
            let err = err.as_error();

            assert_eq!(err.code, "CONTRACT_NOT_FOUND");
            assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
            assert_eq!(err.message, "No contract found for this person");
        }
    }
}
