//! GraphQL [`Mutation`]s definitions.

use common::{Date, Money};
use juniper::graphql_object;
use service::{
    command, domain, query, workflow::dismissal::Workflow, Command as _,
    Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Registers a new `Company` with the provided details.
    ///
    /// With `makeCurrent` the new `Company` becomes the one currently worked
    /// with, replacing the previous one.
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCompany",
            make_current = ?make_current,
            name = %name,
            otel.name = Self::SPAN_NAME,
            registered_on = %registered_on,
        ),
    )]
    pub async fn create_company(
        name: api::company::Name,
        address: api::scalar::Address,
        phone: api::scalar::Phone,
        tin: api::scalar::Tin,
        bank_account: api::company::BankAccount,
        bank_name: api::company::BankName,
        bank_code: api::company::BankCode,
        activity_code: api::company::ActivityCode,
        manager: api::company::ManagerName,
        registered_on: Date,
        make_current: Option<bool>,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        ctx.service()
            .execute(command::CreateCompany {
                name: name.into(),
                address: address.into(),
                phone: phone.into(),
                tin: tin.into(),
                bank_account: bank_account.into(),
                bank_name: bank_name.into(),
                bank_code: bank_code.into(),
                activity_code: activity_code.into(),
                manager: manager.into(),
                registered_on: registered_on.coerce(),
                make_current: make_current.unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Makes the specified `Company` the one currently worked with.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "setCurrentCompany",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_current_company(
        company_id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        ctx.service()
            .execute(command::SetCurrentCompany {
                company_id: company_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the specified `Company`.
    ///
    /// Its records are kept, but are no longer listed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "deleteCompany",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_company(
        company_id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        ctx.service()
            .execute(command::DeleteCompany {
                company_id: company_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Registers a new `Employee` in the specified `Company`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist;
    /// - `PERSONAL_ID_OCCUPIED` - the `EmployeePersonalId` is occupied by
    ///                            another `Employee` of the `Company`.
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            gql.name = "createEmployee",
            otel.name = Self::SPAN_NAME,
            personal_id = %personal_id,
        ),
    )]
    pub async fn create_employee(
        company_id: api::company::Id,
        family_name: api::employee::Name,
        first_name: api::employee::Name,
        patronymic: api::employee::Name,
        personal_id: api::employee::PersonalId,
        tin: api::scalar::Tin,
        passport: Option<api::employee::PassportInput>,
        address: Option<api::scalar::Address>,
        phone: Option<api::scalar::Phone>,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        ctx.service()
            .execute(command::CreateEmployee {
                company_id: company_id.into(),
                family_name: family_name.into(),
                first_name: first_name.into(),
                patronymic: patronymic.into(),
                personal_id: personal_id.into(),
                tin: tin.into(),
                passport: passport.unwrap_or_default().into(),
                address: address.map(Into::into),
                phone: phone.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Hires the specified `Employee`, opening a new `Contract` with them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_ORDER_NUMBER` - the provided `number` is not positive;
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist;
    /// - `EMPLOYEE_ALREADY_EMPLOYED` - the `Employee` already has an active
    ///                                 `Contract`;
    /// - `ORDER_DATE_BEFORE_REGISTRATION` - the `date` precedes the
    ///                                      `Company` registration;
    /// - `HIRING_DATE_BEFORE_REGISTRATION` - the `hiredOn` precedes the
    ///                                       `Company` registration.
    #[tracing::instrument(
        skip_all,
        fields(
            date = %date,
            employee_id = %employee_id,
            gql.name = "hireEmployee",
            hired_on = %hired_on,
            number = number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn hire_employee(
        employee_id: api::employee::Id,
        number: i32,
        date: Date,
        hired_on: Date,
        position: api::order::Position,
        salary: Money,
        ctx: &Context,
    ) -> Result<api::order::Hiring, Error> {
        let number = domain::order::Number::new(number)
            .ok_or_else(|| InputError::NonPositiveNumber.into())
            .map_err(ctx.error())?;

        let order = ctx
            .service()
            .execute(command::HireEmployee {
                employee_id: employee_id.into(),
                number,
                date: date.coerce(),
                hired_on: hired_on.coerce(),
                position: position.into(),
                salary,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        match order {
            domain::Order::Hiring(o) => Ok(o.into()),
            domain::Order::Dismissal(o) => Err(Error::internal(&format!(
                "`Order(id: {})` is not a hiring one",
                o.id,
            )))
            .map_err(ctx.error()),
        }
    }

    /// Creates a new dismissal `Order` of the specified `Employee`, closing
    /// their active `Contract`.
    ///
    /// The `input` values override the ones prefilled into a new
    /// `DismissalOrderForm`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist;
    /// - `EMPLOYEE_NOT_AVAILABLE` - the `Employee` is not employed by the
    ///                              `Company`;
    /// - `INVALID_FIELDS` - some of the entered values are invalid;
    /// - `CONTRACT_NOT_FOUND` - the `Employee` has no active `Contract`;
    /// - `ORDER_DATE_BEFORE_REGISTRATION` - the `date` precedes the
    ///                                      `Company` registration;
    /// - `DISMISSAL_DATE_BEFORE_REGISTRATION` - the `dismissedOn` precedes
    ///                                          the `Company` registration.
    #[tracing::instrument(
        skip_all,
        fields(
            company_id = %company_id,
            employee_id = %employee_id,
            gql.name = "createDismissalOrder",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_dismissal_order(
        company_id: api::company::Id,
        employee_id: api::employee::Id,
        input: Option<api::dismissal::Input>,
        ctx: &Context,
    ) -> Result<api::order::Dismissal, Error> {
        let snapshot = api::Snapshot::take(company_id.into(), ctx).await?;

        let mut workflow = Workflow::create(
            snapshot,
            &ctx.service().config().dismissal,
            ctx.today(),
        );
        _ = workflow
            .select_employee(employee_id.into())
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        input.unwrap_or_default().enter_into(workflow.form_mut());

        submit_dismissal(&workflow, ctx).await
    }

    /// Edits the specified dismissal `Order`.
    ///
    /// The `input` values override the ones the `Order` currently has. Its
    /// `Employee` and `Contract` cannot be changed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DISMISSAL_ORDER_NOT_EXISTS` - the dismissal `Order` with the
    ///                                  specified ID does not exist;
    /// - `INVALID_FIELDS` - some of the entered values are invalid;
    /// - `ORDER_DATE_BEFORE_REGISTRATION` - the `date` precedes the
    ///                                      `Company` registration;
    /// - `DISMISSAL_DATE_BEFORE_REGISTRATION` - the `dismissedOn` precedes
    ///                                          the `Company` registration.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "editDismissalOrder",
            order_id = %order_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn edit_dismissal_order(
        order_id: api::order::Id,
        input: Option<api::dismissal::Input>,
        ctx: &Context,
    ) -> Result<api::order::Dismissal, Error> {
        let order_id = domain::order::Id::from(order_id);

        let company_id = match ctx
            .service()
            .execute(query::order::ById::by(order_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
        {
            Some(domain::Order::Dismissal(o)) => o.company_id,
            Some(domain::Order::Hiring(_)) | None => {
                return Err(InputError::DismissalOrderNotExists.into())
                    .map_err(ctx.error());
            }
        };
        let snapshot = api::Snapshot::take(company_id, ctx).await?;

        let mut workflow = Workflow::edit(snapshot, order_id)
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        input.unwrap_or_default().enter_into(workflow.form_mut());

        submit_dismissal(&workflow, ctx).await
    }
}

/// Submits the provided dismissal [`Workflow`].
async fn submit_dismissal(
    workflow: &Workflow,
    ctx: &Context,
) -> Result<api::order::Dismissal, Error> {
    let order = workflow
        .submit(ctx.service())
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())?;

    match order {
        domain::Order::Dismissal(o) => Ok(o.into()),
        domain::Order::Hiring(o) => Err(Error::internal(&format!(
            "`Order(id: {})` is not a dismissal one",
            o.id,
        )))
        .map_err(ctx.error()),
    }
}

define_error! {
    enum InputError {
        #[code = "INVALID_ORDER_NUMBER"]
        #[status = BAD_REQUEST]
        #[message = "`Order` number must be positive"]
        NonPositiveNumber,

        #[code = "DISMISSAL_ORDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "Dismissal `Order` with the specified ID does not exist"]
        DismissalOrderNotExists,
    }
}

define_error! {
    enum CompanyError {
        #[code = "COMPANY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Company` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum RegistrationError {
        #[code = "ORDER_DATE_BEFORE_REGISTRATION"]
        #[status = BAD_REQUEST]
        #[message = "`Order` date cannot precede `Company` registration"]
        OrderDate,

        #[code = "HIRING_DATE_BEFORE_REGISTRATION"]
        #[status = BAD_REQUEST]
        #[message = "Hiring date cannot precede `Company` registration"]
        HiringDate,

        #[code = "DISMISSAL_DATE_BEFORE_REGISTRATION"]
        #[status = BAD_REQUEST]
        #[message = "Dismissal date cannot precede `Company` registration"]
        DismissalDate,
    }
}

impl AsError for command::create_company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::set_current_company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CompanyNotExists(_) => Some(CompanyError::NotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::delete_company::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CompanyNotExists(_) => Some(CompanyError::NotExists.into()),
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PERSONAL_ID_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`EmployeePersonalId` is occupied by another \
                             `Employee`"]
                PersonalIdOccupied,
            }
        }

        match self {
            Self::CompanyNotExists(_) => Some(CompanyError::NotExists.into()),
            Self::Db(e) => e.try_as_error(),
            Self::PersonalIdOccupied(_) => {
                Some(Error::PersonalIdOccupied.into())
            }
        }
    }
}

impl AsError for command::hire_employee::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMPLOYEE_ALREADY_EMPLOYED"]
                #[status = CONFLICT]
                #[message = "`Employee` already has an active `Contract`"]
                EmployeeAlreadyEmployed,
            }
        }

        match self {
            Self::CompanyNotExists(_) => Some(CompanyError::NotExists.into()),
            Self::Db(e) => e.try_as_error(),
            Self::EmployeeAlreadyEmployed(_) => {
                Some(Error::EmployeeAlreadyEmployed.into())
            }
            Self::EmployeeNotExists(_) => {
                Some(api::query::EmployeeError::NotExists.into())
            }
            Self::HiringDateBeforeRegistration(_) => {
                Some(RegistrationError::HiringDate.into())
            }
            Self::OrderDateBeforeRegistration(_) => {
                Some(RegistrationError::OrderDate.into())
            }
        }
    }
}

impl AsError for command::create_dismissal_order::ExecutionError {
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
            Self::CompanyNotExists(_) => Some(CompanyError::NotExists.into()),
            Self::ContractNotFound(_) => Some(Error::ContractNotFound.into()),
            Self::Db(e) => e.try_as_error(),
            Self::DismissalDateBeforeRegistration(_) => {
                Some(RegistrationError::DismissalDate.into())
            }
            Self::EmployeeNotExists(_) => {
                Some(api::query::EmployeeError::NotExists.into())
            }
            Self::OrderDateBeforeRegistration(_) => {
                Some(RegistrationError::OrderDate.into())
            }
        }
    }
}

impl AsError for command::edit_dismissal_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CompanyNotExists(_) => Some(CompanyError::NotExists.into()),
            Self::ContractNotExists(_) => {
                Some(api::query::ContractError::NotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::DismissalDateBeforeRegistration(_) => {
                Some(RegistrationError::DismissalDate.into())
            }
            Self::OrderDateBeforeRegistration(_) => {
                Some(RegistrationError::OrderDate.into())
            }
            Self::OrderNotExists(_) => {
                Some(InputError::DismissalOrderNotExists.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Date;
    use service::{
        command::{edit_dismissal_order, hire_employee},
        domain::{contract, order},
    };

    use crate::AsError as _;

    #[test]
    fn hiring_before_registration_is_bad_request() {
        let date: contract::HiringDate =
            Date::from_ymd(2020, 1, 1).unwrap().coerce();

        let err =
            hire_employee::ExecutionError::HiringDateBeforeRegistration(date)
                .as_error();

        assert_eq!(err.code, "HIRING_DATE_BEFORE_REGISTRATION");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_edited_order_is_not_found() {
        let err = edit_dismissal_order::ExecutionError::OrderNotExists(
            order::Id::new(),
        )
        .as_error();

        assert_eq!(err.code, "DISMISSAL_ORDER_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }
}
