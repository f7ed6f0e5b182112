//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};
use service::domain;

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Represents the target type as a GraphQL string, written and read with the
/// [`Display`] and [`FromStr`] impls of the `As` domain type, so the domain
/// validation applies to every input.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type out of a string [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the input value is not a string, or the domain type rejects it.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).expect("always has a name");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Expected string for `{name}` scalar, found: {input}")
        })?;
        s.parse::<As>()
            .map_err(|e| format!("Invalid `{name}` scalar \"{s}\": {e}"))?
            .try_into()
            .map_err(|e| format!("Invalid `{name}` scalar: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Postal address of a `Company` or an `Employee`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::Address>)]
pub struct Address(domain::Address);

/// Phone number of a `Company` or an `Employee`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::Phone>)]
pub struct Phone(domain::Phone);

/// Nine-digit taxpayer identification number of a `Company` or an
/// `Employee`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::Tin>)]
pub struct Tin(domain::Tin);

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};

    use super::{Phone, Tin, Via};

    #[test]
    fn parses_through_domain_type() {
        let input = InputValue::<DefaultScalarValue>::scalar(" 123456789 ");
        let tin: Tin =
            Via::<service::domain::Tin>::from_input(&input).unwrap();

        assert_eq!(tin.to_string(), "123456789");
    }

    #[test]
    fn rejects_invalid_input() {
        let err = Via::<service::domain::Phone>::from_input::<Phone, _>(
            &InputValue::<DefaultScalarValue>::scalar("call me"),
        )
        .unwrap_err();
        assert!(err.starts_with("Invalid `Phone` scalar"), "{err}");

        let err = Via::<service::domain::Tin>::from_input::<Tin, _>(
            &InputValue::<DefaultScalarValue>::scalar(123_456_789),
        )
        .unwrap_err();
        assert!(err.starts_with("Expected string"), "{err}");
    }

    #[test]
    fn outputs_string() {
        let tin = Tin::from(service::domain::Tin::new("123456789").unwrap());

        assert_eq!(
            Via::<service::domain::Tin>::to_output::<_, DefaultScalarValue>(
                &tin
            ),
            Value::scalar("123456789".to_owned()),
        );
    }
}
