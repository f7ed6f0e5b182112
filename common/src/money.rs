//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use rust_decimal::Decimal;

/// Non-negative amount of money in the national currency.
///
/// The amount is stored and transferred as is; thousands separators are a
/// presentation concern only (see [`Money::grouped()`]).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] out of the provided `amount`.
    ///
    /// [`None`] is returned if the `amount` is negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then(|| Self(amount.normalize()))
    }

    /// Returns the raw amount of this [`Money`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns a [`Display`] of this [`Money`] with its integer digits
    /// grouped by thousands with spaces (`1 500 000.5`).
    ///
    /// [`Display`]: fmt::Display
    #[must_use]
    pub fn grouped(&self) -> Grouped {
        Grouped(*self)
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Self(amount.into())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("negative amount")
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    /// Parses [`Money`] from a decimal string, ignoring any whitespace used
    /// as a thousands separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::from_str(s)?.0.try_into()
    }
}

/// Amount of money as entered by a user, not yet checked to be [`Money`].
///
/// May be negative.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Amount(Decimal);

impl From<Decimal> for Amount {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = &'static str;

    /// Parses an [`Amount`] from a decimal string, ignoring any whitespace
    /// used as a thousands separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits =
            s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        if digits.is_empty() {
            return Err("empty amount");
        }

        Decimal::from_str(&digits)
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

/// [`Money`] displayed with thousands separators.
#[derive(Clone, Copy, Debug)]
pub struct Grouped(Money);

impl fmt::Display for Grouped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0.to_string();
        let (int, frac) = raw
            .split_once('.')
            .map_or((raw.as_str(), None), |(i, f)| (i, Some(f)));

        for (i, digit) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                f.write_str(" ")?;
            }
            write!(f, "{digit}")?;
        }
        if let Some(frac) = frac {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Money {
    accepts!(NUMERIC);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(Decimal::from_sql(ty, raw)?.try_into()?)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Money {
    accepts!(NUMERIC);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Non-negative decimal amount of money, e.g. `1500000` or `1500000.50`.
    ///
    /// Spaces are accepted on input as thousands separators.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }

    /// Decimal amount of money as entered, e.g. `1500000` or `-10`.
    ///
    /// Spaces are accepted as thousands separators. Unlike `Money`, negative
    /// amounts are accepted, so that they can be reported along with other
    /// invalid fields of a form.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Amount = super::Amount;

    impl Amount {
        fn to_output<S: ScalarValue>(a: &Amount) -> Value<S> {
            Value::scalar(a.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Amount` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Amount` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Amount, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("1500000").unwrap().amount(),
            decimal("1500000"),
        );
        assert_eq!(
            Money::from_str("1 500 000").unwrap().amount(),
            decimal("1500000"),
        );
        assert_eq!(
            Money::from_str("123.45").unwrap().amount(),
            decimal("123.45"),
        );
        assert_eq!(
            Money::from_str("123.450").unwrap(),
            Money::from_str("123.45").unwrap(),
        );

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("   ").is_err());
        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("12a").is_err());
    }

    #[test]
    fn amount_keeps_sign() {
        assert_eq!(
            Decimal::from(Amount::from_str("-1 500").unwrap()),
            decimal("-1500"),
        );
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("1,5").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::from(1_500_000).to_string(), "1500000");
        assert_eq!(Money::from_str("123.45").unwrap().to_string(), "123.45");
    }

    #[test]
    fn grouped() {
        assert_eq!(Money::from(1_500_000).grouped().to_string(), "1 500 000");
        assert_eq!(Money::from(100_000).grouped().to_string(), "100 000");
        assert_eq!(Money::from(999).grouped().to_string(), "999");
        assert_eq!(Money::ZERO.grouped().to_string(), "0");
        assert_eq!(
            Money::from_str("1234567.89").unwrap().grouped().to_string(),
            "1 234 567.89",
        );
    }
}
