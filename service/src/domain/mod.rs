//! Domain definitions.

pub mod company;
pub mod contract;
pub mod employee;
pub mod order;

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

pub use self::{
    company::Company, contract::Contract, employee::Employee, order::Order,
};

/// Defines a free-form text newtype, trimmed and non-empty.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $name:ident(max = $max:literal)
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent)
        )]
        pub struct $name(String);

        impl $name {
            #[doc = concat!(
                "Creates a new [`", stringify!($name), "`] out of the ",
                "trimmed `input`, if it's valid.",
            )]
            #[must_use]
            pub fn new(input: impl AsRef<str>) -> Option<Self> {
                let input = input.as_ref().trim();
                Self::check(input).then(|| Self(input.to_owned()))
            }

            #[doc = concat!(
                "Checks whether the given `input` is a valid [`",
                stringify!($name), "`].",
            )]
            fn check(input: &str) -> bool {
                !input.is_empty() && input.chars().count() <= $max
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
                    .ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

/// Defines a fixed-length string of ASCII digits newtype.
macro_rules! define_digits {
    (
        #[doc = $doc:literal]
        $name:ident(len = $len:literal)
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent)
        )]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Length of a [`", stringify!($name), "`].")]
            pub const LEN: usize = $len;

            #[doc = concat!(
                "Creates a new [`", stringify!($name), "`] out of the ",
                "trimmed `input`, if it consists of exactly [`",
                stringify!($name), "::LEN`] digits.",
            )]
            #[must_use]
            pub fn new(input: impl AsRef<str>) -> Option<Self> {
                let input = input.as_ref().trim();
                Self::check(input).then(|| Self(input.to_owned()))
            }

            #[doc = concat!(
                "Checks whether the given `input` is a valid [`",
                stringify!($name), "`].",
            )]
            fn check(input: &str) -> bool {
                input.len() == Self::LEN
                    && input.bytes().all(|b| b.is_ascii_digit())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
                    .ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

pub(crate) use define_digits;
pub(crate) use define_text;

define_text! {
    #[doc = "Postal address of a [`Company`] or an [`Employee`]."]
    Address(max = 512)
}

define_digits! {
    #[doc = "Taxpayer identification number (TIN) of a [`Company`] or an \
             [`Employee`]."]
    Tin(len = 9)
}

/// Phone number of a [`Company`] or an [`Employee`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] out of the trimmed `number`, if it's valid.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        let number = number.as_ref().trim();
        Self::check(number).then(|| Self(number.to_owned()))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: &str) -> bool {
        /// Regular expression checking [`Phone`] format:
        /// - Optional leading `+`;
        /// - Digits, optionally separated by spaces, dashes or parentheses;
        /// - From 5 to 15 digits in total.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d[\d\s()-]*\d$").expect("valid regex")
        });

        let digits = number.bytes().filter(u8::is_ascii_digit).count();
        (5..=15).contains(&digits) && REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Address, Phone, Tin};

    #[test]
    fn address() {
        assert_eq!(
            Address::new("  Tashkent, Chilanzar 1  ").unwrap().as_ref(),
            "Tashkent, Chilanzar 1",
        );
        assert!(Address::new("").is_none());
        assert!(Address::new("   ").is_none());
        assert!(Address::new("a".repeat(513)).is_none());
    }

    #[test]
    fn tin() {
        assert_eq!(Tin::new("999999999").unwrap().as_ref(), "999999999");
        assert_eq!(Tin::new(" 123456789 ").unwrap().as_ref(), "123456789");
        assert!(Tin::new("12345678").is_none());
        assert!(Tin::new("1234567890").is_none());
        assert!(Tin::new("12345678a").is_none());
    }

    #[test]
    fn phone() {
        assert!(Phone::new("+998909094511").is_some());
        assert!(Phone::new("+998 (90) 909-45-11").is_some());
        assert!(Phone::new("71 200 00 00").is_some());

        assert!(Phone::new("").is_none());
        assert!(Phone::new("1234").is_none());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("+998-").is_none());
        assert!(Phone::new("1234567890123456").is_none());
    }
}
