//! [`Config`]-related definitions.

use std::time;

use common::{date::UtcOffset, Money};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Loads a [`Config`] from the file at the provided `path`, if it
    /// exists, overridden by `CONF.`-prefixed environment variables.
    ///
    /// Missing fields fall back to their default values.
    ///
    /// # Errors
    ///
    /// If the loaded values cannot be deserialized.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Values prefilled into a new dismissal `Order` form.
    pub dismissal: Dismissal,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            dismissal:
                Dismissal {
                    grounds,
                    compensation_days,
                    average_salary,
                    utc_offset,
                },
        } = value;
        Self {
            dismissal: service::workflow::dismissal::Defaults {
                grounds,
                compensation_days,
                average_salary,
                utc_offset,
            },
        }
    }
}

/// Values prefilled into a new dismissal `Order` form.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Dismissal {
    /// Grounds of the dismissal.
    #[default("Заявление".to_owned())]
    pub grounds: String,

    /// Days of unused vacation to be compensated.
    #[default(5)]
    pub compensation_days: i32,

    /// Average monthly salary of the dismissed `Employee`.
    #[default(Money::from(1_500_000))]
    pub average_salary: Money,

    /// Offset from UTC (`±HH:MM`) the prefilled dates are determined at.
    pub utc_offset: UtcOffset,
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,

    /// Timeout of establishing a new connection.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub connect_timeout: time::Duration,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
            connect_timeout,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            connect_timeout: Some(connect_timeout),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time;

    use common::Money;

    use super::{Config, Dismissal, Postgres, Service};

    #[test]
    fn dismissal_defaults_match_service_ones() {
        let config = service::Config::from(Service::default());
        let defaults = service::workflow::dismissal::Defaults::default();

        assert_eq!(config.dismissal.grounds, defaults.grounds);
        assert_eq!(
            config.dismissal.compensation_days,
            defaults.compensation_days,
        );
        assert_eq!(config.dismissal.average_salary, defaults.average_salary);
        assert_eq!(config.dismissal.utc_offset, defaults.utc_offset);
    }

    #[test]
    fn passes_dismissal_section_through() {
        let config = service::Config::from(Service {
            dismissal: Dismissal {
                grounds: "Соглашение сторон".to_owned(),
                compensation_days: 12,
                average_salary: Money::from(2_000_000),
                utc_offset: "+05:00".parse().unwrap(),
            },
        });

        assert_eq!(config.dismissal.grounds, "Соглашение сторон");
        assert_eq!(config.dismissal.compensation_days, 12);
        assert_eq!(config.dismissal.average_salary, Money::from(2_000_000));
        assert_eq!(config.dismissal.utc_offset.to_string(), "+05:00");
    }

    #[test]
    fn passes_connect_timeout_to_pool() {
        let config = service::infra::postgres::Config::from(Postgres {
            connect_timeout: time::Duration::from_secs(30),
            ..Postgres::default()
        });

        assert_eq!(
            config.connect_timeout,
            Some(time::Duration::from_secs(30)),
        );
        assert_eq!(config.dbname.as_deref(), Some("postgres"));
    }

    #[test]
    fn falls_back_to_defaults_without_file() {
        let config = Config::new("nonexistent.toml").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.postgres.connect_timeout.as_secs(), 5);
        assert_eq!(config.service.dismissal.compensation_days, 5);
    }
}
