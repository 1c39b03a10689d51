use domain_name_query_types::{NameQuery, QType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::convert::TryFrom;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::num::IntErrorKind;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "DNSCLIENT";

/// Reads `config_path` if it exists, then `DNSCLIENT_*` environment variables.
pub fn get_config<T: DeserializeOwned>(config_path: &Path) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path).required(false);
    let config = config::Config::builder()
        .add_source(f)
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;
    config.try_deserialize::<T>()
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Incorrect input syntax: {0}")]
    IncorrectInput(String),

    #[error("Incorrect input syntax: invalid numeric value '{value}' for {option}")]
    InvalidNumericValue { option: &'static str, value: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

fn default_timeout() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_port() -> u16 {
    53
}

/// Values used when the command line leaves an option out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryDefaults {
    /// Seconds to wait for each reply.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            port: default_port(),
        }
    }
}

/// Raw options as given on the command line, numbers still unparsed.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub timeout: Option<String>,
    pub max_retries: Option<String>,
    pub port: Option<String>,
    pub mx: bool,
    pub ns: bool,
    /// `@a.b.c.d` and the domain name, in any order.
    pub positionals: Vec<String>,
}

/// Validated settings of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    server: Ipv4Addr,
    port: u16,
    timeout: Duration,
    max_retries: u32,
    query: NameQuery,
}

impl ClientConfiguration {
    pub fn new(
        defaults: &QueryDefaults,
        options: &QueryOptions,
    ) -> Result<Self, ConfigurationError> {
        let q_type = match (options.mx, options.ns) {
            (true, true) => {
                return Err(ConfigurationError::IncorrectInput(
                    "-mx and -ns are mutually exclusive".to_string(),
                ))
            }
            (true, false) => QType::Mx,
            (false, true) => QType::Ns,
            (false, false) => QType::A,
        };

        let timeout = numeric_option("-t", options.timeout.as_deref(), |v| {
            u64::try_from(v).ok()
        })?
        .unwrap_or(defaults.timeout);
        if timeout == 0 {
            return Err(ConfigurationError::InvalidNumericValue {
                option: "-t",
                value: timeout.to_string(),
            });
        }

        let max_retries = numeric_option("-r", options.max_retries.as_deref(), |v| {
            u32::try_from(v).ok()
        })?
        .unwrap_or(defaults.max_retries);

        let port = numeric_option("-p", options.port.as_deref(), |v| u16::try_from(v).ok())?
            .unwrap_or(defaults.port);
        if port == 0 {
            return Err(ConfigurationError::InvalidNumericValue {
                option: "-p",
                value: port.to_string(),
            });
        }

        let (server, name) = split_positionals(&options.positionals)?;
        let server = parse_server(server)?;

        Ok(Self {
            server,
            port,
            timeout: Duration::from_secs(timeout),
            max_retries,
            query: NameQuery::new(name, q_type),
        })
    }

    pub fn server(&self) -> Ipv4Addr {
        self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn server_address(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.server, self.port)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn query(&self) -> &NameQuery {
        &self.query
    }
}

/// Parses the raw value of `option`, `None` when it was not given.
///
/// `convert` narrows the integer to the option's range.
fn numeric_option<T>(
    option: &'static str,
    raw: Option<&str>,
    convert: fn(i64) -> Option<T>,
) -> Result<Option<T>, ConfigurationError> {
    let raw = match raw {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let out_of_range = || ConfigurationError::InvalidNumericValue {
        option,
        value: raw.to_string(),
    };

    let value = match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => return Err(out_of_range()),
            _ => {
                return Err(ConfigurationError::IncorrectInput(format!(
                    "non-integer for {}: '{}'",
                    option, raw
                )))
            }
        },
    };

    convert(value).map(Some).ok_or_else(out_of_range)
}

/// Picks the `@server` and the name out of the positional arguments.
fn split_positionals(args: &[String]) -> Result<(&str, &str), ConfigurationError> {
    let mut server: Option<&str> = None;
    let mut name: Option<&str> = None;

    for arg in args {
        if arg.starts_with('@') {
            if server.is_some() {
                return Err(ConfigurationError::IncorrectInput(
                    "multiple @server arguments".to_string(),
                ));
            }
            server = Some(arg.as_str());
        } else if name.is_some() {
            return Err(ConfigurationError::IncorrectInput(format!(
                "unexpected argument '{}'",
                arg
            )));
        } else {
            name = Some(arg.as_str());
        }
    }

    match (server, name) {
        (Some(server), Some(name)) => Ok((server, name)),
        _ => Err(ConfigurationError::IncorrectInput(
            "missing @server and/or name".to_string(),
        )),
    }
}

/// Parses `@a.b.c.d` into an address, octet by octet.
pub fn parse_server(arg: &str) -> Result<Ipv4Addr, ConfigurationError> {
    let incorrect = |msg: String| ConfigurationError::IncorrectInput(msg);

    let address = arg
        .strip_prefix('@')
        .ok_or_else(|| incorrect(format!("@server must start with '@', got '{}'", arg)))?;

    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return Err(incorrect(format!(
            "@server must be IPv4 a.b.c.d, got '{}'",
            address
        )));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts.iter()) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(incorrect(format!("IPv4 octet '{}' is not a number", part)));
        }
        *octet = part
            .parse::<u8>()
            .map_err(|_| incorrect(format!("IPv4 octet out of range: {}", part)))?;
    }

    Ok(Ipv4Addr::from(octets))
}
