use argh::{EarlyExit, FromArgs};
use configuration::QueryOptions;
use std::path::{Path, PathBuf};

fn default_config_path() -> PathBuf {
    PathBuf::from("./dnsclient.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "send one DNS query over UDP and print the reply")]
pub struct CliArgs {
    #[argh(
        option,
        short = 't',
        description = "seconds to wait for each reply, default: 5"
    )]
    pub timeout: Option<String>,

    #[argh(
        option,
        short = 'r',
        description = "retransmissions before giving up, default: 3"
    )]
    pub max_retries: Option<String>,

    #[argh(option, short = 'p', description = "server UDP port, default: 53")]
    pub port: Option<String>,

    #[argh(switch, description = "query the MX records")]
    pub mx: bool,

    #[argh(switch, description = "query the NS records")]
    pub ns: bool,

    #[argh(
        option,
        description = "config file path, default: './dnsclient.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,

    #[argh(
        positional,
        description = "address of the DNS server as @a.b.c.d, then the domain name"
    )]
    pub positionals: Vec<String>,
}

impl CliArgs {
    /// Parses a full argument vector, program name first.
    ///
    /// The single-dash `-mx` and `-ns` spellings are accepted too.
    pub fn parse(args: &[String]) -> Result<Self, EarlyExit> {
        let (program, rest) = match args.split_first() {
            Some(split) => split,
            None => {
                return Err(EarlyExit {
                    output: "missing program name".to_string(),
                    status: Err(()),
                })
            }
        };

        let cmd = Path::new(program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(program.as_str());

        let rest: Vec<&str> = rest
            .iter()
            .map(|arg| match arg.as_str() {
                "-mx" => "--mx",
                "-ns" => "--ns",
                other => other,
            })
            .collect();

        Self::from_args(&[cmd], &rest)
    }

    pub fn to_options(&self) -> QueryOptions {
        QueryOptions {
            timeout: self.timeout.clone(),
            max_retries: self.max_retries.clone(),
            port: self.port.clone(),
            mx: self.mx,
            ns: self.ns,
            positionals: self.positionals.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("/usr/bin/dnsclient")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn positional_only() {
        let cli = CliArgs::parse(&args(&["@8.8.8.8", "www.mcgill.ca"])).unwrap();
        assert_eq!(cli.positionals, vec!["@8.8.8.8", "www.mcgill.ca"]);
        assert_eq!(cli.timeout, None);
        assert_eq!(cli.config, PathBuf::from("./dnsclient.toml"));
        assert!(!cli.mx && !cli.ns);
    }

    #[test]
    fn all_options() {
        let cli = CliArgs::parse(&args(&[
            "-t", "10", "-r", "2", "-p", "5353", "--ns", "@1.1.1.1", "mcgill.ca",
        ]))
        .unwrap();

        let opts = cli.to_options();
        assert_eq!(opts.timeout.as_deref(), Some("10"));
        assert_eq!(opts.max_retries.as_deref(), Some("2"));
        assert_eq!(opts.port.as_deref(), Some("5353"));
        assert!(opts.ns);
        assert!(!opts.mx);
        assert_eq!(opts.positionals.len(), 2);
    }

    #[test]
    fn single_dash_type_switches() {
        let cli = CliArgs::parse(&args(&["-mx", "@8.8.8.8", "mcgill.ca"])).unwrap();
        assert!(cli.mx);

        let cli = CliArgs::parse(&args(&["-ns", "@8.8.8.8", "mcgill.ca"])).unwrap();
        assert!(cli.ns);
    }

    // argument-count and number problems are left to ClientConfiguration
    #[test]
    fn malformed_input_still_parses() {
        let cli = CliArgs::parse(&args(&["@8.8.8.8"])).unwrap();
        assert_eq!(cli.positionals, vec!["@8.8.8.8"]);

        let cli = CliArgs::parse(&args(&["@1.1.1.1", "@8.8.8.8", "example.com"])).unwrap();
        assert_eq!(cli.positionals.len(), 3);

        let cli = CliArgs::parse(&args(&["-t", "abc", "@8.8.8.8", "x.com"])).unwrap();
        assert_eq!(cli.timeout.as_deref(), Some("abc"));

        let cli = CliArgs::parse(&args(&["-r", "-1", "@8.8.8.8", "x.com"])).unwrap();
        assert_eq!(cli.max_retries.as_deref(), Some("-1"));

        let cli = CliArgs::parse(&args(&["-t", "@8.8.8.8", "x.com"])).unwrap();
        assert_eq!(cli.timeout.as_deref(), Some("@8.8.8.8"));
        assert_eq!(cli.positionals, vec!["x.com"]);
    }

    #[test]
    fn cli_errors_reach_configuration_messages() {
        let defaults = configuration::QueryDefaults::default();
        let message = |list: &[&str]| {
            let cli = CliArgs::parse(&args(list)).unwrap();
            configuration::ClientConfiguration::new(&defaults, &cli.to_options())
                .unwrap_err()
                .to_string()
        };

        assert!(message(&["example.com"]).contains("missing @server and/or name"));
        assert!(message(&["@8.8.8.8"]).contains("missing @server and/or name"));
        assert!(message(&["@1.1.1.1", "@8.8.8.8", "example.com"]).contains("multiple @server"));
        assert!(message(&["@8.8.8.8", "example.com", "extra"]).contains("unexpected argument"));
        assert!(message(&["-t", "abc", "@8.8.8.8", "example.com"]).contains("non-integer for -t"));
        assert!(message(&["-r", "abc", "@8.8.8.8", "example.com"]).contains("non-integer for -r"));
        assert!(message(&["-p", "70000", "@8.8.8.8", "example.com"]).contains("invalid numeric value"));
        assert!(message(&["-r", "-1", "@8.8.8.8", "example.com"]).contains("invalid numeric value"));
        assert!(message(&["-t", "0", "@8.8.8.8", "example.com"]).contains("invalid numeric value"));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let early = CliArgs::parse(&args(&["-x", "@8.8.8.8", "x.com"])).unwrap_err();
        assert!(early.status.is_err());
    }

    #[test]
    fn help_exits_successfully() {
        let early = CliArgs::parse(&args(&["--help"])).unwrap_err();
        assert!(early.status.is_ok());
        assert!(early.output.contains("dnsclient"));
    }
}
