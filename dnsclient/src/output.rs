use crate::lookup::{LookupOutcome, LookupReport};
use dns::{ParsedResponse, RecordData, ResourceRecord};
use domain_name_query_types::NameQuery;
use std::fmt;
use std::net::Ipv4Addr;

/// Lines printed before the query goes out.
pub struct Banner<'a> {
    query: &'a NameQuery,
    server: Ipv4Addr,
}

impl<'a> Banner<'a> {
    pub fn new(query: &'a NameQuery, server: Ipv4Addr) -> Self {
        Self { query, server }
    }
}

impl fmt::Display for Banner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DnsClient sending request for {}", self.query.name)?;
        writeln!(f, "Server: {}", self.server)?;
        writeln!(f, "Request type: {}", self.query.q_type)
    }
}

impl fmt::Display for LookupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupOutcome::EncodeFailed(e) => writeln!(f, "ERROR\t{}", e),
            LookupOutcome::ExchangeFailed(e) => writeln!(f, "ERROR\t{}", e),
            LookupOutcome::Answered {
                elapsed,
                retries,
                response,
            } => {
                writeln!(
                    f,
                    "Response received after {:.3} seconds ({} retries)",
                    elapsed.as_secs_f64(),
                    retries
                )?;
                write_response(f, response)
            }
        }
    }
}

fn write_response(f: &mut fmt::Formatter<'_>, response: &ParsedResponse) -> fmt::Result {
    match response {
        ParsedResponse::Success {
            authoritative,
            answers,
            additionals,
        } => {
            writeln!(f, "***Answer Section ({} records)***", answers.len())?;
            write_records(f, answers, *authoritative)?;

            if !additionals.is_empty() {
                writeln!(f, "***Additional Section ({} records)***", additionals.len())?;
                write_records(f, additionals, *authoritative)?;
            }
            Ok(())
        }
        ParsedResponse::NotFound { .. } => writeln!(f, "NOTFOUND"),
        ParsedResponse::Failure { reason } => writeln!(f, "ERROR\t{}", reason),
    }
}

fn write_records(
    f: &mut fmt::Formatter<'_>,
    records: &[ResourceRecord],
    authoritative: bool,
) -> fmt::Result {
    let auth = if authoritative { "auth" } else { "nonauth" };

    for record in records {
        let ttl = record.ttl;
        match &record.data {
            RecordData::A(addr) => writeln!(f, "IP\t{}\t{}\t{}", addr, ttl, auth)?,
            RecordData::Cname(alias) => writeln!(f, "CNAME\t{}\t{}\t{}", alias, ttl, auth)?,
            RecordData::Mx {
                preference,
                exchange,
            } => writeln!(f, "MX\t{}\t{}\t{}\t{}", exchange, preference, ttl, auth)?,
            RecordData::Ns(host) => writeln!(f, "NS\t{}\t{}\t{}", host, ttl, auth)?,
            RecordData::Unrecognized(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(data: RecordData, ttl: u32) -> ResourceRecord {
        ResourceRecord {
            name: "mcgill.ca".to_string(),
            class: 1,
            ttl,
            data,
        }
    }

    fn answered(response: ParsedResponse) -> String {
        LookupOutcome::Answered {
            elapsed: Duration::from_millis(1234),
            retries: 1,
            response,
        }
        .to_string()
    }

    #[test]
    fn banner() {
        let query = NameQuery::mx_record("mcgill.ca");
        let text = Banner::new(&query, Ipv4Addr::new(8, 8, 8, 8)).to_string();
        assert_eq!(
            text,
            "DnsClient sending request for mcgill.ca\nServer: 8.8.8.8\nRequest type: MX\n"
        );
    }

    #[test]
    fn answer_lines_per_type() {
        let text = answered(ParsedResponse::Success {
            authoritative: false,
            answers: vec![
                record(RecordData::Cname("www.mcgill.ca.cdn".to_string()), 60),
                record(RecordData::A(Ipv4Addr::new(132, 206, 44, 21)), 300),
                record(
                    RecordData::Mx {
                        preference: 10,
                        exchange: "mx.mcgill.ca".to_string(),
                    },
                    3600,
                ),
                record(RecordData::Ns("ns1.mcgill.ca".to_string()), 86400),
            ],
            additionals: vec![],
        });

        assert_eq!(
            text,
            "Response received after 1.234 seconds (1 retries)\n\
             ***Answer Section (4 records)***\n\
             CNAME\twww.mcgill.ca.cdn\t60\tnonauth\n\
             IP\t132.206.44.21\t300\tnonauth\n\
             MX\tmx.mcgill.ca\t10\t3600\tnonauth\n\
             NS\tns1.mcgill.ca\t86400\tnonauth\n"
        );
    }

    #[test]
    fn additional_section_only_when_present() {
        let text = answered(ParsedResponse::Success {
            authoritative: true,
            answers: vec![record(RecordData::Ns("ns1.mcgill.ca".to_string()), 10)],
            additionals: vec![record(RecordData::A(Ipv4Addr::new(1, 2, 3, 4)), 20)],
        });
        assert!(text.contains("***Additional Section (1 records)***\nIP\t1.2.3.4\t20\tauth\n"));

        let text = answered(ParsedResponse::Success {
            authoritative: true,
            answers: vec![record(RecordData::Ns("ns1.mcgill.ca".to_string()), 10)],
            additionals: vec![],
        });
        assert!(!text.contains("Additional"));
    }

    #[test]
    fn not_found_and_failure() {
        let text = answered(ParsedResponse::NotFound {
            authoritative: true,
        });
        assert!(text.ends_with("(1 retries)\nNOTFOUND\n"));

        let text = answered(ParsedResponse::Failure {
            reason: dns::Error::Truncated,
        });
        assert!(text.contains("\nERROR\tTruncated response"));
    }

    #[test]
    fn encode_failure_omits_timing() {
        let err = dns::Error::EmptyLabel { position: 1 };
        let text = LookupOutcome::EncodeFailed(err.clone()).to_string();
        assert_eq!(text, format!("ERROR\t{}\n", err));
        assert!(!text.contains("Response received"));
    }
}
