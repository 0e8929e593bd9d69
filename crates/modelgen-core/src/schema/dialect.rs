use crate::Error;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The SQL engine a schema was introspected from.
///
/// The dialect selects the raw type vocabulary used by [`TypeMap`](super::TypeMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Mysql,
    Mariadb,
    #[serde(alias = "postgresql")]
    Postgres,
    Sqlite,
    Mssql,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Mysql,
        Dialect::Mariadb,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::Mssql,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Mariadb => "mariadb",
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
            Dialect::Mssql => "mssql",
        }
    }

    /// Returns `true` for the MySQL family, which shares inline `enum(...)`
    /// syntax and the `tinyint(1)` boolean convention.
    pub fn is_mysql_family(self) -> bool {
        matches!(self, Dialect::Mysql | Dialect::Mariadb)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::Mysql),
            "mariadb" => Ok(Dialect::Mariadb),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "sqlite" => Ok(Dialect::Sqlite),
            "mssql" => Ok(Dialect::Mssql),
            _ => Err(Error::invalid_config(format!("unsupported dialect `{s}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect, dialect.as_str().parse::<Dialect>().unwrap());
        }
    }

    #[test]
    fn parse_accepts_aliases_and_case() {
        assert_eq!(Dialect::Postgres, "postgresql".parse::<Dialect>().unwrap());
        assert_eq!(Dialect::Mysql, "MySQL".parse::<Dialect>().unwrap());
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "oracle".parse::<Dialect>().unwrap_err();
        assert!(err.is_invalid_config());
    }
}
