use super::{ColumnMeta, Dialect};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Coarse, ORM-facing type category of a column.
///
/// Logical types are independent of the SQL dialect the column came from.
/// The full raw type and its parameters travel alongside in [`MappedType`],
/// so nothing needed to reproduce the column is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    String,
    Number,
    Boolean,
    Date,
    Binary,
    Json,
    Enum,
    Other,
}

/// How a raw type was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeStatus {
    /// The normalized token has an entry in the dialect's type map.
    Recognized,

    /// No entry for the token. The type degraded to [`LogicalType::Other`].
    Unrecognized,

    /// An enumeration whose literal list could not be read. The type degraded
    /// to [`LogicalType::String`] with no values.
    MalformedEnum,
}

/// Parameters carried by the raw type, e.g. `varchar(255)` or
/// `decimal(10,2) unsigned`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParams {
    pub length: Option<u64>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub unsigned: bool,
    pub zerofill: bool,
}

/// The result of mapping one raw column type.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub logical: LogicalType,

    /// Lower-cased type name with parameters and modifiers removed, e.g.
    /// `varchar` for `VARCHAR(255)`.
    pub token: String,

    /// The raw type string exactly as introspected
    pub raw: String,

    pub params: TypeParams,

    /// Literal values, only for [`LogicalType::Enum`]
    pub enum_values: Vec<String>,

    pub status: TypeStatus,
}

/// Maps normalized raw type tokens to logical types for one dialect.
#[derive(Debug, Clone)]
pub struct TypeMap {
    dialect: Dialect,
    entries: IndexMap<String, LogicalType>,
}

/// A raw type split into its normalized token and arguments.
struct RawType<'a> {
    token: String,

    /// Comma separated arguments inside the first parenthesis
    args: Vec<&'a str>,

    /// Everything after the first `(` of the original string, case preserved
    body: Option<&'a str>,

    unsigned: bool,
    zerofill: bool,
}

use LogicalType as L;

const MYSQL: &[(&str, LogicalType)] = &[
    ("char", L::String),
    ("varchar", L::String),
    ("tinytext", L::String),
    ("text", L::String),
    ("mediumtext", L::String),
    ("longtext", L::String),
    ("set", L::String),
    ("tinyint", L::Number),
    ("smallint", L::Number),
    ("mediumint", L::Number),
    ("int", L::Number),
    ("integer", L::Number),
    ("bigint", L::Number),
    ("float", L::Number),
    ("double", L::Number),
    ("double precision", L::Number),
    ("real", L::Number),
    ("decimal", L::Number),
    ("dec", L::Number),
    ("numeric", L::Number),
    ("fixed", L::Number),
    ("year", L::Number),
    ("bool", L::Boolean),
    ("boolean", L::Boolean),
    ("date", L::Date),
    ("datetime", L::Date),
    ("timestamp", L::Date),
    ("time", L::Date),
    ("binary", L::Binary),
    ("varbinary", L::Binary),
    ("tinyblob", L::Binary),
    ("blob", L::Binary),
    ("mediumblob", L::Binary),
    ("longblob", L::Binary),
    ("bit", L::Binary),
    ("json", L::Json),
    ("enum", L::Enum),
];

const MARIADB_EXTRA: &[(&str, LogicalType)] = &[
    ("uuid", L::String),
    ("inet4", L::String),
    ("inet6", L::String),
];

const POSTGRES: &[(&str, LogicalType)] = &[
    ("char", L::String),
    ("character", L::String),
    ("bpchar", L::String),
    ("varchar", L::String),
    ("character varying", L::String),
    ("text", L::String),
    ("citext", L::String),
    ("name", L::String),
    ("uuid", L::String),
    ("inet", L::String),
    ("cidr", L::String),
    ("macaddr", L::String),
    ("xml", L::String),
    ("smallint", L::Number),
    ("integer", L::Number),
    ("int", L::Number),
    ("int2", L::Number),
    ("int4", L::Number),
    ("int8", L::Number),
    ("bigint", L::Number),
    ("smallserial", L::Number),
    ("serial", L::Number),
    ("bigserial", L::Number),
    ("real", L::Number),
    ("float4", L::Number),
    ("float8", L::Number),
    ("double precision", L::Number),
    ("decimal", L::Number),
    ("numeric", L::Number),
    ("money", L::Number),
    ("boolean", L::Boolean),
    ("bool", L::Boolean),
    ("date", L::Date),
    ("timestamp", L::Date),
    ("timestamptz", L::Date),
    ("time", L::Date),
    ("timetz", L::Date),
    ("bytea", L::Binary),
    ("json", L::Json),
    ("jsonb", L::Json),
    ("user-defined", L::Enum),
];

const SQLITE: &[(&str, LogicalType)] = &[
    ("text", L::String),
    ("char", L::String),
    ("character", L::String),
    ("varchar", L::String),
    ("varying character", L::String),
    ("nchar", L::String),
    ("native character", L::String),
    ("nvarchar", L::String),
    ("clob", L::String),
    ("uuid", L::String),
    ("integer", L::Number),
    ("int", L::Number),
    ("tinyint", L::Number),
    ("smallint", L::Number),
    ("mediumint", L::Number),
    ("bigint", L::Number),
    ("big int", L::Number),
    ("int2", L::Number),
    ("int8", L::Number),
    ("real", L::Number),
    ("double", L::Number),
    ("double precision", L::Number),
    ("float", L::Number),
    ("numeric", L::Number),
    ("decimal", L::Number),
    ("boolean", L::Boolean),
    ("date", L::Date),
    ("datetime", L::Date),
    ("timestamp", L::Date),
    ("time", L::Date),
    ("blob", L::Binary),
    ("json", L::Json),
    ("enum", L::Enum),
];

const MSSQL: &[(&str, LogicalType)] = &[
    ("char", L::String),
    ("varchar", L::String),
    ("nchar", L::String),
    ("nvarchar", L::String),
    ("text", L::String),
    ("ntext", L::String),
    ("uniqueidentifier", L::String),
    ("xml", L::String),
    ("tinyint", L::Number),
    ("smallint", L::Number),
    ("int", L::Number),
    ("bigint", L::Number),
    ("decimal", L::Number),
    ("numeric", L::Number),
    ("money", L::Number),
    ("smallmoney", L::Number),
    ("float", L::Number),
    ("real", L::Number),
    ("bit", L::Boolean),
    ("date", L::Date),
    ("datetime", L::Date),
    ("datetime2", L::Date),
    ("smalldatetime", L::Date),
    ("datetimeoffset", L::Date),
    ("time", L::Date),
    ("binary", L::Binary),
    ("varbinary", L::Binary),
    ("image", L::Binary),
];

/// Tokens whose single argument is a precision rather than a length.
const PRECISION_TOKENS: &[&str] = &["decimal", "dec", "numeric", "fixed", "number"];

impl TypeMap {
    /// The built-in type map for `dialect`.
    pub fn for_dialect(dialect: Dialect) -> TypeMap {
        let mut map = TypeMap::empty(dialect);

        let tables: &[&[(&str, LogicalType)]] = match dialect {
            Dialect::Mysql => &[MYSQL],
            Dialect::Mariadb => &[MYSQL, MARIADB_EXTRA],
            Dialect::Postgres => &[POSTGRES],
            Dialect::Sqlite => &[SQLITE],
            Dialect::Mssql => &[MSSQL],
        };

        for (token, logical) in tables.iter().flat_map(|table| table.iter()) {
            map.entries.insert(token.to_string(), *logical);
        }

        map
    }

    /// A type map for `dialect` with no entries. Every type maps to
    /// [`LogicalType::Other`] until entries are added with [`TypeMap::with`].
    pub fn empty(dialect: Dialect) -> TypeMap {
        TypeMap {
            dialect,
            entries: IndexMap::new(),
        }
    }

    /// Adds or replaces the entry for `token`.
    pub fn with(mut self, token: impl AsRef<str>, logical: LogicalType) -> TypeMap {
        self.entries
            .insert(token.as_ref().trim().to_ascii_lowercase(), logical);
        self
    }

    /// Adds or replaces entries for every `(token, logical)` pair.
    pub fn extend<I, S>(mut self, overrides: I) -> TypeMap
    where
        I: IntoIterator<Item = (S, LogicalType)>,
        S: AsRef<str>,
    {
        for (token, logical) in overrides {
            self = self.with(token, logical);
        }
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Looks up a normalized token.
    pub fn lookup(&self, token: &str) -> Option<LogicalType> {
        self.entries.get(token).copied()
    }

    /// Maps a raw column type.
    ///
    /// This never fails. Unknown types come back as [`LogicalType::Other`]
    /// with [`TypeStatus::Unrecognized`], and enumerations whose values cannot
    /// be read come back as [`LogicalType::String`] with
    /// [`TypeStatus::MalformedEnum`].
    pub fn map(&self, raw: &str, meta: &ColumnMeta) -> MappedType {
        let parsed = RawType::parse(raw);

        let mut mapped = MappedType {
            logical: LogicalType::Other,
            token: parsed.token.clone(),
            raw: raw.to_string(),
            params: TypeParams {
                unsigned: parsed.unsigned,
                zerofill: parsed.zerofill,
                ..TypeParams::default()
            },
            enum_values: vec![],
            status: TypeStatus::Unrecognized,
        };

        match self.lookup(&parsed.token) {
            Some(LogicalType::Enum) => {
                let values = match parsed.body {
                    Some(body) => parse_enum_literals(body),
                    None if !meta.special.is_empty() => Some(meta.special.clone()),
                    None => None,
                };

                match values {
                    Some(values) => {
                        mapped.logical = LogicalType::Enum;
                        mapped.enum_values = values;
                        mapped.status = TypeStatus::Recognized;
                    }
                    None => {
                        mapped.logical = LogicalType::String;
                        mapped.status = TypeStatus::MalformedEnum;
                    }
                }
            }
            Some(logical) => {
                mapped.logical = logical;
                mapped.status = TypeStatus::Recognized;
                parsed.apply_args(&mut mapped.params);

                // `tinyint(1)` and `bit(1)` are the MySQL spelling of a boolean
                if self.dialect.is_mysql_family()
                    && matches!(parsed.token.as_str(), "tinyint" | "bit")
                    && mapped.params.length == Some(1)
                {
                    mapped.logical = LogicalType::Boolean;
                }
            }
            None => parsed.apply_args(&mut mapped.params),
        }

        mapped
    }
}

impl MappedType {
    pub fn is_recognized(&self) -> bool {
        self.status == TypeStatus::Recognized
    }
}

impl<'a> RawType<'a> {
    fn parse(raw: &'a str) -> RawType<'a> {
        let raw = raw.trim();

        // ASCII lower-casing keeps byte offsets, so positions found in
        // `lower` index `raw` as well.
        let lower = raw.to_ascii_lowercase();

        let (head, args, tail, body) = match lower.find('(') {
            Some(open) => {
                let body = &raw[open + 1..];
                match closing_paren(body) {
                    Some(close) => (
                        &lower[..open],
                        &body[..close],
                        &lower[open + close + 2..],
                        Some(body),
                    ),
                    None => (&lower[..open], body, "", Some(body)),
                }
            }
            None => (lower.as_str(), "", "", None),
        };

        let mut unsigned = false;
        let mut zerofill = false;
        let mut words = vec![];

        // Charset and collation clauses close the type
        let tail = tail
            .split_whitespace()
            .take_while(|word| !matches!(*word, "character" | "charset" | "collate"));

        for word in head.split_whitespace().chain(tail) {
            match word {
                "unsigned" => unsigned = true,
                "zerofill" => zerofill = true,
                "signed" => {}
                _ => words.push(word),
            }
        }

        let mut token = words
            .join(" ")
            .replace(" without time zone", "")
            .replace(" with time zone", "");

        if token.ends_with("[]") {
            token = "array".to_string();
        }

        RawType {
            token,
            args: args
                .split(',')
                .map(str::trim)
                .filter(|arg| !arg.is_empty())
                .collect(),
            body,
            unsigned,
            zerofill,
        }
    }

    fn apply_args(&self, params: &mut TypeParams) {
        match self.args[..] {
            [precision, scale] => {
                params.precision = precision.parse().ok();
                params.scale = scale.parse().ok();
            }
            [precision] if PRECISION_TOKENS.contains(&self.token.as_str()) => {
                params.precision = precision.parse().ok();
            }
            // Non-numeric lengths such as `max` leave the length unset
            [length] => params.length = length.parse().ok(),
            _ => {}
        }
    }
}

/// Byte offset of the `)` closing `body`, skipping quoted literals.
fn closing_paren(body: &str) -> Option<usize> {
    let mut quote = None;
    let mut chars = body.char_indices();

    while let Some((pos, c)) = chars.next() {
        match (quote, c) {
            (Some(_), '\\') => {
                chars.next();
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ')') => return Some(pos),
            (None, _) => {}
        }
    }

    None
}

/// Reads the quoted literals of an inline enumeration.
///
/// `body` is the text after the opening parenthesis, e.g. `'a','b')`.
/// Anything after the closing parenthesis is ignored. Returns `None` unless
/// the list is well formed and non-empty.
fn parse_enum_literals(body: &str) -> Option<Vec<String>> {
    let mut values = vec![];
    let mut chars = body.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let quote = chars.next().filter(|c| *c == '\'' || *c == '"')?;
        let mut value = String::new();

        loop {
            match chars.next()? {
                '\\' => value.push(chars.next()?),
                c if c == quote => {
                    // A doubled quote is an escaped quote
                    if chars.next_if_eq(&quote).is_some() {
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                c => value.push(c),
            }
        }

        values.push(value);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        match chars.next()? {
            ',' => continue,
            ')' => return Some(values),
            _ => return None,
        }
    }
}
