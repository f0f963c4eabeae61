//! Uniform reading of `is_active` columns.
//!
//! Depending on the driver and on how a table was created, the flag arrives as a
//! boolean, a small integer (`tinyint(1)` style) or a string. All of them go through
//! [`ActiveFlag`] so that read paths and SQL filters agree on what "active" means:
//!
//! - boolean: `true`
//! - integer: exactly `1`
//! - text: `1`, `t`, `true`, `y`, `yes`, `on` (trimmed, case-insensitive)
//!
//! Anything else, including `NULL`, `0`, `2` and the empty string, is inactive.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::{Decode, Postgres, Type, ValueRef};

/// Lowercase spellings treated as active when the column holds text.
pub const TRUTHY_SPELLINGS: [&str; 6] = ["1", "t", "true", "y", "yes", "on"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveFlag(pub bool);

impl ActiveFlag {
    pub fn from_int(value: i64) -> Self {
        Self(value == 1)
    }

    pub fn from_text(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        Self(TRUTHY_SPELLINGS.contains(&normalized.as_str()))
    }

    pub fn is_active(self) -> bool {
        self.0
    }
}

impl From<ActiveFlag> for bool {
    fn from(flag: ActiveFlag) -> Self {
        flag.0
    }
}

impl From<bool> for ActiveFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

/// SQL predicate that applies the same coercion as [`ActiveFlag`] to `column`.
///
/// The column is cast to text first, so it works for BOOLEAN (`'true'`/`'false'`),
/// integer and text representations alike. A `NULL` flag never matches.
pub fn active_predicate(column: &str) -> String {
    let spellings = TRUTHY_SPELLINGS
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ");
    format!("LOWER(TRIM(CAST({} AS TEXT))) IN ({})", column, spellings)
}

impl Type<Postgres> for ActiveFlag {
    fn type_info() -> PgTypeInfo {
        <bool as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <bool as Type<Postgres>>::compatible(ty)
            || <i16 as Type<Postgres>>::compatible(ty)
            || <i32 as Type<Postgres>>::compatible(ty)
            || <i64 as Type<Postgres>>::compatible(ty)
            || <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for ActiveFlag {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let ty = value.type_info().into_owned();

        if <bool as Type<Postgres>>::compatible(&ty) {
            return Ok(Self(<bool as Decode<Postgres>>::decode(value)?));
        }
        if <i16 as Type<Postgres>>::compatible(&ty) {
            return Ok(Self::from_int(<i16 as Decode<Postgres>>::decode(value)?.into()));
        }
        if <i32 as Type<Postgres>>::compatible(&ty) {
            return Ok(Self::from_int(<i32 as Decode<Postgres>>::decode(value)?.into()));
        }
        if <i64 as Type<Postgres>>::compatible(&ty) {
            return Ok(Self::from_int(<i64 as Decode<Postgres>>::decode(value)?));
        }
        if <String as Type<Postgres>>::compatible(&ty) {
            return Ok(Self::from_text(<&str as Decode<Postgres>>::decode(value)?));
        }

        Err(format!("unsupported column type for is_active: {}", ty).into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ActiveFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(b) => Self(b),
            RawFlag::Int(i) => Self::from_int(i),
            RawFlag::Text(s) => Self::from_text(&s),
        })
    }
}

impl Serialize for ActiveFlag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(self.0)
    }
}
