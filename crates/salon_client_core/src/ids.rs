//! Strongly-typed integer IDs. The backend numbers every entity per company; use these instead of
//! raw integers so an account id cannot be passed where a category id is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

fn validate_id(s: &str) -> Result<i64, String> {
    let n: i64 = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid id {:?}: {}", s, e))?;
    if n <= 0 {
        return Err(format!("Invalid id {:?}: must be positive", s));
    }
    Ok(n)
}

macro_rules! id_type {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(pub i64);

            impl $name {
                pub fn get(self) -> i64 {
                    self.0
                }

                pub fn parse(s: impl AsRef<str>) -> Result<Self, String> {
                    Self::from_str(s.as_ref())
                }
            }

            impl FromStr for $name {
                type Err = String;
                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Ok(Self(validate_id(s)?))
                }
            }

            impl From<i64> for $name {
                fn from(n: i64) -> Self {
                    Self(n)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                    ser.serialize_i64(self.0)
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                    i64::deserialize(de).map(Self)
                }
            }
        )*
    };
}

id_type!(
    TransactionId,
    AccountId,
    CategoryId,
    ClientId,
    CompanyId,
    UserId,
    /// Staff member performing services (hairdresser, manicurist...).
    ProfessionalId,
    AppointmentId,
    InvoiceId,
    NotificationId,
    GoalId,
    EvaluationId,
    CommissionId,
    CashbackEntryId,
);
