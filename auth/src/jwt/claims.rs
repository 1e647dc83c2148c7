use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by bearer tokens.
///
/// The subject is the username; `iat` and `exp` are Unix timestamps in
/// seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject`, valid for `lifetime` from `issued_at`.
    pub fn for_subject(
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// A token is only live while its expiry is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
