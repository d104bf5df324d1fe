use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claim key under which the logged-in employee's id is embedded in admin tokens.
pub const EMP_ID_CLAIM: &str = "empId";

pub const STATUS_ENABLED: i32 = 1;
pub const STATUS_DISABLED: i32 = 0;

pub type ClaimMap = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[repr(transparent)]
pub struct EmployeeID(pub i64);

impl fmt::Display for EmployeeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// keep passwords out of request logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The authenticated view of an employee account, as handed back by an
/// [`AuthenticationService`](crate::AuthenticationService).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    pub id: EmployeeID,
    pub username: String,
    pub name: String,
}

impl From<&Employee> for Identity {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            username: employee.username.clone(),
            name: employee.name.clone(),
        }
    }
}

/// Claims recovered from a verified token. `claims` holds only the private
/// claims; the registered expiry is split out into `expires_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub expires_at: u64,
    pub claims: ClaimMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub id: EmployeeID,
    pub user_name: String,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeID,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub phone: String,
    pub sex: String,
    pub id_number: String,
    pub status: i32,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Employee description submitted by create and update requests.
///
/// Optional fields left out of an update keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDTO {
    #[serde(default)]
    pub id: Option<EmployeeID>,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePageQuery {
    pub page: i32,
    #[serde(alias = "size")]
    pub page_size: i32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageResult<T> {
    pub total: u64,
    pub records: Vec<T>,
}
