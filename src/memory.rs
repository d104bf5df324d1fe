use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    admin::{AuthenticationService, EmployeeService},
    error::AdminError,
    types::{
        Credentials, Employee, EmployeeDTO, EmployeeID, EmployeePageQuery, Identity, PageResult,
        STATUS_DISABLED, STATUS_ENABLED,
    },
};

/// Password assigned to every newly created employee.
pub const DEFAULT_PASSWORD: &str = "123456";

struct Storage {
    next_id: i64,
    employees: BTreeMap<EmployeeID, Employee>,
}

/// Employee store kept in process memory. Implements both collaborator traits,
/// which makes it usable as a stand-alone back-office or as a test double.
pub struct InMemoryEmployees {
    /// The salt used to hash stored passwords.
    /// If the salt changes, stored passwords can no longer be hashed to the same value,
    /// but encoded hashes remain verifiable.
    password_salt: String,
    storage: RwLock<Storage>,
}

impl InMemoryEmployees {
    pub fn new(password_salt: impl Into<String>) -> Self {
        Self {
            password_salt: password_salt.into(),
            storage: RwLock::new(Storage {
                next_id: 1,
                employees: BTreeMap::new(),
            }),
        }
    }

    /// A store holding the built-in `admin` account with the default password.
    pub async fn with_administrator(
        password_salt: impl Into<String>,
    ) -> Result<Self, AdminError> {
        let store = Self::new(password_salt);
        store
            .save(EmployeeDTO {
                username: "admin".into(),
                name: "Administrator".into(),
                ..Default::default()
            })
            .await?;
        Ok(store)
    }

    fn hash(&self, password: &str) -> Result<String, AdminError> {
        argon2::hash_encoded(
            password.as_bytes(),
            self.password_salt.as_bytes(),
            &Default::default(),
        )
        .map_err(|err| AdminError::ServiceError {
            source: Box::new(err),
        })
    }

    fn verify_hash(password: &str, hash: &str) -> bool {
        argon2::verify_encoded(hash, password.as_bytes()).unwrap_or(false)
    }
}

fn require(field: &str, value: &str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        Err(AdminError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

fn username_taken(storage: &Storage, username: &str, except: Option<EmployeeID>) -> bool {
    storage
        .employees
        .values()
        .any(|employee| employee.username == username && Some(employee.id) != except)
}

#[async_trait]
impl AuthenticationService for InMemoryEmployees {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AdminError> {
        let storage = self.storage.read().await;

        let employee = storage
            .employees
            .values()
            .find(|employee| employee.username == credentials.username)
            .ok_or(AdminError::InvalidCredentials)?;

        if !Self::verify_hash(&credentials.password, &employee.password) {
            return Err(AdminError::InvalidCredentials);
        }

        if employee.status == STATUS_DISABLED {
            return Err(AdminError::AccountDisabled);
        }

        Ok(Identity::from(employee))
    }
}

#[async_trait]
impl EmployeeService for InMemoryEmployees {
    async fn save(&self, employee: EmployeeDTO) -> Result<(), AdminError> {
        require("username", &employee.username)?;
        require("name", &employee.name)?;

        let password = self.hash(DEFAULT_PASSWORD)?;
        let mut storage = self.storage.write().await;

        if username_taken(&storage, &employee.username, None) {
            return Err(AdminError::DuplicateIdentity(employee.username));
        }

        let id = EmployeeID(storage.next_id);
        storage.next_id += 1;

        let now = Utc::now();
        storage.employees.insert(
            id,
            Employee {
                id,
                username: employee.username,
                name: employee.name,
                password,
                phone: employee.phone.unwrap_or_default(),
                sex: employee.sex.unwrap_or_default(),
                id_number: employee.id_number.unwrap_or_default(),
                status: STATUS_ENABLED,
                create_time: now,
                update_time: now,
            },
        );

        Ok(())
    }

    async fn page_query(
        &self,
        query: EmployeePageQuery,
    ) -> Result<PageResult<Employee>, AdminError> {
        if query.page < 1 {
            return Err(AdminError::Validation("page must be at least 1".into()));
        }
        if query.page_size < 1 {
            return Err(AdminError::Validation("pageSize must be at least 1".into()));
        }

        let storage = self.storage.read().await;
        let name = query.name.as_deref().map(str::trim).unwrap_or_default();

        // ids are handed out in creation order, so newest first is descending id
        let matching: Vec<&Employee> = storage
            .employees
            .values()
            .rev()
            .filter(|employee| employee.name.contains(name))
            .collect();

        let skip = (query.page as usize - 1).saturating_mul(query.page_size as usize);
        let records = matching
            .iter()
            .skip(skip)
            .take(query.page_size as usize)
            .map(|employee| (*employee).clone())
            .collect();

        Ok(PageResult {
            total: matching.len() as u64,
            records,
        })
    }

    async fn start_or_stop(&self, status: i32, id: EmployeeID) -> Result<(), AdminError> {
        if status != STATUS_ENABLED && status != STATUS_DISABLED {
            return Err(AdminError::Validation(format!(
                "status must be {STATUS_ENABLED} or {STATUS_DISABLED}, got {status}"
            )));
        }

        let mut storage = self.storage.write().await;
        let employee = storage
            .employees
            .get_mut(&id)
            .ok_or(AdminError::NotFound)?;

        employee.status = status;
        employee.update_time = Utc::now();

        Ok(())
    }

    async fn get_by_id(&self, id: EmployeeID) -> Result<Employee, AdminError> {
        self.storage
            .read()
            .await
            .employees
            .get(&id)
            .cloned()
            .ok_or(AdminError::NotFound)
    }

    async fn update(&self, employee: EmployeeDTO) -> Result<(), AdminError> {
        let id = employee
            .id
            .ok_or_else(|| AdminError::Validation("id is required for update".into()))?;
        require("username", &employee.username)?;
        require("name", &employee.name)?;

        let mut storage = self.storage.write().await;

        if !storage.employees.contains_key(&id) {
            return Err(AdminError::NotFound);
        }
        if username_taken(&storage, &employee.username, Some(id)) {
            return Err(AdminError::DuplicateIdentity(employee.username));
        }

        if let Some(stored) = storage.employees.get_mut(&id) {
            stored.username = employee.username;
            stored.name = employee.name;
            if let Some(phone) = employee.phone {
                stored.phone = phone;
            }
            if let Some(sex) = employee.sex {
                stored.sex = sex;
            }
            if let Some(id_number) = employee.id_number {
                stored.id_number = id_number;
            }
            stored.update_time = Utc::now();
        }

        Ok(())
    }
}
