use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::JwtProperties,
    error::AdminError,
    token::TokenSigner,
    types::{
        ClaimMap, Credentials, Employee, EmployeeDTO, EmployeeID, EmployeePageQuery, Identity,
        LoginView, PageResult, EMP_ID_CLAIM,
    },
};

#[async_trait]
pub trait AuthenticationService: Send + Sync + 'static {
    /// Verify the credentials and return the matching identity. Fails with
    /// [`AdminError::InvalidCredentials`] or [`AdminError::AccountDisabled`].
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AdminError>;
}

#[async_trait]
pub trait EmployeeService: Send + Sync + 'static {
    async fn save(&self, employee: EmployeeDTO) -> Result<(), AdminError>;

    async fn page_query(
        &self,
        query: EmployeePageQuery,
    ) -> Result<PageResult<Employee>, AdminError>;

    /// Enable or disable an account. The status flag is passed through as received.
    async fn start_or_stop(&self, status: i32, id: EmployeeID) -> Result<(), AdminError>;

    async fn get_by_id(&self, id: EmployeeID) -> Result<Employee, AdminError>;

    async fn update(&self, employee: EmployeeDTO) -> Result<(), AdminError>;
}

#[derive(Clone)]
pub struct AdminConfig {
    pub jwt: JwtProperties,
    pub signer: Arc<dyn TokenSigner>,
    pub authentication: Arc<dyn AuthenticationService>,
    pub employees: Arc<dyn EmployeeService>,
}

pub(crate) struct AdminInternal {
    config: AdminConfig,
}

impl AdminInternal {
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginView, AdminError> {
        let identity = self.config.authentication.authenticate(credentials).await?;

        let mut claims = ClaimMap::new();
        claims.insert(EMP_ID_CLAIM.to_owned(), identity.id.0.into());

        let token = self.config.signer.sign(
            &self.config.jwt.admin_secret_key,
            self.config.jwt.admin_ttl,
            &claims,
        )?;

        Ok(LoginView {
            id: identity.id,
            user_name: identity.username,
            name: identity.name,
            token,
        })
    }

    pub fn employees(&self) -> &dyn EmployeeService {
        self.config.employees.as_ref()
    }
}

#[derive(Clone)]
pub struct Admin {
    pub(crate) internal: Arc<AdminInternal>,
}

impl Admin {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            internal: Arc::new(AdminInternal { config }),
        }
    }

    /// Authenticate `credentials` and issue an admin token carrying the employee id.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginView, AdminError> {
        self.internal.login(credentials).await
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use serde_json::json;

    use super::*;
    use crate::{token::JwtSigner, types::TokenClaims};

    struct FixedAuthentication;

    #[async_trait]
    impl AuthenticationService for FixedAuthentication {
        async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AdminError> {
            match (credentials.username.as_str(), credentials.password.as_str()) {
                ("admin", "123456") => Ok(Identity {
                    id: EmployeeID(1),
                    username: "admin".into(),
                    name: "Administrator".into(),
                }),
                ("frozen", _) => Err(AdminError::AccountDisabled),
                _ => Err(AdminError::InvalidCredentials),
            }
        }
    }

    #[derive(Default)]
    struct CountingSigner {
        calls: AtomicUsize,
    }

    impl TokenSigner for CountingSigner {
        fn sign(
            &self,
            secret: &str,
            ttl: Duration,
            claims: &ClaimMap,
        ) -> Result<String, AdminError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            JwtSigner.sign(secret, ttl, claims)
        }

        fn parse(&self, secret: &str, token: &str) -> Result<TokenClaims, AdminError> {
            JwtSigner.parse(secret, token)
        }
    }

    struct NoEmployees;

    #[async_trait]
    impl EmployeeService for NoEmployees {
        async fn save(&self, _employee: EmployeeDTO) -> Result<(), AdminError> {
            Ok(())
        }

        async fn page_query(
            &self,
            _query: EmployeePageQuery,
        ) -> Result<PageResult<Employee>, AdminError> {
            Ok(PageResult {
                total: 0,
                records: vec![],
            })
        }

        async fn start_or_stop(&self, _status: i32, _id: EmployeeID) -> Result<(), AdminError> {
            Err(AdminError::NotFound)
        }

        async fn get_by_id(&self, _id: EmployeeID) -> Result<Employee, AdminError> {
            Err(AdminError::NotFound)
        }

        async fn update(&self, _employee: EmployeeDTO) -> Result<(), AdminError> {
            Err(AdminError::NotFound)
        }
    }

    fn admin_with(signer: Arc<CountingSigner>) -> Admin {
        Admin::new(AdminConfig {
            jwt: JwtProperties {
                admin_secret_key: "itcast".into(),
                admin_ttl: Duration::from_millis(7_200_000),
            },
            signer,
            authentication: Arc::new(FixedAuthentication),
            employees: Arc::new(NoEmployees),
        })
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn login_embeds_exactly_the_employee_id() {
        let signer = Arc::new(CountingSigner::default());
        let admin = admin_with(signer.clone());

        let view = admin.login(&credentials("admin", "123456")).await.unwrap();

        assert_eq!(view.id, EmployeeID(1));
        assert_eq!(view.user_name, "admin");
        assert_eq!(view.name, "Administrator");
        assert_eq!(signer.calls.load(Ordering::SeqCst), 1);

        let parsed = JwtSigner.parse("itcast", &view.token).unwrap();
        let mut expected = ClaimMap::new();
        expected.insert(EMP_ID_CLAIM.to_owned(), json!(1));
        assert_eq!(parsed.claims, expected);
    }

    #[tokio::test]
    async fn rejected_credentials_never_reach_the_signer() {
        let signer = Arc::new(CountingSigner::default());
        let admin = admin_with(signer.clone());

        assert!(matches!(
            admin.login(&credentials("admin", "hunter1")).await,
            Err(AdminError::InvalidCredentials)
        ));
        assert!(matches!(
            admin.login(&credentials("frozen", "123456")).await,
            Err(AdminError::AccountDisabled)
        ));
        assert_eq!(signer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_credentials_are_left_to_the_authentication_service() {
        let admin = admin_with(Arc::new(CountingSigner::default()));

        assert!(matches!(
            admin.login(&credentials("", "")).await,
            Err(AdminError::InvalidCredentials)
        ));
    }
}
