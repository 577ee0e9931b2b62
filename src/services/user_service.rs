use crate::data::models::user::{NewUser, UpdateUser, User};
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::auth::AuthService;
use crate::security::identity::{Identity, UserRole};
use crate::security::jwt::JwtService;
use crate::services::errors::UserServiceError;
use crate::services::order_service::OrderStatus;
use bigdecimal::BigDecimal;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Landing-page counters for the signed-in account.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub total_spent: BigDecimal,
    pub total_products: Option<usize>,
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService
    }

    pub async fn register(&self, input: RegisterInput) -> Result<(), UserServiceError> {
        if input.username.trim().is_empty() {
            return Err(UserServiceError::MissingField("username"));
        }
        if input.email.trim().is_empty() {
            return Err(UserServiceError::MissingField("email"));
        }
        if input.full_name.trim().is_empty() {
            return Err(UserServiceError::MissingField("full_name"));
        }
        if input.password.len() < 6 {
            return Err(UserServiceError::PasswordTooShort);
        }
        if input.password != input.confirm_password {
            return Err(UserServiceError::PasswordMismatch);
        }
        let role: UserRole = input
            .role
            .parse()
            .map_err(|_| UserServiceError::InvalidRole)?;

        let repo = UserRepo::new();
        if repo
            .credentials_taken(&input.username, &input.email, None)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
        {
            return Err(UserServiceError::DuplicateUser);
        }

        let auth = AuthService::new();
        let password_hash = auth
            .hash_password(&input.password)
            .await
            .map_err(|_| UserServiceError::AuthFailure)?;

        let new_user = NewUser {
            username: &input.username,
            email: &input.email,
            password_hash: &password_hash,
            full_name: &input.full_name,
            phone: input.phone.as_deref(),
            address: input.address.as_deref(),
            city: input.city.as_deref(),
            role: role.as_str(),
        };

        repo.add(new_user).await.map_err(|e| {
            tracing::error!("registration failed: {}", e);
            UserServiceError::DatabaseError
        })?;

        tracing::info!(username = %input.username, "user registered");
        Ok(())
    }

    /// Authenticates by username or email and issues an access token.
    pub async fn login(
        &self,
        login: &str,
        password: &str,
    ) -> Result<(String, User), UserServiceError> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(UserServiceError::MissingField("username"));
        }

        let repo = UserRepo::new();
        let user = repo
            .get_by_login(login)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .ok_or(UserServiceError::InvalidCredentials)?;

        if !user.is_active {
            return Err(UserServiceError::AccountDisabled);
        }

        let auth = AuthService::new();
        let verified = auth
            .verify_password(password, &user.password_hash)
            .await
            .map_err(|_| UserServiceError::AuthFailure)?;
        if !verified {
            return Err(UserServiceError::InvalidCredentials);
        }

        repo.touch_last_login(user.user_id)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?;

        let token = JwtService::new()
            .generate_token(&user)
            .map_err(|_| UserServiceError::AuthFailure)?;

        tracing::info!(user_id = user.user_id, "login successful");
        Ok((token, user))
    }

    pub async fn profile(&self, identity: Identity) -> Result<User, UserServiceError> {
        let repo = UserRepo::new();
        repo.get_by_id(identity.user_id)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .ok_or(UserServiceError::UserNotFound)
    }

    pub async fn update_profile(
        &self,
        identity: Identity,
        input: UpdateProfileInput,
    ) -> Result<(), UserServiceError> {
        let repo = UserRepo::new();

        // Nothing to do if the form came back empty.
        if input.email.is_none()
            && input.full_name.is_none()
            && input.phone.is_none()
            && input.address.is_none()
            && input.city.is_none()
        {
            return Ok(());
        }

        if let Some(email) = &input.email {
            if email.trim().is_empty() {
                return Err(UserServiceError::MissingField("email"));
            }
            if repo
                .email_taken(email, identity.user_id)
                .await
                .map_err(|_| UserServiceError::DatabaseError)?
            {
                return Err(UserServiceError::DuplicateEmail);
            }
        }

        let update = UpdateUser {
            email: input.email.as_deref(),
            full_name: input.full_name.as_deref(),
            phone: input.phone.as_deref(),
            address: input.address.as_deref(),
            city: input.city.as_deref(),
            password_hash: None,
        };

        repo.update(identity.user_id, update)
            .await
            .map_err(|_| UserServiceError::DatabaseError)
    }

    pub async fn change_password(
        &self,
        identity: Identity,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), UserServiceError> {
        if new_password.len() < 6 {
            return Err(UserServiceError::PasswordTooShort);
        }
        if new_password != confirm {
            return Err(UserServiceError::PasswordMismatch);
        }

        let repo = UserRepo::new();
        let user = repo
            .get_by_id(identity.user_id)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .ok_or(UserServiceError::UserNotFound)?;

        let auth = AuthService::new();
        let verified = auth
            .verify_password(current, &user.password_hash)
            .await
            .map_err(|_| UserServiceError::AuthFailure)?;
        if !verified {
            return Err(UserServiceError::WrongPassword);
        }

        let password_hash = auth
            .hash_password(new_password)
            .await
            .map_err(|_| UserServiceError::AuthFailure)?;

        let update = UpdateUser {
            email: None,
            full_name: None,
            phone: None,
            address: None,
            city: None,
            password_hash: Some(&password_hash),
        };

        repo.update(identity.user_id, update)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?;

        tracing::info!(user_id = identity.user_id, "password changed");
        Ok(())
    }

    /// Account landing counters: order count, delivered spend, and for
    /// sellers the listing count.
    pub async fn dashboard(&self, identity: Identity) -> Result<DashboardStats, UserServiceError> {
        let order_repo = OrderRepo::new();

        let orders = order_repo
            .get_by_user_with_shipping(identity.user_id)
            .await
            .map_err(|_| UserServiceError::DatabaseError)?
            .unwrap_or_default();

        let mut total_spent = BigDecimal::from(0);
        for (order, _) in &orders {
            if order.status.parse() == Ok(OrderStatus::Delivered) {
                total_spent += &order.total_amount;
            }
        }

        let total_products = if identity.is_seller() {
            let product_repo = ProductRepo::new();
            Some(
                product_repo
                    .get_by_seller(identity.user_id)
                    .await
                    .map_err(|_| UserServiceError::DatabaseError)?
                    .map(|rows| rows.len())
                    .unwrap_or(0),
            )
        } else {
            None
        };

        Ok(DashboardStats {
            total_orders: orders.len(),
            total_spent,
            total_products,
        })
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
