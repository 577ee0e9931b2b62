#[derive(Debug, PartialEq)]
pub enum CheckoutError {
    MissingField(&'static str),
    InvalidQuantity { available: i32 },
    ProductUnavailable,
    InsufficientStock,
    DatabaseError,
}

impl std::error::Error for CheckoutError {}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::MissingField(field) => write!(f, "Missing required field: {}", field),
            CheckoutError::InvalidQuantity { available } => {
                write!(f, "Invalid quantity. Maximum available: {}", available)
            }
            CheckoutError::ProductUnavailable => {
                write!(f, "Product not available or out of stock")
            }
            CheckoutError::InsufficientStock => {
                write!(f, "Not enough stock left to cover the order")
            }
            CheckoutError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    OrderNotFound,
    PermissionDenied,
    NotCancellable,
    NotDeletable,
    InvalidStatusTransition,
    DatabaseError,
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::PermissionDenied => write!(f, "Permission denied"),
            OrderServiceError::NotCancellable => {
                write!(f, "Only pending orders can be cancelled")
            }
            OrderServiceError::NotDeletable => {
                write!(f, "Only cancelled or delivered orders can be deleted")
            }
            OrderServiceError::InvalidStatusTransition => {
                write!(f, "Invalid status transition")
            }
            OrderServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ProductServiceError {
    MissingField(&'static str),
    InvalidPrice,
    InvalidStock,
    InvalidCondition,
    InvalidCategory,
    ProductNotFound,
    PermissionDenied,
    DatabaseError,
}

impl std::error::Error for ProductServiceError {}

impl std::fmt::Display for ProductServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductServiceError::MissingField(field) => {
                write!(f, "Missing required field: {}", field)
            }
            ProductServiceError::InvalidPrice => write!(f, "Price must be greater than zero"),
            ProductServiceError::InvalidStock => {
                write!(f, "Stock quantity cannot be negative")
            }
            ProductServiceError::InvalidCondition => write!(f, "Unknown product condition"),
            ProductServiceError::InvalidCategory => {
                write!(f, "Products must attach to an existing leaf category")
            }
            ProductServiceError::ProductNotFound => write!(f, "Product not found"),
            ProductServiceError::PermissionDenied => write!(f, "Permission denied"),
            ProductServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CatalogError {
    DatabaseError,
}

impl std::error::Error for CatalogError {}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UserServiceError {
    MissingField(&'static str),
    PasswordTooShort,
    PasswordMismatch,
    InvalidRole,
    DuplicateUser,
    DuplicateEmail,
    InvalidCredentials,
    AccountDisabled,
    WrongPassword,
    UserNotFound,
    AuthFailure,
    DatabaseError,
}

impl std::error::Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserServiceError::MissingField(field) => {
                write!(f, "Missing required field: {}", field)
            }
            UserServiceError::PasswordTooShort => {
                write!(f, "Password must be at least 6 characters")
            }
            UserServiceError::PasswordMismatch => write!(f, "Passwords do not match"),
            UserServiceError::InvalidRole => write!(f, "Role must be buyer or seller"),
            UserServiceError::DuplicateUser => {
                write!(f, "Username or email already exists")
            }
            UserServiceError::DuplicateEmail => write!(f, "Email already in use"),
            UserServiceError::InvalidCredentials => {
                write!(f, "Invalid username or password")
            }
            UserServiceError::AccountDisabled => write!(f, "Account is deactivated"),
            UserServiceError::WrongPassword => write!(f, "Current password is incorrect"),
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::AuthFailure => write!(f, "Authentication processing failed"),
            UserServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}
