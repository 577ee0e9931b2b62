use crate::data::models::user::User;
use crate::services::user_service::DashboardStats;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub role: String,
    pub member_since: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            address: user.address,
            city: user.city,
            role: user.role,
            member_since: user.created_at.map(|dt| dt.format("%d/%m/%Y").to_string()),
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_orders: usize,
    pub total_spent: BigDecimal,
    pub total_products: Option<usize>,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_spent: stats.total_spent,
            total_products: stats.total_products,
        }
    }
}
