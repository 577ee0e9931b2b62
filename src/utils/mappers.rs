use crate::api::controllers::dto::auth_dto::RegisterRequest;
use crate::api::controllers::dto::order_dto::PlaceOrderRequest;
use crate::api::controllers::dto::product_dto::{CatalogQuery, ProductFormRequest};
use crate::api::controllers::dto::user_dto::UpdateProfileRequest;
use crate::data::repos::implementors::product_repo::{ProductFilter, SortKey};
use crate::services::checkout_service::PlaceOrder;
use crate::services::product_service::ProductInput;
use crate::services::user_service::{RegisterInput, UpdateProfileInput};

impl From<RegisterRequest> for RegisterInput {
    fn from(request: RegisterRequest) -> Self {
        RegisterInput {
            username: request.username,
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
            full_name: request.full_name,
            phone: request.phone,
            address: request.address,
            city: request.city,
            role: request.role,
        }
    }
}

impl From<CatalogQuery> for ProductFilter {
    fn from(query: CatalogQuery) -> Self {
        // Unknown sort keys fall back to newest-first rather than erroring.
        let sort = query
            .sort
            .as_deref()
            .and_then(|s| s.parse::<SortKey>().ok())
            .unwrap_or_default();

        ProductFilter {
            search: query.search.filter(|s| !s.trim().is_empty()),
            category_id: query.category.filter(|id| *id > 0),
            condition: query.condition.filter(|c| !c.trim().is_empty()),
            min_price: query.min_price,
            max_price: query.max_price,
            sort,
        }
    }
}

impl From<&ProductFormRequest> for ProductInput {
    fn from(request: &ProductFormRequest) -> Self {
        ProductInput {
            name: request.name.clone(),
            description: request.description.clone(),
            brand: request.brand.clone(),
            model: request.model.clone(),
            color: request.color.clone(),
            condition: request.condition.clone(),
            storage: request.storage.clone(),
            ram: request.ram.clone(),
            battery: request.battery.clone(),
            screen: request.screen.clone(),
            price: request.price.clone(),
            stock_quantity: request.stock_quantity,
            category_id: request.category_id,
            purchase_date: request.purchase_date,
        }
    }
}

impl From<PlaceOrderRequest> for PlaceOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        PlaceOrder {
            product_id: request.product_id,
            quantity: request.quantity,
            payment_method: request.payment_method,
            shipping_address: request.shipping_address,
            phone: request.phone,
            notes: request.notes,
        }
    }
}

impl From<UpdateProfileRequest> for UpdateProfileInput {
    fn from(request: UpdateProfileRequest) -> Self {
        UpdateProfileInput {
            email: request.email,
            full_name: request.full_name,
            phone: request.phone,
            address: request.address,
            city: request.city,
        }
    }
}
