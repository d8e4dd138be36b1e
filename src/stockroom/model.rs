use crate::store::Record;
use crate::validation::is_valid_price;
use serde::{Deserialize, Deserializer, Serialize};

pub const ADMIN_ROLE: &str = "admin";
pub const DEFAULT_ROLE: &str = "user";

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn positive_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = f64::deserialize(deserializer)?;
    if is_valid_price(price) {
        Ok(price)
    } else {
        Err(serde::de::Error::custom(format!(
            "price must be a finite number greater than 0, got {}",
            price
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
    #[serde(deserialize_with = "positive_price")]
    pub price: f64,
    pub stock_quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    // Plaintext, compared verbatim at login.
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: String,
    pub name: String,
    pub permission_level: String,
}

/// Fields of a product that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Category,
    StockQuantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Username,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleField {
    Id,
    Name,
    PermissionLevel,
}

/// Partial product update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    pub name: Option<String>,
    pub permission_level: Option<String>,
}

fn merge<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

impl Record for Product {
    type Field = ProductField;
    type Patch = ProductPatch;
    const ENTITY: &'static str = "Product";

    fn key(&self) -> &str {
        &self.product_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn field_text(&self, field: ProductField) -> String {
        match field {
            ProductField::Id => self.product_id.clone(),
            ProductField::Name => self.name.clone(),
            ProductField::Category => self.category.clone(),
            ProductField::StockQuantity => self.stock_quantity.to_string(),
        }
    }

    fn apply(&mut self, patch: &ProductPatch) {
        merge(&mut self.name, &patch.name);
        merge(&mut self.category, &patch.category);
        merge(&mut self.price, &patch.price);
        merge(&mut self.stock_quantity, &patch.stock_quantity);
    }
}

impl Record for User {
    type Field = UserField;
    type Patch = UserPatch;
    const ENTITY: &'static str = "User";

    fn key(&self) -> &str {
        &self.user_id
    }

    fn label(&self) -> &str {
        &self.username
    }

    fn field_text(&self, field: UserField) -> String {
        match field {
            UserField::Id => self.user_id.clone(),
            UserField::Username => self.username.clone(),
            UserField::Role => self.role.clone(),
        }
    }

    fn apply(&mut self, patch: &UserPatch) {
        merge(&mut self.username, &patch.username);
        merge(&mut self.password, &patch.password);
        merge(&mut self.role, &patch.role);
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl Record for Role {
    type Field = RoleField;
    type Patch = RolePatch;
    const ENTITY: &'static str = "Role";

    fn key(&self) -> &str {
        &self.role_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn field_text(&self, field: RoleField) -> String {
        match field {
            RoleField::Id => self.role_id.clone(),
            RoleField::Name => self.name.clone(),
            RoleField::PermissionLevel => self.permission_level.clone(),
        }
    }

    fn apply(&mut self, patch: &RolePatch) {
        merge(&mut self.name, &patch.name);
        merge(&mut self.permission_level, &patch.permission_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_defaults_when_absent() {
        let user: User =
            serde_json::from_str(r#"{"user_id": "U1", "username": "ann", "password": "pw"}"#)
                .unwrap();
        assert_eq!(user.role, DEFAULT_ROLE);
        assert!(!user.is_admin());
    }

    #[test]
    fn product_rejects_negative_stock_on_load() {
        let parsed: Result<Product, _> = serde_json::from_str(
            r#"{"product_id": "P1", "name": "W", "category": "T", "price": 1.0, "stock_quantity": -2}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn product_rejects_nonpositive_price_on_load() {
        for price in ["0", "-5", "0.0"] {
            let json = format!(
                r#"{{"product_id": "P1", "name": "W", "category": "T", "price": {}, "stock_quantity": 2}}"#,
                price
            );
            let parsed: Result<Product, _> = serde_json::from_str(&json);
            let err = parsed.unwrap_err().to_string();
            assert!(err.contains("price must be a finite number greater than 0"), "{}", err);
        }

        let ok: Product = serde_json::from_str(
            r#"{"product_id": "P1", "name": "W", "category": "T", "price": 0.5, "stock_quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(ok.price, 0.5);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut product = Product {
            product_id: "P1".into(),
            name: "Widget".into(),
            category: "Tools".into(),
            price: 9.99,
            stock_quantity: 5,
        };
        product.apply(&ProductPatch {
            stock_quantity: Some(3),
            ..Default::default()
        });
        assert_eq!(product.stock_quantity, 3);
        assert_eq!(product.price, 9.99);
        assert_eq!(product.name, "Widget");
    }

    #[test]
    fn role_keyed_by_role_id() {
        let role = Role {
            role_id: "R1".into(),
            name: "admin".into(),
            permission_level: "full".into(),
        };
        assert_eq!(role.key(), "R1");
        assert_eq!(role.label(), "admin");
    }
}
