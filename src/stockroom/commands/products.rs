use crate::commands::helpers::{delete_confirmed, empty_listing_message, label_of, select};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Product, ProductField, ProductPatch};
use crate::store::{ProductStore, StorageBackend};
use crate::validation::{validate_fields, FieldValue, ValidationError};

const INVALID_STOCK_FILTER: &str = "Please enter a valid stock quantity number.";

/// How a product listing is narrowed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Id(String),
    Name(String),
    Category(String),
    /// Exact match; the raw text must parse as an integer.
    StockQuantity(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Fields to change on an existing product. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }
}

pub fn list<B: StorageBackend>(
    store: &ProductStore<B>,
    filter: Option<&ProductFilter>,
) -> Result<CmdResult> {
    let products = match filter {
        None => select(store, None),
        Some(ProductFilter::Id(q)) => select(store, Some((q.as_str(), ProductField::Id))),
        Some(ProductFilter::Name(q)) => select(store, Some((q.as_str(), ProductField::Name))),
        Some(ProductFilter::Category(q)) => {
            select(store, Some((q.as_str(), ProductField::Category)))
        }
        Some(ProductFilter::StockQuantity(raw)) => {
            let wanted: i64 = raw
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidInput(INVALID_STOCK_FILTER.to_string()))?;
            store
                .records()
                .iter()
                .filter(|p| i64::try_from(p.stock_quantity).ok() == Some(wanted))
                .cloned()
                .collect()
        }
    };

    let mut result = CmdResult::default();
    if products.is_empty() {
        result.add_message(empty_listing_message("products"));
    }
    Ok(result.with_products(products))
}

pub fn add<B: StorageBackend>(store: &mut ProductStore<B>, new: NewProduct) -> Result<CmdResult> {
    validate_fields(&[
        ("product_id", FieldValue::from(&new.product_id)),
        ("name", FieldValue::from(&new.name)),
        ("category", FieldValue::from(&new.category)),
        ("price", FieldValue::from(new.price)),
        ("stock_quantity", FieldValue::from(new.stock_quantity)),
    ])?;

    let product = Product {
        product_id: new.product_id,
        name: new.name,
        category: new.category,
        price: new.price,
        stock_quantity: stock_from(new.stock_quantity)?,
    };
    store.add(product.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product '{}' added successfully!",
        product.name
    )));
    Ok(result.with_products(vec![product]))
}

pub fn update<B: StorageBackend>(
    store: &mut ProductStore<B>,
    product_id: &str,
    changes: ProductChanges,
) -> Result<CmdResult> {
    label_of(store, product_id)?;

    let mut result = CmdResult::default();
    if changes.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let mut fields: Vec<(&str, FieldValue<'_>)> = Vec::new();
    if let Some(name) = &changes.name {
        fields.push(("name", name.into()));
    }
    if let Some(category) = &changes.category {
        fields.push(("category", category.into()));
    }
    if let Some(price) = changes.price {
        fields.push(("price", price.into()));
    }
    if let Some(stock) = changes.stock_quantity {
        fields.push(("stock_quantity", stock.into()));
    }
    validate_fields(&fields)?;

    let patch = ProductPatch {
        name: changes.name,
        category: changes.category,
        price: changes.price,
        stock_quantity: changes.stock_quantity.map(stock_from).transpose()?,
    };
    let updated = store.update(product_id, &patch)?.clone();

    result.add_message(CmdMessage::success(format!(
        "Product '{}' updated successfully!",
        updated.name
    )));
    Ok(result.with_products(vec![updated]))
}

pub fn delete<B: StorageBackend>(
    store: &mut ProductStore<B>,
    product_id: &str,
    confirmed: bool,
) -> Result<CmdResult> {
    delete_confirmed(store, product_id, confirmed)
}

fn stock_from(value: i64) -> std::result::Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::InvalidStock)
}
