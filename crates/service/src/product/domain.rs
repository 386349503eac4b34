use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// Product as stored and returned over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self { id: m.id, name: m.name, price: m.price, stock: m.stock }
    }
}

/// Raw request body for create and update. Fields stay untyped until validated so
/// numeric strings can be coerced; JSON `null` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default, alias = "nomPro", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, alias = "precioProducto", skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, alias = "stockProducto", skip_serializing_if = "Option::is_none")]
    pub stock: Option<Value>,
}

/// Validated fields for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

impl ProductInput {
    /// Require every field and coerce it. Missing fields are reported together.
    pub fn into_new(self) -> Result<NewProduct, ServiceError> {
        let mut missing = Vec::new();
        if self.name.is_none() { missing.push("name"); }
        if self.price.is_none() { missing.push("price"); }
        if self.stock.is_none() { missing.push("stock"); }
        let (Some(name), Some(price), Some(stock)) = (self.name, self.price, self.stock) else {
            return Err(ServiceError::Validation(format!("missing required fields: {}", missing.join(", "))));
        };
        Ok(NewProduct {
            name: coerce_name(&name)?,
            price: coerce_price(&price)?,
            stock: coerce_stock(&stock)?,
        })
    }

    /// Coerce whichever fields are present; absent ones stay `None`.
    pub fn into_patch(self) -> Result<ProductPatch, ServiceError> {
        Ok(ProductPatch {
            name: self.name.as_ref().map(coerce_name).transpose()?,
            price: self.price.as_ref().map(coerce_price).transpose()?,
            stock: self.stock.as_ref().map(coerce_stock).transpose()?,
        })
    }
}

fn coerce_name(v: &Value) -> Result<String, ServiceError> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(ServiceError::Validation("name must not be empty".into())),
        other => Err(ServiceError::Validation(format!("name must be a string, got {other}"))),
    }
}

fn coerce_price(v: &Value) -> Result<f64, ServiceError> {
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|p| p.is_finite())
        .ok_or_else(|| ServiceError::Validation(format!("price must be a number, got {v}")))
}

/// Integers pass through; fractional numbers truncate toward zero. Values outside `i64` are rejected.
fn coerce_stock(v: &Value) -> Result<i64, ServiceError> {
    let truncate = |f: f64| {
        let t = f.trunc();
        (t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
    };
    let parsed = match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    };
    parsed.ok_or_else(|| ServiceError::Validation(format!("stock must be an integer, got {v}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(v: Value) -> ProductInput {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let p = input(json!({"name": "Widget", "price": "12.5", "stock": "7"})).into_new().unwrap();
        assert_eq!(p, NewProduct { name: "Widget".into(), price: 12.5, stock: 7 });
    }

    #[test]
    fn fractional_stock_truncates() {
        let p = input(json!({"name": "W", "price": 1, "stock": 3.9})).into_new().unwrap();
        assert_eq!(p.stock, 3);
        let p = input(json!({"name": "W", "price": 1, "stock": "-2.5"})).into_new().unwrap();
        assert_eq!(p.stock, -2);
    }

    #[test]
    fn missing_fields_are_listed_together() {
        let err = input(json!({"name": "Widget"})).into_new().unwrap_err();
        assert_eq!(err.to_string(), "validation error: missing required fields: price, stock");
        let err = input(json!({})).into_new().unwrap_err();
        assert_eq!(err.to_string(), "validation error: missing required fields: name, price, stock");
    }

    #[test]
    fn null_counts_as_missing() {
        let err = input(json!({"name": "Widget", "price": null, "stock": 1})).into_new().unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn malformed_values_are_rejected() {
        for body in [
            json!({"name": "", "price": 1, "stock": 1}),
            json!({"name": 5, "price": 1, "stock": 1}),
            json!({"name": "W", "price": "abc", "stock": 1}),
            json!({"name": "W", "price": "NaN", "stock": 1}),
            json!({"name": "W", "price": true, "stock": 1}),
            json!({"name": "W", "price": 1, "stock": "many"}),
            json!({"name": "W", "price": 1, "stock": [1]}),
        ] {
            let err = input(body.clone()).into_new().unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{body} should fail validation");
        }
    }

    #[test]
    fn out_of_range_stock_is_rejected() {
        for stock in [json!(1e30), json!(18446744073709551615u64), json!("1e30"), json!(-1e30)] {
            let err = input(json!({"name": "W", "price": 1, "stock": stock})).into_new().unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{stock} should be out of range");
        }
        let p = input(json!({"name": "W", "price": 1, "stock": i64::MIN})).into_new().unwrap();
        assert_eq!(p.stock, i64::MIN);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let p = input(json!({"nomPro": "Old", "precioProducto": 29.99, "stockProducto": 10})).into_new().unwrap();
        assert_eq!(p, NewProduct { name: "Old".into(), price: 29.99, stock: 10 });
    }

    #[test]
    fn patch_keeps_absent_fields_none() {
        let patch = input(json!({"stock": 3})).into_patch().unwrap();
        assert_eq!(patch, ProductPatch { name: None, price: None, stock: Some(3) });
        assert!(input(json!({})).into_patch().unwrap().is_empty());
    }

    #[test]
    fn patch_rejects_malformed_present_fields() {
        assert!(input(json!({"price": "cheap"})).into_patch().is_err());
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let mut p = Product { id: 1, name: "Widget".into(), price: 9.99, stock: 5 };
        ProductPatch { stock: Some(3), ..Default::default() }.apply(&mut p);
        assert_eq!(p, Product { id: 1, name: "Widget".into(), price: 9.99, stock: 3 });
    }
}
