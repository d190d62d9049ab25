use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient_id, null_as_default};
use crate::config::ApiConfig;
use crate::normalize::parse_amount;

/// Catalogue product, as far as a sale row needs it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<i64>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub unit_short_name: Option<String>,
    #[serde(default)]
    pub sale_price: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSaleProduct {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub sale_id: Option<i64>,
    pub product_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<i64>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub unit_short_name: Option<String>,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub price: Value,
}

/// A product line of a sale. Rows that have not been saved yet carry no `id`
/// or `sale_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleProduct {
    pub id: Option<i64>,
    pub sale_id: Option<i64>,
    pub product_id: i64,
    pub product_name: String,
    pub product_image: Option<String>,
    pub unit_id: Option<i64>,
    pub unit_name: Option<String>,
    pub unit_short_name: Option<String>,
    pub quantity: f64,
    pub price: f64,
}

impl SaleProduct {
    /// New unsaved row for `product`. A `default_row` starts at quantity 1 and
    /// the product's sale price; otherwise both are zero.
    pub fn from_product(product: &ProductRecord, default_row: bool) -> Self {
        let (quantity, price) = if default_row {
            (1.0, parse_amount(&product.sale_price))
        } else {
            (0.0, 0.0)
        };
        Self {
            id: None,
            sale_id: None,
            product_id: product.id,
            product_name: product.name.clone(),
            product_image: product.image.clone(),
            unit_id: product.unit_id,
            unit_name: product.unit_name.clone(),
            unit_short_name: product.unit_short_name.clone(),
            quantity,
            price,
        }
    }

    /// Public URL of the product image under the asset host's `storage/`.
    pub fn img_url(&self, config: &ApiConfig) -> Option<String> {
        self.product_image
            .as_deref()
            .filter(|image| !image.is_empty())
            .map(|image| format!("{}/storage/{image}", config.asset_base_url()))
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.price
    }
}

impl From<RawSaleProduct> for SaleProduct {
    fn from(raw: RawSaleProduct) -> Self {
        Self {
            id: raw.id,
            sale_id: raw.sale_id,
            product_id: raw.product_id,
            product_name: raw.product_name,
            product_image: raw.product_image,
            unit_id: raw.unit_id,
            unit_name: raw.unit_name,
            unit_short_name: raw.unit_short_name,
            quantity: parse_amount(&raw.quantity),
            price: parse_amount(&raw.price),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product() -> ProductRecord {
        serde_json::from_value(json!({
            "id": 42,
            "name": "Цемент М500",
            "image": "products/cement.png",
            "unit_id": 3,
            "unit_name": "Мешок",
            "unit_short_name": "меш",
            "sale_price": "450.00"
        }))
        .unwrap()
    }

    #[test]
    fn default_row_takes_one_unit_at_sale_price() {
        let row = SaleProduct::from_product(&product(), true);
        assert_eq!(row.id, None);
        assert_eq!(row.sale_id, None);
        assert_eq!(row.product_id, 42);
        assert_eq!(row.unit_short_name.as_deref(), Some("меш"));
        assert_eq!(row.quantity, 1.0);
        assert_eq!(row.price, 450.0);
        assert_eq!(row.line_total(), 450.0);
    }

    #[test]
    fn blank_row_is_zeroed() {
        let row = SaleProduct::from_product(&product(), false);
        assert_eq!(row.quantity, 0.0);
        assert_eq!(row.price, 0.0);
    }

    #[test]
    fn image_url_uses_asset_host() {
        let config = ApiConfig::new("http://api.local").with_asset_base_url("http://cdn.local/");
        let row = SaleProduct::from_product(&product(), false);
        assert_eq!(
            row.img_url(&config).as_deref(),
            Some("http://cdn.local/storage/products/cement.png")
        );
    }

    #[test]
    fn no_image_means_no_url() {
        let config = ApiConfig::default();
        let mut row = SaleProduct::from_product(&product(), false);
        row.product_image = Some(String::new());
        assert_eq!(row.img_url(&config), None);
        row.product_image = None;
        assert_eq!(row.img_url(&config), None);
    }

    #[test]
    fn builds_from_wire_row() {
        let raw: RawSaleProduct = serde_json::from_value(json!({
            "id": 1,
            "sale_id": 7,
            "product_id": 42,
            "product_name": "Цемент М500",
            "quantity": "2",
            "price": 450
        }))
        .unwrap();
        let row = SaleProduct::from(raw);
        assert_eq!(row.sale_id, Some(7));
        assert_eq!(row.line_total(), 900.0);
    }
}
