//! 商品数据模型
//!
//! `ProductData` 是客户端可提交的全部字段，`Product` 在其之上附加服务端生成的
//! `id` 与 `created_at`。计算字段只存在于 `ProductView`，既不落盘也不接受输入。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::rules;

/// 币种，目前只支持 INR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
}

/// 商品尺寸（厘米）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Dimensions {
    #[validate(range(exclusive_min = 0.0, message = "length must be greater than 0"))]
    pub length: f64,
    #[validate(range(exclusive_min = 0.0, message = "width must be greater than 0"))]
    pub width: f64,
    #[validate(range(exclusive_min = 0.0, message = "height must be greater than 0"))]
    pub height: f64,
}

impl Dimensions {
    pub fn volume_cm3(&self) -> f64 {
        round2(self.length * self.width * self.height)
    }
}

/// 卖家信息，随商品一起存储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Seller {
    pub id: Uuid,
    #[validate(length(min = 2, max = 60, message = "seller name must be 2-60 characters"))]
    pub name: String,
    #[validate(
        email(message = "seller email is not a valid email address"),
        custom(function = "rules::validate_seller_email_domain")
    )]
    pub email: String,
    #[validate(url(message = "seller website is not a valid URL"))]
    pub website: String,
}

/// 商品的可写字段（创建请求体）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductData {
    #[validate(
        length(min = 6, max = 30, message = "SKU must be 6-30 characters"),
        custom(function = "rules::validate_sku")
    )]
    pub sku: String,
    #[validate(length(min = 3, max = 80, message = "name must be 3-80 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "description must be at most 200 characters"))]
    pub description: String,
    #[validate(length(min = 3, max = 30, message = "category must be 3-30 characters"))]
    pub category: String,
    #[validate(length(min = 2, max = 40, message = "brand must be 2-40 characters"))]
    pub brand: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be greater than 0"))]
    pub price: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    #[validate(range(min = 0, max = 90, message = "discount_percent must be between 0 and 90"))]
    pub discount_percent: i64,
    #[validate(range(min = 0, message = "stock must be 0 or more"))]
    pub stock: i64,
    pub is_active: bool,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f64,
    #[serde(default)]
    #[validate(length(max = 10, message = "at most 10 tags are allowed"))]
    pub tags: Option<Vec<String>>,
    #[validate(
        length(min = 1, message = "at least 1 image url is required"),
        custom(function = "rules::validate_image_urls")
    )]
    pub image_urls: Vec<String>,
    #[validate(nested)]
    pub dimensions_cm: Dimensions,
    #[validate(nested)]
    pub seller: Seller,
}

impl ProductData {
    pub fn final_price(&self) -> f64 {
        round2(self.price * (1.0 - self.discount_percent as f64 / 100.0))
    }
}

/// 持久化的商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: ProductData,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// 为已校验的数据分配 id 与创建时间
    pub fn create(data: ProductData) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
            created_at: Utc::now(),
        }
    }
}

/// 对外返回的商品，带计算字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub final_price: f64,
    pub volume_cm3: f64,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let final_price = product.data.final_price();
        let volume_cm3 = product.data.dimensions_cm.volume_cm3();
        Self {
            product,
            final_price,
            volume_cm3,
        }
    }
}

/// 保留两位小数；放大后溢出的极大值本身已无小数部分，原样返回
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_data() -> ProductData {
        ProductData {
            sku: "XIAO-359GB-001".to_string(),
            name: "Xiaomi Model Pro".to_string(),
            description: "Flagship phone with 359GB storage".to_string(),
            category: "mobiles".to_string(),
            brand: "Xiaomi".to_string(),
            price: 24999.0,
            currency: Currency::Inr,
            discount_percent: 10,
            stock: 25,
            is_active: true,
            rating: 4.3,
            tags: Some(vec!["phone".to_string(), "5g".to_string()]),
            image_urls: vec!["https://cdn.mistore.in/img/xiao-001.png".to_string()],
            dimensions_cm: Dimensions {
                length: 16.2,
                width: 7.5,
                height: 0.9,
            },
            seller: Seller {
                id: Uuid::new_v4(),
                name: "Mi Store".to_string(),
                email: "seller@mistore.in".to_string(),
                website: "https://www.mistore.in".to_string(),
            },
        }
    }

    pub fn sample_product(name: &str, price: f64) -> Product {
        let mut data = sample_data();
        data.name = name.to_string();
        data.price = price;
        Product::create(data)
    }
}
