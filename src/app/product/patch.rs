//! 商品部分更新
//!
//! 所有字段都是可选的，出现的字段按与创建时相同的约束检查。合并后的完整记录
//! 会再走一遍 `rules::validate_product`，业务规则只针对合并结果判断。
//! SKU 与卖家 id 不可修改，请求体中出现未知字段（包括这两个）直接拒绝。

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{Currency, ProductData};
use super::rules;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DimensionsPatch {
    #[validate(range(exclusive_min = 0.0, message = "length must be greater than 0"))]
    pub length: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "width must be greater than 0"))]
    pub width: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "height must be greater than 0"))]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SellerPatch {
    #[validate(length(min = 2, max = 60, message = "seller name must be 2-60 characters"))]
    pub name: Option<String>,
    #[validate(
        email(message = "seller email is not a valid email address"),
        custom(function = "rules::validate_seller_email_domain")
    )]
    pub email: Option<String>,
    #[validate(url(message = "seller website is not a valid URL"))]
    pub website: Option<String>,
}

/// 更新请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    #[validate(length(min = 3, max = 80, message = "name must be 3-80 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 200, message = "description must be at most 200 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 3, max = 30, message = "category must be 3-30 characters"))]
    pub category: Option<String>,
    #[validate(length(min = 2, max = 40, message = "brand must be 2-40 characters"))]
    pub brand: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be greater than 0"))]
    pub price: Option<f64>,
    pub currency: Option<Currency>,
    #[validate(range(min = 0, max = 90, message = "discount_percent must be between 0 and 90"))]
    pub discount_percent: Option<i64>,
    #[validate(range(min = 0, message = "stock must be 0 or more"))]
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(length(max = 10, message = "at most 10 tags are allowed"))]
    pub tags: Option<Vec<String>>,
    #[validate(
        length(min = 1, message = "at least 1 image url is required"),
        custom(function = "rules::validate_image_urls")
    )]
    pub image_urls: Option<Vec<String>>,
    #[validate(nested)]
    pub dimensions_cm: Option<DimensionsPatch>,
    #[validate(nested)]
    pub seller: Option<SellerPatch>,
}

impl ProductPatch {
    /// 将出现的字段覆盖到已有数据上
    pub fn apply_to(self, data: &mut ProductData) {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(category) = self.category {
            data.category = category;
        }
        if let Some(brand) = self.brand {
            data.brand = brand;
        }
        if let Some(price) = self.price {
            data.price = price;
        }
        if let Some(currency) = self.currency {
            data.currency = currency;
        }
        if let Some(discount_percent) = self.discount_percent {
            data.discount_percent = discount_percent;
        }
        if let Some(stock) = self.stock {
            data.stock = stock;
        }
        if let Some(is_active) = self.is_active {
            data.is_active = is_active;
        }
        if let Some(rating) = self.rating {
            data.rating = rating;
        }
        if let Some(tags) = self.tags {
            data.tags = Some(tags);
        }
        if let Some(image_urls) = self.image_urls {
            data.image_urls = image_urls;
        }
        if let Some(dims) = self.dimensions_cm {
            let target = &mut data.dimensions_cm;
            target.length = dims.length.unwrap_or(target.length);
            target.width = dims.width.unwrap_or(target.width);
            target.height = dims.height.unwrap_or(target.height);
        }
        if let Some(seller) = self.seller {
            let target = &mut data.seller;
            if let Some(name) = seller.name {
                target.name = name;
            }
            if let Some(email) = seller.email {
                target.email = email;
            }
            if let Some(website) = seller.website {
                target.website = website;
            }
        }
    }
}
