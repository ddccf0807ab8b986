//! 商品校验规则
//!
//! 校验分两步：先跑 `validator` 派生的字段级检查（长度、范围、URL、邮箱、SKU、
//! 卖家域名），全部通过后再跑跨字段的业务规则。

use std::borrow::Cow;

use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::model::ProductData;
use crate::core::error::FieldViolation;

/// 允许入驻的卖家邮箱域名
pub const ALLOWED_SELLER_DOMAINS: [&str; 10] = [
    "mistore.in",
    "realmeofficial.in",
    "samsungindia.in",
    "lenovostore.in",
    "hpworld.in",
    "applestoreindia.in",
    "dellexclusive.in",
    "sonycenter.in",
    "oneplusstore.in",
    "asusexclusive.in",
];

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// SKU 必须包含 '-'，且最后一段是 3 位数字
pub fn validate_sku(sku: &str) -> Result<(), ValidationError> {
    let Some((_, last)) = sku.rsplit_once('-') else {
        return Err(rule_error("sku_format", "SKU must have '-'".to_string()));
    };

    if last.len() != 3 || !last.bytes().all(|b| b.is_ascii_digit()) {
        return Err(rule_error(
            "sku_format",
            "SKU must end with a 3-digit sequence like -234".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_seller_email_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit('@').next().unwrap_or_default().to_lowercase();
    if ALLOWED_SELLER_DOMAINS.contains(&domain.as_str()) {
        Ok(())
    } else {
        Err(rule_error(
            "seller_domain",
            format!("Seller email domain not allowed: {}", domain),
        ))
    }
}

pub fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    match urls.iter().position(|url| !url.validate_url()) {
        Some(index) => Err(rule_error(
            "url",
            format!("image_urls[{}] is not a valid URL", index),
        )),
        None => Ok(()),
    }
}

/// 跨字段业务规则，只在字段级检查全部通过后调用
pub fn check_business_rules(data: &ProductData) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if data.stock == 0 && data.is_active {
        violations.push(FieldViolation::new(
            "is_active",
            "If stock is 0, is_active must be false",
        ));
    }

    if data.discount_percent > 0 && data.rating == 0.0 {
        violations.push(FieldViolation::new(
            "rating",
            "Discounted product must have a rating (rating != 0)",
        ));
    }

    violations
}

/// 完整校验一条商品数据
pub fn validate_product(data: &ProductData) -> Result<(), Vec<FieldViolation>> {
    if let Err(errors) = data.validate() {
        return Err(collect_violations(&errors));
    }

    let violations = check_business_rules(data);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// 把 `validator` 的嵌套错误展开为按字段路径排序的列表
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    flatten_into("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn flatten_into(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let reason = err
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", err.code));
                    out.push(FieldViolation::new(path.clone(), reason));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten_into(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_into(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}
