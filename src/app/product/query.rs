//! 商品列表查询：名称过滤、按价格排序、分页

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::{CatalogError, CatalogResult};
use super::model::{Product, ProductView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// 列表查询参数
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(length(min = 1, max = 50, message = "name filter must be 1-50 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    pub sort_by_price: bool,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    10
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            name: None,
            sort_by_price: false,
            order: SortOrder::Asc,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub total: usize,
    pub limit: usize,
    pub items: Vec<ProductView>,
}

/// 在完整快照上执行查询
pub fn run(products: Vec<Product>, query: &ListQuery) -> CatalogResult<ProductPage> {
    let mut matched = match query.name.as_deref() {
        Some(name) => {
            let needle = name.trim().to_lowercase();
            products
                .into_iter()
                .filter(|p| p.data.name.to_lowercase().contains(&needle))
                .collect()
        }
        None => products,
    };

    if matched.is_empty() {
        return Err(CatalogError::NoMatch(query.name.clone()));
    }

    // sort_by 是稳定排序，同价商品保持原有相对顺序
    if query.sort_by_price {
        match query.order {
            SortOrder::Asc => matched.sort_by(|a, b| a.data.price.total_cmp(&b.data.price)),
            SortOrder::Desc => matched.sort_by(|a, b| b.data.price.total_cmp(&a.data.price)),
        }
    }

    let total = matched.len();
    let items = matched
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .map(ProductView::from)
        .collect();

    Ok(ProductPage {
        total,
        limit: query.limit,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::fixtures::sample_product;

    fn names(page: &ProductPage) -> Vec<&str> {
        page.items
            .iter()
            .map(|v| v.product.data.name.as_str())
            .collect()
    }

    #[test]
    fn test_name_filter_case_insensitive() {
        let products = vec![
            sample_product("Energy 3Pcs Gadget", 499.0),
            sample_product("Basic Charger", 299.0),
        ];
        let query = ListQuery {
            name: Some("  energy ".to_string()),
            ..Default::default()
        };

        let page = run(products, &query).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(names(&page), vec!["Energy 3Pcs Gadget"]);
    }

    #[test]
    fn test_no_match_is_not_found() {
        let products = vec![sample_product("Basic Charger", 299.0)];
        let query = ListQuery {
            name: Some("zzz".to_string()),
            ..Default::default()
        };

        let err = run(products, &query).unwrap_err();
        assert_eq!(err.to_string(), "No product found matching name=zzz");
    }

    #[test]
    fn test_empty_store_is_not_found() {
        assert!(matches!(
            run(Vec::new(), &ListQuery::default()),
            Err(CatalogError::NoMatch(None))
        ));
    }

    #[test]
    fn test_sort_desc_is_stable() {
        let products = vec![
            sample_product("A", 100.0),
            sample_product("B", 300.0),
            sample_product("C", 100.0),
            sample_product("D", 300.0),
            sample_product("E", 200.0),
        ];
        let query = ListQuery {
            sort_by_price: true,
            order: SortOrder::Desc,
            ..Default::default()
        };

        let page = run(products, &query).unwrap();
        assert_eq!(names(&page), vec!["B", "D", "E", "A", "C"]);
    }

    #[test]
    fn test_sort_asc_is_stable() {
        let products = vec![
            sample_product("A", 100.0),
            sample_product("B", 300.0),
            sample_product("C", 100.0),
        ];
        let query = ListQuery {
            sort_by_price: true,
            ..Default::default()
        };

        let page = run(products, &query).unwrap();
        assert_eq!(names(&page), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_order_ignored_without_sort_flag() {
        let products = vec![sample_product("A", 100.0), sample_product("B", 300.0)];
        let query = ListQuery {
            order: SortOrder::Desc,
            ..Default::default()
        };
        let page = run(products, &query).unwrap();
        assert_eq!(names(&page), vec!["A", "B"]);
    }

    #[test]
    fn test_pagination_window() {
        let products = (1..=5)
            .map(|i| sample_product(&format!("Item {}", i), i as f64))
            .collect();
        let query = ListQuery {
            limit: 2,
            offset: 1,
            ..Default::default()
        };

        let page = run(products, &query).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.limit, 2);
        assert_eq!(names(&page), vec!["Item 2", "Item 3"]);
    }

    #[test]
    fn test_offset_past_end_is_empty_page() {
        let products = vec![sample_product("A", 100.0)];
        let query = ListQuery {
            offset: 10,
            ..Default::default()
        };

        let page = run(products, &query).unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_limit_bounds() {
        let query = ListQuery {
            limit: 0,
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = ListQuery {
            limit: 101,
            ..Default::default()
        };
        assert!(query.validate().is_err());
        assert!(ListQuery::default().validate().is_ok());
    }
}
