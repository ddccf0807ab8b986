//! 商品目录：数据模型、校验规则、仓储、列表查询与处理器

pub mod error;
pub mod handler;
pub mod model;
pub mod patch;
pub mod query;
pub mod repository;
pub mod rules;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use model::{Currency, Dimensions, Product, ProductData, ProductView, Seller};
pub use patch::{DimensionsPatch, ProductPatch, SellerPatch};
pub use query::{ListQuery, ProductPage, SortOrder};
pub use repository::{ProductRepository, ProductSource};
pub use service::ProductService;
