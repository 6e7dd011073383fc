use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pagination::Page;

/// Product entity
///
/// `category` and `name` only change together through [`Product::update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned by storage on first save
    #[schema(example = 1)]
    id: Option<i64>,
    #[schema(example = "electronics")]
    category: String,
    #[schema(example = "phone")]
    name: String,
}

impl Product {
    /// A product that has not been persisted yet.
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            category: category.into(),
            name: name.into(),
        }
    }

    /// Rehydrate a stored product.
    pub(crate) fn stored(id: i64, category: String, name: String) -> Self {
        Self {
            id: Some(id),
            category,
            name,
        }
    }

    /// Replace both labels at once.
    pub fn update(&mut self, category: impl Into<String>, name: impl Into<String>) {
        self.category = category.into();
        self.name = name.into();
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "electronics")]
    pub category: String,
    #[schema(example = "phone")]
    pub name: String,
}

/// Body of `PUT /products/{productId}`
///
/// `id` is always overwritten with the path identifier before the update runs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub id: i64,
    #[schema(example = "electronics")]
    pub category: String,
    #[schema(example = "smartphone")]
    pub name: String,
}

/// Body of `POST /products/list`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GetProductListRequest {
    #[schema(example = "electronics")]
    pub category: String,
    /// 1-based page number; values <= 0 select the first page
    #[serde(default)]
    #[schema(example = 1)]
    pub page: i32,
    /// Page length; values <= 0 are treated as 1
    #[serde(default)]
    #[schema(example = 20)]
    pub size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total_pages: u64,
    pub total_elements: u64,
    /// Zero-based page index that was queried
    pub page: u64,
}

impl From<Page<Product>> for ProductListResponse {
    fn from(page: Page<Product>) -> Self {
        Self {
            products: page.items,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            page: page.index,
        }
    }
}
