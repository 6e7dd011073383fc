use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProductRequest, GetProductListRequest, Product, ProductListResponse,
    UpdateProductRequest,
};
use crate::pagination::PageRequest;
use crate::repository::ProductRepository;

/// Service layer for Product lifecycle operations
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn create_product(&self, request: CreateProductRequest) -> ProductResult<Product> {
        let product = Product::new(request.category, request.name);
        self.repository.save(product).await
    }

    /// Get a product by ID, failing with `NotFound` when absent
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Update category and name of the product identified by `request.id`
    #[instrument(skip(self, request), fields(product_id = request.id))]
    pub async fn update_product(&self, request: UpdateProductRequest) -> ProductResult<Product> {
        let mut product = self.get_product(request.id).await?;
        product.update(request.category, request.name);
        self.repository.save(product).await
    }

    /// Delete without reading first; nothing deleted means `NotFound`
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// List one page of a category; `request.page` is 1-based
    #[instrument(skip(self, request), fields(category = %request.category, page = request.page, size = request.size))]
    pub async fn list_products(
        &self,
        request: GetProductListRequest,
    ) -> ProductResult<ProductListResponse> {
        let page_request = PageRequest::from_client(request.page, request.size);
        let page = self
            .repository
            .find_page_by_category(&request.category, page_request)
            .await?;

        Ok(page.into())
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ProductResult<Vec<String>> {
        self.repository.find_distinct_categories().await
    }
}
