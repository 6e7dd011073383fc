use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::pagination::{Page, PageRequest};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID; `None` when absent
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Insert a product without an id, or overwrite the stored one.
    /// Overwriting an id that no longer exists fails with `NotFound`.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Delete by ID without reading first. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> ProductResult<bool>;

    /// One page of products in `category`, ordered by category then id
    async fn find_page_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> ProductResult<Page<Product>>;

    /// Distinct categories currently present
    async fn find_distinct_categories(&self) -> ProductResult<Vec<String>>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = match product.id() {
            // Row removed since it was read
            Some(id) if !store.products.contains_key(&id) => {
                return Err(ProductError::NotFound(id));
            }
            Some(id) => {
                tracing::info!(product_id = id, "Updated product");
                id
            }
            None => {
                store.last_id += 1;
                let id = store.last_id;
                product.assign_id(id);
                tracing::info!(product_id = id, "Created product");
                id
            }
        };

        store.products.insert(id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn find_page_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        let store = self.store.read().await;

        // BTreeMap iterates in id order, which is the tie-break within a category
        let matching: Vec<&Product> = store
            .products
            .values()
            .filter(|p| p.category() == category)
            .collect();
        let total = matching.len() as u64;

        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page::new(items, total, page))
    }

    async fn find_distinct_categories(&self) -> ProductResult<Vec<String>> {
        let store = self.store.read().await;

        let categories: BTreeSet<&str> = store.products.values().map(|p| p.category()).collect();
        Ok(categories.into_iter().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.save(Product::new("electronics", "phone")).await.unwrap();
        let second = repo.save(Product::new("electronics", "tv")).await.unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.save(Product::new("books", "novel")).await.unwrap();

        product.update("books", "poetry");
        repo.save(product).await.unwrap();

        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name(), "poetry");
        assert_eq!(repo.find_distinct_categories().await.unwrap(), vec!["books"]);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.save(Product::new("books", "novel")).await.unwrap();
        repo.delete_by_id(1).await.unwrap();

        product.update("books", "poetry");
        let err = repo.save(product).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(1)));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryProductRepository::new();
        repo.save(Product::new("books", "novel")).await.unwrap();

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();
        repo.save(Product::new("books", "novel")).await.unwrap();
        repo.delete_by_id(1).await.unwrap();

        let next = repo.save(Product::new("books", "poetry")).await.unwrap();
        assert_eq!(next.id(), Some(2));
    }

    #[tokio::test]
    async fn test_find_page_by_category_filters_and_pages() {
        let repo = InMemoryProductRepository::new();
        for name in ["a", "b", "c"] {
            repo.save(Product::new("electronics", name)).await.unwrap();
        }
        repo.save(Product::new("books", "novel")).await.unwrap();

        let page = repo
            .find_page_by_category("electronics", PageRequest::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.index, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name(), "c");
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_with_totals() {
        let repo = InMemoryProductRepository::new();
        repo.save(Product::new("electronics", "phone")).await.unwrap();

        let page = repo
            .find_page_by_category("electronics", PageRequest::new(5, 10))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_distinct_categories_have_no_duplicates() {
        let repo = InMemoryProductRepository::new();
        repo.save(Product::new("electronics", "phone")).await.unwrap();
        repo.save(Product::new("books", "novel")).await.unwrap();
        repo.save(Product::new("electronics", "tv")).await.unwrap();

        let categories = repo.find_distinct_categories().await.unwrap();
        assert_eq!(categories, vec!["books", "electronics"]);
    }
}
