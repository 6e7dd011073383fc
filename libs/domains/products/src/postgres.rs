use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use tracing::instrument;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    pagination::{Page, PageRequest},
    repository::ProductRepository,
};

/// SeaORM-backed [`ProductRepository`] over the `products` table.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    #[instrument(skip(self, product), fields(product_id = ?product.id()))]
    async fn save(&self, product: Product) -> ProductResult<Product> {
        match product.id() {
            None => {
                let active_model = entity::ActiveModel {
                    product_id: NotSet,
                    category: Set(product.category().to_owned()),
                    name: Set(product.name().to_owned()),
                };
                let model = active_model.insert(&self.db).await?;

                tracing::info!(product_id = model.product_id, "Created product");
                Ok(model.into())
            }
            Some(id) => {
                let active_model = entity::ActiveModel {
                    product_id: Unchanged(id),
                    category: Set(product.category().to_owned()),
                    name: Set(product.name().to_owned()),
                };
                let model = active_model.update(&self.db).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => ProductError::NotFound(id),
                    other => other.into(),
                })?;

                tracing::info!(product_id = id, "Updated product");
                Ok(model.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn find_page_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        let paginator = entity::Entity::find()
            .filter(entity::Column::Category.eq(category))
            .order_by_asc(entity::Column::Category)
            .order_by_asc(entity::Column::ProductId)
            .paginate(&self.db, page.size);

        let totals = paginator.num_items_and_pages().await?;
        let models = paginator.fetch_page(page.index).await?;

        Ok(Page {
            items: models.into_iter().map(Product::from).collect(),
            total_pages: totals.number_of_pages,
            total_elements: totals.number_of_items,
            index: page.index,
        })
    }

    #[instrument(skip(self))]
    async fn find_distinct_categories(&self) -> ProductResult<Vec<String>> {
        let categories = entity::Entity::find()
            .select_only()
            .column(entity::Column::Category)
            .distinct()
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, category: &str, name: &str) -> entity::Model {
        entity::Model {
            product_id: id,
            category: category.to_owned(),
            name: name.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(4, "books", "novel")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.find_by_id(4).await.unwrap().unwrap();
        assert_eq!(product.id(), Some(4));
        assert_eq!(product.category(), "books");
        assert_eq!(product.name(), "novel");
    }

    #[tokio::test]
    async fn test_find_by_id_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_new_product_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "electronics", "phone")]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let saved = repo.save(Product::new("electronics", "phone")).await.unwrap();
        assert_eq!(saved.id(), Some(1));
    }

    #[tokio::test]
    async fn test_delete_by_id_uses_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_becomes_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.find_by_id(1).await.unwrap_err();
        assert!(matches!(err, ProductError::Internal(_)));
    }
}
