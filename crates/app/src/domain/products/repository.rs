//! Products Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mockall::automock;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
    error::Error,
};

use crate::{database::Db, domain::products::filter::ProductQuery};

/// Collection holding one document per product.
pub(crate) const PRODUCT_COLLECTION: &str = "product";

/// Single round trip store operations on the product collection.
#[automock]
#[async_trait]
pub(crate) trait ProductsRepository: Send + Sync {
    async fn find_products(&self, query: ProductQuery) -> Result<Vec<Document>, Error>;

    async fn find_product(&self, id: ObjectId) -> Result<Option<Document>, Error>;

    async fn insert_product(&self, product: Document) -> Result<(), Error>;

    /// Returns the matched count.
    async fn set_fields(&self, id: ObjectId, fields: Document) -> Result<u64, Error>;

    /// Returns the deleted count.
    async fn delete_product(&self, criteria: Document) -> Result<u64, Error>;

    /// Returns the matched count.
    async fn push_message(&self, id: ObjectId, message: Document) -> Result<u64, Error>;

    /// Returns the matched count.
    async fn pull_message(&self, id: ObjectId, message_id: &str) -> Result<u64, Error>;
}

#[derive(Debug, Clone)]
pub(crate) struct MongoProductsRepository {
    collection: Collection<Document>,
}

impl MongoProductsRepository {
    #[must_use]
    pub(crate) fn new(db: &Db) -> Self {
        Self {
            collection: db.collection(PRODUCT_COLLECTION),
        }
    }
}

#[async_trait]
impl ProductsRepository for MongoProductsRepository {
    #[tracing::instrument(
        name = "products.repository.find_products",
        skip(self),
        fields(found = tracing::field::Empty),
        err
    )]
    async fn find_products(&self, query: ProductQuery) -> Result<Vec<Document>, Error> {
        let mut find = self.collection.find(query.criteria).sort(query.sort);

        if let Some(skip) = query.skip {
            find = find.skip(skip);
        }

        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }

        let products: Vec<Document> = find.await?.try_collect().await?;

        tracing::Span::current().record("found", products.len());

        Ok(products)
    }

    async fn find_product(&self, id: ObjectId) -> Result<Option<Document>, Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    async fn insert_product(&self, product: Document) -> Result<(), Error> {
        self.collection.insert_one(product).await?;

        Ok(())
    }

    async fn set_fields(&self, id: ObjectId, fields: Document) -> Result<u64, Error> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        Ok(result.matched_count)
    }

    async fn delete_product(&self, criteria: Document) -> Result<u64, Error> {
        let result = self.collection.delete_one(criteria).await?;

        Ok(result.deleted_count)
    }

    async fn push_message(&self, id: ObjectId, message: Document) -> Result<u64, Error> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$push": { "msgs": message } })
            .await?;

        Ok(result.matched_count)
    }

    async fn pull_message(&self, id: ObjectId, message_id: &str) -> Result<u64, Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$pull": { "msgs": { "id": message_id } } },
            )
            .await?;

        Ok(result.matched_count)
    }
}
