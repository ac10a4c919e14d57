//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use mongodb::bson::doc;
use tracing::warn;

use crate::{
    auth::LoggedInUser,
    database::Db,
    domain::products::{
        data::{NewMessage, NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        filter::ProductFilter,
        records::{MessageId, MessageRecord, ProductId, ProductRecord},
        repository::{MongoProductsRepository, ProductsRepository},
    },
};

#[derive(Clone)]
pub struct MongoProductsService {
    repository: Arc<dyn ProductsRepository>,
}

impl MongoProductsService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self::with_repository(Arc::new(MongoProductsRepository::new(db)))
    }

    pub(crate) fn with_repository(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

fn parse_product_id(product: &str) -> Result<ProductId, ProductsServiceError> {
    product.parse::<ProductId>().map_err(|source| {
        warn!("rejected product id {product:?}: {source}");

        ProductsServiceError::from(source)
    })
}

#[async_trait]
impl ProductsService for MongoProductsService {
    #[tracing::instrument(name = "products.service.list_products", skip(self))]
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let documents = self.repository.find_products(filter.into_query()).await?;

        documents
            .into_iter()
            .map(|document| ProductRecord::from_document(document).map_err(Into::into))
            .collect()
    }

    #[tracing::instrument(name = "products.service.get_product", skip(self))]
    async fn get_product(&self, product: &str) -> Result<ProductRecord, ProductsServiceError> {
        let id = parse_product_id(product)?;

        let document = self
            .repository
            .find_product(id.into_object_id())
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        Ok(ProductRecord::from_document(document)?)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(owner = %product.owner, product_id = tracing::field::Empty)
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let id = ProductId::new();

        tracing::Span::current().record("product_id", tracing::field::display(id));

        let record = product.into_record(id);

        self.repository.insert_product(record.clone().into_document()).await?;

        Ok(record)
    }

    #[tracing::instrument(name = "products.service.update_product", skip(self, update))]
    async fn update_product(
        &self,
        product: &str,
        update: ProductUpdate,
    ) -> Result<ProductUpdate, ProductsServiceError> {
        let id = parse_product_id(product)?;

        let matched = self
            .repository
            .set_fields(id.into_object_id(), update.to_set_document())
            .await?;

        if matched == 0 {
            warn!("update matched no product {id}");
        }

        Ok(update)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self, user),
        fields(user_id = %user.id, is_admin = user.is_admin)
    )]
    async fn delete_product(
        &self,
        product: &str,
        user: &LoggedInUser,
    ) -> Result<ProductId, ProductsServiceError> {
        let id = parse_product_id(product)?;

        let mut criteria = doc! { "_id": id.into_object_id() };

        if !user.is_admin {
            criteria.insert("owner.id", user.id.as_str());
        }

        let deleted = self.repository.delete_product(criteria).await?;

        if deleted == 0 {
            warn!(
                "product {id} not deleted for user {} (admin: {})",
                user.id, user.is_admin
            );

            return Err(ProductsServiceError::NotOwnedOrNotFound);
        }

        Ok(id)
    }

    #[tracing::instrument(name = "products.service.add_product_msg", skip(self, message))]
    async fn add_product_msg(
        &self,
        product: &str,
        message: NewMessage,
    ) -> Result<MessageRecord, ProductsServiceError> {
        let id = parse_product_id(product)?;

        let record = message.into_record(MessageId::generate());

        let matched = self
            .repository
            .push_message(id.into_object_id(), record.clone().into_document())
            .await?;

        if matched == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(record)
    }

    #[tracing::instrument(name = "products.service.remove_product_msg", skip(self))]
    async fn remove_product_msg(
        &self,
        product: &str,
        message: &str,
    ) -> Result<MessageId, ProductsServiceError> {
        let id = parse_product_id(product)?;

        let matched = self.repository.pull_message(id.into_object_id(), message).await?;

        if matched == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(MessageId::from(message))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Lists products matching the filter, one page at a time when paged.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: &str) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with a store assigned id.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Overwrites `vendor` and `speed`, returning the update as submitted even when no
    /// product matched.
    async fn update_product(
        &self,
        product: &str,
        update: ProductUpdate,
    ) -> Result<ProductUpdate, ProductsServiceError>;

    /// Deletes a product owned by `user`, or any product when `user` is an admin.
    async fn delete_product(
        &self,
        product: &str,
        user: &LoggedInUser,
    ) -> Result<ProductId, ProductsServiceError>;

    /// Appends a message with a freshly generated id.
    async fn add_product_msg(
        &self,
        product: &str,
        message: NewMessage,
    ) -> Result<MessageRecord, ProductsServiceError>;

    /// Removes every message with the given id. Unknown message ids are a no-op.
    async fn remove_product_msg(
        &self,
        product: &str,
        message: &str,
    ) -> Result<MessageId, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{Document, oid::ObjectId};
    use testresult::TestResult;

    use crate::{
        auth::UserId,
        domain::products::{filter::PAGE_SIZE, repository::MockProductsRepository},
    };

    use super::*;

    const PRODUCT_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    fn product_oid() -> ObjectId {
        ObjectId::from_bytes([
            0x65, 0xa1, 0xf0, 0xc2, 0xe4, 0xb0, 0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6,
        ])
    }

    fn service(repository: MockProductsRepository) -> MongoProductsService {
        MongoProductsService::with_repository(Arc::new(repository))
    }

    fn stored_product() -> Document {
        doc! {
            "_id": product_oid(),
            "vendor": "Acme",
            "speed": 120.0,
            "owner": { "id": "u1" },
            "msgs": [],
        }
    }

    fn user(id: &str, is_admin: bool) -> LoggedInUser {
        LoggedInUser {
            id: UserId::from(id),
            is_admin,
        }
    }

    #[tokio::test]
    async fn list_products_passes_paged_query_to_store() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_find_products()
            .once()
            .withf(|query| {
                query.skip == Some(PAGE_SIZE)
                    && query.limit == Some(3)
                    && query.criteria == doc! { "vendor": { "$regex": "ac", "$options": "i" } }
            })
            .return_once(|_| Ok(vec![stored_product()]));

        let products = service(repository)
            .list_products(ProductFilter {
                txt: "ac".to_string(),
                page_idx: Some(1),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].vendor, "Acme");

        Ok(())
    }

    #[tokio::test]
    async fn get_product_rejects_malformed_id_without_store_call() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository.expect_find_product().never();

        let result = service(repository).get_product("123").await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidIdentifier(_))),
            "expected InvalidIdentifier, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_missing_is_not_found() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_find_product()
            .once()
            .withf(|id| *id == product_oid())
            .return_once(|_| Ok(None));

        let result = service(repository).get_product(PRODUCT_ID).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_derives_created_at_from_id() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_find_product()
            .once()
            .return_once(|_| Ok(Some(stored_product())));

        let product = service(repository).get_product(PRODUCT_ID).await?;

        assert_eq!(product.id.to_string(), PRODUCT_ID);
        assert_eq!(product.created_at, jiff::Timestamp::from_second(0x65a1_f0c2)?);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_starts_with_no_messages() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_insert_product()
            .once()
            .withf(|document| {
                document.get_array("msgs").is_ok_and(Vec::is_empty)
                    && document.get_document("owner").is_ok_and(|owner| {
                        owner.get_str("id").is_ok_and(|id| id == "u1")
                    })
                    && document.get_str("color").is_ok_and(|color| color == "red")
            })
            .return_once(|_| Ok(()));

        let product = service(repository)
            .create_product(NewProduct {
                vendor: "Acme".to_string(),
                speed: 10.0,
                owner: UserId::from("u1"),
                fields: doc! { "msgs": [{ "id": "x" }], "color": "red" },
            })
            .await?;

        assert!(product.msgs.is_empty(), "msgs start empty");
        assert_eq!(product.created_at, product.id.created_at());

        Ok(())
    }

    #[tokio::test]
    async fn update_product_sets_only_vendor_and_speed() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_set_fields()
            .once()
            .withf(|id, fields| {
                *id == product_oid() && *fields == doc! { "vendor": "Acme", "speed": 50.0 }
            })
            .return_once(|_, _| Ok(1));

        let update = ProductUpdate {
            vendor: "Acme".to_string(),
            speed: 50.0,
            fields: doc! { "owner": { "id": "intruder" } },
        };

        let returned = service(repository)
            .update_product(PRODUCT_ID, update.clone())
            .await?;

        assert_eq!(returned, update);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unmatched_still_returns_submitted_update() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_set_fields()
            .once()
            .return_once(|_, _| Ok(0));

        let update = ProductUpdate {
            vendor: "Acme".to_string(),
            speed: 1.0,
            fields: doc! { "color": "red" },
        };

        let returned = service(repository)
            .update_product(PRODUCT_ID, update.clone())
            .await?;

        assert_eq!(returned, update);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_scopes_non_admin_to_owner() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_delete_product()
            .once()
            .withf(|criteria| *criteria == doc! { "_id": product_oid(), "owner.id": "u1" })
            .return_once(|_| Ok(1));

        let deleted = service(repository)
            .delete_product(PRODUCT_ID, &user("u1", false))
            .await?;

        assert_eq!(deleted.to_string(), PRODUCT_ID);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_admin_skips_owner_check() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_delete_product()
            .once()
            .withf(|criteria| *criteria == doc! { "_id": product_oid() })
            .return_once(|_| Ok(1));

        service(repository)
            .delete_product(PRODUCT_ID, &user("admin", true))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_not_owned_is_rejected() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_delete_product()
            .once()
            .return_once(|_| Ok(0));

        let result = service(repository)
            .delete_product(PRODUCT_ID, &user("u2", false))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotOwnedOrNotFound)),
            "expected NotOwnedOrNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_product_msg_assigns_server_id() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_push_message()
            .once()
            .withf(|id, message| {
                *id == product_oid()
                    && message.get_str("id").is_ok_and(|id| id != "client")
                    && message.get_str("txt").is_ok_and(|txt| txt == "hi")
            })
            .return_once(|_, _| Ok(1));

        let message = service(repository)
            .add_product_msg(
                PRODUCT_ID,
                NewMessage {
                    fields: doc! { "id": "client", "txt": "hi" },
                },
            )
            .await?;

        assert_ne!(message.id, MessageId::from("client"));
        assert_eq!(message.fields, doc! { "txt": "hi" });

        Ok(())
    }

    #[tokio::test]
    async fn add_product_msg_missing_product_is_not_found() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_push_message()
            .once()
            .return_once(|_, _| Ok(0));

        let result = service(repository)
            .add_product_msg(PRODUCT_ID, NewMessage::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_product_msg_returns_message_id() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_pull_message()
            .once()
            .withf(|id, message| *id == product_oid() && message == "m1")
            .return_once(|_, _| Ok(1));

        let removed = service(repository)
            .remove_product_msg(PRODUCT_ID, "m1")
            .await?;

        assert_eq!(removed, MessageId::from("m1"));

        Ok(())
    }

    #[tokio::test]
    async fn remove_product_msg_rejects_malformed_id() -> TestResult {
        let mut repository = MockProductsRepository::new();

        repository.expect_pull_message().never();

        let result = service(repository).remove_product_msg("nope", "m1").await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidIdentifier(_))),
            "expected InvalidIdentifier, got {result:?}"
        );

        Ok(())
    }
}
