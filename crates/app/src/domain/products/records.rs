//! Product Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use mongodb::bson::{
    Document, doc, from_document,
    de::Error as DecodeError,
    oid::ObjectId,
};
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use serde::{Deserialize, Serialize};

use crate::{auth::UserId, object_ids::TypedObjectId};

/// Keys owned by the product itself. Anything else is caller data.
pub(crate) const RESERVED_PRODUCT_KEYS: [&str; 7] =
    ["_id", "id", "vendor", "speed", "owner", "msgs", "createdAt"];

const MESSAGE_ID_LENGTH: usize = 12;

/// Product Id
pub type ProductId = TypedObjectId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub vendor: String,
    pub speed: f64,
    pub owner: Owner,
    pub msgs: Vec<MessageRecord>,

    /// Any other caller supplied fields, stored as given.
    pub fields: Document,

    /// Derived from the id, never stored.
    pub created_at: Timestamp,
}

/// Creator of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: UserId,
}

/// Message Id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Draw a fresh random alphanumeric id.
    #[must_use]
    pub fn generate() -> Self {
        let id = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(MESSAGE_ID_LENGTH)
            .map(char::from)
            .collect();

        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Message embedded in a product.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub id: MessageId,
    pub fields: Document,
}

impl MessageRecord {
    pub(crate) fn into_document(self) -> Document {
        let mut document = doc! { "id": self.id.as_str() };

        document.extend(self.fields);

        document
    }

    pub(crate) fn from_document(mut document: Document) -> Result<Self, DecodeError> {
        let stored: StoredMessage = from_document(document.clone())?;

        document.remove("id");

        Ok(Self {
            id: stored.id,
            fields: document,
        })
    }
}

#[derive(Deserialize)]
struct StoredMessage {
    id: MessageId,
}

#[derive(Deserialize)]
struct StoredProduct {
    #[serde(rename = "_id")]
    id: ObjectId,
    vendor: String,
    speed: f64,
    owner: Owner,
    #[serde(default)]
    msgs: Vec<Document>,
}

impl ProductRecord {
    pub(crate) fn from_document(mut document: Document) -> Result<Self, DecodeError> {
        let stored: StoredProduct = from_document(document.clone())?;

        for key in RESERVED_PRODUCT_KEYS {
            document.remove(key);
        }

        let id = ProductId::from_object_id(stored.id);

        let msgs = stored
            .msgs
            .into_iter()
            .map(MessageRecord::from_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            vendor: stored.vendor,
            speed: stored.speed,
            owner: stored.owner,
            msgs,
            fields: document,
            created_at: id.created_at(),
        })
    }

    pub(crate) fn into_document(self) -> Document {
        let msgs: Vec<Document> = self
            .msgs
            .into_iter()
            .map(MessageRecord::into_document)
            .collect();

        let mut document = doc! {
            "_id": self.id.into_object_id(),
            "vendor": self.vendor,
            "speed": self.speed,
            "owner": { "id": self.owner.id.as_str() },
            "msgs": msgs,
        };

        document.extend(self.fields);

        document
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn generated_message_ids_are_alphanumeric() {
        let id = MessageId::generate();

        assert_eq!(id.as_str().len(), MESSAGE_ID_LENGTH);
        assert!(
            id.as_str().chars().all(|c| c.is_ascii_alphanumeric()),
            "unexpected id {id}"
        );
    }

    #[test]
    fn generated_message_ids_differ() {
        assert_ne!(MessageId::generate(), MessageId::generate());
    }

    #[test]
    fn product_document_splits_known_and_extra_fields() -> TestResult {
        let oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6")?;

        let record = ProductRecord::from_document(doc! {
            "_id": oid,
            "vendor": "Acme",
            "speed": 120,
            "owner": { "id": "u1" },
            "msgs": [{ "id": "m1", "txt": "hello" }],
            "color": "red",
        })?;

        assert_eq!(record.id.into_object_id(), oid);
        assert_eq!(record.vendor, "Acme");
        assert!((record.speed - 120.0).abs() < f64::EPSILON);
        assert_eq!(record.owner.id, UserId::from("u1"));
        assert_eq!(record.msgs.len(), 1);
        assert_eq!(record.msgs[0].id, MessageId::from("m1"));
        assert_eq!(record.msgs[0].fields, doc! { "txt": "hello" });
        assert_eq!(record.fields, doc! { "color": "red" });
        assert_eq!(record.created_at, Timestamp::from_second(0x65a1_f0c2)?);

        Ok(())
    }

    #[test]
    fn missing_msgs_default_to_empty() -> TestResult {
        let record = ProductRecord::from_document(doc! {
            "_id": ObjectId::new(),
            "vendor": "Acme",
            "speed": 1.5,
            "owner": { "id": "u1" },
        })?;

        assert!(record.msgs.is_empty(), "msgs should default to empty");

        Ok(())
    }

    #[test]
    fn product_without_vendor_is_rejected() {
        let result = ProductRecord::from_document(doc! {
            "_id": ObjectId::new(),
            "speed": 1.5,
            "owner": { "id": "u1" },
        });

        assert!(result.is_err(), "vendor is required");
    }

    #[test]
    fn into_document_carries_extra_fields() {
        let id = ProductId::new();

        let document = ProductRecord {
            id,
            vendor: "Acme".to_string(),
            speed: 2.0,
            owner: Owner {
                id: UserId::from("u1"),
            },
            msgs: Vec::new(),
            fields: doc! { "color": "red" },
            created_at: id.created_at(),
        }
        .into_document();

        assert_eq!(
            document,
            doc! {
                "_id": id.into_object_id(),
                "vendor": "Acme",
                "speed": 2.0,
                "owner": { "id": "u1" },
                "msgs": [],
                "color": "red",
            }
        );
    }
}
