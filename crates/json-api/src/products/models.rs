//! Product Models

use kiosk_app::{
    bson::{self, Bson, Document},
    products::records::{MessageRecord, ProductRecord},
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extensions::*;

/// Product Owner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnerResponse {
    /// Id of the user who created the product
    pub id: String,
}

/// Product Message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// Server assigned message id
    pub id: String,

    /// Caller supplied message fields
    #[serde(flatten)]
    #[salvo(schema(value_type = Object))]
    pub fields: Map<String, Value>,
}

impl From<MessageRecord> for MessageResponse {
    fn from(message: MessageRecord) -> Self {
        MessageResponse {
            id: message.id.to_string(),
            fields: into_json_map(message.fields),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: String,

    pub vendor: String,

    pub speed: f64,

    pub owner: OwnerResponse,

    /// Messages attached to the product, oldest first
    pub msgs: Vec<MessageResponse>,

    /// The date and time the product was created
    pub created_at: String,

    /// Any other fields stored with the product
    #[serde(flatten)]
    #[salvo(schema(value_type = Object))]
    pub fields: Map<String, Value>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.to_string(),
            vendor: product.vendor,
            speed: product.speed,
            owner: OwnerResponse {
                id: product.owner.id.to_string(),
            },
            msgs: product.msgs.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            fields: into_json_map(product.fields),
        }
    }
}

/// Convert stored fields to JSON using relaxed extended JSON for BSON-only types.
pub(crate) fn into_json_map(document: Document) -> Map<String, Value> {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Convert caller supplied JSON fields into a BSON document.
pub(crate) fn into_document(fields: &Map<String, Value>) -> Result<Document, StatusError> {
    bson::to_document(fields).or_400("could not convert request fields")
}
