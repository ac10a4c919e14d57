//! Products Data

use mongodb::bson::{Document, doc};

use crate::{
    auth::UserId,
    domain::products::records::{
        MessageId, MessageRecord, Owner, ProductId, ProductRecord, RESERVED_PRODUCT_KEYS,
    },
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub vendor: String,
    pub speed: f64,
    pub owner: UserId,
    pub fields: Document,
}

impl NewProduct {
    pub(crate) fn into_record(self, id: ProductId) -> ProductRecord {
        ProductRecord {
            id,
            vendor: self.vendor,
            speed: self.speed,
            owner: Owner { id: self.owner },
            msgs: Vec::new(),
            fields: without_reserved_keys(self.fields),
            created_at: id.created_at(),
        }
    }
}

/// Product Update Data
///
/// Only `vendor` and `speed` are written. `fields` rides along so the caller
/// gets back exactly what it sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub vendor: String,
    pub speed: f64,
    pub fields: Document,
}

impl ProductUpdate {
    pub(crate) fn to_set_document(&self) -> Document {
        doc! {
            "vendor": self.vendor.as_str(),
            "speed": self.speed,
        }
    }
}

/// New Message Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMessage {
    pub fields: Document,
}

impl NewMessage {
    /// Attach a server assigned id, dropping any id the caller sent.
    pub(crate) fn into_record(mut self, id: MessageId) -> MessageRecord {
        self.fields.remove("id");

        MessageRecord {
            id,
            fields: self.fields,
        }
    }
}

fn without_reserved_keys(mut fields: Document) -> Document {
    for key in RESERVED_PRODUCT_KEYS {
        fields.remove(key);
    }

    fields
}
