//! Typed Object Ids

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use jiff::Timestamp;
use mongodb::bson::oid::{Error as OidError, ObjectId};
use thiserror::Error;

/// Raised when a string is not a 24 character hex object id.
#[derive(Debug, Error)]
#[error("invalid object id: {value:?}")]
pub struct InvalidObjectId {
    value: String,

    #[source]
    source: OidError,
}

/// An `ObjectId` tagged with the entity it identifies.
pub struct TypedObjectId<T>(ObjectId, PhantomData<T>);

impl<T> TypedObjectId<T> {
    /// Generate a fresh id. Ids are time ordered.
    #[must_use]
    pub fn new() -> Self {
        Self::from_object_id(ObjectId::new())
    }

    pub const fn from_object_id(id: ObjectId) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn into_object_id(self) -> ObjectId {
        self.0
    }

    /// Creation time embedded in the id, at second precision.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        // ObjectId seconds are a u32 and always fit the jiff range.
        Timestamp::from_millisecond(self.0.timestamp().timestamp_millis()).unwrap_or_default()
    }
}

impl<T> Default for TypedObjectId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromStr for TypedObjectId<T> {
    type Err = InvalidObjectId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(value)
            .map(Self::from_object_id)
            .map_err(|source| InvalidObjectId {
                value: value.to_string(),
                source,
            })
    }
}

impl<T> Clone for TypedObjectId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedObjectId<T> {}

impl<T> Debug for TypedObjectId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedObjectId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedObjectId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedObjectId<T> {}

impl<T> Hash for TypedObjectId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedObjectId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedObjectId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<ObjectId> for TypedObjectId<T> {
    fn from(value: ObjectId) -> Self {
        Self::from_object_id(value)
    }
}

impl<T> From<TypedObjectId<T>> for ObjectId {
    fn from(value: TypedObjectId<T>) -> Self {
        value.into_object_id()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Widget;

    type WidgetId = TypedObjectId<Widget>;

    #[test]
    fn parses_hex_object_id() -> TestResult {
        let id: WidgetId = "65a1f0c2e4b0a1b2c3d4e5f6".parse()?;

        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");

        Ok(())
    }

    #[test]
    fn rejects_malformed_object_id() {
        assert!("123".parse::<WidgetId>().is_err(), "short ids must fail");
        assert!(
            "zzzzzzzzzzzzzzzzzzzzzzzz".parse::<WidgetId>().is_err(),
            "non-hex ids must fail"
        );
    }

    #[test]
    fn created_at_reads_embedded_timestamp() -> TestResult {
        // 0x65a1f0c2 seconds after the epoch.
        let id: WidgetId = "65a1f0c2e4b0a1b2c3d4e5f6".parse()?;

        assert_eq!(id.created_at(), Timestamp::from_second(0x65a1_f0c2)?);

        Ok(())
    }

    #[test]
    fn new_ids_are_time_ordered() {
        let first = WidgetId::new();
        let second = WidgetId::new();

        assert!(first < second, "later ids sort after earlier ones");
    }
}
