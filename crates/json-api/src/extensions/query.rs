//! Query string parsing helpers.

use std::{fmt::Display, str::FromStr};

use salvo::prelude::{Request, StatusError};

use crate::extensions::*;

pub(crate) trait QueryExt {
    /// Parse an optional query parameter, rejecting malformed values with a 400.
    fn parse_query<T>(&self, key: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display;
}

impl QueryExt for Request {
    fn parse_query<T>(&self, key: &str) -> Result<Option<T>, StatusError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.query::<String>(key)
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.trim().parse::<T>())
            .transpose()
            .or_400(&format!("could not parse \"{key}\" query parameter"))
    }
}
