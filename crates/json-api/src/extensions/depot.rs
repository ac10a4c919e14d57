//! Depot helper extensions.

use std::any::Any;

use kiosk_app::auth::LoggedInUser;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_logged_in_user(&mut self, user: LoggedInUser);

    fn logged_in_user_or_401(&self) -> Result<&LoggedInUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_logged_in_user(&mut self, user: LoggedInUser) {
        self.inject(user);
    }

    fn logged_in_user_or_401(&self) -> Result<&LoggedInUser, StatusError> {
        self.obtain::<LoggedInUser>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
