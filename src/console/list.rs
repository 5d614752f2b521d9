//! Loading state for a page's record list

use super::notify::Notifications;
use crate::api::ApiResponse;
use crate::models::{Paginated, Pagination};
use anyhow::Result;
use log::debug;
use serde::Serialize;
use std::future::Future;

#[derive(Debug, Clone)]
pub struct ListController<T> {
    items: Vec<T>,
    pagination: Option<Pagination>,
    is_loading: bool,
    is_searching: bool,
    load_error: Option<String>,
    loaded_once: bool,
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            is_loading: false,
            is_searching: false,
            load_error: None,
            loaded_once: false,
        }
    }
}

impl<T: Serialize> ListController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fetch` and replace the list with its records.
    ///
    /// The first load sets `is_loading` and on failure leaves a retry panel
    /// error; later loads set `is_searching` and only toast on failure.
    pub async fn load<Fut>(&mut self, fetch: Fut, notifications: &mut Notifications) -> bool
    where
        Fut: Future<Output = Result<ApiResponse<Vec<T>>>>,
    {
        self.begin();
        let outcome = Self::unwrap_response(fetch.await);
        self.finish(outcome.map(|items| (items.unwrap_or_default(), None)), notifications)
    }

    /// Like [`load`](Self::load) for server-paginated endpoints
    pub async fn load_page<Fut>(&mut self, fetch: Fut, notifications: &mut Notifications) -> bool
    where
        Fut: Future<Output = Result<ApiResponse<Paginated<T>>>>,
    {
        self.begin();
        let outcome = Self::unwrap_response(fetch.await).map(|page| match page {
            Some(page) => (page.items, Some(page.pagination)),
            None => (Vec::new(), None),
        });
        self.finish(outcome, notifications)
    }

    fn unwrap_response<D: Serialize>(outcome: Result<ApiResponse<D>>) -> Result<Option<D>, String> {
        match outcome {
            Ok(response) if response.success => Ok(response.data),
            Ok(response) => Err(response.error_message()),
            Err(err) => Err(format!("{:#}", err)),
        }
    }

    fn begin(&mut self) {
        if self.loaded_once {
            self.is_searching = true;
        } else {
            self.is_loading = true;
        }
    }

    fn finish(
        &mut self,
        outcome: Result<(Vec<T>, Option<Pagination>), String>,
        notifications: &mut Notifications,
    ) -> bool {
        self.is_loading = false;
        self.is_searching = false;

        match outcome {
            Ok((items, pagination)) => {
                debug!("List loaded with {} records", items.len());
                self.items = items;
                self.pagination = pagination;
                self.load_error = None;
                self.loaded_once = true;
                true
            }
            Err(message) => {
                if !self.loaded_once {
                    self.load_error = Some(message.clone());
                }
                notifications.error(message);
                false
            }
        }
    }
}

impl<T> ListController<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Error shown in place of the list, with a retry button
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_failure_sets_retry_panel() {
        let mut list: ListController<u64> = ListController::new();
        let mut notifications = Notifications::new();

        let ok = list
            .load(async { Ok(ApiResponse::failure("Database unavailable")) }, &mut notifications)
            .await;
        assert!(!ok);
        assert_eq!(list.load_error(), Some("Database unavailable"));
        assert!(!list.is_loading());

        assert!(list.load(async { Ok(ApiResponse::ok(vec![1, 2])) }, &mut notifications).await);
        assert!(list.load_error().is_none());
        assert_eq!(list.items(), &[1, 2]);

        // Later failures keep the old records and only toast
        let ok = list
            .load(async { Err(anyhow::anyhow!("timed out")) }, &mut notifications)
            .await;
        assert!(!ok);
        assert!(list.load_error().is_none());
        assert_eq!(list.items(), &[1, 2]);
        assert!(!list.is_searching());
        assert_eq!(notifications.toasts().len(), 2);
    }
}
