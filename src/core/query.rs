//! Filtered record queries.
//!
//! [`Cursor`] pulls matching records from a [`Client`] one page at a time. It
//! holds at most one page, fetches only when that page is drained, and stops
//! for good once the client returns a short page.

use std::collections::BTreeSet;
use std::collections::VecDeque;

use tracing::debug;

use crate::core::client::{Client, SealedRecord};
use crate::core::constants::DEFAULT_PAGE_SIZE;
use crate::core::domain::{Record, RecordMeta};
use crate::core::types::{ClientId, RecordId, RecordType};
use crate::error::{Error, Result};

/// Record query filter.
///
/// Dimensions combine with AND; values within a dimension combine with OR.
/// An empty dimension does not restrict anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub content_types: BTreeSet<RecordType>,
    pub record_ids: BTreeSet<RecordId>,
    pub writer_ids: BTreeSet<ClientId>,
    pub user_ids: BTreeSet<ClientId>,
    /// Return record data; metadata only when false
    pub include_data: bool,
}

impl QueryFilter {
    /// Whether a record with this metadata satisfies the filter.
    pub fn matches(&self, meta: &RecordMeta) -> bool {
        fn allows(set: &BTreeSet<String>, value: &str) -> bool {
            set.is_empty() || set.contains(value)
        }

        allows(&self.content_types, &meta.record_type)
            && allows(&self.record_ids, &meta.record_id)
            && allows(&self.writer_ids, &meta.writer_id)
            && allows(&self.user_ids, &meta.user_id)
    }
}

/// Pull-based, paginated record stream.
///
/// ```ignore
/// let mut cursor = Cursor::open(client, filter);
/// while cursor.has_next() {
///     let record = cursor.next_record()?;
/// }
/// ```
pub struct Cursor<'a> {
    client: &'a dyn Client,
    filter: QueryFilter,
    page_size: usize,
    page: VecDeque<SealedRecord>,
    after_index: u64,
    exhausted: bool,
    failed: Option<Error>,
}

impl<'a> Cursor<'a> {
    /// Open a cursor. Nothing is fetched until the first [`Cursor::has_next`].
    pub fn open(client: &'a dyn Client, filter: QueryFilter) -> Self {
        Self {
            client,
            filter,
            page_size: DEFAULT_PAGE_SIZE,
            page: VecDeque::new(),
            after_index: 0,
            exhausted: false,
            failed: None,
        }
    }

    /// Change the number of records requested per page (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Records currently buffered from the last fetched page.
    pub fn buffered(&self) -> usize {
        self.page.len()
    }

    /// Whether the cursor has stopped fetching.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether another element is available, fetching the next page if the
    /// current one is drained.
    ///
    /// A failed fetch also reports `true`; the failure is returned by the
    /// following [`Cursor::next_record`] call.
    pub fn has_next(&mut self) -> bool {
        if self.failed.is_some() || !self.page.is_empty() {
            return true;
        }
        if self.exhausted {
            return false;
        }

        self.fetch();
        self.failed.is_some() || !self.page.is_empty()
    }

    /// Next record, decrypted.
    ///
    /// Returns `None` at the end of the stream. A decryption failure only
    /// affects the element it is returned for; iteration can continue.
    pub fn next_record(&mut self) -> Option<Result<Record>> {
        if !self.has_next() {
            return None;
        }
        if let Some(err) = self.failed.take() {
            return Some(Err(err));
        }

        let sealed = self.page.pop_front()?;
        Some(self.client.open(sealed))
    }

    fn fetch(&mut self) {
        debug!(
            after_index = self.after_index,
            page_size = self.page_size,
            "fetching query page"
        );

        match self
            .client
            .query(&self.filter, self.after_index, self.page_size)
        {
            Ok(page) => {
                let count = page.records.len();
                debug!(count, last_index = page.last_index, "page fetched");

                if count < self.page_size {
                    self.exhausted = true;
                }
                self.after_index = page.last_index;
                self.page = page.records.into();
            }
            Err(e) => {
                self.exhausted = true;
                self.failed = Some(e);
            }
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
