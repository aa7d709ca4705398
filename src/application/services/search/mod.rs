use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::domain::clients::client::{
    Client, ClientSort, ListClientsParams, Page, normalize_tag_names,
};

/// Identifies one issued list request. Only the latest ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(pub u64);

#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Waits for the next value on `rx` that stays unchanged for `delay`.
/// A sender dropped mid-window flushes the pending value; `None` means no change arrived.
pub async fn debounce<T: Clone>(rx: &mut watch::Receiver<T>, delay: Duration) -> Option<T> {
    rx.changed().await.ok()?;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return Some(rx.borrow_and_update().clone());
                }
            }
            _ = tokio::time::sleep(delay) => return Some(rx.borrow_and_update().clone()),
        }
    }
}

/// Caller-side list state: paging, sort, and the mutually exclusive text/tag filters.
#[derive(Debug)]
pub struct ClientListView {
    page: u32,
    size: u32,
    sort: ClientSort,
    query: String,
    selected_tags: Vec<String>,
    sequencer: SearchSequencer,
    current: Option<Page<Client>>,
}

impl ClientListView {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size,
            sort: ClientSort::default(),
            query: String::new(),
            selected_tags: Vec::new(),
            sequencer: SearchSequencer::new(),
            current: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    pub fn current(&self) -> Option<&Page<Client>> {
        self.current.as_ref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected_tags.clear();
        self.page = 0;
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.query.clear();
        self.page = 0;
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
        self.page = 0;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn set_sort(&mut self, sort: ClientSort) {
        self.sort = sort;
        self.page = 0;
    }

    pub fn params(&self) -> ListClientsParams {
        let tags = normalize_tag_names(&self.selected_tags);
        let query = if tags.is_empty() {
            self.query.trim().to_string()
        } else {
            String::new()
        };
        ListClientsParams {
            page: self.page,
            size: self.size,
            sort: self.sort,
            tags,
            query,
        }
    }

    /// Issues a ticket for a new fetch; any earlier ticket stops being current.
    pub fn begin_fetch(&self) -> (SearchTicket, ListClientsParams) {
        (self.sequencer.issue(), self.params())
    }

    /// Stores `page` unless a newer fetch was issued after `ticket`. Returns whether it was kept.
    pub fn accept(&mut self, ticket: SearchTicket, page: Page<Client>) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "stale_client_page_discarded");
            return false;
        }
        self.current = Some(page);
        true
    }
}
