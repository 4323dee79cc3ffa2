//! Relay connections over offset windows
//!
//! Cursors are `base64("arrayconnection:<offset>")`. Slicing follows the
//! relay array-connection rules: `after`/`before` bound the window, then
//! `first` trims from the front and `last` from the back.

use async_graphql::OutputType;
use async_graphql::connection::{Connection, CursorType, Edge};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::{BlogError, BlogResult};

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Page size when neither `first` nor `last` is given, and the maximum for both
pub const MAX_PAGE_SIZE: usize = 100;

/// Position in the full result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCursor(pub usize);

#[derive(Debug, thiserror::Error)]
#[error("Invalid cursor")]
pub struct InvalidCursor;

impl CursorType for OffsetCursor {
    type Error = InvalidCursor;

    fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
        let bytes = STANDARD.decode(s).map_err(|_| InvalidCursor)?;
        let text = String::from_utf8(bytes).map_err(|_| InvalidCursor)?;
        text.strip_prefix(CURSOR_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(OffsetCursor)
            .ok_or(InvalidCursor)
    }

    fn encode_cursor(&self) -> String {
        STANDARD.encode(format!("{CURSOR_PREFIX}{}", self.0))
    }
}

/// Pagination arguments as received
#[derive(Debug, Clone, Default)]
pub struct PageArgs {
    pub offset: Option<i32>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub first: Option<i32>,
    pub last: Option<i32>,
}

/// Slice `[start, end)` of the full list plus page info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wrap the fetched rows; `nodes[i]` sits at offset `start + i`
    pub fn into_connection<N: OutputType>(self, nodes: Vec<N>) -> Connection<OffsetCursor, N> {
        let mut connection = Connection::new(self.has_previous_page, self.has_next_page);
        connection.edges.extend(
            nodes
                .into_iter()
                .enumerate()
                .map(|(i, node)| Edge::new(OffsetCursor(self.start + i), node)),
        );
        connection
    }
}

impl PageArgs {
    /// Compute the window over a list of `total` rows
    pub fn window(&self, total: usize) -> BlogResult<Window> {
        let offset = non_negative("offset", self.offset)?.unwrap_or(0);
        let mut first = non_negative("first", self.first)?;
        let last = non_negative("last", self.last)?;

        for (name, value) in [("first", first), ("last", last)] {
            match value {
                Some(n) if n > MAX_PAGE_SIZE => {
                    return Err(BlogError::Validation(format!(
                        "Requesting {n} records exceeds the `{name}` limit of {MAX_PAGE_SIZE} records"
                    )));
                }
                _ => {}
            }
        }
        if first.is_none() && last.is_none() {
            first = Some(MAX_PAGE_SIZE);
        }

        let after = decode(self.after.as_deref())?;
        let before = decode(self.before.as_deref())?;

        let lower = offset.saturating_add(after.map_or(0, |a| a.saturating_add(1)));
        let upper = before.unwrap_or(total);

        let mut start = lower;
        let mut end = upper.min(total);
        if let Some(first) = first {
            end = end.min(start.saturating_add(first));
        }
        if let Some(last) = last {
            start = start.max(end.saturating_sub(last));
        }
        let end = end.max(start);

        Ok(Window {
            start,
            end,
            has_previous_page: last.is_some() && start > lower,
            has_next_page: first.is_some() && end < upper,
        })
    }
}

fn non_negative(name: &str, value: Option<i32>) -> BlogResult<Option<usize>> {
    value
        .map(|v| {
            usize::try_from(v)
                .map_err(|_| BlogError::Validation(format!("`{name}` must be non-negative")))
        })
        .transpose()
}

fn decode(cursor: Option<&str>) -> BlogResult<Option<usize>> {
    cursor
        .map(|c| {
            OffsetCursor::decode_cursor(c)
                .map(|c| c.0)
                .map_err(|e| BlogError::Validation(e.to_string()))
        })
        .transpose()
}
