//! Client-side sorting and pagination for the listing tables.
//!
//! The UI's data table owns a [`TableState`] per table and asks it which rows
//! of the (already fetched) data to render. Nothing here knows about columns
//! beyond their index; the caller supplies a sort key per `(column, row)`.

use std::cmp::Ordering;
use std::ops::Range;

use crate::preferences::normalize_page_size;

/// Upper bound of numbered page buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 20;

/// Value a row is sorted by in one column.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    /// Ascending order. Numbers before text; missing values always sort last,
    /// see [`sort_indices`].
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Greater,
            (_, SortKey::Missing) => Ordering::Less,
        }
    }
}

impl From<i64> for SortKey {
    fn from(v: i64) -> Self {
        SortKey::Number(v as f64)
    }
}

impl From<usize> for SortKey {
    fn from(v: usize) -> Self {
        SortKey::Number(v as f64)
    }
}

impl From<f64> for SortKey {
    fn from(v: f64) -> Self {
        SortKey::Number(v)
    }
}

impl From<&str> for SortKey {
    fn from(v: &str) -> Self {
        SortKey::Text(v.to_string())
    }
}

impl From<String> for SortKey {
    fn from(v: String) -> Self {
        SortKey::Text(v)
    }
}

impl<T: Into<SortKey>> From<Option<T>> for SortKey {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SortKey::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// Entry of the page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Sort + pagination state of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    sort: Option<SortState>,
    page_index: usize,
    page_size: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self { sort: None, page_index: 0, page_size: normalize_page_size(page_size) }
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Header click: unsorted -> ascending -> descending -> unsorted on the
    /// same column; another column starts over at ascending.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some(SortState { column: c, direction: SortDirection::Ascending }) if c == column => {
                Some(SortState { column, direction: SortDirection::Descending })
            }
            Some(SortState { column: c, direction: SortDirection::Descending }) if c == column => None,
            _ => Some(SortState { column, direction: SortDirection::Ascending }),
        };
    }

    /// Normalizes and applies a page size; returns the value actually used so
    /// the caller can store it as the shared preference.
    pub fn set_page_size(&mut self, page_size: usize) -> usize {
        self.page_size = normalize_page_size(page_size);
        self.page_index = 0;
        self.page_size
    }

    /// Number of pages, never less than one.
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size).max(1)
    }

    /// Pulls the page index back into range after the data shrank.
    pub fn clamp_page(&mut self, row_count: usize) {
        let last = self.page_count(row_count) - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, row_count: usize) -> bool {
        self.page_index + 1 < self.page_count(row_count)
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn next(&mut self, row_count: usize) {
        if self.can_next(row_count) {
            self.page_index += 1;
        }
    }

    pub fn last(&mut self, row_count: usize) {
        self.page_index = self.page_count(row_count) - 1;
    }

    pub fn go_to(&mut self, page_index: usize, row_count: usize) {
        self.page_index = page_index.min(self.page_count(row_count) - 1);
    }

    /// Row positions (into the sorted order) shown on the current page.
    pub fn page_range(&self, row_count: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(row_count);
        let end = (start + self.page_size).min(row_count);
        start..end
    }

    /// Rows of the current page, sorted. `key(column, row)` yields the value a
    /// row sorts by in a column.
    pub fn visible_rows<'a, T, K>(&self, rows: &'a [T], key: K) -> Vec<&'a T>
    where
        K: Fn(usize, &T) -> SortKey,
    {
        let order = match self.sort {
            Some(sort) => sort_indices(rows, |r| key(sort.column, r), sort.direction),
            None => (0..rows.len()).collect(),
        };
        order[self.page_range(rows.len())].iter().map(|&i| &rows[i]).collect()
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(crate::preferences::DEFAULT_PAGE_SIZE)
    }
}

/// Stable sort of row indices. Missing keys go last in both directions.
pub fn sort_indices<T, K>(rows: &[T], key: K, direction: SortDirection) -> Vec<usize>
where
    K: Fn(&T) -> SortKey,
{
    let keys: Vec<SortKey> = rows.iter().map(&key).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let (ka, kb) = (&keys[a], &keys[b]);
        match (ka, kb) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Greater,
            (_, SortKey::Missing) => Ordering::Less,
            _ => match direction {
                SortDirection::Ascending => ka.compare(kb),
                SortDirection::Descending => kb.compare(ka),
            },
        }
    });
    order
}

/// Page buttons around `current` (zero-based), at most `max_buttons` numbered
/// ones, with an ellipsis on each side where pages are hidden.
pub fn page_window(current: usize, page_count: usize, max_buttons: usize) -> Vec<PageButton> {
    let max_buttons = max_buttons.max(1);
    if page_count <= max_buttons {
        return (0..page_count).map(PageButton::Page).collect();
    }
    let mut start = current.saturating_sub(max_buttons / 2);
    let mut end = start + max_buttons;
    if end > page_count {
        end = page_count;
        start = page_count - max_buttons;
    }

    let mut buttons = Vec::with_capacity(max_buttons + 2);
    if start > 0 {
        buttons.push(PageButton::Ellipsis);
    }
    buttons.extend((start..end).map(PageButton::Page));
    if end < page_count {
        buttons.push(PageButton::Ellipsis);
    }
    buttons
}
