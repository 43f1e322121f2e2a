/// Client-side page slicing over a fully loaded collection.
///
/// Pages are zero-based. Replacing the underlying items resets the current
/// page to 0 so a stale out-of-range page is never displayed.
#[derive(Clone, Debug)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_elements(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The slice for the current page, empty when the collection is empty.
    pub fn current_page_items(&self) -> &[T] {
        let start = self.current_page * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// Moves to page `page`; returns false (and changes nothing) when the
    /// index is out of `[0, total_pages)`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= self.total_pages() {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Replaces the collection wholesale and resets to the first page.
    pub fn update_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 0;
    }
}
