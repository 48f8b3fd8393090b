use std::ops::RangeInclusive;

pub const SEARCH_PAGE_SIZE: usize = 10;
pub const MY_COURSES_PAGE_SIZE: usize = 5;
pub const PAGE_GROUP_SIZE: usize = 5;

/// Client-side pagination over an already fetched list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub total_items: usize,
    pub page_size: usize,
}

impl Paginator {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Pulls an out-of-range page back to the nearest valid one (1 when empty).
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.page_count().max(1))
    }

    /// Index range `[(k-1)*P, min(k*P, N))` for page `k`; empty past the end.
    pub fn item_range(&self, page: usize) -> std::ops::Range<usize> {
        if page == 0 {
            return 0..0;
        }
        let start = (page - 1).saturating_mul(self.page_size).min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let range = self.item_range(page);
        items.get(range).unwrap_or(&[])
    }

    /// Page buttons shown together with `page`: groups of five by integer division.
    pub fn page_group(&self, page: usize) -> RangeInclusive<usize> {
        let pages = self.page_count();
        if pages == 0 {
            return 1..=0;
        }
        let page = self.clamp_page(page);
        let group = (page - 1) / PAGE_GROUP_SIZE;
        let first = group * PAGE_GROUP_SIZE + 1;
        let last = (first + PAGE_GROUP_SIZE - 1).min(pages);
        first..=last
    }

    pub fn has_prev_group(&self, page: usize) -> bool {
        *self.page_group(page).start() > 1
    }

    pub fn has_next_group(&self, page: usize) -> bool {
        *self.page_group(page).end() < self.page_count()
    }
}

/// One rendered page of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    pub group: RangeInclusive<usize>,
    pub total_items: usize,
}

impl<T: Clone> PageView<T> {
    pub fn of(items: &[T], page_size: usize, page: usize) -> Self {
        let paginator = Paginator::new(items.len(), page_size);
        let page = paginator.clamp_page(page);
        Self {
            items: paginator.slice(items, page).to_vec(),
            page,
            page_count: paginator.page_count(),
            group: paginator.page_group(page),
            total_items: items.len(),
        }
    }
}
