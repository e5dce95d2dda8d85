//! Splits post listings into pages.
//!
//! The page size always comes from `site.post_per_page`; nothing else in
//! the crate picks a number of its own.
//!
//! Page 1 is the site root (`index.html`), page n lives at `page/n/`.

use crate::site::SiteConfig;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
    total_items: usize,
}

/// One listing page, as templates see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub total: usize,
    /// Item range `start..end` shown on this page.
    pub start: usize,
    pub end: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Site-relative path, `""` for the first page.
    pub path: String,
    pub prev_path: Option<String>,
    pub next_path: Option<String>,
}

impl Page {
    /// Output file of this page, relative to the output directory.
    pub fn output_file(&self) -> PathBuf {
        PathBuf::from(&self.path).join("index.html")
    }
}

/// Site-relative path of listing page `number`.
pub fn page_path(number: usize) -> String {
    if number <= 1 {
        String::new()
    } else {
        format!("page/{number}/")
    }
}

impl Paginator {
    pub fn new(site: &SiteConfig, total_items: usize) -> Self {
        Self {
            // a validated site never has 0 here
            per_page: site.post_per_page.max(1),
            total_items,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages; never 0, so an empty blog still has a home page.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page).max(1)
    }

    pub fn page(&self, number: usize) -> Option<Page> {
        let total = self.total_pages();
        if number == 0 || number > total {
            return None;
        }
        let start = ((number - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        let has_prev = number > 1;
        let has_next = number < total;
        Some(Page {
            number,
            total,
            start,
            end,
            has_prev,
            has_next,
            path: page_path(number),
            prev_path: has_prev.then(|| page_path(number - 1)),
            next_path: has_next.then(|| page_path(number + 1)),
        })
    }

    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        (1..=self.total_pages()).filter_map(|n| self.page(n))
    }

    /// The items shown on `page`.
    pub fn slice<'a, T>(&self, items: &'a [T], page: &Page) -> &'a [T] {
        let end = page.end.min(items.len());
        let start = page.start.min(end);
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(per_page: usize) -> SiteConfig {
        SiteConfig {
            site_url: "https://example.com/".into(),
            author: "a".into(),
            desc: "d".into(),
            title: "t".into(),
            og_image: String::new(),
            keywords: String::new(),
            post_per_page: per_page,
        }
    }

    #[test]
    fn test_page_size_comes_from_site() {
        let items: Vec<usize> = (0..7).collect();

        let p = Paginator::new(&site(3), items.len());
        assert_eq!(p.total_pages(), 3);
        let sizes: Vec<_> = p.pages().map(|pg| p.slice(&items, &pg).len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);

        // changing the config alone changes every listing
        let p = Paginator::new(&site(5), items.len());
        let sizes: Vec<_> = p.pages().map(|pg| p.slice(&items, &pg).len()).collect();
        assert_eq!(sizes, vec![5, 2]);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let p = Paginator::new(&site(3), 0);
        let pages: Vec<_> = p.pages().collect();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].start, 0);
        assert_eq!(pages[0].end, 0);
        assert!(!pages[0].has_next);
        assert!(!pages[0].has_prev);
    }

    #[test]
    fn test_paths_and_links() {
        let p = Paginator::new(&site(2), 5);
        let first = p.page(1).unwrap();
        assert_eq!(first.path, "");
        assert_eq!(first.output_file(), PathBuf::from("index.html"));
        assert_eq!(first.next_path.as_deref(), Some("page/2/"));
        assert_eq!(first.prev_path, None);

        let second = p.page(2).unwrap();
        assert_eq!(second.prev_path.as_deref(), Some(""));
        assert_eq!(second.next_path.as_deref(), Some("page/3/"));
        assert_eq!(second.output_file(), PathBuf::from("page/2/index.html"));

        let last = p.page(3).unwrap();
        assert_eq!((last.start, last.end), (4, 5));
        assert!(!last.has_next);
    }

    #[test]
    fn test_out_of_range_pages() {
        let p = Paginator::new(&site(3), 4);
        assert!(p.page(0).is_none());
        assert!(p.page(3).is_none());
    }

    #[test]
    fn test_slices_preserve_order() {
        let items = ["a", "b", "c", "d", "e"];
        let p = Paginator::new(&site(2), items.len());
        let joined: Vec<_> = p.pages().flat_map(|pg| p.slice(&items, &pg).to_vec()).collect();
        assert_eq!(joined, items);
    }
}
