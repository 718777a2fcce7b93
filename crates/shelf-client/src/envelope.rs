//! Response envelopes used by the bookstore API.

use serde::Deserialize;
use shelf_commerce::search::Page;

/// A single resource, either wrapped in `{ "data": ... }` or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Single<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Single<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Single::Wrapped { data } => data,
            Single::Bare(value) => value,
        }
    }
}

/// `{ "data": [...], "page": n, "totalPages": n }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookList<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> BookList<T> {
    pub(crate) fn into_page(self, requested_page: u32) -> Page<T> {
        Page::new(
            self.data,
            self.page.unwrap_or(requested_page),
            self.total_pages.unwrap_or(1),
        )
    }
}

/// `{ "data": [...], "meta": { "page"?: n, "totalPages": n } }`
#[derive(Debug, Deserialize)]
pub(crate) struct MetaList<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: ListMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListMeta {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> MetaList<T> {
    pub(crate) fn into_page(self, requested_page: u32) -> Page<T> {
        Page::new(
            self.data,
            self.meta.page.unwrap_or(requested_page),
            self.meta.total_pages.unwrap_or(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_wrapped_or_bare() {
        let wrapped: Single<u32> = serde_json::from_str(r#"{"data": 7}"#).unwrap();
        assert_eq!(wrapped.into_inner(), 7);

        #[derive(Debug, Deserialize, PartialEq)]
        struct Thing {
            id: u32,
        }
        let bare: Single<Thing> = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(bare.into_inner(), Thing { id: 3 });
    }

    #[test]
    fn test_book_list_page() {
        let list: BookList<u8> =
            serde_json::from_str(r#"{"data": [1, 2], "page": 2, "totalPages": 5}"#).unwrap();
        let page = list.into_page(1);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_next());
    }

    #[test]
    fn test_meta_list_without_page() {
        let list: MetaList<u8> =
            serde_json::from_str(r#"{"data": [], "meta": {"totalPages": 3}}"#).unwrap();
        let page = list.into_page(2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }
}
