use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Page bound applied to the account token, account NFT and topic message listings when the caller
/// gives none.
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Largest `limit` the mirror node accepts for a single page.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

impl Links {
    /// The next page cursor, if there is one. An empty cursor ends the traversal.
    pub fn into_next(self) -> Option<String> {
        self.next.filter(|next| !next.is_empty())
    }
}

/// A response envelope that carries one page of items and a cursor to the next page.
pub trait Paged: DeserializeOwned {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

/// Bounds of a paginated traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Stop once this many items are collected. The result is truncated to exactly this many.
    pub limit: Option<usize>,
    /// Stop after this many pages even if a cursor remains.
    pub max_pages: Option<usize>,
}

impl PageOptions {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Applies [DEFAULT_MAX_PAGES] when no page bound was given.
    pub fn or_default_max_pages(mut self) -> Self {
        self.max_pages.get_or_insert(DEFAULT_MAX_PAGES);
        self
    }

    /// `limit` query parameter for the first request.
    pub fn page_size(&self) -> Option<usize> {
        self.limit.map(|limit| limit.clamp(1, MAX_PAGE_SIZE))
    }
}

/// Declares a paged envelope whose items live under `$field`.
#[doc(hidden)]
#[macro_export]
macro_rules! paged_response {
    ($(#[$meta:meta])* $name:ident, $field:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            #[serde(default)]
            pub $field: Vec<$item>,
            #[serde(default)]
            pub links: $crate::page::Links,
        }

        impl $crate::page::Paged for $name {
            type Item = $item;

            fn into_parts(self) -> (Vec<Self::Item>, Option<String>) {
                (self.$field, self.links.into_next())
            }
        }
    };
}
