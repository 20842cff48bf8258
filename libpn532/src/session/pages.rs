// libpn532/src/session/pages.rs

use crate::constants::{PAGE_ALIGNMENT, PAGE_SENTINEL, PAGE_SIZE};

/// Result of a multi-page read: one chunk per page, in read order.
///
/// Chunks are only ever appended. The page holding the sentinel is cut
/// right after it and the dump is then padded with zeros to a multiple of
/// `PAGE_ALIGNMENT` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageBuffer {
    start_page: u8,
    pages: Vec<Vec<u8>>,
    padding: usize,
    terminated: bool,
}

impl PageBuffer {
    /// Empty buffer whose first page is `start_page`.
    pub fn new(start_page: u8) -> Self {
        Self {
            start_page,
            ..Self::default()
        }
    }

    /// Append the first `PAGE_SIZE` bytes of a READ answer.
    ///
    /// Returns `true` when the page carried the sentinel; the buffer is then
    /// final and further pages are ignored.
    pub fn push_page(&mut self, data: &[u8]) -> bool {
        if self.terminated {
            return true;
        }

        let page = &data[..data.len().min(PAGE_SIZE)];
        match page.iter().position(|&b| b == PAGE_SENTINEL) {
            Some(pos) => {
                self.pages.push(page[..=pos].to_vec());
                let used = self.data_len();
                self.padding = (PAGE_ALIGNMENT - used % PAGE_ALIGNMENT) % PAGE_ALIGNMENT;
                self.terminated = true;
                true
            }
            None => {
                self.pages.push(page.to_vec());
                false
            }
        }
    }

    fn data_len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Total dump length including alignment padding.
    pub fn len(&self) -> usize {
        self.data_len() + self.padding
    }

    /// True before the first page.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened dump, padding included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for p in &self.pages {
            out.extend_from_slice(p);
        }
        out.resize(self.len(), 0);
        out
    }

    /// Page chunks as read (the sentinel page possibly shortened).
    pub fn pages(&self) -> &[Vec<u8>] {
        &self.pages
    }

    /// Pages stored so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page number of the first stored page.
    pub fn start_page(&self) -> u8 {
        self.start_page
    }

    /// Index of the page the next read should target.
    pub fn next_page(&self) -> usize {
        self.start_page as usize + self.pages.len()
    }

    /// Zero bytes appended after the sentinel to reach alignment.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// True once the sentinel was seen.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}
