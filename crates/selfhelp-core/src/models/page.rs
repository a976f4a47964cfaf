use serde::{Deserialize, Serialize};

/// One page of a paged list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default = "default_last")]
    pub last: bool,
}

fn default_last() -> bool {
    true
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
            last: true,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Page index to request next, if any
    pub fn next_page(&self) -> Option<u32> {
        if self.last {
            None
        } else {
            Some(self.number + 1)
        }
    }
}
