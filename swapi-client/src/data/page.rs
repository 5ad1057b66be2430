use serde::{Deserialize, Serialize};

/// One page of a paginated SWAPI listing or search.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }
}
