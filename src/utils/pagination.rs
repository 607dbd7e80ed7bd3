use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::WorkSession;
use crate::model::employee::Employee;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Zero-based page number
    #[schema(example = 0)]
    pub page: Option<u32>,
    /// Items per page (1-100)
    #[schema(example = 10)]
    pub size: Option<u32>,
    /// Case-insensitive filter on names, email or username
    pub search: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// One slice of an in-memory list, with the navigation flags list screens need.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(EmployeePage = Page<Employee>, SessionPage = Page<WorkSession>)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn of(items: Vec<T>, page: u32, size: u32) -> Self {
        let size = size.clamp(1, MAX_PAGE_SIZE);
        let total_elements = items.len() as u64;
        let total_pages = total_elements.div_ceil(u64::from(size));
        // `page` comes straight from the query string
        let next = u64::from(page) + 1;

        let content: Vec<T> = items
            .into_iter()
            .skip((page as usize).saturating_mul(size as usize))
            .take(size as usize)
            .collect();

        Self {
            number_of_elements: content.len() as u32,
            content,
            page_number: page,
            page_size: size,
            total_elements,
            total_pages: total_pages as u32,
            first: page == 0,
            last: next >= total_pages,
            has_next: next < total_pages,
            has_previous: page > 0,
        }
    }
}
