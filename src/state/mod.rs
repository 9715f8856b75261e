//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PaginationState`: where the walk over one category's listing pages currently is
//! - `CategoryStatus`: how that walk ended

mod category_status;
mod pagination;

// Re-export main types
pub use category_status::CategoryStatus;
pub use pagination::PaginationState;
