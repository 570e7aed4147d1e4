pub mod assignments;
pub mod common;
pub mod courses;
pub mod line_items;
pub mod resource_links;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::{LtiErrorMessage, LtiErrorResponse};
