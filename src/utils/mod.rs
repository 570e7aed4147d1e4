pub mod extractor;
pub mod jwt;
pub mod lti_response;
pub mod parameter_error_handler;
pub mod validate;

pub use extractor::{SafeCourseIdI64, SafeLineItemPath};
pub use lti_response::{
    line_item_empty, line_item_json, lti_error_response, service_error_response,
};
pub use parameter_error_handler::query_error_handler;
