pub mod require_lti_token;

pub use require_lti_token::RequireLtiToken;
