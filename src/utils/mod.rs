pub mod auth_utils;
pub mod token_utils;
pub mod validation_utils;
