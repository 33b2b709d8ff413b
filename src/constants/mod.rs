pub mod middleware_constants;
