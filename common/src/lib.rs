pub mod model;
pub mod requests;
pub mod validation;
