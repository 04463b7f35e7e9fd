pub mod endpoint;
pub mod entities;
pub mod errors;
