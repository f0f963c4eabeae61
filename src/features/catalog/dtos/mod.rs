mod catalog_dto;
mod write_dto;

pub use catalog_dto::*;
pub use write_dto::*;
