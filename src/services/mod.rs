pub mod format_validator;
pub mod orm_service;

pub use orm_service::OrmService;
