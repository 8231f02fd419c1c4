pub mod field;
pub mod records;
pub mod template;
