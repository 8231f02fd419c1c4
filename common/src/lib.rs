pub mod api;
pub mod codec;
pub mod forms;
pub mod model;
pub mod store;
pub mod training;
