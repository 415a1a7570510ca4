pub mod app;
pub mod form;
pub mod header;
pub mod result;
pub mod spinner;
