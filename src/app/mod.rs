pub mod checks;
pub mod context;
pub mod entry;
