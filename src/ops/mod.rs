pub mod confirm;
pub mod editor;
pub mod filter;
pub mod notice;
pub mod store;
