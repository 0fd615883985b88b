pub mod favorites;
pub mod filter;
pub mod lightbox;
pub mod source;
pub mod storage;
pub mod store;
pub mod view;
