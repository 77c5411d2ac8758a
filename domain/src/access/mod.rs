//! Repository access control

pub mod allow_list;

pub use allow_list::{AccessDenial, AllowList, AllowListEntry};
