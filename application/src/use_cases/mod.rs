//! Application use cases

pub mod dispatch;

pub use dispatch::{DispatchRequest, DispatchResponse, DispatchUseCase, ResponseBody};
