//! State Management
//!
//! Global application state and the `localStorage` backend.

pub mod global;
pub mod local_storage;

pub use global::{provide_global_state, FormError, GlobalState, ToastEntry};
