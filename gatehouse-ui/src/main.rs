//! Gatehouse front end
//!
//! Registration, login and the post-login dashboard shell built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Login with "remember me" and social redirects
//! - Registration with a live password strength meter
//! - Dashboard shell with sidebar navigation and logout
//! - Toast notifications
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application. Every decision is made by
//! the `gatehouse` library; this crate keeps its state in signals, persists to
//! the browser's `localStorage` and schedules the artificial delays.

use leptos::*;

mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
