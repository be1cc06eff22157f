//! Styled building blocks shared by the views.

pub use dioxus_primitives::toast::{use_toast, ToastOptions, ToastProvider};
