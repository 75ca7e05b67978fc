//! Server-rendered HTML pages. Every interpolated value goes through
//! [`layout::escape`].

pub mod layout;
pub mod pages;

pub use pages::*;
