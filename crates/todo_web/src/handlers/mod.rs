//! Request handlers.
//!
//! - `page`: the server-rendered task page.
//! - `api`: JSON endpoints used by the page script.

pub mod api;
pub mod page;
