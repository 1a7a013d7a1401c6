//! Shared helpers for dates, HTML escaping and URL assembly

pub mod date;
pub mod html;
pub mod url;
