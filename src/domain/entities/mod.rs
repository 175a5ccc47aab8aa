//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewUrlMapping`] is the insert payload, [`UrlMapping`] the stored record.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
