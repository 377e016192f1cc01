//! URL handling module for Sumi-Sitemap
//!
//! This module provides URL normalization, reference resolution, domain
//! extraction, and domain scope matching.

mod domain;
mod matcher;
mod normalize;
mod resolve;

pub use domain::extract_domain;
pub use matcher::{matches_wildcard, DomainMatcher};
pub use normalize::normalize_url;
pub use resolve::Resolver;
