//! URL helpers: host and registrable-domain extraction, same-site checks,
//! and link cleanup.

mod domain;
mod normalize;

pub use domain::{extract_host, is_same_site, registrable_domain, site_label};
pub use normalize::{clean_url, looks_like_file};
