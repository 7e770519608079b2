//! Output handling: the discovered-URL list file.

mod url_list;

pub use url_list::UrlList;
