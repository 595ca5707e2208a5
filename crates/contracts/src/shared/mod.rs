pub mod catalog_filter;
pub mod html_escape;
