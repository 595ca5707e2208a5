pub mod config;
pub mod debounce;
pub mod dom;
pub mod url_state;
