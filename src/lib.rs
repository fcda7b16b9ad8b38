pub mod annotate;
pub mod documents;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod parser;
pub mod route;
