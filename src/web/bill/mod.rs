pub mod data;
pub mod format;
pub mod ssr;
