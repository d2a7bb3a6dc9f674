pub mod io;
pub mod json;
pub mod run_helper;
