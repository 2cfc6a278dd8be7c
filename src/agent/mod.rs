pub mod loop_;
pub mod prompt;

#[cfg(test)]
mod tests;

#[allow(unused_imports)]
pub use loop_::{is_exit_keyword, process_message, run};
