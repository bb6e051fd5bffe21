mod console;

pub use console::{history_lines, Console};
