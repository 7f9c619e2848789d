//! Helpers for printing feed text to a terminal.
//!
//! ```
//! use arxfeed::util::{single_line, strip_control_chars};
//!
//! let title = strip_control_chars("Dark\u{1b}[2J Matter\n Halos ");
//! assert_eq!(single_line(&title), "Dark Matter Halos");
//! ```

mod text;

pub use text::{single_line, strip_control_chars};
