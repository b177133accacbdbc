//! Form validation
//!
//! Field-level checks used by the new-bill form: required fields, the
//! receipt extension whitelist and lenient integer parsing.

pub mod validators;

pub use validators::{
    BAD_FORMAT_MESSAGE, MISSING_FILE_NAME, extension_in, file_extension, parse_amount, parse_int,
    parse_pct, required,
};
