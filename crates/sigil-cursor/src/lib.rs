//! # Sigil Cursor
//!
//! Character-level input for the Sigil parser.
//!
//! There is no token stream: the parser pulls one character at a time from a
//! [`Cursor`], which decodes UTF-8 from any [`std::io::Read`], tracks the
//! line/column position and allows exactly one character to be pushed back.
//!
//! ## Example
//!
//! ```
//! use sigil_cursor::{Cursor, CursorError};
//!
//! let mut cursor = Cursor::new("a\nb".as_bytes());
//! assert_eq!(cursor.next().unwrap(), 'a');
//! assert_eq!(cursor.next().unwrap(), '\n');
//! cursor.pushback().unwrap();
//! assert_eq!(cursor.next().unwrap(), '\n');
//! assert_eq!(cursor.next().unwrap(), 'b');
//! assert!(matches!(cursor.next(), Err(CursorError::EndOfInput)));
//! ```

mod cursor;
mod error;

pub use cursor::Cursor;
pub use error::CursorError;
