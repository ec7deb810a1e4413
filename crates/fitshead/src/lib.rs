//! FITS header card scanning and keyword tabulation.
//!
//! Two stages mirror the classic `dfits | fitsort` pipeline: [`scan`] walks
//! raw 80-byte card streams and writes a line-oriented transcript, and
//! [`table`] aggregates transcripts covering many files into one
//! width-aligned table of requested keyword values.

pub mod card;
pub mod error;
pub mod extract;
pub mod keyword;
pub mod scan;
pub mod table;
pub mod transcript;

pub use card::{Card, CARD_SIZE, MAGIC};
pub use error::{Error, Result};
pub use keyword::KeywordSet;
pub use scan::{copy_headers, CardReader, HeaderSelect};
pub use table::{FileRecord, KeywordTable};
