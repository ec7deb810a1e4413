//! The fixed 80-byte FITS header card and its positional probes.

use core::fmt;

/// FITS card (keyword record) size in bytes.
pub const CARD_SIZE: usize = 80;

/// Magic prefix required on the first card of a valid stream: `SIMPLE`
/// left-justified in the keyword field, then the value indicator at
/// column 9.
pub const MAGIC: &[u8; 9] = b"SIMPLE  =";

/// One fixed 80-byte header card.
///
/// Card boundaries are purely positional; there is no delimiter between
/// cards in the raw stream. The keyword occupies columns 1-8 (blank-padded),
/// an optional `=` sits at column 9, and columns 10-80 hold the value and
/// inline comment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Card(pub [u8; CARD_SIZE]);

impl Card {
    /// Returns `true` if this card opens a valid primary header.
    pub fn has_magic(&self) -> bool {
        self.0.starts_with(MAGIC)
    }

    /// Returns `true` if the first 3 characters equal `END`.
    pub fn is_end(&self) -> bool {
        self.0.starts_with(b"END")
    }

    /// Returns `true` if the first 8 characters equal `XTENSION`.
    pub fn is_xtension(&self) -> bool {
        self.0.starts_with(b"XTENSION")
    }

    /// The card text with trailing blanks stripped, as emitted in the
    /// transcript.
    pub fn stripped(&self) -> String {
        let text = String::from_utf8_lossy(&self.0);
        text.trim_end_matches(' ').to_owned()
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({:?})", self.stripped())
    }
}
