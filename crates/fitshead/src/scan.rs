//! Card-stream reading and header/extension traversal.
//!
//! [`copy_headers`] walks one stream's primary header and extensions and
//! writes the transcript consumed by the aggregator. Traversal is strictly
//! forward, one 80-byte record at a time, and never reads past the boundary
//! the selector asked it to stop at.

use std::io::{Read, Write};

use crate::card::{Card, CARD_SIZE};
use crate::error::{Error, Result};
use crate::transcript::write_xtension_marker;

/// Which header units of a stream to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSelect {
    /// Primary header only (the default).
    MainOnly,
    /// Primary header and every extension.
    All,
    /// Primary header plus the single 1-based extension `n`. Input after
    /// that extension's END card is left unread.
    Single(u32),
    /// Emit nothing at all; the magic prefix is still validated.
    Nothing,
}

impl HeaderSelect {
    /// Map a `-x <n>` command-line index onto a selector: negative emits
    /// nothing, 0 selects every extension, `n >= 1` a single extension.
    pub fn from_index(n: i64) -> Self {
        match n {
            i64::MIN..=-1 => HeaderSelect::Nothing,
            0 => HeaderSelect::All,
            _ => HeaderSelect::Single(n as u32),
        }
    }

    fn wants_extension(self, n: u32) -> bool {
        self == HeaderSelect::All || self == HeaderSelect::Single(n)
    }
}

/// Reads fixed 80-byte card records from a byte source.
pub struct CardReader<R> {
    inner: R,
}

impl<R: Read> CardReader<R> {
    pub fn new(inner: R) -> Self {
        CardReader { inner }
    }

    /// Pull the next card.
    ///
    /// Returns `Ok(None)` at a clean end of stream on a record boundary.
    /// A partial final record (1-79 bytes) is a [`Error::TruncatedCard`];
    /// short reads from the source are filled by looping.
    pub fn read_card(&mut self) -> Result<Option<Card>> {
        let mut buf = [0u8; CARD_SIZE];
        let mut filled = 0;
        while filled < CARD_SIZE {
            match self.inner.read(&mut buf[filled..])? {
                0 if filled == 0 => return Ok(None),
                0 => return Err(Error::TruncatedCard),
                n => filled += n,
            }
        }
        Ok(Some(Card(buf)))
    }
}

fn emit_card<W: Write>(out: &mut W, card: &Card) -> Result<()> {
    writeln!(out, "{}", card.stripped())?;
    Ok(())
}

/// Copy the selected header units of `input` to `out` as transcript lines.
///
/// The first card must carry the `SIMPLE  =` magic prefix or the whole
/// operation fails with [`Error::NotFits`]. The primary header is emitted
/// through its END card for every selector except [`HeaderSelect::Nothing`];
/// each selected extension is announced with a `====> xtension <n>` marker
/// before its XTENSION card.
pub fn copy_headers<R: Read, W: Write>(
    input: R,
    select: HeaderSelect,
    out: &mut W,
) -> Result<()> {
    let mut reader = CardReader::new(input);

    let first = reader.read_card()?.ok_or(Error::TruncatedCard)?;
    if !first.has_magic() {
        return Err(Error::NotFits);
    }
    if select == HeaderSelect::Nothing {
        return Ok(());
    }

    // Primary header: every card through END. Running out of input before
    // the END card is an error here.
    emit_card(out, &first)?;
    loop {
        let card = reader.read_card()?.ok_or(Error::TruncatedCard)?;
        emit_card(out, &card)?;
        if card.is_end() {
            break;
        }
    }

    if select == HeaderSelect::MainOnly {
        return Ok(());
    }

    let mut n_xt: u32 = 0;
    loop {
        // Scan for the next XTENSION card, discarding everything between
        // header units. A clean end of stream here is normal termination.
        let xtension = loop {
            match reader.read_card()? {
                None => return Ok(()),
                Some(card) if card.is_xtension() => break card,
                Some(_) => {}
            }
        };
        n_xt += 1;

        if select.wants_extension(n_xt) {
            write_xtension_marker(out, n_xt)?;
            emit_card(out, &xtension)?;
            // A stream that ends cleanly before this extension's END card
            // terminates silently.
            loop {
                match reader.read_card()? {
                    None => return Ok(()),
                    Some(card) => {
                        emit_card(out, &card)?;
                        if card.is_end() {
                            break;
                        }
                    }
                }
            }
        }

        if select == HeaderSelect::Single(n_xt) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn card_bytes(s: &str) -> Vec<u8> {
        let mut buf = vec![b' '; CARD_SIZE];
        let bytes = s.as_bytes();
        let len = bytes.len().min(CARD_SIZE);
        buf[..len].copy_from_slice(&bytes[..len]);
        buf
    }

    fn stream(cards: &[&str]) -> Vec<u8> {
        cards.iter().flat_map(|c| card_bytes(c)).collect()
    }

    fn main_header() -> Vec<&'static str> {
        vec![
            "SIMPLE  =                    T / conforms",
            "BITPIX  =                   16",
            "NAXIS   =                    0",
            "END",
        ]
    }

    fn extension(n: usize) -> Vec<String> {
        vec![
            String::from("XTENSION= 'IMAGE   '"),
            format!("EXTVER  =                    {}", n),
            String::from("END"),
        ]
    }

    fn multi_extension_stream(extensions: usize) -> Vec<u8> {
        let mut cards: Vec<String> = main_header().iter().map(|s| s.to_string()).collect();
        for n in 1..=extensions {
            cards.extend(extension(n));
        }
        let refs: Vec<&str> = cards.iter().map(String::as_str).collect();
        stream(&refs)
    }

    fn run(data: &[u8], select: HeaderSelect) -> Result<String> {
        let mut out = Vec::new();
        copy_headers(Cursor::new(data), select, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // ---- CardReader ----

    #[test]
    fn read_card_counts_records() {
        let data = stream(&main_header());
        let mut reader = CardReader::new(Cursor::new(&data));
        let mut count = 0;
        while reader.read_card().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn read_card_empty_stream() {
        let mut reader = CardReader::new(Cursor::new(&b""[..]));
        assert!(reader.read_card().unwrap().is_none());
    }

    #[test]
    fn read_card_partial_record_fails() {
        let full = stream(&main_header());
        let data = &full[..CARD_SIZE + 17];
        let mut reader = CardReader::new(Cursor::new(data));
        assert!(reader.read_card().unwrap().is_some());
        assert!(matches!(reader.read_card(), Err(Error::TruncatedCard)));
    }

    // ---- magic validation ----

    #[test]
    fn missing_magic_is_not_fits() {
        let data = stream(&["BITPIX  =                   16", "END"]);
        assert!(matches!(
            run(&data, HeaderSelect::MainOnly),
            Err(Error::NotFits)
        ));
    }

    #[test]
    fn empty_input_is_truncated() {
        assert!(matches!(
            run(b"", HeaderSelect::MainOnly),
            Err(Error::TruncatedCard)
        ));
    }

    #[test]
    fn magic_validated_even_when_emitting_nothing() {
        let data = stream(&["BITPIX  =                   16", "END"]);
        assert!(matches!(
            run(&data, HeaderSelect::Nothing),
            Err(Error::NotFits)
        ));
    }

    // ---- main header ----

    #[test]
    fn main_only_emits_through_end() {
        let data = multi_extension_stream(2);
        let out = run(&data, HeaderSelect::MainOnly).unwrap();
        assert_eq!(
            out,
            "SIMPLE  =                    T / conforms\n\
             BITPIX  =                   16\n\
             NAXIS   =                    0\n\
             END\n"
        );
    }

    #[test]
    fn main_header_without_end_fails() {
        let data = stream(&[
            "SIMPLE  =                    T",
            "BITPIX  =                   16",
        ]);
        assert!(matches!(
            run(&data, HeaderSelect::MainOnly),
            Err(Error::TruncatedCard)
        ));
    }

    #[test]
    fn nothing_emits_nothing() {
        let data = multi_extension_stream(2);
        let out = run(&data, HeaderSelect::Nothing).unwrap();
        assert!(out.is_empty());
    }

    // ---- extensions ----

    #[test]
    fn all_emits_every_extension_with_markers() {
        let data = multi_extension_stream(3);
        let out = run(&data, HeaderSelect::All).unwrap();
        assert!(out.starts_with("SIMPLE  =                    T / conforms\n"));
        for n in 1..=3 {
            assert!(out.contains(&format!("====> xtension {}\n", n)));
            assert!(out.contains(&format!("EXTVER  =                    {}", n)));
        }
        // Markers appear in read order.
        let p1 = out.find("====> xtension 1").unwrap();
        let p2 = out.find("====> xtension 2").unwrap();
        let p3 = out.find("====> xtension 3").unwrap();
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn single_emits_main_plus_requested_extension() {
        let data = multi_extension_stream(3);
        let out = run(&data, HeaderSelect::Single(2)).unwrap();
        assert!(out.contains("SIMPLE  =                    T / conforms\n"));
        assert!(out.contains("====> xtension 2\n"));
        assert!(out.contains("EXTVER  =                    2"));
        assert!(!out.contains("====> xtension 1"));
        assert!(!out.contains("====> xtension 3"));
        assert!(!out.contains("EXTVER  =                    1"));
    }

    #[test]
    fn single_stops_reading_after_requested_extension() {
        let data = multi_extension_stream(3);
        let mut cursor = Cursor::new(&data[..]);
        let mut out = Vec::new();
        copy_headers(&mut cursor, HeaderSelect::Single(1), &mut out).unwrap();
        // Extensions 2 and 3 are left unread.
        assert!((cursor.position() as usize) < data.len());
        assert_eq!(cursor.position() as usize, (4 + 3) * CARD_SIZE);
    }

    #[test]
    fn single_beyond_extension_count_is_not_an_error() {
        let data = multi_extension_stream(1);
        let out = run(&data, HeaderSelect::Single(2)).unwrap();
        assert!(out.contains("SIMPLE  =                    T / conforms\n"));
        assert!(!out.contains("====> xtension"));
    }

    #[test]
    fn stream_without_extensions_terminates_cleanly() {
        let data = stream(&main_header());
        let out = run(&data, HeaderSelect::All).unwrap();
        assert!(out.ends_with("END\n"));
        assert!(!out.contains("====>"));
    }

    #[test]
    fn clean_eof_inside_extension_is_tolerated() {
        let mut cards: Vec<String> = main_header().iter().map(|s| s.to_string()).collect();
        cards.push(String::from("XTENSION= 'IMAGE   '"));
        cards.push(String::from("EXTVER  =                    1"));
        // No END card for the extension.
        let refs: Vec<&str> = cards.iter().map(String::as_str).collect();
        let data = stream(&refs);
        let out = run(&data, HeaderSelect::All).unwrap();
        assert!(out.contains("====> xtension 1\n"));
        assert!(out.ends_with("EXTVER  =                    1\n"));
    }

    #[test]
    fn partial_card_inside_extension_fails() {
        let mut data = multi_extension_stream(1);
        data.truncate(data.len() - 40);
        assert!(matches!(
            run(&data, HeaderSelect::All),
            Err(Error::TruncatedCard)
        ));
    }

    #[test]
    fn valid_stream_emits_one_line_per_card() {
        // A stream of 80k bytes yields exactly k transcript lines (markers
        // aside).
        let data = multi_extension_stream(2);
        let out = run(&data, HeaderSelect::All).unwrap();
        let card_lines = out.lines().filter(|l| !l.starts_with("====>")).count();
        assert_eq!(card_lines, data.len() / CARD_SIZE);
    }

    // ---- selector mapping ----

    #[test]
    fn selector_from_index() {
        assert_eq!(HeaderSelect::from_index(-3), HeaderSelect::Nothing);
        assert_eq!(HeaderSelect::from_index(0), HeaderSelect::All);
        assert_eq!(HeaderSelect::from_index(1), HeaderSelect::Single(1));
        assert_eq!(HeaderSelect::from_index(7), HeaderSelect::Single(7));
    }
}
