//! Extraction of sequence payloads from a line-oriented corpus.
//!
//! The corpus is typically the UniProtKB XML distribution, where each
//! protein sequence is stored on a single line inside a `<sequence>` element:
//! ```text
//! <sequence length="20" mass="2395" checksum="5A3B6E1C" version="1">MKWVTFISLLLLFSSAYSRG</sequence>
//! ```
//! Only payloads whose start and end tags are on the same line are
//! extracted. Sequences split across several lines are not supported.

use std::io::BufRead;

use memchr::memchr;
use memchr::memmem;

use crate::error::Error;

const START_TAG: &[u8] = b"<sequence";
const END_TAG: &[u8] = b"</sequence";

/// Extract the sequence payload of a corpus line, if any.
///
/// The payload starts after the first `>` following the start tag and
/// ends at the next end tag.
pub fn extract(line: &[u8]) -> Option<&[u8]> {
    let tag = memmem::find(line, START_TAG)?;
    let start = tag + START_TAG.len() + memchr(b'>', &line[tag + START_TAG.len()..])? + 1;
    let end = start + memmem::find(&line[start..], END_TAG)?;
    Some(&line[start..end])
}

// ---

/// An iterative reader over the sequence payloads of a corpus.
pub struct Reader<B: BufRead> {
    buffer: Vec<u8>,
    bufread: B,
    lines: u64,
    sequences: u64,
}

impl<B: BufRead> Reader<B> {
    /// Create a new `Reader` from a buffered reader.
    pub fn new(reader: B) -> Self {
        Self {
            buffer: Vec::new(),
            bufread: reader,
            lines: 0,
            sequences: 0,
        }
    }

    /// The number of lines read so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// The number of sequence payloads found so far.
    pub fn sequences(&self) -> u64 {
        self.sequences
    }
}

impl<B: BufRead> Iterator for Reader<B> {
    type Item = Result<String, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.bufread.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.lines += 1;
                    if let Some(payload) = extract(&self.buffer) {
                        self.sequences += 1;
                        // non-UTF-8 payloads are kept so they get rejected
                        // like any other invalid sequence
                        let text = String::from_utf8_lossy(payload).into_owned();
                        return Some(Ok(text));
                    }
                }
                Err(e) => return Some(Err(Error::from(e))),
            }
        }
    }
}

/// Read the sequence payloads from a corpus.
pub fn read<B: BufRead>(reader: B) -> self::Reader<B> {
    self::Reader::new(reader)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract() {
        let line = b"  <sequence length=\"6\" version=\"1\">AARRNN</sequence>\n";
        assert_eq!(extract(line), Some(&b"AARRNN"[..]));
        assert_eq!(extract(b"<sequence>MKW</sequence>"), Some(&b"MKW"[..]));
        assert_eq!(extract(b"<sequence></sequence>"), Some(&b""[..]));
    }

    #[test]
    fn test_extract_missing() {
        assert_eq!(extract(b"<entry dataset=\"Swiss-Prot\">"), None);
        assert_eq!(extract(b"<sequence length=\"6\">AARRNN\n"), None);
        assert_eq!(extract(b"<sequence length=\"6\""), None);
        assert_eq!(extract(b"AARRNN</sequence>"), None);
    }

    #[test]
    fn test_reader() {
        let text = concat!(
            "<entry>\n",
            "<sequence length=\"4\">MKWV</sequence>\n",
            "<name>ALBU_HUMAN</name>\n",
            "<sequence length=\"3\">GAV</sequence>\r\n",
            "</entry>",
        );
        let mut reader = read(std::io::Cursor::new(text));
        assert_eq!(reader.next().unwrap().unwrap(), "MKWV");
        assert_eq!(reader.next().unwrap().unwrap(), "GAV");
        assert!(reader.next().is_none());
        assert_eq!(reader.lines(), 5);
        assert_eq!(reader.sequences(), 2);
    }
}
