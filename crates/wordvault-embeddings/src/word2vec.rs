//! Streaming parser for the word2vec vector formats.
//!
//! Both formats open with one ASCII header line `"<vocab_size> <dimension>"`.
//! The binary body stores each entry as the word's bytes up to a space
//! followed by `dimension` little-endian f32s, optionally separated from the
//! next entry by a newline. The text body stores one whitespace-separated
//! row per entry. Gzip-compressed files are decompressed transparently by
//! [`open_model_file`].
//!
//! [`Word2VecReader`] yields entries one at a time and never materializes
//! the model in memory; the GoogleNews file is ~3.6 GB uncompressed.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{EmbeddingResult, ParseError};

/// Parsed header of a word2vec model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word2VecHeader {
    /// Number of entries the file declares.
    pub vocab_size: u64,
    /// Vector dimension of every entry.
    pub dimension: usize,
}

/// How the body after the header is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorEncoding {
    /// Word bytes, a space, then `dimension` little-endian f32s.
    Binary,
    /// One whitespace-separated text row per entry.
    Text,
}

impl VectorEncoding {
    /// Encoding implied by a file extension: anything containing `bin` is
    /// binary, everything else text.
    pub fn for_extension(extension: &str) -> Self {
        if extension.contains("bin") {
            VectorEncoding::Binary
        } else {
            VectorEncoding::Text
        }
    }
}

/// Streaming reader over the entries of a word2vec model file.
///
/// Iteration stops after `vocab_size` entries; trailing bytes are ignored.
/// A file that ends early produces [`ParseError::UnexpectedEof`] carrying
/// the index of the entry that was being read.
pub struct Word2VecReader<R: BufRead> {
    inner: R,
    header: Word2VecHeader,
    encoding: VectorEncoding,
    next_index: u64,
}

impl<R: BufRead> Word2VecReader<R> {
    /// Read the header and position the reader at the first entry.
    pub fn new(mut inner: R, encoding: VectorEncoding) -> Result<Self, ParseError> {
        let header = read_header(&mut inner)?;
        Ok(Self {
            inner,
            header,
            encoding,
            next_index: 0,
        })
    }

    /// The header parsed at construction.
    pub fn header(&self) -> &Word2VecHeader {
        &self.header
    }

    /// Read the next entry, or `None` once `vocab_size` entries were read.
    pub fn next_entry(&mut self) -> Result<Option<(String, Vec<f32>)>, ParseError> {
        if self.next_index >= self.header.vocab_size {
            return Ok(None);
        }
        let index = self.next_index;
        let entry = match self.encoding {
            VectorEncoding::Binary => self.next_binary(index)?,
            VectorEncoding::Text => self.next_text(index)?,
        };
        self.next_index += 1;
        Ok(Some(entry))
    }

    fn next_binary(&mut self, index: u64) -> Result<(String, Vec<f32>), ParseError> {
        let word = self.read_word(index)?;
        let mut bytes = vec![0u8; self.header.dimension * 4];
        self.inner
            .read_exact(&mut bytes)
            .map_err(|e| eof_at(index, e))?;
        let vector = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok((word, vector))
    }

    /// Read word bytes up to the separating space, skipping the newline
    /// that may trail the previous entry's vector.
    fn read_word(&mut self, index: u64) -> Result<String, ParseError> {
        let mut raw: Vec<u8> = Vec::with_capacity(32);
        let mut byte = [0u8; 1];
        loop {
            self.inner
                .read_exact(&mut byte)
                .map_err(|e| eof_at(index, e))?;
            match byte[0] {
                b'\n' | b'\r' if raw.is_empty() => continue,
                b' ' => break,
                b => raw.push(b),
            }
        }
        word_from_bytes(index, raw)
    }

    fn next_text(&mut self, index: u64) -> Result<(String, Vec<f32>), ParseError> {
        let mut raw = Vec::new();
        loop {
            raw.clear();
            let n = self.inner.read_until(b'\n', &mut raw)?;
            if n == 0 {
                return Err(ParseError::UnexpectedEof { index });
            }
            if !raw.iter().all(|b| b.is_ascii_whitespace()) {
                break;
            }
        }

        let line = String::from_utf8(raw).map_err(|_| ParseError::MalformedWord {
            index,
            reason: "invalid UTF-8".to_string(),
        })?;
        let mut parts = line.split_whitespace();
        // The line is non-blank, so a first token exists.
        let word = parts
            .next()
            .ok_or(ParseError::UnexpectedEof { index })?
            .to_string();
        let word = word_from_bytes(index, word.into_bytes())?;

        let mut vector = Vec::with_capacity(self.header.dimension);
        for token in parts {
            let value: f32 = token.parse().map_err(|_| ParseError::MalformedValue {
                index,
                token: token.to_string(),
            })?;
            vector.push(value);
        }
        if vector.len() != self.header.dimension {
            return Err(ParseError::WrongComponentCount {
                index,
                expected: self.header.dimension,
                actual: vector.len(),
            });
        }
        Ok((word, vector))
    }
}

impl<R: BufRead> Iterator for Word2VecReader<R> {
    type Item = Result<(String, Vec<f32>), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// Open a model file, choosing decompression and encoding from the
/// extension it was published with.
pub fn open_model_file(
    path: &Path,
    extension: &str,
) -> EmbeddingResult<Word2VecReader<Box<dyn BufRead>>> {
    let file = File::open(path)?;
    let encoding = VectorEncoding::for_extension(extension);
    let reader: Box<dyn BufRead> = if extension.ends_with("gz") {
        Box::new(BufReader::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(Word2VecReader::new(reader, encoding)?)
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<Word2VecHeader, ParseError> {
    let mut raw = Vec::new();
    let n = reader.read_until(b'\n', &mut raw)?;
    if n == 0 {
        return Err(ParseError::MalformedHeader {
            line: String::new(),
        });
    }
    let line = String::from_utf8(raw).map_err(|_| ParseError::MalformedHeader {
        line: "<invalid UTF-8>".to_string(),
    })?;

    let mut parts = line.split_whitespace();
    let (vocab_token, dim_token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(v), Some(d), None) => (v, d),
        _ => {
            return Err(ParseError::MalformedHeader {
                line: line.trim_end().to_string(),
            })
        }
    };

    let vocab_size: u64 = vocab_token.parse().map_err(|_| ParseError::MalformedHeader {
        line: line.trim_end().to_string(),
    })?;
    let dimension: usize = dim_token.parse().map_err(|_| ParseError::MalformedHeader {
        line: line.trim_end().to_string(),
    })?;
    if vocab_size == 0 || dimension == 0 {
        return Err(ParseError::MalformedHeader {
            line: line.trim_end().to_string(),
        });
    }

    Ok(Word2VecHeader {
        vocab_size,
        dimension,
    })
}

fn word_from_bytes(index: u64, raw: Vec<u8>) -> Result<String, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::MalformedWord {
            index,
            reason: "empty word".to_string(),
        });
    }
    let word = String::from_utf8(raw).map_err(|_| ParseError::MalformedWord {
        index,
        reason: "invalid UTF-8".to_string(),
    })?;
    if word.contains('\0') {
        return Err(ParseError::MalformedWord {
            index,
            reason: "embedded NUL".to_string(),
        });
    }
    Ok(word)
}

fn eof_at(index: u64, e: std::io::Error) -> ParseError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ParseError::UnexpectedEof { index }
    } else {
        ParseError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn binary_model(dim: usize, entries: &[(&str, &[f32])], newline_sep: bool) -> Vec<u8> {
        let mut out = format!("{} {}\n", entries.len(), dim).into_bytes();
        for (word, vector) in entries {
            out.extend_from_slice(word.as_bytes());
            out.push(b' ');
            for value in *vector {
                out.extend_from_slice(&value.to_le_bytes());
            }
            if newline_sep {
                out.push(b'\n');
            }
        }
        out
    }

    fn collect(bytes: Vec<u8>, encoding: VectorEncoding) -> Vec<(String, Vec<f32>)> {
        Word2VecReader::new(Cursor::new(bytes), encoding)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_binary_roundtrip_with_newline_separators() {
        let bytes = binary_model(
            3,
            &[
                ("canada", &[0.1, 0.2, 0.3]),
                ("vancouver", &[-1.0, 2.5, 0.0]),
            ],
            true,
        );
        let entries = collect(bytes, VectorEncoding::Binary);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "canada");
        assert_eq!(entries[0].1, vec![0.1, 0.2, 0.3]);
        assert_eq!(entries[1].0, "vancouver");
        assert_eq!(entries[1].1, vec![-1.0, 2.5, 0.0]);
    }

    #[test]
    fn test_binary_roundtrip_without_separators() {
        let bytes = binary_model(2, &[("a", &[1.0, 2.0]), ("b", &[3.0, 4.0])], false);
        let entries = collect(bytes, VectorEncoding::Binary);
        assert_eq!(entries[1], ("b".to_string(), vec![3.0, 4.0]));
    }

    #[test]
    fn test_binary_stops_at_declared_vocab_size() {
        let mut bytes = binary_model(2, &[("a", &[1.0, 2.0])], true);
        bytes.extend_from_slice(b"trailing garbage that must never be read as an entry");
        let mut reader =
            Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Binary).unwrap();
        assert!(reader.next_entry().unwrap().is_some());
        assert!(reader.next_entry().unwrap().is_none());
        // Repeated calls stay exhausted.
        assert!(reader.next_entry().unwrap().is_none());
    }

    #[test]
    fn test_header_accessor() {
        let bytes = binary_model(3, &[("a", &[0.0, 0.0, 0.0])], true);
        let reader = Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Binary).unwrap();
        assert_eq!(
            *reader.header(),
            Word2VecHeader {
                vocab_size: 1,
                dimension: 3
            }
        );
    }

    #[test]
    fn test_truncated_vector_reports_entry_index() {
        let mut bytes = binary_model(3, &[("a", &[0.1, 0.2, 0.3])], true);
        bytes.extend_from_slice(b"b ");
        bytes.extend_from_slice(&0.5_f32.to_le_bytes());
        // Header must promise two entries for the second to be read at all.
        let mut fixed = b"2 3\n".to_vec();
        fixed.extend_from_slice(&bytes[4..]);

        let mut reader =
            Word2VecReader::new(Cursor::new(fixed), VectorEncoding::Binary).unwrap();
        assert!(reader.next_entry().unwrap().is_some());
        let err = reader.next_entry().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { index: 1 }));
    }

    #[test]
    fn test_missing_entries_reports_eof() {
        let bytes = b"3 2\n".to_vec();
        let mut reader =
            Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Binary).unwrap();
        let err = reader.next_entry().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { index: 0 }));
    }

    #[test]
    fn test_malformed_headers_rejected() {
        for header in ["", "\n", "300\n", "3000000 300 extra\n", "x y\n", "0 300\n", "5 0\n"] {
            let err = Word2VecReader::new(Cursor::new(header.as_bytes().to_vec()), VectorEncoding::Binary)
                .err()
                .unwrap_or_else(|| panic!("header {header:?} accepted"));
            assert!(matches!(err, ParseError::MalformedHeader { .. }));
        }
    }

    #[test]
    fn test_invalid_utf8_word_rejected() {
        let mut bytes = b"1 1\n".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        bytes.push(b' ');
        bytes.extend_from_slice(&1.0_f32.to_le_bytes());
        let mut reader =
            Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Binary).unwrap();
        let err = reader.next_entry().unwrap_err();
        assert!(matches!(err, ParseError::MalformedWord { index: 0, .. }));
    }

    #[test]
    fn test_empty_word_rejected() {
        let mut bytes = b"1 1\n".to_vec();
        bytes.push(b' ');
        bytes.extend_from_slice(&1.0_f32.to_le_bytes());
        let mut reader =
            Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Binary).unwrap();
        let err = reader.next_entry().unwrap_err();
        assert!(matches!(err, ParseError::MalformedWord { index: 0, .. }));
    }

    #[test]
    fn test_text_format_roundtrip() {
        let bytes = b"2 3\ncanada 0.1 0.2 0.3\nvancouver -1 2.5 0\n".to_vec();
        let entries = collect(bytes, VectorEncoding::Text);
        assert_eq!(entries[0], ("canada".to_string(), vec![0.1, 0.2, 0.3]));
        assert_eq!(entries[1], ("vancouver".to_string(), vec![-1.0, 2.5, 0.0]));
    }

    #[test]
    fn test_text_wrong_component_count() {
        let bytes = b"1 3\ncanada 0.1 0.2\n".to_vec();
        let mut reader = Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Text).unwrap();
        let err = reader.next_entry().unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongComponentCount {
                index: 0,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_text_malformed_value() {
        let bytes = b"1 2\ncanada 0.1 oops\n".to_vec();
        let mut reader = Word2VecReader::new(Cursor::new(bytes), VectorEncoding::Text).unwrap();
        let err = reader.next_entry().unwrap_err();
        match err {
            ParseError::MalformedValue { token, .. } => assert_eq!(token, "oops"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encoding_from_extension() {
        assert_eq!(VectorEncoding::for_extension("bin"), VectorEncoding::Binary);
        assert_eq!(
            VectorEncoding::for_extension("bin.gz"),
            VectorEncoding::Binary
        );
        assert_eq!(VectorEncoding::for_extension("txt"), VectorEncoding::Text);
        assert_eq!(
            VectorEncoding::for_extension("txt.gz"),
            VectorEncoding::Text
        );
    }

    #[test]
    fn test_open_model_file_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let bytes = binary_model(2, &[("toronto", &[7.0, -7.0])], true);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes).unwrap();
        let compressed = encoder.finish().unwrap();

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tiny.bin.gz");
        std::fs::write(&path, compressed).unwrap();

        let mut reader = open_model_file(&path, "bin.gz").unwrap();
        let (word, vector) = reader.next_entry().unwrap().unwrap();
        assert_eq!(word, "toronto");
        assert_eq!(vector, vec![7.0, -7.0]);
    }

    #[test]
    fn test_open_model_file_plain() {
        let bytes = binary_model(1, &[("plain", &[1.5])], false);
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tiny.bin");
        std::fs::write(&path, bytes).unwrap();

        let entries: Vec<_> = open_model_file(&path, "bin")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(entries, vec![("plain".to_string(), vec![1.5])]);
    }
}
