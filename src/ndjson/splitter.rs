//! Re-framing of arbitrary text chunks into delimiter-terminated records.
//!
//! Text is appended to a single pending buffer. Every delimiter found in the
//! buffer completes one record; whatever follows the last delimiter stays
//! pending until more text arrives or the input ends.

/// Default record delimiter for NDJSON.
pub const NEWLINE: &str = "\n";

/// Incremental record splitter.
///
/// Records are handed out one at a time through [`LineSplitter::next_record`]
/// in the order their delimiters were seen.
#[derive(Debug)]
pub struct LineSplitter {
    delimiter: String,
    buffer: String,
    /// Start of the unconsumed part of `buffer`
    cursor: usize,
    /// No delimiter starts between `cursor` and this offset
    scanned: usize,
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSplitter {
    /// Create a splitter for newline-delimited input.
    pub fn new() -> Self {
        Self::with_delimiter(NEWLINE)
    }

    /// Create a splitter for a custom, non-empty delimiter.
    ///
    /// An empty delimiter falls back to newline.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        let mut delimiter = delimiter.into();
        if delimiter.is_empty() {
            delimiter = NEWLINE.to_string();
        }
        Self {
            delimiter,
            buffer: String::new(),
            cursor: 0,
            scanned: 0,
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Append a chunk of text.
    pub fn push(&mut self, chunk: &str) {
        if self.cursor > 0 {
            self.buffer.drain(..self.cursor);
            self.scanned = self.scanned.saturating_sub(self.cursor);
            self.cursor = 0;
        }
        self.buffer.push_str(chunk);
    }

    /// Take the next complete record, if a delimiter has been seen.
    ///
    /// The search resumes where the previous unsuccessful one stopped, so a
    /// long record arriving in many small chunks is scanned once.
    pub fn next_record(&mut self) -> Option<String> {
        let from = self.scanned.max(self.cursor);
        match self.buffer[from..].find(self.delimiter.as_str()) {
            Some(offset) => {
                let end = from + offset;
                let record = self.buffer[self.cursor..end].to_string();
                self.cursor = end + self.delimiter.len();
                self.scanned = self.cursor;
                Some(record)
            }
            None => {
                // a delimiter may still start in the last len - 1 bytes
                let mut resume = self
                    .buffer
                    .len()
                    .saturating_sub(self.delimiter.len() - 1)
                    .max(from);
                while !self.buffer.is_char_boundary(resume) {
                    resume -= 1;
                }
                self.scanned = resume;
                None
            }
        }
    }

    /// End of input: take the trailing fragment, if it is non-empty.
    ///
    /// Complete records still buffered must be drained with
    /// [`LineSplitter::next_record`] first; this returns everything left.
    pub fn finish(&mut self) -> Option<String> {
        let rest = self.buffer.split_off(self.cursor);
        self.buffer.clear();
        self.cursor = 0;
        self.scanned = 0;
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    /// Length of the text not yet handed out.
    pub fn pending_len(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Drop all buffered text.
    pub fn clear(&mut self) {
        self.buffer = String::new();
        self.cursor = 0;
        self.scanned = 0;
    }

    /// Push a chunk and collect every record it completes.
    pub fn push_and_drain(&mut self, chunk: &str) -> Vec<String> {
        self.push(chunk);
        std::iter::from_fn(|| self.next_record()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_all<'a>(chunks: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut splitter = LineSplitter::new();
        let mut records = Vec::new();
        for chunk in chunks {
            records.extend(splitter.push_and_drain(chunk));
        }
        records.extend(splitter.finish());
        records
    }

    #[test]
    fn test_single_chunk_many_records() {
        assert_eq!(split_all(["a\nb\nc\n"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chunk_without_delimiter_only_buffers() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push_and_drain("{\"combat_id\":").is_empty());
        assert_eq!(splitter.pending_len(), 13);
        assert_eq!(splitter.push_and_drain("\"c1\"}\n"), vec!["{\"combat_id\":\"c1\"}"]);
        assert_eq!(splitter.pending_len(), 0);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_chunk_that_is_only_the_delimiter() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push_and_drain("\n"), vec![""]);

        let mut splitter = LineSplitter::new();
        assert!(splitter.push_and_drain("abc").is_empty());
        assert_eq!(splitter.push_and_drain("\n"), vec!["abc"]);
    }

    #[test]
    fn test_trailing_fragment_flushed() {
        assert_eq!(split_all(["a\nb"]), vec!["a", "b"]);
        assert_eq!(split_all(["a\nb\n"]), vec!["a", "b"]);
    }

    #[test]
    fn test_k_delimiters_without_trailing_delimiter() {
        // k delimiters then a final segment: k + 1 records when non-empty
        for k in 0..5usize {
            let text: String = (0..=k).map(|i| format!("r{}", i)).collect::<Vec<_>>().join("\n");
            let records = split_all([text.as_str()]);
            assert_eq!(records.len(), k + 1, "text {:?}", text);
            assert_eq!(records.last().map(String::as_str), Some(format!("r{}", k).as_str()));
        }
    }

    #[test]
    fn test_chunk_boundary_independence() {
        let text = "{\"a\":1}\n{\"b\":\"x\\ny\"}\n\n{\"c\":[1,2]}\ntail";
        let expected = split_all([text]);
        assert_eq!(
            expected,
            vec!["{\"a\":1}", "{\"b\":\"x\\ny\"}", "", "{\"c\":[1,2]}", "tail"]
        );

        // every two-way split
        for i in 0..=text.len() {
            assert_eq!(split_all([&text[..i], &text[i..]]), expected, "split at {}", i);
        }

        // one character at a time
        let chars: Vec<String> = text.chars().map(String::from).collect();
        assert_eq!(split_all(chars.iter().map(String::as_str)), expected);
    }

    #[test]
    fn test_multi_char_delimiter_split_across_chunks() {
        let mut splitter = LineSplitter::with_delimiter("\r\n");
        assert!(splitter.push_and_drain("one\r").is_empty());
        assert_eq!(splitter.push_and_drain("\ntwo\r\n"), vec!["one", "two"]);
        assert_eq!(splitter.delimiter(), "\r\n");
    }

    #[test]
    fn test_empty_delimiter_falls_back_to_newline() {
        let splitter = LineSplitter::with_delimiter("");
        assert_eq!(splitter.delimiter(), NEWLINE);
    }

    #[test]
    fn test_next_record_is_incremental() {
        let mut splitter = LineSplitter::new();
        splitter.push("a\nb\nc");
        assert_eq!(splitter.next_record().as_deref(), Some("a"));
        // later pushes do not disturb records already buffered
        splitter.push("\nd");
        assert_eq!(splitter.next_record().as_deref(), Some("b"));
        assert_eq!(splitter.next_record().as_deref(), Some("c"));
        assert_eq!(splitter.next_record(), None);
        assert_eq!(splitter.finish().as_deref(), Some("d"));
    }

    #[test]
    fn test_search_resumes_after_scanned_text() {
        let mut splitter = LineSplitter::new();
        splitter.push("{\"data\":\"");
        for _ in 0..1000 {
            assert!(splitter.push_and_drain("xxxxxxxx").is_empty());
            assert_eq!(splitter.scanned, splitter.buffer.len());
        }
        let expected = format!("{{\"data\":\"{}\"}}", "x".repeat(8000));
        assert_eq!(splitter.push_and_drain("\"}\nnext"), vec![expected]);
        assert_eq!(splitter.scanned, splitter.buffer.len());
        assert_eq!(splitter.finish().as_deref(), Some("next"));
    }

    #[test]
    fn test_search_resume_keeps_partial_multi_char_delimiter() {
        let mut splitter = LineSplitter::with_delimiter("\r\n");
        assert!(splitter.push_and_drain("abc\r").is_empty());
        // the trailing '\r' is searched again on the next push
        assert_eq!(splitter.scanned, 3);
        assert_eq!(splitter.push_and_drain("\nd\u{1F409}"), vec!["abc"]);
        assert!(splitter.buffer.is_char_boundary(splitter.scanned));
        assert_eq!(splitter.push_and_drain("\r\n"), vec!["d\u{1F409}"]);
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut splitter = LineSplitter::new();
        splitter.push("a\npartial");
        splitter.clear();
        assert_eq!(splitter.next_record(), None);
        assert_eq!(splitter.finish(), None);
    }
}
