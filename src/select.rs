//! Single-pass page selection.
//!
//! # Algorithm
//!
//! 1. Read one record at a time: a line (line-count mode) or everything up
//!    to the next form feed (form-feed mode). Terminators stay in the record.
//! 2. Append the record when `start_page <= page < end_page`.
//! 3. Advance the page counter: after every record in form-feed mode,
//!    after `page_length` lines in line-count mode.
//! 4. Stop once the counter reaches `end_page` or the stream ends.
//!
//! Records of page `end_page` are never appended. An end page beyond the
//! last page in the input is not an error; the scan reads to end of stream.
//!
//! When reading standard input, whatever follows the selected range is
//! drained and discarded so an upstream producer never blocks.

use crate::error::Result;
use crate::options::{PageMode, SelectionRequest};
use crate::spool::Spooler;
use crate::streaming::buffers::{DEFAULT_RECORD_BUFFER, DEFAULT_SELECTION_BUFFER};
use crate::streaming::{count_lines, RecordReader, FORM_FEED, NEWLINE};
use std::io::{BufRead, Write};
use tracing::{debug, info, trace};

/// Executes a validated [`SelectionRequest`].
#[derive(Debug, Clone)]
pub struct PageSelector {
    request: SelectionRequest,
}

/// Bytes selected by one scan, plus what it took to find them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub output: Vec<u8>,
    pub stats: SelectionStats,
}

/// Statistics from one selection run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionStats {
    /// Pages that contributed at least one byte to the scan
    pub pages_scanned: usize,
    /// Pages that contributed at least one byte to the output
    pub pages_selected: usize,
    /// Newlines in the output
    pub lines_written: usize,
    /// Bytes in the output
    pub bytes_written: usize,
    /// Bytes read from standard input after the scan stopped
    pub bytes_drained: u64,
}

impl std::fmt::Display for SelectionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pages scanned: {}, Pages selected: {}, Lines: {}, Bytes: {}",
            self.pages_scanned, self.pages_selected, self.lines_written, self.bytes_written
        )?;
        if self.bytes_drained > 0 {
            write!(f, ", Drained: {}", self.bytes_drained)?;
        }
        Ok(())
    }
}

/// Page/line counters for one pass.
#[derive(Debug)]
struct PageCursor {
    page: usize,
    line: usize,
    last_scanned: usize,
    last_selected: usize,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            page: 1,
            line: 1,
            last_scanned: 0,
            last_selected: 0,
        }
    }
}

impl PageSelector {
    pub fn new(request: SelectionRequest) -> Self {
        Self { request }
    }

    /// Run the whole filter: open the input, scan it, write the selection
    /// to `output` and forward it to the spooler when a destination is set.
    pub fn run<W: Write>(&self, output: &mut W) -> Result<SelectionStats> {
        let source = self.request.input();
        debug!(input = %source, "opening input");
        let reader = source.open()?;
        let selection = self.select(reader, source.drains_after_scan())?;

        output.write_all(&selection.output)?;
        output.flush()?;

        if let Some(destination) = self.request.destination() {
            let report = Spooler::from_config().send(destination, &selection.output)?;
            report.surface()?;
        }

        info!(stats = %selection.stats, "selection complete");
        Ok(selection.stats)
    }

    /// Scan `reader` and collect the selected pages.
    ///
    /// With `drain` set, the rest of the stream is consumed after the scan
    /// stops early.
    pub fn select<R: BufRead>(&self, reader: R, drain: bool) -> Result<Selection> {
        let (delimiter, page_length) = match self.request.mode() {
            PageMode::FormFeed => (FORM_FEED, None),
            PageMode::Lines { page_length } => (NEWLINE, Some(page_length)),
        };
        debug!(
            start = self.request.start_page(),
            end = self.request.end_page(),
            form_feed = page_length.is_none(),
            "scanning pages"
        );

        let mut reader = RecordReader::new(reader, delimiter);
        let mut selection = Selection {
            output: Vec::with_capacity(DEFAULT_SELECTION_BUFFER),
            stats: SelectionStats::default(),
        };
        let mut record = Vec::with_capacity(DEFAULT_RECORD_BUFFER);
        let mut cursor = PageCursor::new();

        let reached_eof = loop {
            record.clear();
            let n = reader.read_record(&mut record)?;
            let eof = record.last() != Some(&delimiter);

            if n > 0 {
                self.take_record(&record, &cursor, &mut selection);
                let selected = self.request.selects(cursor.page);
                note_page(&mut cursor, &mut selection.stats, selected);
            }

            match page_length {
                None => cursor.page += 1,
                Some(page_length) => {
                    cursor.line += 1;
                    if cursor.line > page_length {
                        cursor.line = 1;
                        cursor.page += 1;
                    }
                }
            }

            if cursor.page == self.request.end_page() || eof {
                break eof;
            }
        };
        trace!(page = cursor.page, eof = reached_eof, "scan stopped");

        if drain && !reached_eof {
            selection.stats.bytes_drained = reader.drain()?;
            debug!(bytes = selection.stats.bytes_drained, "drained standard input");
        }

        selection.stats.bytes_written = selection.output.len();
        selection.stats.lines_written = count_lines(&selection.output);
        Ok(selection)
    }

    #[inline]
    fn take_record(&self, record: &[u8], cursor: &PageCursor, selection: &mut Selection) {
        if self.request.selects(cursor.page) {
            selection.output.extend_from_slice(record);
        }
    }
}

/// Count the current page as scanned (and selected) the first time one of
/// its records is seen.
#[inline]
fn note_page(cursor: &mut PageCursor, stats: &mut SelectionStats, selected: bool) {
    if cursor.last_scanned != cursor.page {
        cursor.last_scanned = cursor.page;
        stats.pages_scanned += 1;
        trace!(page = cursor.page, "entered page");
    }
    if selected && cursor.last_selected != cursor.page {
        cursor.last_selected = cursor.page;
        stats.pages_selected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RawOptions;
    use std::io::{BufReader, Cursor, Read};

    fn numbered_lines(n: usize) -> String {
        (1..=n).map(|i| format!("{}\n", i)).collect()
    }

    fn form_feed_pages(n: usize) -> String {
        (1..=n).map(|i| format!("{}\x0c", i)).collect()
    }

    fn select(raw: RawOptions, input: &str) -> Selection {
        let selector = PageSelector::new(raw.validate().unwrap());
        selector.select(input.as_bytes(), false).unwrap()
    }

    fn lines_of(selection: &Selection) -> Vec<String> {
        String::from_utf8(selection.output.clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_first_page_of_default_length() {
        let result = select(RawOptions::pages(1, 2), &numbered_lines(150));
        let lines = lines_of(&result);
        assert_eq!(lines.len(), 72);
        assert_eq!(lines[0], "1");
        assert_eq!(lines[71], "72");
        assert_eq!(result.output, numbered_lines(72).into_bytes());
    }

    #[test]
    fn test_second_page_of_default_length() {
        let result = select(RawOptions::pages(2, 3), &numbered_lines(150));
        let expected: String = (73..=144).map(|i| format!("{}\n", i)).collect();
        assert_eq!(result.output, expected.into_bytes());
        assert_eq!(result.stats.pages_selected, 1);
        assert_eq!(result.stats.lines_written, 72);
    }

    #[test]
    fn test_form_feed_range() {
        let result = select(
            RawOptions::pages(2, 4).with_form_feed(),
            &form_feed_pages(5),
        );
        assert_eq!(result.output, b"2\x0c3\x0c");
        assert_eq!(result.stats.pages_selected, 2);
        // Pages 1-3 are read; the scan stops when the counter reaches 4.
        assert_eq!(result.stats.pages_scanned, 3);
    }

    #[test]
    fn test_end_page_is_never_emitted() {
        let result = select(RawOptions::pages(1, 3).with_page_length(2), "a\nb\nc\nd\ne\nf\n");
        assert_eq!(result.output, b"a\nb\nc\nd\n");
    }

    #[test]
    fn test_end_page_beyond_input_reads_to_eof() {
        let result = select(RawOptions::pages(2, 100).with_page_length(3), &numbered_lines(10));
        let expected: String = (4..=10).map(|i| format!("{}\n", i)).collect();
        assert_eq!(result.output, expected.into_bytes());
        assert_eq!(result.stats.pages_scanned, 4);
        assert_eq!(result.stats.pages_selected, 3);
    }

    #[test]
    fn test_start_beyond_input_is_empty() {
        let result = select(RawOptions::pages(5, 6).with_page_length(10), &numbered_lines(20));
        assert!(result.output.is_empty());
        assert_eq!(result.stats.pages_selected, 0);

        let result = select(RawOptions::pages(7, 9).with_form_feed(), &form_feed_pages(5));
        assert!(result.output.is_empty());
    }

    #[test]
    fn test_equal_start_and_end_selects_nothing() {
        let result = select(RawOptions::pages(2, 2).with_page_length(1), "a\nb\nc\n");
        assert!(result.output.is_empty());
    }

    #[test]
    fn test_last_line_without_newline() {
        let result = select(RawOptions::pages(1, 5).with_page_length(2), "a\nb\nc");
        assert_eq!(result.output, b"a\nb\nc");
        assert_eq!(result.stats.lines_written, 2);
    }

    #[test]
    fn test_trailing_chunk_without_form_feed() {
        let result = select(RawOptions::pages(2, 9).with_form_feed(), "one\x0ctwo\x0cthree");
        assert_eq!(result.output, b"two\x0cthree");
    }

    #[test]
    fn test_form_feed_pages_keep_embedded_newlines() {
        let result = select(
            RawOptions::pages(1, 2).with_form_feed(),
            "line 1\nline 2\n\x0cline 3\n",
        );
        assert_eq!(result.output, b"line 1\nline 2\n\x0c");
    }

    #[test]
    fn test_empty_input() {
        let result = select(RawOptions::pages(1, 2), "");
        assert!(result.output.is_empty());
        assert_eq!(result.stats, SelectionStats::default());
    }

    #[test]
    fn test_non_utf8_bytes_pass_through() {
        let input: &[u8] = b"\xff\xfe\n\x00\x01\n";
        let request = RawOptions::pages(1, 2).with_page_length(1).validate().unwrap();
        let selector = PageSelector::new(request);
        let result = selector.select(input, false).unwrap();
        assert_eq!(result.output, b"\xff\xfe\n");
    }

    #[test]
    fn test_selection_is_repeatable() {
        let input = numbered_lines(150);
        let first = select(RawOptions::pages(1, 3).with_page_length(40), &input);
        let second = select(RawOptions::pages(1, 3).with_page_length(40), &input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_page_count_property() {
        // Selected pages = max(0, min(end, total + 1) - start).
        let total = 7;
        let input = numbered_lines(total * 4);
        for start in 1..=9i64 {
            for end in start..=10 {
                let result = select(RawOptions::pages(start, end).with_page_length(4), &input);
                let expected = (end.min(total as i64 + 1) - start).max(0) as usize;
                assert_eq!(
                    result.stats.lines_written,
                    expected * 4,
                    "start={} end={}",
                    start,
                    end
                );
            }
        }
    }

    #[test]
    fn test_form_feed_page_count_property() {
        let total = 6;
        let input = form_feed_pages(total);
        for start in 1..=8i64 {
            for end in start..=9 {
                let result = select(RawOptions::pages(start, end).with_form_feed(), &input);
                let expected = (end.min(total as i64 + 1) - start).max(0) as usize;
                let chunks = result.output.iter().filter(|&&b| b == b'\x0c').count();
                assert_eq!(chunks, expected, "start={} end={}", start, end);
                assert_eq!(result.stats.pages_selected, expected, "start={} end={}", start, end);
            }
        }
    }

    #[test]
    fn test_drain_consumes_rest_of_stream() {
        let input = numbered_lines(150);
        let request = RawOptions::pages(1, 2).with_page_length(10).validate().unwrap();
        let selector = PageSelector::new(request);
        let mut reader = BufReader::new(Cursor::new(input.clone().into_bytes()));

        let result = selector.select(&mut reader, true).unwrap();
        assert_eq!(result.output, numbered_lines(10).into_bytes());
        // The scan stops as the counter reaches page 2; lines 11-150 are drained.
        let scanned: usize = numbered_lines(10).len();
        assert_eq!(result.stats.bytes_drained, (input.len() - scanned) as u64);

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert!(rest.is_empty());
    }

    #[test]
    fn test_named_file_stops_without_draining() {
        let input = numbered_lines(150);
        let request = RawOptions::pages(1, 2).with_page_length(10).validate().unwrap();
        let selector = PageSelector::new(request);
        let mut reader = BufReader::new(Cursor::new(input.into_bytes()));

        let result = selector.select(&mut reader, false).unwrap();
        assert_eq!(result.stats.bytes_drained, 0);

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert!(rest.starts_with("11\n"));
    }

    #[test]
    fn test_stats_display() {
        let stats = SelectionStats {
            pages_scanned: 3,
            pages_selected: 2,
            lines_written: 144,
            bytes_written: 500,
            bytes_drained: 0,
        };
        assert_eq!(
            stats.to_string(),
            "Pages scanned: 3, Pages selected: 2, Lines: 144, Bytes: 500"
        );
    }
}
