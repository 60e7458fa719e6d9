//! Delimited record reading over a buffered byte stream.
//!
//! A record is every byte up to and including the next delimiter, or the
//! remaining bytes at end of stream. Delimiters are located with memchr
//! directly in the reader's internal buffer, so no byte is copied twice.

use memchr::memchr;
use std::io::{self, BufRead};

/// Line terminator used in line-count mode.
pub const NEWLINE: u8 = b'\n';

/// Page terminator used in form-feed mode.
pub const FORM_FEED: u8 = b'\x0c';

/// Streaming reader that yields delimiter-terminated records.
pub struct RecordReader<R: BufRead> {
    reader: R,
    delimiter: u8,
    bytes_read: u64,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        Self {
            reader,
            delimiter,
            bytes_read: 0,
        }
    }

    /// Append the next record to `buf`, delimiter included.
    ///
    /// Returns the number of bytes appended; `0` means end of stream.
    pub fn read_record(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let mut appended = 0;
        loop {
            let (done, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(available) => available,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                match memchr(self.delimiter, available) {
                    Some(pos) => {
                        buf.extend_from_slice(&available[..=pos]);
                        (true, pos + 1)
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (available.is_empty(), available.len())
                    }
                }
            };
            self.reader.consume(used);
            appended += used;
            if done {
                self.bytes_read += appended as u64;
                return Ok(appended);
            }
        }
    }

    /// Consume and discard the rest of the stream.
    ///
    /// Returns the number of bytes thrown away.
    pub fn drain(&mut self) -> io::Result<u64> {
        let discarded = io::copy(&mut self.reader, &mut io::sink())?;
        self.bytes_read += discarded;
        Ok(discarded)
    }

    /// Total bytes taken from the stream so far, drained bytes included.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

/// Count newline bytes in `data`.
#[inline]
pub fn count_lines(data: &[u8]) -> usize {
    memchr::memchr_iter(NEWLINE, data).count()
}
