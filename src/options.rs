//! Option validation: raw command-line values into a [`SelectionRequest`].
//!
//! Validation performs no I/O. A request that comes out of
//! [`RawOptions::validate`] is internally consistent and never mutated
//! afterwards; the streamer takes it by value.

use crate::config::DEFAULT_PAGE_LENGTH;
use crate::error::ValidationError;
use crate::source::InputSource;

/// How page boundaries are found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// A fixed number of `\n`-terminated lines per page.
    Lines { page_length: usize },
    /// Each page ends at a form-feed byte.
    FormFeed,
}

impl PageMode {
    pub fn is_form_feed(&self) -> bool {
        matches!(self, Self::FormFeed)
    }
}

/// Option values as they arrive from the argument parser, unchecked.
///
/// Page numbers are signed so that out-of-range input such as `--s -1`
/// reaches the validator instead of failing inside the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOptions {
    /// First page to emit; `-1` when the flag was not given.
    pub start_page: i64,
    /// First page not emitted; `-1` when the flag was not given.
    pub end_page: i64,
    pub page_length: i64,
    /// True when `--l` appeared on the command line in any spelling,
    /// even if its value equals the default.
    pub page_length_explicit: bool,
    pub form_feed: bool,
    pub destination: Option<String>,
    /// Non-flag arguments left after parsing.
    pub positional: Vec<String>,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            start_page: -1,
            end_page: -1,
            page_length: DEFAULT_PAGE_LENGTH,
            page_length_explicit: false,
            form_feed: false,
            destination: None,
            positional: Vec::new(),
        }
    }
}

impl RawOptions {
    /// Options selecting pages `[start, end)` with every other value defaulted.
    pub fn pages(start_page: i64, end_page: i64) -> Self {
        Self {
            start_page,
            end_page,
            ..Self::default()
        }
    }

    /// Set an explicit page length, as `--l` would.
    pub fn with_page_length(mut self, lines: i64) -> Self {
        self.page_length = lines;
        self.page_length_explicit = true;
        self
    }

    pub fn with_form_feed(mut self) -> Self {
        self.form_feed = true;
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_input(mut self, path: impl Into<String>) -> Self {
        self.positional.push(path.into());
        self
    }

    /// Check every constraint and build the immutable request.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate(self) -> Result<SelectionRequest, ValidationError> {
        if self.start_page < 1 {
            return Err(ValidationError::InvalidStartPage(self.start_page));
        }
        if self.end_page < 1 {
            return Err(ValidationError::InvalidEndPage(self.end_page));
        }
        if self.end_page < self.start_page {
            return Err(ValidationError::EndBeforeStart {
                start: self.start_page,
                end: self.end_page,
            });
        }
        if self.page_length < 1 {
            return Err(ValidationError::InvalidPageLength(self.page_length));
        }
        if self.form_feed && (self.page_length != DEFAULT_PAGE_LENGTH || self.page_length_explicit)
        {
            return Err(ValidationError::ConflictingDelimiters);
        }
        if self.positional.len() > 1 {
            return Err(ValidationError::TooManyInputFiles(self.positional.len()));
        }

        let mode = if self.form_feed {
            PageMode::FormFeed
        } else {
            PageMode::Lines {
                page_length: to_count(self.page_length),
            }
        };
        let input = InputSource::from_arg(self.positional.first().map(String::as_str));
        let destination = self.destination.filter(|d| !d.is_empty());

        Ok(SelectionRequest {
            start_page: to_count(self.start_page),
            end_page: to_count(self.end_page),
            mode,
            destination,
            input,
        })
    }
}

/// Values here are already checked to be >= 1.
#[inline]
fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// A validated page selection.
///
/// Pages are 1-based. Pages `start_page..end_page` are emitted; page
/// `end_page` itself is read but never written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    start_page: usize,
    end_page: usize,
    mode: PageMode,
    destination: Option<String>,
    input: InputSource,
}

impl SelectionRequest {
    pub fn start_page(&self) -> usize {
        self.start_page
    }

    pub fn end_page(&self) -> usize {
        self.end_page
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    /// Lines per page, or `None` in form-feed mode.
    pub fn page_length(&self) -> Option<usize> {
        match self.mode {
            PageMode::Lines { page_length } => Some(page_length),
            PageMode::FormFeed => None,
        }
    }

    /// Spooler destination; `None` means stdout only.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn input(&self) -> &InputSource {
        &self.input
    }

    /// Whether a page counter value falls inside `[start_page, end_page)`.
    #[inline]
    pub fn selects(&self, page: usize) -> bool {
        self.start_page <= page && page < self.end_page
    }
}
