//! Reference strings - the page requests that drive a simulation.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;

use crate::common::config::MAX_REFERENCE_SIZE;
use crate::common::{Error, PageId, Result};

/// Characters ignored when parsing a reference string.
const IGNORED_CHARS: [char; 4] = ['{', '}', '[', ']'];

/// Immutable, non-empty sequence of page requests.
///
/// Cloning is cheap (the pages live behind an `Arc`), so the controller and
/// the Optimal policy can share one copy for the length of a run.
///
/// # Example
/// ```
/// use pagesim::{PageId, ReferenceString};
///
/// let refs: ReferenceString = " {30, 51, 25} ".parse().unwrap();
/// assert_eq!(refs.len(), 3);
/// assert_eq!(refs[1], PageId::new(51));
/// assert_eq!(refs.to_string(), "[30, 51, 25]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceString {
    pages: Arc<[PageId]>,
}

impl ReferenceString {
    /// Build from pages that are already known.
    ///
    /// # Errors
    /// `Error::Validation` if `pages` is empty.
    pub fn new(pages: Vec<PageId>) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::validation(
                "reference string",
                "must contain at least one page",
            ));
        }
        Ok(Self {
            pages: pages.into(),
        })
    }

    /// Parse a comma-separated list of page numbers.
    ///
    /// Whitespace and bracket characters (`{}[]`) are stripped first, so
    /// `"[1, 2, 3]"` and `"{1,2,3}"` are both accepted. A trailing comma is
    /// tolerated, an empty token anywhere else is not.
    ///
    /// # Errors
    /// `Error::Parse` if a token is not an integer or no pages remain.
    pub fn parse(text: &str) -> Result<Self> {
        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && !IGNORED_CHARS.contains(c))
            .collect();

        let mut tokens: Vec<&str> = cleaned.split(',').collect();
        while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }

        let pages = tokens
            .into_iter()
            .map(|token| {
                token
                    .parse::<i32>()
                    .map(PageId::new)
                    .map_err(|_| Error::Parse(format!("{:?} is not a page number", token)))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(pages).map_err(|_| Error::Parse("no pages given".to_string()))
    }

    /// Generate `size` random pages in `[0, range)` using the thread RNG.
    ///
    /// # Errors
    /// `Error::Validation` if `size` or `range` is not positive, or `size` is
    /// above `MAX_REFERENCE_SIZE`.
    pub fn generate(size: i64, range: i64) -> Result<Self> {
        Self::generate_with(size, range, &mut rand::thread_rng())
    }

    /// Generate `size` random pages in `[0, range)` from `rng`.
    ///
    /// # Errors
    /// `Error::Validation` if `size` or `range` is not positive, `size` is
    /// above `MAX_REFERENCE_SIZE`, or `range` does not fit a page number.
    pub fn generate_with<R: Rng + ?Sized>(size: i64, range: i64, rng: &mut R) -> Result<Self> {
        if size <= 0 {
            return Err(Error::validation(
                "reference string size",
                format!("{} is not a positive integer", size),
            ));
        }
        if range <= 0 {
            return Err(Error::validation(
                "page number range",
                format!("{} is not a positive integer", range),
            ));
        }
        let range = i32::try_from(range).map_err(|_| {
            Error::validation("page number range", format!("{} is too large", range))
        })?;
        let size = usize::try_from(size)
            .ok()
            .filter(|&size| size <= MAX_REFERENCE_SIZE)
            .ok_or_else(|| {
                Error::validation(
                    "reference string size",
                    format!("{} is larger than {}", size, MAX_REFERENCE_SIZE),
                )
            })?;

        let pages = (0..size)
            .map(|_| PageId::new(rng.gen_range(0..range)))
            .collect();
        Self::new(pages)
    }

    /// The pages, in request order.
    #[inline]
    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }

    /// Index of the first request for `page_id` strictly after `step`.
    pub fn next_use(&self, page_id: PageId, step: usize) -> Option<usize> {
        let start = step.saturating_add(1);
        self.pages
            .get(start..)?
            .iter()
            .position(|&p| p == page_id)
            .map(|offset| start + offset)
    }
}

impl Deref for ReferenceString {
    type Target = [PageId];

    fn deref(&self) -> &[PageId] {
        &self.pages
    }
}

impl FromStr for ReferenceString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ReferenceString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", page)?;
        }
        write!(f, "]")
    }
}

/// Parameters for generating a reference string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateParams {
    /// Number of page requests.
    pub size: i64,
    /// Page numbers are drawn from `[0, range)`.
    pub range: i64,
}

impl GenerateParams {
    pub fn new(size: i64, range: i64) -> Self {
        Self { size, range }
    }
}

impl Default for GenerateParams {
    fn default() -> Self {
        use crate::common::config::{DEFAULT_PAGE_RANGE, DEFAULT_REFERENCE_SIZE};

        Self {
            size: DEFAULT_REFERENCE_SIZE as i64,
            range: i64::from(DEFAULT_PAGE_RANGE),
        }
    }
}
