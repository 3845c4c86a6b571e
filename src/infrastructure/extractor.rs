//! # Well Data Extractor
//!
//! HTML extraction for the two page shapes the portal serves: listing pages,
//! which carry one anchor per well between two navigation anchors, and well
//! data pages, which carry thirty field values at fixed text line offsets.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::domain::record::{WellRecord, WrongFieldCount};

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("link selector is valid"));

/// First text line holding a field value on a well data page. The page
/// opens with navigation and heading lines; values start here and
/// alternate with their labels.
const FIRST_VALUE_LINE: usize = 13;

/// Last text line holding a field value.
const LAST_VALUE_LINE: usize = 71;

/// Values sit one label line apart.
const VALUE_LINE_STRIDE: usize = 2;

/// Errors raised while extracting a well record from a data page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("well data page too short: expected at least {expected} text lines, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error(transparent)]
    FieldCount(#[from] WrongFieldCount),
}

/// Extracts listing links and well records from fetched page bodies.
#[derive(Debug, Clone, Default)]
pub struct WellDataExtractor;

impl WellDataExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collects the well detail addresses from a listing page, in document
    /// order. The first and last anchors are portal navigation, not wells,
    /// and are dropped; a page with two or fewer anchors has no wells.
    #[must_use]
    pub fn listing_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let links: Vec<String> = document
            .select(&LINK_SELECTOR)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
            .collect();
        if links.len() <= 2 {
            return Vec::new();
        }
        links[1..links.len() - 1].to_vec()
    }

    /// Extracts the thirty field values from a well data page.
    ///
    /// The page text is split into lines, carriage returns and blank lines
    /// dropped, and values read from the fixed offsets where the portal
    /// renders them. Each value is trimmed of the ` = ` decoration the
    /// portal puts around it.
    pub fn well_record(&self, html: &str) -> Result<WellRecord, ExtractError> {
        let document = Html::parse_document(html);
        let text: String = document.root_element().text().collect();

        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() <= LAST_VALUE_LINE {
            return Err(ExtractError::Truncated {
                expected: LAST_VALUE_LINE + 1,
                found: lines.len(),
            });
        }

        let values: Vec<String> = (FIRST_VALUE_LINE..=LAST_VALUE_LINE)
            .step_by(VALUE_LINE_STRIDE)
            .map(|index| lines[index].trim_matches([' ', '=']).to_string())
            .collect();

        Ok(WellRecord::from_values(values)?)
    }
}
