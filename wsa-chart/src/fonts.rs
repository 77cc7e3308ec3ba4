//! Bundled chart font and right-to-left label ordering.
//!
//! Text is measured and rasterized with plotters' `ab_glyph` support, which
//! never looks at system fonts. DejaVu Sans is embedded and registered as
//! `sans-serif` before the first chart is drawn; it covers Latin and Hebrew.

use log::{debug, error};
use plotters::style::{register_font, FontStyle};
use std::{borrow::Cow, sync::OnceLock};
use unicode_bidi::{BidiInfo, Level};

use crate::error::{ChartError, Result};

const FAMILY: &str = "sans-serif";
static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Register the bundled font with plotters. Safe to call repeatedly.
pub fn register_fonts() -> Result<()> {
    let registered = *REGISTERED.get_or_init(|| {
        match register_font(FAMILY, FontStyle::Normal, DEJAVU_SANS) {
            Ok(()) => {
                debug!("Registered bundled font as {}", FAMILY);
                true
            }
            Err(_) => {
                error!("Bundled font is not a valid TrueType file");
                false
            }
        }
    });
    if registered {
        Ok(())
    } else {
        Err(ChartError::Drawing(format!("font {} is unavailable", FAMILY)))
    }
}

/// Reorder `text` from logical to display order for a backend that lays
/// glyphs out strictly left to right.
///
/// The base direction is left-to-right, so Latin text and digits keep their
/// order and runs of right-to-left script are reversed in place.
pub fn visual_order(text: &str) -> Cow<'_, str> {
    let info = BidiInfo::new(text, Some(Level::ltr()));
    if !info.has_rtl() {
        return Cow::Borrowed(text);
    }
    let ordered: String = info
        .paragraphs
        .iter()
        .map(|para| info.reorder_line(para, para.range.clone()))
        .collect();
    Cow::Owned(ordered)
}
