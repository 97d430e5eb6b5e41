//! Quote selection
//!
//! Picks the next quote from the catalog. Category preference and the
//! anti-repeat window are soft constraints, relaxed in order until there is
//! something to pick from:
//!
//! 1. preferred categories minus recently shown content
//! 2. preferred categories
//! 3. the whole catalog

use crate::catalog::Catalog;
use crate::config::RECENT_WINDOW;
use crate::error::{AppError, Result};
use crate::models::{Preferences, Quote};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a quote uniformly at random from the first non-empty tier.
///
/// `history` is most-recent-first; only its first `RECENT_WINDOW` entries
/// count as recent. Recency compares `content`, so a quote with a new id but
/// the same text is still considered a repeat.
pub fn pick_next<R: Rng + ?Sized>(
    catalog: &Catalog,
    preferences: &Preferences,
    history: &[Quote],
    rng: &mut R,
) -> Result<Quote> {
    let preferred: Vec<&Quote> = catalog
        .quotes()
        .iter()
        .filter(|quote| preferences.allows(quote.category))
        .collect();

    let recent = &history[..history.len().min(RECENT_WINDOW)];
    let fresh: Vec<&Quote> = preferred
        .iter()
        .copied()
        .filter(|quote| !recent.iter().any(|r| r.content == quote.content))
        .collect();

    if let Some(quote) = fresh.choose(rng) {
        return Ok((*quote).clone());
    }

    if let Some(quote) = preferred.choose(rng) {
        tracing::debug!("Every preferred quote was shown recently, allowing a repeat");
        return Ok((*quote).clone());
    }

    tracing::debug!("No quote matches the preferred categories, using the full catalog");
    catalog
        .quotes()
        .choose(rng)
        .cloned()
        .ok_or(AppError::NoQuotesAvailable)
}
