//! Watchlist buffer editing.

use serde::Serialize;
use sizer_core::WatchlistError;
use tracing::debug;

/// Placeholder replaced by the symbol in chart URL templates.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// A symbol paired with its chart image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLink {
    pub symbol: String,
    pub url: String,
}

/// Watchlist over a comma-separated buffer.
///
/// Remembers the buffer as it was when loaded so symbols added during the
/// session can be separated from the original ones.
#[derive(Debug, Clone)]
pub struct Watchlist {
    original: String,
    current: String,
}

impl Watchlist {
    /// Start a session from the buffer's current text.
    pub fn from_buffer(text: impl Into<String>) -> Self {
        let original = text.into();
        Self {
            current: original.clone(),
            original,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Buffer text including symbols added this session.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Symbols in the current buffer, trimmed, empties skipped.
    pub fn symbols(&self) -> Vec<&str> {
        split_symbols(&self.current)
    }

    /// Symbols that were in the buffer when it was loaded.
    pub fn original_symbols(&self) -> Vec<&str> {
        split_symbols(&self.original)
    }

    /// Append a symbol and return the new buffer text.
    pub fn add(&mut self, symbol: &str) -> Result<&str, WatchlistError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(WatchlistError::EmptySymbol);
        }
        if symbol.contains(',') {
            return Err(WatchlistError::InvalidSymbol(symbol.to_string()));
        }

        if self.current.is_empty() {
            self.current = symbol.to_string();
        } else {
            self.current = format!("{}, {}", self.current, symbol);
        }
        debug!(symbol, buffer = %self.current, "Added symbol to watchlist");
        Ok(&self.current)
    }

    /// Buffer text with the original symbols removed.
    ///
    /// Strips one leading comma and surrounding whitespace from what is left.
    pub fn drop_original(&self) -> String {
        let rest = self
            .current
            .strip_prefix(self.original.as_str())
            .unwrap_or(&self.current);
        let rest = rest.trim_start();
        rest.strip_prefix(',').unwrap_or(rest).trim().to_string()
    }

    /// Chart links for every symbol in the current buffer.
    pub fn chart_links(&self, template: &str) -> Vec<ChartLink> {
        self.symbols()
            .into_iter()
            .map(|symbol| ChartLink {
                symbol: symbol.to_string(),
                url: chart_url(template, symbol),
            })
            .collect()
    }
}

/// Substitute a symbol into a chart URL template.
pub fn chart_url(template: &str, symbol: &str) -> String {
    template.replace(SYMBOL_PLACEHOLDER, symbol)
}

fn split_symbols(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
