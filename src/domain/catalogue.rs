//! Built-in catalogue of well-known symbols, grouped by category.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub category: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn entry(category: &'static str, name: &'static str, symbol: &'static str) -> CatalogueEntry {
    CatalogueEntry {
        category,
        name,
        symbol,
    }
}

pub const US_STOCKS: &str = "US Stocks";
pub const INTERNATIONAL_STOCKS: &str = "International Stocks";
pub const INDICES: &str = "Indices";

/// Entries in display order; categories are contiguous.
pub const POPULAR_SYMBOLS: &[CatalogueEntry] = &[
    entry(US_STOCKS, "Apple", "AAPL"),
    entry(US_STOCKS, "Microsoft", "MSFT"),
    entry(US_STOCKS, "Google", "GOOGL"),
    entry(US_STOCKS, "Amazon", "AMZN"),
    entry(US_STOCKS, "Tesla", "TSLA"),
    entry(US_STOCKS, "NVIDIA", "NVDA"),
    entry(US_STOCKS, "Meta", "META"),
    entry(US_STOCKS, "Netflix", "NFLX"),
    entry(INTERNATIONAL_STOCKS, "Toyota", "7203.T"),
    entry(INTERNATIONAL_STOCKS, "Samsung", "005930.KS"),
    entry(INTERNATIONAL_STOCKS, "ASML", "ASML.AS"),
    entry(INTERNATIONAL_STOCKS, "HSBC", "HSBA.L"),
    entry(INTERNATIONAL_STOCKS, "Sony", "6758.T"),
    entry(INDICES, "S&P 500", "^GSPC"),
    entry(INDICES, "NASDAQ", "^IXIC"),
    entry(INDICES, "Dow Jones", "^DJI"),
    entry(INDICES, "FTSE 100", "^FTSE"),
    entry(INDICES, "Nikkei 225", "^N225"),
];

impl CatalogueEntry {
    /// `Name (SYMBOL)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// Category names in catalogue order, without duplicates.
pub fn categories() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for e in POPULAR_SYMBOLS {
        if !out.contains(&e.category) {
            out.push(e.category);
        }
    }
    out
}

pub fn entries_in(category: &str) -> impl Iterator<Item = &'static CatalogueEntry> + '_ {
    POPULAR_SYMBOLS.iter().filter(move |e| e.category == category)
}

/// Case-insensitive symbol lookup.
pub fn lookup(symbol: &str) -> Option<&'static CatalogueEntry> {
    let symbol = symbol.trim();
    POPULAR_SYMBOLS
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
}

/// Descriptive label for `symbol`, or the symbol itself when unknown.
pub fn display_label(symbol: &str) -> String {
    lookup(symbol).map_or_else(|| symbol.to_string(), CatalogueEntry::label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_in_order() {
        assert_eq!(categories(), vec![US_STOCKS, INTERNATIONAL_STOCKS, INDICES]);
    }

    #[test]
    fn every_category_is_contiguous() {
        let total: usize = categories().iter().map(|c| entries_in(c).count()).sum();
        assert_eq!(total, POPULAR_SYMBOLS.len());
        assert_eq!(entries_in(US_STOCKS).count(), 8);
        assert_eq!(entries_in(INTERNATIONAL_STOCKS).count(), 5);
        assert_eq!(entries_in(INDICES).count(), 5);
    }

    #[test]
    fn lookup_ignores_case() {
        let apple = lookup("aapl").unwrap();
        assert_eq!(apple.name, "Apple");
        assert_eq!(apple.category, US_STOCKS);
        assert_eq!(lookup("^gspc").unwrap().name, "S&P 500");
        assert!(lookup("ZZZZ").is_none());
    }

    #[test]
    fn display_label_falls_back_to_symbol() {
        assert_eq!(display_label("AAPL"), "Apple (AAPL)");
        assert_eq!(display_label("7203.T"), "Toyota (7203.T)");
        assert_eq!(display_label("ACME"), "ACME");
    }
}
