use crate::locale::Locale;
use crate::pattern::DatePattern;
use time::Date;

/// The header line's format, parsed once from the configured pattern
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct HeaderFormat {
    full: DatePattern,
    month_only: DatePattern,
    // Length of the month-only pattern's source text; a fragment is only
    // shown when this is at least 2
    month_only_len: usize,
}

impl HeaderFormat {
    pub(super) fn new(pattern: &str) -> HeaderFormat {
        let month_only = month_fragment(pattern);
        HeaderFormat {
            full: DatePattern::parse(pattern),
            month_only: DatePattern::parse(&month_only),
            month_only_len: month_only.len(),
        }
    }

    pub(super) fn label(&self, first: Date, last: Date, locale: &Locale) -> String {
        if (first.year(), first.month()) == (last.year(), last.month()) {
            self.full.format(first, locale)
        } else if first.year() != last.year() {
            format!(
                "{} / {}",
                self.full.display(first, locale),
                self.full.display(last, locale)
            )
        } else if self.month_only_len > 1 {
            format!(
                "{} / {}",
                self.month_only.display(first, locale),
                self.full.display(last, locale)
            )
        } else {
            self.full.format(last, locale)
        }
    }
}

/// Reduces a header pattern to just its month part: `Mo` if the pattern uses
/// ordinal months, otherwise one `M` per `M` anywhere in the pattern.
fn month_fragment(pattern: &str) -> String {
    if pattern.contains("Mo") {
        String::from("Mo")
    } else {
        "M".repeat(pattern.matches('M').count())
    }
}
