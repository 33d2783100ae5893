use crate::config::ConfigError;
use serde::Deserialize;
use time::{Month, Weekday};

static MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// All weekday tables start on Sunday
static WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

static WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

static WEEKDAYS_MIN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Name under which the built-in English rules are known
pub(crate) const DEFAULT_LOCALE_NAME: &str = "en";

/// Caller-supplied rules for naming months and weekdays.  Any table left out
/// of a configuration file falls back to English.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LocaleRules {
    pub(crate) months: [String; 12],
    pub(crate) months_short: [String; 12],
    pub(crate) weekdays: [String; 7],
    pub(crate) weekdays_short: [String; 7],
    pub(crate) weekdays_min: [String; 7],
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub(crate) first_day_of_week: u8,
    /// Appended to numbers for the `Do`/`Mo`/`do` tokens; `None` means English
    /// "st"/"nd"/"rd"/"th" rules
    pub(crate) ordinal_suffix: Option<String>,
}

impl Default for LocaleRules {
    fn default() -> LocaleRules {
        LocaleRules {
            months: MONTHS.map(String::from),
            months_short: MONTHS_SHORT.map(String::from),
            weekdays: WEEKDAYS.map(String::from),
            weekdays_short: WEEKDAYS_SHORT.map(String::from),
            weekdays_min: WEEKDAYS_MIN.map(String::from),
            first_day_of_week: 0,
            ordinal_suffix: None,
        }
    }
}

/// The `locale` table as it appears in a configuration.  Both fields are
/// required whenever the table itself is present.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct LocaleConfig {
    pub(crate) name: Option<String>,
    pub(crate) ruleset: Option<LocaleRules>,
}

/// A validated locale.  Every formatting call receives one of these
/// explicitly; there is no process-wide locale.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Locale {
    name: String,
    rules: LocaleRules,
    week_start: Weekday,
}

impl Locale {
    pub(crate) fn english() -> Locale {
        Locale {
            name: String::from(DEFAULT_LOCALE_NAME),
            rules: LocaleRules::default(),
            week_start: Weekday::Sunday,
        }
    }

    pub(crate) fn new(name: String, rules: LocaleRules) -> Result<Locale, ConfigError> {
        if rules.first_day_of_week > 6 {
            return Err(ConfigError::InvalidWeekStart(rules.first_day_of_week));
        }
        let week_start = Weekday::Sunday.nth_next(rules.first_day_of_week);
        Ok(Locale {
            name,
            rules,
            week_start,
        })
    }

    pub(crate) fn from_config(config: Option<&LocaleConfig>) -> Result<Locale, ConfigError> {
        match config {
            None => Ok(Locale::english()),
            Some(LocaleConfig {
                name: Some(name),
                ruleset: Some(rules),
            }) => Locale::new(name.clone(), rules.clone()),
            Some(_) => Err(ConfigError::IncompleteLocale),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub(crate) fn month_name(&self, month: Month) -> &str {
        &self.rules.months[month_index(month)]
    }

    pub(crate) fn month_short(&self, month: Month) -> &str {
        &self.rules.months_short[month_index(month)]
    }

    pub(crate) fn weekday_name(&self, wd: Weekday) -> &str {
        &self.rules.weekdays[weekday_index(wd)]
    }

    pub(crate) fn weekday_short(&self, wd: Weekday) -> &str {
        &self.rules.weekdays_short[weekday_index(wd)]
    }

    pub(crate) fn weekday_min(&self, wd: Weekday) -> &str {
        &self.rules.weekdays_min[weekday_index(wd)]
    }

    pub(crate) fn ordinal(&self, n: u32) -> String {
        match self.rules.ordinal_suffix {
            Some(ref suffix) => format!("{n}{suffix}"),
            None => english_ordinal(n),
        }
    }
}

fn month_index(month: Month) -> usize {
    usize::from(u8::from(month)) - 1
}

fn weekday_index(wd: Weekday) -> usize {
    usize::from(wd.number_days_from_sunday())
}

fn english_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn french_rules() -> LocaleRules {
        LocaleRules {
            months: [
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ]
            .map(String::from),
            first_day_of_week: 1,
            ordinal_suffix: Some(String::from("e")),
            ..LocaleRules::default()
        }
    }

    #[test]
    fn test_english_names() {
        let locale = Locale::english();
        assert_eq!(locale.name(), "en");
        assert_eq!(locale.month_name(Month::September), "September");
        assert_eq!(locale.month_short(Month::January), "Jan");
        assert_eq!(locale.weekday_name(Weekday::Wednesday), "Wednesday");
        assert_eq!(locale.weekday_short(Weekday::Sunday), "Sun");
        assert_eq!(locale.weekday_min(Weekday::Saturday), "Sa");
        assert_eq!(locale.week_start(), Weekday::Sunday);
    }

    #[test]
    fn test_english_ordinals() {
        let locale = Locale::english();
        assert_eq!(locale.ordinal(1), "1st");
        assert_eq!(locale.ordinal(2), "2nd");
        assert_eq!(locale.ordinal(3), "3rd");
        assert_eq!(locale.ordinal(4), "4th");
        assert_eq!(locale.ordinal(11), "11th");
        assert_eq!(locale.ordinal(12), "12th");
        assert_eq!(locale.ordinal(13), "13th");
        assert_eq!(locale.ordinal(21), "21st");
        assert_eq!(locale.ordinal(22), "22nd");
        assert_eq!(locale.ordinal(31), "31st");
    }

    #[test]
    fn test_custom_rules() {
        let locale = Locale::new(String::from("fr"), french_rules()).unwrap();
        assert_eq!(locale.name(), "fr");
        assert_eq!(locale.month_name(Month::August), "août");
        // Tables not given fall back to English
        assert_eq!(locale.weekday_short(Weekday::Monday), "Mon");
        assert_eq!(locale.week_start(), Weekday::Monday);
        assert_eq!(locale.ordinal(2), "2e");
    }

    #[test]
    fn test_absent_config_is_english() {
        assert_eq!(Locale::from_config(None), Ok(Locale::english()));
    }

    #[test]
    fn test_missing_ruleset() {
        let config = LocaleConfig {
            name: Some(String::from("fr")),
            ruleset: None,
        };
        assert_eq!(
            Locale::from_config(Some(&config)),
            Err(ConfigError::IncompleteLocale)
        );
    }

    #[test]
    fn test_missing_name() {
        let config = LocaleConfig {
            name: None,
            ruleset: Some(french_rules()),
        };
        assert_eq!(
            Locale::from_config(Some(&config)),
            Err(ConfigError::IncompleteLocale)
        );
    }

    #[test]
    fn test_bad_week_start() {
        let rules = LocaleRules {
            first_day_of_week: 7,
            ..LocaleRules::default()
        };
        assert_eq!(
            Locale::new(String::from("xx"), rules),
            Err(ConfigError::InvalidWeekStart(7))
        );
    }
}
