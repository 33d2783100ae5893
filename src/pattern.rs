//! Date patterns in the familiar `MMMM YYYY` token style.
//!
//! | Token  | Output                     |
//! |--------|----------------------------|
//! | `YYYY` | four-digit year            |
//! | `YY`   | two-digit year             |
//! | `MMMM` | month name                 |
//! | `MMM`  | abbreviated month name     |
//! | `MM`   | zero-padded month number   |
//! | `M`    | month number               |
//! | `Mo`   | ordinal month number       |
//! | `DD`   | zero-padded day of month   |
//! | `D`    | day of month               |
//! | `Do`   | ordinal day of month       |
//! | `dddd` | weekday name               |
//! | `ddd`  | abbreviated weekday name   |
//! | `dd`   | two-letter weekday name    |
//! | `d`    | weekday number, Sunday = 0 |
//! | `do`   | ordinal weekday number     |
//!
//! Text inside `[...]` is copied verbatim; any other character is a literal.

use crate::locale::Locale;
use std::fmt;
use time::Date;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Year4,
    Year2,
    MonthName,
    MonthShort,
    MonthOrdinal,
    Month2,
    Month,
    DayOrdinal,
    Day2,
    Day,
    WeekdayName,
    WeekdayShort,
    WeekdayMin,
    WeekdayOrdinal,
    Weekday,
}

// Longer tokens must come before their prefixes
static FIELDS: &[(&str, Field)] = &[
    ("YYYY", Field::Year4),
    ("MMMM", Field::MonthName),
    ("dddd", Field::WeekdayName),
    ("MMM", Field::MonthShort),
    ("ddd", Field::WeekdayShort),
    ("YY", Field::Year2),
    ("Mo", Field::MonthOrdinal),
    ("MM", Field::Month2),
    ("Do", Field::DayOrdinal),
    ("DD", Field::Day2),
    ("dd", Field::WeekdayMin),
    ("do", Field::WeekdayOrdinal),
    ("M", Field::Month),
    ("D", Field::Day),
    ("d", Field::Weekday),
];

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token {
    Field(Field),
    Literal(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DatePattern(Vec<Token>);

impl DatePattern {
    pub(crate) fn parse(pattern: &str) -> DatePattern {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;
        while let Some(c) = rest.chars().next() {
            if c == '[' {
                if let Some(end) = rest.find(']') {
                    literal.push_str(&rest[1..end]);
                    rest = &rest[end + 1..];
                    continue;
                }
            }
            if let Some(&(tok, field)) = FIELDS.iter().find(|(tok, _)| rest.starts_with(tok)) {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Field(field));
                rest = &rest[tok.len()..];
            } else {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        DatePattern(tokens)
    }

    pub(crate) fn display<'a>(&'a self, date: Date, locale: &'a Locale) -> FormattedDate<'a> {
        FormattedDate {
            pattern: self,
            date,
            locale,
        }
    }

    pub(crate) fn format(&self, date: Date, locale: &Locale) -> String {
        self.display(date, locale).to_string()
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FormattedDate<'a> {
    pattern: &'a DatePattern,
    date: Date,
    locale: &'a Locale,
}

impl fmt::Display for FormattedDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date;
        let locale = self.locale;
        for token in &self.pattern.0 {
            match *token {
                Token::Literal(ref s) => f.write_str(s)?,
                Token::Field(Field::Year4) => write!(f, "{:04}", date.year())?,
                Token::Field(Field::Year2) => write!(f, "{:02}", date.year().rem_euclid(100))?,
                Token::Field(Field::MonthName) => f.write_str(locale.month_name(date.month()))?,
                Token::Field(Field::MonthShort) => f.write_str(locale.month_short(date.month()))?,
                Token::Field(Field::MonthOrdinal) => {
                    f.write_str(&locale.ordinal(u8::from(date.month()).into()))?;
                }
                Token::Field(Field::Month2) => write!(f, "{:02}", u8::from(date.month()))?,
                Token::Field(Field::Month) => write!(f, "{}", u8::from(date.month()))?,
                Token::Field(Field::DayOrdinal) => f.write_str(&locale.ordinal(date.day().into()))?,
                Token::Field(Field::Day2) => write!(f, "{:02}", date.day())?,
                Token::Field(Field::Day) => write!(f, "{}", date.day())?,
                Token::Field(Field::WeekdayName) => {
                    f.write_str(locale.weekday_name(date.weekday()))?;
                }
                Token::Field(Field::WeekdayShort) => {
                    f.write_str(locale.weekday_short(date.weekday()))?;
                }
                Token::Field(Field::WeekdayMin) => f.write_str(locale.weekday_min(date.weekday()))?,
                Token::Field(Field::WeekdayOrdinal) => f.write_str(
                    &locale.ordinal(date.weekday().number_days_from_sunday().into()),
                )?,
                Token::Field(Field::Weekday) => {
                    write!(f, "{}", date.weekday().number_days_from_sunday())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleRules;
    use time::macros::date;

    fn fmt(pattern: &str, date: Date) -> String {
        DatePattern::parse(pattern).format(date, &Locale::english())
    }

    #[test]
    fn test_month_year() {
        assert_eq!(fmt("MMMM YYYY", date!(2024 - 03 - 15)), "March 2024");
    }

    #[test]
    fn test_numeric() {
        assert_eq!(fmt("YYYY-MM-DD", date!(2024 - 03 - 05)), "2024-03-05");
        assert_eq!(fmt("D/M/YY", date!(2009 - 11 - 05)), "5/11/09");
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(fmt("Do [of] MMMM", date!(2024 - 03 - 22)), "22nd of March");
        assert_eq!(fmt("Mo", date!(2024 - 03 - 22)), "3rd");
        assert_eq!(fmt("do", date!(2024 - 03 - 22)), "5th");
    }

    #[test]
    fn test_weekdays() {
        let d = date!(2024 - 03 - 04);
        assert_eq!(fmt("dddd", d), "Monday");
        assert_eq!(fmt("ddd", d), "Mon");
        assert_eq!(fmt("dd", d), "Mo");
        assert_eq!(fmt("d", d), "1");
    }

    #[test]
    fn test_escapes_and_literals() {
        assert_eq!(fmt("[Month:] MMM", date!(2024 - 12 - 01)), "Month: Dec");
        assert_eq!(fmt("[oops MMM", date!(2024 - 12 - 01)), "[oops Dec");
        assert_eq!(fmt("~ YYYY ~", date!(2024 - 12 - 01)), "~ 2024 ~");
    }

    #[test]
    fn test_five_ms() {
        // "MMMMM" is a month name followed by a month number
        assert_eq!(fmt("MMMMM", date!(2024 - 02 - 01)), "February2");
    }

    #[test]
    fn test_locale_names() {
        let rules = LocaleRules {
            months: [
                "Jan.", "Feb.", "Mär.", "Apr.", "Mai", "Jun.", "Jul.", "Aug.", "Sep.", "Okt.",
                "Nov.", "Dez.",
            ]
            .map(String::from),
            ordinal_suffix: Some(String::from(".")),
            ..LocaleRules::default()
        };
        let locale = Locale::new(String::from("de"), rules).unwrap();
        let pattern = DatePattern::parse("Do MMMM YYYY");
        assert_eq!(pattern.format(date!(2024 - 03 - 01), &locale), "1. Mär. 2024");
    }
}
