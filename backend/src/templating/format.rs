//! Locale-aware rendering of resolved values.
//!
//! Formatting is driven entirely by [`FormatOptions`], which callers build
//! from configuration and pass down explicitly.

use chrono::{Datelike, NaiveDate, Weekday};
use common::model::variable::DateFormat;
use num_format::{CustomFormat, Grouping, ToFormattedString};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Separators and words used when printing numbers and booleans.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub currency_symbol: String,
    pub currency_decimals: usize,
    pub yes: String,
    pub no: String,
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            yes: "Sí".to_string(),
            no: "No".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatOptions {
    pub date_format: DateFormat,
    pub locale: LocaleFormat,
}

impl FormatOptions {
    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let month = MONTHS[date.month0() as usize];
        match self.date_format {
            DateFormat::Short => date.format("%d/%m/%Y").to_string(),
            DateFormat::Long => format!("{} de {} de {}", date.day(), month, date.year()),
            DateFormat::Full => format!(
                "{}, {} de {} de {}",
                weekday_name(date.weekday()),
                date.day(),
                month,
                date.year()
            ),
        }
    }

    pub fn format_bool(&self, value: bool) -> String {
        if value {
            self.locale.yes.clone()
        } else {
            self.locale.no.clone()
        }
    }

    /// Integers print without decimals, anything else with two.
    pub fn format_number(&self, value: f64) -> String {
        let decimals = if value.fract() == 0.0 { 0 } else { 2 };
        self.format_fixed(value, decimals)
    }

    pub fn format_currency(&self, value: f64) -> String {
        let amount = self.format_fixed(value.abs(), self.locale.currency_decimals);
        let sign = if value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, self.locale.currency_symbol, amount)
    }

    /// Rounds to `decimals` places and groups the integer part.
    pub fn format_fixed(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let scale = 10u128.pow(decimals as u32);
        let scaled_f = (value.abs() * scale as f64).round();
        if scaled_f >= u128::MAX as f64 {
            return self.format_wide(value, decimals);
        }
        let scaled = scaled_f as u128;
        let integer = scaled / scale;
        let fraction = scaled % scale;

        let grouped = match CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(&self.locale.thousands_separator)
            .build()
        {
            Ok(format) => integer.to_formatted_string(&format),
            Err(_) => integer.to_string(),
        };

        let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };
        if decimals == 0 {
            format!("{}{}", sign, grouped)
        } else {
            format!(
                "{}{}{}{:0width$}",
                sign,
                grouped,
                self.locale.decimal_separator,
                fraction,
                width = decimals
            )
        }
    }

    /// Values past `u128` after scaling: the exact decimal expansion of the
    /// float, grouped by hand.
    fn format_wide(&self, value: f64, decimals: usize) -> String {
        let digits = format!("{:.*}", decimals, value.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut grouped = String::with_capacity(integer.len() * 4 / 3);
        for (index, digit) in integer.chars().enumerate() {
            if index > 0 && (integer.len() - index) % 3 == 0 {
                grouped.push_str(&self.locale.thousands_separator);
            }
            grouped.push(digit);
        }

        let sign = if value < 0.0 { "-" } else { "" };
        if fraction.is_empty() {
            format!("{}{}", sign, grouped)
        } else {
            format!("{}{}{}{}", sign, grouped, self.locale.decimal_separator, fraction)
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}
