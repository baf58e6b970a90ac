//! Display formatting for results.
//!
//! Monetary values follow the conventions of a small set of known locales.
//! Locale names are looked up the same way the C library does (`LC_ALL`,
//! then `LC_MONETARY`, then `LANG`), but an unknown name never fails: it
//! falls back to the system default and finally to `C`.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::env;

pub const PREFERRED_LOCALE: &str = "pt_BR.UTF-8";

/// Shown in place of a number that could not be computed.
pub const UNAVAILABLE: &str = "indisponível";

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MONETARY", "LANG"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Locale {
    PtBr,
    EnUs,
    Posix,
}

impl Locale {
    /// Accepts names such as `pt_BR`, `pt_BR.UTF-8`, `en-US` or `C`.
    pub fn parse(name: &str) -> Option<Locale> {
        let base = name.trim().split(['.', '@']).next().unwrap_or_default();
        match base.replace('-', "_").to_ascii_lowercase().as_str() {
            "pt_br" => Some(Locale::PtBr),
            "en_us" => Some(Locale::EnUs),
            "c" | "posix" => Some(Locale::Posix),
            _ => None,
        }
    }

    pub fn system() -> Locale {
        Self::system_from(|key| env::var(key).ok())
    }

    pub fn system_from(lookup: impl Fn(&str) -> Option<String>) -> Locale {
        // The first variable that is set wins, even if its value is unknown.
        let configured = LOCALE_VARS
            .iter()
            .filter_map(|key| lookup(*key))
            .find(|value| !value.trim().is_empty());
        match configured {
            Some(value) => Self::parse(&value).unwrap_or_else(|| {
                tracing::debug!(locale = %value, "unknown system locale, using C");
                Locale::Posix
            }),
            None => Locale::Posix,
        }
    }

    /// Tries `preferred` first and falls back to the system locale.
    pub fn resolve(preferred: Option<&str>) -> Locale {
        Self::resolve_with(preferred, |key| env::var(key).ok())
    }

    pub fn resolve_with(
        preferred: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Locale {
        if let Some(name) = preferred {
            if let Some(locale) = Self::parse(name) {
                return locale;
            }
            tracing::warn!(locale = %name, "locale not available, using system default");
        }
        Self::system_from(lookup)
    }

    pub fn name(self) -> &'static str {
        match self {
            Locale::PtBr => "pt_BR",
            Locale::EnUs => "en_US",
            Locale::Posix => "C",
        }
    }
}

struct MonetaryConventions {
    symbol: &'static str,
    symbol_separator: &'static str,
    thousands: Option<char>,
    decimal: char,
}

impl Locale {
    fn conventions(self) -> MonetaryConventions {
        match self {
            Locale::PtBr => MonetaryConventions {
                symbol: "R$",
                symbol_separator: " ",
                thousands: Some('.'),
                decimal: ',',
            },
            Locale::EnUs => MonetaryConventions {
                symbol: "$",
                symbol_separator: "",
                thousands: Some(','),
                decimal: '.',
            },
            Locale::Posix => MonetaryConventions {
                symbol: "",
                symbol_separator: "",
                thousands: None,
                decimal: '.',
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    locale: Locale,
}

impl NumberFormat {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Two decimals with grouping and the currency symbol of the locale.
    pub fn currency(&self, value: f64) -> String {
        if !value.is_finite() {
            return UNAVAILABLE.to_string();
        }
        let conventions = self.locale.conventions();
        let rounded = format!("{:.2}", value.abs());
        let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
        let int_part = match conventions.thousands {
            Some(sep) => group_thousands(int_part, sep),
            None => int_part.to_string(),
        };
        let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
        format!(
            "{sign}{}{}{int_part}{}{frac_part}",
            conventions.symbol, conventions.symbol_separator, conventions.decimal
        )
    }

    /// Four decimals, locale independent.
    pub fn fixed4(&self, value: f64) -> String {
        if !value.is_finite() {
            return UNAVAILABLE.to_string();
        }
        let text = format!("{value:.4}");
        if text == "-0.0000" {
            "0.0000".to_string()
        } else {
            text
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(Locale::resolve(Some(PREFERRED_LOCALE)))
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// `[3.0, 2.0]`
pub fn coefficient_list(values: &[f64]) -> String {
    format!("[{}]", values.iter().map(|v| format!("{v:?}")).join(", "))
}
