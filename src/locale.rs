//! Month-name translation for price-history labels.
//!
//! The catalog labels historical rows as `"<Month>/<Year>"` using English month
//! names (e.g. `"January/2020"`). Tables here are immutable statics and can be
//! shared freely.

use crate::config::CURRENT_VALUE_LABEL;

const ENGLISH_MONTHS: [&str; 12] = [
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

/// Target-locale month names, indexed January through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthNames {
    pub locale: &'static str,
    pub months: [&'static str; 12],
}

pub static PT_BR: MonthNames = MonthNames {
    locale: "pt-BR",
    months: [
        "Janeiro",
        "Fevereiro",
        "Março",
        "Abril",
        "Maio",
        "Junho",
        "Julho",
        "Agosto",
        "Setembro",
        "Outubro",
        "Novembro",
        "Dezembro",
    ],
};

/// Leaves labels exactly as the catalog sent them.
pub static EN: MonthNames = MonthNames {
    locale: "en",
    months: ENGLISH_MONTHS,
};

impl MonthNames {
    /// Translate an English month name; unknown names yield `None`.
    pub fn month(&self, english: &str) -> Option<&'static str> {
        ENGLISH_MONTHS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(english.trim()))
            .map(|i| self.months[i])
    }

    /// Translate a price-history label.
    ///
    /// `"Valor Atual"`, labels without a `/` and unknown months pass through unchanged.
    pub fn translate_label(&self, label: &str) -> String {
        if label == CURRENT_VALUE_LABEL {
            return label.to_string();
        }
        match label.split_once('/') {
            Some((month, year)) => match self.month(month) {
                Some(translated) => format!("{}/{}", translated, year),
                None => label.to_string(),
            },
            None => label.to_string(),
        }
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        PT_BR
    }
}
