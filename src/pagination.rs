// src/pagination.rs

use std::num::IntErrorKind;

use validator::Validate;

use crate::errors::{AppError, QueryParam};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1))]
    pub page: i64,
    #[validate(range(min = 1, max = 100))]
    pub size: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// Parsuje surowe wartości z query stringa. Brak klucza oznacza wartość domyślną,
    /// pusty lub nieliczbowy tekst jest błędem. `page` jest sprawdzane przed `size`.
    pub fn from_params(page: Option<&str>, size: Option<&str>) -> Result<Self, AppError> {
        let defaults = PageQuery::default();

        let page = parse_integer(page, defaults.page)
            .ok_or(AppError::InvalidParameter(QueryParam::Page))?;

        // Nieparsowalny `size` zamieniamy na 0, które i tak nie przejdzie walidacji zakresu
        let size = parse_integer(size, defaults.size).unwrap_or(0);

        let query = PageQuery { page, size };
        match query.validate() {
            Ok(()) => Ok(query),
            Err(errors) if errors.field_errors().contains_key("page") => {
                Err(AppError::InvalidParameter(QueryParam::Page))
            }
            Err(_) => Err(AppError::InvalidParameter(QueryParam::Size)),
        }
    }

    pub fn as_query_pairs(&self) -> [(&'static str, i64); 2] {
        [("page", self.page), ("size", self.size)]
    }
}

/// Liczby spoza zakresu `i64` są nasycane do `i64::MAX` / `i64::MIN`,
/// więc ogromna strona przechodzi walidację, a ogromny rozmiar nie.
fn parse_integer(raw: Option<&str>, default: i64) -> Option<i64> {
    let text = match raw {
        None => return Some(default),
        Some(text) => text,
    };

    match text.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
