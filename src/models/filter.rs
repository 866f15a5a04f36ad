// src/models/filter.rs

//! Filter facets and the state object that holds them.
//!
//! Every facet type parses from its wire value via `FromStr`, so unknown
//! input is rejected where it enters the program and reducers only ever
//! see valid values.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Column, RowId};

/// Implements `as_str`, `Display` and `FromStr` for a wire-valued enum.
macro_rules! wire_enum {
    ($name:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value used on the wire and on the command line.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => {
                        let expected: Vec<&str> =
                            $name::ALL.iter().map(|value| value.as_str()).collect();
                        Err(AppError::validation(format!(
                            "unknown {} '{}' (expected one of: {})",
                            $label,
                            other,
                            expected.join(", ")
                        )))
                    }
                }
            }
        }
    };
}

/// Text match mode. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Every word must appear somewhere
    #[default]
    MatchAll,
    /// Whole field must equal the term
    MatchExact,
    /// Words must appear together, in order
    MatchPhrase,
}

wire_enum!(QueryType, "query type", {
    MatchAll => "match_all",
    MatchExact => "match_exact",
    MatchPhrase => "match_phrase",
});

/// Minimum education level facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "HS")]
    HighSchool,
    #[serde(rename = "AA")]
    Associates,
    #[serde(rename = "BA")]
    Bachelors,
    #[serde(rename = "MA")]
    Masters,
    #[serde(rename = "PHD")]
    Doctorate,
}

wire_enum!(EducationLevel, "education level", {
    HighSchool => "HS",
    Associates => "AA",
    Bachelors => "BA",
    Masters => "MA",
    Doctorate => "PHD",
});

/// Worksite facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    #[default]
    Any,
    Customer,
    Contractor,
    Both,
}

wire_enum!(Site, "site", {
    Any => "",
    Customer => "customer",
    Contractor => "contractor",
    Both => "both",
});

/// Vendor business size facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BusinessSize {
    #[default]
    #[serde(rename = "")]
    Any,
    #[serde(rename = "s")]
    Small,
    #[serde(rename = "o")]
    Other,
}

wire_enum!(BusinessSize, "business size", {
    Any => "",
    Small => "s",
    Other => "o",
});

/// Which contract year's price is searched and shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractYear {
    #[default]
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

wire_enum!(ContractYear, "contract year", {
    Current => "current",
    One => "1",
    Two => "2",
});

/// A column that the backend knows how to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Column", into = "Column")]
pub struct SortColumn(Column);

impl SortColumn {
    /// The underlying column.
    pub fn column(&self) -> Column {
        self.0
    }
}

impl TryFrom<Column> for SortColumn {
    type Error = AppError;

    fn try_from(column: Column) -> Result<Self, Self::Error> {
        if column.is_sortable() {
            Ok(Self(column))
        } else {
            Err(AppError::validation(format!(
                "column '{}' is not sortable",
                column.key()
            )))
        }
    }
}

impl From<SortColumn> for Column {
    fn from(sort: SortColumn) -> Self {
        sort.0
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.parse::<Column>()?)
    }
}

/// Active sort: one column at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub column: SortColumn,
    pub descending: bool,
}

impl Sort {
    /// Ascending sort on the given column.
    pub fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// Sort after the user picks `column`: the sorted column flips
    /// direction, any other column starts ascending.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                descending: !self.descending,
            }
        } else {
            Self::ascending(column)
        }
    }

    /// Wire form: column key, `-` prefixed when descending.
    pub fn to_wire(&self) -> String {
        let key = self.column.column().key();
        if self.descending {
            format!("-{key}")
        } else {
            key.to_string()
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::ascending(SortColumn(Column::CurrentPrice))
    }
}

impl FromStr for Sort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(key) => Ok(Self {
                column: key.parse()?,
                descending: true,
            }),
            None => Ok(Self::ascending(s.parse()?)),
        }
    }
}

/// All active filter facets plus the client-side exclusion set.
///
/// Empty strings, empty lists, `None` and the `Any` variants mean
/// "this facet applies no filter".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Schedule identifier; empty means any schedule
    pub schedule: String,

    pub query_type: QueryType,

    /// Free-text search term; empty means no search
    pub search_term: String,

    /// Education levels, deduplicated and kept in canonical order
    pub education: Vec<EducationLevel>,

    pub min_experience: Option<u32>,
    pub max_experience: Option<u32>,

    pub min_price: Option<f64>,
    pub max_price: Option<f64>,

    pub site: Site,
    pub business_size: BusinessSize,
    pub contract_year: ContractYear,
    pub sort: Sort,

    /// 0-based result page
    pub page: u32,

    /// Rows hidden from view; never sent to the backend
    pub excluded_ids: BTreeSet<RowId>,
}

impl FilterState {
    /// Defaults with a caller-chosen initial query type and sort.
    pub fn with_defaults(query_type: QueryType, sort: Sort) -> Self {
        Self {
            query_type,
            sort,
            ..Self::default()
        }
    }

    /// Number of facets currently narrowing the result set.
    pub fn active_facet_count(&self) -> usize {
        [
            !self.schedule.is_empty(),
            !self.search_term.is_empty(),
            !self.education.is_empty(),
            self.min_experience.is_some() || self.max_experience.is_some(),
            self.min_price.is_some() || self.max_price.is_some(),
            self.site != Site::Any,
            self.business_size != BusinessSize::Any,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

/// Deduplicate education levels into canonical order.
pub fn normalize_education(levels: impl IntoIterator<Item = EducationLevel>) -> Vec<EducationLevel> {
    levels
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
