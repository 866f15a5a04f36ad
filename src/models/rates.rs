// src/models/rates.rs

//! Rate rows and the `/rates` response envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{Column, ContractYear};

/// Identifier of a result row, unique within one result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One labor rate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResultRow {
    pub id: RowId,

    #[serde(default)]
    pub labor_category: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub min_years_experience: Option<u32>,

    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub next_year_price: Option<f64>,
    #[serde(default)]
    pub second_year_price: Option<f64>,

    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub sin: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub idv_piid: Option<String>,
    #[serde(default)]
    pub business_size: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub contract_start: Option<String>,
    #[serde(default)]
    pub contract_end: Option<String>,

    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawResultRow {
    /// Row with only an id; handy for tests and synthetic data.
    pub fn new(id: u64) -> Self {
        Self {
            id: RowId(id),
            labor_category: None,
            education_level: None,
            min_years_experience: None,
            current_price: None,
            next_year_price: None,
            second_year_price: None,
            schedule: None,
            sin: None,
            vendor_name: None,
            idv_piid: None,
            business_size: None,
            site: None,
            contract_start: None,
            contract_end: None,
            extra: Map::new(),
        }
    }

    /// Price for the given contract year.
    pub fn price_for(&self, year: ContractYear) -> Option<f64> {
        match year {
            ContractYear::Current => self.current_price,
            ContractYear::One => self.next_year_price,
            ContractYear::Two => self.second_year_price,
        }
    }

    /// Display text for a cell. The price column follows `year`.
    pub fn cell(&self, column: Column, year: ContractYear) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        match column {
            Column::LaborCategory => text(&self.labor_category),
            Column::EducationLevel => text(&self.education_level),
            Column::MinYearsExperience => self
                .min_years_experience
                .map(|years| years.to_string())
                .unwrap_or_default(),
            Column::CurrentPrice => self
                .price_for(year)
                .map(format_price)
                .unwrap_or_default(),
            Column::Schedule => text(&self.schedule),
            Column::Sin => text(&self.sin),
            Column::VendorName => text(&self.vendor_name),
            Column::BusinessSize => match self.business_size.as_deref() {
                Some("s") => "small business".to_string(),
                Some("o") => "other than small".to_string(),
                other => other.unwrap_or_default().to_string(),
            },
            Column::Site => text(&self.site),
            Column::ContractEnd => text(&self.contract_end),
        }
    }
}

/// Format a dollar amount with two decimals.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Body of a `/rates` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatesResponse {
    /// Total matches on the server, across all pages
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub average: Option<f64>,

    #[serde(default)]
    pub results: Vec<RawResultRow>,
}
