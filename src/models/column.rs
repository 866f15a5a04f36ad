//! Result table column definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    LaborCategory,
    EducationLevel,
    MinYearsExperience,
    CurrentPrice,
    Schedule,
    Sin,
    VendorName,
    BusinessSize,
    Site,
    ContractEnd,
}

impl Column {
    /// Default column order of the results table.
    pub const ALL: &'static [Column] = &[
        Column::LaborCategory,
        Column::EducationLevel,
        Column::MinYearsExperience,
        Column::CurrentPrice,
        Column::VendorName,
        Column::BusinessSize,
        Column::Site,
        Column::ContractEnd,
        Column::Sin,
        Column::Schedule,
    ];

    /// Field key, shared by row JSON and the `sort` parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Column::LaborCategory => "labor_category",
            Column::EducationLevel => "education_level",
            Column::MinYearsExperience => "min_years_experience",
            Column::CurrentPrice => "current_price",
            Column::Schedule => "schedule",
            Column::Sin => "sin",
            Column::VendorName => "vendor_name",
            Column::BusinessSize => "business_size",
            Column::Site => "site",
            Column::ContractEnd => "contract_end",
        }
    }

    /// Header label.
    pub fn title(&self) -> &'static str {
        match self {
            Column::LaborCategory => "Labor Category",
            Column::EducationLevel => "Education",
            Column::MinYearsExperience => "Experience",
            Column::CurrentPrice => "Price",
            Column::Schedule => "Schedule",
            Column::Sin => "SIN",
            Column::VendorName => "Vendor",
            Column::BusinessSize => "Business Size",
            Column::Site => "Worksite",
            Column::ContractEnd => "Contract End",
        }
    }

    pub fn is_sortable(&self) -> bool {
        !matches!(self, Column::Sin)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.key() == s)
            .ok_or_else(|| AppError::validation(format!("unknown column '{s}'")))
    }
}
