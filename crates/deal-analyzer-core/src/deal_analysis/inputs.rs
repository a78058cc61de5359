use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DealAnalyzerError;
use crate::types::{Money, Percent};
use crate::DealAnalyzerResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw inputs for screening a rental property acquisition.
///
/// Percentage fields hold plain percentages (`20.0` = 20%). Every field has a
/// seed default, so a partial JSON document deserialises as "defaults with
/// these fields edited".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealInputs {
    /// Property address (informational)
    pub address: String,

    // --- Purchase ---
    pub purchase_price: Money,
    /// Closing costs as % of purchase price
    pub closing_costs_percentage: Percent,
    pub repair_costs: Money,
    /// After-repair value (informational)
    pub arv: Money,

    // --- Financing ---
    /// Down payment as % of purchase price
    pub down_payment_percentage: Percent,
    /// Annual interest rate in %
    pub interest_rate: Percent,
    /// Mortgage term in years
    pub mortgage_length: u32,
    /// Other upfront fees
    pub fees: Money,

    // --- Revenue (monthly) ---
    pub monthly_rent: Money,
    pub other_income: Money,
    /// Number of units (informational)
    pub num_units: u32,

    // --- Fixed monthly expenses ---
    pub property_tax: Money,
    pub property_insurance: Money,

    // --- Expenses as % of monthly income ---
    pub maintenance_repairs: Percent,
    pub capex: Percent,
    pub property_management: Percent,
    pub vacancy: Percent,

    // --- Flat monthly expenses ---
    pub sewer: Money,
    pub water: Money,
    pub lawn_snow: Money,
    pub garbage: Money,
    pub electric: Money,
    pub gas: Money,
    pub hoa: Money,
    pub other_expenses: Money,

    /// Charge private mortgage insurance when the down payment is under 20%
    pub pmi_enabled: bool,
}

impl Default for DealInputs {
    fn default() -> Self {
        Self {
            address: String::new(),
            purchase_price: dec!(180000),
            closing_costs_percentage: dec!(2.00),
            repair_costs: dec!(10000),
            arv: dec!(215000),
            down_payment_percentage: dec!(20.0),
            interest_rate: dec!(3.25),
            mortgage_length: 30,
            fees: Decimal::ZERO,
            monthly_rent: dec!(2200),
            other_income: Decimal::ZERO,
            num_units: 4,
            property_tax: dec!(150),
            property_insurance: dec!(100),
            maintenance_repairs: dec!(5.00),
            capex: dec!(5.00),
            property_management: Decimal::ZERO,
            vacancy: dec!(3.00),
            sewer: Decimal::ZERO,
            water: Decimal::ZERO,
            lawn_snow: dec!(50),
            garbage: dec!(50),
            electric: Decimal::ZERO,
            gas: Decimal::ZERO,
            hoa: dec!(25),
            other_expenses: Decimal::ZERO,
            pmi_enabled: true,
        }
    }
}

/// Every numeric field of [`DealInputs`], addressable by its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealField {
    PurchasePrice,
    ClosingCostsPercentage,
    RepairCosts,
    Arv,
    DownPaymentPercentage,
    InterestRate,
    MortgageLength,
    Fees,
    MonthlyRent,
    OtherIncome,
    NumUnits,
    PropertyTax,
    PropertyInsurance,
    MaintenanceRepairs,
    Capex,
    PropertyManagement,
    Vacancy,
    Sewer,
    Water,
    LawnSnow,
    Garbage,
    Electric,
    Gas,
    Hoa,
    OtherExpenses,
}

impl DealField {
    pub const ALL: [DealField; 25] = [
        DealField::PurchasePrice,
        DealField::ClosingCostsPercentage,
        DealField::RepairCosts,
        DealField::Arv,
        DealField::DownPaymentPercentage,
        DealField::InterestRate,
        DealField::MortgageLength,
        DealField::Fees,
        DealField::MonthlyRent,
        DealField::OtherIncome,
        DealField::NumUnits,
        DealField::PropertyTax,
        DealField::PropertyInsurance,
        DealField::MaintenanceRepairs,
        DealField::Capex,
        DealField::PropertyManagement,
        DealField::Vacancy,
        DealField::Sewer,
        DealField::Water,
        DealField::LawnSnow,
        DealField::Garbage,
        DealField::Electric,
        DealField::Gas,
        DealField::Hoa,
        DealField::OtherExpenses,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DealField::PurchasePrice => "purchase_price",
            DealField::ClosingCostsPercentage => "closing_costs_percentage",
            DealField::RepairCosts => "repair_costs",
            DealField::Arv => "arv",
            DealField::DownPaymentPercentage => "down_payment_percentage",
            DealField::InterestRate => "interest_rate",
            DealField::MortgageLength => "mortgage_length",
            DealField::Fees => "fees",
            DealField::MonthlyRent => "monthly_rent",
            DealField::OtherIncome => "other_income",
            DealField::NumUnits => "num_units",
            DealField::PropertyTax => "property_tax",
            DealField::PropertyInsurance => "property_insurance",
            DealField::MaintenanceRepairs => "maintenance_repairs",
            DealField::Capex => "capex",
            DealField::PropertyManagement => "property_management",
            DealField::Vacancy => "vacancy",
            DealField::Sewer => "sewer",
            DealField::Water => "water",
            DealField::LawnSnow => "lawn_snow",
            DealField::Garbage => "garbage",
            DealField::Electric => "electric",
            DealField::Gas => "gas",
            DealField::Hoa => "hoa",
            DealField::OtherExpenses => "other_expenses",
        }
    }

    /// Fields stored as whole numbers (years, unit count).
    pub fn is_integer(self) -> bool {
        matches!(self, DealField::MortgageLength | DealField::NumUnits)
    }

    /// Fields stored as plain percentages.
    pub fn is_percentage(self) -> bool {
        matches!(
            self,
            DealField::ClosingCostsPercentage
                | DealField::DownPaymentPercentage
                | DealField::InterestRate
                | DealField::MaintenanceRepairs
                | DealField::Capex
                | DealField::PropertyManagement
                | DealField::Vacancy
        )
    }
}

impl fmt::Display for DealField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DealField {
    type Err = DealAnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| DealAnalyzerError::InvalidInput {
                field: s.to_string(),
                reason: "Unknown deal input field".into(),
            })
    }
}

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

impl DealInputs {
    /// Read a numeric field.
    pub fn get(&self, field: DealField) -> Decimal {
        match field {
            DealField::PurchasePrice => self.purchase_price,
            DealField::ClosingCostsPercentage => self.closing_costs_percentage,
            DealField::RepairCosts => self.repair_costs,
            DealField::Arv => self.arv,
            DealField::DownPaymentPercentage => self.down_payment_percentage,
            DealField::InterestRate => self.interest_rate,
            DealField::MortgageLength => Decimal::from(self.mortgage_length),
            DealField::Fees => self.fees,
            DealField::MonthlyRent => self.monthly_rent,
            DealField::OtherIncome => self.other_income,
            DealField::NumUnits => Decimal::from(self.num_units),
            DealField::PropertyTax => self.property_tax,
            DealField::PropertyInsurance => self.property_insurance,
            DealField::MaintenanceRepairs => self.maintenance_repairs,
            DealField::Capex => self.capex,
            DealField::PropertyManagement => self.property_management,
            DealField::Vacancy => self.vacancy,
            DealField::Sewer => self.sewer,
            DealField::Water => self.water,
            DealField::LawnSnow => self.lawn_snow,
            DealField::Garbage => self.garbage,
            DealField::Electric => self.electric,
            DealField::Gas => self.gas,
            DealField::Hoa => self.hoa,
            DealField::OtherExpenses => self.other_expenses,
        }
    }

    /// Write a numeric field. Integer fields reject negative or fractional values.
    pub fn set(&mut self, field: DealField, value: Decimal) -> DealAnalyzerResult<()> {
        match field {
            DealField::PurchasePrice => self.purchase_price = value,
            DealField::ClosingCostsPercentage => self.closing_costs_percentage = value,
            DealField::RepairCosts => self.repair_costs = value,
            DealField::Arv => self.arv = value,
            DealField::DownPaymentPercentage => self.down_payment_percentage = value,
            DealField::InterestRate => self.interest_rate = value,
            DealField::MortgageLength => self.mortgage_length = whole_number(field, value)?,
            DealField::Fees => self.fees = value,
            DealField::MonthlyRent => self.monthly_rent = value,
            DealField::OtherIncome => self.other_income = value,
            DealField::NumUnits => self.num_units = whole_number(field, value)?,
            DealField::PropertyTax => self.property_tax = value,
            DealField::PropertyInsurance => self.property_insurance = value,
            DealField::MaintenanceRepairs => self.maintenance_repairs = value,
            DealField::Capex => self.capex = value,
            DealField::PropertyManagement => self.property_management = value,
            DealField::Vacancy => self.vacancy = value,
            DealField::Sewer => self.sewer = value,
            DealField::Water => self.water = value,
            DealField::LawnSnow => self.lawn_snow = value,
            DealField::Garbage => self.garbage = value,
            DealField::Electric => self.electric = value,
            DealField::Gas => self.gas = value,
            DealField::Hoa => self.hoa = value,
            DealField::OtherExpenses => self.other_expenses = value,
        }
        Ok(())
    }
}

fn whole_number(field: DealField, value: Decimal) -> DealAnalyzerResult<u32> {
    if value.fract() != Decimal::ZERO {
        return Err(DealAnalyzerError::InvalidInput {
            field: field.to_string(),
            reason: format!("{value} is not a whole number"),
        });
    }
    value.to_u32().ok_or_else(|| DealAnalyzerError::InvalidInput {
        field: field.to_string(),
        reason: format!("{value} is out of range for a non-negative count"),
    })
}
