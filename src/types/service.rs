//! Service types and the rate table
//!
//! Every account is billed under exactly one service type. The rate table
//! maps each service type to the unit label shown on bills, the price per
//! unit of usage and the fixed service charge added to every bill.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::BillingError;

/// Utility service an account is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Electricity,
    Water,
    Internet,
}

impl ServiceType {
    /// All service types in display order
    pub const ALL: [ServiceType; 3] = [
        ServiceType::Electricity,
        ServiceType::Water,
        ServiceType::Internet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Electricity => "Electricity",
            ServiceType::Water => "Water",
            ServiceType::Internet => "Internet",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse ("Water" is valid, "water" is not)
impl FromStr for ServiceType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| BillingError::unknown_service_type(s))
    }
}

/// Pricing constants for one service type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Display label for the usage unit (e.g. "kWh")
    pub unit: String,

    /// Price per unit of usage
    pub unit_price: Decimal,

    /// Fixed charge applied to every bill
    pub service_charge: Decimal,
}

impl RateEntry {
    pub fn new(unit: &str, unit_price: Decimal, service_charge: Decimal) -> Self {
        RateEntry {
            unit: unit.to_string(),
            unit_price,
            service_charge,
        }
    }
}

/// Rate entries for every service type
///
/// The table is total: each [`ServiceType`] always has an entry, so lookups
/// cannot fail. It is built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(rename = "Electricity")]
    electricity: RateEntry,
    #[serde(rename = "Water")]
    water: RateEntry,
    #[serde(rename = "Internet")]
    internet: RateEntry,
}

impl RateTable {
    pub fn new(electricity: RateEntry, water: RateEntry, internet: RateEntry) -> Self {
        RateTable {
            electricity,
            water,
            internet,
        }
    }

    /// The standard published rates
    ///
    /// - Electricity: 0.15 per kWh, 10.00 service charge
    /// - Water: 1.25 per cu.m, 5.00 service charge
    /// - Internet: 2.00 per GB, 20.00 service charge
    pub fn standard() -> Self {
        RateTable {
            electricity: RateEntry::new("kWh", dec!(0.15), dec!(10.00)),
            water: RateEntry::new("cu.m", dec!(1.25), dec!(5.00)),
            internet: RateEntry::new("GB", dec!(2.00), dec!(20.00)),
        }
    }

    /// Look up the rate entry for a service type
    pub fn get(&self, service_type: ServiceType) -> &RateEntry {
        match service_type {
            ServiceType::Electricity => &self.electricity,
            ServiceType::Water => &self.water,
            ServiceType::Internet => &self.internet,
        }
    }

    /// Reject tables with negative prices or charges
    pub fn validate(&self) -> Result<(), BillingError> {
        for service in ServiceType::ALL {
            let entry = self.get(service);
            if entry.unit_price.is_sign_negative() || entry.service_charge.is_sign_negative() {
                return Err(BillingError::config(format!(
                    "rates for {} must not be negative",
                    service
                )));
            }
        }
        Ok(())
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}
