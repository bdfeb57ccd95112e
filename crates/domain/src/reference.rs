// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference records: customers, vehicles, workers and the service catalog.

use crate::error::DomainError;
use crate::validation::{
    clean_text, normalize_plate, require_text, validate_email, validate_money, validate_name,
    validate_phone,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Maximum worker tax id length (formatted CPF).
const MAX_TAX_ID_LENGTH: usize = 14;

/// Vehicle body kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    #[default]
    Car,
    Motorcycle,
    Truck,
    Bus,
    Van,
    Pickup,
    Other,
}

impl VehicleKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Truck => "truck",
            Self::Bus => "bus",
            Self::Van => "van",
            Self::Pickup => "pickup",
            Self::Other => "other",
        }
    }
}

impl FromStr for VehicleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "motorcycle" => Ok(Self::Motorcycle),
            "truck" => Ok(Self::Truck),
            "bus" => Ok(Self::Bus),
            "van" => Ok(Self::Van),
            "pickup" => Ok(Self::Pickup),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidVehicleKind(s.to_string())),
        }
    }
}

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
}

/// Validated customer fields, used for both creation and full updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl CustomerFields {
    /// Validates and normalizes raw customer input.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, phone or email is invalid.
    pub fn new(
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: validate_name(name)?,
            phone: validate_phone(phone)?,
            email: validate_email(email)?,
            notes: clean_text(notes),
        })
    }
}

/// A vehicle, owned by a customer and identified by its plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub vehicle_id: i64,
    pub customer_id: i64,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub year: Option<u16>,
    pub color: Option<String>,
    pub kind: VehicleKind,
    pub notes: Option<String>,
    pub active: bool,
}

/// Validated vehicle fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleFields {
    pub customer_id: i64,
    pub plate: String,
    pub model: String,
    pub make: String,
    pub year: Option<u16>,
    pub color: Option<String>,
    pub kind: VehicleKind,
    pub notes: Option<String>,
}

impl VehicleFields {
    /// Validates and normalizes raw vehicle input.
    ///
    /// # Errors
    ///
    /// Returns an error if the plate is malformed, model or make is blank,
    /// or the year is implausible.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_id: i64,
        plate: &str,
        model: &str,
        make: &str,
        year: Option<u16>,
        color: Option<&str>,
        kind: VehicleKind,
        notes: Option<&str>,
    ) -> Result<Self, DomainError> {
        if let Some(year) = year
            && !(1900..=2100).contains(&year)
        {
            return Err(DomainError::InvalidYear(year));
        }
        Ok(Self {
            customer_id,
            plate: normalize_plate(plate)?,
            model: require_text("model", model)?,
            make: require_text("make", make)?,
            year,
            color: clean_text(color),
            kind,
            notes: clean_text(notes),
        })
    }
}

/// A wash attendant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub worker_id: i64,
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub hire_date: Date,
    pub salary: Option<Decimal>,
    pub notes: Option<String>,
    pub active: bool,
}

/// Validated worker fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFields {
    pub name: String,
    pub tax_id: String,
    pub phone: Option<String>,
    pub hire_date: Date,
    pub salary: Option<Decimal>,
    pub notes: Option<String>,
}

impl WorkerFields {
    /// Validates and normalizes raw worker input.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, tax id, phone or salary is invalid.
    pub fn new(
        name: &str,
        tax_id: &str,
        phone: Option<&str>,
        hire_date: Date,
        salary: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<Self, DomainError> {
        let tax_id: String = require_text("tax_id", tax_id)?;
        if tax_id.len() > MAX_TAX_ID_LENGTH
            || !tax_id
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '/'))
        {
            return Err(DomainError::InvalidTaxId(tax_id));
        }
        Ok(Self {
            name: validate_name(name)?,
            tax_id,
            phone: validate_phone(phone)?,
            hire_date,
            salary: salary.map(|s| validate_money("salary", s)).transpose()?,
            notes: clean_text(notes),
        })
    }
}

/// A service base (site).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base {
    pub base_id: i64,
    pub name: String,
}

/// A wash type with its base price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WashType {
    pub wash_type_id: i64,
    pub name: String,
    pub base_price: Decimal,
}

/// A way of bringing equipment to the vehicle, scaling the price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentType {
    pub equipment_type_id: i64,
    pub name: String,
    pub price_multiplier: Decimal,
}

impl EquipmentType {
    /// The multiplier applied when none is specified.
    pub const DEFAULT_MULTIPLIER: Decimal = Decimal::ONE;
}

/// A material consumed by a wash type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub material_id: i64,
    pub wash_type_id: i64,
    pub name: String,
    pub cost: Decimal,
}

/// Display information for a referenced record.
///
/// Returned by directory lookups so callers can check activity without
/// loading the whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: i64,
    pub display_name: String,
    pub active: bool,
}

impl DirectoryEntry {
    /// Ensures the referenced record is active.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InactiveReference` if it is not.
    pub const fn require_active(&self, entity: &'static str) -> Result<(), DomainError> {
        if self.active {
            Ok(())
        } else {
            Err(DomainError::InactiveReference {
                entity,
                id: self.id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_customer_fields_are_cleaned() {
        let fields = CustomerFields::new("  Ana Souza ", Some(""), Some("ana@example.com"), None);
        assert_eq!(
            fields,
            Ok(CustomerFields {
                name: String::from("Ana Souza"),
                phone: None,
                email: Some(String::from("ana@example.com")),
                notes: None,
            })
        );
        assert!(CustomerFields::new("", None, None, None).is_err());
    }

    #[test]
    fn test_vehicle_plate_normalized() {
        let fields = VehicleFields::new(
            1,
            "abc1d23",
            "Civic",
            "Honda",
            Some(2020),
            None,
            VehicleKind::Car,
            None,
        );
        assert_eq!(fields.map(|f| f.plate), Ok(String::from("ABC1D23")));
    }

    #[test]
    fn test_vehicle_year_bounds() {
        let fields = VehicleFields::new(
            1,
            "ABC1234",
            "Civic",
            "Honda",
            Some(1200),
            None,
            VehicleKind::Car,
            None,
        );
        assert!(fields.is_err());
    }

    #[test]
    fn test_worker_tax_id_format() {
        assert!(
            WorkerFields::new("Joao", "123.456.789-00", None, date!(2024 - 01 - 10), None, None)
                .is_ok()
        );
        assert!(
            WorkerFields::new("Joao", "abc", None, date!(2024 - 01 - 10), None, None).is_err()
        );
    }

    #[test]
    fn test_vehicle_kind_parse() {
        assert_eq!("PICKUP".parse::<VehicleKind>(), Ok(VehicleKind::Pickup));
        assert!("boat".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn test_inactive_reference_rejected() {
        let entry = DirectoryEntry {
            id: 7,
            display_name: String::from("Ana"),
            active: false,
        };
        assert_eq!(
            entry.require_active("customer"),
            Err(DomainError::InactiveReference {
                entity: "customer",
                id: 7
            })
        );
    }
}
