//! # Field Patches
//!
//! The whitelist of correctable fields and the read/apply logic for each.
//! Keeping both sides here means the audit subsystem and the store can never
//! disagree on which fields are patchable or how a value parses.

use serde_json::Value;
use shared_types::{
    Amount, CorrectionTarget, Order, PaymentStatus, RistourneRecord, RoyaltySale,
    SettlementStatus, Work,
};

use crate::errors::StoreError;

/// Correctable fields per entity kind, by serde name.
pub fn correctable_fields(target: &CorrectionTarget) -> &'static [&'static str] {
    match target {
        CorrectionTarget::Order(_) => &["payment"],
        CorrectionTarget::Work(_) => &["price", "min_stock"],
        CorrectionTarget::Royalty(_) => &["amount", "status"],
        CorrectionTarget::Ristourne(_) => &["amount", "status"],
    }
}

/// Whether `field` may be corrected on `target`.
pub fn is_correctable(target: &CorrectionTarget, field: &str) -> bool {
    correctable_fields(target).contains(&field)
}

fn parse<T: serde::de::DeserializeOwned>(field: &str, value: &Value) -> Result<T, StoreError> {
    serde_json::from_value(value.clone()).map_err(|e| StoreError::InvalidValue {
        field: field.to_string(),
        detail: e.to_string(),
    })
}

fn unsupported(entity: &'static str, field: &str) -> StoreError {
    StoreError::UnsupportedField {
        entity,
        field: field.to_string(),
    }
}

/// Reads the current value of a correctable order field.
pub fn read_order_field(order: &Order, field: &str) -> Result<Value, StoreError> {
    match field {
        "payment" => Ok(serde_json::to_value(order.payment).unwrap_or(Value::Null)),
        _ => Err(unsupported("order", field)),
    }
}

/// Applies a correction to an order field.
pub fn patch_order_field(order: &mut Order, field: &str, value: &Value) -> Result<(), StoreError> {
    match field {
        "payment" => {
            order.payment = parse::<PaymentStatus>(field, value)?;
            Ok(())
        }
        _ => Err(unsupported("order", field)),
    }
}

/// Reads the current value of a correctable work field.
pub fn read_work_field(work: &Work, field: &str) -> Result<Value, StoreError> {
    match field {
        "price" => Ok(Value::from(work.price)),
        "min_stock" => Ok(Value::from(work.min_stock)),
        _ => Err(unsupported("work", field)),
    }
}

/// Applies a correction to a work field.
pub fn patch_work_field(work: &mut Work, field: &str, value: &Value) -> Result<(), StoreError> {
    match field {
        "price" => {
            work.price = parse::<Amount>(field, value)?;
            Ok(())
        }
        "min_stock" => {
            work.min_stock = parse::<u32>(field, value)?;
            Ok(())
        }
        _ => Err(unsupported("work", field)),
    }
}

/// Reads the current value of a correctable royalty field.
pub fn read_royalty_field(sale: &RoyaltySale, field: &str) -> Result<Value, StoreError> {
    match field {
        "amount" => Ok(Value::from(sale.amount)),
        "status" => Ok(serde_json::to_value(sale.status).unwrap_or(Value::Null)),
        _ => Err(unsupported("royalty", field)),
    }
}

/// Applies a correction to a royalty field.
pub fn patch_royalty_field(
    sale: &mut RoyaltySale,
    field: &str,
    value: &Value,
) -> Result<(), StoreError> {
    match field {
        "amount" => {
            sale.amount = parse::<Amount>(field, value)?;
            Ok(())
        }
        "status" => {
            sale.status = parse::<SettlementStatus>(field, value)?;
            Ok(())
        }
        _ => Err(unsupported("royalty", field)),
    }
}

/// Reads the current value of a correctable ristourne field.
pub fn read_ristourne_field(record: &RistourneRecord, field: &str) -> Result<Value, StoreError> {
    match field {
        "amount" => Ok(Value::from(record.amount)),
        "status" => Ok(serde_json::to_value(record.status).unwrap_or(Value::Null)),
        _ => Err(unsupported("ristourne", field)),
    }
}

/// Applies a correction to a ristourne field.
pub fn patch_ristourne_field(
    record: &mut RistourneRecord,
    field: &str,
    value: &Value,
) -> Result<(), StoreError> {
    match field {
        "amount" => {
            record.amount = parse::<Amount>(field, value)?;
            Ok(())
        }
        "status" => {
            record.status = parse::<SettlementStatus>(field, value)?;
            Ok(())
        }
        _ => Err(unsupported("ristourne", field)),
    }
}
