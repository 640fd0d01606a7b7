//! Catalogue diagnostics.
//!
//! Checks a catalogue snapshot for data that scheduling tolerates but that
//! usually indicates an upload or data-entry problem. Detects:
//! - Duplicate asset IDs
//! - Contract assets without a positive duration
//! - Contract assets with an explicit play count of zero
//! - Assets not eligible for any tariff
//! - Tariffs whose contract load exceeds the time budget
//!
//! Diagnostics never block generation. A contract asset without duration,
//! for instance, is still emitted at its play count while consuming no
//! time.

use crate::models::{Asset, Tariff};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two assets share the same ID.
    DuplicateId,
    /// An active contract asset has no positive duration.
    ZeroDurationContract,
    /// A contract asset asks for zero plays per hour.
    ZeroPlayCount,
    /// An active asset is eligible for no tariff.
    NoTariff,
    /// Contract load for a tariff exceeds the time budget.
    OversubscribedTariff,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a catalogue snapshot against a time budget.
///
/// Inactive assets are only checked for duplicate IDs.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalogue(assets: &[Asset], budget_secs: f64) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for asset in assets {
        if !ids.insert(asset.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate asset ID: {}", asset.id),
            ));
        }
    }

    for asset in assets.iter().filter(|a| a.is_active) {
        if asset.is_contract() {
            if asset.duration_secs() <= 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ZeroDurationContract,
                    format!(
                        "Contract asset {} has no duration but is scheduled {} time(s) per hour",
                        asset.id,
                        asset.play_count()
                    ),
                ));
            }
            if asset.plays_per_hour == Some(0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ZeroPlayCount,
                    format!("Contract asset {} asks for 0 plays per hour", asset.id),
                ));
            }
        }

        if asset.tariffs.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoTariff,
                format!("Asset {} is not eligible for any tariff", asset.id),
            ));
        }
    }

    for tariff in Tariff::ALL {
        let load = contract_load_secs(assets, tariff);
        if load > budget_secs {
            errors.push(ValidationError::new(
                ValidationErrorKind::OversubscribedTariff,
                format!(
                    "Tariff '{tariff}' needs {load:.1}s of contract airtime, \
                     budget is {budget_secs:.1}s"
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Seconds of contract airtime a tariff needs per cycle.
///
/// Counts the same assets the selector would pick.
pub fn contract_load_secs(assets: &[Asset], tariff: Tariff) -> f64 {
    assets
        .iter()
        .filter(|a| a.is_contract() && a.is_schedulable() && a.is_eligible_for(tariff))
        .map(Asset::hourly_load_secs)
        .sum()
}
