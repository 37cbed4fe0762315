use std::collections::BTreeMap;

use crate::error::{AbavoError, OperationError, Result};
use crate::geometry::EllipseKind;
use crate::regions::RegionBoundary;

use super::{BoundaryField, EllipseField, RegionsParameters};

/// Prefix shared by every persisted key.
pub const PROPERTY_PREFIX: &str = "EllipseRegionsModel";

const SYMMETRIC_REGIONS: &str = "symmetricRegions";

fn symmetric_key() -> String {
    format!("{PROPERTY_PREFIX} {SYMMETRIC_REGIONS}")
}

fn ellipse_key(kind: EllipseKind, field: EllipseField) -> String {
    format!("{PROPERTY_PREFIX} {} {}", kind.name(), field.key())
}

fn boundary_key(slot: RegionBoundary, field: BoundaryField) -> String {
    format!("{PROPERTY_PREFIX} {} {}", slot.key(), field.key())
}

/// Flattens the parameters into string properties.
pub(crate) fn write_properties(params: &RegionsParameters) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert(symmetric_key(), params.symmetric_regions.to_string());
    for kind in EllipseKind::ALL {
        let ellipse = params.ellipse(kind);
        for field in EllipseField::ALL {
            map.insert(ellipse_key(kind, field), ellipse.get(field).to_string());
        }
    }
    for (slot, ray) in params.boundaries.iter() {
        for field in BoundaryField::ALL {
            map.insert(boundary_key(slot, field), field.get(ray).to_string());
        }
    }
    map
}

/// Rebuilds parameters from string properties.
///
/// Missing numeric keys load as NaN and a missing symmetry flag loads as
/// `false`.
pub(crate) fn read_properties(map: &BTreeMap<String, String>) -> Result<RegionsParameters> {
    let mut params = RegionsParameters::default();

    let key = symmetric_key();
    params.symmetric_regions = match map.get(&key) {
        None => false,
        Some(value) => parse_flag(&key, value)?,
    };
    for kind in EllipseKind::ALL {
        for field in EllipseField::ALL {
            let value = read_number(map, &ellipse_key(kind, field))?;
            params.ellipse_mut(kind).set(field, value);
        }
    }
    for slot in RegionBoundary::ALL {
        for field in BoundaryField::ALL {
            let value = read_number(map, &boundary_key(slot, field))?;
            field.set(&mut params.boundaries[slot], value);
        }
    }
    Ok(params)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn read_number(map: &BTreeMap<String, String>, key: &str) -> Result<f64> {
    match map.get(key) {
        None => Ok(f64::NAN),
        Some(value) => value.trim().parse().map_err(|_| invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> AbavoError {
    OperationError::InvalidProperty {
        key: key.to_owned(),
        value: value.to_owned(),
    }
    .into()
}
