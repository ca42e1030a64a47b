use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::PropertyCalcError;
use crate::types::*;
use crate::PropertyCalcResult;

/// Land and floor-area units in common use for Indian property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Sqm,
    Sqft,
    Sqyd,
    Acre,
    Hectare,
    Cent,
    /// Regional unit; the factor used is the common 1,337.8 sq m figure
    Bigha,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 7] = [
        AreaUnit::Sqm,
        AreaUnit::Sqft,
        AreaUnit::Sqyd,
        AreaUnit::Acre,
        AreaUnit::Hectare,
        AreaUnit::Cent,
        AreaUnit::Bigha,
    ];

    /// Square metres in one unit
    pub fn sqm_factor(self) -> Decimal {
        match self {
            AreaUnit::Sqm => Decimal::ONE,
            AreaUnit::Sqft => dec!(0.09290304),
            AreaUnit::Sqyd => dec!(0.83612736),
            AreaUnit::Acre => dec!(4046.8564224),
            AreaUnit::Hectare => dec!(10000),
            AreaUnit::Cent => dec!(40.468564224),
            AreaUnit::Bigha => dec!(1337.805170082),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AreaUnit::Sqm => "sqm",
            AreaUnit::Sqft => "sqft",
            AreaUnit::Sqyd => "sqyd",
            AreaUnit::Acre => "acre",
            AreaUnit::Hectare => "hectare",
            AreaUnit::Cent => "cent",
            AreaUnit::Bigha => "bigha",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaUnit {
    type Err = PropertyCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AreaUnit::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PropertyCalcError::invalid("unit", format!("Unknown area unit '{s}'")))
    }
}

/// Convert an area between units via square metres.
pub fn convert_area(value: Decimal, from: AreaUnit, to: AreaUnit) -> PropertyCalcResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(PropertyCalcError::invalid("value", "Area cannot be negative"));
    }
    if from == to {
        return Ok(value);
    }
    value
        .checked_mul(from.sqm_factor())
        .and_then(|sqm| sqm.checked_div(to.sqm_factor()))
        .ok_or_else(|| PropertyCalcError::invalid("value", "Area exceeds decimal range"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaConversionInput {
    pub value: Decimal,
    pub from: AreaUnit,
    pub to: AreaUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaEquivalent {
    pub unit: AreaUnit,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaConversionOutput {
    pub value: Decimal,
    pub from: AreaUnit,
    pub to: AreaUnit,
    pub converted: Decimal,
    /// The same area in every other unit
    pub equivalents: Vec<AreaEquivalent>,
}

/// Convert, and list the value in every other unit alongside.
pub fn conversion_table(
    input: &AreaConversionInput,
) -> PropertyCalcResult<ComputationOutput<AreaConversionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let converted = convert_area(input.value, input.from, input.to)?;
    let equivalents = AreaUnit::ALL
        .into_iter()
        .filter(|u| *u != input.from)
        .map(|unit| {
            Ok(AreaEquivalent {
                unit,
                value: convert_area(input.value, input.from, unit)?,
            })
        })
        .collect::<PropertyCalcResult<Vec<_>>>()?;

    if input.from == AreaUnit::Bigha || input.to == AreaUnit::Bigha {
        warnings.push("Bigha varies by state; 1 bigha taken as 1,337.805 sq m".into());
    }

    let output = AreaConversionOutput {
        value: input.value,
        from: input.from,
        to: input.to,
        converted,
        equivalents,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Unit conversion via square metres",
        &serde_json::json!({
            "from_sqm_factor": input.from.sqm_factor().to_string(),
            "to_sqm_factor": input.to.sqm_factor().to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sqm_to_sqft() {
        let v = convert_area(dec!(1), AreaUnit::Sqm, AreaUnit::Sqft).unwrap();
        assert!((v - dec!(10.76391)).abs() < dec!(0.00001));
    }

    #[test]
    fn test_acre_is_hundred_cents() {
        let v = convert_area(dec!(1), AreaUnit::Acre, AreaUnit::Cent).unwrap();
        assert_eq!(v, dec!(100));
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(
            convert_area(dec!(42.5), AreaUnit::Bigha, AreaUnit::Bigha).unwrap(),
            dec!(42.5)
        );
    }

    #[test]
    fn test_negative_area_rejected() {
        assert!(convert_area(dec!(-1), AreaUnit::Sqm, AreaUnit::Sqft).is_err());
    }

    #[test]
    fn test_area_beyond_decimal_range_rejected() {
        let large = Decimal::from_scientific("1e26").unwrap();
        let err = convert_area(large, AreaUnit::Hectare, AreaUnit::Sqft).unwrap_err();
        match err {
            PropertyCalcError::InvalidParameter { field, .. } => assert_eq!(field, "value"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("SQFT".parse::<AreaUnit>().unwrap(), AreaUnit::Sqft);
        assert_eq!(" hectare ".parse::<AreaUnit>().unwrap(), AreaUnit::Hectare);
        assert!("furlong".parse::<AreaUnit>().is_err());
    }

    #[test]
    fn test_conversion_table_lists_other_units() {
        let out = conversion_table(&AreaConversionInput {
            value: dec!(2),
            from: AreaUnit::Hectare,
            to: AreaUnit::Sqm,
        })
        .unwrap();
        assert_eq!(out.result.converted, dec!(20000));
        assert_eq!(out.result.equivalents.len(), 6);
        assert!(out.result.equivalents.iter().all(|e| e.unit != AreaUnit::Hectare));
        assert!(out.warnings.is_empty());
    }
}
