#![cfg(feature = "area")]

use property_calc_core::area::conversion::{
    conversion_table, convert_area, AreaConversionInput, AreaUnit,
};
use rust_decimal_macros::dec;

#[test]
fn test_known_factors() {
    let sqft = convert_area(dec!(1), AreaUnit::Sqyd, AreaUnit::Sqft).unwrap();
    assert_eq!(sqft, dec!(9));

    let sqft_per_acre = convert_area(dec!(1), AreaUnit::Acre, AreaUnit::Sqft).unwrap();
    assert_eq!(sqft_per_acre, dec!(43560));

    let acres = convert_area(dec!(1), AreaUnit::Hectare, AreaUnit::Acre).unwrap();
    assert!((acres - dec!(2.4710538)).abs() < dec!(0.0000001));
}

#[test]
fn test_conversions_are_reversible() {
    for from in AreaUnit::ALL {
        for to in AreaUnit::ALL {
            let there = convert_area(dec!(1234.5), from, to).unwrap();
            let back = convert_area(there, to, from).unwrap();
            assert!(
                (back - dec!(1234.5)).abs() < dec!(0.0000001),
                "{} -> {} -> {} gave {}",
                from,
                to,
                from,
                back
            );
        }
    }
}

#[test]
fn test_bigha_table_warns() {
    let out = conversion_table(&AreaConversionInput {
        value: dec!(1),
        from: AreaUnit::Bigha,
        to: AreaUnit::Sqft,
    })
    .unwrap();
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.result.equivalents.len(), 6);
}

#[test]
fn test_units_deserialize_lowercase() {
    let input: AreaConversionInput =
        serde_json::from_str(r#"{ "value": "10", "from": "sqm", "to": "sqft" }"#).unwrap();
    assert_eq!(input.from, AreaUnit::Sqm);
    assert_eq!(input.to, AreaUnit::Sqft);
}
