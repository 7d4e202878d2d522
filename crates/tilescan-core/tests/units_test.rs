use tilescan_core::{convert_point_to_microns, CoreError, Point2D, Units};

#[test]
fn test_units_serialize_as_tags() {
    let json = serde_json::to_string(&Units::Micrometres).unwrap();
    assert_eq!(json, "\"um\"");

    let parsed: Units = serde_json::from_str("\"Millimetres\"").unwrap();
    assert_eq!(parsed, Units::Millimetres);

    assert!(serde_json::from_str::<Units>("\"furlong\"").is_err());
}

#[test]
fn test_point_conversion_through_every_length_unit() {
    let point = Point2D::new(2.0, -0.5);
    for unit in [
        Units::Metres,
        Units::Centimetres,
        Units::Millimetres,
        Units::Micrometres,
        Units::Nanometres,
        Units::Inches,
    ] {
        let factor = unit.to_microns_factor().unwrap();
        let converted = convert_point_to_microns(point, unit).unwrap();
        assert_eq!(converted, Point2D::new(2.0 * factor, -0.5 * factor));
    }
}

#[test]
fn test_angular_units_rejected() {
    for unit in [Units::Degrees, Units::Radians, Units::Native] {
        assert_eq!(
            convert_point_to_microns(Point2D::new(1.0, 1.0), unit),
            Err(CoreError::UnsupportedUnit { unit })
        );
    }
}
