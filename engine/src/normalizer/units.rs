// Conversions between the catalog's stored unit, kilograms and the display unit.
use crate::config::settings::PrizeSettings;
use shared::models::Unit;
use shared::utils::brazilian_format;

pub fn to_kg(value: f64, unit: Unit) -> f64 {
    value * unit.kg_per_unit()
}

pub fn from_kg(value_kg: f64, unit: Unit) -> f64 {
    value_kg / unit.kg_per_unit()
}

/// Free-text quantity typed in `unit`, as kilograms. Blank or malformed text is 0.
pub fn input_to_kg(text: &str, unit: Unit) -> f64 {
    to_kg(brazilian_format::parse_decimal_or_zero(text), unit)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    kg_per_stored_unit: f64,
}

impl UnitConverter {
    pub fn new(kg_per_stored_unit: f64) -> Self {
        Self { kg_per_stored_unit }
    }

    pub fn from_settings(settings: &PrizeSettings) -> Self {
        Self::new(settings.kg_per_stored_unit)
    }

    pub fn stored_to_kg(&self, stored: f64) -> f64 {
        stored * self.kg_per_stored_unit
    }

    pub fn kg_to_stored(&self, value_kg: f64) -> f64 {
        value_kg / self.kg_per_stored_unit
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_in_tonnes() {
        assert_eq!(input_to_kg("2,5", Unit::Tonne), 2500.0);
        assert_eq!(input_to_kg("2,5", Unit::Kg), 2.5);
        assert_eq!(input_to_kg("", Unit::Tonne), 0.0);
        assert_eq!(input_to_kg("lots", Unit::Kg), 0.0);
    }

    #[test]
    fn test_kg_tonne_round_trip() {
        for kg in [0.0, 0.001, 1.0, 1234.56, 290_742.0, 987_654_321.123] {
            let back = to_kg(from_kg(kg, Unit::Tonne), Unit::Tonne);
            let tolerance = 1e-6 * kg.abs().max(1.0);
            assert!((back - kg).abs() <= tolerance, "{} -> {}", kg, back);
        }
    }

    #[test]
    fn test_stored_unit_conversion() {
        let converter = UnitConverter::default();
        assert!((converter.stored_to_kg(290.742) - 290_742.0).abs() < 1e-6);
        assert_eq!(converter.kg_to_stored(180_000.0), 180.0);
        assert_eq!(UnitConverter::new(1.0).stored_to_kg(5.0), 5.0);
    }
}
