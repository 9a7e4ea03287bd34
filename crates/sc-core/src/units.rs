// sc-core/src/units.rs

use uom::fmt::DisplayStyle::Abbreviation;
use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomTemperature};
use uom::si::pressure::megapascal;
use uom::si::thermodynamic_temperature::degree_celsius;

// Strength is a stress, which uom models as pressure
pub type Strength = UomPressure;
pub type Temperature = UomTemperature;

#[inline]
pub fn mpa(v: f64) -> Strength {
    Strength::new::<megapascal>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    Temperature::new::<degree_celsius>(v)
}

/// Display a chart point as e.g. `460 °C: 260.5 MPa`.
pub fn format_point(temperature: Temperature, strength: Strength) -> String {
    format!(
        "{:.0}: {:.1}",
        temperature.into_format_args(degree_celsius, Abbreviation),
        strength.into_format_args(megapascal, Abbreviation)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_use_si_base_units() {
        use uom::si::pressure::pascal;
        use uom::si::thermodynamic_temperature::kelvin;
        assert!((mpa(415.0).get::<pascal>() - 415.0e6).abs() < 1e-3);
        assert!((degc(20.0).get::<kelvin>() - 293.15).abs() < 1e-9);
    }

    #[test]
    fn point_label_has_units() {
        assert_eq!(format_point(degc(460.0), mpa(260.5)), "460 °C: 260.5 MPa");
    }
}
