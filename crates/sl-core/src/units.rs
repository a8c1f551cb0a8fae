// sl-core/src/units.rs

use uom::si::f64::{
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Volume as UomVolume, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

#[inline]
pub fn lps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_second;
    VolumeRate::new::<liter_per_second>(v)
}

pub mod constants {
    /// Air temperature around the panel.
    pub const AMBIENT_AIR_K: f64 = 300.0;

    /// Density of water, grams per liter.
    pub const WATER_DENSITY_G_PER_L: f64 = 1000.0;

    /// Specific heat of water, J/(g·K).
    pub const WATER_CP_J_PER_G_K: f64 = 4.186;

    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}
