//! Lumped solar collector panel.
//!
//! The panel is one thermal mass heated by a constant solar input and cooled
//! by two Newtonian paths:
//! - to the surrounding air at a fixed ambient temperature
//! - to the water passing through it
//!
//! Temperature advances by one explicit-Euler step per call to [`Panel::advance`].

use crate::error::SimResult;
use sl_core::constants::{AMBIENT_AIR_K, WATER_CP_J_PER_G_K, WATER_DENSITY_G_PER_L};
use sl_core::ensure_positive;
use sl_core::units::{Temperature, k};

/// Construction parameters for a [`Panel`].
///
/// The defaults describe a 1 m² panel receiving 800 W of sunlight on a 300 K
/// day, of which roughly 300 W ends up heating the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelParams {
    /// Initial panel temperature (K)
    pub temp_k: f64,
    /// Solar heat absorbed by the panel (W)
    pub solar_input_w: f64,
    /// Panel mass times specific heat (J/K)
    pub heat_capacity_j_per_k: f64,
    /// Water held in contact with the panel while the pump runs (L)
    pub contact_volume_l: f64,
    /// Heat transfer coefficient to air (W/K)
    pub air_coeff_w_per_k: f64,
    /// Heat transfer coefficient to water (W/K)
    pub water_coeff_w_per_k: f64,
    /// Outlet water temperature before the first step (K)
    pub water_out_temp_k: f64,
    /// Inlet water temperature before the first step (K)
    pub water_in_temp_k: f64,
}

impl Default for PanelParams {
    fn default() -> Self {
        Self {
            temp_k: 320.0,
            solar_input_w: 300.0,
            heat_capacity_j_per_k: 10_000.0,
            contact_volume_l: 0.5,
            air_coeff_w_per_k: 15.0,
            water_coeff_w_per_k: 50.0,
            water_out_temp_k: 296.0,
            water_in_temp_k: 295.0,
        }
    }
}

/// Thermal state of the collector panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    /// Panel temperature (K)
    pub temp_k: f64,
    /// Solar heat absorbed (W)
    pub solar_input_w: f64,
    /// Panel heat capacity (J/K)
    pub heat_capacity_j_per_k: f64,
    /// Heat lost to air on the last evaluation (W)
    pub heat_to_air_w: f64,
    /// Heat carried away by water on the last evaluation (W)
    pub heat_to_water_w: f64,
    /// Water volume in contact with the panel (L)
    pub contact_volume_l: f64,
    /// Air cooling coefficient (W/K)
    pub air_coeff_w_per_k: f64,
    /// Water cooling coefficient (W/K)
    pub water_coeff_w_per_k: f64,
    /// Most recent outlet water temperature (K)
    pub water_out_temp_k: f64,
    /// Most recent inlet water temperature (K)
    pub water_in_temp_k: f64,
}

impl Panel {
    /// Create a panel from parameters.
    ///
    /// Heat capacity and contact volume must be strictly positive; both appear
    /// as divisors in the step equations.
    pub fn new(params: PanelParams) -> SimResult<Self> {
        ensure_positive(params.heat_capacity_j_per_k, "panel heat capacity")?;
        ensure_positive(params.contact_volume_l, "panel contact volume")?;
        Ok(Self::from_params(params))
    }

    fn from_params(params: PanelParams) -> Self {
        let PanelParams {
            temp_k,
            solar_input_w,
            heat_capacity_j_per_k,
            contact_volume_l,
            air_coeff_w_per_k,
            water_coeff_w_per_k,
            water_out_temp_k,
            water_in_temp_k,
        } = params;

        Self {
            temp_k,
            solar_input_w,
            heat_capacity_j_per_k,
            // Pump is off until the first step.
            heat_to_air_w: air_coeff_w_per_k * (temp_k - AMBIENT_AIR_K),
            heat_to_water_w: 0.0,
            contact_volume_l,
            air_coeff_w_per_k,
            water_coeff_w_per_k,
            water_out_temp_k,
            water_in_temp_k,
        }
    }

    /// Recompute and store heat lost to air (W).
    pub fn compute_air_loss(&mut self) -> f64 {
        self.heat_to_air_w = self.air_coeff_w_per_k * (self.temp_k - AMBIENT_AIR_K);
        self.heat_to_air_w
    }

    /// Recompute heat carried by the water and the resulting outlet temperature (K).
    ///
    /// Water spends `contact_volume / flow_rate` seconds against the panel. That
    /// interval is assumed short enough that the panel-to-water temperature
    /// difference, and with it the heating power, stays constant.
    ///
    /// A zero `flow_rate_lps` is not rejected here: the transit time becomes
    /// infinite and the outlet temperature non-finite. [`crate::SolarLoop`]
    /// refuses such a flow rate at construction.
    pub fn compute_water_outlet_temp(&mut self, inlet_k: f64, flow_rate_lps: f64) -> f64 {
        self.heat_to_water_w = self.water_coeff_w_per_k * (self.temp_k - inlet_k);

        let water_heat_capacity_j_per_k =
            self.contact_volume_l * WATER_DENSITY_G_PER_L * WATER_CP_J_PER_G_K;
        // Heating rate (K/s) times transit time (contact volume / flow rate).
        let rise_k = self.heat_to_water_w / water_heat_capacity_j_per_k * self.contact_volume_l
            / flow_rate_lps;

        self.water_in_temp_k = inlet_k;
        self.water_out_temp_k = inlet_k + rise_k;
        self.water_out_temp_k
    }

    /// Advance panel temperature by `dt_s` with water entering at `inlet_k`.
    ///
    /// Both heat flows are evaluated at the current temperature before it is
    /// updated.
    pub fn advance(&mut self, dt_s: f64, inlet_k: f64, flow_rate_lps: f64) {
        self.compute_air_loss();
        self.compute_water_outlet_temp(inlet_k, flow_rate_lps);
        self.temp_k += dt_s * self.net_heat_w() / self.heat_capacity_j_per_k;

        if !self.temp_k.is_finite() {
            tracing::warn!(temp_k = self.temp_k, flow_rate_lps, "panel temperature is not finite");
        }
    }

    /// Solar input minus both losses from the last evaluation (W).
    pub fn net_heat_w(&self) -> f64 {
        self.solar_input_w - self.heat_to_air_w - self.heat_to_water_w
    }

    pub fn temperature(&self) -> Temperature {
        k(self.temp_k)
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::from_params(PanelParams::default())
    }
}
