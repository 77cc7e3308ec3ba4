use wsa_curve::Curve;

pub const TITLE: &str = "WATER SUPPLY ANALYSIS";
pub const FLOW_LABEL: &str = "Flow (gpm)";
pub const PRESSURE_LABEL: &str = "Pressure (psi)";

/// Presentation settings for a supply chart.
///
/// The defaults reproduce the standard sheet: 800x600, flow ticks every
/// 200 gpm (minor every 10), pressure ticks every 10 psi (minor every 1),
/// 5% flow headroom past the last primary point and 30% pressure headroom
/// above the static reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub flow_major: f64,
    pub flow_minor: f64,
    pub pressure_major: f64,
    pub pressure_minor: f64,
    pub flow_headroom: f64,
    pub pressure_headroom: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: 800,
            height: 600,
            flow_major: 200.0,
            flow_minor: 10.0,
            pressure_major: 10.0,
            pressure_minor: 1.0,
            flow_headroom: 1.05,
            pressure_headroom: 1.3,
        }
    }
}

impl ChartLayout {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_flow_ticks(mut self, major: f64, minor: f64) -> Self {
        self.flow_major = major;
        self.flow_minor = minor;
        self
    }

    /// Upper flow limit: the last primary flow plus headroom, truncated.
    pub fn flow_limit(&self, primary: &Curve) -> f64 {
        let last = primary.last().map(|p| p.flow).unwrap_or(0.0);
        (last * self.flow_headroom).trunc().max(1.0)
    }

    /// Upper pressure limit: the static pressure plus headroom, truncated.
    pub fn pressure_limit(&self, primary: &Curve) -> f64 {
        let first = primary.first().map(|p| p.pressure).unwrap_or(0.0);
        (first * self.pressure_headroom).trunc().max(1.0)
    }
}
