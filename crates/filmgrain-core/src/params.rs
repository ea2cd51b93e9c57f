use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FilmGrainError, Result};

/// Source classifications understood by the service.
pub const SRC_TYPES: [u8; 2] = [1, 2];

/// Grain pattern variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GrainType {
    #[default]
    Fine = 1,
    FineSimple = 2,
    Coarse = 3,
    Coarser = 4,
}

impl GrainType {
    pub const ALL: [GrainType; 4] = [
        GrainType::Fine,
        GrainType::FineSimple,
        GrainType::Coarse,
        GrainType::Coarser,
    ];
}

impl fmt::Display for GrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fine => write!(f, "Fine"),
            Self::FineSimple => write!(f, "Fine (simple)"),
            Self::Coarse => write!(f, "Coarse"),
            Self::Coarser => write!(f, "Coarser"),
        }
    }
}

impl TryFrom<u8> for GrainType {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Fine),
            2 => Ok(Self::FineSimple),
            3 => Ok(Self::Coarse),
            4 => Ok(Self::Coarser),
            other => Err(format!("unknown grain type {other}")),
        }
    }
}

impl From<GrainType> for u8 {
    fn from(value: GrainType) -> Self {
        value as u8
    }
}

/// Snapshot of every tunable sent alongside the source image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainParameters {
    pub scale: f64,
    pub src_type: u8,
    pub grain_power: f64,
    pub shadows: f64,
    pub highs: f64,
    pub grain_type: GrainType,
    pub grain_sat: f64,
    /// No UI control; only settable from config or the CLI.
    pub sharpen: f64,
    pub gray: bool,
}

impl Default for GrainParameters {
    fn default() -> Self {
        Self {
            scale: 1.0,
            src_type: 1,
            grain_power: 0.75,
            shadows: 0.1,
            highs: 0.1,
            grain_type: GrainType::Fine,
            grain_sat: 0.6,
            sharpen: 0.0,
            gray: false,
        }
    }
}

impl GrainParameters {
    /// Current value of a numeric field as a float.
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Scale => self.scale,
            NumericField::SrcType => f64::from(self.src_type),
            NumericField::GrainPower => self.grain_power,
            NumericField::Shadows => self.shadows,
            NumericField::Highs => self.highs,
            NumericField::GrainType => f64::from(u8::from(self.grain_type)),
            NumericField::GrainSat => self.grain_sat,
            NumericField::Sharpen => self.sharpen,
        }
    }

    pub fn boolean(&self, field: BooleanField) -> bool {
        match field {
            BooleanField::Gray => self.gray,
        }
    }

    /// Reject snapshots that would put NaN or infinity on the wire.
    pub fn validate(&self) -> Result<()> {
        for field in NumericField::ALL {
            let value = self.numeric(field);
            if !value.is_finite() {
                return Err(FilmGrainError::InvalidParameter(format!(
                    "{} = {value}",
                    field.name()
                )));
            }
        }
        if !SRC_TYPES.contains(&self.src_type) {
            return Err(FilmGrainError::InvalidParameter(format!(
                "src_type = {}",
                self.src_type
            )));
        }
        Ok(())
    }

    /// Text form fields in wire order. Floats use the shortest decimal that
    /// round-trips (`1`, `0.75`), booleans `true`/`false`.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = NumericField::ALL
            .iter()
            .map(|&field| (field.name(), field.format(self)))
            .collect();
        fields.push((BooleanField::Gray.name(), self.gray.to_string()));
        fields
    }
}

/// Numeric fields addressable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericField {
    Scale,
    SrcType,
    GrainPower,
    Shadows,
    Highs,
    GrainType,
    GrainSat,
    Sharpen,
}

impl NumericField {
    pub const ALL: [NumericField; 8] = [
        NumericField::Scale,
        NumericField::SrcType,
        NumericField::GrainPower,
        NumericField::Shadows,
        NumericField::Highs,
        NumericField::GrainType,
        NumericField::GrainSat,
        NumericField::Sharpen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::SrcType => "src_type",
            Self::GrainPower => "grain_power",
            Self::Shadows => "shadows",
            Self::Highs => "highs",
            Self::GrainType => "grain_type",
            Self::GrainSat => "grain_sat",
            Self::Sharpen => "sharpen",
        }
    }

    fn format(self, params: &GrainParameters) -> String {
        match self {
            Self::SrcType => params.src_type.to_string(),
            Self::GrainType => u8::from(params.grain_type).to_string(),
            other => params.numeric(other).to_string(),
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown numeric field '{s}'"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BooleanField {
    Gray,
}

impl BooleanField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Gray => "gray",
        }
    }
}

impl FromStr for BooleanField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gray" => Ok(Self::Gray),
            other => Err(format!("unknown boolean field '{other}'")),
        }
    }
}

/// Holds the latest parameter snapshot and applies validated updates.
///
/// Invalid input never reaches the snapshot: a rejected update leaves the
/// previous value in place. Range limits belong to the UI controls and are
/// not enforced here.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    current: GrainParameters,
}

impl ParameterStore {
    pub fn new(params: GrainParameters) -> Self {
        Self { current: params }
    }

    pub fn get(&self) -> &GrainParameters {
        &self.current
    }

    pub fn snapshot(&self) -> GrainParameters {
        self.current
    }

    /// Replace the whole snapshot, e.g. after importing a config.
    pub fn replace(&mut self, params: GrainParameters) {
        self.current = params;
    }

    pub fn reset(&mut self) {
        self.current = GrainParameters::default();
    }

    /// Parse `raw` as a float and store it. Returns `false` and keeps the
    /// previous value when the text is not a finite number.
    pub fn set_numeric(&mut self, field: NumericField, raw: &str) -> bool {
        match raw.trim().parse::<f64>() {
            Ok(value) => self.set_value(field, value),
            Err(_) => {
                warn!(field = field.name(), raw, "ignoring non-numeric input");
                false
            }
        }
    }

    /// Store an already-numeric value. Integer fields only accept members of
    /// their value set.
    pub fn set_value(&mut self, field: NumericField, value: f64) -> bool {
        if !value.is_finite() {
            warn!(field = field.name(), value, "ignoring non-finite input");
            return false;
        }

        let params = &mut self.current;
        match field {
            NumericField::Scale => params.scale = value,
            NumericField::GrainPower => params.grain_power = value,
            NumericField::Shadows => params.shadows = value,
            NumericField::Highs => params.highs = value,
            NumericField::GrainSat => params.grain_sat = value,
            NumericField::Sharpen => params.sharpen = value,
            NumericField::SrcType => match small_integer(value) {
                Some(v) if SRC_TYPES.contains(&v) => params.src_type = v,
                _ => {
                    warn!(field = field.name(), value, "ignoring unknown source type");
                    return false;
                }
            },
            NumericField::GrainType => {
                match small_integer(value).and_then(|v| GrainType::try_from(v).ok()) {
                    Some(grain_type) => params.grain_type = grain_type,
                    None => {
                        warn!(field = field.name(), value, "ignoring unknown grain type");
                        return false;
                    }
                }
            }
        }
        debug!(field = field.name(), value, "parameter updated");
        true
    }

    pub fn set_boolean(&mut self, field: BooleanField, value: bool) {
        match field {
            BooleanField::Gray => self.current.gray = value,
        }
        debug!(field = field.name(), value, "parameter updated");
    }
}

fn small_integer(value: f64) -> Option<u8> {
    if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_fields_wire_text() {
        let fields = GrainParameters::default().form_fields();
        let expected = [
            ("scale", "1"),
            ("src_type", "1"),
            ("grain_power", "0.75"),
            ("shadows", "0.1"),
            ("highs", "0.1"),
            ("grain_type", "1"),
            ("grain_sat", "0.6"),
            ("sharpen", "0"),
            ("gray", "false"),
        ];
        assert_eq!(fields.len(), expected.len());
        for ((name, value), (exp_name, exp_value)) in fields.iter().zip(expected) {
            assert_eq!(*name, exp_name);
            assert_eq!(value, exp_value, "field {name}");
        }
    }

    #[test]
    fn test_numeric_field_from_str() {
        for field in NumericField::ALL {
            assert_eq!(field.name().parse::<NumericField>().unwrap(), field);
        }
        assert!("gray".parse::<NumericField>().is_err());
        assert_eq!("gray".parse::<BooleanField>().unwrap(), BooleanField::Gray);
    }

    #[test]
    fn test_small_integer() {
        assert_eq!(small_integer(3.0), Some(3));
        assert_eq!(small_integer(2.5), None);
        assert_eq!(small_integer(-1.0), None);
        assert_eq!(small_integer(300.0), None);
    }

    #[test]
    fn test_grain_type_u8_conversion() {
        for grain_type in GrainType::ALL {
            assert_eq!(GrainType::try_from(u8::from(grain_type)).unwrap(), grain_type);
        }
        assert!(GrainType::try_from(0).is_err());
        assert!(GrainType::try_from(5).is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut params = GrainParameters::default();
        assert!(params.validate().is_ok());
        params.highs = f64::NAN;
        assert!(params.validate().is_err());
    }
}
