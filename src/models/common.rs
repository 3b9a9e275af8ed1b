use serde::{Deserialize, Serialize};

use crate::units::EMU_PER_PT;

/// Specifies a unit of length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// The units are unknown. Should not be used.
    #[serde(rename = "UNIT_UNSPECIFIED")]
    UnitUnspecified,
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch = 1/360000 cm.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// The magnitude.
    pub magnitude: Option<f64>,
    /// The units for magnitude.
    pub unit: Option<Unit>,
}

impl Dimension {
    pub fn emu(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(Unit::Emu),
        }
    }

    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }

    /// The magnitude expressed in EMU. Unspecified units are read as EMU,
    /// which is what the editor writes for geometry.
    pub fn to_emu(&self) -> f64 {
        let magnitude = self.magnitude.unwrap_or(0.0);
        match self.unit {
            Some(Unit::Pt) => magnitude * EMU_PER_PT,
            _ => magnitude,
        }
    }

    /// The magnitude expressed in points.
    pub fn to_pt(&self) -> f64 {
        self.to_emu() / EMU_PER_PT
    }
}

/// A width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// The width. Missing width does not inherit from parents.
    pub width: Option<Dimension>,
    /// The height. Missing height does not inherit from parents.
    pub height: Option<Dimension>,
}

impl Size {
    pub fn emu(width: f64, height: f64) -> Self {
        Self {
            width: Some(Dimension::emu(width)),
            height: Some(Dimension::emu(height)),
        }
    }
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ]
/// to transform source coordinates (x,y) into destination coordinates (x', y').
///
/// Formula:
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    /// The X coordinate scaling element.
    pub scale_x: Option<f64>,
    /// The Y coordinate scaling element.
    pub scale_y: Option<f64>,
    /// The X coordinate shearing element.
    pub shear_x: Option<f64>,
    /// The Y coordinate shearing element.
    pub shear_y: Option<f64>,
    /// The X coordinate translation element.
    pub translate_x: Option<f64>,
    /// The Y coordinate translation element.
    pub translate_y: Option<f64>,
    /// The units for the translation elements.
    pub unit: Option<Unit>,
}

impl AffineTransform {
    /// A pure translation in EMU with unit scale.
    pub fn translate(x_emu: f64, y_emu: f64) -> Self {
        Self {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            shear_x: Some(0.0),
            shear_y: Some(0.0),
            translate_x: Some(x_emu),
            translate_y: Some(y_emu),
            unit: Some(Unit::Emu),
        }
    }

    /// Translation components in EMU, honouring the transform's own unit.
    pub fn translation_emu(&self) -> (f64, f64) {
        let unit = self.unit.clone().unwrap_or(Unit::Emu);
        let x = Dimension {
            magnitude: Some(self.translate_x.unwrap_or(0.0)),
            unit: Some(unit.clone()),
        };
        let y = Dimension {
            magnitude: Some(self.translate_y.unwrap_or(0.0)),
            unit: Some(unit),
        };
        (x.to_emu(), y.to_emu())
    }
}
