//! Marker colours and label rules
//!
//! Priority for a marker: deflected > selected > high risk > medium risk > default.
//! Risk colours brighten within an hour of closest approach.

use super::canvas::{Color, Glow, Stroke};
use crate::consts::{RISK_HIGH, RISK_MEDIUM};
use crate::sim::CelestialObject;

pub const GRID: Color = Color::rgba(0, 240, 255, 0.1);
pub const BODY_PLACEHOLDER: Color = Color::rgb(0, 240, 255);
pub const LABEL: Color = Color::rgb(255, 255, 255);

pub const INTERCEPT_TRAIL: Color = Color::rgba(255, 200, 0, 0.8);
pub const INTERCEPT_HEAD: Color = Color::rgb(255, 255, 255);
pub const INTERCEPT_GLOW: Color = Color::rgb(255, 170, 0);
pub const IMPACT_FLASH: Color = Color::rgba(255, 255, 255, 0.9);

const DEFLECTED: Color = Color::rgb(0, 255, 0);
const DEFLECTED_SELECTED: Color = Color::rgb(204, 255, 204);
const SELECTED: Color = Color::rgb(255, 255, 255);
const HIGH_RISK: Color = Color::rgb(255, 0, 85);
const HIGH_RISK_NEAR: Color = Color::rgb(255, 0, 0);
const MEDIUM_RISK: Color = Color::rgb(255, 215, 0);
const MEDIUM_RISK_NEAR: Color = Color::rgb(255, 255, 170);
const LOW_RISK: Color = Color::rgb(0, 240, 255);
const LOW_RISK_NEAR: Color = Color::rgb(170, 255, 255);

/// Fill and halo for an object's marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: Color,
    pub glow: Glow,
}

pub fn marker_style(object: &CelestialObject, selected: bool, near_approach: bool) -> MarkerStyle {
    let (fill, glow_color, blur) = if object.is_deflected {
        let fill = if selected { DEFLECTED_SELECTED } else { DEFLECTED };
        (fill, DEFLECTED, 20.0)
    } else if selected {
        (SELECTED, SELECTED, 20.0)
    } else if object.risk_score >= RISK_HIGH {
        let fill = if near_approach { HIGH_RISK_NEAR } else { HIGH_RISK };
        (fill, fill, 15.0)
    } else if object.risk_score >= RISK_MEDIUM {
        let fill = if near_approach { MEDIUM_RISK_NEAR } else { MEDIUM_RISK };
        (fill, fill, 10.0)
    } else {
        let fill = if near_approach { LOW_RISK_NEAR } else { LOW_RISK };
        (fill, fill, 5.0)
    };

    MarkerStyle {
        fill,
        glow: Glow {
            color: glow_color,
            blur,
        },
    }
}

/// Faint arc trailing the marker, for objects worth tracking by eye
pub fn trail_stroke(object: &CelestialObject, selected: bool, screen_radius: f64) -> Option<Stroke> {
    if !(selected || object.is_hazardous || object.is_deflected) {
        return None;
    }
    let color = if object.is_deflected {
        Color::rgba(0, 255, 0, 0.4)
    } else if object.is_hazardous {
        Color::rgba(255, 0, 85, 0.15)
    } else {
        Color::rgba(0, 240, 255, 0.15)
    };
    Some(Stroke::solid(color, screen_radius / 3.0))
}

/// Dashed line from the centre to the marker
pub fn connector_stroke(object: &CelestialObject, selected: bool) -> Option<Stroke> {
    if object.is_deflected {
        Some(Stroke::dashed(Color::rgba(0, 255, 0, 0.8), 1.0, [4.0, 4.0]))
    } else if selected {
        Some(Stroke::dashed(Color::rgba(255, 255, 255, 0.7), 1.0, [4.0, 4.0]))
    } else {
        None
    }
}

/// Names are shown only where they matter, to keep the scope readable
pub fn label_visible(object: &CelestialObject, selected: bool, near_approach: bool) -> bool {
    selected || near_approach || object.risk_score >= RISK_MEDIUM
}

/// Second label line for the selected object
pub fn detail_line(object: &CelestialObject) -> (String, Color) {
    if object.is_deflected {
        return ("TRAJECTORY SAFE".to_string(), DEFLECTED);
    }
    let color = if object.risk_score >= RISK_HIGH {
        Color::rgb(255, 170, 170)
    } else if object.risk_score >= RISK_MEDIUM {
        Color::rgb(255, 255, 170)
    } else {
        Color::rgb(204, 255, 255)
    };
    (format!("Closest: {}", object.approach_label), color)
}
