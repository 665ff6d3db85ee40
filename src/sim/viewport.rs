//! Canvas size, zoom and the distance-to-pixel scale

use glam::DVec2;

use super::object::CelestialObject;
use crate::consts::*;

const MIN_SCALE_SPAN_PX: f64 = 1.0;

/// Viewport and scale state
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    /// Always within `[ZOOM_MIN, ZOOM_MAX]`
    zoom_level: f64,
    /// Distance shown at the outermost ring at zoom 1 (km, always > 0)
    max_distance_km: f64,
    /// Pixels per km at zoom 1
    base_scale_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 0.0,
            height_px: 0.0,
            zoom_level: 1.0,
            max_distance_km: MIN_MAX_DISTANCE_KM,
            base_scale_factor: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        let mut viewport = Self::default();
        viewport.resize(width_px, height_px);
        viewport
    }

    /// Store new canvas dimensions and rescale against the current max distance
    pub fn resize(&mut self, width_px: f64, height_px: f64) {
        self.width_px = width_px.max(0.0);
        self.height_px = height_px.max(0.0);
        self.update_scale_factor();
    }

    pub fn zoom_in(&mut self, delta: f64) {
        self.set_zoom(self.zoom_level + delta);
    }

    pub fn zoom_out(&mut self, delta: f64) {
        self.set_zoom(self.zoom_level - delta);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_level = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    #[inline]
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    #[inline]
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    #[inline]
    pub fn base_scale_factor(&self) -> f64 {
        self.base_scale_factor
    }

    /// Derive the max distance from the dataset and refresh the scale factor.
    ///
    /// Deflected objects count with their outward offset; the result is
    /// floored at `MIN_MAX_DISTANCE_KM`, so an empty set uses the floor.
    pub fn recompute_scale(&mut self, objects: &[CelestialObject]) {
        let furthest = objects
            .iter()
            .map(|o| {
                if o.is_deflected {
                    o.miss_distance_km + DEFLECTION_OFFSET_KM
                } else {
                    o.miss_distance_km
                }
            })
            .fold(0.0, f64::max);

        self.max_distance_km = (furthest * SCALE_HEADROOM).max(MIN_MAX_DISTANCE_KM);
        self.update_scale_factor();
    }

    /// Canvases too small for the edge margin keep a 1 px span so the
    /// factor stays positive
    fn update_scale_factor(&mut self) {
        let screen_radius = self.width_px.min(self.height_px) / 2.0;
        let span_px = (screen_radius - EDGE_MARGIN_PX).max(MIN_SCALE_SPAN_PX);
        self.base_scale_factor = span_px / self.max_distance_km;
    }

    /// Nothing can be drawn until the canvas has been laid out
    #[inline]
    pub fn has_area(&self) -> bool {
        self.width_px > 0.0 && self.height_px > 0.0
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width_px / 2.0, self.height_px / 2.0)
    }

    /// Clear radius kept around the central body at the current zoom
    #[inline]
    pub fn earth_buffer_px(&self) -> f64 {
        EARTH_BUFFER_PX * self.zoom_level
    }

    /// Pixel radius of `max_distance_km` at the current zoom
    #[inline]
    pub fn max_pixel_radius(&self) -> f64 {
        self.max_distance_km * self.base_scale_factor * self.zoom_level
    }

    /// Visible range readout, in whole millions of km
    pub fn range_mkm(&self) -> i64 {
        (self.max_distance_km / self.zoom_level / 1_000_000.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn object(id: &str, miss_km: f64) -> CelestialObject {
        CelestialObject::new(id, id).with_approach(miss_km, 20_000.0, 0)
    }

    #[test]
    fn test_scale_for_three_objects() {
        let objects = vec![
            object("a", 1_000_000.0),
            object("b", 5_000_000.0),
            object("c", 9_000_000.0),
        ];
        let mut viewport = Viewport::default();
        viewport.recompute_scale(&objects);
        assert!((viewport.max_distance_km() - 10_800_000.0).abs() < 1e-6);

        viewport.resize(800.0, 600.0);
        let expected = (300.0 - 80.0) / 10_800_000.0;
        assert!((viewport.base_scale_factor() - expected).abs() < 1e-18);
    }

    #[test]
    fn test_empty_dataset_uses_floor() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.recompute_scale(&[]);
        assert_eq!(viewport.max_distance_km(), MIN_MAX_DISTANCE_KM);
        assert!(viewport.base_scale_factor() > 0.0);
    }

    #[test]
    fn test_small_canvas_keeps_positive_scale() {
        let mut viewport = Viewport::new(120.0, 120.0);
        viewport.recompute_scale(&[object("a", 9_000_000.0)]);
        assert!((viewport.max_distance_km() - 10_800_000.0).abs() < 1e-6);
        assert!(viewport.base_scale_factor() > 0.0);
        assert_eq!(viewport.base_scale_factor(), 1.0 / 10_800_000.0);
        assert!((viewport.max_pixel_radius() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_before_first_resize() {
        let mut viewport = Viewport::default();
        viewport.recompute_scale(&[object("a", 2_000_000.0)]);
        assert!(viewport.base_scale_factor() > 0.0);
        assert!(!viewport.has_area());
    }

    #[test]
    fn test_deflected_object_extends_range() {
        let mut objects = vec![object("a", 1_000_000.0)];
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.recompute_scale(&objects);
        assert_eq!(viewport.max_distance_km(), MIN_MAX_DISTANCE_KM);

        objects[0].is_deflected = true;
        viewport.recompute_scale(&objects);
        assert!((viewport.max_distance_km() - 16_000_000.0 * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.zoom_in(1.0);
        }
        assert_eq!(viewport.zoom_level(), ZOOM_MAX);
        for _ in 0..100 {
            viewport.zoom_out(0.3);
        }
        assert_eq!(viewport.zoom_level(), ZOOM_MIN);
    }

    #[test]
    fn test_range_readout() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.recompute_scale(&[object("a", 9_000_000.0)]);
        assert_eq!(viewport.range_mkm(), 11);
        viewport.set_zoom(2.0);
        assert_eq!(viewport.range_mkm(), 5);
    }

    #[test]
    fn test_zero_area() {
        assert!(!Viewport::default().has_area());
        assert!(!Viewport::new(800.0, 0.0).has_area());
        assert!(Viewport::new(1.0, 1.0).has_area());
    }

    proptest! {
        #[test]
        fn prop_zoom_stays_clamped(steps in prop::collection::vec(-3.0f64..3.0, 0..200)) {
            let mut viewport = Viewport::default();
            for step in steps {
                if step >= 0.0 {
                    viewport.zoom_in(step);
                } else {
                    viewport.zoom_out(-step);
                }
                prop_assert!((ZOOM_MIN..=ZOOM_MAX).contains(&viewport.zoom_level()));
            }
        }

        #[test]
        fn prop_scale_floor(
            misses in prop::collection::vec(0.0f64..1e9, 1..20),
            deflect in any::<bool>(),
            width in 0.0f64..2000.0,
            height in 0.0f64..2000.0,
        ) {
            let mut objects: Vec<_> = misses
                .iter()
                .enumerate()
                .map(|(i, &m)| object(&i.to_string(), m))
                .collect();
            objects[0].is_deflected = deflect;
            let mut viewport = Viewport::new(width, height);
            viewport.recompute_scale(&objects);
            prop_assert!(viewport.max_distance_km() >= MIN_MAX_DISTANCE_KM);
            prop_assert!(viewport.base_scale_factor() > 0.0);
        }
    }
}
