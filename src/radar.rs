//! Frame renderer
//!
//! `Radar` owns the viewport, the simulation clock, the intercept animation
//! and a per-frame table of screen positions. The driver owns the object
//! records and hands them in by reference on every call; the radar never
//! writes to them.

use glam::DVec2;

use crate::consts::*;
use crate::geometry::is_point_in_circle;
use crate::renderer::palette;
use crate::renderer::{Canvas, Glow, Stroke};
use crate::sim::intercept::projectile_position;
use crate::sim::{
    CelestialObject, Intercept, InterceptError, InterceptStep, Projection, SimulationClock,
    Viewport, project,
};

/// Angular length of the trail drawn behind tracked objects (radians)
const TRAIL_ARC: f64 = 0.2;
const LABEL_OFFSET: DVec2 = DVec2::new(12.0, -8.0);
const DETAIL_OFFSET: DVec2 = DVec2::new(12.0, 15.0);
const IMPACT_FLASH_RADIUS: f64 = 60.0;
const INTERCEPT_HEAD_RADIUS: f64 = 5.0;

/// Where an object was drawn in the last frame
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenEntry {
    pub id: String,
    pub pos: DVec2,
    pub radius: f64,
}

/// Screen positions from the most recently drawn frame, in draw order
#[derive(Debug, Clone, Default)]
pub struct ScreenTable {
    entries: Vec<ScreenEntry>,
}

impl ScreenTable {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, id: &str, pos: DVec2, radius: f64) {
        self.entries.push(ScreenEntry {
            id: id.to_string(),
            pos,
            radius,
        });
    }

    pub fn get(&self, id: &str) -> Option<&ScreenEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose marker, widened by `HIT_TOLERANCE_PX`, contains the point
    pub fn hit_test(&self, point: DVec2) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| is_point_in_circle(point, e.pos, e.radius + HIT_TOLERANCE_PX))
            .map(|e| e.id.as_str())
    }
}

/// Notifications raised while drawing a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadarEvent {
    /// The intercept reached its target. Raised once, after the intercept has
    /// been discarded, so the driver may launch again or redraw right away.
    InterceptImpact { target_id: String },
    /// The target was missing from the drawn frame; the intercept was dropped
    InterceptLost { target_id: String },
}

/// What a draw call produced besides pixels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    /// False when the canvas has no area yet
    pub drawn: bool,
    /// Visible range, millions of km
    pub range_mkm: i64,
    pub sim_time_ms: f64,
    pub events: Vec<RadarEvent>,
}

/// The radar scope
#[derive(Debug, Clone)]
pub struct Radar {
    viewport: Viewport,
    clock: SimulationClock,
    intercept: Option<Intercept>,
    selected: Option<String>,
    body_rotation: f64,
    screen: ScreenTable,
}

impl Radar {
    /// Start a radar whose 7-day window opens at `sim_start_ms`
    pub fn new(sim_start_ms: f64) -> Self {
        Self {
            viewport: Viewport::default(),
            clock: SimulationClock::new(sim_start_ms),
            intercept: None,
            selected: None,
            body_rotation: 0.0,
            screen: ScreenTable::default(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn screen(&self) -> &ScreenTable {
        &self.screen
    }

    /// Store the new canvas size.
    ///
    /// Returns true when a dataset is loaded and the caller should redraw.
    pub fn resize(&mut self, width_px: f64, height_px: f64, objects: &[CelestialObject]) -> bool {
        self.viewport.resize(width_px, height_px);
        if objects.is_empty() {
            return false;
        }
        self.viewport.recompute_scale(objects);
        true
    }

    pub fn zoom_in(&mut self, step: f64) {
        self.viewport.zoom_in(step);
        log::debug!("Zoom {:.1}", self.viewport.zoom_level());
    }

    pub fn zoom_out(&mut self, step: f64) {
        self.viewport.zoom_out(step);
        log::debug!("Zoom {:.1}", self.viewport.zoom_level());
    }

    /// Rescale after the dataset or a deflection changed
    pub fn recompute_scale(&mut self, objects: &[CelestialObject]) {
        self.viewport.recompute_scale(objects);
    }

    /// Full render pass: set selection and simulated time, rescale, draw
    pub fn render(
        &mut self,
        canvas: &mut impl Canvas,
        objects: &[CelestialObject],
        selected: Option<&str>,
        progress: f64,
        now_ms: f64,
    ) -> FrameReport {
        self.selected = selected.map(str::to_string);
        self.clock.set_progress(progress);
        if !objects.is_empty() {
            self.viewport.recompute_scale(objects);
        }
        self.draw_frame(canvas, objects, now_ms)
    }

    /// Redraw with the current selection and simulated time
    pub fn draw_frame(
        &mut self,
        canvas: &mut impl Canvas,
        objects: &[CelestialObject],
        now_ms: f64,
    ) -> FrameReport {
        let mut report = FrameReport {
            drawn: false,
            range_mkm: self.viewport.range_mkm(),
            sim_time_ms: self.clock.current_ms(),
            events: Vec::new(),
        };
        if !self.viewport.has_area() {
            return report;
        }

        let center = self.viewport.center();
        canvas.clear(self.viewport.width_px, self.viewport.height_px);
        self.draw_grid(canvas, center);
        self.draw_body(canvas, center);

        self.screen.clear();
        let mut target_pos = None;
        for object in objects {
            let selected = self.selected.as_deref() == Some(object.id.as_str());
            let projection = project(
                object,
                self.clock.current_ms(),
                now_ms,
                self.clock.start_ms(),
                &self.viewport,
                selected,
            );
            draw_object(canvas, object, &projection, selected, center);
            self.screen
                .push(&object.id, projection.pos, projection.screen_radius);

            if target_pos.is_none()
                && self
                    .intercept
                    .as_ref()
                    .is_some_and(|i| i.target_id() == object.id)
            {
                target_pos = Some(projection.pos);
            }
        }

        if let Some(event) = self.advance_intercept(canvas, center, target_pos) {
            report.events.push(event);
        }
        report.drawn = true;
        report
    }

    /// Start an intercept toward `target_id`; refused while one is in flight
    pub fn launch_intercept(&mut self, target_id: &str) -> Result<(), InterceptError> {
        if let Some(active) = &self.intercept {
            log::warn!(
                "Launch toward {} refused, intercept toward {} still in flight",
                target_id,
                active.target_id()
            );
            return Err(InterceptError::AlreadyActive {
                target_id: active.target_id().to_string(),
            });
        }
        log::info!("Intercept launched toward {}", target_id);
        self.intercept = Some(Intercept::new(target_id));
        Ok(())
    }

    pub fn is_intercept_active(&self) -> bool {
        self.intercept.is_some()
    }

    pub fn intercept(&self) -> Option<&Intercept> {
        self.intercept.as_ref()
    }

    /// Object under a pointer position, using the last drawn frame
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&str> {
        self.screen.hit_test(DVec2::new(x, y))
    }

    fn draw_grid(&self, canvas: &mut impl Canvas, center: DVec2) {
        let stroke = Stroke::solid(palette::GRID, 1.0);
        let max_radius = self.viewport.max_pixel_radius();
        let start_radius = self.viewport.earth_buffer_px();
        for fraction in [0.25, 0.5, 0.75, 1.0] {
            canvas.stroke_circle(center, start_radius + max_radius * fraction, stroke);
        }

        let (w, h) = (self.viewport.width_px, self.viewport.height_px);
        canvas.line(DVec2::new(0.0, center.y), DVec2::new(w, center.y), stroke);
        canvas.line(DVec2::new(center.x, 0.0), DVec2::new(center.x, h), stroke);
    }

    fn draw_body(&mut self, canvas: &mut impl Canvas, center: DVec2) {
        self.body_rotation += BODY_ROTATION_STEP;
        let zoom = self.viewport.zoom_level();
        if canvas.body_image_ready() {
            canvas.draw_body_image(center, self.body_rotation, BODY_IMAGE_SIZE_PX * zoom);
        } else {
            canvas.fill_circle(
                center,
                BODY_PLACEHOLDER_RADIUS_PX * zoom,
                palette::BODY_PLACEHOLDER,
                None,
            );
        }
    }

    /// Step the active intercept and draw it. The intercept is taken out of
    /// `self` first so it is already gone when an impact is reported.
    fn advance_intercept(
        &mut self,
        canvas: &mut impl Canvas,
        origin: DVec2,
        target_pos: Option<DVec2>,
    ) -> Option<RadarEvent> {
        let mut intercept = self.intercept.take()?;

        let Some(target) = target_pos else {
            log::warn!("Intercept target {} left the scope", intercept.target_id());
            return Some(RadarEvent::InterceptLost {
                target_id: intercept.target_id().to_string(),
            });
        };

        match intercept.step() {
            InterceptStep::Impact => {
                canvas.fill_circle(target, IMPACT_FLASH_RADIUS, palette::IMPACT_FLASH, None);
                log::info!("Intercept impact on {}", intercept.target_id());
                Some(RadarEvent::InterceptImpact {
                    target_id: intercept.target_id().to_string(),
                })
            }
            InterceptStep::InFlight { progress } => {
                let head = projectile_position(origin, target, progress);
                canvas.line(origin, head, Stroke::solid(palette::INTERCEPT_TRAIL, 3.0));
                canvas.fill_circle(
                    head,
                    INTERCEPT_HEAD_RADIUS,
                    palette::INTERCEPT_HEAD,
                    Some(Glow {
                        color: palette::INTERCEPT_GLOW,
                        blur: 10.0,
                    }),
                );
                self.intercept = Some(intercept);
                None
            }
        }
    }
}

fn draw_object(
    canvas: &mut impl Canvas,
    object: &CelestialObject,
    projection: &Projection,
    selected: bool,
    center: DVec2,
) {
    let near = projection.is_near_closest_approach();

    if let Some(stroke) = palette::trail_stroke(object, selected, projection.screen_radius) {
        canvas.stroke_arc(
            center,
            projection.pixel_radius,
            projection.angle - TRAIL_ARC,
            projection.angle,
            stroke,
        );
    }

    if let Some(stroke) = palette::connector_stroke(object, selected) {
        canvas.line(center, projection.pos, stroke);
    }

    let style = palette::marker_style(object, selected, near);
    canvas.fill_circle(
        projection.pos,
        projection.screen_radius,
        style.fill,
        Some(style.glow),
    );

    if palette::label_visible(object, selected, near) {
        canvas.text(projection.pos + LABEL_OFFSET, &object.name, palette::LABEL);
        if selected {
            let (line, color) = palette::detail_line(object);
            canvas.text(projection.pos + DETAIL_OFFSET, &line, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Recorder};

    const START: f64 = 1_760_000_000_000.0;

    fn dataset() -> Vec<CelestialObject> {
        vec![
            CelestialObject::new("1", "Near")
                .with_approach(1_000_000.0, 20_000.0, START as i64)
                .with_risk(70, true),
            CelestialObject::new("2", "Mid")
                .with_approach(5_000_000.0, 30_000.0, START as i64 + 86_400_000)
                .with_risk(35, false),
            CelestialObject::new("3", "Far")
                .with_approach(9_000_000.0, 40_000.0, START as i64 + 172_800_000)
                .with_risk(5, false),
        ]
    }

    fn radar() -> Radar {
        let mut radar = Radar::new(START);
        radar.resize(800.0, 600.0, &[]);
        radar
    }

    #[test]
    fn test_end_to_end_scale() {
        let objects = dataset();
        let mut radar = Radar::new(START);
        radar.recompute_scale(&objects);
        assert!((radar.viewport().max_distance_km() - 10_800_000.0).abs() < 1e-6);

        assert!(radar.resize(800.0, 600.0, &objects));
        let expected = (300.0 - 80.0) / 10_800_000.0;
        assert!((radar.viewport().base_scale_factor() - expected).abs() < 1e-18);
    }

    #[test]
    fn test_zero_area_skips_drawing() {
        let mut radar = Radar::new(START);
        let mut canvas = Recorder::new();
        let report = radar.render(&mut canvas, &dataset(), None, 0.0, START);
        assert!(!report.drawn);
        assert!(canvas.commands.is_empty());
        assert_eq!(radar.hit_test(400.0, 300.0), None);
    }

    #[test]
    fn test_hit_test_before_first_frame() {
        let radar = radar();
        assert_eq!(radar.hit_test(400.0, 300.0), None);
    }

    #[test]
    fn test_render_fills_screen_table() {
        let objects = dataset();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        let report = radar.render(&mut canvas, &objects, Some("2"), 0.0, START);
        assert!(report.drawn);
        assert_eq!(report.range_mkm, 11);
        assert_eq!(radar.screen().len(), 3);

        let mid = radar.screen().get("2").unwrap().clone();
        assert_eq!(mid.radius, 12.0);
        assert_eq!(radar.hit_test(mid.pos.x + 3.0, mid.pos.y), Some("2"));
        assert_eq!(radar.hit_test(-500.0, -500.0), None);
    }

    #[test]
    fn test_selected_object_gets_detail_line() {
        let mut objects = dataset();
        objects[1].approach_label = "2025-10-10 10:00:00".to_string();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        radar.render(&mut canvas, &objects, Some("2"), 0.0, START);

        let texts: Vec<_> = canvas.texts().collect();
        assert!(texts.contains(&"Mid"));
        assert!(texts.contains(&"Closest: 2025-10-10 10:00:00"));
        // Near is high risk and at closest approach: labelled, but no detail line
        assert!(texts.contains(&"Near"));
        // Far is low risk, far from approach and unselected: no label
        assert!(!texts.contains(&"Far"));
    }

    #[test]
    fn test_placeholder_until_image_loads() {
        let objects = dataset();
        let mut radar = radar();

        let mut canvas = Recorder::new();
        radar.render(&mut canvas, &objects, None, 0.0, START);
        assert!(!canvas
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::BodyImage { .. })));

        let mut canvas = Recorder::with_body_image();
        radar.render(&mut canvas, &objects, None, 0.0, START);
        let rotations: Vec<_> = canvas
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BodyImage { rotation, size, .. } => Some((*rotation, *size)),
                _ => None,
            })
            .collect();
        assert_eq!(rotations.len(), 1);
        // Second drawn frame
        assert!((rotations[0].0 - 2.0 * BODY_ROTATION_STEP).abs() < 1e-12);
        assert_eq!(rotations[0].1, BODY_IMAGE_SIZE_PX);
    }

    #[test]
    fn test_grid_rings() {
        let mut radar = radar();
        let mut canvas = Recorder::new();
        radar.render(&mut canvas, &dataset(), None, 0.0, START);
        let full_circles = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { stroke, .. } if *stroke == Stroke::solid(palette::GRID, 1.0)))
            .count();
        assert_eq!(full_circles, 4);
    }

    #[test]
    fn test_intercept_runs_to_impact_once() {
        let mut objects = dataset();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        radar.render(&mut canvas, &objects, Some("1"), 0.0, START);

        radar.launch_intercept("1").unwrap();
        assert!(radar.is_intercept_active());

        let mut impacts = 0;
        let mut frames = 0;
        while radar.is_intercept_active() {
            frames += 1;
            assert!(frames <= 50);
            let report = radar.draw_frame(&mut canvas, &objects, START + frames as f64 * 16.0);
            for event in report.events {
                match event {
                    RadarEvent::InterceptImpact { target_id } => {
                        // Already idle when the event is seen
                        assert!(!radar.is_intercept_active());
                        impacts += 1;
                        crate::sim::mark_deflected(&mut objects, &target_id);
                    }
                    RadarEvent::InterceptLost { .. } => panic!("target should stay visible"),
                }
            }
        }
        assert_eq!(frames, 50);
        assert_eq!(impacts, 1);
        let flashes: Vec<_> = canvas
            .filled_circles()
            .filter(|(_, _, color)| *color == palette::IMPACT_FLASH)
            .collect();
        assert_eq!(flashes.len(), 1);
        assert_eq!(flashes[0].1, IMPACT_FLASH_RADIUS);
        assert!(objects[0].is_deflected);
        assert_eq!(objects[0].risk_score, 0);

        // Idle afterwards: more frames raise nothing
        let report = radar.draw_frame(&mut canvas, &objects, START + 1_000.0);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_intercept_draws_projectile_from_center() {
        let objects = dataset();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        radar.render(&mut canvas, &objects, None, 0.0, START);
        radar.launch_intercept("3").unwrap();

        canvas.reset();
        radar.draw_frame(&mut canvas, &objects, START);
        let target = radar.screen().get("3").unwrap().pos;
        let center = radar.viewport().center();
        let trail = canvas
            .lines()
            .find(|(_, _, stroke)| stroke.color == palette::INTERCEPT_TRAIL)
            .unwrap();
        assert_eq!(trail.0, center);
        let expected = center.lerp(target, INTERCEPT_STEP);
        assert!(trail.1.distance(expected) < 1e-9);
    }

    #[test]
    fn test_second_launch_rejected() {
        let mut radar = radar();
        radar.launch_intercept("1").unwrap();
        let err = radar.launch_intercept("2").unwrap_err();
        assert_eq!(
            err,
            InterceptError::AlreadyActive {
                target_id: "1".to_string()
            }
        );
        assert_eq!(radar.intercept().unwrap().target_id(), "1");
    }

    #[test]
    fn test_intercept_lost_when_target_removed() {
        let objects = dataset();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        radar.launch_intercept("missing").unwrap();
        let report = radar.render(&mut canvas, &objects, None, 0.0, START);
        assert_eq!(
            report.events,
            vec![RadarEvent::InterceptLost {
                target_id: "missing".to_string()
            }]
        );
        assert!(!radar.is_intercept_active());
    }

    #[test]
    fn test_deflection_moves_marker_outward() {
        let mut objects = dataset();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        radar.render(&mut canvas, &objects, None, 0.5, START);
        let center = radar.viewport().center();
        let before = radar.screen().get("1").unwrap().pos.distance(center);

        objects[0].is_deflected = true;
        radar.render(&mut canvas, &objects, None, 0.5, START);
        let after = radar.screen().get("1").unwrap().pos.distance(center);
        assert!(after > before);
    }

    #[test]
    fn test_zoom_changes_range() {
        let objects = dataset();
        let mut radar = radar();
        let mut canvas = Recorder::new();
        let wide = radar.render(&mut canvas, &objects, None, 0.0, START).range_mkm;
        radar.zoom_in(1.0);
        let close = radar.draw_frame(&mut canvas, &objects, START).range_mkm;
        assert!(close < wide);
    }

    #[test]
    fn test_screen_table_hit_tolerance() {
        let mut table = ScreenTable::default();
        table.push("a", DVec2::new(100.0, 100.0), 5.0);
        assert_eq!(table.hit_test(DVec2::new(105.0, 100.0)), Some("a"));
        assert_eq!(table.hit_test(DVec2::new(115.0, 100.0)), Some("a"));
        assert_eq!(table.hit_test(DVec2::new(116.0, 100.0)), None);
    }

    #[test]
    fn test_screen_table_first_match_wins() {
        let mut table = ScreenTable::default();
        table.push("front", DVec2::new(0.0, 0.0), 4.0);
        table.push("back", DVec2::new(1.0, 0.0), 4.0);
        assert_eq!(table.hit_test(DVec2::new(0.5, 0.0)), Some("front"));
    }
}
