//! NEO Radar entry point
//!
//! Wires the radar to the dashboard DOM in the browser. Natively it runs a
//! short headless session against the scripted dataset.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// `1234567.8` -> `"1,234,568"`
fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Simulated-date readout
fn sim_date_label(sim_time_ms: f64) -> String {
    chrono::DateTime::from_timestamp_millis(sim_time_ms as i64)
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, MouseEvent, WheelEvent};

    use neo_radar::feed::{FeedSource, fetch_objects};
    use neo_radar::renderer::Canvas2d;
    use neo_radar::sim::{CelestialObject, Playback, mark_deflected};
    use neo_radar::{FrameReport, Radar, RadarEvent, Settings};

    use super::{format_thousands, sim_date_label};

    /// Collision warning thresholds for the detail panel
    const WARNING_MISS_KM: f64 = 40_000.0;
    const WARNING_RISK: u8 = 80;

    /// Dashboard instance holding all state
    struct App {
        radar: Radar,
        canvas: Canvas2d,
        objects: Vec<CelestialObject>,
        selected: Option<String>,
        playback: Playback,
        settings: Settings,
        // Pending play-loop frame, cancelled on pause
        play_handle: Option<i32>,
    }

    impl App {
        /// Full render from the scrubber position and selection
        fn update_simulation(&mut self) -> FrameReport {
            let report = self.radar.render(
                &mut self.canvas,
                &self.objects,
                self.selected.as_deref(),
                self.playback.normalized(),
                js_sys::Date::now(),
            );
            self.update_hud(&report);
            report
        }

        /// Redraw without touching clock or selection
        fn redraw(&mut self) -> FrameReport {
            let report = self
                .radar
                .draw_frame(&mut self.canvas, &self.objects, js_sys::Date::now());
            self.update_hud(&report);
            report
        }

        fn update_hud(&self, report: &FrameReport) {
            set_text("hud-range", &format!("{}M km", report.range_mkm));
            set_text("sim-date", &sim_date_label(report.sim_time_ms));
        }

        fn show_details(&self, id: &str) {
            let Some(object) = self.objects.iter().find(|o| o.id == id) else {
                return;
            };
            set_hidden("target-placeholder", true);
            set_hidden("target-data", false);

            set_text("d-name", &object.name);
            set_text("d-risk-val", &format!("{}/100", object.risk_score));
            set_width("d-risk-bar", object.risk_score);
            set_text("d-diameter", &format!("{:.3} km", object.diameter_km));
            set_text("d-velocity", &format!("{} km/h", format_thousands(object.velocity_kph)));
            set_text("d-miss", &format!("{} km", format_thousands(object.miss_distance_km)));
            set_text("d-approach-date-time", &object.approach_label);

            let warn =
                object.miss_distance_km < WARNING_MISS_KM || object.risk_score > WARNING_RISK;
            set_hidden("collision-warning", !warn);
            set_disabled("btn-deflect", object.is_deflected);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("NEO Radar starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("radar-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let canvas = Canvas2d::new(canvas, &settings.body_image_url).expect("no 2d context");

        if let Some(toggle) = input_by_id(&document, "toggle-live") {
            toggle.set_checked(settings.live_feed);
        }

        let mut radar = Radar::new(js_sys::Date::now());
        let (w, h) = canvas.fit_to_parent();
        radar.resize(w, h, &[]);

        let app = Rc::new(RefCell::new(App {
            radar,
            canvas,
            objects: Vec::new(),
            selected: None,
            playback: Playback::default(),
            settings,
            play_handle: None,
        }));

        setup_resize(app.clone());
        setup_zoom(app.clone());
        setup_time_controls(app.clone());
        setup_canvas_click(app.clone());
        setup_deflect_button(app.clone());
        setup_feed_controls(app.clone());

        refresh_data(app).await;

        log::info!("NEO Radar running!");
    }

    /// Replace the dataset and rewind the scrubber
    async fn refresh_data(app: Rc<RefCell<App>>) {
        if let Some(list) = by_id("asteroid-list") {
            list.set_inner_html("<li class=\"loading-text\">Scanning Deep Space...</li>");
        }

        let settings = app.borrow().settings.clone();
        let feed = fetch_objects(&settings, js_sys::Date::now() as i64).await;
        update_status(feed.source);

        {
            let mut a = app.borrow_mut();
            a.objects = feed.objects;
            a.playback.rewind();
            let selected_gone = a
                .selected
                .as_ref()
                .is_some_and(|id| !a.objects.iter().any(|o| &o.id == id));
            if selected_gone {
                a.selected = None;
            }
            set_text("hud-count", &a.objects.len().to_string());
            log::info!("Dataset loaded: {} objects ({:?})", a.objects.len(), feed.source);
        }
        if let Some(slider) = input_by_id_global("time-slider") {
            slider.set_value("0");
        }

        populate_list(&app);
        update_simulation(&app);
    }

    fn update_simulation(app: &Rc<RefCell<App>>) {
        let report = app.borrow_mut().update_simulation();
        handle_events(app, report.events);
    }

    fn handle_events(app: &Rc<RefCell<App>>, events: Vec<RadarEvent>) {
        for event in events {
            match event {
                RadarEvent::InterceptImpact { target_id } => {
                    {
                        let mut a = app.borrow_mut();
                        let App { radar, objects, .. } = &mut *a;
                        if mark_deflected(objects, &target_id) {
                            radar.recompute_scale(objects);
                        }
                    }
                    populate_list(app);
                    select(app, &target_id);
                }
                RadarEvent::InterceptLost { target_id } => {
                    log::warn!("Intercept toward {} lost, dataset replaced", target_id);
                }
            }
        }
    }

    fn select(app: &Rc<RefCell<App>>, id: &str) {
        {
            let mut a = app.borrow_mut();
            if !a.objects.iter().any(|o| o.id == id) {
                return;
            }
            a.selected = Some(id.to_string());
            a.show_details(id);
        }
        mark_active_item(id);
        update_simulation(app);
    }

    fn populate_list(app: &Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(list) = document.get_element_by_id("asteroid-list") else {
            return;
        };
        list.set_inner_html("");

        let a = app.borrow();
        for object in &a.objects {
            let Ok(li) = document.create_element("li") else {
                continue;
            };
            let class = if object.is_hazardous {
                "ast-item hazardous"
            } else {
                "ast-item"
            };
            li.set_class_name(class);
            let _ = li.set_attribute("data-id", &object.id);
            let _ = li.set_attribute("id", &format!("ast-{}", object.id));

            let name = document.create_element("span").ok();
            let risk = document.create_element("span").ok();
            if let (Some(name), Some(risk)) = (name, risk) {
                name.set_text_content(Some(&object.name));
                risk.set_text_content(Some(&format!("Risk: {}%", object.risk_score)));
                let _ = li.append_child(&name);
                let _ = li.append_child(&risk);
            }

            let app = app.clone();
            let id = object.id.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                select(&app, &id);
            });
            let _ = li.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();

            let _ = list.append_child(&li);
        }
    }

    fn update_status(source: FeedSource) {
        if let Some(dot) = by_id("status-indicator") {
            dot.set_class_name(source.status_class());
        }
        set_text("status-text", source.status_text());
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let redraw = {
                let mut a = app.borrow_mut();
                let (w, h) = a.canvas.fit_to_parent();
                let App { radar, objects, .. } = &mut *a;
                radar.resize(w, h, objects)
            };
            if redraw {
                update_simulation(&app);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_zoom(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Mouse wheel
        {
            let app = app.clone();
            let canvas = app.borrow().canvas.element().clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                let report = {
                    let mut a = app.borrow_mut();
                    let step = a.settings.wheel_zoom_step;
                    if event.delta_y() < 0.0 {
                        a.radar.zoom_in(step);
                    } else {
                        a.radar.zoom_out(step);
                    }
                    a.redraw()
                };
                handle_events(&app, report.events);
            });
            let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // +/- buttons
        for (id, zoom_in) in [("btn-zoom-in", true), ("btn-zoom-out", false)] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let report = {
                    let mut a = app.borrow_mut();
                    let step = a.settings.button_zoom_step;
                    if zoom_in {
                        a.radar.zoom_in(step);
                    } else {
                        a.radar.zoom_out(step);
                    }
                    a.redraw()
                };
                handle_events(&app, report.events);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_time_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Scrubber
        if let Some(slider) = input_by_id(&document, "time-slider") {
            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok(percent) = slider_clone.value().parse::<f64>() {
                    app.borrow_mut().playback.seek(percent);
                    update_simulation(&app);
                }
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play / pause
        if let Some(btn) = document.get_element_by_id("btn-play-pause") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let playing = app.borrow_mut().playback.toggle();
                btn_clone.set_text_content(Some(if playing { "❚❚" } else { "▶" }));
                set_text("sim-status", if playing { "SIMULATING..." } else { "PAUSED" });
                if let Some(status) = by_id("sim-status") {
                    let color = if playing { "#00f0ff" } else { "#6c8a9e" };
                    let _ = status.style().set_property("color", color);
                }

                if playing {
                    play_tick(app.clone());
                } else {
                    let handle = app.borrow_mut().play_handle.take();
                    if let (Some(handle), Some(window)) = (handle, web_sys::window()) {
                        let _ = window.cancel_animation_frame(handle);
                        log::debug!("Play loop cancelled");
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One play-loop step: advance the scrubber, render, schedule the next
    fn play_tick(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.play_handle = None;
            if !a.playback.is_playing() {
                return;
            }
            let step = a.settings.play_step_percent;
            a.playback.advance(step);
            if let Some(slider) = input_by_id_global("time-slider") {
                slider.set_value(&a.playback.percent().to_string());
            }
        }
        update_simulation(&app);

        let handle = request_animation_frame({
            let app = app.clone();
            move || play_tick(app)
        });
        app.borrow_mut().play_handle = handle;
    }

    fn setup_canvas_click(app: Rc<RefCell<App>>) {
        let canvas = app.borrow().canvas.element().clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            let hit = app.borrow().radar.hit_test(x, y).map(str::to_string);
            if let Some(id) = hit {
                log::debug!("Picked {}", id);
                select(&app, &id);
            }
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_deflect_button(app: Rc<RefCell<App>>) {
        let Some(btn) = by_id("btn-deflect") else {
            log::warn!("No deflect button in page");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let launched = {
                let mut a = app.borrow_mut();
                let Some(id) = a.selected.clone() else {
                    return;
                };
                if a.objects.iter().any(|o| o.id == id && o.is_deflected) {
                    log::info!("{} already deflected", id);
                    return;
                }
                match a.radar.launch_intercept(&id) {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("{}", e);
                        false
                    }
                }
            };
            if launched {
                intercept_tick(app.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Intercept frame loop; reschedules only while the intercept is in flight
    fn intercept_tick(app: Rc<RefCell<App>>) {
        let (events, active) = {
            let mut a = app.borrow_mut();
            if !a.radar.is_intercept_active() {
                return;
            }
            let report = a.redraw();
            (report.events, a.radar.is_intercept_active())
        };
        handle_events(&app, events);

        if active {
            request_animation_frame(move || intercept_tick(app));
        }
    }

    fn setup_feed_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("btn-refresh") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                wasm_bindgen_futures::spawn_local(refresh_data(app.clone()));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(toggle) = input_by_id(&document, "toggle-live") {
            let toggle_clone = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                {
                    let mut a = app.borrow_mut();
                    a.settings.live_feed = toggle_clone.checked();
                    a.settings.save();
                    log::info!("Live feed: {}", a.settings.live_feed);
                }
                wasm_bindgen_futures::spawn_local(refresh_data(app.clone()));
            });
            let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Schedule `f` for the next frame, returning the handle
    fn request_animation_frame(f: impl FnOnce() + 'static) -> Option<i32> {
        let window = web_sys::window()?;
        let closure = Closure::once(move |_time: f64| f());
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        handle
    }

    fn mark_active_item(id: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(items) = document.query_selector_all(".ast-item") {
            for i in 0..items.length() {
                if let Some(item) = items.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                    let _ = item.class_list().remove_1("active-item");
                }
            }
        }
        if let Some(item) = document.get_element_by_id(&format!("ast-{id}")) {
            let _ = item.class_list().add_1("active-item");
        }
    }

    fn by_id(id: &str) -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into()
            .ok()
    }

    fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn input_by_id_global(id: &str) -> Option<HtmlInputElement> {
        let document = web_sys::window()?.document()?;
        input_by_id(&document, id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_width(id: &str, percent: u8) {
        if let Some(el) = by_id(id) {
            let _ = el.style().set_property("width", &format!("{percent}%"));
        }
    }

    fn set_disabled(id: &str, disabled: bool) {
        if let Some(el) = by_id(id) {
            let _ = if disabled {
                el.set_attribute("disabled", "")
            } else {
                el.remove_attribute("disabled")
            };
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neo_radar::feed::fallback_objects;
    use neo_radar::renderer::Recorder;
    use neo_radar::sim::mark_deflected;
    use neo_radar::{Radar, RadarEvent};

    env_logger::init();
    log::info!("NEO Radar (native) starting...");
    log::info!("Browser dashboard runs with `trunk serve`; running a headless session");

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    let mut objects = fallback_objects(now, now as u64);
    let mut radar = Radar::new(now as f64);
    let mut canvas = Recorder::new();
    radar.resize(1200.0, 800.0, &objects);

    for percent in [0.0, 25.0, 50.0, 75.0, 100.0] {
        canvas.reset();
        let report = radar.render(&mut canvas, &objects, None, percent / 100.0, now as f64);
        println!(
            "{:>5.1}%  {}  range {}M km  {} draw calls",
            percent,
            sim_date_label(report.sim_time_ms),
            report.range_mkm,
            canvas.commands.len()
        );
    }

    let Some(target) = objects.first().map(|o| o.id.clone()) else {
        log::error!("No objects to track");
        return;
    };
    let name = objects[0].name.clone();
    println!(
        "Target {} ({}), risk {}, miss {} km",
        name,
        target,
        objects[0].risk_score,
        format_thousands(objects[0].miss_distance_km)
    );

    canvas.reset();
    radar.render(&mut canvas, &objects, Some(&target), 0.5, now as f64);
    if let Err(e) = radar.launch_intercept(&target) {
        log::error!("{}", e);
        return;
    }

    let mut frames = 0;
    while radar.is_intercept_active() {
        canvas.reset();
        let report = radar.draw_frame(&mut canvas, &objects, now as f64);
        frames += 1;
        for event in report.events {
            match event {
                RadarEvent::InterceptImpact { target_id } => {
                    mark_deflected(&mut objects, &target_id);
                    radar.recompute_scale(&objects);
                    println!("Impact on {} after {} frames", target_id, frames);
                }
                RadarEvent::InterceptLost { target_id } => {
                    println!("Lost {}", target_id);
                }
            }
        }
    }

    canvas.reset();
    let report = radar.render(&mut canvas, &objects, Some(&target), 0.5, now as f64);
    println!("Range after deflection: {}M km", report.range_mkm);
    for text in canvas.texts() {
        println!("  label: {}", text);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1_000.0), "1,000");
        assert_eq!(format_thousands(1_234_567.8), "1,234,568");
        assert_eq!(format_thousands(-45_000.0), "-45,000");
    }

    #[test]
    fn test_sim_date_label() {
        assert_eq!(sim_date_label(1_760_000_000_000.0), "2025-10-09 08:53 UTC");
    }
}
