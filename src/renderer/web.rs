//! Canvas2D backend for the browser

use glam::DVec2;
use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::canvas::{Canvas, Color, Glow, Stroke};

const LABEL_FONT: &str = "bold 18px monospace";

/// `Canvas` over a `<canvas>` element's 2D context
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    body_image: Option<HtmlImageElement>,
}

impl Canvas2d {
    pub fn new(canvas: HtmlCanvasElement, body_image_url: &str) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("not a 2d context"))?;

        let body_image = match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(body_image_url);
                Some(img)
            }
            Err(e) => {
                log::warn!("Body image unavailable, drawing placeholder: {:?}", e);
                None
            }
        };

        Ok(Self {
            canvas,
            ctx,
            body_image,
        })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the parent's layout size; returns (w, h)
    pub fn fit_to_parent(&self) -> (f64, f64) {
        let (w, h) = self
            .canvas
            .parent_element()
            .map(|p| (p.client_width(), p.client_height()))
            .unwrap_or((self.canvas.client_width(), self.canvas.client_height()));
        let (w, h) = (w.max(0) as u32, h.max(0) as u32);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        (w as f64, h as f64)
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_string());
        self.ctx.set_line_width(stroke.width);
        let dash = match stroke.dash {
            Some([on, off]) => Array::of2(&on.into(), &off.into()),
            None => Array::new(),
        };
        let _ = self.ctx.set_line_dash(&dash);
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, stroke: Stroke) {
        self.apply_stroke(&stroke);
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), start, end);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, glow: Option<Glow>) {
        self.ctx.set_fill_style_str(&color.to_string());
        if let Some(glow) = glow {
            self.ctx.set_shadow_blur(glow.blur);
            self.ctx.set_shadow_color(&glow.color.to_string());
        }
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x, center.y, radius.max(0.0), 0.0, std::f64::consts::TAU);
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }

    fn line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        self.apply_stroke(&stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn text(&mut self, pos: DVec2, text: &str, color: Color) {
        self.ctx.set_font(LABEL_FONT);
        self.ctx.set_fill_style_str(&color.to_string());
        let _ = self.ctx.fill_text(text, pos.x, pos.y);
    }

    fn body_image_ready(&self) -> bool {
        self.body_image
            .as_ref()
            .map(|img| img.complete() && img.natural_width() > 0)
            .unwrap_or(false)
    }

    fn draw_body_image(&mut self, center: DVec2, rotation: f64, size: f64) {
        let Some(img) = &self.body_image else {
            return;
        };
        self.ctx.save();
        let _ = self.ctx.translate(center.x, center.y);
        let _ = self.ctx.rotate(rotation);
        let offset = -size / 2.0;
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, offset, offset, size, size);
        self.ctx.restore();
    }
}
