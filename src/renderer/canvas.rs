//! Canvas 2D implementation of [`Surface`]

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::surface::{Surface, TextAlign};
use crate::assets::{ImageId, ImageStatus};

/// Start loading every image; `status` is completed from each `onload`
pub fn load_images(status: &ImageStatus) -> HashMap<ImageId, HtmlImageElement> {
    let mut images = HashMap::new();
    for id in ImageId::ALL {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Cannot create image {:?}: {:?}", id, e);
                continue;
            }
        };
        let signal = status.signal(id).clone();
        let on_load = Closure::<dyn FnMut()>::new(move || signal.complete());
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        on_load.forget();

        let on_error = Closure::<dyn FnMut()>::new(move || {
            log::warn!("Image {} failed to load", id.path());
        });
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();

        image.set_src(id.path());
        images.insert(id, image);
    }
    images
}

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageId, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(
        canvas: &HtmlCanvasElement,
        images: HashMap<ImageId, HtmlImageElement>,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, images })
    }
}

impl Surface for CanvasSurface {
    fn set_fill(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn draw_image(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32) {
        if let Some(element) = self.images.get(&image) {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    element, x as f64, y as f64, w as f64, h as f64,
                );
        }
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = self.ctx.scale(x as f64, y as f64);
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.ctx.set_image_smoothing_enabled(enabled);
    }
}
