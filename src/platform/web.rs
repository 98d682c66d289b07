//! Browser host: 2D canvas drawing and sprite preloading

use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::assets::{LoadError, Texture, TextureLoader};
use crate::renderer::{Align, Anchor, Canvas, Rgba, TextStyle};

/// Images fetched before the scene starts; a texture id is an index here
#[derive(Default)]
pub struct ImageCache {
    images: Vec<(String, HtmlImageElement)>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch an image and keep it if it loads
    pub async fn preload(&mut self, src: &str) -> Result<(), JsValue> {
        let image = load_image(src).await?;
        log::info!(
            "Loaded sprite {} ({}x{})",
            src,
            image.natural_width(),
            image.natural_height()
        );
        self.images.push((src.to_string(), image));
        Ok(())
    }

    fn get(&self, id: u32) -> Option<&HtmlImageElement> {
        self.images.get(id as usize).map(|(_, image)| image)
    }
}

async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    JsFuture::from(promise).await?;
    image.set_onload(None);
    image.set_onerror(None);
    Ok(image)
}

/// Hands out preloaded images to ships
pub struct WebTextures(pub Rc<ImageCache>);

impl TextureLoader for WebTextures {
    fn load(&mut self, path: &str) -> Result<Texture, LoadError> {
        let index = self
            .0
            .images
            .iter()
            .position(|(src, _)| src == path)
            .ok_or(LoadError::Unavailable)?;
        let image = &self.0.images[index].1;
        if !image.complete() || image.natural_width() == 0 {
            return Err(LoadError::Pending(path.to_string()));
        }
        Ok(Texture {
            id: index as u32,
            width: image.natural_width(),
            height: image.natural_height(),
        })
    }
}

/// `Canvas` over a 2D context. Flips y so callers draw with y up.
pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
    images: Rc<ImageCache>,
}

impl WebCanvas {
    pub fn new(ctx: CanvasRenderingContext2d, size: Vec2, images: Rc<ImageCache>) -> Self {
        Self { ctx, size, images }
    }

    fn flip(&self, p: Vec2) -> (f64, f64) {
        (p.x as f64, (self.size.y - p.y) as f64)
    }

    /// Move the origin to `center` and rotate counter-clockwise (in y-up terms)
    fn push_transform(&self, center: Vec2, rotation: f32) {
        let (x, y) = self.flip(center);
        self.ctx.save();
        let _ = self.ctx.translate(x, y);
        let _ = self.ctx.rotate(-(rotation as f64).to_radians());
    }
}

fn css(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        color[0],
        color[1],
        color[2],
        color[3] as f32 / 255.0
    )
}

impl Canvas for WebCanvas {
    fn clear(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let (x, y) = self.flip(center);
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius as f64, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, color: Rgba) {
        self.push_transform(center, rotation);
        self.ctx.set_fill_style_str(&css(color));
        let (w, h) = (size.x as f64, size.y as f64);
        self.ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
    }

    fn draw_texture(&mut self, texture: &Texture, center: Vec2, size: Vec2, rotation: f32, alpha: u8) {
        let Some(image) = self.images.get(texture.id) else {
            return;
        };
        self.push_transform(center, rotation);
        self.ctx.set_global_alpha(alpha as f64 / 255.0);
        let (w, h) = (size.x as f64, size.y as f64);
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, -w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        let size = style.size as f64;
        let line_height = size * 1.25;
        let lines: Vec<&str> = text.split('\n').collect();
        let count = lines.len() as f64;
        let (x, y) = self.flip(pos);

        self.ctx.set_font(&format!("{}px sans-serif", style.size));
        self.ctx.set_fill_style_str(&css(style.color));

        let line_x = match (style.align, style.width) {
            (Align::Center, _) => {
                self.ctx.set_text_align("center");
                x
            }
            (Align::Left, Some(width)) if style.anchor == Anchor::Center => {
                self.ctx.set_text_align("left");
                x - width as f64 / 2.0
            }
            (Align::Left, _) => {
                self.ctx.set_text_align("left");
                x
            }
        };

        // Screen y of the first line's baseline
        let first = match style.anchor {
            Anchor::Center => {
                self.ctx.set_text_baseline("middle");
                y - (count - 1.0) * line_height / 2.0
            }
            Anchor::BottomLeft => {
                self.ctx.set_text_baseline("alphabetic");
                y - (count - 1.0) * line_height
            }
        };

        for (i, line) in lines.iter().enumerate() {
            let _ = self
                .ctx
                .fill_text(line, line_x, first + i as f64 * line_height);
        }
    }
}
