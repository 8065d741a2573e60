//! WebAssembly bindings for pixtext

use crate::css::CssMode;
use crate::pixel::ImageData;
use crate::render::{RenderConfig, Renderer, Rendering};
use crate::style::TextStyle;
use crate::PixtextError;
use wasm_bindgen::prelude::*;

fn to_js(err: PixtextError) -> JsValue {
    let msg = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&format!("Error processing image: {msg}")));
    JsValue::from_str(&msg)
}

#[wasm_bindgen]
pub struct WasmRenderer {
    config: RenderConfig,
}

#[wasm_bindgen]
impl WasmRenderer {
    /// Create a renderer for `text`
    #[wasm_bindgen(constructor)]
    pub fn new(text: String) -> WasmRenderer {
        WasmRenderer { config: RenderConfig { text, ..RenderConfig::default() } }
    }

    #[wasm_bindgen]
    pub fn set_text(&mut self, text: String) {
        self.config.text = text;
    }

    #[wasm_bindgen]
    pub fn set_width(&mut self, width: u32) {
        self.config.width = width;
    }

    /// 0 = transparent, 1 = inverted, 2 = veiled
    #[wasm_bindgen]
    pub fn set_style(&mut self, style: u8) -> Result<(), JsValue> {
        self.config.style = TextStyle::try_from(style).map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_custom_properties(&mut self, enabled: bool) {
        self.config.css_mode = if enabled { CssMode::CustomProperties } else { CssMode::PerCell };
    }

    /// Render a canvas `ImageData` buffer already drawn at the grid size.
    ///
    /// Returns `{ html, css, width, height }`.
    #[wasm_bindgen]
    pub fn render_rgba(&self, image_data: &[u8], width: u32, height: u32) -> Result<js_sys::Object, JsValue> {
        let data = ImageData::from_rgba(image_data, width, height).map_err(to_js)?;
        self.render(data)
    }

    /// Render over an all-black square, for use before an image has loaded.
    #[wasm_bindgen]
    pub fn render_placeholder(&self) -> Result<js_sys::Object, JsValue> {
        self.render(ImageData::placeholder(self.config.width))
    }

    fn render(&self, data: ImageData) -> Result<js_sys::Object, JsValue> {
        let renderer = Renderer::new(self.config.clone()).map_err(to_js)?;
        let rendering = renderer.render_pixels(data).map_err(to_js)?;
        to_object(&rendering)
    }
}

fn to_object(rendering: &Rendering) -> Result<js_sys::Object, JsValue> {
    let size = rendering.image().size();
    let result = js_sys::Object::new();
    js_sys::Reflect::set(&result, &"html".into(), &rendering.html().into())?;
    js_sys::Reflect::set(&result, &"css".into(), &rendering.css().into())?;
    js_sys::Reflect::set(&result, &"width".into(), &size.width.into())?;
    js_sys::Reflect::set(&result, &"height".into(), &size.height.into())?;
    Ok(result)
}
