use wasm_bindgen::prelude::*;
use image::{self, ImageFormat, RgbaImage};
use js_sys::{Uint8Array, Object, Reflect};
#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result};

pub mod background;
#[cfg(not(target_arch = "wasm32"))]
pub mod assets;

pub use background::{BackgroundRemover, WHITEISH_THRESHOLD, is_background, remove_background};

/// Decode, strip and return the RGBA buffer together with the cleared count.
fn decode_and_strip(input: &[u8], threshold: u8) -> image::ImageResult<(RgbaImage, usize)> {
    let mut rgba = image::load_from_memory(input)?.to_rgba8();
    let cleared = BackgroundRemover::with_threshold(threshold).strip(&mut rgba);
    Ok((rgba, cleared))
}

fn encode_png(img: &RgbaImage) -> image::ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        img.write_to(&mut cursor, ImageFormat::Png)?;
    }
    Ok(buf)
}

/// Remove the white background of an encoded image.
///
/// Steps performed:
/// 1. Decode any format the `image` crate understands and convert to RGBA.
/// 2. Flood-fill from the four corners, clearing whiteish pixels
///    (`threshold`, default 240) to transparent white.
/// 3. Encode the result as PNG.
///
/// Returns `{ image: Uint8Array, cleared: number }` so JavaScript can build a
/// `Blob` and report how much of the picture was background.
#[wasm_bindgen(js_name = removeBackground)]
pub fn remove_background_js(input: Vec<u8>, threshold: Option<u8>) -> Result<Object, JsValue> {
    let (stripped, cleared) = decode_and_strip(&input, threshold.unwrap_or(WHITEISH_THRESHOLD))
        .map_err(|e| JsValue::from_str(&format!("Decode error: {e}")))?;

    let encoded = encode_png(&stripped)
        .map_err(|e| JsValue::from_str(&format!("PNG encode error: {e}")))?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &Uint8Array::from(encoded.as_slice()))?;
    Reflect::set(&result, &JsValue::from_str("cleared"), &JsValue::from_f64(cleared as f64))?;

    Ok(result)
}

/// Native counterpart of [`remove_background_js`]: returns the PNG bytes and
/// the number of pixels made transparent.
#[cfg(not(target_arch = "wasm32"))]
pub fn strip_background_bytes(input: &[u8], threshold: u8) -> Result<(Vec<u8>, usize)> {
    let (stripped, cleared) = decode_and_strip(input, threshold).context("decode failed")?;
    let png = encode_png(&stripped).context("PNG encode failed")?;
    Ok((png, cleared))
}
