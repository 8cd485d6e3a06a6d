//! Content-stream interpretation into positioned text runs.
//!
//! Walks a page's operators with a simplified text/graphics state and emits
//! one [`TextSpan`] per text-showing operation. Coordinates are left in PDF
//! user space (origin bottom-left); conversion to top-down boxes happens in
//! [`super::layout`].

use super::backend::{get_number_from_value, BackendFontInfo, PageId, PdfBackend, PdfValue};
use crate::PdfError;

/// A run of text drawn by a single show operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    /// Origin of the first glyph (baseline, user space).
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub font_name: String,
    /// Packed sRGB fill color, `0xRRGGBB`.
    pub color: u32,
}

/// Approximate glyph advance as a fraction of the font size. We have no
/// widths table here; 0.5 suits proportional Latin fonts.
pub(crate) const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// The identity 2x3 matrix: [a, b, c, d, tx, ty].
const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

#[derive(Debug, Clone)]
struct TextState {
    /// `Tf` resource key, not the base-font name.
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
    fill_color: u32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
            fill_color: 0,
        }
    }
}

impl TextState {
    fn x(&self) -> f32 {
        self.text_matrix[4]
    }

    fn y(&self) -> f32 {
        self.text_matrix[5]
    }

    /// `font_size * sqrt(b^2 + d^2)` of the text matrix.
    fn effective_font_size(&self) -> f32 {
        let scale = (self.text_matrix[1].powi(2) + self.text_matrix[3].powi(2)).sqrt();
        (self.font_size * scale).abs()
    }

    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// `Td`: translate the line matrix and restart the text matrix from it.
    fn translate_line(&mut self, tx: f32, ty: f32) {
        let new_tx = self.line_matrix[0] * tx + self.line_matrix[2] * ty + self.line_matrix[4];
        let new_ty = self.line_matrix[1] * tx + self.line_matrix[3] * ty + self.line_matrix[5];
        self.line_matrix[4] = new_tx;
        self.line_matrix[5] = new_ty;
        self.text_matrix = self.line_matrix;
    }

    fn glyph_advance(&self) -> f32 {
        self.font_size * APPROX_CHAR_WIDTH_RATIO * self.horiz_scale
    }

    fn estimate_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.glyph_advance() * self.scale_x()
    }

    /// Horizontal scale of the text matrix, so widths land in user space.
    fn scale_x(&self) -> f32 {
        (self.text_matrix[0].powi(2) + self.text_matrix[1].powi(2))
            .sqrt()
            .max(f32::EPSILON)
    }

    fn advance_after_show(&mut self, text: &str) {
        let mut dx = 0.0;
        for ch in text.chars() {
            dx += self.glyph_advance() + self.char_spacing;
            if ch == ' ' {
                dx += self.word_spacing;
            }
        }
        self.advance_x(dx);
    }
}

/// Pack unit-range RGB components into `0xRRGGBB`.
pub fn pack_rgb(r: f32, g: f32, b: f32) -> u32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Fill color from the numeric operands of `g`, `rg`, `k`, `sc` or `scn`.
/// One operand is gray, three RGB, four CMYK.
fn color_from_operands(operands: &[PdfValue]) -> Option<u32> {
    let nums: Vec<f32> = operands.iter().filter_map(get_number_from_value).collect();
    match nums.as_slice() {
        [gray] => Some(pack_rgb(*gray, *gray, *gray)),
        [r, g, b] => Some(pack_rgb(*r, *g, *b)),
        [c, m, y, k] => Some(pack_rgb(
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        )),
        _ => None,
    }
}

fn decode_string(
    val: &PdfValue,
    backend: &dyn PdfBackend,
    page_id: PageId,
    font_key: &[u8],
) -> String {
    match val {
        PdfValue::Str(bytes) => backend.decode_text(page_id, font_key, bytes),
        _ => String::new(),
    }
}

/// Walk one page's content stream and return its text runs in drawing order.
///
/// Handles the text operators (`BT`, `Tf`, `Tm`, `Td`, `TD`, `T*`, `TL`,
/// `Tc`, `Tw`, `Tz`, `Ts`, `Tj`, `TJ`, `'`, `"`), the fill-color operators
/// (`g`, `rg`, `k`, `sc`, `scn`, `cs`) and `q`/`Q` for the color stack.
pub fn extract_page_spans(
    backend: &dyn PdfBackend,
    page_id: PageId,
) -> Result<Vec<TextSpan>, PdfError> {
    let ops = backend.page_operations(page_id)?;
    let fonts = backend.page_fonts(page_id).unwrap_or_default();

    let mut state = TextState::default();
    let mut color_stack: Vec<u32> = Vec::new();
    let mut spans: Vec<TextSpan> = Vec::new();

    for op in &ops {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "q" => color_stack.push(state.fill_color),
            "Q" => {
                if let Some(c) = color_stack.pop() {
                    state.fill_color = c;
                }
            }
            "g" | "rg" | "k" | "sc" | "scn" => {
                if let Some(c) = color_from_operands(operands) {
                    state.fill_color = c;
                }
            }
            // Every color space starts out black.
            "cs" => state.fill_color = 0,

            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "Tf" => handle_tf(operands, &fonts, &mut state),
            "Tm" => handle_tm(operands, &mut state),
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands {
                    let tx = get_number_from_value(tx).unwrap_or(0.0);
                    let ty = get_number_from_value(ty).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.translate_line(tx, ty);
                }
            }
            "T*" => state.translate_line(0.0, -state.leading),
            "TL" | "Tc" | "Tw" | "Tz" | "Ts" => {
                if let Some(v) = operands.first().and_then(get_number_from_value) {
                    match op.operator.as_str() {
                        "TL" => state.leading = v,
                        "Tc" => state.char_spacing = v,
                        "Tw" => state.word_spacing = v,
                        "Tz" => state.horiz_scale = v / 100.0,
                        _ => state.text_rise = v,
                    }
                }
            }

            "Tj" => {
                if let Some(first) = operands.first() {
                    emit_show_string(first, backend, page_id, &mut state, &mut spans);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(arr)) = operands.first() {
                    handle_tj_array(arr, backend, page_id, &mut state, &mut spans);
                }
            }
            "'" => {
                state.translate_line(0.0, -state.leading);
                if let Some(first) = operands.first() {
                    emit_show_string(first, backend, page_id, &mut state, &mut spans);
                }
            }
            "\"" => {
                if let [aw, ac, string, ..] = operands {
                    if let Some(aw) = get_number_from_value(aw) {
                        state.word_spacing = aw;
                    }
                    if let Some(ac) = get_number_from_value(ac) {
                        state.char_spacing = ac;
                    }
                    state.translate_line(0.0, -state.leading);
                    emit_show_string(string, backend, page_id, &mut state, &mut spans);
                }
            }

            _ => {}
        }
    }

    Ok(spans)
}

fn handle_tf(operands: &[PdfValue], fonts: &[BackendFontInfo], state: &mut TextState) {
    let [key, size, ..] = operands else {
        return;
    };
    let key = match key {
        PdfValue::Name(n) | PdfValue::Str(n) => n.clone(),
        _ => return,
    };
    let name = fonts
        .iter()
        .find(|info| info.name == key)
        .and_then(|info| info.base_font.clone())
        .unwrap_or_else(|| String::from_utf8_lossy(&key).into_owned());

    state.font_key = key;
    state.font_name = name;
    state.font_size = get_number_from_value(size).unwrap_or(0.0);
}

fn handle_tm(operands: &[PdfValue], state: &mut TextState) {
    let vals: Vec<f32> = operands
        .iter()
        .take(6)
        .filter_map(get_number_from_value)
        .collect();
    if let [a, b, c, d, e, f] = vals[..] {
        state.text_matrix = [a, b, c, d, e, f];
        state.line_matrix = state.text_matrix;
    }
}

fn push_span(text: String, x: f32, y: f32, state: &TextState, spans: &mut Vec<TextSpan>) {
    let width = state.estimate_width(&text);
    spans.push(TextSpan {
        text,
        x,
        y,
        width,
        font_size: state.effective_font_size(),
        font_name: state.font_name.clone(),
        color: state.fill_color,
    });
}

fn emit_show_string(
    operand: &PdfValue,
    backend: &dyn PdfBackend,
    page_id: PageId,
    state: &mut TextState,
    spans: &mut Vec<TextSpan>,
) {
    let text = decode_string(operand, backend, page_id, &state.font_key);
    if text.is_empty() {
        return;
    }
    let (x, y) = (state.x(), state.y() + state.text_rise);
    push_span(text.clone(), x, y, state, spans);
    state.advance_after_show(&text);
}

/// `TJ`: strings interleaved with kerning adjustments in thousandths of a
/// text-space unit. Adjustments wide enough to be a word gap become a space.
fn handle_tj_array(
    arr: &[PdfValue],
    backend: &dyn PdfBackend,
    page_id: PageId,
    state: &mut TextState,
    spans: &mut Vec<TextSpan>,
) {
    let mut buf = String::new();
    let mut span_x = state.x();
    let span_y = state.y() + state.text_rise;

    for elem in arr {
        if let PdfValue::Str(_) = elem {
            let fragment = decode_string(elem, backend, page_id, &state.font_key);
            if buf.is_empty() {
                span_x = state.x();
            }
            buf.push_str(&fragment);
            state.advance_after_show(&fragment);
        } else if let Some(adj) = get_number_from_value(elem) {
            let dx = -adj / 1000.0 * state.font_size * state.horiz_scale;
            if dx > state.glyph_advance() * 0.3 && !buf.is_empty() {
                buf.push(' ');
            }
            state.advance_x(dx);
        }
    }

    let trimmed = buf.trim_end();
    if !trimmed.is_empty() {
        push_span(trimmed.to_string(), span_x, span_y, state, spans);
    }
}
