//! ピクセルレンダラ
//!
//! フィルタ式を RGBA バッファに適用する。色操作は Filter Effects の
//! カラーマトリクスに従い、`blur` はガウスぼかし（sigma = 半径px）。

use crate::error::Result;
use crate::expression::{FilterExpression, FilterOp};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type Matrix = [[f32; 3]; 3];

/// フィルタ式を適用した新しいバッファを返す
pub fn apply_expression(source: &RgbaImage, expr: &FilterExpression) -> RgbaImage {
    let mut buf = source.clone();
    let mut pending: Vec<FilterOp> = Vec::new();

    for op in expr.ops() {
        match *op {
            FilterOp::Blur(radius) => {
                apply_color_ops(&mut buf, &pending);
                pending.clear();
                if radius > 0.0 {
                    buf = image::imageops::blur(&buf, radius);
                }
            }
            other => pending.push(other),
        }
    }
    apply_color_ops(&mut buf, &pending);
    buf
}

/// 連続する色操作をピクセル単位でまとめて適用（アルファは不変）
fn apply_color_ops(buf: &mut RgbaImage, ops: &[FilterOp]) {
    if ops.is_empty() {
        return;
    }
    let raw: &mut [u8] = buf;

    #[cfg(feature = "parallel")]
    let chunks = raw.par_chunks_exact_mut(4);
    #[cfg(not(feature = "parallel"))]
    let chunks = raw.chunks_exact_mut(4);

    chunks.for_each(|px| {
        let mut rgb = [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ];
        for op in ops {
            rgb = apply_op(rgb, op);
        }
        for (dst, v) in px.iter_mut().zip(rgb) {
            *dst = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    });
}

fn apply_op(rgb: [f32; 3], op: &FilterOp) -> [f32; 3] {
    let out = match *op {
        FilterOp::Grayscale(a) => mul(&grayscale_matrix(a), rgb),
        FilterOp::Sepia(a) => mul(&sepia_matrix(a), rgb),
        FilterOp::Saturate(s) => mul(&saturate_matrix(s), rgb),
        FilterOp::HueRotate(deg) => mul(&hue_rotate_matrix(deg), rgb),
        FilterOp::Brightness(a) => rgb.map(|c| c * a),
        FilterOp::Contrast(a) => rgb.map(|c| (c - 0.5) * a + 0.5),
        FilterOp::Invert(a) => {
            let a = a.clamp(0.0, 1.0);
            rgb.map(|c| a * (1.0 - c) + (1.0 - a) * c)
        }
        FilterOp::Blur(_) => rgb,
    };
    out.map(|c| c.clamp(0.0, 1.0))
}

fn mul(m: &Matrix, rgb: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
        m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
        m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let s = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * s, 0.7152 - 0.7152 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 + 0.2848 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 - 0.7152 * s, 0.0722 + 0.9278 * s],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix {
    let s = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * s, 0.769 - 0.769 * s, 0.189 - 0.189 * s],
        [0.349 - 0.349 * s, 0.686 + 0.314 * s, 0.168 - 0.168 * s],
        [0.272 - 0.272 * s, 0.534 - 0.534 * s, 0.131 + 0.869 * s],
    ]
}

fn saturate_matrix(s: f32) -> Matrix {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(deg: f32) -> Matrix {
    let (sin, cos) = deg.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// 描画面: 元画像の実寸にフィルタ式を適用したピクセルバッファ
#[derive(Debug, Clone)]
pub struct RenderSurface {
    filter: String,
    pixels: RgbaImage,
}

impl RenderSurface {
    /// 元画像を実寸で描画面にリサイズし、フィルタを設定して一度だけ描画する
    pub fn draw(source: &DynamicImage, filter: &str) -> Result<Self> {
        let expr = FilterExpression::parse(filter)?;
        let pixels = apply_expression(&source.to_rgba8(), &expr);
        log::debug!(
            "surface redraw {}x{} filter=\"{}\"",
            pixels.width(),
            pixels.height(),
            expr
        );
        Ok(Self {
            filter: expr.to_string(),
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 現在設定されているフィルタ式
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// ピクセルバッファを PNG にエンコード
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.pixels.clone()).write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}
