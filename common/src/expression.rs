//! フィルタ式の解析と文字列化
//!
//! 対応する関数:
//! `grayscale` `sepia` `saturate` `hue-rotate` `brightness` `contrast` `invert` `blur`

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::filter::IDENTITY_EXPRESSION;

/// フィルタ式を構成する単一の操作
///
/// 量は 1.0 = 100%。色相は度、ぼかしはピクセル半径。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Grayscale(f32),
    Sepia(f32),
    Saturate(f32),
    HueRotate(f32),
    Brightness(f32),
    Contrast(f32),
    Invert(f32),
    Blur(f32),
}

impl FilterOp {
    pub fn name(&self) -> &'static str {
        match self {
            FilterOp::Grayscale(_) => "grayscale",
            FilterOp::Sepia(_) => "sepia",
            FilterOp::Saturate(_) => "saturate",
            FilterOp::HueRotate(_) => "hue-rotate",
            FilterOp::Brightness(_) => "brightness",
            FilterOp::Contrast(_) => "contrast",
            FilterOp::Invert(_) => "invert",
            FilterOp::Blur(_) => "blur",
        }
    }

    fn parse(name: &str, arg: &str) -> Result<Self> {
        let invalid = || Error::FilterParse(format!("{}({})", name, arg));
        let op = match name {
            "grayscale" => FilterOp::Grayscale(parse_amount(arg).ok_or_else(invalid)?),
            "sepia" => FilterOp::Sepia(parse_amount(arg).ok_or_else(invalid)?),
            "saturate" => FilterOp::Saturate(parse_amount(arg).ok_or_else(invalid)?),
            "brightness" => FilterOp::Brightness(parse_amount(arg).ok_or_else(invalid)?),
            "contrast" => FilterOp::Contrast(parse_amount(arg).ok_or_else(invalid)?),
            "invert" => FilterOp::Invert(parse_amount(arg).ok_or_else(invalid)?),
            "hue-rotate" => FilterOp::HueRotate(parse_angle(arg).ok_or_else(invalid)?),
            "blur" => FilterOp::Blur(parse_length(arg).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        Ok(op)
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FilterOp::HueRotate(deg) => write!(f, "{}({}deg)", self.name(), trim_number(deg)),
            FilterOp::Blur(px) => write!(f, "{}({}px)", self.name(), trim_number(px)),
            FilterOp::Grayscale(a)
            | FilterOp::Sepia(a)
            | FilterOp::Saturate(a)
            | FilterOp::Brightness(a)
            | FilterOp::Contrast(a)
            | FilterOp::Invert(a) => write!(f, "{}({}%)", self.name(), trim_number(a * 100.0)),
        }
    }
}

/// 解析済みフィルタ式（左から順に適用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    ops: Vec<FilterOp>,
}

impl FilterExpression {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// フィルタ式文字列を解析
    pub fn parse(input: &str) -> Result<Self> {
        lazy_static! {
            static ref FUNC_RE: Regex = Regex::new(r"([a-z-]+)\(\s*([^()]*?)\s*\)").unwrap();
        }

        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == IDENTITY_EXPRESSION {
            return Ok(Self::identity());
        }

        let mut ops = Vec::new();
        let mut last_end = 0;
        for caps in FUNC_RE.captures_iter(trimmed) {
            let Some(whole) = caps.get(0) else { continue };
            let gap = &trimmed[last_end..whole.start()];
            if !gap.trim().is_empty() || (last_end > 0 && gap.is_empty()) {
                return Err(Error::FilterParse(input.to_string()));
            }
            ops.push(FilterOp::parse(&caps[1], &caps[2])?);
            last_end = whole.end();
        }

        if ops.is_empty() || !trimmed[last_end..].trim().is_empty() {
            return Err(Error::FilterParse(input.to_string()));
        }

        Ok(Self { ops })
    }
}

impl FromStr for FilterExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str(IDENTITY_EXPRESSION);
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// `100%` / `0.5` / 空（= 1）
fn parse_amount(arg: &str) -> Option<f32> {
    if arg.is_empty() {
        return Some(1.0);
    }
    let value = match arg.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => arg.parse::<f32>().ok()?,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// 角度を度に正規化。単位なしは 0 のみ許可
fn parse_angle(arg: &str) -> Option<f32> {
    if arg.is_empty() {
        return Some(0.0);
    }
    let (num, factor) = if let Some(v) = arg.strip_suffix("deg") {
        (v, 1.0)
    } else if let Some(v) = arg.strip_suffix("grad") {
        (v, 0.9)
    } else if let Some(v) = arg.strip_suffix("rad") {
        (v, 180.0 / std::f32::consts::PI)
    } else if let Some(v) = arg.strip_suffix("turn") {
        (v, 360.0)
    } else {
        let v = arg.parse::<f32>().ok()?;
        return (v == 0.0).then_some(0.0);
    };
    let value = num.trim().parse::<f32>().ok()? * factor;
    value.is_finite().then_some(value)
}

/// ピクセル長。単位なしは 0 のみ許可
fn parse_length(arg: &str) -> Option<f32> {
    if arg.is_empty() {
        return Some(0.0);
    }
    let value = match arg.strip_suffix("px") {
        Some(v) => v.trim().parse::<f32>().ok()?,
        None => {
            let v = arg.parse::<f32>().ok()?;
            if v != 0.0 {
                return None;
            }
            v
        }
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn trim_number(value: f32) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-3 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
