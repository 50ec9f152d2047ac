//! Text shaping for the icon's labels.
//!
//! Parley lays text out against an embedded DejaVu Sans family (regular and
//! bold) so output does not depend on system fonts. The result is a
//! [`TextRun`]: glyph ids positioned in user space, which the surface fills
//! through `vello_cpu` like any other geometry.

use std::{borrow::Cow, cell::RefCell};

use kurbo::Point;
use parley::layout::PositionedLayoutItem;
use vello_cpu::peniko::{Blob, FontData};

use crate::foundation::error::{DlIconError, DlIconResult};

static REGULAR_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    fn to_parley(self) -> parley::style::FontWeight {
        match self {
            Self::Normal => parley::style::FontWeight::NORMAL,
            Self::Bold => parley::style::FontWeight::BOLD,
        }
    }
}

/// Horizontal anchor, as canvas `textAlign`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical anchor, as canvas `textBaseline`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Alphabetic,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in logical units.
    pub size: f64,
    pub weight: FontWeight,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

/// Shaped text anchored at a point, ready to rasterize.
#[derive(Clone, Debug)]
pub struct TextRun {
    pub(crate) font: FontData,
    pub(crate) size: f32,
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    width: f64,
}

impl TextRun {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Advance width of the laid-out line.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Pen position of each glyph (baseline origin).
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.glyphs
            .iter()
            .map(|g| Point::new(f64::from(g.x), f64::from(g.y)))
    }
}

/// Shape `text` and anchor it at `at` according to `style`.
pub fn layout_text(text: &str, at: Point, style: &TextStyle) -> DlIconResult<TextRun> {
    // Layout contexts hold per-thread caches; each thread builds its own on
    // first use.
    thread_local! {
        static ENGINE: RefCell<Option<TextEngine>> = const { RefCell::new(None) };
    }

    ENGINE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let mut engine = match slot.take() {
            Some(engine) => engine,
            None => TextEngine::new()?,
        };
        let run = engine.layout(text, at, style);
        *slot = Some(engine);
        run
    })
}

pub fn text_width(text: &str, style: &TextStyle) -> DlIconResult<f64> {
    Ok(layout_text(text, Point::ZERO, style)?.width())
}

struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    regular: FontData,
    bold: FontData,
}

impl TextEngine {
    fn new() -> DlIconResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut family_id = None;
        for bytes in [REGULAR_TTF, BOLD_TTF] {
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
            family_id = family_id.or_else(|| families.first().map(|(id, _)| *id));
        }
        let family_id = family_id
            .ok_or_else(|| DlIconError::render("embedded font registered no families"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DlIconError::render("embedded font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            regular: FontData::new(Blob::from(REGULAR_TTF.to_vec()), 0),
            bold: FontData::new(Blob::from(BOLD_TTF.to_vec()), 0),
        })
    }

    fn layout(&mut self, text: &str, at: Point, style: &TextStyle) -> DlIconResult<TextRun> {
        if !style.size.is_finite() || style.size <= 0.0 {
            return Err(DlIconError::validation(
                "text size must be finite and > 0",
            ));
        }
        let size = style.size as f32;
        let font = match style.weight {
            FontWeight::Normal => self.regular.clone(),
            FontWeight::Bold => self.bold.clone(),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            style.weight.to_parley(),
        ));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let Some(first) = layout.lines().next() else {
            return Ok(TextRun {
                font,
                size,
                glyphs: Vec::new(),
                width: 0.0,
            });
        };
        let metrics = first.metrics();
        let ascent = f64::from(metrics.ascent);
        let descent = f64::from(metrics.descent);
        let baseline = f64::from(metrics.baseline);
        let width = f64::from(layout.width());

        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        // Distance from the layout's top edge to the requested anchor line.
        let anchor = match style.baseline {
            TextBaseline::Top => baseline - ascent,
            TextBaseline::Middle => baseline - (ascent - descent) / 2.0,
            TextBaseline::Alphabetic => baseline,
            TextBaseline::Bottom => baseline + descent,
        };
        let origin_x = (at.x + dx) as f32;
        let origin_y = (at.y - anchor) as f32;

        let mut glyphs = Vec::with_capacity(text.len());
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let mut x = run.offset();
                let y = run.baseline();
                for g in run.glyphs() {
                    glyphs.push(vello_cpu::Glyph {
                        id: g.id,
                        x: origin_x + x + g.x,
                        y: origin_y + y - g.y,
                    });
                    x += g.advance;
                }
            }
        }

        Ok(TextRun {
            font,
            size,
            glyphs,
            width,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
