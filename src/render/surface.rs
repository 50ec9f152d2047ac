use kurbo::{Affine, BezPath, Point, Vec2};

use crate::{
    foundation::{
        core::{FrameRGBA, IconSize},
        error::{DlIconError, DlIconResult},
        math::mul_div255_u8,
    },
    render::{
        blur::{blur_params, blur_rgba8_premul},
        composite::over_in_place,
        paint::{Paint, Rgba},
        text::{TextRun, TextStyle, layout_text},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

impl StrokeStyle {
    fn to_cpu(self) -> vello_cpu::kurbo::Stroke {
        use vello_cpu::kurbo::{Cap, Join, Stroke};

        let cap = match self.cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        };
        let join = match self.join {
            LineJoin::Miter => Join::Miter,
            LineJoin::Round => Join::Round,
            LineJoin::Bevel => Join::Bevel,
        };
        Stroke::new(self.width).with_caps(cap).with_join(join)
    }
}

/// Drop shadow applied to subsequent fills and strokes.
///
/// `blur` and `offset` are in logical units and scale with the icon, unlike
/// an HTML canvas where they are device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f64,
    pub offset: Vec2,
}

impl Shadow {
    pub fn new(color: Rgba, blur: f64) -> Self {
        Self {
            color,
            blur,
            offset: Vec2::new(0.5, 0.5),
        }
    }

    fn is_visible(&self) -> bool {
        self.color.a > 0.0 && (self.blur > 0.0 || self.offset != Vec2::ZERO)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct DrawState {
    transform: Affine,
    alpha: f32,
    stroke: StrokeStyle,
    shadow: Option<Shadow>,
    // Coverage per pixel (0..=255); `None` means unclipped.
    clip: Option<Vec<u8>>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            stroke: StrokeStyle::default(),
            shadow: None,
            clip: None,
        }
    }
}

enum Geometry<'a> {
    Fill(&'a BezPath),
    Stroke(&'a BezPath, StrokeStyle),
    Glyphs(&'a TextRun),
}

/// Fixed-size drawing surface with a canvas-like state stack.
///
/// Every fill or stroke is rasterized on its own (shadow first, then the
/// shape) and composited over the accumulated pixels with the current
/// global alpha, so successive draws stack the way a 2-D canvas does.
pub struct Surface {
    size: IconSize,
    pixels: Vec<u8>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Surface {
    pub fn new(size: IconSize) -> Self {
        Self {
            size,
            pixels: vec![0; size.byte_len()],
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    pub fn size(&self) -> IconSize {
        self.size
    }

    /// Reset pixels to transparent and drop any saved state.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.state = DrawState::default();
        self.stack.clear();
    }

    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn scale(&mut self, s: f64) {
        self.state.transform *= Affine::scale(s);
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform *= Affine::translate((dx, dy));
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn global_alpha(&self) -> f32 {
        self.state.alpha
    }

    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.stroke.width = width;
        }
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.stroke.cap = cap;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.stroke.join = join;
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.state.stroke
    }

    pub fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = Some(shadow);
    }

    pub fn clear_shadow(&mut self) {
        self.state.shadow = None;
    }

    /// Intersect the clip region with `path` (filled, current transform).
    /// Like every other state field it is undone by `restore`.
    pub fn clip(&mut self, path: &BezPath) -> DlIconResult<()> {
        let layer = self.rasterize(
            &Geometry::Fill(path),
            &Paint::Solid(Rgba::rgb(255, 255, 255)),
            self.state.transform,
        )?;
        let coverage = layer.chunks_exact(4).map(|px| px[3]);
        let mask = match self.state.clip.take() {
            Some(prev) => prev
                .iter()
                .zip(coverage)
                .map(|(&a, b)| mul_div255_u8(u16::from(a), u16::from(b)))
                .collect(),
            None => coverage.collect(),
        };
        self.state.clip = Some(mask);
        Ok(())
    }

    pub fn is_clipped(&self) -> bool {
        self.state.clip.is_some()
    }

    pub fn fill_path(&mut self, path: &BezPath, paint: &Paint) -> DlIconResult<()> {
        self.draw(Geometry::Fill(path), paint)
    }

    pub fn stroke_path(&mut self, path: &BezPath, paint: &Paint) -> DlIconResult<()> {
        let stroke = self.state.stroke;
        self.draw(Geometry::Stroke(path, stroke), paint)
    }

    /// Shape `text` anchored at `at` and fill its glyphs with `paint`.
    pub fn fill_text(
        &mut self,
        text: &str,
        at: Point,
        style: &TextStyle,
        paint: &Paint,
    ) -> DlIconResult<()> {
        let run = layout_text(text, at, style)?;
        self.draw(Geometry::Glyphs(&run), paint)
    }

    /// Current pixels as a premultiplied frame.
    pub fn snapshot(&self) -> FrameRGBA {
        let px = u32::from(self.size.px);
        FrameRGBA {
            width: px,
            height: px,
            data: self.pixels.clone(),
            premultiplied: true,
        }
    }

    fn draw(&mut self, geometry: Geometry<'_>, paint: &Paint) -> DlIconResult<()> {
        if self.state.alpha <= 0.0 || geometry_is_empty(&geometry) {
            return Ok(());
        }

        if let Some(shadow) = self.state.shadow.filter(Shadow::is_visible) {
            let scale = self.size.scale_factor();
            let transform = Affine::translate(shadow.offset * scale) * self.state.transform;
            let mut layer = self.rasterize(&geometry, &Paint::Solid(shadow.color), transform)?;
            if let Some((radius, sigma)) = blur_params(shadow.blur * scale) {
                let px = u32::from(self.size.px);
                layer = blur_rgba8_premul(&layer, px, px, radius, sigma)?;
            }
            self.apply_clip(&mut layer);
            over_in_place(&mut self.pixels, &layer, self.state.alpha)?;
        }

        let mut layer = self.rasterize(&geometry, paint, self.state.transform)?;
        self.apply_clip(&mut layer);
        over_in_place(&mut self.pixels, &layer, self.state.alpha)
    }

    fn apply_clip(&self, layer: &mut [u8]) {
        let Some(mask) = &self.state.clip else {
            return;
        };
        for (px, &m) in layer.chunks_exact_mut(4).zip(mask) {
            if m == u8::MAX {
                continue;
            }
            for c in px {
                *c = mul_div255_u8(u16::from(*c), u16::from(m));
            }
        }
    }

    fn rasterize(
        &self,
        geometry: &Geometry<'_>,
        paint: &Paint,
        transform: Affine,
    ) -> DlIconResult<Vec<u8>> {
        let px = self.size.px;
        let mut ctx = vello_cpu::RenderContext::new(px, px);
        ctx.set_transform(affine_to_cpu(transform));
        paint.apply(&mut ctx);
        match geometry {
            Geometry::Fill(path) => ctx.fill_path(&bezpath_to_cpu(path)),
            Geometry::Stroke(path, stroke) => {
                ctx.set_stroke(stroke.to_cpu());
                ctx.stroke_path(&bezpath_to_cpu(path));
            }
            Geometry::Glyphs(run) => ctx
                .glyph_run(&run.font)
                .font_size(run.size)
                .fill_glyphs(run.glyphs.iter().copied()),
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(px, px);
        ctx.render_to_pixmap(&mut pixmap);
        let bytes = pixmap.data_as_u8_slice();
        if bytes.len() != self.pixels.len() {
            return Err(DlIconError::render("rasterized layer size mismatch"));
        }
        Ok(bytes.to_vec())
    }
}

fn geometry_is_empty(geometry: &Geometry<'_>) -> bool {
    match geometry {
        Geometry::Fill(path) | Geometry::Stroke(path, _) => path.elements().is_empty(),
        Geometry::Glyphs(run) => run.is_empty(),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    use crate::render::paint::point_to_cpu;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
