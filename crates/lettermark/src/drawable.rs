// Imports
use crate::color::Color;
use crate::content::Content;
use crate::ext::Vector2Ext;
use crate::render::Image;
use crate::shape::Shape;
use crate::typeface::FontSpec;
use crate::DrawableBuilder;
use once_cell::sync::OnceCell;
use p2d::bounding_volume::Aabb;
use piet::{RenderContext, TextLayout, TextLayoutBuilder};

/// The opacity a drawable reports to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    /// Every pixel is fully covered.
    Opaque,
    /// Partial coverage pixels may occur.
    Translucent,
}

/// Trait for types that can draw themselves on a [piet::RenderContext] within given bounds.
pub trait Drawable {
    /// Draw itself into the bounds.
    ///
    /// The implementors are expected to save/restore the drawing context.
    fn draw(&self, cx: &mut impl piet::RenderContext, bounds: Aabb) -> anyhow::Result<()>;
}

/// An immutable drawable compositing a filled shape, an optional border stroke and
/// centered text or image content.
///
/// Produced by [DrawableBuilder]. Stateless across renders apart from the one-time
/// materialization of image content; rendering the same drawable at different bounds
/// re-centers the content each time.
#[derive(Debug, Clone)]
pub struct TextDrawable {
    pub(crate) shape: Shape,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) fill_color: Color,
    pub(crate) text_color: Color,
    pub(crate) font: FontSpec,
    pub(crate) font_size: Option<u32>,
    pub(crate) bold: bool,
    pub(crate) border_thickness: u32,
    pub(crate) border_color: Option<Color>,
    pub(crate) content: Content,
    /// Materialized image content. Populated at most once, guarded for concurrent
    /// renders, owned exclusively by this instance.
    pub(crate) image_cache: OnceCell<Image>,
}

impl TextDrawable {
    /// Begin building a drawable.
    pub fn builder() -> DrawableBuilder {
        DrawableBuilder::new()
    }

    /// The intrinsic size `(width, height)` exposed to the host layout system.
    ///
    /// `-1` marks a dimension as unset, deferring to the render-time bounds.
    ///
    /// Configured dimensions are saturated at [i32::MAX] so that a set dimension can
    /// never read as a sentinel.
    pub fn intrinsic_size(&self) -> (i32, i32) {
        (
            self.width.map_or(-1, |w| w.min(i32::MAX as u32) as i32),
            self.height.map_or(-1, |h| h.min(i32::MAX as u32) as i32),
        )
    }

    /// The reported opacity.
    ///
    /// Always translucent: anti-aliasing of text and border edges introduces partial
    /// coverage pixels even over an opaque fill.
    pub fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    /// The shape of the drawable.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The fill color.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// The text color.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// The content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Set the alpha of the text paint.
    ///
    /// Forwarded to the text paint only, the fill and border paints are fixed at
    /// construction time.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.text_color.a = f64::from(alpha) / 255.0;
    }

    /// Multiply the text paint color channel-wise with the given color.
    ///
    /// Like [Self::set_alpha] this is forwarded to the text paint only, the fill and
    /// border paints are fixed at construction time.
    pub fn multiply_text_color(&mut self, color: impl Into<Color>) {
        let color = color.into();
        self.text_color = Color::new(
            self.text_color.r * color.r,
            self.text_color.g * color.g,
            self.text_color.b * color.b,
            self.text_color.a * color.a,
        );
    }

    /// The stroke color and thickness of the border, `None` when no border is drawn.
    ///
    /// An explicitly configured border color takes precedence, otherwise the color is
    /// derived from the fill color as a darker shade.
    pub fn border_stroke(&self) -> Option<(Color, f64)> {
        if self.border_thickness == 0 {
            return None;
        }
        let color = self
            .border_color
            .unwrap_or_else(|| self.fill_color.to_darker_shade());

        Some((color, f64::from(self.border_thickness)))
    }

    /// Resolve the effective content dimensions from the configuration and the
    /// render-time bounds.
    pub(crate) fn effective_size(&self, bounds: Aabb) -> (f64, f64) {
        let extents = bounds.extents();
        (
            self.width.map_or(extents[0], f64::from),
            self.height.map_or(extents[1], f64::from),
        )
    }

    /// Resolve the effective font size, derived from the effective dimensions when
    /// not configured.
    pub(crate) fn effective_font_size(&self, effective_size: (f64, f64)) -> f64 {
        self.font_size.map_or_else(
            || (effective_size.0.min(effective_size.1) / 2.0).floor(),
            f64::from,
        )
    }

    fn build_text_layout<T>(
        &self,
        piet_text: &mut T,
        text: String,
        font_size: f64,
    ) -> anyhow::Result<T::TextLayout>
    where
        T: piet::Text,
    {
        let font_family = self.font.resolve(piet_text)?;
        let weight = if self.bold {
            piet::FontWeight::BOLD
        } else {
            piet::FontWeight::new(self.font.weight)
        };

        piet_text
            .new_text_layout(text)
            .font(font_family, font_size)
            .default_attribute(piet::TextAttribute::Weight(weight))
            .default_attribute(piet::TextAttribute::Style(self.font.style.into()))
            .text_color(self.text_color.into())
            .build()
            .map_err(|e| anyhow::anyhow!("Building piet text layout failed, Err: {e:?}"))
    }
}

/// The layout origin that centers text within the effective dimensions.
///
/// Horizontally the measured layout width is centered on `width / 2`. Vertically the
/// baseline is offset by half the ascent + descent sum, aligning the visual center of
/// the text with `height / 2`.
fn centered_text_origin(
    bounds_origin: kurbo::Point,
    effective_size: (f64, f64),
    layout_width: f64,
    line_height: f64,
) -> kurbo::Point {
    kurbo::Point::new(
        bounds_origin.x + effective_size.0 * 0.5 - layout_width * 0.5,
        bounds_origin.y + effective_size.1 * 0.5 - line_height * 0.5,
    )
}

impl Drawable for TextDrawable {
    fn draw(&self, cx: &mut impl RenderContext, bounds: Aabb) -> anyhow::Result<()> {
        cx.save().map_err(|e| anyhow::anyhow!("{e:?}"))?;

        // fill across the full bounds
        let fill_brush = cx.solid_brush(self.fill_color.into());
        cx.fill(self.shape.fill_path(bounds), &fill_brush);

        // border, stroked centered on the shape edge
        if let Some((border_color, thickness)) = self.border_stroke() {
            let stroke_brush = cx.solid_brush(border_color.into());
            cx.stroke(
                self.shape.outline_path(bounds, thickness * 0.5),
                &stroke_brush,
                thickness,
            );
        }

        let effective_size = self.effective_size(bounds);
        let origin = bounds.mins.coords.to_kurbo_point();

        match &self.content {
            Content::Text(text) => {
                let font_size = self.effective_font_size(effective_size);
                let layout = self.build_text_layout(cx.text(), text.clone(), font_size)?;

                let layout_size = layout.size();
                let line_height = layout
                    .line_metric(0)
                    .map_or(layout_size.height, |lm| lm.height);
                let pos =
                    centered_text_origin(origin, effective_size, layout_size.width, line_height);

                cx.draw_text(&layout, pos);
            }
            Content::Image(source) => {
                let image = self.image_cache.get_or_try_init(|| source.materialize())?;

                let piet_image = cx
                    .make_image(
                        image.pixel_width as usize,
                        image.pixel_height as usize,
                        &image.data,
                        image.memory_format.into(),
                    )
                    .map_err(|e| anyhow::anyhow!("Making piet image failed, Err: {e:?}"))?;

                // centered by pixel dimensions, no scaling
                let dest_origin = kurbo::Point::new(
                    origin.x + (effective_size.0 - f64::from(image.pixel_width)) * 0.5,
                    origin.y + (effective_size.1 - f64::from(image.pixel_height)) * 0.5,
                );
                let dest_rect = kurbo::Rect::from_origin_size(
                    dest_origin,
                    kurbo::Size::new(
                        f64::from(image.pixel_width),
                        f64::from(image.pixel_height),
                    ),
                );
                cx.draw_image(&piet_image, dest_rect, piet::InterpolationMode::Bilinear);
            }
        }

        cx.restore().map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ImageMemoryFormat, ImageSource};
    use approx::assert_relative_eq;

    fn bounds(w: f64, h: f64) -> Aabb {
        Aabb::new(na::point![0.0, 0.0], na::point![w, h])
    }

    #[test]
    fn intrinsic_size_defaults_to_unset() {
        let drawable = TextDrawable::builder()
            .rect()
            .build_text("A", 0x112233ff)
            .unwrap();

        assert_eq!(drawable.intrinsic_size(), (-1, -1));
    }

    #[test]
    fn intrinsic_size_reports_configuration() {
        let mut builder = TextDrawable::builder();
        builder.width(48).unwrap().height(64).unwrap();
        let drawable = builder.build_text("A", 0x112233ff).unwrap();

        assert_eq!(drawable.intrinsic_size(), (48, 64));
    }

    #[test]
    fn always_translucent() {
        let drawable = TextDrawable::builder().build_text("A", 0xff0000ff).unwrap();

        assert_eq!(drawable.opacity(), Opacity::Translucent);
    }

    #[test]
    fn no_border_stroke_without_thickness() {
        let drawable = TextDrawable::builder().build_text("A", 0x00ff00ff).unwrap();

        assert_eq!(drawable.border_stroke(), None);
    }

    #[test]
    fn border_stroke_derives_shade_of_fill() {
        let mut builder = TextDrawable::builder();
        builder.with_border(4).unwrap();
        let drawable = builder.build_text("Z", 0x00ff00ff).unwrap();

        let (color, thickness) = drawable.border_stroke().unwrap();

        assert_eq!(u32::from(color), 0x00e500ff);
        assert_relative_eq!(thickness, 4.0);
    }

    #[test]
    fn border_stroke_prefers_explicit_color() {
        let mut builder = TextDrawable::builder();
        builder.with_border_colored(2, 0x123456ff).unwrap();
        let drawable = builder.build_text("Z", 0x00ff00ff).unwrap();

        let (color, _) = drawable.border_stroke().unwrap();

        assert_eq!(u32::from(color), 0x123456ff);
    }

    #[test]
    fn effective_size_falls_back_to_bounds() {
        let drawable = TextDrawable::builder().build_text("A", 0x808080ff).unwrap();

        assert_eq!(drawable.effective_size(bounds(100.0, 100.0)), (100.0, 100.0));
        assert_eq!(drawable.effective_size(bounds(50.0, 80.0)), (50.0, 80.0));
    }

    #[test]
    fn effective_size_prefers_configuration() {
        let mut builder = TextDrawable::builder();
        builder.width(40).unwrap();
        let drawable = builder.build_text("A", 0x808080ff).unwrap();

        assert_eq!(drawable.effective_size(bounds(100.0, 100.0)), (40.0, 100.0));
    }

    #[test]
    fn effective_font_size_is_half_the_min_dimension() {
        let drawable = TextDrawable::builder().build_text("A", 0x808080ff).unwrap();

        assert_relative_eq!(drawable.effective_font_size((100.0, 61.0)), 30.0);
        assert_relative_eq!(drawable.effective_font_size((50.0, 50.0)), 25.0);
    }

    #[test]
    fn effective_font_size_prefers_configuration() {
        let mut builder = TextDrawable::builder();
        builder.font_size(12).unwrap();
        let drawable = builder.build_text("A", 0x808080ff).unwrap();

        assert_relative_eq!(drawable.effective_font_size((100.0, 100.0)), 12.0);
    }

    #[test]
    fn text_recenters_for_different_bounds() {
        let layout_width = 10.0;
        let line_height = 16.0;

        for (w, h) in [(100.0, 100.0), (50.0, 50.0)] {
            let pos = centered_text_origin(
                kurbo::Point::ZERO,
                (w, h),
                layout_width,
                line_height,
            );

            // visual center of the laid out text
            assert_relative_eq!(pos.x + layout_width * 0.5, w * 0.5);
            assert_relative_eq!(pos.y + line_height * 0.5, h * 0.5);
        }
    }

    #[test]
    fn set_alpha_forwards_to_text_paint_only() {
        let mut drawable = TextDrawable::builder().build_text("A", 0x00ff00ff).unwrap();
        let fill_before = drawable.fill_color();
        let border_before = drawable.border_stroke();

        drawable.set_alpha(127);

        assert_relative_eq!(drawable.text_color().a, 127.0 / 255.0);
        assert!(drawable.fill_color().approx_eq(fill_before));
        assert_eq!(drawable.border_stroke(), border_before);
    }

    #[test]
    fn multiply_text_color_forwards_to_text_paint_only() {
        let mut builder = TextDrawable::builder();
        builder.text_color(Color::WHITE).with_border(2).unwrap();
        let mut drawable = builder.build_text("A", 0x00ff00ff).unwrap();
        let fill_before = drawable.fill_color();
        let border_before = drawable.border_stroke();

        drawable.multiply_text_color(Color::new(0.5, 0.25, 1.0, 0.5));

        assert!(drawable
            .text_color()
            .approx_eq(Color::new(0.5, 0.25, 1.0, 0.5)));
        assert!(drawable.fill_color().approx_eq(fill_before));
        assert_eq!(drawable.border_stroke(), border_before);

        // channels multiply, they don't overwrite
        drawable.multiply_text_color(Color::new(0.5, 1.0, 1.0, 1.0));
        assert!(drawable
            .text_color()
            .approx_eq(Color::new(0.25, 0.25, 1.0, 0.5)));
    }

    #[test]
    fn intrinsic_size_saturates_large_dimensions() {
        let mut builder = TextDrawable::builder();
        builder.width(u32::MAX).unwrap().height(64).unwrap();
        let drawable = builder.build_text("A", 0x112233ff).unwrap();

        assert_eq!(drawable.intrinsic_size(), (i32::MAX, 64));
    }

    #[test]
    fn draw_text_smoke() {
        let mut builder = TextDrawable::builder();
        builder.round_rect(10.0).unwrap().with_border(4).unwrap();
        let drawable = builder.build_text("Z", 0x00ff00ff).unwrap();

        let mut cx = piet::NullRenderContext::new();
        drawable.draw(&mut cx, bounds(100.0, 100.0)).unwrap();
        // repeat renders at different bounds are legal
        drawable.draw(&mut cx, bounds(50.0, 50.0)).unwrap();
    }

    #[test]
    fn draw_image_materializes_once() {
        let source = ImageSource::Bitmap(Image::from_raw(
            vec![0u8; 4 * 4 * 4],
            4,
            4,
            ImageMemoryFormat::R8g8b8a8Premultiplied,
        ));
        let drawable = TextDrawable::builder()
            .build_image(source, 0x808080ff)
            .unwrap();

        assert!(drawable.image_cache.get().is_none());

        let mut cx = piet::NullRenderContext::new();
        drawable.draw(&mut cx, bounds(32.0, 32.0)).unwrap();

        let cached = drawable.image_cache.get().unwrap().data.clone();

        drawable.draw(&mut cx, bounds(64.0, 64.0)).unwrap();

        assert!(std::sync::Arc::ptr_eq(
            &cached,
            &drawable.image_cache.get().unwrap().data
        ));
    }
}
