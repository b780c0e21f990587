// Imports
use crate::color::Color;
use crate::content::Content;
use crate::drawable::TextDrawable;
use crate::error::Error;
use crate::render::ImageSource;
use crate::shape::Shape;
use crate::typeface::{FontSpec, FontStyle};
use once_cell::sync::OnceCell;

/// Builder for [TextDrawable].
///
/// Mutable and reusable: every terminal build call snapshots the configuration by
/// value into an independent drawable, later mutations never affect earlier products.
/// Image pixel buffers are aliased into the products, not copied.
///
/// Validation is eager, the offending call fails with [Error::InvalidParameter].
#[derive(Debug, Clone)]
pub struct DrawableBuilder {
    content: Option<Content>,
    shape: Shape,
    width: Option<u32>,
    height: Option<u32>,
    fill_color: Color,
    text_color: Color,
    font: FontSpec,
    font_size: Option<u32>,
    bold: bool,
    to_upper_case: bool,
    border_thickness: u32,
    border_color: Option<Color>,
}

impl Default for DrawableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawableBuilder {
    /// A new builder with default state: rectangle shape, mid-gray fill, white text,
    /// light sans-serif font, no border, all dimensions unset.
    pub fn new() -> Self {
        Self {
            content: None,
            shape: Shape::Rect,
            width: None,
            height: None,
            fill_color: Color::GRAY,
            text_color: Color::WHITE,
            font: FontSpec::default(),
            font_size: None,
            bold: false,
            to_upper_case: false,
            border_thickness: 0,
            border_color: None,
        }
    }

    /// Set the intrinsic width in pixels, must be strictly positive.
    pub fn width(&mut self, width: u32) -> Result<&mut Self, Error> {
        if width == 0 {
            return Err(Error::InvalidParameter { what: "width" });
        }
        self.width = Some(width);
        Ok(self)
    }

    /// Set the intrinsic height in pixels, must be strictly positive.
    pub fn height(&mut self, height: u32) -> Result<&mut Self, Error> {
        if height == 0 {
            return Err(Error::InvalidParameter { what: "height" });
        }
        self.height = Some(height);
        Ok(self)
    }

    /// Set the fill color.
    pub fn color(&mut self, fill_color: impl Into<Color>) -> &mut Self {
        self.fill_color = fill_color.into();
        self
    }

    /// Set the text color.
    pub fn text_color(&mut self, text_color: impl Into<Color>) -> &mut Self {
        self.text_color = text_color.into();
        self
    }

    /// Enable a border of the given thickness in pixels, must be strictly positive.
    ///
    /// Without an explicit border color, the border is drawn in a darker shade of the
    /// fill color.
    pub fn with_border(&mut self, thickness: u32) -> Result<&mut Self, Error> {
        if thickness == 0 {
            return Err(Error::InvalidParameter {
                what: "border thickness",
            });
        }
        self.border_thickness = thickness;
        Ok(self)
    }

    /// Enable a border of the given thickness and color.
    pub fn with_border_colored(
        &mut self,
        thickness: u32,
        color: impl Into<Color>,
    ) -> Result<&mut Self, Error> {
        self.with_border(thickness)?;
        self.border_color = Some(color.into());
        Ok(self)
    }

    /// Select the typeface.
    pub fn use_font(&mut self, font: FontSpec) -> &mut Self {
        self.font = font;
        self
    }

    /// Select the typeface by family name and style.
    pub fn use_font_family(&mut self, family: impl Into<String>, style: FontStyle) -> &mut Self {
        self.font = FontSpec::new(family, style);
        self
    }

    /// Set the font size in pixels, must be strictly positive.
    ///
    /// When left unset, the size is derived at render time as half the smaller
    /// effective dimension.
    pub fn font_size(&mut self, size: u32) -> Result<&mut Self, Error> {
        if size == 0 {
            return Err(Error::InvalidParameter { what: "font size" });
        }
        self.font_size = Some(size);
        Ok(self)
    }

    /// Force a bold weight on the text paint, even when the selected font is not bold.
    ///
    /// Idempotent.
    pub fn bold(&mut self) -> &mut Self {
        self.bold = true;
        self
    }

    /// Upper-case the text content at build time.
    pub fn to_upper_case(&mut self) -> &mut Self {
        self.to_upper_case = true;
        self
    }

    /// Select the rectangle shape.
    pub fn rect(&mut self) -> &mut Self {
        self.shape = Shape::Rect;
        self
    }

    /// Select the oval shape.
    pub fn round(&mut self) -> &mut Self {
        self.shape = Shape::Oval;
        self
    }

    /// Select the rounded rectangle shape with the given corner radius, must be
    /// strictly positive.
    pub fn round_rect(&mut self, radius: f64) -> Result<&mut Self, Error> {
        if radius <= 0.0 {
            return Err(Error::InvalidParameter {
                what: "corner radius",
            });
        }
        self.shape = Shape::RoundedRect { radius };
        Ok(self)
    }

    /// Set text content, replacing any previously set content.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.content = Some(Content::Text(text.into()));
        self
    }

    /// Set image content, replacing any previously set content.
    pub fn image(&mut self, source: impl Into<ImageSource>) -> &mut Self {
        self.content = Some(Content::Image(source.into()));
        self
    }

    /// Terminal call: snapshot the configuration into an independent drawable.
    ///
    /// Fails with [Error::MissingContent] when neither text nor image content was set.
    pub fn build(&self) -> Result<TextDrawable, Error> {
        let content = match &self.content {
            Some(Content::Text(text)) => {
                let text = if self.to_upper_case {
                    text.to_uppercase()
                } else {
                    text.clone()
                };
                Content::Text(text)
            }
            Some(Content::Image(source)) => Content::Image(source.clone()),
            None => return Err(Error::MissingContent),
        };

        Ok(TextDrawable {
            shape: self.shape,
            width: self.width,
            height: self.height,
            fill_color: self.fill_color,
            text_color: self.text_color,
            font: self.font.clone(),
            font_size: self.font_size,
            bold: self.bold,
            border_thickness: self.border_thickness,
            border_color: self.border_color,
            content,
            image_cache: OnceCell::new(),
        })
    }

    /// Terminal call: build with the given text and fill color.
    pub fn build_text(
        &mut self,
        text: &str,
        fill_color: impl Into<Color>,
    ) -> Result<TextDrawable, Error> {
        self.color(fill_color).text(text).build()
    }

    /// Terminal call: build with the given image content and fill color.
    pub fn build_image(
        &mut self,
        source: impl Into<ImageSource>,
        fill_color: impl Into<Color>,
    ) -> Result<TextDrawable, Error> {
        self.color(fill_color).image(source).build()
    }

    /// Shortcut: select the rectangle shape and build with text.
    pub fn build_rect(
        &mut self,
        text: &str,
        fill_color: impl Into<Color>,
    ) -> Result<TextDrawable, Error> {
        self.rect().build_text(text, fill_color)
    }

    /// Shortcut: select the rectangle shape and build with image content.
    pub fn build_rect_image(
        &mut self,
        source: impl Into<ImageSource>,
        fill_color: impl Into<Color>,
    ) -> Result<TextDrawable, Error> {
        self.rect().build_image(source, fill_color)
    }

    /// Shortcut: select the oval shape and build with text.
    pub fn build_round(
        &mut self,
        text: &str,
        fill_color: impl Into<Color>,
    ) -> Result<TextDrawable, Error> {
        self.round().build_text(text, fill_color)
    }

    /// Shortcut: select the oval shape and build with image content.
    pub fn build_round_image(
        &mut self,
        source: impl Into<ImageSource>,
        fill_color: impl Into<Color>,
    ) -> Result<TextDrawable, Error> {
        self.round().build_image(source, fill_color)
    }

    /// Shortcut: select the rounded rectangle shape and build with text.
    pub fn build_round_rect(
        &mut self,
        text: &str,
        fill_color: impl Into<Color>,
        radius: f64,
    ) -> Result<TextDrawable, Error> {
        self.round_rect(radius)?.build_text(text, fill_color)
    }

    /// Shortcut: select the rounded rectangle shape and build with image content.
    pub fn build_round_rect_image(
        &mut self,
        source: impl Into<ImageSource>,
        fill_color: impl Into<Color>,
        radius: f64,
    ) -> Result<TextDrawable, Error> {
        self.round_rect(radius)?.build_image(source, fill_color)
    }
}
