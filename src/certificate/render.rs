use crate::certificate::error::CertificateError;
use crate::certificate::error::CertificateError::{CantLoadFont, CantRenderDocument};
use crate::certificate::layout::{CertificateLayout, Color, Element};
use crate::certificate::metrics::Font;
use crate::tools::log_message_and_return;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Pt, Rgb,
};

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn load(document: &PdfDocumentReference) -> Result<Self, CertificateError> {
        let load = |font: BuiltinFont| {
            document
                .add_builtin_font(font)
                .map_err(log_message_and_return("Can't load font", CantLoadFont))
        };

        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            oblique: load(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Helvetica => &self.regular,
            Font::HelveticaBold => &self.bold,
            Font::HelveticaOblique => &self.oblique,
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(mm(x), mm(y)), false)
}

fn pdf_color(color: &Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(
        f32::from(color.red) / 255.0,
        f32::from(color.green) / 255.0,
        f32::from(color.blue) / 255.0,
        None,
    ))
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, element: &Element) {
    match element {
        Element::Rectangle {
            x,
            y,
            width,
            height,
            color,
            line_width,
        } => {
            layer.set_outline_color(pdf_color(color));
            layer.set_outline_thickness(*line_width);
            layer.add_line(Line {
                points: vec![
                    point(*x, *y),
                    point(x + width, *y),
                    point(x + width, y + height),
                    point(*x, y + height),
                ],
                is_closed: true,
            });
        }
        Element::Line {
            from,
            to,
            color,
            line_width,
        } => {
            layer.set_outline_color(pdf_color(color));
            layer.set_outline_thickness(*line_width);
            layer.add_line(Line {
                points: vec![point(from.0, from.1), point(to.0, to.1)],
                is_closed: false,
            });
        }
        Element::Text {
            content,
            font,
            size,
            color,
            x,
            y,
        } => {
            layer.set_fill_color(pdf_color(color));
            layer.use_text(content.as_str(), *size, mm(*x), mm(*y), fonts.get(*font));
        }
    }
}

/// Draw `layout` on a single-page PDF document.
pub fn render(layout: &CertificateLayout, title: &str) -> Result<Vec<u8>, CertificateError> {
    let (document, page, layer) =
        PdfDocument::new(title, mm(*layout.width()), mm(*layout.height()), "Certificate");
    let fonts = Fonts::load(&document)?;
    let layer = document.get_page(page).get_layer(layer);

    for element in layout.elements() {
        draw(&layer, &fonts, element);
    }

    document
        .save_to_bytes()
        .map_err(log_message_and_return("Can't render certificate", CantRenderDocument))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dto::member::tests::jon_doe;

    #[test]
    fn should_render_pdf() {
        let layout = CertificateLayout::for_member(&jon_doe());

        let content = render(&layout, "NPV Membership Certificate").unwrap();

        assert!(content.starts_with(b"%PDF"));
        assert!(content.len() > 1_000);
    }
}
