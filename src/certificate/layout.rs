use crate::certificate::metrics::{Font, text_width};
use derive_getters::Getters;
use dto::member::Member;

/// Landscape A4, in points.
pub const PAGE_WIDTH: f32 = 841.89;
pub const PAGE_HEIGHT: f32 = 595.28;
const INCH: f32 = 72.0;

const DATE_FORMAT: &str = "%B %d, %Y";
const FOOTER: &str = "NPV Plaza 4th Floor, Ruiru By-Pass | +254-771-847-219 | voice@npv.co.ke";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    const fn from_hex(hex: u32) -> Self {
        Self {
            red: (hex >> 16) as u8,
            green: (hex >> 8) as u8,
            blue: hex as u8,
        }
    }
}

pub const NPV_GREEN: Color = Color::from_hex(0x28A745);
pub const NPV_GOLD: Color = Color::from_hex(0xFFD700);
pub const DARK_GRAY: Color = Color::from_hex(0x333333);
pub const BLACK: Color = Color::from_hex(0x000000);

/// Coordinates are in points, from the bottom-left corner of the page.
/// Text is positioned by the left end of its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        line_width: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        line_width: f32,
    },
    Text {
        content: String,
        font: Font,
        size: f32,
        color: Color,
        x: f32,
        y: f32,
    },
}

/// Everything drawn on a membership certificate.
/// Only the text depends on the member: two members get elements at the same places.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct CertificateLayout {
    width: f32,
    height: f32,
    elements: Vec<Element>,
}

/// Pen keeping track of the current font and colours, in the way of a PDF canvas.
struct Canvas {
    elements: Vec<Element>,
    font: Font,
    font_size: f32,
    fill: Color,
    stroke: Color,
    line_width: f32,
}

impl Canvas {
    fn new() -> Self {
        Self {
            elements: vec![],
            font: Font::Helvetica,
            font_size: 12.0,
            fill: BLACK,
            stroke: BLACK,
            line_width: 1.0,
        }
    }

    fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Color, line_width: f32) {
        self.stroke = color;
        self.line_width = line_width;
    }

    fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.elements.push(Element::Rectangle {
            x,
            y,
            width,
            height,
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.elements.push(Element::Line {
            from: (x1, y1),
            to: (x2, y2),
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn text(&mut self, x: f32, y: f32, content: &str) {
        self.elements.push(Element::Text {
            content: content.to_owned(),
            font: self.font,
            size: self.font_size,
            color: self.fill,
            x,
            y,
        });
    }

    fn centred_text(&mut self, x: f32, y: f32, content: &str) {
        let width = self.text_width(content);
        self.text(x - width / 2.0, y, content);
    }

    fn text_width(&self, content: &str) -> f32 {
        text_width(content, self.font, self.font_size)
    }
}

impl CertificateLayout {
    pub fn for_member(member: &Member) -> Self {
        let (width, height) = (PAGE_WIDTH, PAGE_HEIGHT);
        let centre = width / 2.0;
        let mut canvas = Canvas::new();

        // Borders
        canvas.set_stroke(NPV_GREEN, 3.0);
        canvas.rectangle(0.5 * INCH, 0.5 * INCH, width - INCH, height - INCH);
        canvas.set_stroke(NPV_GOLD, 1.0);
        canvas.rectangle(0.6 * INCH, 0.6 * INCH, width - 1.2 * INCH, height - 1.2 * INCH);

        // Header
        canvas.set_font(Font::HelveticaBold, 32.0);
        canvas.set_fill_color(NPV_GREEN);
        canvas.centred_text(centre, height - 1.5 * INCH, "NATIONAL PEOPLE'S VOICE");

        canvas.set_font(Font::HelveticaOblique, 14.0);
        canvas.set_fill_color(DARK_GRAY);
        canvas.centred_text(centre, height - 1.9 * INCH, "\"Our Voice, Our Strength\"");

        canvas.set_font(Font::HelveticaBold, 28.0);
        canvas.set_fill_color(NPV_GOLD);
        canvas.centred_text(centre, height - 2.7 * INCH, "CERTIFICATE OF MEMBERSHIP");

        canvas.set_stroke(NPV_GREEN, 2.0);
        canvas.line(
            centre - 3.0 * INCH,
            height - 2.9 * INCH,
            centre + 3.0 * INCH,
            height - 2.9 * INCH,
        );

        // Member
        canvas.set_font(Font::Helvetica, 14.0);
        canvas.set_fill_color(BLACK);
        canvas.centred_text(centre, height - 3.5 * INCH, "This is to certify that");

        canvas.set_font(Font::HelveticaBold, 24.0);
        canvas.set_fill_color(NPV_GREEN);
        let member_name = member.full_name().to_uppercase();
        canvas.centred_text(centre, height - 4.1 * INCH, &member_name);

        let name_width = canvas.text_width(&member_name);
        canvas.set_stroke(NPV_GOLD, 1.0);
        canvas.line(
            centre - name_width / 2.0,
            height - 4.2 * INCH,
            centre + name_width / 2.0,
            height - 4.2 * INCH,
        );

        canvas.set_font(Font::Helvetica, 14.0);
        canvas.set_fill_color(BLACK);
        canvas.centred_text(
            centre,
            height - 4.7 * INCH,
            "is a registered member of the National People's Voice Party",
        );
        canvas.centred_text(
            centre,
            height - 5.1 * INCH,
            "and has been granted full membership rights and privileges",
        );

        // Details
        let details_y = height - 6.2 * INCH;
        let issued_on = member.registration_date().format(DATE_FORMAT).to_string();
        let columns = [
            (
                2.0 * INCH,
                4.0 * INCH,
                [
                    ("Membership Number:", member.membership_number().as_str()),
                    ("Category:", member.membership_category().as_str()),
                    ("ID/Passport:", member.id_passport().as_str()),
                ],
            ),
            (
                6.5 * INCH,
                8.0 * INCH,
                [
                    ("County:", member.county().as_str()),
                    ("Constituency:", member.constituency().as_str()),
                    ("Date Issued:", issued_on.as_str()),
                ],
            ),
        ];
        for (label_x, value_x, rows) in columns {
            canvas.set_font(Font::HelveticaBold, 12.0);
            canvas.set_fill_color(DARK_GRAY);
            for (index, (label, _)) in rows.iter().enumerate() {
                canvas.text(label_x, details_y - index as f32 * 0.3 * INCH, label);
            }

            canvas.set_font(Font::Helvetica, 12.0);
            canvas.set_fill_color(NPV_GREEN);
            for (index, (_, value)) in rows.iter().enumerate() {
                canvas.text(value_x, details_y - index as f32 * 0.3 * INCH, value);
            }
        }

        // Signatures
        let signature_y = height - 7.5 * INCH;
        canvas.set_stroke(BLACK, 1.0);
        canvas.set_font(Font::Helvetica, 10.0);
        canvas.set_fill_color(BLACK);
        canvas.line(2.0 * INCH, signature_y, 4.0 * INCH, signature_y);
        canvas.centred_text(3.0 * INCH, signature_y - 0.3 * INCH, "Party Secretary General");
        canvas.line(7.0 * INCH, signature_y, 9.0 * INCH, signature_y);
        canvas.centred_text(8.0 * INCH, signature_y - 0.3 * INCH, "Party Leader");

        // Footer
        canvas.set_font(Font::Helvetica, 9.0);
        canvas.set_fill_color(DARK_GRAY);
        canvas.centred_text(centre, 0.8 * INCH, FOOTER);

        Self {
            width,
            height,
            elements: canvas.elements,
        }
    }

    /// Every piece of text, in drawing order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}
