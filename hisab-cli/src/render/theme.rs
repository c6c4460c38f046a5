use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Terminal colours, One Dark hues picked per kind of value.
pub struct Palette;

impl Palette {
    pub const TEXT: Color = rgb(0xABB2BF);
    pub const MUTED: Color = rgb(0x5C6370);
    pub const DATE: Color = rgb(0x56B6C2);
    pub const SHIFT: Color = rgb(0x61AFEF);
    pub const AMOUNT: Color = rgb(0x98C379);
    pub const QUESTION: Color = rgb(0xE5C07B);
    pub const ERROR: Color = rgb(0xE06C75);

    /// Skin for notices, missing-field lists and month reports. The month
    /// heading takes the date colour and the total line the amount colour.
    pub fn report_skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(Self::TEXT);
        skin.bold.set_fg(Self::TEXT);
        skin.bullet.set_fg(Self::ERROR);
        skin.table.set_fg(Self::MUTED);

        skin.headers[0].set_fg(Self::DATE);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Self::AMOUNT);
        skin.headers[1].add_attr(Attribute::Bold);
        skin.headers[1].align = Alignment::Left;

        skin
    }
}

/// `0xRRGGBB` as a truecolor value.
const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}
