/// Decorative symbols, looked up by meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Checkmark,
    Trash,
    Pencil,
    Close,
    Add,
    Selected,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Icons {
    ascii: bool,
}

impl Icons {
    pub fn new(ascii: bool) -> Self {
        Icons { ascii }
    }

    pub fn get(&self, glyph: Glyph) -> &'static str {
        if self.ascii {
            match glyph {
                Glyph::Checkmark => "x",
                Glyph::Trash => "-",
                Glyph::Pencil => "*",
                Glyph::Close => "X",
                Glyph::Add => "+",
                Glyph::Selected => ">",
            }
        } else {
            match glyph {
                Glyph::Checkmark => "\u{2713}",
                Glyph::Trash => "\u{2717}",
                Glyph::Pencil => "\u{270E}",
                Glyph::Close => "\u{2715}",
                Glyph::Add => "+",
                Glyph::Selected => "\u{25B8}",
            }
        }
    }

    /// `[✓]` or `[ ]`
    pub fn checkbox(&self, checked: bool) -> String {
        let mark = if checked { self.get(Glyph::Checkmark) } else { " " };
        format!("[{}]", mark)
    }
}
