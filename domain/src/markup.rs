//! Inline style markup
//!
//! Loader messages carry legacy chat style codes: `&` followed by a color
//! digit `0-9a-f` or a format letter `k-o`, with `&r` resetting. A color
//! code also clears active formats. Unknown codes are kept as literal text.

/// The sixteen chat colors, by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ChatColor {
    pub fn from_code(code: char) -> Option<Self> {
        let color = match code.to_ascii_lowercase() {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            _ => return None,
        };
        Some(color)
    }

    /// 24-bit RGB value of the color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Black => (0x00, 0x00, 0x00),
            Self::DarkBlue => (0x00, 0x00, 0xAA),
            Self::DarkGreen => (0x00, 0xAA, 0x00),
            Self::DarkAqua => (0x00, 0xAA, 0xAA),
            Self::DarkRed => (0xAA, 0x00, 0x00),
            Self::DarkPurple => (0xAA, 0x00, 0xAA),
            Self::Gold => (0xFF, 0xAA, 0x00),
            Self::Gray => (0xAA, 0xAA, 0xAA),
            Self::DarkGray => (0x55, 0x55, 0x55),
            Self::Blue => (0x55, 0x55, 0xFF),
            Self::Green => (0x55, 0xFF, 0x55),
            Self::Aqua => (0x55, 0xFF, 0xFF),
            Self::Red => (0xFF, 0x55, 0x55),
            Self::LightPurple => (0xFF, 0x55, 0xFF),
            Self::Yellow => (0xFF, 0xFF, 0x55),
            Self::White => (0xFF, 0xFF, 0xFF),
        }
    }
}

/// Text formats toggled by `&k`-`&o`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormat {
    pub obfuscated: bool,
    pub bold: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub italic: bool,
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub color: Option<ChatColor>,
    pub format: TextFormat,
}

/// Splits marked-up text into styled segments. Empty runs are omitted.
pub fn parse_markup(input: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut color = None;
    let mut format = TextFormat::default();

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let code = match (c, chars.peek()) {
            ('&', Some(&next)) if is_style_code(next) => next,
            _ => {
                text.push(c);
                continue;
            }
        };
        chars.next();

        if !text.is_empty() {
            segments.push(StyledSegment {
                text: std::mem::take(&mut text),
                color,
                format,
            });
        }

        if let Some(new_color) = ChatColor::from_code(code) {
            color = Some(new_color);
            format = TextFormat::default();
            continue;
        }
        match code.to_ascii_lowercase() {
            'k' => format.obfuscated = true,
            'l' => format.bold = true,
            'm' => format.strikethrough = true,
            'n' => format.underline = true,
            'o' => format.italic = true,
            _ => {
                color = None;
                format = TextFormat::default();
            }
        }
    }

    if !text.is_empty() {
        segments.push(StyledSegment {
            text,
            color,
            format,
        });
    }
    segments
}

/// Removes all style codes, leaving plain text.
pub fn strip_markup(input: &str) -> String {
    parse_markup(input)
        .into_iter()
        .map(|segment| segment.text)
        .collect()
}

fn is_style_code(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}
