//! 颜色
//!
//! 8 位 R3G3B2 颜色空间, 高 3 位为红, 中 3 位为绿, 低 2 位为蓝;
//! 数据线 PE8-PE15 直接输出该字节。

/// R3G3B2 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0x00);
    pub const BLUE: Color = Color(0x03);
    pub const LIGHT_BLUE: Color = Color(0x5F);
    pub const GREEN: Color = Color(0x1C);
    pub const LIGHT_GREEN: Color = Color(0x9E);
    pub const CYAN: Color = Color(0x1F);
    pub const LIGHT_CYAN: Color = Color(0xDF);
    pub const RED: Color = Color(0xE0);
    pub const LIGHT_RED: Color = Color(0xF2);
    pub const MAGENTA: Color = Color(0xE3);
    pub const LIGHT_MAGENTA: Color = Color(0xF7);
    pub const BROWN: Color = Color(0x88);
    pub const YELLOW: Color = Color(0xFC);
    pub const GREY: Color = Color(0x92);
    pub const WHITE: Color = Color(0xFF);

    /// 根据指令中的颜色名称查找颜色
    pub fn from_name(name: &str) -> Option<Color> {
        PALETTE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, color)| *color)
    }

    /// 原始字节
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// 指令协议允许的颜色名称
const PALETTE: [(&str, Color); 15] = [
    ("zwart", Color::BLACK),
    ("blauw", Color::BLUE),
    ("lichtblauw", Color::LIGHT_BLUE),
    ("groen", Color::GREEN),
    ("lichtgroen", Color::LIGHT_GREEN),
    ("cyaan", Color::CYAN),
    ("lichtcyaan", Color::LIGHT_CYAN),
    ("rood", Color::RED),
    ("lichtrood", Color::LIGHT_RED),
    ("magenta", Color::MAGENTA),
    ("lichtmagenta", Color::LIGHT_MAGENTA),
    ("bruin", Color::BROWN),
    ("geel", Color::YELLOW),
    ("grijs", Color::GREY),
    ("wit", Color::WHITE),
];
