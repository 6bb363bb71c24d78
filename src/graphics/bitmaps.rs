//! 内置位图
//!
//! 0-3 为箭头, 4-5 为表情。位图数据在编译期由字符画生成:
//! `.` 透明, `W` 白, `K` 黑, `Y` 黄, `R` 红。

use crate::color::Color;

/// 透明色, 该颜色的像素不绘制
pub const TRANSPARENT: u8 = 0xFE;

/// 位图边长
const SIZE: usize = 16;

type Pixels = [[u8; SIZE]; SIZE];

/// 位图
#[derive(Debug)]
pub struct Bitmap {
    pub width: u16,
    pub height: u16,
    pub data: &'static [[u8; SIZE]],
}

/// 位图编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
pub enum BitmapId {
    ArrowUp = 0,
    ArrowRight = 1,
    ArrowDown = 2,
    ArrowLeft = 3,
    SmileyAngry = 4,
    SmileyHappy = 5,
}

impl BitmapId {
    /// 位图数量
    pub const COUNT: u8 = 6;

    /// 位图数据
    pub fn bitmap(self) -> &'static Bitmap {
        &BITMAPS[self as usize]
    }
}

impl TryFrom<u8> for BitmapId {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BitmapId::ArrowUp),
            1 => Ok(BitmapId::ArrowRight),
            2 => Ok(BitmapId::ArrowDown),
            3 => Ok(BitmapId::ArrowLeft),
            4 => Ok(BitmapId::SmileyAngry),
            5 => Ok(BitmapId::SmileyHappy),
            other => Err(other),
        }
    }
}

static BITMAPS: [Bitmap; BitmapId::COUNT as usize] = [
    square(&ARROW_UP),
    square(&ARROW_RIGHT),
    square(&ARROW_DOWN),
    square(&ARROW_LEFT),
    square(&SMILEY_ANGRY),
    square(&SMILEY_HAPPY),
];

const ARROW_UP: Pixels = art([
    b".......WW.......",
    b"......WWWW......",
    b".....WWWWWW.....",
    b"....WWWWWWWW....",
    b"...WWWWWWWWWW...",
    b"..WWWWWWWWWWWW..",
    b".WWWWWWWWWWWWWW.",
    b"WWWWWWWWWWWWWWWW",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
    b".....WWWWWW.....",
]);
const ARROW_DOWN: Pixels = flip_vertical(&ARROW_UP);
const ARROW_LEFT: Pixels = transpose(&ARROW_UP);
const ARROW_RIGHT: Pixels = flip_horizontal(&ARROW_LEFT);

const SMILEY_HAPPY: Pixels = art([
    b".....YYYYYY.....",
    b"...YYYYYYYYYY...",
    b"..YYYYYYYYYYYY..",
    b".YYYYYYYYYYYYYY.",
    b".YYYKKYYYYKKYYY.",
    b"YYYYKKYYYYKKYYYY",
    b"YYYYKKYYYYKKYYYY",
    b"YYYYYYYYYYYYYYYY",
    b"YYYYYYYYYYYYYYYY",
    b"YYKYYYYYYYYYYKYY",
    b"YYYKYYYYYYYYKYYY",
    b".YYYKKYYYYKKYYY.",
    b".YYYYYKKKKYYYYY.",
    b"..YYYYYYYYYYYY..",
    b"...YYYYYYYYYY...",
    b".....YYYYYY.....",
]);

const SMILEY_ANGRY: Pixels = art([
    b".....YYYYYY.....",
    b"...YYYYYYYYYY...",
    b"..YYYYYYYYYYYY..",
    b".YYRRYYYYYYRRYY.",
    b".YYYYRRYYRRYYYY.",
    b"YYYYKKYYYYKKYYYY",
    b"YYYYKKYYYYKKYYYY",
    b"YYYYYYYYYYYYYYYY",
    b"YYYYYYYYYYYYYYYY",
    b"YYYYYYYYYYYYYYYY",
    b"YYYYYKKKKKKYYYYY",
    b".YYYKYYYYYYKYYY.",
    b".YYKYYYYYYYYKYY.",
    b"..YYYYYYYYYYYY..",
    b"...YYYYYYYYYY...",
    b".....YYYYYY.....",
]);

const fn square(pixels: &'static Pixels) -> Bitmap {
    Bitmap {
        width: SIZE as u16,
        height: SIZE as u16,
        data: pixels,
    }
}

/// 字符画转像素
const fn art(rows: [&[u8; SIZE]; SIZE]) -> Pixels {
    let mut pixels = [[TRANSPARENT; SIZE]; SIZE];
    let mut y = 0;
    while y < SIZE {
        let mut x = 0;
        while x < SIZE {
            pixels[y][x] = match rows[y][x] {
                b'W' => Color::WHITE.value(),
                b'K' => Color::BLACK.value(),
                b'Y' => Color::YELLOW.value(),
                b'R' => Color::RED.value(),
                _ => TRANSPARENT,
            };
            x += 1;
        }
        y += 1;
    }
    pixels
}

const fn flip_vertical(src: &Pixels) -> Pixels {
    let mut pixels = [[TRANSPARENT; SIZE]; SIZE];
    let mut y = 0;
    while y < SIZE {
        pixels[y] = src[SIZE - 1 - y];
        y += 1;
    }
    pixels
}

const fn flip_horizontal(src: &Pixels) -> Pixels {
    let mut pixels = [[TRANSPARENT; SIZE]; SIZE];
    let mut y = 0;
    while y < SIZE {
        let mut x = 0;
        while x < SIZE {
            pixels[y][x] = src[y][SIZE - 1 - x];
            x += 1;
        }
        y += 1;
    }
    pixels
}

const fn transpose(src: &Pixels) -> Pixels {
    let mut pixels = [[TRANSPARENT; SIZE]; SIZE];
    let mut y = 0;
    while y < SIZE {
        let mut x = 0;
        while x < SIZE {
            pixels[y][x] = src[x][y];
            x += 1;
        }
        y += 1;
    }
    pixels
}
