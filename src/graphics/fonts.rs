//! 字库
//!
//! 字形来自 font8x8 的基本拉丁字符集 (每字节一行, 最低位在最左边),
//! 绘制时转换为按列存储: 每字节一列, 最低位在最上边。

use font8x8::{UnicodeFonts, BASIC_FONTS};

/// 字形宽度的计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    /// 等宽
    Fixed(u8),
    /// 按字形实际占用的列裁剪, 空白字符使用给定宽度
    Proportional { blank: u8 },
}

/// 字体
#[derive(Debug, PartialEq, Eq)]
pub struct Font {
    /// 字体名称
    pub name: &'static str,
    /// 字形高度, 单位像素
    pub height: u8,
    spacing: Spacing,
}

/// 单个字形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// 按列存储的点阵
    pub columns: [u8; 8],
    /// 字形宽度 (列数)
    pub width: u8,
}

/// 可用字体, 第一个为默认字体
pub static FONTS: [Font; 2] = [
    Font {
        name: "consolas",
        height: 8,
        spacing: Spacing::Fixed(8),
    },
    Font {
        name: "arial",
        height: 8,
        spacing: Spacing::Proportional { blank: 3 },
    },
];

impl Font {
    /// 默认字体
    pub fn default_font() -> &'static Font {
        &FONTS[0]
    }

    /// 按名称查找字体
    /// 名称为空时返回默认字体
    pub fn by_name(name: &str) -> Option<&'static Font> {
        if name.is_empty() {
            return Some(Font::default_font());
        }
        FONTS.iter().find(|font| font.name == name)
    }

    /// 获取字符的字形
    pub fn glyph(&self, c: char) -> Option<Glyph> {
        let rows = BASIC_FONTS.get(c)?;
        let columns = transpose(&rows);

        match self.spacing {
            Spacing::Fixed(width) => Some(Glyph { columns, width }),
            Spacing::Proportional { blank } => Some(trim(columns, blank)),
        }
    }
}

/// 行存储转列存储
fn transpose(rows: &[u8; 8]) -> [u8; 8] {
    let mut columns = [0u8; 8];
    for (row, &bits) in rows.iter().enumerate() {
        for (col, column) in columns.iter_mut().enumerate() {
            if (bits >> col) & 0x01 != 0 {
                *column |= 1 << row;
            }
        }
    }
    columns
}

/// 去掉左右两侧的空列
fn trim(columns: [u8; 8], blank: u8) -> Glyph {
    let first = columns.iter().position(|&c| c != 0);
    let last = columns.iter().rposition(|&c| c != 0);

    match (first, last) {
        (Some(first), Some(last)) => {
            let mut trimmed = [0u8; 8];
            trimmed[..=last - first].copy_from_slice(&columns[first..=last]);
            Glyph {
                columns: trimmed,
                width: (last - first + 1) as u8,
            }
        }
        _ => Glyph {
            columns: [0; 8],
            width: blank,
        },
    }
}
