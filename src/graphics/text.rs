//! 文字绘制

use super::fonts::Font;
use super::{Canvas, DrawError, Rect, WIDTH};
use crate::color::Color;

bitflags::bitflags! {
    /// 文字样式
    pub struct TextStyle: u8 {
        const NORMAL = 0x00;
        const BOLD = 0x01;
        const ITALIC = 0x02;
    }
}

impl defmt::Format for TextStyle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextStyle({=u8:#x})", self.bits())
    }
}

/// 未定义字形时光标前进的宽度
const MISSING_GLYPH_ADVANCE: i32 = 5;
/// 行间距
const LINE_GAP: i32 = 2;

impl<'a> Canvas<'a> {
    /// 绘制文字
    ///
    /// font_name: 字体名称, 为空时使用默认字体
    /// size: 放大倍数, 0 按 1 处理
    ///
    /// 超出屏幕右侧时自动换行, 返回实际绘制区域的外接矩形
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        color: Color,
        text: &str,
        font_name: &str,
        size: u8,
        style: TextStyle,
    ) -> Result<Rect, DrawError> {
        let font = Font::by_name(font_name).ok_or(DrawError::InvalidParameter)?;

        let bold = style.contains(TextStyle::BOLD);
        let italic = style.contains(TextStyle::ITALIC);
        let size = i32::from(size.max(1));
        let height = i32::from(font.height);
        let scaled_height = height * size;
        let block_width = if bold { size + 1 } else { size };

        let mut bbox = Rect::new(x, y, 0, 0);
        let mut first = true;
        let mut cursor_x = x;
        let mut cursor_y = y;

        for c in text.chars() {
            match c {
                '\n' => {
                    cursor_y += scaled_height + LINE_GAP;
                    cursor_x = x;
                    continue;
                }
                '\r' => continue,
                _ => {}
            }

            let c = if c.is_ascii() { c } else { '?' };
            let glyph = match font.glyph(c) {
                Some(glyph) if glyph.width > 0 => glyph,
                _ => {
                    cursor_x += MISSING_GLYPH_ADVANCE * size;
                    continue;
                }
            };

            let scaled_width = i32::from(glyph.width) * size;

            for (col, &bits) in glyph.columns.iter().enumerate().take(usize::from(glyph.width)) {
                for row in 0..height {
                    if (bits >> row) & 0x01 == 0 {
                        continue;
                    }
                    // 斜体: 越靠上的行向右偏移越多
                    let shift = if italic { (height - row) / 2 } else { 0 };
                    self.fill_rectangle(
                        cursor_x + col as i32 * size + shift,
                        cursor_y + row * size,
                        block_width,
                        size,
                        color,
                    )?;
                }
            }

            let italic_offset = if italic { height / 2 } else { 0 };
            let render_width = scaled_width + if bold { size } else { 0 } + italic_offset;
            if first {
                bbox = Rect::new(cursor_x, cursor_y, render_width, scaled_height);
                first = false;
            } else {
                bbox.width = bbox.width.max(cursor_x + render_width - bbox.x);
                bbox.height = bbox.height.max(cursor_y + scaled_height - bbox.y);
            }

            // 字符宽度加 1 像素 (按倍数放大) 的字间距
            cursor_x += scaled_width + size;
            if bold {
                cursor_x += size;
            }

            if cursor_x > WIDTH - scaled_width {
                cursor_y += scaled_height + LINE_GAP;
                cursor_x = x;
            }
        }

        Ok(bbox)
    }
}
