//! 已校验的绘图操作

use embedded_hal::blocking::delay::DelayMs;
use heapless::String;

use crate::color::Color;
use crate::config::MAX_TEXT_LEN;
use crate::graphics::bitmaps::BitmapId;
use crate::graphics::{Canvas, DrawError, Point, Rect, TextStyle};

/// 绘图操作
#[derive(Debug, Clone, PartialEq, Eq, defmt::Format)]
pub enum Operation {
    Line {
        from: Point,
        to: Point,
        color: Color,
        thickness: u8,
    },
    Rectangle {
        area: Rect,
        color: Color,
        filled: bool,
    },
    Text {
        origin: Point,
        color: Color,
        text: String<MAX_TEXT_LEN>,
        font: &'static str,
        size: u8,
        style: TextStyle,
    },
    Bitmap {
        id: BitmapId,
        origin: Point,
    },
    Clear {
        color: Color,
    },
    Wait {
        msecs: u32,
    },
    Circle {
        center: Point,
        radius: u16,
        color: Color,
    },
    /// 依次连接 5 个顶点的闭合多边形
    Figure {
        points: [Point; 5],
        color: Color,
    },
}

impl Operation {
    /// 在画布上执行
    pub fn render<D>(&self, canvas: &mut Canvas, delay: &mut D) -> Result<(), DrawError>
    where
        D: DelayMs<u32>,
    {
        match self {
            Operation::Line {
                from,
                to,
                color,
                thickness,
            } => canvas.draw_line(from.x, from.y, to.x, to.y, *color, *thickness),
            Operation::Rectangle {
                area,
                color,
                filled: true,
            } => canvas.fill_rectangle(area.x, area.y, area.width, area.height, *color),
            Operation::Rectangle {
                area,
                color,
                filled: false,
            } => canvas.draw_rectangle(area.x, area.y, area.width, area.height, *color),
            Operation::Text {
                origin,
                color,
                text,
                font,
                size,
                style,
            } => canvas
                .draw_text(origin.x, origin.y, *color, text, font, *size, *style)
                .map(|_| ()),
            Operation::Bitmap { id, origin } => canvas.draw_bitmap(*id as u8, origin.x, origin.y),
            Operation::Clear { color } => {
                canvas.fill_screen(*color);
                Ok(())
            }
            Operation::Wait { msecs } => {
                delay.delay_ms(*msecs);
                Ok(())
            }
            Operation::Circle {
                center,
                radius,
                color,
            } => canvas.draw_circle(center.x, center.y, *radius, *color),
            Operation::Figure { points, color } => {
                for (i, from) in points.iter().enumerate() {
                    let to = points[(i + 1) % points.len()];
                    canvas.draw_line(from.x, from.y, to.x, to.y, *color, 1)?;
                }
                Ok(())
            }
        }
    }
}
