//! # 逻辑层
//!
//! 校验解析后的指令参数, 转换为绘图操作并在画布上执行;
//! 成功执行的操作保存在环形历史记录中, 供 herhaal 回放。

mod operation;

use embedded_hal::blocking::delay::DelayMs;
use heapless::HistoryBuffer;

use crate::config::{HISTORY_DEPTH, MAX_REPEAT_COUNT, MAX_TEXT_LEN};
use crate::error::{Error, LogicError};
use crate::front::Command;
use crate::graphics::bitmaps::BitmapId;
use crate::graphics::fonts::Font;
use crate::graphics::{Canvas, Point, Rect, TextStyle, HEIGHT, WIDTH};
use crate::Color;

pub use operation::Operation;

/// 指令解释器
pub struct Interpreter<D> {
    history: HistoryBuffer<Operation, HISTORY_DEPTH>,
    delay: D,
}

impl<D> Interpreter<D>
where
    D: DelayMs<u32>,
{
    /// 创建解释器
    /// delay: wacht 指令使用的延时
    pub fn new(delay: D) -> Self {
        Interpreter {
            history: HistoryBuffer::new(),
            delay,
        }
    }

    /// 历史记录中的操作数量
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 最近一次执行的操作
    pub fn last_operation(&self) -> Option<&Operation> {
        self.history.recent()
    }

    /// 校验并执行一条指令
    pub fn execute(&mut self, canvas: &mut Canvas, command: &Command) -> Result<(), Error> {
        if let Command::Repeat { count, times } = *command {
            return self.repeat(canvas, count, times);
        }

        let operation = validate(command)?;
        operation.render(canvas, &mut self.delay)?;
        defmt::debug!("executed {}", operation);

        self.history.write(operation);
        Ok(())
    }

    /// 按时间顺序回放最近 count 条操作, 共回放 times 遍
    /// 回放本身不会写入历史记录
    fn repeat(&mut self, canvas: &mut Canvas, count: i32, times: i32) -> Result<(), Error> {
        if count > HISTORY_DEPTH as i32 {
            return Err(LogicError::TooManyRepeats.into());
        }
        if count <= 0
            || count as usize > self.history.len()
            || times <= 0
            || times > MAX_REPEAT_COUNT
        {
            return Err(LogicError::InvalidParam.into());
        }

        defmt::info!("replaying {} operations {} times", count, times);
        let skip = self.history.len() - count as usize;
        for _ in 0..times {
            for operation in self.history.oldest_ordered().skip(skip) {
                operation.render(canvas, &mut self.delay)?;
            }
        }
        Ok(())
    }
}

/// 校验指令参数
pub fn validate(command: &Command) -> Result<Operation, LogicError> {
    match *command {
        Command::Line {
            x,
            y,
            x2,
            y2,
            color,
            thickness,
        } => {
            if !on_screen(x, y) || !on_screen(x2, y2) {
                return Err(LogicError::OutOfBounds);
            }
            let thickness = u8::try_from(thickness)
                .ok()
                .filter(|&t| t > 0)
                .ok_or(LogicError::InvalidThickness)?;
            Ok(Operation::Line {
                from: Point::new(x, y),
                to: Point::new(x2, y2),
                color: color_by_name(color)?,
                thickness,
            })
        }
        Command::Rectangle {
            x,
            y,
            width,
            height,
            color,
            filled,
        } => {
            // x, y 已在屏幕内, 减法不会溢出
            if !on_screen(x, y) || width > WIDTH - x || height > HEIGHT - y {
                return Err(LogicError::OutOfBounds);
            }
            if width <= 0 || height <= 0 {
                return Err(LogicError::InvalidSize);
            }
            let filled = match filled {
                0 => false,
                1 => true,
                _ => return Err(LogicError::InvalidFilled),
            };
            Ok(Operation::Rectangle {
                area: Rect::new(x, y, width, height),
                color: color_by_name(color)?,
                filled,
            })
        }
        Command::Text {
            x,
            y,
            color,
            text,
            font,
            size,
            style,
        } => {
            if !on_screen(x, y) {
                return Err(LogicError::OutOfBounds);
            }
            if text.len() > MAX_TEXT_LEN {
                return Err(LogicError::TextTooLong);
            }
            let color = color_by_name(color)?;
            let font = match Font::by_name(font) {
                Some(f) if !font.is_empty() => f,
                _ => return Err(LogicError::InvalidFontName),
            };
            let style = style_by_name(style).ok_or(LogicError::InvalidFontStyle)?;
            let size = match size {
                1 | 2 => size as u8,
                _ => return Err(LogicError::InvalidFontSize),
            };
            let text = heapless::String::try_from(text).map_err(|_| LogicError::TextTooLong)?;
            Ok(Operation::Text {
                origin: Point::new(x, y),
                color,
                text,
                font: font.name,
                size,
                style,
            })
        }
        Command::Bitmap { id, x, y } => {
            if !on_screen(x, y) {
                return Err(LogicError::OutOfBounds);
            }
            let id = u8::try_from(id)
                .ok()
                .and_then(|id| BitmapId::try_from(id).ok())
                .ok_or(LogicError::InvalidParam)?;
            Ok(Operation::Bitmap {
                id,
                origin: Point::new(x, y),
            })
        }
        Command::Clear { color } => Ok(Operation::Clear {
            color: color_by_name(color)?,
        }),
        Command::Wait { msecs } => {
            let msecs = u32::try_from(msecs).map_err(|_| LogicError::InvalidParam)?;
            Ok(Operation::Wait { msecs })
        }
        Command::Circle {
            x,
            y,
            radius,
            color,
        } => {
            if radius <= 0 {
                return Err(LogicError::InvalidParam);
            }
            // 整个圆必须位于屏幕内
            if !circle_on_screen(x, y, radius) {
                return Err(LogicError::OutOfBounds);
            }
            Ok(Operation::Circle {
                center: Point::new(x, y),
                radius: radius as u16,
                color: color_by_name(color)?,
            })
        }
        Command::Figure { points, color } => {
            let color = color_by_name(color)?;
            if points.iter().any(|p| !on_screen(p.x, p.y)) {
                return Err(LogicError::OutOfBounds);
            }
            Ok(Operation::Figure { points, color })
        }
        // herhaal 由解释器直接处理
        Command::Repeat { .. } => Err(LogicError::InvalidParam),
    }
}

fn on_screen(x: i32, y: i32) -> bool {
    Rect::screen().contains(x, y)
}

/// radius 已确认大于 0
fn circle_on_screen(x: i32, y: i32, radius: i32) -> bool {
    let inside = |center: i32, limit: i32| {
        matches!(
            (center.checked_sub(radius), center.checked_add(radius)),
            (Some(low), Some(high)) if low >= 0 && high < limit
        )
    };
    inside(x, WIDTH) && inside(y, HEIGHT)
}

fn color_by_name(name: &str) -> Result<Color, LogicError> {
    Color::from_name(name).ok_or(LogicError::InvalidColor)
}

/// 指令协议中的字体样式名称
fn style_by_name(name: &str) -> Option<TextStyle> {
    match name {
        "normaal" => Some(TextStyle::NORMAL),
        "vet" => Some(TextStyle::BOLD),
        "cursief" => Some(TextStyle::ITALIC),
        _ => None,
    }
}
