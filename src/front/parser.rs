//! 指令解析
//!
//! 指令以逗号分隔, 第一个字段为指令名称, 例如:
//! `lijn,0,0,100,100,rood,2`
//!
//! 每个字段两侧的空白会被忽略; 字符串字段直接借用输入行, 不做拷贝。

use core::str::Split;

use crate::config::{MAX_TEXT_FIELD_LEN, MAX_WORD_LEN};
use crate::error::FrontError;
use crate::graphics::Point;

/// 解析后的指令, 参数尚未校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Command<'a> {
    /// lijn,x,y,x2,y2,kleur,dikte
    Line {
        x: i32,
        y: i32,
        x2: i32,
        y2: i32,
        color: &'a str,
        thickness: i32,
    },
    /// rechthoek,x,y,breedte,hoogte,kleur,gevuld
    Rectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: &'a str,
        filled: i32,
    },
    /// tekst,x,y,kleur,tekst,fontnaam,fontgrootte,fontstijl
    Text {
        x: i32,
        y: i32,
        color: &'a str,
        text: &'a str,
        font: &'a str,
        size: i32,
        style: &'a str,
    },
    /// bitmap,nr,x,y
    Bitmap { id: i32, x: i32, y: i32 },
    /// clearscherm,kleur
    Clear { color: &'a str },
    /// wacht,msecs
    Wait { msecs: i32 },
    /// herhaal,aantal,hoevaak
    Repeat { count: i32, times: i32 },
    /// cirkel,x,y,radius,kleur
    Circle {
        x: i32,
        y: i32,
        radius: i32,
        color: &'a str,
    },
    /// figuur,x1,y1,...,x5,y5,kleur
    Figure { points: [Point; 5], color: &'a str },
}

/// 解析一行指令
/// 行尾的 '\r'、'\n' 会被忽略
pub fn parse(line: &str) -> Result<Command<'_>, FrontError> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    if line.trim().is_empty() {
        return Err(FrontError::EmptyInput);
    }

    let mut fields = Fields::new(line);
    let keyword = fields.keyword()?;

    let command = match keyword {
        "lijn" => Command::Line {
            x: fields.int()?,
            y: fields.int()?,
            x2: fields.int()?,
            y2: fields.int()?,
            color: fields.word()?,
            thickness: fields.int()?,
        },
        "rechthoek" => Command::Rectangle {
            x: fields.int()?,
            y: fields.int()?,
            width: fields.int()?,
            height: fields.int()?,
            color: fields.word()?,
            filled: fields.int()?,
        },
        "tekst" => Command::Text {
            x: fields.int()?,
            y: fields.int()?,
            color: fields.word()?,
            text: fields.text()?,
            font: fields.word()?,
            size: fields.int()?,
            style: fields.word()?,
        },
        "bitmap" => Command::Bitmap {
            id: fields.int()?,
            x: fields.int()?,
            y: fields.int()?,
        },
        "clearscherm" => Command::Clear {
            color: fields.word()?,
        },
        "wacht" => Command::Wait {
            msecs: fields.int()?,
        },
        "herhaal" => Command::Repeat {
            count: fields.int()?,
            times: fields.int()?,
        },
        "cirkel" => Command::Circle {
            x: fields.int()?,
            y: fields.int()?,
            radius: fields.int()?,
            color: fields.word()?,
        },
        "figuur" => {
            let mut points = [Point::default(); 5];
            for point in points.iter_mut() {
                point.x = fields.int()?;
                point.y = fields.int()?;
            }
            Command::Figure {
                points,
                color: fields.word()?,
            }
        }
        _ => return Err(FrontError::UnknownCommand),
    };

    fields.finish()?;
    Ok(command)
}

/// 逗号分隔的字段
struct Fields<'a> {
    inner: Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Fields {
            inner: line.split(','),
        }
    }

    fn next(&mut self) -> Result<&'a str, FrontError> {
        self.inner
            .next()
            .map(str::trim)
            .ok_or(FrontError::Parse)
    }

    /// 指令名称
    fn keyword(&mut self) -> Result<&'a str, FrontError> {
        self.next()
    }

    /// 整数字段
    fn int(&mut self) -> Result<i32, FrontError> {
        self.next()?.parse().map_err(|_| FrontError::Parse)
    }

    /// 单词字段: 颜色、字体名称、字体样式
    fn word(&mut self) -> Result<&'a str, FrontError> {
        let word = self.next()?;
        if word.is_empty() || word.len() > MAX_WORD_LEN || word.contains(char::is_whitespace) {
            return Err(FrontError::Parse);
        }
        Ok(word)
    }

    /// 文字内容字段, 可以包含空格
    fn text(&mut self) -> Result<&'a str, FrontError> {
        let text = self.next()?;
        if text.is_empty() || text.len() > MAX_TEXT_FIELD_LEN {
            return Err(FrontError::Parse);
        }
        Ok(text)
    }

    /// 不允许多余的字段
    fn finish(mut self) -> Result<(), FrontError> {
        match self.inner.next() {
            Some(_) => Err(FrontError::Parse),
            None => Ok(()),
        }
    }
}
