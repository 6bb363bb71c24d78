//! 错误类型
//!
//! 三层各自的错误, 以及通过串口回传给终端的提示文本。

use crate::graphics::DrawError;

/// 前端 (接收与解析) 错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum FrontError {
    /// 空指令
    EmptyInput,
    /// 参数个数或格式错误
    Parse,
    /// 未知指令
    UnknownCommand,
    /// 指令超过行缓冲长度
    LineTooLong,
    /// 非 UTF-8 字符
    InvalidUtf8,
}

/// 逻辑层 (参数校验) 错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LogicError {
    InvalidParam,
    OutOfBounds,
    InvalidColor,
    InvalidThickness,
    InvalidSize,
    InvalidFilled,
    InvalidFontName,
    InvalidFontSize,
    InvalidFontStyle,
    TextTooLong,
    TooManyRepeats,
}

/// 指令处理过程中的错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    Front(FrontError),
    Logic(LogicError),
    Vga(DrawError),
}

impl Error {
    /// 回传给终端的错误提示
    pub fn message(&self) -> &'static str {
        match self {
            Error::Front(e) => match e {
                FrontError::EmptyInput => "FRONT ERROR: lege input",
                FrontError::Parse => "FRONT ERROR: parser fout",
                FrontError::UnknownCommand => "FRONT ERROR: onbekend commando",
                FrontError::LineTooLong => "FRONT ERROR: regel te lang",
                FrontError::InvalidUtf8 => "FRONT ERROR: ongeldige tekens",
            },
            Error::Logic(e) => match e {
                LogicError::InvalidParam => "LOGIC ERROR: ongeldig parameter",
                LogicError::OutOfBounds => "LOGIC ERROR: coördinaten buiten scherm",
                LogicError::InvalidColor => "LOGIC ERROR: ongeldig kleur",
                LogicError::InvalidThickness => "LOGIC ERROR: ongeldig dikte",
                LogicError::InvalidSize => "LOGIC ERROR: ongeldige afmetingen",
                LogicError::InvalidFilled => "LOGIC ERROR: ongeldig gevuld veld",
                LogicError::InvalidFontName => "LOGIC ERROR: ongeldige fontnaam",
                LogicError::InvalidFontSize => "LOGIC ERROR: ongeldige fontgrootte",
                LogicError::InvalidFontStyle => "LOGIC ERROR: ongeldig fontstijl",
                LogicError::TextTooLong => "LOGIC ERROR: tekst te lang",
                LogicError::TooManyRepeats => "LOGIC ERROR: te veel herhalingen",
            },
            Error::Vga(e) => match e {
                DrawError::InvalidCoordinate => "IO ERROR: VGA ongeldig coördinaat",
                DrawError::InvalidParameter => "IO ERROR: VGA ongeldig parameter",
            },
        }
    }
}

impl From<FrontError> for Error {
    fn from(e: FrontError) -> Self {
        Error::Front(e)
    }
}

impl From<LogicError> for Error {
    fn from(e: LogicError) -> Self {
        Error::Logic(e)
    }
}

impl From<DrawError> for Error {
    fn from(e: DrawError) -> Self {
        Error::Vga(e)
    }
}
