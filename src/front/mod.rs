//! # 前端
//!
//! 串口文本指令的解析, 以及单行指令的完整处理流程:
//! 解析 -> 逻辑层校验执行 -> 生成应答。

mod parser;

use embedded_hal::blocking::delay::DelayMs;

use crate::config::RESPONSE_OK;
use crate::error::Error;
use crate::graphics::Canvas;
use crate::logic::Interpreter;

pub use parser::{parse, Command};

/// 处理一行指令
pub fn handle_line<D>(
    interpreter: &mut Interpreter<D>,
    canvas: &mut Canvas,
    line: &str,
) -> Result<(), Error>
where
    D: DelayMs<u32>,
{
    let command = parse(line)?;
    interpreter.execute(canvas, &command)
}

/// 处理结果对应的应答文本
pub fn response(result: &Result<(), Error>) -> &'static str {
    match result {
        Ok(()) => RESPONSE_OK,
        Err(e) => e.message(),
    }
}
