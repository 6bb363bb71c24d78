//! 串行接口常用工具集

use core::convert::Infallible;
use core::mem;

use embedded_hal::serial::{Read, Write};
use heapless::{String, Vec};
use nb::block;

use crate::config::MAX_LINE_LEN;
use crate::error::FrontError;

/// 发送字节
pub fn send_byte<TX>(tx: &mut TX, word: u8) -> Result<(), Infallible>
where
    TX: Write<u8, Error = Infallible>,
{
    block!(tx.write(word))
}

/// 发送字节数组
/// 结束发送标识符: '\0'
pub fn send_bytes<TX>(tx: &mut TX, words: &[u8]) -> Result<(), Infallible>
where
    TX: Write<u8, Error = Infallible>,
{
    for word in words {
        if *word == b'\0' {
            break;
        }
        send_byte(tx, *word)?;
    }
    Ok(())
}

/// 发送字符串
pub fn send_string<TX>(tx: &mut TX, words: &str) -> Result<(), Infallible>
where
    TX: Write<u8, Error = Infallible>,
{
    send_bytes(tx, words.as_bytes())
}

/// 发送一行, 以 "\r\n" 结尾
pub fn send_line<TX>(tx: &mut TX, words: &str) -> Result<(), Infallible>
where
    TX: Write<u8, Error = Infallible>,
{
    send_string(tx, words)?;
    send_bytes(tx, b"\r\n")?;
    block!(tx.flush())
}

/// 发送数字
pub fn send_number<TX>(tx: &mut TX, number: u32) -> Result<(), Infallible>
where
    TX: Write<u8, Error = Infallible>,
{
    let mut digits = [0u8; 10];
    let mut length = 0;
    let mut rest = number;
    loop {
        digits[length] = b'0' + (rest % 10) as u8;
        length += 1;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    for digit in digits[..length].iter().rev() {
        send_byte(tx, *digit)?;
    }
    Ok(())
}

/// 接收字节, 不阻塞
pub fn recv_byte<RX>(rx: &mut RX) -> nb::Result<u8, RX::Error>
where
    RX: Read<u8>,
{
    rx.read()
}

/// 指令行缓冲
///
/// 逐字节拼接串口数据, 遇到 '\r' 或 '\n' 返回一整行。
/// 空行被跳过 ("\r\n" 只产生一行); 超长的行在行尾报告一次 [`FrontError::LineTooLong`]。
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8, MAX_LINE_LEN>,
    overflow: bool,
}

impl LineBuffer {
    pub const fn new() -> Self {
        LineBuffer {
            buf: Vec::new(),
            overflow: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// 输入一个字节
    /// 返回 Some 表示一行结束
    pub fn push(&mut self, byte: u8) -> Option<Result<String<MAX_LINE_LEN>, FrontError>> {
        match byte {
            b'\r' | b'\n' => {
                if mem::take(&mut self.overflow) {
                    self.buf.clear();
                    return Some(Err(FrontError::LineTooLong));
                }
                if self.buf.is_empty() {
                    return None;
                }
                let line = mem::take(&mut self.buf);
                Some(String::from_utf8(line).map_err(|_| FrontError::InvalidUtf8))
            }
            _ => {
                if self.buf.push(byte).is_err() {
                    self.overflow = true;
                }
                None
            }
        }
    }
}
