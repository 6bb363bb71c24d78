//! USART2 指令串口
mod utils;

use stm32f4xx_hal::{
    gpio::{PA2, PA3},
    pac::USART2,
    prelude::*,
    rcc::Clocks,
    serial::{
        config::{Config, InvalidConfig, StopBits},
        Event, Rx, Serial, Tx,
    },
    Listen,
};

use crate::config::USART2_BAUDRATE;

pub use utils::*;

/// USART 串口
pub struct Usart {
    pub tx: Tx<USART2>,
    pub rx: Rx<USART2>,
}

impl Usart {
    /// 初始化 USART2 串口, 并使能接收中断
    /// 固定引脚: PA2 (TX)、PA3 (RX)
    /// 115200 8N1
    pub fn new(pa2: PA2, pa3: PA3, usart2: USART2, clocks: &Clocks) -> Result<Self, InvalidConfig> {
        let tx = pa2.into_alternate();
        let rx = pa3.into_alternate();

        let mut serial: Serial<USART2> = Serial::new(
            usart2,
            (tx, rx),
            Config::default()
                .baudrate(USART2_BAUDRATE.bps())
                .wordlength_8()
                .stopbits(StopBits::STOP1)
                .parity_none(),
            clocks,
        )?;

        // 接收中断, 每个字节触发一次
        serial.listen(Event::RxNotEmpty);
        let (tx, rx) = serial.split();

        Ok(Usart { tx, rx })
    }
}
