#![no_std]
#![no_main]

pub mod color;
pub mod config;
pub mod demo;
pub mod error;
pub mod front;
pub mod graphics;
pub mod hardware;
pub mod logic;

pub use color::Color;

use defmt_rtt as _;
// global logger
use panic_probe as _;
// adjust HAL import
// memory layout
use stm32f4xx_hal as _;

// 引脚校验
// 备注*的引脚尽量不替换
#[allow(unused)]
enum _Pin {
    // VGA 颜色数据, GPIOE ODR 高字节
    PE8,  // *
    PE9,  // *
    PE10, // *
    PE11, // *
    PE12, // *
    PE13, // *
    PE14, // *
    PE15, // *

    // VGA 同步信号
    PB11, // * TIM2_CH4
    PB12,

    // USART 串口
    PA2, // *
    PA3, // *

    // 不可使用引脚, 调试接口
    PA13,
    PA14,
}
