//! # VGA 信号输出
//!
//! 320x240 像素, 8 位颜色 (R3G3B2), 每个帧缓冲行输出两次。
//!
//! - PE8-PE15: 颜色数据, DMA2 Stream5 Channel6 把一行写入 GPIOE ODR 高字节
//! - PB11: HSync, TIM2_CH4 输出
//! - PB12: VSync, 在行同步中断中翻转
//!
//! 行同步中断 ([`Scanout::on_hsync`]) 启动一行的 DMA 传输,
//! 传输完成中断 ([`Scanout::on_line_complete`]) 停止像素时钟并把数据线拉低。

use stm32f4xx_hal::{
    gpio::{Alternate, ErasedPin, Output, PinState, PushPull, Speed, PB11, PB12},
    gpio::{PE10, PE11, PE12, PE13, PE14, PE15, PE8, PE9},
    pac::{self, DMA2, TIM1, TIM2},
};

use super::timer;
use crate::graphics::{HEIGHT, STRIDE};

/// 一帧的总行数
pub const VSYNC_PERIOD: u16 = 525;
/// VSync 脉冲行数
pub const VSYNC_PULSE: u16 = 2;
/// 第一个可见行
pub const VISIBLE_START: u16 = 36;
/// 最后一个可见行
pub const VISIBLE_STOP: u16 = 514;

/// GPIOE ODR 高字节地址 (PE8-PE15)
const GPIOE_ODR_HIGH_BYTE: u32 = 0x4002_1000 + 0x14 + 0x01;
/// BSRR 中复位 PE8-PE15 的位
const COLOR_LINES_RESET: u32 = 0xFF00 << 16;

/// DMA 流编号
const STREAM: usize = 5;
// CR: CHSEL = 6, PL = 非常高, MINC, DIR = 存储器到外设, TCIE
const DMA_CR_CONFIG: u32 = (6 << 25) | (0b11 << 16) | (1 << 10) | (0b01 << 6) | (1 << 4);
const DMA_CR_EN: u32 = 1;

/// 一行扫描需要做的事
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct LineAction {
    /// VSync 脉冲期间 (低电平)
    pub vsync_active: bool,
    /// 需要输出的帧缓冲行地址, 消隐行为 None
    pub dma_source: Option<u32>,
}

/// 行计数器
/// 统计 HSync 行数, 计算每行对应的帧缓冲地址
#[derive(Debug, Clone, Copy)]
pub struct LineCounter {
    line: u16,
    address: u32,
    base: u32,
}

impl LineCounter {
    /// base: 帧缓冲起始地址
    pub const fn new(base: u32) -> Self {
        LineCounter {
            line: 0,
            address: base,
            base,
        }
    }

    /// 当前行号
    pub fn line(&self) -> u16 {
        self.line
    }

    /// 进入下一行
    pub fn advance(&mut self) -> LineAction {
        self.line += 1;
        if self.line >= VSYNC_PERIOD {
            self.line = 0;
            self.address = self.base;
        }

        let vsync_active = self.line < VSYNC_PULSE;

        let dma_source = if (VISIBLE_START..=VISIBLE_STOP).contains(&self.line) {
            let source = self.address;
            // 每个帧缓冲行显示两次, 奇数行之后才前进
            if self.line & 0x01 != 0 {
                self.address += STRIDE as u32;
            }
            Some(source)
        } else {
            None
        };

        LineAction {
            vsync_active,
            dma_source,
        }
    }
}

/// 引脚与外设
pub struct Config {
    pub pe8: PE8,
    pub pe9: PE9,
    pub pe10: PE10,
    pub pe11: PE11,
    pub pe12: PE12,
    pub pe13: PE13,
    pub pe14: PE14,
    pub pe15: PE15,
    pub pb11: PB11,
    pub pb12: PB12,
    pub tim1: TIM1,
    pub tim2: TIM2,
    pub dma2: DMA2,
    /// 帧缓冲起始地址
    pub framebuffer: u32,
}

/// VGA 扫描输出
pub struct Scanout {
    tim1: TIM1,
    tim2: TIM2,
    dma2: DMA2,
    vsync: PB12<Output<PushPull>>,
    _hsync: PB11<Alternate<1>>,
    _color: [ErasedPin<Output<PushPull>>; 8],
    lines: LineCounter,
}

impl Scanout {
    /// 初始化 GPIO、定时器与 DMA, 并开始输出 VGA 信号
    pub fn new(config: Config) -> Self {
        enable_clocks();

        // 颜色数据线, 初始为低电平
        let mut color = [
            config.pe8.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe9.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe10.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe11.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe12.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe13.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe14.into_push_pull_output().speed(Speed::VeryHigh).erase(),
            config.pe15.into_push_pull_output().speed(Speed::VeryHigh).erase(),
        ];
        for pin in color.iter_mut() {
            pin.set_low();
        }

        // HSync: TIM2_CH4 复用功能
        let hsync = config
            .pb11
            .into_alternate::<1>()
            .internal_pull_up(true)
            .speed(Speed::VeryHigh);

        // VSync: 普通输出, 默认高电平
        let vsync = config
            .pb12
            .into_push_pull_output_in_state(PinState::High)
            .speed(Speed::VeryHigh);

        let scanout = Scanout {
            tim1: config.tim1,
            tim2: config.tim2,
            dma2: config.dma2,
            vsync,
            _hsync: hsync,
            _color: color,
            lines: LineCounter::new(config.framebuffer),
        };

        timer::init_pixel_timer(&scanout.tim1);
        scanout.init_dma(config.framebuffer);
        timer::init_hsync_timer(&scanout.tim2);

        defmt::info!(
            "vga scanout started, framebuffer at {=u32:#x}",
            config.framebuffer
        );
        scanout
    }

    /// 配置 DMA2 Stream5, 暂不使能
    fn init_dma(&self, framebuffer: u32) {
        let stream = &self.dma2.st[STREAM];

        stream.cr.reset();
        while stream.cr.read().en().bit_is_set() {}

        stream.par.write(|w| unsafe { w.bits(GPIOE_ODR_HIGH_BYTE) });
        stream.m0ar.write(|w| unsafe { w.bits(framebuffer) });
        stream.ndtr.write(|w| unsafe { w.bits(STRIDE as u32) });
        // 直接模式, 不使用 FIFO
        stream.fcr.reset();
        stream.cr.write(|w| unsafe { w.bits(DMA_CR_CONFIG) });
    }

    /// 行同步中断 (TIM2 CC3)
    pub fn on_hsync(&mut self) {
        timer::clear_line_trigger(&self.tim2);

        let action = self.lines.advance();
        if action.vsync_active {
            self.vsync.set_low();
        } else {
            self.vsync.set_high();
        }

        if let Some(source) = action.dma_source {
            let stream = &self.dma2.st[STREAM];
            stream.cr.write(|w| unsafe { w.bits(DMA_CR_CONFIG) });
            stream.ndtr.write(|w| unsafe { w.bits(STRIDE as u32) });
            stream.m0ar.write(|w| unsafe { w.bits(source) });
            timer::start_pixel_clock(&self.tim1);
            stream.cr.write(|w| unsafe { w.bits(DMA_CR_CONFIG | DMA_CR_EN) });
        }
    }

    /// DMA 传输完成中断 (DMA2 Stream5)
    pub fn on_line_complete(&mut self) {
        if self.dma2.hisr.read().tcif5().bit_is_clear() {
            return;
        }
        self.dma2.hifcr.write(|w| w.ctcif5().set_bit());

        timer::stop_pixel_clock(&self.tim1);
        self.dma2.st[STREAM].cr.reset();

        // 行消隐期间数据线输出黑色
        // SAFETY: BSRR 写操作是原子的, 只影响 PE8-PE15, 这些引脚归本结构体所有
        unsafe {
            (*pac::GPIOE::ptr())
                .bsrr
                .write(|w| w.bits(COLOR_LINES_RESET));
        }
    }
}

/// 使能 TIM1、TIM2、DMA2 时钟
fn enable_clocks() {
    // SAFETY: 只修改本模块使用的外设的使能位
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb2enr.modify(|_, w| w.tim1en().set_bit());
    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());
    rcc.ahb1enr.modify(|_, w| w.dma2en().set_bit());
}

/// 帧缓冲中第 row 行的地址, 用于校验扫描地址
pub const fn row_address(base: u32, row: u16) -> u32 {
    base + row as u32 * STRIDE as u32
}

/// 一帧中可见的帧缓冲行数
pub const VISIBLE_ROWS: u16 = HEIGHT as u16;
