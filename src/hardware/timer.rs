//! 定时器
//!
//! TIM1: 像素时钟, 每个更新事件向 DMA2 Stream5 请求一个字节;
//! TIM2: 行同步, CH4 在 PB11 输出 HSync 脉冲, CH3 比较中断启动每一行的 DMA 传输。
//!
//! 168MHz 系统时钟下 TIM1 计数时钟为 168MHz, TIM2 为 84MHz。

use stm32f4xx_hal::pac::{TIM1, TIM2};

/// TIM1 自动重装值 (像素时钟)
pub const PIXEL_TIMER_PERIOD: u32 = 10 - 1;
/// TIM1 预分频
pub const PIXEL_TIMER_PRESCALER: u32 = 0;

/// TIM2 自动重装值 (一行的周期)
pub const HSYNC_PERIOD: u32 = 2002 - 1;
/// TIM2 预分频
pub const HSYNC_PRESCALER: u32 = 0;
/// HSync 脉冲宽度
pub const HSYNC_PULSE: u32 = 240;
/// 行内图像开始的位置
pub const HTRIGGER_START: u32 = 480;
/// 从比较中断到 DMA 输出第一个像素的延迟补偿
pub const DMA_DELAY: u32 = 200;

// CCMR2: OC3M = OC4M = PWM 模式 1, 使能预装载
const CCMR2_PWM1_PRELOAD: u32 = (0b110 << 4) | (1 << 3) | (0b110 << 12) | (1 << 11);
// CCER: CC3/CC4 输出使能, 低电平有效
const CCER_CH3_CH4_ACTIVE_LOW: u32 = (1 << 8) | (1 << 9) | (1 << 12) | (1 << 13);

/// 初始化像素时钟
/// 配置后保持停止, 由行同步中断逐行启动
pub fn init_pixel_timer(tim1: &TIM1) {
    tim1.cr1.reset();
    tim1.psc.write(|w| unsafe { w.bits(PIXEL_TIMER_PRESCALER) });
    tim1.arr.write(|w| unsafe { w.bits(PIXEL_TIMER_PERIOD) });
    tim1.cr1.modify(|_, w| w.arpe().set_bit());
    // 装载预分频值, 此时尚未使能 DMA 请求
    tim1.egr.write(|w| w.ug().set_bit());
    // 更新事件触发 DMA 请求
    tim1.dier.modify(|_, w| w.ude().set_bit());
}

/// 启动像素时钟
#[inline(always)]
pub fn start_pixel_clock(tim1: &TIM1) {
    tim1.cr1.modify(|_, w| w.cen().set_bit());
}

/// 停止像素时钟
#[inline(always)]
pub fn stop_pixel_clock(tim1: &TIM1) {
    tim1.cr1.modify(|_, w| w.cen().clear_bit());
}

/// 初始化行同步定时器并启动
pub fn init_hsync_timer(tim2: &TIM2) {
    tim2.cr1.reset();
    tim2.psc.write(|w| unsafe { w.bits(HSYNC_PRESCALER) });
    tim2.arr.write(|w| unsafe { w.bits(HSYNC_PERIOD) });

    // CH3: 行触发, CH4: HSync
    tim2.ccmr2_output()
        .write(|w| unsafe { w.bits(CCMR2_PWM1_PRELOAD) });
    tim2.ccr[2].write(|w| unsafe { w.bits(HTRIGGER_START - DMA_DELAY) });
    tim2.ccr[3].write(|w| unsafe { w.bits(HSYNC_PULSE) });
    tim2.ccer.write(|w| unsafe { w.bits(CCER_CH3_CH4_ACTIVE_LOW) });

    tim2.cr1.modify(|_, w| w.arpe().set_bit());
    tim2.egr.write(|w| w.ug().set_bit());
    tim2.sr.reset();

    // CH3 比较中断
    tim2.dier.modify(|_, w| w.cc3ie().set_bit());
    tim2.cr1.modify(|_, w| w.cen().set_bit());
}

/// 清除行触发中断标志
#[inline(always)]
pub fn clear_line_trigger(tim2: &TIM2) {
    tim2.sr.modify(|_, w| w.cc3if().clear_bit());
}
