#![no_std]
#![no_main]

use stm32f407_vga_link::{
    config::{
        BOOT_DEMO_ENABLED, HSE_HZ, PCLK1_HZ, PCLK2_HZ, RESPONSE_READY, SYSCLK_HZ,
        UART_RX_CAPACITY,
    },
    demo,
    error::Error,
    front,
    graphics::{Canvas, FrameBuffer, FRAMEBUFFER_SIZE},
    hardware::{
        usart::{self, LineBuffer, Usart},
        vga::{self, Scanout},
    },
    logic::Interpreter,
};

use cortex_m::asm::wfi;
use defmt::println;
use rtic_sync::{
    channel::{Receiver, Sender},
    make_channel,
};
use stm32f4xx_hal::{
    pac::USART2,
    prelude::*,
    serial::{Rx, Tx},
    timer::{SysDelay, SysTimerExt},
};
use unwrap_infallible::UnwrapInfallible;

// 定义应用程序资源和任务
#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true, dispatchers = [EXTI1])]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        #[lock_free]
        scanout: Scanout,
    }

    #[local]
    struct Local {
        rx: Rx<USART2>,
        tx: Tx<USART2>,
        canvas: Canvas<'static>,
        interpreter: Interpreter<SysDelay>,
        bytes_sender: Sender<'static, u8, UART_RX_CAPACITY>,
    }

    // 初始化函数
    #[init(local = [framebuffer: FrameBuffer = [0; FRAMEBUFFER_SIZE]])]
    fn init(ctx: init::Context) -> (Shared, Local) {
        println!("init start ...");

        // 初始化时钟
        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(HSE_HZ.Hz())
            .sysclk(SYSCLK_HZ.Hz())
            .pclk1(PCLK1_HZ.Hz())
            .pclk2(PCLK2_HZ.Hz())
            .freeze();
        // SysTick 阻塞延时, 供 wacht 指令使用
        let delay = ctx.core.SYST.delay(&clocks);

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();
        let gpioe = ctx.device.GPIOE.split();

        // 帧缓冲地址在创建画布之前取得, 之后由 DMA 只读访问
        let framebuffer = ctx.local.framebuffer;
        let address = framebuffer.as_ptr() as u32;
        let mut canvas = Canvas::new(framebuffer);

        if BOOT_DEMO_ENABLED {
            if let Err(e) = demo::run_feature_demo(&mut canvas) {
                defmt::warn!("feature demo failed: {}", e);
            }
        }

        // 初始化 VGA 输出
        let scanout = Scanout::new(vga::Config {
            pe8: gpioe.pe8,
            pe9: gpioe.pe9,
            pe10: gpioe.pe10,
            pe11: gpioe.pe11,
            pe12: gpioe.pe12,
            pe13: gpioe.pe13,
            pe14: gpioe.pe14,
            pe15: gpioe.pe15,
            pb11: gpiob.pb11,
            pb12: gpiob.pb12,
            tim1: ctx.device.TIM1,
            tim2: ctx.device.TIM2,
            dma2: ctx.device.DMA2,
            framebuffer: address,
        });

        // 初始化 USART 串口
        let Usart { tx, rx } = Usart::new(gpioa.pa2, gpioa.pa3, ctx.device.USART2, &clocks)
            .unwrap_or_else(|_| defmt::panic!("invalid usart2 config"));

        // 串口字节传递
        let (bytes_sender, bytes_receiver) = make_channel!(u8, UART_RX_CAPACITY);
        if command_handler::spawn(bytes_receiver).is_err() {
            defmt::panic!("command handler already spawned");
        }

        println!("init end ...");
        (
            Shared { scanout },
            Local {
                rx,
                tx,
                canvas,
                interpreter: Interpreter::new(delay),
                bytes_sender,
            },
        )
    }

    /// 行同步中断, 启动一行的 DMA 传输
    #[task(binds = TIM2, priority = 3, shared = [scanout])]
    fn hsync(ctx: hsync::Context) {
        ctx.shared.scanout.on_hsync();
    }

    /// 一行传输完成
    #[task(binds = DMA2_STREAM5, priority = 3, shared = [scanout])]
    fn line_complete(ctx: line_complete::Context) {
        ctx.shared.scanout.on_line_complete();
    }

    /// 串口接收中断, 字节送入通道
    #[task(binds = USART2, priority = 2, local = [rx, bytes_sender])]
    fn usart2_rx(ctx: usart2_rx::Context) {
        match usart::recv_byte(ctx.local.rx) {
            Ok(byte) => {
                if ctx.local.bytes_sender.try_send(byte).is_err() {
                    defmt::warn!("rx channel full, byte dropped");
                }
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => {
                defmt::warn!("usart2 rx error: {}", defmt::Debug2Format(&e));
            }
        }
    }

    /// 指令处理
    /// 拼接整行, 解析执行后回传应答
    #[task(priority = 1, local = [canvas, interpreter, tx])]
    async fn command_handler(
        ctx: command_handler::Context,
        mut receiver: Receiver<'static, u8, UART_RX_CAPACITY>,
    ) {
        let canvas = ctx.local.canvas;
        let interpreter = ctx.local.interpreter;
        let tx = ctx.local.tx;

        let mut line_buffer = LineBuffer::new();

        usart::send_line(tx, RESPONSE_READY).unwrap_infallible();

        while let Ok(byte) = receiver.recv().await {
            let Some(line) = line_buffer.push(byte) else {
                continue;
            };

            let result = line
                .map_err(Error::from)
                .and_then(|line| front::handle_line(interpreter, canvas, &line));
            if let Err(e) = result {
                defmt::warn!("command failed: {}", e);
            }

            usart::send_line(tx, front::response(&result)).unwrap_infallible();
            usart::send_line(tx, RESPONSE_READY).unwrap_infallible();
        }
    }

    /// 任务处理
    #[idle]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            wfi();
        }
    }
}
