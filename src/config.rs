//! 全局配置

/// 外部晶振频率
pub const HSE_HZ: u32 = 8_000_000;
/// 系统时钟频率
pub const SYSCLK_HZ: u32 = 168_000_000;
/// APB1 总线频率, TIM2 时钟为其两倍
pub const PCLK1_HZ: u32 = 42_000_000;
/// APB2 总线频率, TIM1 时钟为其两倍
pub const PCLK2_HZ: u32 = 84_000_000;

/// USART2 波特率
pub const USART2_BAUDRATE: u32 = 115200;

/// 串口接收队列容量
pub const UART_RX_CAPACITY: usize = 128;

/// 单条指令的最大长度
pub const MAX_LINE_LEN: usize = 200;

/// 颜色、字体名称、字体样式等字段的最大长度
pub const MAX_WORD_LEN: usize = 19;

/// 文字内容字段的最大长度 (解析层)
pub const MAX_TEXT_FIELD_LEN: usize = 199;

/// 可绘制文字的最大长度
pub const MAX_TEXT_LEN: usize = 100;

/// 历史记录深度, 即 herhaal 最多能回放的指令数
pub const HISTORY_DEPTH: usize = 20;

/// herhaal 最多的重复次数
pub const MAX_REPEAT_COUNT: i32 = 100;

/// 上电后是否显示功能演示画面
pub const BOOT_DEMO_ENABLED: bool = true;

/// 指令执行成功的应答
pub const RESPONSE_OK: &str = "OK uitgevoerd!";

/// 处理完一行后的就绪提示
pub const RESPONSE_READY: &str = "UART Ready!!!";
