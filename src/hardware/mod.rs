//! 外设驱动
pub mod timer;
pub mod usart;
pub mod vga;
