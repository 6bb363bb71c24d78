#![no_std]
#![no_main]

use core::ptr::addr_of_mut;

use stm32f407_vga_link as _; // global logger + panicking-behavior + memory layout
use stm32f407_vga_link::graphics::FrameBuffer;

static mut FRAMEBUFFER: FrameBuffer = [0; stm32f407_vga_link::graphics::FRAMEBUFFER_SIZE];

pub struct State {
    buffer: &'static mut FrameBuffer,
}

#[defmt_test::tests]
mod tests {
    use super::*;

    use defmt::{assert, assert_eq};
    use stm32f407_vga_link::graphics::bitmaps::{BitmapId, TRANSPARENT};
    use stm32f407_vga_link::graphics::{
        Canvas, DrawError, Rect, TextStyle, HEIGHT, STRIDE, WIDTH,
    };
    use stm32f407_vga_link::hardware::vga::{
        row_address, LineCounter, VISIBLE_ROWS, VISIBLE_START, VISIBLE_STOP, VSYNC_PERIOD,
    };
    use stm32f407_vga_link::Color;

    #[init]
    fn init() -> State {
        // SAFETY: 测试串行执行, 只在这里取得一次可变引用
        let buffer = unsafe { &mut *addr_of_mut!(FRAMEBUFFER) };
        State { buffer }
    }

    #[test]
    fn new_canvas_is_black(state: &mut State) {
        state.buffer.fill(0xAA);
        let canvas = Canvas::new(state.buffer);
        assert_eq!(canvas.clip_rect(), Rect::screen());
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(WIDTH - 1, HEIGHT - 1), Some(Color::BLACK));
        assert_eq!(canvas.pixel(WIDTH, 0), None);
    }

    #[test]
    fn fill_screen_keeps_blank_column(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.fill_screen(Color::WHITE);
        assert_eq!(canvas.pixel(WIDTH - 1, 0), Some(Color::WHITE));
        drop(canvas);

        for row in 0..HEIGHT as usize {
            assert_eq!(state.buffer[row * STRIDE + STRIDE - 1], 0);
        }
    }

    #[test]
    fn set_pixel_bounds(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.set_pixel(5, 7, Color::RED).unwrap();
        assert_eq!(canvas.pixel(5, 7), Some(Color::RED));
        assert_eq!(canvas.set_pixel(-1, 0, Color::RED), Err(DrawError::InvalidCoordinate));
        assert_eq!(canvas.set_pixel(0, HEIGHT, Color::RED), Err(DrawError::InvalidCoordinate));
    }

    #[test]
    fn rectangle_outline_and_fill(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.draw_rectangle(10, 10, 5, 5, Color::GREEN).unwrap();
        assert_eq!(canvas.pixel(10, 10), Some(Color::GREEN));
        assert_eq!(canvas.pixel(14, 14), Some(Color::GREEN));
        assert_eq!(canvas.pixel(10, 12), Some(Color::GREEN));
        assert_eq!(canvas.pixel(12, 12), Some(Color::BLACK));
        assert_eq!(canvas.pixel(15, 10), Some(Color::BLACK));

        canvas.fill_rectangle(20, 20, 3, 2, Color::BLUE).unwrap();
        assert_eq!(canvas.pixel(21, 21), Some(Color::BLUE));
        assert_eq!(canvas.pixel(23, 21), Some(Color::BLACK));
        assert_eq!(canvas.pixel(21, 22), Some(Color::BLACK));

        assert_eq!(
            canvas.fill_rectangle(0, 0, 0, 5, Color::BLUE),
            Err(DrawError::InvalidParameter)
        );
    }

    #[test]
    fn lines(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.draw_line(0, 0, 9, 9, Color::WHITE, 1).unwrap();
        for i in 0..10 {
            assert_eq!(canvas.pixel(i, i), Some(Color::WHITE));
        }
        assert_eq!(canvas.pixel(1, 0), Some(Color::BLACK));

        // 粗线覆盖路径两侧
        canvas.draw_line(50, 50, 100, 50, Color::RED, 4).unwrap();
        assert_eq!(canvas.pixel(75, 48), Some(Color::RED));
        assert_eq!(canvas.pixel(75, 52), Some(Color::RED));
        assert_eq!(canvas.pixel(75, 54), Some(Color::BLACK));

        assert_eq!(
            canvas.draw_line(0, 0, 1, 1, Color::RED, 0),
            Err(DrawError::InvalidParameter)
        );
    }

    #[test]
    fn clipping(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.set_clip_rect(Some(Rect::new(10, 10, 10, 10)));
        canvas.fill_rectangle(0, 0, WIDTH, HEIGHT, Color::YELLOW).unwrap();
        assert_eq!(canvas.pixel(10, 10), Some(Color::YELLOW));
        assert_eq!(canvas.pixel(19, 19), Some(Color::YELLOW));
        assert_eq!(canvas.pixel(9, 10), Some(Color::BLACK));
        assert_eq!(canvas.pixel(20, 19), Some(Color::BLACK));

        // 裁剪区域之外的像素被忽略, 不是错误
        assert_eq!(canvas.set_pixel(0, 0, Color::RED), Ok(()));
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));

        canvas.set_clip_rect(Some(Rect::new(-5, 230, 20, 20)));
        assert_eq!(canvas.clip_rect(), Rect::new(0, 230, 20, 10));

        canvas.set_clip_rect(Some(Rect::new(310, 5, -4, 50)));
        assert_eq!(canvas.clip_rect(), Rect::new(310, 5, 0, 50));

        canvas.set_clip_rect(None);
        assert_eq!(canvas.clip_rect(), Rect::screen());
    }

    #[test]
    fn circles(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.draw_circle(50, 50, 10, Color::CYAN).unwrap();
        assert_eq!(canvas.pixel(60, 50), Some(Color::CYAN));
        assert_eq!(canvas.pixel(50, 40), Some(Color::CYAN));
        assert_eq!(canvas.pixel(40, 50), Some(Color::CYAN));
        assert_eq!(canvas.pixel(50, 50), Some(Color::BLACK));

        canvas.fill_circle(100, 100, 5, Color::MAGENTA).unwrap();
        assert_eq!(canvas.pixel(100, 100), Some(Color::MAGENTA));
        assert_eq!(canvas.pixel(103, 100), Some(Color::MAGENTA));
        assert_eq!(canvas.pixel(106, 100), Some(Color::BLACK));

        assert_eq!(
            canvas.draw_circle(50, 50, 0, Color::CYAN),
            Err(DrawError::InvalidParameter)
        );
    }

    #[test]
    fn bitmap_transparency(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        canvas.fill_screen(Color::GREY);
        canvas.draw_bitmap(BitmapId::SmileyHappy as u8, 100, 100).unwrap();

        let bitmap = BitmapId::SmileyHappy.bitmap();
        let mut transparent = 0;
        for (row, line) in bitmap.data.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let pixel = canvas.pixel(100 + col as i32, 100 + row as i32);
                if value == TRANSPARENT {
                    transparent += 1;
                    assert_eq!(pixel, Some(Color::GREY));
                } else {
                    assert_eq!(pixel, Some(Color(value)));
                }
            }
        }
        assert!(transparent > 0);

        assert_eq!(
            canvas.draw_bitmap(BitmapId::COUNT, 0, 0),
            Err(DrawError::InvalidParameter)
        );
    }

    #[test]
    fn bitmap_partially_off_screen(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);
        assert_eq!(canvas.draw_bitmap(BitmapId::ArrowUp as u8, WIDTH - 4, HEIGHT - 4), Ok(()));
    }

    #[test]
    fn text_bounding_box(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);

        let bbox = canvas
            .draw_text(10, 10, Color::WHITE, "A", "consolas", 1, TextStyle::NORMAL)
            .unwrap();
        assert_eq!(bbox, Rect::new(10, 10, 8, 8));

        let bbox = canvas
            .draw_text(10, 30, Color::WHITE, "A", "consolas", 2, TextStyle::NORMAL)
            .unwrap();
        assert_eq!(bbox, Rect::new(10, 30, 16, 16));

        let bbox = canvas
            .draw_text(10, 60, Color::WHITE, "A", "", 1, TextStyle::BOLD)
            .unwrap();
        assert_eq!(bbox.width, 9);

        let bbox = canvas
            .draw_text(10, 80, Color::WHITE, "A", "", 1, TextStyle::ITALIC)
            .unwrap();
        assert_eq!(bbox.width, 12);

        // 字形有点被绘制
        let mut lit = false;
        for y in 10..18 {
            for x in 10..18 {
                lit |= canvas.pixel(x, y) == Some(Color::WHITE);
            }
        }
        assert!(lit);
    }

    #[test]
    fn text_proportional_and_wrapping(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);

        let fixed = canvas
            .draw_text(0, 0, Color::WHITE, "ii", "consolas", 1, TextStyle::NORMAL)
            .unwrap();
        let proportional = canvas
            .draw_text(0, 20, Color::WHITE, "ii", "arial", 1, TextStyle::NORMAL)
            .unwrap();
        assert!(proportional.width < fixed.width);

        // 超出右边界换行
        let wrapped = canvas
            .draw_text(300, 100, Color::WHITE, "ABCDEF", "consolas", 1, TextStyle::NORMAL)
            .unwrap();
        assert!(wrapped.height > 8);

        assert_eq!(
            canvas.draw_text(0, 0, Color::WHITE, "A", "comic", 1, TextStyle::NORMAL),
            Err(DrawError::InvalidParameter)
        );
    }

    #[test]
    fn text_control_characters(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);

        // '\n' 换行: 行高 height * size + 2
        let bbox = canvas
            .draw_text(10, 10, Color::WHITE, "A\nA", "consolas", 1, TextStyle::NORMAL)
            .unwrap();
        assert_eq!(bbox, Rect::new(10, 10, 8, 8 + 2 + 8));

        let bbox = canvas
            .draw_text(10, 100, Color::WHITE, "A\nA", "consolas", 2, TextStyle::NORMAL)
            .unwrap();
        assert_eq!(bbox, Rect::new(10, 100, 16, 16 + 2 + 16));

        // '\r' 不占位置
        let bbox = canvas
            .draw_text(100, 10, Color::WHITE, "A\rB", "consolas", 1, TextStyle::NORMAL)
            .unwrap();
        assert_eq!(bbox, Rect::new(100, 10, 8 + 1 + 8, 8));
    }

    #[test]
    fn text_non_ascii_as_question_mark(state: &mut State) {
        let mut canvas = Canvas::new(state.buffer);

        canvas
            .draw_text(200, 10, Color::WHITE, "\u{e9}", "consolas", 1, TextStyle::NORMAL)
            .unwrap();
        canvas
            .draw_text(200, 30, Color::WHITE, "?", "consolas", 1, TextStyle::NORMAL)
            .unwrap();

        let mut lit = 0;
        for y in 0..8 {
            for x in 0..8 {
                let replaced = canvas.pixel(200 + x, 10 + y);
                assert_eq!(replaced, canvas.pixel(200 + x, 30 + y));
                if replaced == Some(Color::WHITE) {
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn color_names() {
        assert_eq!(Color::from_name("rood"), Some(Color::RED));
        assert_eq!(Color::from_name("lichtblauw"), Some(Color::LIGHT_BLUE));
        assert_eq!(Color::from_name("wit").map(Color::value), Some(0xFF));
        assert_eq!(Color::from_name("Rood"), None);
        assert_eq!(Color::from_name("paars"), None);
    }

    #[test]
    fn line_counter_sync_and_rows() {
        let base = 0x2000_0000;
        let mut lines = LineCounter::new(base);

        let first = lines.advance();
        assert!(first.vsync_active);
        assert_eq!(first.dma_source, None);
        assert!(!lines.advance().vsync_active);

        while lines.line() + 1 < VISIBLE_START {
            assert_eq!(lines.advance().dma_source, None);
        }

        // 每个帧缓冲行输出两次
        assert_eq!(lines.advance().dma_source, Some(row_address(base, 0)));
        assert_eq!(lines.advance().dma_source, Some(row_address(base, 0)));
        assert_eq!(lines.advance().dma_source, Some(row_address(base, 1)));

        let mut last = None;
        while lines.line() < VISIBLE_STOP {
            last = lines.advance().dma_source;
        }
        assert_eq!(last, Some(row_address(base, VISIBLE_ROWS - 1)));
        assert_eq!(lines.advance().dma_source, None);
    }

    #[test]
    fn line_counter_wraps_each_frame() {
        let base = 0x2000_1000;
        let mut lines = LineCounter::new(base);

        let mut visible = 0;
        for _ in 0..VSYNC_PERIOD {
            if lines.advance().dma_source.is_some() {
                visible += 1;
            }
        }
        assert_eq!(lines.line(), 0);
        assert_eq!(visible, u32::from(VISIBLE_STOP - VISIBLE_START + 1));

        // 第二帧从帧缓冲起始地址重新开始
        while lines.line() + 1 < VISIBLE_START {
            lines.advance();
        }
        assert_eq!(lines.advance().dma_source, Some(base));
    }
}
