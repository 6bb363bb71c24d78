//! 开机演示画面

use crate::color::Color;
use crate::graphics::{Canvas, DrawError, Rect, TextStyle};

/// 绘制演示画面
/// 覆盖填充、直线粗细、裁剪、文字样式与外接矩形
pub fn run_feature_demo(canvas: &mut Canvas) -> Result<(), DrawError> {
    canvas.fill_screen(Color::BLUE);

    // 基本图形
    canvas.fill_circle(40, 40, 30, Color::YELLOW)?;
    canvas.fill_rectangle(250, 20, 50, 40, Color::GREEN)?;

    // 不同粗细的直线
    canvas.draw_line(10, 230, 110, 100, Color::LIGHT_CYAN, 1)?;
    canvas.draw_line(20, 230, 120, 100, Color::LIGHT_CYAN, 4)?;
    canvas.draw_line(30, 230, 130, 100, Color::LIGHT_CYAN, 8)?;
    canvas.draw_line(40, 230, 140, 100, Color::CYAN, 12)?;

    // 裁剪
    let clip = Rect::new(80, 60, 160, 120);
    canvas.set_clip_rect(Some(clip));
    canvas.draw_line(0, 0, 319, 239, Color::RED, 3)?;
    canvas.draw_text(60, 100, Color::WHITE, "Clipped Text", "", 2, TextStyle::NORMAL)?;
    canvas.reset_clip_rect();
    canvas.draw_rectangle(clip.x, clip.y, clip.width, clip.height, Color::WHITE)?;

    // 文字样式
    canvas.draw_text(120, 10, Color::WHITE, "Normal Text", "", 1, TextStyle::NORMAL)?;
    canvas.draw_text(10, 80, Color::YELLOW, "Bold!", "", 2, TextStyle::BOLD)?;
    canvas.draw_text(200, 80, Color::LIGHT_GREEN, "Italic!", "arial", 2, TextStyle::ITALIC)?;

    let bbox = canvas.draw_text(
        140,
        200,
        Color::LIGHT_MAGENTA,
        "Bounds Test",
        "arial",
        2,
        TextStyle::BOLD | TextStyle::ITALIC,
    )?;
    canvas.draw_rectangle(
        bbox.x - 2,
        bbox.y - 2,
        bbox.width + 4,
        bbox.height + 4,
        Color::GREY,
    )?;

    defmt::info!("feature demo drawn");
    Ok(())
}
