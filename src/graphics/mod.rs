//! # 帧缓冲绘图
//!
//! 320x240 像素, 每像素一个字节 (R3G3B2)。
//! 每行在可见像素之后多出一个字节, DMA 在行尾把它输出到数据线,
//! 因此该字节必须始终为 0 (消隐电平)。
//!
//! 所有图元都受裁剪矩形约束; 超出裁剪区域的像素被静默丢弃。

pub mod bitmaps;
pub mod fonts;
mod text;

use crate::color::Color;

pub use text::TextStyle;

/// 屏幕宽度, 单位像素
pub const WIDTH: i32 = 320;
/// 屏幕高度, 单位像素
pub const HEIGHT: i32 = 240;
/// 帧缓冲行跨度, 包含行尾的消隐字节
pub const STRIDE: usize = WIDTH as usize + 1;
/// 帧缓冲大小
pub const FRAMEBUFFER_SIZE: usize = STRIDE * HEIGHT as usize;

/// 帧缓冲
pub type FrameBuffer = [u8; FRAMEBUFFER_SIZE];

/// 绘图错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum DrawError {
    /// 坐标超出屏幕
    InvalidCoordinate,
    /// 其他无效参数, 例如半径为 0
    InvalidParameter,
}

/// 坐标点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, defmt::Format)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// 矩形区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, defmt::Format)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// 整个屏幕
    pub const fn screen() -> Self {
        Rect::new(0, 0, WIDTH, HEIGHT)
    }

    /// 右边界 (不含)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// 下边界 (不含)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// 点是否位于矩形内
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }
}

/// 帧缓冲画布
pub struct Canvas<'a> {
    buffer: &'a mut FrameBuffer,
    clip: Rect,
}

impl<'a> Canvas<'a> {
    /// 创建画布
    /// 清空帧缓冲 (黑色), 裁剪区域为整个屏幕
    pub fn new(buffer: &'a mut FrameBuffer) -> Self {
        buffer.fill(0);
        Canvas {
            buffer,
            clip: Rect::screen(),
        }
    }

    /// 设置裁剪矩形
    /// 传入 None 时恢复为整个屏幕
    pub fn set_clip_rect(&mut self, rect: Option<Rect>) {
        let Some(rect) = rect else {
            self.reset_clip_rect();
            return;
        };

        let x = rect.x.clamp(0, WIDTH);
        let y = rect.y.clamp(0, HEIGHT);
        // 宽高截断到屏幕剩余部分
        let width = rect.width.clamp(0, WIDTH - x);
        let height = rect.height.clamp(0, HEIGHT - y);
        self.clip = Rect::new(x, y, width, height);
    }

    /// 获取当前裁剪矩形
    pub fn clip_rect(&self) -> Rect {
        self.clip
    }

    /// 裁剪区域恢复为整个屏幕
    pub fn reset_clip_rect(&mut self) {
        self.clip = Rect::screen();
    }

    /// 整屏填充
    /// 不受裁剪区域影响
    pub fn fill_screen(&mut self, color: Color) {
        self.buffer.fill(color.value());

        // 行尾消隐字节必须为 0
        for line in self.buffer.chunks_exact_mut(STRIDE) {
            line[STRIDE - 1] = 0;
        }
    }

    /// 读取像素
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !Rect::screen().contains(x, y) {
            return None;
        }
        Some(Color(self.buffer[offset(x, y)]))
    }

    /// 绘制单个像素
    /// 超出屏幕返回错误, 位于裁剪区域之外的像素直接忽略
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), DrawError> {
        if !Rect::screen().contains(x, y) {
            return Err(DrawError::InvalidCoordinate);
        }
        self.plot(x, y, color);
        Ok(())
    }

    /// 水平线, 端点顺序任意
    pub fn hline(&mut self, x0: i32, y: i32, x1: i32, color: Color) {
        if y < self.clip.y || y >= self.clip.bottom() {
            return;
        }

        let start = x0.min(x1).max(self.clip.x);
        let end = x0.max(x1).min(self.clip.right() - 1);
        if start > end {
            return;
        }

        let base = offset(start, y);
        self.buffer[base..=base + (end - start) as usize].fill(color.value());
    }

    /// 垂直线, 端点顺序任意
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        if x < self.clip.x || x >= self.clip.right() {
            return;
        }

        let start = y0.min(y1).max(self.clip.y);
        let end = y0.max(y1).min(self.clip.bottom() - 1);
        if start > end {
            return;
        }

        for y in start..=end {
            self.buffer[offset(x, y)] = color.value();
        }
    }

    /// 绘制直线
    /// thickness: 线宽, 大于 1 时沿路径绘制实心圆, 线端为圆头
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thickness: u8,
    ) -> Result<(), DrawError> {
        if thickness == 0 {
            return Err(DrawError::InvalidParameter);
        }

        let path = Bresenham::new(Point::new(x1, y1), Point::new(x2, y2));
        if thickness == 1 {
            for p in path {
                self.plot(p.x, p.y, color);
            }
        } else {
            let radius = i32::from(thickness / 2);
            for p in path {
                self.fill_disc(p.x, p.y, radius, color);
            }
        }
        Ok(())
    }

    /// 矩形边框
    pub fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), DrawError> {
        if width <= 0 || height <= 0 {
            return Err(DrawError::InvalidParameter);
        }

        let x2 = x + width - 1;
        let y2 = y + height - 1;

        self.hline(x, y, x2, color);
        self.hline(x, y2, x2, color);
        if height > 2 {
            self.vline(x, y + 1, y2 - 1, color);
            self.vline(x2, y + 1, y2 - 1, color);
        }
        Ok(())
    }

    /// 实心矩形
    pub fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), DrawError> {
        if width <= 0 || height <= 0 {
            return Err(DrawError::InvalidParameter);
        }

        for row in y..y + height {
            self.hline(x, row, x + width - 1, color);
        }
        Ok(())
    }

    /// 圆形边框, 中点画圆法
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: u16, color: Color) -> Result<(), DrawError> {
        if radius == 0 {
            return Err(DrawError::InvalidParameter);
        }

        for (x, y) in Octant::new(i32::from(radius)) {
            self.plot(cx + x, cy + y, color);
            self.plot(cx + y, cy + x, color);
            self.plot(cx - y, cy + x, color);
            self.plot(cx - x, cy + y, color);
            self.plot(cx - x, cy - y, color);
            self.plot(cx - y, cy - x, color);
            self.plot(cx + y, cy - x, color);
            self.plot(cx + x, cy - y, color);
        }
        Ok(())
    }

    /// 实心圆
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u16, color: Color) -> Result<(), DrawError> {
        if radius == 0 {
            return Err(DrawError::InvalidParameter);
        }
        self.fill_disc(cx, cy, i32::from(radius), color);
        Ok(())
    }

    /// 绘制位图
    /// 透明色像素不绘制
    pub fn draw_bitmap(&mut self, id: u8, x: i32, y: i32) -> Result<(), DrawError> {
        let id = bitmaps::BitmapId::try_from(id).map_err(|_| DrawError::InvalidParameter)?;
        let bitmap = id.bitmap();

        for (row, line) in bitmap.data.iter().enumerate().take(usize::from(bitmap.height)) {
            for (col, &value) in line.iter().enumerate().take(usize::from(bitmap.width)) {
                if value != bitmaps::TRANSPARENT {
                    self.plot(x + col as i32, y + row as i32, Color(value));
                }
            }
        }
        Ok(())
    }

    /// 写入像素, 超出屏幕或裁剪区域时忽略
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if self.clip.contains(x, y) {
            self.buffer[offset(x, y)] = color.value();
        }
    }

    /// 实心圆, 不检查半径
    fn fill_disc(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius == 0 {
            self.plot(cx, cy, color);
            return;
        }
        for (x, y) in Octant::new(radius) {
            self.hline(cx - x, cy + y, cx + x, color);
            self.hline(cx - x, cy - y, cx + x, color);
            self.hline(cx - y, cy + x, cx + y, color);
            self.hline(cx - y, cy - x, cx + y, color);
        }
    }
}

/// 像素在帧缓冲中的偏移, 调用前需保证坐标在屏幕内
fn offset(x: i32, y: i32) -> usize {
    y as usize * STRIDE + x as usize
}

/// Bresenham 直线路径, 包含两个端点
struct Bresenham {
    current: Point,
    end: Point,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Bresenham {
    fn new(start: Point, end: Point) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Bresenham {
            current: start,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        let point = self.current;
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.current.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }
        Some(point)
    }
}

/// 中点画圆法的第一个八分圆, 其余部分由对称得到
struct Octant {
    x: i32,
    y: i32,
    err: i32,
}

impl Octant {
    fn new(radius: i32) -> Self {
        Octant {
            x: radius,
            y: 0,
            err: 0,
        }
    }
}

impl Iterator for Octant {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x < self.y {
            return None;
        }

        let point = (self.x, self.y);
        if self.err <= 0 {
            self.y += 1;
            self.err += 2 * self.y + 1;
        }
        if self.err > 0 {
            self.x -= 1;
            self.err -= 2 * self.x + 1;
        }
        Some(point)
    }
}
