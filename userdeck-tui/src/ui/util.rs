use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 在 area 中居中放置一个不超过 w × h 的矩形，四周至少留 2 列 / 1 行
pub fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(4));
    let h = h.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// 按显示宽度截断，超长时以 `..` 结尾
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(2);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max >= 2 {
        out.push_str("..");
    }
    out
}

/// 终端列数换算成像素视口宽度；终端报告了像素宽度时直接采用
pub fn viewport_width(columns: u16, pixel_width: u16, cell_width_px: u32) -> u32 {
    if pixel_width > 0 {
        u32::from(pixel_width)
    } else {
        u32::from(columns) * cell_width_px.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 7), "hello..");
        assert_eq!(truncate("张三丰张三丰", 7), "张三..");
    }

    #[test]
    fn viewport_prefers_pixel_size() {
        assert_eq!(viewport_width(120, 0, 8), 960);
        assert_eq!(viewport_width(120, 1500, 8), 1500);
        assert_eq!(viewport_width(100, 0, 0), 100);
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(area, 100, 100);
        assert_eq!(r, Rect::new(2, 1, 36, 8));
        let small = centered_rect(area, 20, 4);
        assert_eq!(small, Rect::new(10, 3, 20, 4));
    }
}
