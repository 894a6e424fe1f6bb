use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Display columns `s` occupies.
pub fn display_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

/// Paints `input` on one row, truncated to `max_cols` display columns.
/// Wide characters that would straddle the clip edge are dropped whole; a
/// trailing continuation cell is blanked so no half glyph is left behind.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if out_cols + w > max_cols {
            return;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        dx += 1;
        out_cols += 1;

        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            dx += 1;
            out_cols += 1;
        }
    }
}

/// One-column scrollbar for a row window: `offset..offset+rows` of `total`.
/// Blank when everything fits.
pub fn render_scrollbar(
    area: Rect,
    buf: &mut Buffer,
    offset: usize,
    rows: usize,
    total: usize,
    style: Style,
) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if total <= rows || total == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((rows as f64 / total as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_offset = total.saturating_sub(rows).max(1) as f64;
    let thumb_top = ((offset as f64 / max_offset) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}
