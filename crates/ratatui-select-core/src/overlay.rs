//! Anchor-relative placement for the floating list.
//!
//! The positioner is recomputed on every render pass while the control is
//! open, so it tracks anchor movement and frame resizes for free, and it
//! holds no geometry at all until the first successful computation: callers
//! must render nothing while [`OverlayPositioner::is_positioned`] is false,
//! which is what prevents a one-frame flash at a wrong position.

use ratatui::layout::Rect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    Above,
    #[default]
    Below,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Above => Side::Below,
            Side::Below => Side::Above,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub area: Rect,
    pub side: Side,
    /// True when the overlay was shifted off the anchor's left edge or its
    /// height was cut down to fit the frame.
    pub clamped: bool,
}

#[derive(Clone, Debug)]
pub struct OverlayOptions {
    pub preferred_side: Side,
    /// Upper width bound; the effective maximum is the larger of this and
    /// the anchor width, and the anchor width is always the minimum.
    pub width_cap: u16,
    /// Distance kept from the frame edges when shifting horizontally.
    pub edge_padding: u16,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            preferred_side: Side::Below,
            width_cap: 40,
            edge_padding: 1,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct OverlayPositioner {
    options: OverlayOptions,
    geometry: Option<OverlayGeometry>,
}

impl OverlayPositioner {
    pub fn new(options: OverlayOptions) -> Self {
        Self {
            options,
            geometry: None,
        }
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn is_positioned(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn geometry(&self) -> Option<OverlayGeometry> {
        self.geometry
    }

    /// Forgets the current geometry. Called on close; the next open starts
    /// unpositioned again.
    pub fn invalidate(&mut self) {
        self.geometry = None;
    }

    /// Computes the floating rect for `content_width`/`content_height`
    /// (chrome included) against the anchor and frame. Returns `None` and
    /// stays unpositioned when the frame or anchor is degenerate — the
    /// caller renders nothing and retries on the next pass.
    pub fn compute(
        &mut self,
        anchor: Rect,
        frame: Rect,
        content_width: u16,
        content_height: u16,
    ) -> Option<OverlayGeometry> {
        if frame.width == 0 || frame.height == 0 || anchor.width == 0 || anchor.height == 0 {
            self.geometry = None;
            return None;
        }

        let pad = self.options.edge_padding;
        let avail_w = if frame.width > pad * 2 {
            frame.width - pad * 2
        } else {
            frame.width
        };
        let max_w = anchor.width.max(self.options.width_cap);
        let width = content_width
            .clamp(anchor.width, max_w)
            .min(avail_w)
            .max(1);

        let space_below = frame.bottom().saturating_sub(anchor.bottom());
        let space_above = anchor.y.saturating_sub(frame.y);
        let space = |side: Side| match side {
            Side::Above => space_above,
            Side::Below => space_below,
        };

        let desired_h = content_height.max(1);
        let preferred = self.options.preferred_side;
        let side = if desired_h <= space(preferred) {
            preferred
        } else if desired_h <= space(preferred.opposite()) {
            preferred.opposite()
        } else if space(preferred.opposite()) > space(preferred) {
            preferred.opposite()
        } else {
            preferred
        };

        let height = desired_h.min(space(side));
        if height == 0 {
            self.geometry = None;
            return None;
        }

        let min_x = if frame.width > pad * 2 {
            frame.x + pad
        } else {
            frame.x
        };
        let max_x = (frame.right().saturating_sub(pad))
            .saturating_sub(width)
            .max(min_x);
        let x = anchor.x.clamp(min_x, max_x);

        let y = match side {
            Side::Below => anchor.bottom(),
            Side::Above => anchor.y - height,
        };

        let geometry = OverlayGeometry {
            area: Rect::new(x, y, width, height),
            side,
            clamped: x != anchor.x || height < desired_h,
        };
        self.geometry = Some(geometry);
        Some(geometry)
    }
}
