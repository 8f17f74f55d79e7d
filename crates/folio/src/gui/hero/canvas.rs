use crate::motion::{self, Easing, RingMotion, Tween};
use crate::ring::{BADGE_ICON_SIZE, BADGE_RADIUS, PORTRAIT_RADIUS, RingState, TechnologyItem};
use crate::sys::icon;
use crate::theme::{ThemeColors, ThemeMode};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::TAU;
use std::iter::zip;
use std::path::Path;
use std::time::{Duration, Instant};

struct BadgeArt {
    initials: String,
    pixbuf: Option<Pixbuf>,
}

impl BadgeArt {
    fn load(item: &TechnologyItem) -> Self {
        let pixbuf = item
            .icon
            .as_ref()
            .and_then(|name| icon::find_icon_path(name, 64))
            .and_then(|path| {
                Pixbuf::from_file_at_scale(&path, BADGE_ICON_SIZE, BADGE_ICON_SIZE, true).ok()
            });
        Self {
            initials: item.initials(),
            pixbuf,
        }
    }
}

/// Everything the hero drawing area needs between ring ticks.
pub struct RingCanvas {
    arts: Vec<BadgeArt>,
    motion: RingMotion,
    appear: Tween<f64>,
    zoom: Tween<f64>,
    badges_fade: Tween<f64>,
    mounted: Instant,
    colors: ThemeColors,
    avatar: Option<Pixbuf>,
}

impl RingCanvas {
    pub fn new(
        state: &RingState,
        animation: Duration,
        mode: ThemeMode,
        avatar: Option<&Path>,
    ) -> Self {
        Self {
            arts: Self::load_arts(state),
            motion: RingMotion::new(state.positions(), animation),
            appear: motion::animate(0.0, 1.0, motion::ENTRANCE_DURATION, Easing::EaseOut),
            zoom: motion::animate(0.9, 1.0, motion::ENTRANCE_DURATION, Easing::EaseOut),
            badges_fade: badge_fade(animation, Duration::ZERO),
            mounted: Instant::now(),
            colors: ThemeColors::for_mode(mode),
            avatar: load_avatar(avatar),
        }
    }

    fn load_arts(state: &RingState) -> Vec<BadgeArt> {
        state.badges.iter().map(|b| BadgeArt::load(&b.item)).collect()
    }

    fn elapsed(&self) -> Duration {
        self.mounted.elapsed()
    }

    pub fn rotate(&mut self, state: &RingState) {
        let targets: Vec<_> = state.positions().collect();
        self.motion.retarget(&targets, self.elapsed());
    }

    /// Replaces the badges after the technology list changed and fades them in again.
    pub fn reload(&mut self, state: &RingState, animation: Duration, avatar: Option<&Path>) {
        self.restart_badges(state, animation, self.elapsed());
        self.avatar = load_avatar(avatar);
    }

    fn restart_badges(&mut self, state: &RingState, animation: Duration, at: Duration) {
        self.arts = Self::load_arts(state);
        self.motion = RingMotion::new(state.positions(), animation);
        self.badges_fade = badge_fade(animation, at);
    }

    fn badge_opacity(&self, elapsed: Duration) -> f64 {
        self.badges_fade.sample(elapsed)
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.colors = ThemeColors::for_mode(mode);
    }

    pub fn is_animating(&self) -> bool {
        let elapsed = self.elapsed();
        !self.motion.is_settled(elapsed)
            || !self.badges_fade.is_finished(elapsed)
            || !self.zoom.is_finished(elapsed)
    }

    pub fn draw(&self, cr: &Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        let elapsed = self.elapsed();
        let alpha = self.appear.sample(elapsed);
        let zoom = self.zoom.sample(elapsed);

        cr.save()?;
        cr.translate(width / 2.0, height / 2.0);
        cr.scale(zoom, zoom);

        self.draw_portrait(cr, alpha)?;

        let badge_alpha = alpha * self.badge_opacity(elapsed);
        for (art, pos) in zip(&self.arts, self.motion.sample(elapsed)) {
            self.draw_badge(cr, art, pos.x, pos.y, badge_alpha)?;
        }

        cr.restore()
    }

    fn draw_portrait(&self, cr: &Context, alpha: f64) -> Result<(), cairo::Error> {
        let r = PORTRAIT_RADIUS;
        let glow = cairo::LinearGradient::new(-r, 0.0, r, 0.0);
        for (offset, color) in [(0.0, self.colors.glow_start), (1.0, self.colors.glow_end)] {
            let (red, green, blue, a) = color.into_components();
            glow.add_color_stop_rgba(offset, red, green, blue, a * alpha);
        }
        cr.set_source(&glow)?;
        cr.arc(0.0, 0.0, r, 0.0, TAU);
        cr.fill()?;

        if let Some(avatar) = &self.avatar {
            let (w, h) = (avatar.width() as f64, avatar.height() as f64);
            let scale = (2.0 * r) / w.min(h).max(1.0);
            cr.save()?;
            cr.arc(0.0, 0.0, r, 0.0, TAU);
            cr.clip();
            cr.scale(scale, scale);
            cr.set_source_pixbuf(avatar, -w / 2.0, -h / 2.0);
            cr.paint_with_alpha(alpha)?;
            cr.restore()?;
        }

        set_source(cr, self.colors.portrait_border, alpha);
        cr.set_line_width(4.0);
        cr.arc(0.0, 0.0, r, 0.0, TAU);
        cr.stroke()
    }

    fn draw_badge(
        &self,
        cr: &Context,
        art: &BadgeArt,
        x: f64,
        y: f64,
        alpha: f64,
    ) -> Result<(), cairo::Error> {
        set_source(cr, self.colors.badge, alpha);
        cr.arc(x, y, BADGE_RADIUS, 0.0, TAU);
        cr.fill()?;

        if let Some(pixbuf) = &art.pixbuf {
            // center icon in badge
            cr.save()?;
            cr.translate(
                x - pixbuf.width() as f64 / 2.0,
                y - pixbuf.height() as f64 / 2.0,
            );
            cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
            cr.paint_with_alpha(alpha)?;
            return cr.restore();
        }

        set_source(cr, self.colors.badge_text, alpha);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(13.0);
        if let Ok(ext) = cr.text_extents(&art.initials) {
            cr.move_to(
                x - ext.width() / 2.0 - ext.x_bearing(),
                y - ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(&art.initials)?;
        }
        Ok(())
    }
}

fn badge_fade(animation: Duration, since: Duration) -> Tween<f64> {
    motion::animate(0.0, 1.0, animation, Easing::Linear).delayed(since)
}

fn load_avatar(path: Option<&Path>) -> Option<Pixbuf> {
    let path = path?;
    Pixbuf::from_file(path)
        .inspect_err(|e| log::error!("Failed to load avatar {}: {}", path.display(), e))
        .ok()
}

fn set_source(cr: &Context, color: Srgba<f64>, alpha: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * alpha);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::BADGE_ANIMATION;
    use std::sync::Arc;

    const EPS: f64 = 1e-9;

    fn ring(n: usize) -> RingState {
        let items: Vec<_> = (0..n)
            .map(|i| Arc::new(TechnologyItem::new(format!("tech-{i}"), None)))
            .collect();
        RingState::seed(&items, 180.0)
    }

    #[test]
    fn test_badges_fade_in_over_animation() {
        let canvas = RingCanvas::new(&ring(4), BADGE_ANIMATION, ThemeMode::Dark, None);

        assert!(canvas.badge_opacity(Duration::ZERO).abs() < EPS);
        assert!((canvas.badge_opacity(BADGE_ANIMATION / 2) - 0.5).abs() < EPS);
        assert!((canvas.badge_opacity(BADGE_ANIMATION) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reload_restarts_fade() {
        let mut canvas =
            RingCanvas::new(&RingState::default(), Duration::ZERO, ThemeMode::Dark, None);
        let at = Duration::from_secs(30);
        canvas.restart_badges(&ring(6), BADGE_ANIMATION, at);

        assert_eq!(canvas.arts.len(), 6);
        assert!(canvas.badge_opacity(at).abs() < EPS);
        assert!((canvas.badge_opacity(at + BADGE_ANIMATION / 4) - 0.25).abs() < EPS);
    }
}
