/// Physics substrate — single source of truth for motion and contact.
///
/// ## Architecture
///
/// Two distinct concepts:
///   1. BODY     — a moving AABB with velocity and a grounded flag
///   2. TERRAIN  — the static platform rects of the loaded level
///
/// `step_body` integrates gravity and velocity over one tick, resolving each
/// axis separately against the platform set:
///   - X first: move, push out of any overlapped platform, zero `vx`.
///   - Y second: move, land on tops (sets `on_ground`) or bump under
///     bottoms, zero `vy`.
///
/// Because gravity is applied every tick, a resting body re-contacts its
/// floor each step, so `on_ground` is freshly true on every tick the body is
/// supported — controllers can read it directly for grounded checks.
///
/// Horizontal motion is clamped to the world's side walls; there is no floor
/// clamp, so a body that leaves the platform set keeps falling (the fall-out
/// guard in the simulation handles that).

use super::catalog::WORLD_W;

/// A moving axis-aligned box. `x`/`y` is the center.
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub half_w: f32,
    pub half_h: f32,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Body {
            x,
            y,
            half_w: w / 2.0,
            half_h: h / 2.0,
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
        }
    }

    pub fn left(&self) -> f32 { self.x - self.half_w }
    pub fn right(&self) -> f32 { self.x + self.half_w }
    pub fn top(&self) -> f32 { self.y - self.half_h }
    pub fn bottom(&self) -> f32 { self.y + self.half_h }

    /// AABB overlap test against another body.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    fn overlaps_rect(&self, r: &StaticRect) -> bool {
        self.left() < r.right()
            && self.right() > r.left()
            && self.top() < r.bottom()
            && self.bottom() > r.top()
    }
}

/// A static platform collider. `x`/`y` is the center.
#[derive(Clone, Copy, Debug)]
pub struct StaticRect {
    pub x: f32,
    pub y: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl StaticRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        StaticRect { x, y, half_w: w / 2.0, half_h: h / 2.0 }
    }

    pub fn left(&self) -> f32 { self.x - self.half_w }
    pub fn right(&self) -> f32 { self.x + self.half_w }
    pub fn top(&self) -> f32 { self.y - self.half_h }
    pub fn bottom(&self) -> f32 { self.y + self.half_h }
}

/// Advance a body by `dt` seconds against the given platforms.
pub fn step_body(body: &mut Body, platforms: &[StaticRect], dt: f32, gravity: f32) {
    body.vy += gravity * dt;
    body.on_ground = false;

    // ── Horizontal pass ──
    body.x += body.vx * dt;
    for plat in platforms {
        if body.overlaps_rect(plat) {
            if body.vx > 0.0 {
                body.x = plat.left() - body.half_w;
            } else if body.vx < 0.0 {
                body.x = plat.right() + body.half_w;
            }
            body.vx = 0.0;
        }
    }

    // Side walls of the world
    if body.x < body.half_w {
        body.x = body.half_w;
        body.vx = 0.0;
    } else if body.x > WORLD_W - body.half_w {
        body.x = WORLD_W - body.half_w;
        body.vx = 0.0;
    }

    // ── Vertical pass ──
    body.y += body.vy * dt;
    for plat in platforms {
        if body.overlaps_rect(plat) {
            if body.vy > 0.0 {
                // Landed on top of the platform
                body.y = plat.top() - body.half_h;
                body.vy = 0.0;
                body.on_ground = true;
            } else if body.vy < 0.0 {
                // Bumped head on the underside
                body.y = plat.bottom() + body.half_h;
                body.vy = 0.0;
            }
        }
    }

    // Ceiling of the world
    if body.y < body.half_h {
        body.y = body.half_h;
        if body.vy < 0.0 {
            body.vy = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;
    const GRAVITY: f32 = 900.0;

    fn ground() -> StaticRect {
        StaticRect::new(512.0, 720.0, 1024.0, 32.0)
    }

    #[test]
    fn falling_body_lands_and_is_grounded() {
        let plats = [ground()];
        let mut body = Body::new(512.0, 650.0, 20.0, 40.0);
        for _ in 0..200 {
            step_body(&mut body, &plats, DT, GRAVITY);
        }
        assert!(body.on_ground);
        assert_eq!(body.vy, 0.0);
        // Resting exactly on the platform top
        assert!((body.bottom() - ground().top()).abs() < 0.001);
    }

    #[test]
    fn grounded_flag_stays_true_while_resting() {
        let plats = [ground()];
        let mut body = Body::new(512.0, 650.0, 20.0, 40.0);
        for _ in 0..200 {
            step_body(&mut body, &plats, DT, GRAVITY);
        }
        // Several more ticks at rest: grounded every tick
        for _ in 0..5 {
            step_body(&mut body, &plats, DT, GRAVITY);
            assert!(body.on_ground);
        }
    }

    #[test]
    fn airborne_body_is_not_grounded() {
        let plats = [ground()];
        let mut body = Body::new(512.0, 300.0, 20.0, 40.0);
        step_body(&mut body, &plats, DT, GRAVITY);
        assert!(!body.on_ground);
        assert!(body.vy > 0.0);
    }

    #[test]
    fn side_walls_clamp_horizontal_motion() {
        let plats = [ground()];
        let mut body = Body::new(15.0, 650.0, 20.0, 40.0);
        body.vx = -500.0;
        step_body(&mut body, &plats, DT, GRAVITY);
        assert_eq!(body.x, body.half_w);
        assert_eq!(body.vx, 0.0);

        let mut body = Body::new(WORLD_W - 15.0, 650.0, 20.0, 40.0);
        body.vx = 500.0;
        step_body(&mut body, &plats, DT, GRAVITY);
        assert_eq!(body.x, WORLD_W - body.half_w);
    }

    #[test]
    fn rising_body_bumps_platform_underside() {
        let plats = [StaticRect::new(512.0, 400.0, 300.0, 32.0)];
        let mut body = Body::new(512.0, 450.0, 20.0, 40.0);
        body.vy = -600.0;
        step_body(&mut body, &plats, DT, GRAVITY);
        assert_eq!(body.vy, 0.0);
        assert!((body.top() - plats[0].bottom()).abs() < 0.001);
    }

    #[test]
    fn overlap_is_symmetric_and_strict() {
        let a = Body::new(100.0, 100.0, 20.0, 20.0);
        let mut b = Body::new(115.0, 100.0, 20.0, 20.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Exactly touching edges do not overlap
        b.x = 120.0;
        assert!(!a.overlaps(&b));
    }
}
