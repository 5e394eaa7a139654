/*
 * Ball Module
 *
 * This module defines the Ball struct, a point drifting across the surface.
 * Each ball moves in a straight line and bounces off the surface edges:
 * 1. Advance the position by the velocity
 * 2. Fold any overshoot past an edge back inside the surface
 * 3. Reverse the velocity component of every axis that bounced
 *
 * The fold keeps a ball inside while each velocity component stays smaller
 * than the free band `extent - 2 * radius` on its axis.
 */

use nannou::color::Rgba;
use nannou::prelude::*;
use rand::Rng;

use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Point2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Marked balls are only drawn differently.
    pub marked: bool,
}

impl Ball {
    pub fn new(position: Point2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            marked: false,
        }
    }

    /// A ball at a random position inside `width` x `height` with a random velocity.
    ///
    /// Each velocity component is drawn from `[0, max_speed)` and given a random sign.
    pub fn random<R: Rng>(
        rng: &mut R,
        width: f32,
        height: f32,
        radius: f32,
        max_speed: f32,
    ) -> Self {
        let x = rng.gen_range(radius..=width - radius);
        let y = rng.gen_range(radius..=height - radius);
        Self::new(pt2(x, y), random_velocity(rng, max_speed), radius)
    }

    /// A marked ball pinned at `position`, still moving with a random velocity.
    pub fn pinned<R: Rng>(rng: &mut R, position: Point2, radius: f32, max_speed: f32) -> Self {
        Self {
            marked: true,
            ..Self::new(position, random_velocity(rng, max_speed), radius)
        }
    }

    // Move one tick and bounce off the edges of a width x height surface
    pub fn step(&mut self, width: f32, height: f32) {
        self.position += self.velocity;

        let (x, dx) = reflect(self.position.x, self.velocity.x, self.radius, width);
        let (y, dy) = reflect(self.position.y, self.velocity.y, self.radius, height);
        self.position = pt2(x, y);
        self.velocity = vec2(dx, dy);
    }

    /// Whether the whole disc lies on the surface.
    pub fn is_inside(&self, width: f32, height: f32) -> bool {
        let r = self.radius;
        (r..=width - r).contains(&self.position.x) && (r..=height - r).contains(&self.position.y)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let color: Rgba = if self.marked {
            rgba(1.0, 0.35, 0.35, 1.0)
        } else {
            rgba(1.0, 1.0, 1.0, 1.0)
        };
        surface.fill_circle(self.position, self.radius, color);
    }
}

fn random_velocity<R: Rng>(rng: &mut R, max_speed: f32) -> Vec2 {
    let mut component = || {
        let magnitude = max_speed * rng.gen::<f32>();
        if rng.gen_bool(0.5) {
            -magnitude
        } else {
            magnitude
        }
    };
    let dx = component();
    let dy = component();
    vec2(dx, dy)
}

// Fold one coordinate back inside [radius, extent - radius], flipping the velocity on a bounce
#[inline]
fn reflect(mut pos: f32, mut vel: f32, radius: f32, extent: f32) -> (f32, f32) {
    let far = pos + radius > extent;
    let near = pos - radius < 0.0;
    if far || near {
        if far {
            pos = extent - (pos + radius) % extent - radius;
        }
        if pos - radius < 0.0 {
            pos = radius + (pos - radius).abs();
        }
        vel = -vel;
    }
    (pos, vel)
}
