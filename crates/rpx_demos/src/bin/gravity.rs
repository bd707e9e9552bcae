//! N-body gravity with fading trails.
//!
//! q = quit, p = toggle pause, f = double the time step, s = halve the time step.
//!
//! Bodies live in `[-1, 1]^2` and are mapped onto the square raster.

use std::process::ExitCode;

use anyhow::ensure;
use glam::DVec2;
use rpx_core::{ButtonId, Color, Lcg, Position};
use rpx_engine::{Application, Context, Flow, PlatformConfig};

const G: f64 = 1.0;
const TRAIL_FADE: u8 = 2;
const MIN_DISTANCE: f64 = 5e-2;
const INITIAL_DT: f64 = 1e-5;
const RANDOM_BODIES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
struct Body {
    mass: f64,
    position: DVec2,
    speed: DVec2,
    color: Color,
    radius: i64,
}

impl Body {
    fn new(mass: f64, position: DVec2, speed: DVec2, color: Color, radius: i64) -> Self {
        Self {
            mass,
            position,
            speed,
            color,
            radius,
        }
    }

    /// A light-to-medium body with a random primary or secondary color.
    fn random(rng: &mut Lcg) -> anyhow::Result<Self> {
        let mass = 10f64.powf(rng.range_f64(0.0, 3.0)?);
        let position = DVec2::new(rng.range_f64(-1.0, 1.0)?, rng.range_f64(-1.0, 1.0)?);
        let speed = DVec2::new(rng.range_f64(-10.0, 10.0)?, rng.range_f64(-10.0, 10.0)?);
        let mask = rng.range_u32(1, 6)?;
        let channel = |bit: u32| if mask & (1 << bit) != 0 { 255 } else { 0 };
        let color = Color::new(channel(0), channel(1), channel(2));
        let radius = match mass {
            m if m > 100.0 => 2,
            m if m > 10.0 => 1,
            _ => 0,
        };
        Ok(Self::new(mass, position, speed, color, radius))
    }

    /// Distance to `other`, floored so close encounters stay finite.
    fn distance(&self, other: &Body) -> f64 {
        self.position.distance(other.position).max(MIN_DISTANCE)
    }

    /// Gravitational pull `other` exerts on `self`.
    fn force(&self, other: &Body) -> DVec2 {
        let d = self.distance(other);
        let magnitude = G * self.mass * other.mass / (d * d);
        (other.position - self.position) / d * magnitude
    }

    fn apply(&mut self, force: DVec2, dt: f64) {
        let acceleration = force / self.mass;
        self.speed += acceleration * dt;
        self.position += (self.speed + acceleration * dt / 2.0) * dt;
    }

    fn draw(&self, ctx: &mut Context) {
        let x = ((1.0 + self.position.x) / 2.0 * f64::from(ctx.width())) as i64;
        let y = ((1.0 + self.position.y) / 2.0 * f64::from(ctx.height())) as i64;
        for col in x - self.radius..=x + self.radius {
            for row in y - self.radius..=y + self.radius {
                let (Ok(col), Ok(row)) = (u32::try_from(col), u32::try_from(row)) else {
                    continue;
                };
                // Off-screen parts of a body are simply not drawn.
                let _ = ctx.set_pixel(Position::new(col, row), self.color);
            }
        }
    }
}

#[derive(Default)]
struct Gravity {
    rng: Lcg,
    bodies: Vec<Body>,
    forces: Vec<DVec2>,
    paused: bool,
    dt: f64,
}

impl Gravity {
    fn darken_screen(ctx: &mut Context) {
        for pixel in ctx.raster_mut().pixels_mut() {
            *pixel = Color::from_packed(*pixel).darken(TRAIL_FADE).to_packed();
        }
    }

    fn update_positions(&mut self) {
        for (i, force) in self.forces.iter_mut().enumerate() {
            *force = self
                .bodies
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, other)| self.bodies[i].force(other))
                .sum();
        }
        for (body, force) in self.bodies.iter_mut().zip(&self.forces) {
            body.apply(*force, self.dt);
        }
    }
}

impl Application for Gravity {
    fn initialize(&mut self, ctx: &mut Context, _args: &[String]) -> anyhow::Result<bool> {
        ensure!(
            ctx.width() == ctx.height(),
            "raster must be square, got {}x{}",
            ctx.width(),
            ctx.height()
        );
        ctx.clear(Color::BLACK);

        self.bodies.clear();
        for _ in 0..RANDOM_BODIES {
            self.bodies.push(Body::random(&mut self.rng)?);
        }
        // Two heavy bodies orbiting each other, two light ones further out.
        self.bodies.extend([
            Body::new(5e3, DVec2::new(-0.25, 0.0), DVec2::new(0.0, -75.0), Color::WHITE, 4),
            Body::new(5e3, DVec2::new(0.25, 0.0), DVec2::new(0.0, 75.0), Color::WHITE, 4),
            Body::new(1e2, DVec2::new(0.75, 0.0), DVec2::new(0.0, -100.0), Color::GREEN, 2),
            Body::new(1e2, DVec2::new(-0.75, 0.0), DVec2::new(0.0, 100.0), Color::RED, 2),
        ]);
        self.forces = vec![DVec2::ZERO; self.bodies.len()];
        self.paused = false;
        self.dt = INITIAL_DT;
        log::info!("Simulating {} bodies", self.bodies.len());
        Ok(true)
    }

    fn advance(&mut self, ctx: &mut Context, _elapsed_ms: f64) -> anyhow::Result<Flow> {
        if ctx.button(ButtonId::Keyboard('q')).pressed {
            return Ok(Flow::Stop);
        }
        if ctx.button(ButtonId::Keyboard('p')).pressed {
            self.paused = !self.paused;
        }
        if ctx.button(ButtonId::Keyboard('f')).pressed {
            self.dt *= 2.0;
            log::info!("Time step {:e}", self.dt);
        }
        if ctx.button(ButtonId::Keyboard('s')).pressed {
            self.dt /= 2.0;
            log::info!("Time step {:e}", self.dt);
        }

        if !self.paused {
            Self::darken_screen(ctx);
            self.update_positions();
        }
        for body in &self.bodies {
            body.draw(ctx);
        }
        Ok(Flow::Continue)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = PlatformConfig::new(1000, 1000, 5).with_title("gravity");
    rpx_engine::run_windowed::<Gravity>(config, &args).into()
}
