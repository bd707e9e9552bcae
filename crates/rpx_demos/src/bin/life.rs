//! Conway's Game of Life on a wrapping grid.
//!
//! q = quit, p = toggle pause, s = single step while paused,
//! left click = toggle cell, right click = spawn glider.
//!
//! Optional first argument: initial density of live cells in `[0, 1]` (default 0.5).

use std::process::ExitCode;

use anyhow::{ensure, Context as _};
use rpx_core::{ButtonId, Color, Lcg, Position};
use rpx_engine::{Application, Context, Flow, PlatformConfig};

const ALIVE: Color = Color::BLACK;
const DEAD: Color = Color::WHITE;
const FPS: f64 = 30.0;
const DEFAULT_DENSITY: f64 = 0.5;

#[rustfmt::skip]
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];
const GLIDER: [(i64, i64); 5] = [(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// Cell grid whose edges wrap around.
#[derive(Debug, Default, Clone, PartialEq)]
struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Grid {
    fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols as usize * rows as usize],
        }
    }

    fn wrap(&self, x: i64, y: i64) -> Position {
        let x = x.rem_euclid(i64::from(self.cols.max(1)));
        let y = y.rem_euclid(i64::from(self.rows.max(1)));
        Position::new(x as u32, y as u32)
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.cols as usize + pos.x as usize
    }

    fn get(&self, pos: Position) -> bool {
        self.cells.get(self.index(pos)).copied().unwrap_or(false)
    }

    fn set(&mut self, pos: Position, alive: bool) {
        let index = self.index(pos);
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = alive;
        }
    }

    fn live_neighbours(&self, pos: Position) -> usize {
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        NEIGHBOURS
            .iter()
            .filter(|(dx, dy)| self.get(self.wrap(x + dx, y + dy)))
            .count()
    }
}

fn next_state(alive: bool, neighbours: usize) -> bool {
    match neighbours {
        2 => alive,
        3 => true,
        _ => false,
    }
}

fn parse_density(args: &[String]) -> anyhow::Result<f64> {
    let Some(raw) = args.first() else {
        return Ok(DEFAULT_DENSITY);
    };
    let density: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("density {raw:?} is not a number"))?;
    ensure!(
        (0.0..=1.0).contains(&density),
        "density {density} is outside [0, 1]"
    );
    Ok(density)
}

fn cell_color(alive: bool) -> Color {
    if alive {
        ALIVE
    } else {
        DEAD
    }
}

#[derive(Default)]
struct Life {
    rng: Lcg,
    current: Grid,
    next: Grid,
    paused: bool,
    step: bool,
}

impl Life {
    /// Compute one generation into `next`, paint it, then swap buffers.
    fn generation(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        for row in 0..self.current.rows {
            for col in 0..self.current.cols {
                let pos = Position::new(col, row);
                let alive = self.current.get(pos);
                let next = next_state(alive, self.current.live_neighbours(pos));
                self.next.set(pos, next);
                if next != alive {
                    ctx.set_pixel(pos, cell_color(next))?;
                }
            }
        }
        std::mem::swap(&mut self.current, &mut self.next);
        Ok(())
    }

    fn toggle(&mut self, ctx: &mut Context, pos: Position) -> anyhow::Result<()> {
        let alive = !self.current.get(pos);
        self.current.set(pos, alive);
        ctx.set_pixel(pos, cell_color(alive))?;
        Ok(())
    }

    fn glider(&mut self, ctx: &mut Context, center: Position) -> anyhow::Result<()> {
        let (x, y) = (i64::from(center.x), i64::from(center.y));
        for (dx, dy) in GLIDER {
            let pos = self.current.wrap(x + dx, y + dy);
            self.current.set(pos, true);
            ctx.set_pixel(pos, ALIVE)?;
        }
        Ok(())
    }
}

impl Application for Life {
    fn initialize(&mut self, ctx: &mut Context, args: &[String]) -> anyhow::Result<bool> {
        let density = parse_density(args)?;
        self.current = Grid::new(ctx.width(), ctx.height());
        self.next = Grid::new(ctx.width(), ctx.height());
        for row in 0..ctx.height() {
            for col in 0..ctx.width() {
                let pos = Position::new(col, row);
                let alive = self.rng.next_f64() < density;
                self.current.set(pos, alive);
                ctx.set_pixel(pos, cell_color(alive))?;
            }
        }
        log::info!("Seeded {}x{} grid at density {density}", ctx.width(), ctx.height());
        Ok(true)
    }

    fn advance(&mut self, ctx: &mut Context, _elapsed_ms: f64) -> anyhow::Result<Flow> {
        if !self.paused || self.step {
            self.generation(ctx)?;
            self.step = false;
        }

        if ctx.button(ButtonId::Keyboard('q')).pressed {
            return Ok(Flow::Stop);
        }
        if ctx.button(ButtonId::Keyboard('p')).pressed {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        if ctx.button(ButtonId::Keyboard('s')).pressed && self.paused {
            self.step = true;
        }
        if ctx.button(ButtonId::LEFT).pressed {
            if let Some(pos) = ctx.mouse_position() {
                self.toggle(ctx, pos)?;
            }
        }
        if ctx.button(ButtonId::RIGHT).pressed {
            if let Some(pos) = ctx.mouse_position() {
                self.glider(ctx, pos)?;
            }
        }

        ctx.wait_ms(1000.0 / FPS);
        Ok(Flow::Continue)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = PlatformConfig::new(640, 480, 10).with_title("life");
    rpx_engine::run_windowed::<Life>(config, &args).into()
}
