use crate::config::Config;
use crate::graphics::{
    draw_disc, draw_polyline, draw_thick_segment, Canvas, Projection, DOTS_X, DOTS_Y,
};
use crate::math::{distance, rod_ends};
use crate::pose::{Point, Pose, PoseSink, RodId};
use crate::scheduler::Scheduler;
use crate::state::Simulation;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, WindowSize,
    },
};
use log::info;
use std::io::{self, Write};
use std::time::Instant;

const BACKGROUND: Color = Color::Rgb { r: 0x18, g: 0x18, b: 0x18 };
const INNER_ROD: Color = Color::Rgb { r: 0x00, g: 0xbc, b: 0xd4 };
const OUTER_ROD: Color = Color::Rgb { r: 0xe9, g: 0x1e, b: 0x63 };
const TRAIL_HEAD: Color = Color::Rgb { r: 0x00, g: 0xff, b: 0x00 };
const TRAIL_TAIL: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0xee };
const JOINT: Color = Color::White;

/// Rod thickness in pixels
const ROD_THICKNESS: f64 = 10.0;
/// Joint marker radius in pixels
const JOINT_RADIUS: f64 = 6.0;

const TITLE: &str = "Two rods: e^(iθ) + e^(iπθ)";
const CAPTION: &str = "Inner rod angle θ; outer rod angle πθ. The endpoint trace never closes exactly \
because π is irrational. Watch the near-closures at 22/7 and 355/113.";

/// Terminal measured in cells, with the pixel size of one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub cols: u16,
    pub rows: u16,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Surface {
    pub fn new(cols: u16, rows: u16, cell_size: (u16, u16)) -> Self {
        Surface {
            cols,
            rows,
            cell_width: cell_size.0 as f64,
            cell_height: cell_size.1 as f64,
        }
    }

    /// Measures the current terminal
    pub fn query(fallback: (u16, u16)) -> io::Result<Self> {
        let (cols, rows) = match termsize::get() {
            Some(size) => (size.cols, size.rows),
            None => terminal::size()?,
        };
        Ok(Self::measure(cols, rows, fallback))
    }

    /// Builds a surface for a known cell grid, asking the terminal for its
    /// pixel size and using `fallback` as the cell size if it has none
    pub fn measure(cols: u16, rows: u16, fallback: (u16, u16)) -> Self {
        Self::from_window(cols, rows, terminal::window_size().ok(), fallback)
    }

    /// Cell size from a reported window size; terminals that report no
    /// pixels get `fallback`
    pub fn from_window(
        cols: u16,
        rows: u16,
        window: Option<WindowSize>,
        fallback: (u16, u16),
    ) -> Self {
        match window {
            Some(size) if size.width > 0 && size.height > 0 && size.columns > 0 && size.rows > 0 => {
                Surface {
                    cols,
                    rows,
                    cell_width: size.width as f64 / size.columns as f64,
                    cell_height: size.height as f64 / size.rows as f64,
                }
            }
            _ => Self::new(cols, rows, fallback),
        }
    }

    /// Rows left for the figure once the title and caption are placed
    pub fn drawable_rows(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    /// Pixel area offered to the viewport
    pub fn available(&self) -> (u32, u32) {
        (
            (self.cols as f64 * self.cell_width).round() as u32,
            (self.drawable_rows() as f64 * self.cell_height).round() as u32,
        )
    }

    /// Projection that centers a `width` x `height` viewport in the drawable area
    pub fn projection(&self, width: u32, height: u32) -> Projection {
        let (available_width, available_height) = self.available();
        Projection {
            offset: Point::new(
                (available_width as f64 - width as f64) / 2.0,
                (available_height as f64 - height as f64) / 2.0,
            ),
            scale_x: DOTS_X as f64 / self.cell_width,
            scale_y: DOTS_Y as f64 / self.cell_height,
        }
    }
}

/// Kinematic rod: holds whatever pose it was last given
#[derive(Clone, Copy, Debug)]
pub struct RodBody {
    pub pose: Pose,
    pub color: Color,
}

impl RodBody {
    fn new(color: Color) -> Self {
        RodBody {
            pose: Pose {
                position: Point::default(),
                angle: 0.0,
            },
            color,
        }
    }
}

impl PoseSink for RodBody {
    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

/// Drives the simulation and draws it to the terminal
pub struct CurveWidget {
    simulation: Simulation,
    inner: RodBody,
    outer: RodBody,
    surface: Surface,
    cell_size: (u16, u16),
    /// Debug overlay shown
    debug: bool,
    /// Set once the user asks to leave
    quit: bool,
    /// Screen must be wiped before the next frame
    needs_clear: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl CurveWidget {
    pub fn new(surface: Surface, config: &Config) -> Self {
        let (width, height) = surface.available();
        let mut widget = CurveWidget {
            simulation: Simulation::new(width, height),
            inner: RodBody::new(INNER_ROD),
            outer: RodBody::new(OUTER_ROD),
            surface,
            cell_size: config.cell_size,
            debug: config.debug,
            quit: false,
            needs_clear: true,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        };
        widget.resize(surface);
        widget
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// One simulation step
    pub fn tick(&mut self) {
        self.simulation.tick(&mut self.inner, &mut self.outer);
    }

    /// Refits the figure to a new terminal size
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        let (width, height) = surface.available();
        self.simulation
            .resize(width, height, &mut self.inner, &mut self.outer);
        self.needs_clear = true;
    }

    /// Handle a terminal event
    pub fn event(&mut self, event: Event) {
        match event {
            Event::Resize(cols, rows) => {
                self.resize(Surface::measure(cols, rows, self.cell_size));
            }
            Event::Key(key_event) => self.key(key_event),
            _ => {}
        }
    }

    fn key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.debug = !self.debug;
                self.needs_clear = true;
            }
            _ => {}
        }
    }

    /// Draw the current frame
    pub fn paint(&mut self, out: &mut impl Write) -> io::Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let canvas = self.render();

        queue!(out, BeginSynchronizedUpdate, ResetColor)?;
        if self.needs_clear {
            queue!(out, Clear(ClearType::All))?;
            self.needs_clear = false;
        }
        self.print_line(out, 0, TITLE)?;
        canvas.flush(out, 1)?;
        queue!(out, ResetColor)?;
        if self.surface.rows > 1 {
            self.print_line(out, self.surface.rows - 1, CAPTION)?;
        }
        if self.debug {
            self.paint_debug(out)?;
        }
        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        Ok(())
    }

    /// Rasterizes rods, trail and joints
    fn render(&self) -> Canvas {
        let viewport = self.simulation.viewport();
        let projection = self.surface.projection(viewport.width, viewport.height);
        let mut canvas = Canvas::new(
            self.surface.cols as usize,
            self.surface.drawable_rows() as usize,
            BACKGROUND,
        );

        // Rods are drawn from the pose they were handed
        for rod in [&self.inner, &self.outer] {
            let (a, b) = rod_ends(&rod.pose, viewport.rod_length);
            draw_thick_segment(&mut canvas, &projection, a, b, ROD_THICKNESS, rod.color);
        }

        let trail = self.simulation.trail();
        if !trail.is_empty() {
            let (head, tail) = trail.two_tone();
            draw_polyline(&mut canvas, &projection, trail.snapshot().range(head), TRAIL_HEAD);
            draw_polyline(&mut canvas, &projection, trail.snapshot().range(tail), TRAIL_TAIL);
        }

        let linkage = self.simulation.linkage();
        for point in [linkage.center, linkage.joint, linkage.endpoint] {
            draw_disc(&mut canvas, &projection, point, JOINT_RADIUS, JOINT);
        }

        canvas
    }

    fn print_line(&self, out: &mut impl Write, row: u16, text: &str) -> io::Result<()> {
        let cols = self.surface.cols as usize;
        let text: String = text.chars().take(cols).collect();
        let pad = (cols - text.chars().count()) / 2;
        queue!(
            out,
            MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            MoveTo(pad as u16, row),
            Print(text)
        )
    }

    fn paint_debug(&self, out: &mut impl Write) -> io::Result<()> {
        let viewport = self.simulation.viewport();
        let trail = self.simulation.trail();
        let linkage = self.simulation.linkage();
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!(
                "θ: {:.2}  φ: {:.2}",
                self.simulation.current_pose(RodId::Inner).angle,
                self.simulation.current_pose(RodId::Outer).angle
            ),
            format!("Trail: {}/{}", trail.len(), trail.capacity()),
            format!("|E - C|: {:.1}", distance(linkage.center, linkage.endpoint)),
            format!(
                "Viewport: {}x{}  L: {:.1}",
                viewport.width, viewport.height, viewport.rod_length
            ),
            format!("FPS: {:.2}", self.fps),
        ];
        queue!(out, SetBackgroundColor(BACKGROUND), SetForegroundColor(Color::White))?;
        for (i, line) in lines.iter().enumerate() {
            let row = 1 + i as u16;
            if row + 1 >= self.surface.rows {
                break;
            }
            queue!(out, MoveTo(1, row), Print(line))?;
        }
        Ok(())
    }
}

/// Runs ticks at a fixed rate and draws frames until the user quits
pub fn run(out: &mut impl Write, config: &Config) -> io::Result<()> {
    let surface = Surface::query(config.cell_size)?;
    info!(
        "surface {}x{} cells, cell {:.1}x{:.1} px",
        surface.cols, surface.rows, surface.cell_width, surface.cell_height
    );
    let mut widget = CurveWidget::new(surface, config);
    let mut scheduler = Scheduler::new(Instant::now(), config.tick_interval, config.frame_interval);

    while !widget.should_quit() {
        let timeout = scheduler
            .next_deadline()
            .saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            let event = event::read()?;
            if matches!(event, Event::Resize(..)) {
                scheduler.redraw_at(Instant::now());
            }
            widget.event(event);
            continue;
        }

        let now = Instant::now();
        for _ in 0..scheduler.due_ticks(now) {
            widget.tick();
        }

        if scheduler.frame_due(now) {
            widget.paint(out)?;
            out.flush()?;
        }
    }

    Ok(())
}
