use std::fs;
use std::io::{self, Write, stdout};
use std::panic;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info};
use placeholdr_core::{Dimensions, Generator, RenderedSurface};
use placeholdr_protocol::RenderTheme;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

/// Width/height change per arrow key press.
const STEP: i64 = 10;

/// How a surface maps onto terminal cells. Each cell shows two vertically
/// stacked pixels via the upper-half block.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fit {
    /// Terminal columns and rows actually covered by the image.
    cols: u16,
    rows: u16,
    /// Offset of the image inside the content area.
    left: u16,
    top: u16,
    /// Surface pixels per half-cell.
    pixels_per_cell: f64,
}

impl Fit {
    fn new(surface_w: u32, surface_h: u32, area_cols: u16, area_rows: u16) -> Option<Self> {
        if area_cols == 0 || area_rows == 0 {
            return None;
        }
        let cells_w = f64::from(area_cols);
        let cells_h = f64::from(area_rows) * 2.0;
        let scale = (cells_w / f64::from(surface_w)).min(cells_h / f64::from(surface_h));
        let cols = ((f64::from(surface_w) * scale).floor() as u16).clamp(1, area_cols);
        let rows = ((f64::from(surface_h) * scale / 2.0).ceil() as u16).clamp(1, area_rows);
        Some(Self {
            cols,
            rows,
            left: (area_cols - cols) / 2,
            top: (area_rows - rows) / 2,
            pixels_per_cell: 1.0 / scale,
        })
    }

    /// Nearest surface pixel for column `col` and half-row `half_row`.
    fn source(&self, col: u16, half_row: u32, surface: &RenderedSurface) -> Option<(u32, u32)> {
        let x = ((f64::from(col) + 0.5) * self.pixels_per_cell) as u32;
        let y = ((f64::from(half_row) + 0.5) * self.pixels_per_cell) as u32;
        (x < surface.width() && y < surface.height()).then_some((x, y))
    }
}

fn cell_color(surface: &RenderedSurface, at: Option<(u32, u32)>) -> Color {
    match at.and_then(|(x, y)| surface.pixel(x, y)) {
        Some([r, g, b, _]) => Color::Rgb(r, g, b),
        None => Color::Reset,
    }
}

/// The last rendered frame and what it was rendered for.
struct Frame {
    key: (Dimensions, RenderTheme),
    surface: RenderedSurface,
}

/// Interactive preview loop: arrows resize, `t` toggles theme, `s` saves,
/// `q`/`Esc` quits.
pub fn run_preview(generator: &mut Generator, out_dir: &Path) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Best effort: the panic message should land on a usable terminal.
        restore(&mut io::stdout(), disable_raw_mode()).ok();
        default_hook(info);
    }));

    let result = preview_loop(&mut terminal, generator, out_dir);

    // Back to the default hook now that the screen is ours again.
    drop(panic::take_hook());
    let restored = restore(terminal.backend_mut(), disable_raw_mode());
    result.and(restored.map_err(anyhow::Error::from))
}

/// Leave the alternate screen and show the cursor even if leaving raw mode
/// (`raw`) failed; the first error wins.
fn restore(out: &mut impl Write, raw: io::Result<()>) -> io::Result<()> {
    let screen = execute!(out, LeaveAlternateScreen);
    let cursor = execute!(out, Show);
    raw.and(screen).and(cursor)
}

fn preview_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    generator: &mut Generator,
    out_dir: &Path,
) -> Result<()> {
    let mut frame: Option<Frame> = None;
    let mut status: Option<String> = None;

    loop {
        let key = (generator.submitted(), generator.theme());
        if frame.as_ref().is_none_or(|f| f.key != key) {
            match generator.preview() {
                Ok(surface) => frame = Some(Frame { key, surface }),
                Err(e) => {
                    generator.report_error(e.to_string());
                    frame = None;
                }
            }
        }

        terminal.draw(|f| {
            let area = f.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let message = generator
                .error()
                .map(str::to_owned)
                .or_else(|| status.clone())
                .unwrap_or_default();
            let header = Block::default()
                .title(format!(
                    " placeholdr {} {} | ←→ width ↑↓ height | t theme | s save | q quit {message}",
                    generator.submitted(),
                    generator.theme(),
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            f.render_widget(header, header_area);

            let content = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            let Some(current) = &frame else {
                f.render_widget(Paragraph::new("nothing to preview"), content);
                return;
            };
            let surface = &current.surface;
            let Some(fit) = Fit::new(surface.width(), surface.height(), content.width, content.height)
            else {
                return;
            };

            let buf = f.buffer_mut();
            for row in 0..fit.rows {
                for col in 0..fit.cols {
                    let top = cell_color(surface, fit.source(col, u32::from(row) * 2, surface));
                    let bottom =
                        cell_color(surface, fit.source(col, u32::from(row) * 2 + 1, surface));
                    let x = content.x + fit.left + col;
                    let y = content.y + fit.top + row;
                    buf[(x, y)].set_char('▀').set_fg(top).set_bg(bottom);
                }
            }
        })?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let width = i64::from(generator.width());
        let height = i64::from(generator.height());
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Left => resize(generator, width - STEP, height),
            KeyCode::Right => resize(generator, width + STEP, height),
            KeyCode::Down => resize(generator, width, height - STEP),
            KeyCode::Up => resize(generator, width, height + STEP),
            KeyCode::Char('t') => generator.toggle_theme(),
            KeyCode::Char('s') => {
                status = match save(generator, out_dir) {
                    Ok(path) => Some(format!("saved {}", path.display())),
                    Err(e) => {
                        generator.report_error(format!("{e:#}"));
                        None
                    }
                };
            }
            _ => {}
        }
    }

    Ok(())
}

/// Apply new input values and submit them; a rejection stays visible in
/// the header until the next edit.
fn resize(generator: &mut Generator, width: i64, height: i64) {
    generator.set_width(width);
    generator.set_height(height);
    if let Err(rejection) = generator.submit() {
        debug!("resize rejected: {}", rejection.reason());
    }
}

fn save(generator: &mut Generator, out_dir: &Path) -> Result<PathBuf> {
    let download = generator.download()?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(&download.file_name);
    fs::write(&path, &download.png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(path)
}
