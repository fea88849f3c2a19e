use boundlife::{CellState, Pos2, Simulation};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, style, terminal,
};
use std::io::{self, Write};

const FRAME: char = '▒';
const JUST_DRAWN: char = '▓';

pub enum ConsoleCommand {
    Exit,
    TogglePause,
    /// Paint the given grid cell alive
    Paint(Pos2),
    Handled,
}

/// Glyph drawn for each cell state
fn glyph(state: CellState) -> char {
    match state {
        CellState::Dead => ' ',
        CellState::Alive => '█',
    }
}

/// Pan offset and paint markers of the console, independent of the terminal
#[derive(Debug)]
struct Viewport {
    tl: Pos2,
    // cells painted since the last step, shown until the next generation
    drawn: Vec<Pos2>,
    drawn_gen: u64,
}
impl Viewport {
    fn new() -> Self {
        Self {
            // start one cell up and left so the frame is visible
            tl: -Pos2::one(),
            drawn: Vec::new(),
            drawn_gen: 0,
        }
    }

    /// Translates a terminal cell into a grid coordinate
    fn to_grid(&self, column: u16, row: u16) -> Pos2 {
        self.tl + Pos2::new(column as i32, row as i32)
    }

    /// Moves the view one cell in the direction of an arrow key
    fn pan(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.tl.y -= 1,
            KeyCode::Down => self.tl.y += 1,
            KeyCode::Left => self.tl.x -= 1,
            KeyCode::Right => self.tl.x += 1,
            _ => {}
        }
    }

    /// Marks `pos` as painted during generation `generation`
    fn mark_drawn(&mut self, pos: Pos2, generation: u64) {
        if self.drawn_gen != generation {
            self.drawn.clear();
            self.drawn_gen = generation;
        }
        self.drawn.push(pos);
    }

    /// Lays out `rows` lines of `cols` glyphs, starting at the pan offset
    fn frame(&mut self, sim: &Simulation, cols: u16, rows: u16) -> Vec<String> {
        if sim.generation() != self.drawn_gen {
            self.drawn.clear();
        }

        let (cols, rows) = (cols as i32, rows as i32);
        let mut screen = vec![vec![' '; cols as usize]; rows as usize];
        let tl = self.tl;
        let mut put = |pos: Pos2, ch: char| {
            let (col, row) = (pos.x - tl.x, pos.y - tl.y);
            if (0..cols).contains(&col) && (0..rows).contains(&row) {
                screen[row as usize][col as usize] = ch;
            }
        };

        // the frame is a one-cell ring just outside the grid
        let view = sim.snapshot();
        let (w, h) = (view.width(), view.height());
        for x in -1..=w {
            put(Pos2::new(x, -1), FRAME);
            put(Pos2::new(x, h), FRAME);
        }
        for y in 0..h {
            put(Pos2::new(-1, y), FRAME);
            put(Pos2::new(w, y), FRAME);
        }

        for (pos, state) in view.window(tl, tl + Pos2::new(cols, rows)) {
            let ch = if self.drawn.contains(&pos) {
                JUST_DRAWN
            } else {
                glyph(state)
            };
            put(pos, ch);
        }

        screen.into_iter().map(String::from_iter).collect()
    }
}

pub struct ConsoleRender {
    viewport: Viewport,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self {
            viewport: Viewport::new(),
            report: String::new(),
        })
    }

    pub fn render(&mut self, sim: &Simulation, paused: bool) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last row is reserved for the report footer
        let grid_rows = rows.saturating_sub(1);

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in (0..).zip(self.viewport.frame(sim, cols, grid_rows)) {
            queue!(stdout, cursor::MoveTo(0, row), style::Print(line))?;
        }

        // write footer
        let state = if paused { " [paused]" } else { "" };
        queue!(
            stdout,
            cursor::MoveTo(0, grid_rows),
            style::Print(format!("{}{}", self.report, state))
        )?;

        stdout.flush()
    }

    #[inline]
    pub fn mark_drawn(&mut self, pos: Pos2, generation: u64) {
        self.viewport.mark_drawn(pos, generation);
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            // CTRL+C or q
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
            | event::Event::Key(KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }) => ConsoleCommand::Exit,
            // space or p to pause and continue
            event::Event::Key(KeyEvent {
                code: KeyCode::Char(' ' | 'p'),
                kind: KeyEventKind::Press,
                ..
            }) => ConsoleCommand::TogglePause,
            // arrows to move grid
            event::Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => {
                self.viewport.pan(code);
                ConsoleCommand::Handled
            }
            // click or drag to paint cells alive
            event::Event::Mouse(MouseEvent {
                kind:
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left),
                column,
                row,
                ..
            }) => ConsoleCommand::Paint(self.viewport.to_grid(column, row)),
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        terminal::disable_raw_mode().expect("disable raw mode");
        execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )
        .expect("restore terminal");
    }
}
