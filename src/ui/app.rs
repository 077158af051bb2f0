//! Main TUI application state and logic

use crate::config::Config;
use crate::engine::adapters::{Algorithm, GridBfs, SortAlgorithm};
use crate::engine::errors::EngineError;
use crate::engine::scheduler::{
    CancelFlag, Observer, RunOptions, RunOutcome, RunState, Session, WAIT_SLICE,
};
use crate::model::element::{ArrayModel, Element};
use crate::model::grid::{Coord, Grid};
use crate::snapshot::{Snapshot, Trace};
use crate::ui::panes::{
    render_bars_pane, render_grid_pane, render_info_pane, render_status_bar, InfoRenderData,
    Legend, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use rand::rngs::StdRng;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

const DELAY_STEP: Duration = Duration::from_millis(10);
const MAX_DELAY: Duration = Duration::from_millis(1000);

/// Source of key presses; lets tests script input instead of reading the terminal
pub trait KeySource {
    /// Wait up to `timeout` for a key press
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Reads key presses from the real terminal
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// What the canvas is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sort(SortAlgorithm),
    Grid,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Sort(sort) => sort.name(),
            Mode::Grid => "bfs",
        }
    }
}

impl From<Algorithm> for Mode {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Sort(sort) => Mode::Sort(sort),
            Algorithm::GridBfs => Mode::Grid,
        }
    }
}

/// A snapshot of either model, as the canvas draws it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    Bars(Vec<Element>),
    Grid(Grid),
}

impl From<Vec<Element>> for Scene {
    fn from(elements: Vec<Element>) -> Self {
        Scene::Bars(elements)
    }
}

impl From<Grid> for Scene {
    fn from(grid: Grid) -> Self {
        Scene::Grid(grid)
    }
}

impl Snapshot for Scene {
    fn estimated_size(&self) -> usize {
        match self {
            Scene::Bars(elements) => elements.estimated_size(),
            Scene::Grid(grid) => grid.estimated_size(),
        }
    }
}

/// Everything the renderer needs; shared with the live observer during a run
pub struct ViewState {
    pub mode: Mode,

    /// Latest scene (live run or idle input)
    pub scene: Scene,

    /// Snapshots of the last run, step 0 being the input
    pub history: Trace<Scene>,

    /// Step being inspected; `None` follows the latest scene
    pub position: Option<usize>,

    pub run_state: RunState,

    /// Steps emitted by the current or last run
    pub step: usize,

    /// Pacing for the next run
    pub options: RunOptions,

    pub grid_cursor: Coord,

    pub status_message: String,

    pub should_quit: bool,
}

impl ViewState {
    /// Scene at the inspected position, or the latest one
    fn visible_scene(&self) -> &Scene {
        self.position
            .and_then(|step| self.history.get(step))
            .unwrap_or(&self.scene)
    }

    fn visible_step(&self) -> usize {
        self.position.unwrap_or(self.step)
    }
}

/// The main application state
pub struct App {
    pub config: Config,
    rng: StdRng,
    arrays: Session<ArrayModel>,
    grids: Session<Grid>,
    pub view: ViewState,

    /// Start a run on the next loop iteration (needs the terminal)
    pending_start: bool,
}

impl App {
    /// Create a new app from a validated configuration
    pub fn new(config: Config, mode: Mode) -> Result<Self, EngineError> {
        let mut rng = config.rng();
        let arrays = Session::new(config.build_array(&mut rng)?);
        let grids = Session::new(config.build_grid()?);

        let scene = match mode {
            Mode::Sort(_) => Scene::Bars(arrays.snapshot()),
            Mode::Grid => Scene::Grid(grids.snapshot()),
        };
        let grid_cursor = grids.input().start();

        let view = ViewState {
            mode,
            scene,
            history: Trace::new(config.trace.memory_limit),
            position: None,
            run_state: RunState::Idle,
            step: 0,
            options: config.run_options(),
            grid_cursor,
            status_message: String::from("Ready!"),
            should_quit: false,
        };

        Ok(App {
            config,
            rng,
            arrays,
            grids,
            view,
            pending_start: false,
        })
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.run_with(terminal, &mut CrosstermKeys)
    }

    /// Run the event loop with an explicit key source
    pub fn run_with<B: Backend, K: KeySource>(
        &mut self,
        terminal: &mut Terminal<B>,
        keys: &mut K,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| render(f, &self.view))?;

            if self.view.should_quit {
                break;
            }

            if self.pending_start {
                self.pending_start = false;
                self.start_run(terminal, keys)?;
                continue;
            }

            if let Some(key) = keys.next_key(Duration::from_millis(50))? {
                self.handle_key_event(key);
            }
        }

        Ok(())
    }

    /// Drive a fresh run, rendering every snapshot as it is emitted
    fn start_run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        keys: &mut dyn KeySource,
    ) -> io::Result<()> {
        let options = self.view.options;
        let mode = self.view.mode;

        self.view.history.clear();
        self.view.position = None;
        self.view.run_state = RunState::Running;
        self.view.step = 0;
        self.view.status_message = format!("Running {}...", mode.name());

        let mut live = LiveView {
            terminal,
            keys,
            view: &mut self.view,
            io_error: None,
        };

        let result = match mode {
            Mode::Sort(sort) => {
                let run = self.arrays.start(sort.adapter(), options);
                live.begin(Scene::Bars(run.initial_snapshot()));
                run.drive(&mut live)
            }
            Mode::Grid => {
                let run = self.grids.start(Box::new(GridBfs), options);
                live.begin(Scene::Grid(run.initial_snapshot()));
                run.drive(&mut live)
            }
        };
        let io_error = live.io_error.take();

        self.view.scene = self.current_scene();
        match result {
            Ok(outcome) => self.finish_run(outcome),
            Err(e) => {
                warn!("run could not start: {}", e);
                self.view.run_state = RunState::Idle;
                self.view.status_message = e.to_string();
            }
        }

        match io_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn finish_run(&mut self, outcome: RunOutcome) {
        self.view.run_state = outcome.state;
        self.view.step = outcome.steps;
        self.view.status_message = match outcome.state {
            RunState::Completed => format!("Completed in {} step(s)", outcome.steps),
            RunState::Cancelled => format!("Cancelled after {} step(s)", outcome.steps),
            other => format!("Run ended {}", other),
        };
    }

    fn current_scene(&self) -> Scene {
        match self.view.mode {
            Mode::Sort(_) => Scene::Bars(self.arrays.snapshot()),
            Mode::Grid => Scene::Grid(self.grids.snapshot()),
        }
    }

    /// Discard the finished run and show the input again
    fn reset(&mut self) {
        self.arrays.reset();
        self.grids.reset();
        self.view.history.clear();
        self.view.position = None;
        self.view.run_state = RunState::Idle;
        self.view.step = 0;
        self.view.scene = self.current_scene();
    }

    fn switch_mode(&mut self, mode: Mode) {
        self.view.mode = mode;
        self.reset();
        self.view.status_message = format!("Selected {}", mode.name());
    }

    fn new_array(&mut self) {
        match self.config.build_array(&mut self.rng) {
            Ok(model) => {
                self.arrays.load(model);
                self.reset();
                self.view.status_message = "New random array".to_string();
            }
            Err(e) => self.view.status_message = e.to_string(),
        }
    }

    fn edit_grid(&mut self, edit: impl FnOnce(&mut Grid, Coord) -> Result<String, EngineError>) {
        let cursor = self.view.grid_cursor;
        let message = match self.grids.edit(|grid| edit(grid, cursor)) {
            Ok(message) => message,
            Err(e) => e.to_string(),
        };
        self.reset();
        self.view.status_message = message;
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let grid = self.grids.input();
        let cursor = self.view.grid_cursor;
        let row = cursor.row.saturating_add_signed(d_row).min(grid.rows() - 1);
        let col = cursor.col.saturating_add_signed(d_col).min(grid.cols() - 1);
        self.view.grid_cursor = Coord::new(row, col);
    }

    fn scrub(&mut self, forward: bool) {
        let Some(last) = self.view.history.last_step() else {
            self.view.status_message = "No recorded run to step through".to_string();
            return;
        };
        let first = self.view.history.first_step();
        let current = self.view.position.unwrap_or(last);
        let next = if forward {
            (current + 1).min(last)
        } else {
            current.saturating_sub(1).max(first)
        };
        self.view.position = Some(next);
        self.view.status_message = format!("Step {}", next);
    }

    fn change_delay(&mut self, faster: bool) {
        let delay = self.view.options.delay;
        self.view.options.delay = if faster {
            delay.saturating_sub(DELAY_STEP)
        } else {
            (delay + DELAY_STEP).min(MAX_DELAY)
        };
        self.view.status_message =
            format!("Delay {} ms", self.view.options.delay.as_millis());
    }

    /// Handle keyboard events while no run is active
    fn handle_key_event(&mut self, key: KeyEvent) {
        let grid_mode = self.view.mode == Mode::Grid;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.view.should_quit = true;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.pending_start = true;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                self.switch_mode(Mode::Sort(SortAlgorithm::ALL[index]));
            }
            KeyCode::Char('g') => self.switch_mode(Mode::Grid),
            KeyCode::Char('r') => {
                self.reset();
                self.view.status_message = "Reset".to_string();
            }
            KeyCode::Char('n') if !grid_mode => self.new_array(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_delay(true),
            KeyCode::Char('-') => self.change_delay(false),
            KeyCode::Left => self.scrub(false),
            KeyCode::Right => self.scrub(true),
            KeyCode::Home => {
                if !self.view.history.is_empty() {
                    self.view.position = Some(self.view.history.first_step());
                    self.view.status_message = "Jumped to start".to_string();
                }
            }
            KeyCode::End => {
                self.view.position = None;
                self.view.status_message = "Jumped to end".to_string();
            }
            KeyCode::Char('h') if grid_mode => self.move_cursor(0, -1),
            KeyCode::Char('j') if grid_mode => self.move_cursor(1, 0),
            KeyCode::Char('k') if grid_mode => self.move_cursor(-1, 0),
            KeyCode::Char('l') if grid_mode => self.move_cursor(0, 1),
            KeyCode::Char('w') if grid_mode => self.edit_grid(|grid, cursor| {
                let wall = grid.toggle_wall(cursor)?;
                Ok(format!(
                    "{} wall at {}",
                    if wall { "Placed" } else { "Removed" },
                    cursor
                ))
            }),
            KeyCode::Char('v') if grid_mode => self.edit_grid(|grid, cursor| {
                let mut placed = 0;
                for row in 0..grid.rows() {
                    let coord = Coord::new(row, cursor.col);
                    if !grid.kind(coord).is_fixed() {
                        grid.set_wall(coord, true)?;
                        placed += 1;
                    }
                }
                Ok(format!("Placed {} wall(s) in column {}", placed, cursor.col))
            }),
            KeyCode::Char('x') if grid_mode => self.edit_grid(|grid, _| {
                grid.clear_walls();
                Ok("Cleared walls".to_string())
            }),
            _ => {}
        }
    }
}

/// Observer used while a run is live: draws each snapshot and polls keys during the delay
struct LiveView<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    keys: &'a mut dyn KeySource,
    view: &'a mut ViewState,
    io_error: Option<io::Error>,
}

impl<B: Backend> LiveView<'_, B> {
    /// Record and show the pre-run scene as step 0
    fn begin(&mut self, initial: Scene) {
        self.view.history.push(initial.clone());
        self.view.scene = initial;
        self.draw();
    }

    fn draw(&mut self) {
        let view = &*self.view;
        if let Err(e) = self.terminal.draw(|f| render(f, view)) {
            self.io_error.get_or_insert(e);
        }
    }

    fn handle_live_key(&mut self, key: KeyEvent, cancel: &CancelFlag) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('c') => {
                debug!("cancel requested at step {}", self.view.step);
                cancel.cancel();
                self.view.status_message = "Cancelling...".to_string();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                cancel.cancel();
                self.view.should_quit = true;
            }
            _ => {}
        }
    }
}

impl<B: Backend, S: Clone + Into<Scene>> Observer<S> for LiveView<'_, B> {
    fn on_snapshot(&mut self, step: usize, snapshot: &S) {
        let scene: Scene = snapshot.clone().into();
        self.view.history.push(scene.clone());
        self.view.scene = scene;
        self.view.step = step;
        self.draw();
    }

    fn wait(&mut self, delay: Duration, cancel: &CancelFlag) {
        let deadline = Instant::now() + delay;
        // poll at least once so a zero delay still sees a cancel key
        loop {
            if cancel.is_cancelled() {
                break;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.keys.next_key(remaining.min(WAIT_SLICE)) {
                Ok(Some(key)) => self.handle_live_key(key, cancel),
                Ok(None) => {}
                Err(e) => {
                    self.io_error.get_or_insert(e);
                    cancel.cancel();
                }
            }
            if Instant::now() >= deadline {
                break;
            }
        }
    }
}

/// Render the UI
fn render(frame: &mut Frame, view: &ViewState) {
    let size = frame.area();

    // Canvas + info on top, status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(main_chunks[0]);

    let title = format!("{} ", view.mode.name());
    let (legend, grid_mode) = match view.visible_scene() {
        Scene::Bars(elements) => {
            render_bars_pane(frame, columns[0], elements, &title);
            (Legend::Elements, false)
        }
        Scene::Grid(grid) => {
            let cursor = (view.run_state == RunState::Idle).then_some(view.grid_cursor);
            render_grid_pane(frame, columns[0], grid, cursor, &title);
            (Legend::Nodes, true)
        }
    };

    render_info_pane(
        frame,
        columns[1],
        InfoRenderData {
            algorithm: view.mode.name(),
            state: view.run_state,
            step: view.visible_step(),
            last_step: view.history.last_step(),
            dropped: view.history.dropped(),
            delay: view.options.delay,
            legend,
        },
    );

    let visible = view.visible_step();
    render_status_bar(
        frame,
        main_chunks[1],
        StatusRenderData {
            message: &view.status_message,
            state: view.run_state,
            grid_mode,
            at_start: view.position.is_some() && visible == view.history.first_step(),
            at_end: view.history.last_step().is_some_and(|last| visible >= last),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::ElementState;
    use crate::model::grid::NodeType;
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    /// Replays a fixed list of key presses, then reports no input
    struct ScriptedKeys(VecDeque<KeyCode>);

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
            Ok(self.0.pop_front().map(KeyEvent::from))
        }
    }

    fn no_keys() -> ScriptedKeys {
        ScriptedKeys(VecDeque::new())
    }

    fn app(mode: Mode) -> App {
        let mut config = Config::default();
        config.array.seed = Some(1);
        config.array.size = 8;
        config.run.delay_ms = 0;
        config.run.visit_delay_ms = 0;
        App::new(config, mode).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code));
    }

    #[test]
    fn test_run_records_history_and_completes() {
        let mut app = app(Mode::Sort(SortAlgorithm::Quick));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        app.start_run(&mut terminal, &mut no_keys()).unwrap();

        assert_eq!(app.view.run_state, RunState::Completed);
        assert_eq!(app.view.history.last_step(), Some(app.view.step));
        match &app.view.scene {
            Scene::Bars(elements) => {
                assert!(elements.iter().all(|e| e.state == ElementState::Sorted));
                assert!(elements.windows(2).all(|w| w[0].value <= w[1].value));
            }
            Scene::Grid(_) => panic!("expected bars"),
        }
    }

    #[test]
    fn test_scrub_and_reset() {
        let mut app = app(Mode::Sort(SortAlgorithm::Bubble));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let input = app.view.scene.clone();

        app.start_run(&mut terminal, &mut no_keys()).unwrap();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.view.position, Some(app.view.step - 1));

        press(&mut app, KeyCode::Home);
        assert_eq!(app.view.visible_scene(), &input);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.view.run_state, RunState::Idle);
        assert_eq!(app.view.scene, input);
        assert!(app.view.history.is_empty());
    }

    #[test]
    fn test_escape_cancels_live_run() {
        let mut app = app(Mode::Sort(SortAlgorithm::Insertion));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut keys = ScriptedKeys(VecDeque::from([KeyCode::Esc]));

        app.start_run(&mut terminal, &mut keys).unwrap();

        assert_eq!(app.view.run_state, RunState::Cancelled);
        assert_eq!(app.view.step, 1);
        assert!(!app.view.should_quit);
    }

    #[test]
    fn test_quit_during_run_leaves_event_loop() {
        let mut app = app(Mode::Sort(SortAlgorithm::Selection));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut keys = ScriptedKeys(VecDeque::from([KeyCode::Char('q')]));

        press(&mut app, KeyCode::Enter);
        app.run_with(&mut terminal, &mut keys).unwrap();

        assert!(app.view.should_quit);
        assert_eq!(app.view.run_state, RunState::Cancelled);
        assert_eq!(app.view.step, 1);
    }

    #[test]
    fn test_grid_run_marks_path() {
        let mut app = app(Mode::Grid);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        app.start_run(&mut terminal, &mut no_keys()).unwrap();

        assert_eq!(app.view.run_state, RunState::Completed);
        match &app.view.scene {
            Scene::Grid(grid) => {
                assert!(grid.count(NodeType::Path) > 0);
                assert_eq!(grid.kind(grid.start()), NodeType::Start);
            }
            Scene::Bars(_) => panic!("expected grid"),
        }
    }

    #[test]
    fn test_grid_editing() {
        let mut app = app(Mode::Grid);
        let start = app.view.grid_cursor;

        press(&mut app, KeyCode::Char('w'));
        assert!(app.view.status_message.contains("start or end"));

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('w'));
        let wall = Coord::new(start.row, start.col + 1);
        match &app.view.scene {
            Scene::Grid(grid) => assert_eq!(grid.kind(wall), NodeType::Wall),
            Scene::Bars(_) => panic!("expected grid"),
        }
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut app = app(Mode::Sort(SortAlgorithm::Merge));
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.view.options.delay, Duration::ZERO);

        for _ in 0..200 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.view.options.delay, MAX_DELAY);
    }
}
