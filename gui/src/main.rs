use eframe::egui;
use eframe::egui::{Pos2, Rect, Response, Ui};
use eframe::run_native;
use life_engine::{catalog, Game, Listener, Speed};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

const SPACE_BETWEEN_CELLS: f32 = 1.0;
const RANDOM_DENSITY: f64 = 0.5;
const IDLE_POLL: Duration = Duration::from_millis(20);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CellSize {
    Small,
    Medium,
    Big,
}

impl CellSize {
    const ALL: [CellSize; 3] = [CellSize::Small, CellSize::Medium, CellSize::Big];

    fn pixels(self) -> f32 {
        match self {
            CellSize::Small => 5.0,
            CellSize::Medium => 10.0,
            CellSize::Big => 20.0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CellSize::Small => "small",
            CellSize::Medium => "medium sized",
            CellSize::Big => "big",
        }
    }
}

/// Pacing shared with the stepping thread.
struct Stepper {
    running: AtomicBool,
    interval_ms: AtomicU64,
    shutdown: AtomicBool,
}

impl Stepper {
    fn new(speed: Speed) -> Self {
        Self {
            running: AtomicBool::new(false),
            interval_ms: AtomicU64::new(speed.interval().as_millis() as u64),
            shutdown: AtomicBool::new(false),
        }
    }

    fn set_speed(&self, speed: Speed) {
        self.interval_ms
            .store(speed.interval().as_millis() as u64, Ordering::Relaxed);
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    /// Advances the game unless stepping was stopped in the meantime.
    fn step(&self, game: &Mutex<Game>) -> bool {
        if !self.running.load(Ordering::Relaxed) {
            return false;
        }
        lock(game).next();
        true
    }
}

fn lock(game: &Mutex<Game>) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    catalog::init();

    // Shared game wrapped in Arc<Mutex<T>> for synchronization between threads
    let shared_game = Arc::new(Mutex::new(Game::default()));
    let stepper = Arc::new(Stepper::new(Speed::default()));

    run_native(
        "Game of Life GUI",
        eframe::NativeOptions::default(),
        Box::new(|cc| {
            // Every change to the game asks the UI to redraw
            let ctx = cc.egui_ctx.clone();
            let repaint: Arc<dyn Listener> = Arc::new(move |_: &Game| ctx.request_repaint());
            lock(&shared_game).subscribe(Arc::clone(&repaint));

            // Spawn a background thread that steps the game while running
            let game = Arc::clone(&shared_game);
            let pacing = Arc::clone(&stepper);
            thread::spawn(move || {
                let mut generations = 0u64;
                while !pacing.shutdown.load(Ordering::Relaxed) {
                    if !pacing.running.load(Ordering::Relaxed) {
                        thread::sleep(IDLE_POLL);
                        continue;
                    }
                    thread::sleep(pacing.interval());
                    // "stop" may have been pressed during the sleep
                    if pacing.step(&game) {
                        generations += 1;
                        if generations % 100 == 0 {
                            log::info!("stepped {generations} generations");
                        }
                    }
                }
                log::debug!("stepping thread finished");
            });

            Ok(Box::new(GuiOfLife::new(cc, shared_game, stepper, repaint)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the window: {err}"))
}

struct GuiOfLife {
    game: Arc<Mutex<Game>>,
    stepper: Arc<Stepper>,
    repaint: Arc<dyn Listener>,
    shape: String,
    speed: Speed,
    cell_size: CellSize,
    // State a drag paints, decided by the cell it started on
    paint_alive: Option<bool>,
    message: Option<String>,
}

impl GuiOfLife {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        game: Arc<Mutex<Game>>,
        stepper: Arc<Stepper>,
        repaint: Arc<dyn Listener>,
    ) -> Self {
        let shape = catalog::global()
            .names()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            game,
            stepper,
            repaint,
            shape,
            speed: Speed::default(),
            cell_size: CellSize::Medium,
            paint_alive: None,
            message: None,
        }
    }

    fn running(&self) -> bool {
        self.stepper.running.load(Ordering::Relaxed)
    }

    fn set_running(&self, running: bool) {
        self.stepper.running.store(running, Ordering::Relaxed);
    }

    fn seed_selected(&mut self) {
        let Some(pattern) = catalog::by_name(&self.shape) else {
            return;
        };
        match lock(&self.game).seed(pattern) {
            Ok(()) => self.message = None,
            Err(err) => {
                log::warn!("{err}");
                self.message = Some("Grid is too small for the selected shape!".to_string());
            }
        }
    }

    fn randomize(&mut self) {
        if let Err(err) = lock(&self.game).randomize(RANDOM_DENSITY) {
            log::error!("{err}");
        }
    }

    fn controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let before = self.shape.clone();
            egui::ComboBox::from_id_salt("shape")
                .selected_text(self.shape.as_str())
                .show_ui(ui, |ui| {
                    for name in catalog::global().names() {
                        ui.selectable_value(&mut self.shape, name.to_string(), name);
                    }
                });
            if self.shape != before {
                self.seed_selected();
            }

            if ui.button("next").clicked() {
                lock(&self.game).next();
            }
            let start_label = if self.running() { "stop" } else { "start" };
            if ui.button(start_label).clicked() {
                self.set_running(!self.running());
            }
            if ui.button("clear").clicked() {
                lock(&self.game).clear();
                self.message = None;
            }
            if ui.button("randomize").clicked() {
                self.randomize();
            }

            egui::ComboBox::from_id_salt("speed")
                .selected_text(self.speed.label())
                .show_ui(ui, |ui| {
                    for speed in Speed::ALL {
                        ui.selectable_value(&mut self.speed, speed, speed.label());
                    }
                });
            self.stepper.set_speed(self.speed);

            egui::ComboBox::from_id_salt("cell size")
                .selected_text(self.cell_size.label())
                .show_ui(ui, |ui| {
                    for size in CellSize::ALL {
                        ui.selectable_value(&mut self.cell_size, size, size.label());
                    }
                });

            ui.label(format!("Generation {}", lock(&self.game).generations()));
        });

        if let Some(message) = &self.message {
            ui.colored_label(egui::Color32::RED, message);
        }
    }

    fn pitch(&self) -> f32 {
        self.cell_size.pixels() + SPACE_BETWEEN_CELLS
    }

    /// Fits the number of columns and rows to the space left in the panel.
    fn fit_grid(&self, ui: &Ui) {
        let available = ui.available_size();
        let columns = ((available.x / self.pitch()).floor() as usize).max(1);
        let rows = ((available.y / self.pitch()).floor() as usize).max(1);
        if let Err(err) = lock(&self.game).resize(columns, rows) {
            log::warn!("{err}");
        }
    }

    fn cell_at(&self, game: &Game, origin: Pos2, pointer: Pos2) -> Option<(usize, usize)> {
        let offset = pointer - origin;
        if offset.x < 0.0 || offset.y < 0.0 {
            return None;
        }
        let column = (offset.x / self.pitch()) as usize;
        let row = (offset.y / self.pitch()) as usize;
        (column < game.columns() && row < game.rows()).then_some((column, row))
    }

    fn paint(&mut self, rect: Rect, response: &Response) {
        let mut game = lock(&self.game);
        if let Some((column, row)) = response
            .interact_pointer_pos()
            .and_then(|pointer| self.cell_at(&game, rect.min, pointer))
        {
            let result = if response.clicked() {
                game.toggle(column, row).map(|_| ())
            } else if response.drag_started() || response.dragged() {
                let alive = game.is_alive(column, row).unwrap_or(false);
                let target = *self.paint_alive.get_or_insert(!alive);
                match (target, alive) {
                    (true, false) => game.set_alive(column, row),
                    (false, true) => game.set_dead(column, row),
                    _ => Ok(()),
                }
            } else {
                Ok(())
            };
            if let Err(err) = result {
                log::warn!("{err}");
            }
        }
        if response.drag_stopped() {
            self.paint_alive = None;
        }
    }

    fn create_grid(&mut self, ui: &mut Ui) {
        self.fit_grid(ui);
        let pitch = self.pitch();
        let cell_size = self.cell_size.pixels();

        let (columns, rows, population) = {
            let game = lock(&self.game);
            (game.columns(), game.rows(), game.population())
        };

        // Calculate the grid starting point
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(pitch * columns as f32, pitch * rows as f32),
            egui::Sense::click_and_drag(),
        );

        let painter = ui.painter(); // Get the painter for the UI
        painter.rect_filled(rect, 0.0, egui::Color32::DARK_GRAY);

        // Only live cells are drawn on top of the dead background
        for cell in &population {
            let pos = rect.min
                + egui::vec2(cell.column() as f32 * pitch, cell.row() as f32 * pitch);
            painter.rect_filled(
                Rect::from_min_size(pos, egui::vec2(cell_size, cell_size)),
                cell_size / 4f32,
                egui::Color32::WHITE,
            );
        }

        self.paint(rect, &response);
    }
}

impl eframe::App for GuiOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Game of Life");
            self.controls(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.create_grid(ui);
        });
    }
}

impl Drop for GuiOfLife {
    fn drop(&mut self) {
        self.stepper.running.store(false, Ordering::Relaxed);
        self.stepper.shutdown.store(true, Ordering::Relaxed);
        lock(&self.game).unsubscribe(&self.repaint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_stepper_does_not_advance() {
        let game = Mutex::new(Game::new(5, 5).unwrap());
        let stepper = Stepper::new(Speed::Fast);

        stepper.running.store(true, Ordering::Relaxed);
        assert!(stepper.step(&game));
        assert_eq!(lock(&game).generations(), 1);

        // Stopping between the sleep and the step must win
        stepper.running.store(false, Ordering::Relaxed);
        assert!(!stepper.step(&game));
        assert_eq!(lock(&game).generations(), 1);
    }

    #[test]
    fn speed_changes_reach_the_stepper() {
        let stepper = Stepper::new(Speed::default());
        assert_eq!(stepper.interval(), Duration::from_millis(100));
        stepper.set_speed(Speed::SuperSlow);
        assert_eq!(stepper.interval(), Duration::from_secs(1));
    }
}
