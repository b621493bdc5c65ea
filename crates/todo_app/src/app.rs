//! `eframe` window over `TaskListController`.
//!
//! The window owns the gateway; every frame builds a borrowed repository over
//! its connection. Drawing uses the controller snapshot only.

use eframe::egui;
use log::info;
use todo_core::{Gateway, SqliteTaskRepository, TaskListController, TaskService};

const WINDOW_TITLE: &str = "To-Do App";

pub struct TodoApp {
    gateway: Gateway,
    controller: TaskListController,
}

impl TodoApp {
    /// Takes a gateway whose schema is already applied and loads the first list.
    pub fn new(gateway: Gateway) -> Self {
        let mut controller = TaskListController::new();
        controller.load(&TaskService::new(SqliteTaskRepository::new(
            gateway.connection(),
        )));
        info!(
            "event=window_ready module=app status=ok target={} tasks={}",
            gateway.target(),
            controller.tasks().len()
        );
        Self {
            gateway,
            controller,
        }
    }
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let service = TaskService::new(SqliteTaskRepository::new(self.gateway.connection()));

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    self.controller.submit(&service);
                }
                if ui.button("Remove").clicked() {
                    self.controller.remove_selected(&service);
                }
            });
            if let Some(message) = self.controller.last_error() {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let entry = ui.add(
                egui::TextEdit::singleline(self.controller.entry_mut())
                    .hint_text("New task")
                    .desired_width(f32::INFINITY),
            );
            if entry.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                self.controller.submit(&service);
                entry.request_focus();
            }

            ui.separator();

            let mut clicked = None;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, task) in self.controller.tasks().iter().enumerate() {
                        let selected = self.controller.selected() == Some(index);
                        if ui.selectable_label(selected, task.title.as_str()).clicked() {
                            clicked = Some(index);
                        }
                    }
                });
            if let Some(index) = clicked {
                self.controller.select(index);
            }
        });
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(gateway: Gateway) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 520.0])
            .with_min_inner_size([280.0, 240.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(TodoApp::new(gateway)))),
    )
}
