// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! `PlayerApp` is the single application context: it owns the sequencer,
//! the playback clock, the display surface and the folder watcher, and is
//! the only place any of them are mutated. Everything runs on the UI
//! thread; the watcher thread only feeds a channel drained in `update`.

use crate::config::PlayerConfig;
use crate::error::PlayerError;
use crate::io::export;
use crate::io::watcher::FolderWatcher;
use crate::models::{clock::PlaybackClock, sequencer::Sequencer};
use crate::ui::{canvas, canvas::FrameDisplay, toolbar, toolbar::ToolbarAction};
use std::path::PathBuf;
use std::time::Instant;

/// Main application state.
pub struct PlayerApp {
    /// Folder the frames are read from
    folder: PathBuf,

    config: PlayerConfig,

    /// Playlist, cursor and playback state
    sequencer: Sequencer,

    clock: PlaybackClock,

    /// Display surface the sequencer renders into
    display: FrameDisplay,

    /// Live folder monitoring; `None` if the watch could not be started
    watcher: Option<FolderWatcher>,

    /// Last title sent to the window, to avoid redundant viewport commands
    window_title: String,
}

impl PlayerApp {
    /// Create the app, load the folder and start watching it.
    pub fn new(cc: &eframe::CreationContext<'_>, folder: PathBuf, config: PlayerConfig) -> Self {
        let mut app = Self::with_folder(folder, config);

        let ctx = cc.egui_ctx.clone();
        match FolderWatcher::start(&app.folder, move || ctx.request_repaint()) {
            Ok(watcher) => app.watcher = Some(watcher),
            Err(e) => {
                log::error!("{}", e);
                notify_user(&e);
            }
        }

        app
    }

    /// Build the app state for `folder` without a watcher or window.
    fn with_folder(folder: PathBuf, config: PlayerConfig) -> Self {
        let mut app = Self {
            sequencer: Sequencer::new(config.fps),
            clock: PlaybackClock::new(config.fps, Instant::now()),
            display: FrameDisplay::new(),
            watcher: None,
            window_title: String::new(),
            folder,
            config,
        };
        app.sequencer.render(&mut app.display);
        if let Err(e) = app.reconcile() {
            notify_user(&e);
        }
        app
    }

    /// Resynchronize the playlist with the folder.
    ///
    /// On failure the previous playlist stays in place.
    fn reconcile(&mut self) -> Result<bool, PlayerError> {
        match self.sequencer.reconcile(&self.folder, &mut self.display) {
            Ok(true) => {
                self.display.clear_cache();
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                log::error!("Reconciliation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Drain watcher events; a whole batch costs one reconciliation.
    fn handle_folder_events(&mut self) {
        let Some(watcher) = &self.watcher else {
            return;
        };
        let events = watcher.drain();
        if events.is_empty() {
            return;
        }

        log::debug!("{} folder events", events.len());
        if let Err(e) = self.reconcile() {
            notify_user(&e);
        }
    }

    /// Apply a playback control. Export is handled by the caller since it
    /// needs a save dialog.
    fn handle_action(&mut self, action: ToolbarAction, now: Instant) {
        match action {
            ToolbarAction::TogglePlayback => {
                let running = !self.sequencer.state().running;
                self.sequencer.set_running(running);
                log::info!("Playback {}", if running { "resumed" } else { "paused" });
            }
            ToolbarAction::StepBackward | ToolbarAction::StepForward => {
                let step = if action == ToolbarAction::StepForward { 1 } else { -1 };
                self.sequencer.advance(step, &mut self.display);
                log::debug!("Stepped to frame {}", self.sequencer.cursor());
            }
            ToolbarAction::SetRate(fps) => {
                let applied = self.sequencer.set_rate(fps);
                self.clock.set_rate(applied, now);
                log::debug!("Rate set to {} fps ({:?} per frame)", applied, self.clock.interval());
            }
            ToolbarAction::Export | ToolbarAction::None => {}
        }
    }

    /// Advance one frame if the clock says a tick is due.
    fn drive_clock(&mut self, now: Instant) -> bool {
        if !self.clock.poll(now) {
            return false;
        }
        self.sequencer.tick(&mut self.display)
    }

    /// Ask for an output path and export the current playlist.
    fn export_with_dialog(&mut self) {
        // Snapshot first so the dialog cannot race a reconciliation
        let snapshot = self.sequencer.snapshot();
        if snapshot.is_empty() {
            notify_user(&PlayerError::EmptyPlaylist);
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .set_title("Save GIF")
            .add_filter("GIF Files", &["gif"])
            .set_file_name("animation.gif")
            .save_file()
        else {
            return;
        };
        let path = export::ensure_gif_extension(path);

        match export::export_gif(&snapshot, self.sequencer.state().rate, &path) {
            Ok(summary) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Info)
                    .set_title("Export Complete")
                    .set_description(format!(
                        "GIF saved to:\n{}\n\n{} frames, {}x{}, {} ms per frame",
                        path.display(),
                        summary.frames,
                        summary.width,
                        summary.height,
                        summary.delay_ms
                    ))
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                notify_user(&e);
            }
        }
    }

    /// Space and arrow shortcuts, unless a widget has keyboard focus and
    /// would handle the same key itself.
    fn handle_keyboard(&self, ctx: &egui::Context) -> ToolbarAction {
        if ctx.wants_keyboard_input() || ctx.memory(|m| m.focused().is_some()) {
            return ToolbarAction::None;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                ToolbarAction::TogglePlayback
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                ToolbarAction::StepBackward
            } else if i.key_pressed(egui::Key::ArrowRight) {
                ToolbarAction::StepForward
            } else {
                ToolbarAction::None
            }
        })
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.display.window_title(&self.config.title);
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_folder_events();

        let now = Instant::now();
        self.drive_clock(now);

        let key_action = self.handle_keyboard(ctx);
        self.handle_action(key_action, now);

        // Playback controls (bottom)
        let toolbar_action = egui::TopBottomPanel::bottom("controls")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    self.sequencer.state(),
                    !self.sequencer.playlist().is_empty(),
                )
            })
            .inner;

        match toolbar_action {
            ToolbarAction::Export => self.export_with_dialog(),
            action => self.handle_action(action, now),
        }

        // Main canvas (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas::show(ui, &mut self.display);
        });

        self.sync_title(ctx);

        // Wake up for the next tick
        if self.sequencer.state().running && !self.sequencer.playlist().is_empty() {
            ctx.request_repaint_after(self.clock.time_until_next(Instant::now()));
        }
    }
}

/// Show a native message box for `err`.
fn notify_user(err: &PlayerError) {
    let level = if err.is_warning() {
        rfd::MessageLevel::Warning
    } else {
        rfd::MessageLevel::Error
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(err.title())
        .set_description(err.to_string())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app_with(names: &[&str]) -> (tempfile::TempDir, PlayerApp) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "<svg/>").unwrap();
        }
        let app = PlayerApp::with_folder(dir.path().to_path_buf(), PlayerConfig::default());
        (dir, app)
    }

    #[test]
    fn test_startup_loads_folder() {
        let (_dir, app) = app_with(&["a.svg", "b.svg", "c.svg"]);
        assert_eq!(app.sequencer.playlist().len(), 3);
        assert_eq!(app.sequencer.cursor(), 0);
        assert_eq!(
            app.display.window_title("SVG Animator"),
            "SVG Animator - (1/3) a.svg"
        );
    }

    #[test]
    fn test_clock_ticks_only_while_running() {
        let (_dir, mut app) = app_with(&["a.svg", "b.svg", "c.svg"]);
        let start = Instant::now();
        app.handle_action(ToolbarAction::SetRate(10), start);

        assert!(app.drive_clock(start + Duration::from_millis(100)));
        assert_eq!(app.sequencer.cursor(), 1);

        app.handle_action(ToolbarAction::TogglePlayback, start);
        assert!(!app.drive_clock(start + Duration::from_millis(300)));
        assert_eq!(app.sequencer.cursor(), 1);

        // Stepping still works while paused
        app.handle_action(ToolbarAction::StepBackward, start);
        app.handle_action(ToolbarAction::StepBackward, start);
        assert_eq!(app.sequencer.cursor(), 2);
    }

    #[test]
    fn test_rate_change_updates_clock() {
        let (_dir, mut app) = app_with(&["a.svg"]);
        app.handle_action(ToolbarAction::SetRate(500), Instant::now());
        assert_eq!(app.sequencer.state().rate, 120);
        assert_eq!(app.clock.interval(), Duration::from_millis(8));
    }

    fn key_press(key: egui::Key) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_shortcuts_map_keys() {
        let (_dir, app) = app_with(&["a.svg"]);
        let ctx = egui::Context::default();
        for (key, expected) in [
            (egui::Key::Space, ToolbarAction::TogglePlayback),
            (egui::Key::ArrowLeft, ToolbarAction::StepBackward),
            (egui::Key::ArrowRight, ToolbarAction::StepForward),
        ] {
            let mut action = ToolbarAction::None;
            let _ = ctx.run(key_press(key), |ctx| action = app.handle_keyboard(ctx));
            assert_eq!(action, expected, "{key:?}");
        }
    }

    #[test]
    fn test_shortcuts_yield_to_focused_widget() {
        let (_dir, app) = app_with(&["a.svg"]);
        let ctx = egui::Context::default();
        let mut action = ToolbarAction::TogglePlayback;
        let _ = ctx.run(key_press(egui::Key::Space), |ctx| {
            ctx.memory_mut(|m| m.request_focus(egui::Id::new("fps_slider")));
            action = app.handle_keyboard(ctx);
        });
        assert_eq!(action, ToolbarAction::None);
    }

    #[test]
    fn test_watcher_events_reach_playlist() {
        let (dir, mut app) = app_with(&["a.svg"]);
        app.watcher = Some(FolderWatcher::start(dir.path(), || {}).unwrap());
        std::fs::write(dir.path().join("b.svg"), "<svg/>").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.handle_folder_events();
            if app.sequencer.playlist().len() == 2 {
                assert_eq!(
                    app.display.window_title("SVG Animator"),
                    "SVG Animator - (1/2) a.svg"
                );
                return;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("playlist never picked up b.svg");
    }

    #[test]
    fn test_reconcile_picks_up_new_frames() {
        let (dir, mut app) = app_with(&["a.svg", "c.svg"]);
        app.handle_action(ToolbarAction::StepForward, Instant::now());
        std::fs::write(dir.path().join("b.svg"), "<svg/>").unwrap();

        assert!(app.reconcile().unwrap());
        assert_eq!(app.sequencer.playlist().len(), 3);
        assert_eq!(app.sequencer.cursor(), 1);
        assert!(!app.reconcile().unwrap());
    }
}
