// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background folder monitoring.
//!
//! The notify backend runs on its own thread. It never touches playback
//! state: it only filters events down to SVG creations and deletions and
//! queues them on a channel that the UI loop drains.

use super::folder::is_svg_path;
use crate::error::{PlayerError, Result};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// A frame file appeared in or vanished from the watched folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderEvent {
    Created(PathBuf),
    Deleted(PathBuf),
}

impl FolderEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Deleted(path) => path,
        }
    }
}

/// Map one notify event to the SVG creations/deletions it implies.
pub fn classify(event: &Event) -> Vec<FolderEvent> {
    let events: Vec<FolderEvent> = match event.kind {
        EventKind::Create(_) => event.paths.iter().cloned().map(FolderEvent::Created).collect(),
        EventKind::Remove(_) => event.paths.iter().cloned().map(FolderEvent::Deleted).collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => event.paths.iter().cloned().map(FolderEvent::Deleted).collect(),
            RenameMode::To => event.paths.iter().cloned().map(FolderEvent::Created).collect(),
            RenameMode::Both => {
                let mut out = Vec::new();
                if let Some(from) = event.paths.first() {
                    out.push(FolderEvent::Deleted(from.clone()));
                }
                if let Some(to) = event.paths.get(1) {
                    out.push(FolderEvent::Created(to.clone()));
                }
                out
            }
            // Backend could not tell which side of the rename this is
            _ => event
                .paths
                .iter()
                .map(|p| {
                    if p.exists() {
                        FolderEvent::Created(p.clone())
                    } else {
                        FolderEvent::Deleted(p.clone())
                    }
                })
                .collect(),
        },
        _ => Vec::new(),
    };

    events.into_iter().filter(|e| is_svg_path(e.path())).collect()
}

/// Non-recursive watch on one folder. Watching stops when dropped.
pub struct FolderWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<FolderEvent>,
}

impl FolderWatcher {
    /// Start watching `folder`. `wake` runs on the watcher thread after
    /// each queued batch so an idle UI loop can be woken to drain it.
    pub fn start<F>(folder: &Path, wake: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (sender, receiver) = channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            forward(res, &sender, &wake)
        })
        .map_err(|e| PlayerError::Watch {
            path: folder.to_path_buf(),
            reason: e.to_string(),
        })?;
        watcher
            .watch(folder, RecursiveMode::NonRecursive)
            .map_err(|e| PlayerError::Watch {
                path: folder.to_path_buf(),
                reason: e.to_string(),
            })?;

        log::info!("Watching {}", folder.display());
        Ok(Self {
            _watcher: watcher,
            receiver,
        })
    }

    /// Take every event queued since the last call, without blocking.
    pub fn drain(&self) -> Vec<FolderEvent> {
        self.receiver.try_iter().collect()
    }
}

fn forward<F: Fn()>(res: notify::Result<Event>, sender: &Sender<FolderEvent>, wake: &F) {
    match res {
        Ok(event) => {
            let events = classify(&event);
            if events.is_empty() {
                return;
            }
            for event in events {
                log::debug!("Folder event: {:?}", event);
                // Receiver gone means the app is shutting down
                if sender.send(event).is_err() {
                    return;
                }
            }
            wake();
        }
        Err(e) => log::warn!("Folder watch error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, RemoveKind};
    use std::time::{Duration, Instant};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |e, p| e.add_path(PathBuf::from(p)))
    }

    #[test]
    fn test_create_and_remove() {
        assert_eq!(
            classify(&event(EventKind::Create(CreateKind::File), &["/f/a.svg"])),
            vec![FolderEvent::Created(PathBuf::from("/f/a.svg"))]
        );
        assert_eq!(
            classify(&event(EventKind::Remove(RemoveKind::Any), &["/f/A.SVG"])),
            vec![FolderEvent::Deleted(PathBuf::from("/f/A.SVG"))]
        );
    }

    #[test]
    fn test_non_svg_paths_are_dropped() {
        assert!(classify(&event(EventKind::Create(CreateKind::File), &["/f/a.png"])).is_empty());
    }

    #[test]
    fn test_content_changes_are_ignored() {
        let kind = EventKind::Modify(ModifyKind::Data(DataChange::Content));
        assert!(classify(&event(kind, &["/f/a.svg"])).is_empty());
    }

    #[test]
    fn test_rename_is_delete_plus_create() {
        let kind = EventKind::Modify(ModifyKind::Name(RenameMode::Both));
        assert_eq!(
            classify(&event(kind, &["/f/a.svg", "/f/b.svg"])),
            vec![
                FolderEvent::Deleted(PathBuf::from("/f/a.svg")),
                FolderEvent::Created(PathBuf::from("/f/b.svg")),
            ]
        );

        // Renaming away from .svg only deletes
        assert_eq!(
            classify(&event(kind, &["/f/a.svg", "/f/a.txt"])),
            vec![FolderEvent::Deleted(PathBuf::from("/f/a.svg"))]
        );
    }

    #[test]
    fn test_watcher_reports_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = FolderWatcher::start(dir.path(), || {}).unwrap();
        std::fs::write(dir.path().join("frame.svg"), "<svg/>").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = Vec::new();
        while Instant::now() < deadline {
            seen.extend(watcher.drain());
            if seen.iter().any(|e| matches!(e, FolderEvent::Created(p) if p.ends_with("frame.svg"))) {
                return;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("no create event within 5s, saw {seen:?}");
    }
}
