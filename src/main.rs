use iced::widget::{column, scrollable};
use iced::{event, window, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod preview;
mod state;
mod ui;

use config::Config;
use preview::intake;
use preview::{Preview, PreviewFactory, ThumbnailFactory};
use state::data::{ImageId, SelectedFile};
use state::library::Library;
use state::search::{MatchPolicy, SearchQuery};

/// Main application state
struct PhotoLibrary {
    /// Every image uploaded this session
    library: Library,
    /// Current contents of the search field
    query: SearchQuery,
    /// Turns uploaded bytes into thumbnails
    factory: Arc<dyn PreviewFactory>,
    config: Config,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Upload Photos" button
    OpenFilePicker,
    /// A file was dropped on the window
    FileDropped(PathBuf),
    /// Selected files were read into memory
    FilesSelected(Vec<SelectedFile>),
    /// Background preview generation finished for one image
    PreviewReady(ImageId, Result<Preview, String>),
    SearchChanged(String),
    ClearSearch,
    MatchCaseToggled(bool),
    /// User clicked the remove button on a tile
    RemoveImage(ImageId),
    ClearLibrary,
}

impl PhotoLibrary {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        let factory = Arc::new(ThumbnailFactory::new(config.thumbnail_size));

        tracing::info!(thumbnail_size = factory.size(), "photo library initialized");

        (Self::with_factory(config, factory), Task::none())
    }

    fn with_factory(config: Config, factory: Arc<dyn PreviewFactory>) -> Self {
        let config = config.validated();
        let mut app = PhotoLibrary {
            library: Library::new(),
            query: SearchQuery::new(MatchPolicy::from_match_case(config.match_case)),
            factory,
            config,
            status: String::new(),
        };
        app.refresh_status();
        app
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::OpenFilePicker => {
                // Show the native file picker dialog
                let paths = FileDialog::new()
                    .set_title("Select Photos")
                    .pick_files();

                match paths {
                    Some(paths) if !paths.is_empty() => {
                        tracing::debug!(count = paths.len(), "files picked");
                        Task::perform(intake::read_selection(paths), Message::FilesSelected)
                    }
                    _ => Task::none(),
                }
            }
            Message::FileDropped(path) => self.submit_dropped(path),
            Message::FilesSelected(files) => self.submit(files),
            Message::PreviewReady(id, Ok(preview)) => {
                if !self.library.complete(id, preview) {
                    tracing::debug!(%id, "discarded preview for removed image");
                }
                Task::none()
            }
            Message::PreviewReady(id, Err(err)) => {
                tracing::warn!(%id, error = %err, "preview generation failed");
                self.library.abandon(id);
                Task::none()
            }
            Message::SearchChanged(text) => {
                self.query.set(text);
                Task::none()
            }
            Message::ClearSearch => {
                self.query.clear();
                Task::none()
            }
            Message::MatchCaseToggled(match_case) => {
                self.query.set_policy(MatchPolicy::from_match_case(match_case));
                Task::none()
            }
            Message::RemoveImage(id) => {
                if let Some(img) = self.library.get(id) {
                    tracing::debug!(%id, name = %img.name, "removing image");
                }
                self.library.remove(id);
                Task::none()
            }
            Message::ClearLibrary => {
                tracing::info!(count = self.library.len(), "clearing library");
                self.library.clear();
                tracing::debug!(live = self.library.tracker().live(), "previews after clear");
                Task::none()
            }
        };

        self.refresh_status();
        task
    }

    /// Reserve a slot per file and start generating their previews
    fn submit(&mut self, files: Vec<SelectedFile>) -> Task<Message> {
        if files.is_empty() {
            return Task::none();
        }

        let ids = self.library.reserve(&files);
        tracing::info!(count = files.len(), "uploading files");

        let tasks = ids.into_iter().zip(files).map(|(id, file)| {
            Task::perform(
                intake::generate_preview(Arc::clone(&self.factory), file),
                move |result| Message::PreviewReady(id, result.map_err(|e| e.to_string())),
            )
        });

        Task::batch(tasks)
    }

    /// Reserve a slot for a dropped file, then read and render it in one task.
    ///
    /// Each dropped file arrives as its own message; its slot exists before the read starts.
    fn submit_dropped(&mut self, path: PathBuf) -> Task<Message> {
        let id = self
            .library
            .reserve_one(intake::display_name(&path), intake::declared_type_for(&path));
        tracing::debug!(%id, path = %path.display(), "file dropped");

        Task::perform(
            intake::load_preview(Arc::clone(&self.factory), path),
            move |result| Message::PreviewReady(id, result.map_err(|e| e.to_string())),
        )
    }

    fn refresh_status(&mut self) {
        let total = self.library.len();
        let pending = self.library.pending();

        let mut status = if self.query.is_empty() {
            format!("Ready. {} in library.", image_count(total))
        } else {
            let shown = self.library.visible(&self.query).count();
            format!("Showing {} of {}.", shown, image_count(total))
        };

        if pending > 0 {
            status.push_str(&format!(" Loading {} more...", pending));
        }

        self.status = status;
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let tiles = ui::gallery::tiles(&self.library, &self.query);
        let library_empty = self.library.is_empty() && self.library.pending() == 0;

        column![
            ui::toolbar::view(&self.query, &self.status, !self.library.is_empty()),
            scrollable(ui::gallery::view(tiles, self.config.tile_size, library_empty))
                .height(Length::Fill),
        ]
        .spacing(20)
        .padding(20)
        .into()
    }

    /// Listen for files dropped on the window
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// "1 image", "3 images"
fn image_count(count: usize) -> String {
    if count == 1 {
        "1 image".to_string()
    } else {
        format!("{} images", count)
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application("Photo Library", PhotoLibrary::update, PhotoLibrary::view)
        .subscription(PhotoLibrary::subscription)
        .theme(PhotoLibrary::theme)
        .centered()
        .run_with(PhotoLibrary::new)
}
