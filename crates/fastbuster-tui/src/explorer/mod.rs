//! Partition explorer: session start-up, the blocking event loop, and the glue between
//! the navigator, the file picker and the action executor.
//!
//! Single-threaded: one key is read and fully handled (dialogs and device commands
//! included) before the next one is read.

pub mod actions;
pub mod explorer_app;
pub mod explorer_ui;

pub use actions::{ActionExecutor, DeviceAction, StatusKind, StatusLine, StatusSink};
pub use explorer_app::{App, FileRequest, InputResult, Mode};

use crate::picker::{FilePicker, RfdPicker};
use crate::terminal::{read_key, TerminalGuard, Tui};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use fastbuster_core::settings::Settings;
use fastbuster_core::{
    enumerate_devices, list_partitions, select_serial, DeviceGateway, Language, Messages,
    PartitionEntry,
};
use fastbuster_hal::{LinuxHal, ProcessOps};
use std::time::Duration;

const CONNECTED_SPLASH: Duration = Duration::from_millis(1000);
const NO_DEVICE_NOTICE: Duration = Duration::from_millis(1500);

/// The screen the explorer draws on.
pub trait Surface {
    fn render(&mut self, app: &App) -> Result<()>;
    fn wait_for_key(&mut self) -> Result<()>;
}

pub struct TerminalSurface<'a> {
    terminal: &'a mut Tui,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(terminal: &'a mut Tui) -> Self {
        Self { terminal }
    }
}

impl Surface for TerminalSurface<'_> {
    fn render(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|f| explorer_ui::draw(f, app))?;
        Ok(())
    }

    fn wait_for_key(&mut self) -> Result<()> {
        read_key()?;
        Ok(())
    }
}

/// Routes executor status lines into the app and onto the surface.
struct AppStatusSink<'a, S: Surface> {
    app: &'a mut App,
    surface: &'a mut S,
}

impl<S: Surface> StatusSink for AppStatusSink<'_, S> {
    fn show(&mut self, status: StatusLine) -> Result<()> {
        self.app.set_status(Some(status));
        self.surface.render(self.app)
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.surface.wait_for_key()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Explorer<H: ProcessOps, P: FilePicker> {
    app: App,
    executor: ActionExecutor<H>,
    picker: P,
}

impl<H: ProcessOps, P: FilePicker> Explorer<H, P> {
    pub fn new(app: App, executor: ActionExecutor<H>, picker: P) -> Self {
        Self {
            app,
            executor,
            picker,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Handle one key completely, including any dialog or device command it triggers.
    ///
    /// The catalog is not re-queried after an action; the list stays as first queried.
    pub fn handle_key<S: Surface>(&mut self, key: KeyEvent, surface: &mut S) -> Result<Flow> {
        let mut result = self.app.handle_input(key);
        loop {
            match result {
                InputResult::Continue => return Ok(Flow::Continue),
                InputResult::Quit => return Ok(Flow::Quit),
                InputResult::PickFile(request) => {
                    let messages = self.app.messages();
                    let title = match request {
                        FileRequest::Flash { .. } => messages.flash_file_title,
                        FileRequest::Boot => messages.boot_file_title,
                    };
                    let path = self.picker.pick_file(title);
                    result = self.app.file_chosen(request, path);
                }
                InputResult::Execute(action) => {
                    let mut sink = AppStatusSink {
                        app: &mut self.app,
                        surface,
                    };
                    self.executor.run(&action, &mut sink)?;
                    self.app.set_status(None);
                    return Ok(Flow::Continue);
                }
            }
        }
    }
}

/// How a device session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStart {
    /// Nothing attached, or the listing itself failed; the session ends.
    NoDevices { diagnostic: Option<String> },
    /// The catalog is empty or could not be read.
    NoPartitions {
        serial: String,
        diagnostic: Option<String>,
    },
    Ready {
        serial: String,
        partitions: Vec<PartitionEntry>,
    },
}

/// Enumerate devices, pick one, then query its catalog.
///
/// `on_connected` runs between device selection and the catalog query.
pub fn open_session<H: ProcessOps>(
    gateway: &DeviceGateway<H>,
    requested_serial: Option<&str>,
    on_connected: impl FnOnce(&str) -> Result<()>,
) -> Result<SessionStart> {
    let (devices, listing) = enumerate_devices(gateway);
    let Some(serial) = select_serial(&devices, requested_serial) else {
        let diagnostic = (!listing.succeeded).then(|| listing.diagnostic().to_string());
        return Ok(SessionStart::NoDevices { diagnostic });
    };
    on_connected(&serial)?;

    let query = list_partitions(gateway, &serial);
    if query.partitions.is_empty() {
        return Ok(SessionStart::NoPartitions {
            serial,
            diagnostic: query.failure,
        });
    }
    Ok(SessionStart::Ready {
        serial,
        partitions: query.partitions,
    })
}

/// Append the tool's own words to a start-up notice when there are any.
pub fn with_diagnostic(notice: &str, diagnostic: Option<String>) -> String {
    match diagnostic.filter(|d| !d.is_empty()) {
        Some(diagnostic) => format!("{} ({})", notice, diagnostic),
        None => notice.to_string(),
    }
}

fn show_message(terminal: &mut Tui, text: &str, emphasis: bool) -> Result<()> {
    terminal.draw(|f| explorer_ui::draw_message(f, text, emphasis))?;
    Ok(())
}

/// Run the interactive explorer on the real terminal.
pub fn run(settings: &Settings) -> Result<()> {
    use std::io::IsTerminal;

    if !std::io::stdout().is_terminal() {
        anyhow::bail!(
            "No TTY detected. The explorer requires an interactive terminal.\n\
             Use `fastbuster devices` or `fastbuster partitions` for scripting."
        );
    }

    let mut guard = TerminalGuard::enter()?;
    let language = match settings.language {
        Some(language) => language,
        None => match crate::language_picker::run(guard.terminal())? {
            Some(language) => language,
            None => return guard.restore(),
        },
    };

    let gateway = DeviceGateway::new(LinuxHal::new())
        .with_program(settings.fastboot_path.clone())
        .with_timeout(settings.timeout);
    run_session(guard.terminal(), gateway, language, settings.serial.as_deref())?;
    guard.restore()
}

fn run_session<H: ProcessOps>(
    terminal: &mut Tui,
    gateway: DeviceGateway<H>,
    language: Language,
    requested_serial: Option<&str>,
) -> Result<()> {
    let messages: &'static Messages = language.messages();

    let start = open_session(&gateway, requested_serial, |serial| {
        show_message(terminal, &messages.connected_to(serial), true)?;
        std::thread::sleep(CONNECTED_SPLASH);
        Ok(())
    })?;

    let (serial, partitions) = match start {
        SessionStart::NoDevices { diagnostic } => {
            log::warn!("no devices in fastboot mode ({:?})", diagnostic);
            let text = with_diagnostic(messages.no_device_selected, diagnostic);
            show_message(terminal, &text, true)?;
            std::thread::sleep(NO_DEVICE_NOTICE);
            return Ok(());
        }
        SessionStart::NoPartitions { serial, diagnostic } => {
            log::warn!("{}: no partitions ({:?})", serial, diagnostic);
            let text = with_diagnostic(messages.no_partitions, diagnostic);
            show_message(terminal, &text, false)?;
            read_key()?;
            return Ok(());
        }
        SessionStart::Ready { serial, partitions } => (serial, partitions),
    };

    let rows = App::visible_rows_for_height(terminal.size()?.height);
    let app = App::new(serial.clone(), partitions, messages, rows);
    let executor = ActionExecutor::new(gateway, serial, messages);
    let mut explorer = Explorer::new(app, executor, RfdPicker::new(messages));
    let mut surface = TerminalSurface::new(terminal);

    loop {
        surface.render(explorer.app())?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if explorer.handle_key(key, &mut surface)? == Flow::Quit {
                    log::info!("quit");
                    return Ok(());
                }
            }
            Event::Resize(_, height) => explorer
                .app_mut()
                .set_visible_rows(App::visible_rows_for_height(height)),
            _ => {}
        }
    }
}
