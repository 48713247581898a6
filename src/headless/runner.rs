//! Headless mode runner - controller event loop without a UI toolkit
//!
//! Stdin commands drive the in-memory store and the controller; the
//! controller's surface, sink, and launcher report back as NDJSON on stdout.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;

use actionbar_app::{load_settings, MenuController, Message, Settings, UiStore};
use actionbar_core::prelude::*;

use super::adapters::{HeadlessLauncher, HeadlessSurface, ReportingSink};
use super::input::{parse_line, HostCommand};
use super::{EventOutput, HeadlessEvent};

/// Run in headless mode against an empty in-memory store
pub async fn run_headless(config_dir: &Path) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Alarm action bar starting in HEADLESS mode");
    info!("Config: {}", config_dir.display());
    info!("═══════════════════════════════════════════════════════");

    let settings = load_settings(config_dir);
    let store = UiStore::new();
    let output = EventOutput::Stdout;

    let mut controller = build_controller(&store, &settings, output.clone());
    controller.attach(Box::new(HeadlessSurface::new(output.clone())));

    // Spawn stdin reader
    let reader_store = store.clone();
    let reader_tx = controller.msg_sender();
    let reader_output = output.clone();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        read_commands(stdin.lock(), &reader_store, &reader_tx, &reader_output);
    });

    let result = event_loop(&mut controller, &output).await;

    controller.detach();
    info!("Alarm action bar headless mode exiting");
    result
}

/// Wire a controller to `store` with reporting adapters
pub fn build_controller(
    store: &UiStore,
    settings: &Settings,
    output: EventOutput,
) -> MenuController {
    let stream = Arc::new(store.clone());
    let sink = Arc::new(ReportingSink::new(store.clone(), output.clone()));
    let launcher = Arc::new(HeadlessLauncher::new(settings.launch.app_id.clone(), output));
    MenuController::new(stream, sink, launcher, settings.menu.clone())
}

/// Main headless event loop
async fn event_loop(controller: &mut MenuController, output: &EventOutput) -> Result<()> {
    loop {
        if controller.should_quit() {
            info!("Quit requested");
            break;
        }

        match controller.msg_rx.recv().await {
            Some(msg) => handle(controller, msg, output),
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }
    Ok(())
}

/// Handle one message, reporting a detach that actually happened
fn handle(controller: &mut MenuController, msg: Message, output: &EventOutput) {
    let detaching = msg == Message::Detach && controller.is_attached();
    controller.handle_message(msg);
    if detaching {
        output.emit(HeadlessEvent::detached());
    }
}

/// Drain the inbox without waiting; used where no loop is running
pub fn drain(controller: &mut MenuController, output: &EventOutput) {
    while let Ok(msg) = controller.msg_rx.try_recv() {
        handle(controller, msg, output);
    }
}

/// Read commands until EOF or `quit`.
///
/// Store commands run right here on the reader's thread, so their emissions
/// cross into the controller the same way a real store's would. UI commands
/// are posted to the controller inbox. EOF posts `Quit`.
pub fn read_commands(
    reader: impl BufRead,
    store: &UiStore,
    msg_tx: &mpsc::UnboundedSender<Message>,
    output: &EventOutput,
) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Stdin: {}", e);
                output.emit(HeadlessEvent::error(e.to_string(), false));
                continue;
            }
        };

        let quit = command == HostCommand::Quit;
        if let Err(e) = execute(command, store, msg_tx) {
            match e {
                Error::ChannelClosed => break,
                e => {
                    warn!("Stdin: {}", e);
                    output.emit(HeadlessEvent::error(e.to_string(), false));
                }
            }
        }
        if quit {
            info!("Stdin reader exiting");
            return;
        }
    }

    // EOF
    let _ = msg_tx.send(Message::Quit);
    info!("Stdin reader exiting");
}

fn execute(
    command: HostCommand,
    store: &UiStore,
    msg_tx: &mpsc::UnboundedSender<Message>,
) -> Result<()> {
    match command {
        HostCommand::Add(id) => store.add_alarm(id),
        HostCommand::Edit(id) => store.edit(id)?,
        HostCommand::New(id) => store.create(id),
        HostCommand::Hide => store.hide_details(),
        ui => {
            if let Some(msg) = ui.into_message() {
                msg_tx.send(msg).map_err(|_| Error::ChannelClosed)?;
            }
        }
    }
    Ok(())
}
