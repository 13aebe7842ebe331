// SPDX-License-Identifier: AGPL-3.0
// Deckhand Console - Headless terminal frontend
//
// Drives the core screens from stdin and prints store notifications
// and confirmation updates as they arrive.

mod app;
mod commands;
mod render;

use app::{ConsoleApp, Flow};
use deckhand_core::{AppContext, ChecklistSettings, ConfirmationState, SettingsStore, StoreChange};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

/// Something the event loop woke up for
enum Event {
    Line(Option<String>),
    Change(StoreChange),
    Confirmation(Option<ConfirmationState>),
}

fn load_settings() -> ChecklistSettings {
    let store = match std::env::args().nth(1) {
        Some(path) => SettingsStore::at_path(path),
        None => SettingsStore::new(),
    };

    match store {
        Ok(store) => store.get(),
        Err(e) => {
            tracing::warn!("Failed to open settings, using defaults: {}", e);
            ChecklistSettings::default()
        }
    }
}

/// Next value published on the confirmation surface, or `None` once it closes
async fn next_confirmation(
    rx: &mut Option<watch::Receiver<ConfirmationState>>,
) -> Option<ConfirmationState> {
    match rx {
        Some(rx) => match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deckhand_console=info".parse().unwrap())
                .add_directive("deckhand_core=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Deckhand console v{}", env!("CARGO_PKG_VERSION"));

    let settings = load_settings();
    let ctx = AppContext::new(settings, tokio::runtime::Handle::current());

    // Store listeners run synchronously, so forward into a channel
    let (change_tx, change_rx) = async_channel::bounded::<StoreChange>(64);
    let listener = ctx.store().subscribe(move |change| {
        if let Err(e) = change_tx.try_send(change.clone()) {
            tracing::debug!("Dropped store notification: {}", e);
        }
    });

    let mut app = ConsoleApp::new(ctx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut confirmation: Option<watch::Receiver<ConfirmationState>> = None;

    println!("{}", app.render());
    println!("{}", commands::HELP);

    loop {
        let event = tokio::select! {
            line = lines.next_line() => match line {
                Ok(line) => Event::Line(line),
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    Event::Line(None)
                }
            },
            Ok(change) = change_rx.recv() => Event::Change(change),
            state = next_confirmation(&mut confirmation) => Event::Confirmation(state),
        };

        match event {
            Event::Line(None) => break,
            Event::Line(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                let flow = match commands::parse(&line) {
                    Ok(command) => app.handle(command),
                    Err(e) => Flow::Message(e.to_string()),
                };
                match flow {
                    Flow::Quit => break,
                    Flow::Render => println!("{}", app.render()),
                    Flow::Message(message) => println!("{}", message),
                }
                confirmation = app.confirmation_receiver();
            }
            Event::Change(change) => println!("{}", render::change(&change)),
            Event::Confirmation(Some(_)) => println!("{}", app.render()),
            Event::Confirmation(None) => confirmation = None,
        }
    }

    app.context().store().unsubscribe(listener);
    tracing::info!("Deckhand console stopped");
}
