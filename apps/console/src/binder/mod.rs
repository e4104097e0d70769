//! Presentation layer: console commands in, rendered frames out.

pub mod commands;
pub mod render;

use client_core::{ControllerEvent, FeederController, FeederView};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing::{debug, warn};

use commands::{ConsoleCommand, HELP};

/// What the input loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Output, if any, arrives through the event stream.
    Quiet,
    Print(String),
    Quit,
}

pub async fn run_command(controller: &FeederController, command: ConsoleCommand) -> Reply {
    debug!(command = ?command, "dispatching console command");
    match command {
        ConsoleCommand::Feed { amount } => {
            controller.manual_feed(&amount).await;
            Reply::Quiet
        }
        ConsoleCommand::SetTime { index, time } => {
            if controller.edit_slot_time(index, &time).await {
                Reply::Quiet
            } else {
                no_such_slot(index.number())
            }
        }
        ConsoleCommand::SetWeight { index, weight } => {
            if controller.edit_slot_weight(index, &weight).await {
                Reply::Quiet
            } else {
                no_such_slot(index.number())
            }
        }
        ConsoleCommand::Save { index } => match controller.save_slot(index).await {
            Some(_) => Reply::Quiet,
            None => no_such_slot(index.number()),
        },
        ConsoleCommand::Cancel { index } => {
            if controller.cancel_slot_edit(index).await {
                Reply::Quiet
            } else {
                no_such_slot(index.number())
            }
        }
        ConsoleCommand::Reset => {
            controller.reset().await;
            Reply::Quiet
        }
        ConsoleCommand::Status => Reply::Print(render::render_view(&controller.view().await)),
        ConsoleCommand::Help => Reply::Print(HELP.to_string()),
        ConsoleCommand::Quit => Reply::Quit,
    }
}

fn no_such_slot(number: usize) -> Reply {
    Reply::Print(format!("No slot {number}"))
}

/// Prints every notice and every frame whose content changed. The sync
/// timestamp alone does not count as a change.
pub fn spawn_renderer(mut events: broadcast::Receiver<ControllerEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_frame: Option<FeederView> = None;
        loop {
            match events.recv().await {
                Ok(ControllerEvent::ViewChanged(view)) => {
                    let comparable = FeederView {
                        last_synced_at: None,
                        ..view.clone()
                    };
                    if last_frame.as_ref() == Some(&comparable) {
                        continue;
                    }
                    last_frame = Some(comparable);
                    println!("{}", render::render_view(&view));
                }
                Ok(ControllerEvent::Notice(notice)) => {
                    println!("{}", render::render_notice(&notice));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "renderer fell behind controller events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod tests;
