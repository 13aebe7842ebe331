// SPDX-License-Identifier: AGPL-3.0
// Deckhand Console - Screen navigation and command dispatch

use crate::commands::{Command, HELP};
use crate::render;
use deckhand_core::{
    AppContext, ChecklistEditor, ChecklistOverview, ChecklistStatus, ConfirmationState,
    EditorMessage, EditorOutcome, ItemAction, OverviewMessage, OverviewOutcome,
    PreDepartureMessage, PreDepartureScreen,
};
use tokio::sync::watch;

/// Screen pushed on top of the overview
enum Active {
    Overview,
    Documents(PreDepartureScreen),
    Editor(ChecklistEditor),
}

/// What the event loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Render,
    Message(String),
    Quit,
}

pub struct ConsoleApp {
    ctx: AppContext,
    overview: ChecklistOverview,
    active: Active,
}

impl ConsoleApp {
    pub fn new(ctx: AppContext) -> Self {
        let overview = ctx.overview();
        Self {
            ctx,
            overview,
            active: Active::Overview,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn render(&self) -> String {
        match &self.active {
            Active::Overview => render::overview(&self.overview),
            Active::Documents(screen) => render::documents(screen),
            Active::Editor(editor) => render::editor(editor),
        }
    }

    /// Receiver for the open documents screen's confirmation surface
    pub fn confirmation_receiver(&self) -> Option<watch::Receiver<ConfirmationState>> {
        match &self.active {
            Active::Documents(screen) => Some(screen.subscribe_confirmation()),
            _ => None,
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Help => return Flow::Message(HELP.to_string()),
            Command::Quit => return Flow::Quit,
            Command::Back | Command::Lists => {
                // Dropping a documents screen cancels any pending submission
                self.active = Active::Overview;
            }
            Command::Documents => {
                self.active = Active::Documents(self.ctx.pre_departure_screen());
            }
            command => return self.dispatch(command),
        }
        Flow::Render
    }

    fn dispatch(&mut self, command: Command) -> Flow {
        if matches!(self.active, Active::Overview) {
            return self.overview_command(command);
        }

        let close = match &mut self.active {
            Active::Overview => false,
            Active::Documents(screen) => match documents_command(screen, command) {
                Ok(()) => false,
                Err(flow) => return flow,
            },
            Active::Editor(editor) => match editor_command(editor, command) {
                Ok(outcome) => outcome == EditorOutcome::Close,
                Err(flow) => return flow,
            },
        };

        if close {
            self.active = Active::Overview;
        }
        Flow::Render
    }

    fn overview_command(&mut self, command: Command) -> Flow {
        match command {
            Command::New(title) => {
                self.overview.update(OverviewMessage::OpenPrompt);
                self.overview.update(OverviewMessage::NameChanged(title));
                match self.overview.update(OverviewMessage::Proceed) {
                    OverviewOutcome::OpenEditor { title } => {
                        self.active = Active::Editor(self.ctx.editor(title));
                        Flow::Render
                    }
                    OverviewOutcome::Stay => {
                        self.overview.update(OverviewMessage::CancelPrompt);
                        Flow::Message("A checklist needs a name".to_string())
                    }
                }
            }
            Command::Delete(n) => match self.row_id(n) {
                Some(id) => {
                    self.overview.update(OverviewMessage::Delete(id));
                    Flow::Render
                }
                None => no_such_row(n),
            },
            Command::Complete(n) => self.set_checklist_status(n, ChecklistStatus::Completed),
            Command::Reopen(n) => self.set_checklist_status(n, ChecklistStatus::Pending),
            Command::SetStatus(n, status) => self.set_checklist_status(n, status),
            command => not_available(command),
        }
    }

    fn row_id(&self, n: usize) -> Option<String> {
        self.overview.rows().get(n - 1).map(|row| row.id.clone())
    }

    fn set_checklist_status(&self, n: usize, status: ChecklistStatus) -> Flow {
        match self.row_id(n) {
            Some(id) => {
                self.ctx.store().update_checklist_status(&id, status);
                Flow::Render
            }
            None => no_such_row(n),
        }
    }
}

fn documents_command(screen: &mut PreDepartureScreen, command: Command) -> Result<(), Flow> {
    let message = match command {
        Command::Swipe { id, action } => PreDepartureMessage::Swipe { id, action },
        Command::Confirm => PreDepartureMessage::ConfirmSubmission,
        Command::Decline => PreDepartureMessage::DeclineSubmission,
        command => return Err(not_available(command)),
    };
    screen.update(message);
    Ok(())
}

fn editor_command(editor: &mut ChecklistEditor, command: Command) -> Result<EditorOutcome, Flow> {
    let message = match command {
        Command::Add(text) => {
            editor.update(EditorMessage::InputChanged(text));
            EditorMessage::SubmitInput
        }
        Command::Toggle(n) => {
            let item = editor.items().get(n - 1).cloned().ok_or_else(|| no_such_row(n))?;
            let action = if item.completed {
                ItemAction::Uncheck
            } else {
                ItemAction::MarkDone
            };
            EditorMessage::Item {
                id: item.id,
                action,
            }
        }
        Command::Remove(n) => {
            let item = editor.items().get(n - 1).cloned().ok_or_else(|| no_such_row(n))?;
            EditorMessage::Item {
                id: item.id,
                action: ItemAction::Delete,
            }
        }
        Command::Primary => EditorMessage::PressPrimary,
        command => return Err(not_available(command)),
    };
    Ok(editor.update(message))
}

fn no_such_row(n: usize) -> Flow {
    Flow::Message(format!("No entry numbered {}", n))
}

fn not_available(command: Command) -> Flow {
    Flow::Message(format!("{:?} is not available on this screen", command))
}
