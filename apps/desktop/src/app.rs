//! Main application: session setup, break planning, and persistence wiring

use crate::ui::main_view;
use anyhow::Context;
use iced::{executor, time, Application, Command, Element, Subscription, Theme};
use respite_core::{AutoSaveService, BreakPlanner, GridScale, SessionPlan, TimeValue};
use respite_ui::{BreakEditor, BreakEditorMessage, BreakGrid, BreakGridMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// How often the auto-save subscription fires while a plan has unsaved
/// changes. The service applies its own interval gating on top.
const AUTOSAVE_TICK: Duration = Duration::from_secs(5);

pub struct RespiteApp {
    pub state: AppState,
    pub theme: Theme,
    pub setup: SetupForm,
    pub session: Option<PlanningSession>,
    autosave: Arc<Mutex<AutoSaveService>>,
}

/// Session-setup inputs: the collaborator that supplies the session
/// duration before the timeline renders.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub name: String,
    pub hours: u32,
    pub minutes: u32,
    pub saved_plans: Vec<SessionPlan>,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            hours: 1,
            minutes: 30,
            saved_plans: Vec::new(),
        }
    }
}

/// Everything owned while laying out breaks for one session.
pub struct PlanningSession {
    pub plan: SessionPlan,
    pub planner: BreakPlanner,
    pub grid: BreakGrid,
    pub editor: Option<BreakEditor>,
    pub dirty: bool,
    /// Change generation, bumped on every mutation. Save acknowledgments
    /// carry the generation of the snapshot they wrote; an acknowledgment
    /// for an older generation must not clear the dirty flag.
    pub generation: u64,
}

impl PlanningSession {
    fn new(plan: SessionPlan) -> Self {
        let scale = GridScale::default();
        let planner = BreakPlanner::with_breaks(scale, plan.breaks.clone());
        let grid = BreakGrid::new(plan.duration, scale);
        Self {
            plan,
            planner,
            grid,
            editor: None,
            dirty: false,
            generation: 0,
        }
    }

    /// Mirror the planner's collection into the persisted plan.
    fn sync_plan(&mut self) {
        self.plan.breaks = self.planner.breaks().to_vec();
        self.plan.mark_modified();
        self.dirty = true;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[derive(Debug, Clone)]
pub enum AppState {
    /// Choosing a session duration or resuming a saved plan
    Setup,
    /// Laying out breaks on the timeline grid
    Planning,
    /// Unrecoverable startup failure
    Error(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Session setup
    SetupNameChanged(String),
    SetupHoursPicked(u32),
    SetupMinutesPicked(u32),
    SavedPlansListed(Vec<SessionPlan>),
    StartSession,
    ResumePlan(usize),

    // Break planning
    Grid(BreakGridMessage),
    Editor(BreakEditorMessage),

    // Persistence
    SavePlan,
    AutoSaveTick,
    PlanSaved {
        generation: u64,
        result: Result<bool, String>,
    },

    // Navigation
    NewSession,
}

impl Application for RespiteApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        info!("Initializing Respite application");

        (
            Self {
                state: AppState::Setup,
                theme: Theme::Light,
                setup: SetupForm::default(),
                session: None,
                autosave: Arc::new(Mutex::new(AutoSaveService::new())),
            },
            Command::perform(load_saved_plans(), Message::SavedPlansListed),
        )
    }

    fn title(&self) -> String {
        match &self.state {
            AppState::Setup => "Respite - Plan a Session".to_string(),
            AppState::Planning => match &self.session {
                Some(session) => {
                    let marker = if session.dirty { " *" } else { "" };
                    format!("Respite - {} ({}){}", session.plan.name, session.plan.duration, marker)
                }
                None => "Respite".to_string(),
            },
            AppState::Error(msg) => format!("Respite - Error: {}", msg),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        debug!("Handling message: {:?}", message);

        match message {
            // Session setup
            Message::SetupNameChanged(name) => {
                self.setup.name = name;
                Command::none()
            }
            Message::SetupHoursPicked(hours) => {
                self.setup.hours = hours;
                Command::none()
            }
            Message::SetupMinutesPicked(minutes) => {
                self.setup.minutes = minutes;
                Command::none()
            }
            Message::SavedPlansListed(plans) => {
                debug!("Found {} saved plans", plans.len());
                self.setup.saved_plans = plans;
                Command::none()
            }
            Message::StartSession => {
                let duration = TimeValue::new(self.setup.hours, self.setup.minutes, 0);
                let name = if self.setup.name.trim().is_empty() {
                    "Study session".to_string()
                } else {
                    self.setup.name.trim().to_string()
                };

                info!("Starting session '{}' of {}", name, duration);
                self.session = Some(PlanningSession::new(SessionPlan::new(name, duration)));
                self.state = AppState::Planning;
                Command::none()
            }
            Message::ResumePlan(index) => {
                match self.setup.saved_plans.get(index) {
                    Some(plan) => {
                        info!("Resuming plan '{}' ({})", plan.name, plan.id);
                        self.session = Some(PlanningSession::new(plan.clone()));
                        self.state = AppState::Planning;
                    }
                    None => warn!("Resume requested for unknown plan index {index}"),
                }
                Command::none()
            }

            // Break planning
            Message::Grid(grid_message) => {
                self.handle_grid_message(grid_message);
                Command::none()
            }
            Message::Editor(editor_message) => {
                self.handle_editor_message(editor_message);
                Command::none()
            }

            // Persistence
            Message::SavePlan => self.save_command(true),
            Message::AutoSaveTick => self.save_command(false),
            Message::PlanSaved { generation, result } => {
                match result {
                    Ok(true) => {
                        if let Some(session) = &mut self.session {
                            // An edit may have landed after the saved
                            // snapshot was taken; only a save of the
                            // current generation settles the session.
                            if session.generation == generation {
                                session.dirty = false;
                                info!("Plan {} saved", session.plan.id);
                            } else {
                                debug!("Save acknowledged for a stale snapshot; still dirty");
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => error!("Saving plan failed: {}", err),
                }
                Command::none()
            }

            // Navigation
            Message::NewSession => {
                self.session = None;
                self.state = AppState::Setup;
                Command::perform(load_saved_plans(), Message::SavedPlansListed)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        main_view(self)
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        // Auto-save while a plan has unsaved changes
        let dirty = self
            .session
            .as_ref()
            .is_some_and(|session| session.dirty);

        if matches!(self.state, AppState::Planning) && dirty {
            time::every(AUTOSAVE_TICK).map(|_| Message::AutoSaveTick)
        } else {
            Subscription::none()
        }
    }
}

impl RespiteApp {
    fn handle_grid_message(&mut self, message: BreakGridMessage) {
        let Some(session) = &mut self.session else {
            return;
        };

        match message {
            BreakGridMessage::CreateRequested(y) => {
                // Creation is gated by the popup state machine.
                if session.grid.is_editing() {
                    return;
                }

                let created = session.planner.create_break_at(y);
                let index = session.planner.len() - 1;
                session.sync_plan();
                session.grid.open_editor(index);
                session.editor = Some(BreakEditor::new(index, &created));
            }
            BreakGridMessage::BreakSelected(index) => {
                if let Some(selected) = session.planner.get(index).copied() {
                    session.grid.open_editor(index);
                    session.editor = Some(BreakEditor::new(index, &selected));
                }
            }
        }
    }

    fn handle_editor_message(&mut self, message: BreakEditorMessage) {
        let Some(session) = &mut self.session else {
            return;
        };

        match message {
            BreakEditorMessage::Save => {
                if let Some(editor) = &session.editor {
                    if let Some(updated) = editor.edited_break() {
                        match session.planner.update_break(editor.index(), updated) {
                            Ok(()) => session.sync_plan(),
                            Err(err) => error!("Applying break edit failed: {}", err),
                        }
                    }
                }
                session.grid.close_editor();
                session.editor = None;
            }
            BreakEditorMessage::Cancel => {
                session.grid.close_editor();
                session.editor = None;
            }
            other => {
                if let Some(editor) = &mut session.editor {
                    editor.update(other);
                }
            }
        }
    }

    /// Save the current plan through the auto-save service. A forced save
    /// writes immediately; otherwise the service's interval gating applies.
    fn save_command(&self, force: bool) -> Command<Message> {
        let Some(session) = &self.session else {
            return Command::none();
        };

        let plan = session.plan.clone();
        let generation = session.generation;
        let autosave = Arc::clone(&self.autosave);

        Command::perform(
            async move {
                let mut service = autosave.lock().await;
                let result = if force {
                    service.save_now(&plan).await.map(|_| true)
                } else {
                    service.maybe_save(&plan).await
                };
                result.map_err(|e| e.to_string())
            },
            move |result| Message::PlanSaved { generation, result },
        )
    }
}

/// List saved plans for the setup screen, most recent first. A failure to
/// read the plans directory degrades to an empty list.
async fn load_saved_plans() -> Vec<SessionPlan> {
    SessionPlan::list_saved()
        .context("listing saved plans")
        .unwrap_or_else(|err| {
            warn!("{err:#}");
            Vec::new()
        })
}

impl Default for RespiteApp {
    fn default() -> Self {
        let (app, _) = Self::new(());
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planning_app() -> RespiteApp {
        let mut app = RespiteApp::default();
        let _ = app.update(Message::StartSession);
        assert!(matches!(app.state, AppState::Planning));
        app
    }

    fn session(app: &RespiteApp) -> &PlanningSession {
        app.session.as_ref().unwrap()
    }

    #[test]
    fn test_mutations_bump_generation_and_dirty() {
        let mut app = planning_app();
        assert_eq!(session(&app).generation, 0);
        assert!(!session(&app).dirty);

        let _ = app.update(Message::Grid(BreakGridMessage::CreateRequested(45.0)));
        assert_eq!(session(&app).generation, 1);
        assert!(session(&app).dirty);
        assert_eq!(session(&app).planner.len(), 1);
    }

    #[test]
    fn test_stale_save_ack_keeps_session_dirty() {
        let mut app = planning_app();

        // First break is placed and its snapshot goes off to be saved.
        let _ = app.update(Message::Grid(BreakGridMessage::CreateRequested(45.0)));
        let snapshot = session(&app).generation;

        // A further edit lands while that snapshot is being written.
        let _ = app.update(Message::Editor(BreakEditorMessage::Cancel));
        let _ = app.update(Message::Grid(BreakGridMessage::CreateRequested(20.0)));
        assert!(session(&app).generation > snapshot);

        // The save of the older snapshot completes: the newer edit is not
        // on disk, so the session must stay dirty.
        let _ = app.update(Message::PlanSaved {
            generation: snapshot,
            result: Ok(true),
        });
        assert!(session(&app).dirty);

        // A save of the current generation settles it.
        let current = session(&app).generation;
        let _ = app.update(Message::PlanSaved {
            generation: current,
            result: Ok(true),
        });
        assert!(!session(&app).dirty);
    }

    #[test]
    fn test_skipped_autosave_does_not_settle_session() {
        let mut app = planning_app();
        let _ = app.update(Message::Grid(BreakGridMessage::CreateRequested(30.0)));

        let current = session(&app).generation;
        let _ = app.update(Message::PlanSaved {
            generation: current,
            result: Ok(false),
        });
        assert!(session(&app).dirty);
    }
}
