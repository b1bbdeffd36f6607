//! The goal creation wizard.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;

use super::debounce::{DebouncedValidation, ValidationDebouncer};
use super::validation::validate_goal_input;
use super::wizard_model::{
    GoalDraft, ValidationState, ValidationStatus, WizardConfig, WizardError, WizardResult,
    WizardStep,
};
use crate::assistant::{
    AiPlan, GoalAssistantTrait, GoalPlanRequest, GoalValidationService, SuggestionStatus,
    TargetOption,
};
use crate::constants::MIN_GOAL_INPUT_LENGTH;
use crate::errors::{Error, FieldErrors};
use crate::goals::{
    resolve_target_date, GoalDuration, GoalServiceTrait, GoalWithTasks, NewGoal, NewTask,
    ResolvedTimeframe, TaskStatus, TIMEFRAME_PRESETS,
};
use crate::notifications::{NotificationKind, Notifier};
use crate::users::{require_session, SessionUser};
use crate::utils::Clock;

type CreatedCallback = Box<dyn Fn(&GoalWithTasks) + Send + Sync>;

/// Capabilities the wizard talks to.
#[derive(Clone)]
pub struct WizardDeps {
    pub assistant: Arc<dyn GoalAssistantTrait>,
    pub goals: Arc<dyn GoalServiceTrait>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

/// One goal creation session.
///
/// Steps run Goal → Target → Timeline → plan generation → Confirmation →
/// submission. Methods called in a step that does not accept them return
/// [`WizardError::InvalidTransition`] and change nothing.
///
/// Title edits schedule a debounced remote validation; the host feeds the
/// results back with [`GoalWizard::next_validation`] or
/// [`GoalWizard::apply_remote_validation`]. Must be used inside a tokio runtime.
pub struct GoalWizard {
    deps: WizardDeps,
    config: WizardConfig,
    session: Option<SessionUser>,
    on_created: Option<CreatedCallback>,

    step: WizardStep,
    draft: GoalDraft,
    validation: ValidationState,
    debouncer: ValidationDebouncer,
    validations: mpsc::UnboundedReceiver<DebouncedValidation>,

    target_options: Vec<TargetOption>,
    suggestion_status: Option<SuggestionStatus>,
    selected_option: Option<usize>,

    timeframe: Option<ResolvedTimeframe>,
    plan: Option<AiPlan>,
    selected_tasks: Vec<bool>,
    submit_errors: Option<FieldErrors>,
}

impl GoalWizard {
    pub fn open(deps: WizardDeps, session: Option<SessionUser>, config: WizardConfig) -> Self {
        let service = GoalValidationService::new(deps.assistant.clone());
        let (debouncer, validations) = ValidationDebouncer::new(service, config.debounce);
        GoalWizard {
            deps,
            config,
            session,
            on_created: None,
            step: WizardStep::Goal,
            draft: GoalDraft::new(config.default_target),
            validation: ValidationState::default(),
            debouncer,
            validations,
            target_options: Vec::new(),
            suggestion_status: None,
            selected_option: None,
            timeframe: None,
            plan: None,
            selected_tasks: Vec::new(),
            submit_errors: None,
        }
    }

    /// Called with the saved goal so the host can refresh its goal list.
    pub fn on_created(mut self, callback: impl Fn(&GoalWithTasks) + Send + Sync + 'static) -> Self {
        self.on_created = Some(Box::new(callback));
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &GoalDraft {
        &self.draft
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn target_options(&self) -> &[TargetOption] {
        &self.target_options
    }

    pub fn suggestion_status(&self) -> Option<SuggestionStatus> {
        self.suggestion_status
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn timeframe(&self) -> Option<&ResolvedTimeframe> {
        self.timeframe.as_ref()
    }

    pub fn plan(&self) -> Option<&AiPlan> {
        self.plan.as_ref()
    }

    pub fn selected_tasks(&self) -> &[bool] {
        &self.selected_tasks
    }

    pub fn submit_errors(&self) -> Option<&FieldErrors> {
        self.submit_errors.as_ref()
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> WizardResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    // ---------------------------------------------------------------------
    // Step 1: goal
    // ---------------------------------------------------------------------

    /// Updates the goal text and revalidates it.
    pub fn set_title(&mut self, title: impl Into<String>) -> WizardResult<()> {
        self.expect_step(WizardStep::Goal, "edit the goal")?;
        self.draft.title = title.into();

        let local = validate_goal_input(&self.draft.title);
        if !local.is_valid {
            self.debouncer.cancel();
            self.validation = ValidationState::new(ValidationStatus::Invalid, local.message);
            return Ok(());
        }

        if self.draft.title.trim().chars().count() > MIN_GOAL_INPUT_LENGTH {
            self.debouncer.schedule(self.draft.title.clone());
            self.validation = ValidationState::new(ValidationStatus::Validating, None);
        } else {
            self.debouncer.cancel();
            self.validation = ValidationState::new(ValidationStatus::Valid, None);
        }
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) -> WizardResult<()> {
        self.expect_step(WizardStep::Goal, "edit the description")?;
        self.draft.description = description.filter(|d| !d.trim().is_empty());
        Ok(())
    }

    /// Applies a debounced verdict. Returns `false` when it was stale.
    pub fn apply_remote_validation(&mut self, validation: DebouncedValidation) -> bool {
        if self.step != WizardStep::Goal || !self.debouncer.is_current(validation.version) {
            debug!("Ignoring stale validation v{}", validation.version);
            return false;
        }
        let status = if validation.result.is_valid {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };
        self.validation = ValidationState::new(status, validation.result.feedback);
        true
    }

    /// Waits for the next debounced verdict and applies it, returning whether
    /// it was still current.
    pub async fn next_validation(&mut self) -> Option<bool> {
        let validation = self.validations.recv().await?;
        Some(self.apply_remote_validation(validation))
    }

    /// Step 1 → Step 2. Fetches target suggestions before moving on.
    pub async fn advance_to_target(&mut self) -> WizardResult<()> {
        self.expect_step(WizardStep::Goal, "continue to the target")?;

        let local = validate_goal_input(&self.draft.title);
        if !local.is_valid {
            let message = local.message.unwrap_or_default();
            self.validation = ValidationState::new(ValidationStatus::Invalid, Some(message.clone()));
            return Err(WizardError::InvalidGoal(message));
        }
        self.debouncer.cancel();

        let suggestions = self
            .deps
            .assistant
            .suggest_targets(self.draft.title.trim(), self.draft.description.as_deref())
            .await;

        if suggestions.status == SuggestionStatus::Unavailable {
            self.deps.notifier.notify(
                NotificationKind::Warning,
                "Suggestions unavailable",
                "We couldn't suggest targets right now. You can still set your own.",
            );
        }

        self.target_options = suggestions.options;
        self.suggestion_status = Some(suggestions.status);
        match self.target_options.first() {
            Some(first) => {
                self.selected_option = Some(0);
                self.draft.target_value = first.target_value();
            }
            None => {
                self.selected_option = None;
                self.draft.target_value = self.config.default_target;
            }
        }

        self.step = WizardStep::Target;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Step 2: target
    // ---------------------------------------------------------------------

    pub fn select_target_option(&mut self, index: usize) -> WizardResult<()> {
        self.expect_step(WizardStep::Target, "select a target")?;
        let option = self
            .target_options
            .get(index)
            .ok_or(WizardError::UnknownOption(index))?;
        self.draft.target_value = option.target_value();
        self.selected_option = Some(index);
        Ok(())
    }

    pub fn set_custom_target(&mut self, value: i32) -> WizardResult<()> {
        self.expect_step(WizardStep::Target, "set a target")?;
        if value <= 0 {
            return Err(WizardError::InvalidTarget);
        }
        self.draft.target_value = value;
        self.selected_option = None;
        Ok(())
    }

    pub fn advance_to_timeline(&mut self) -> WizardResult<()> {
        self.expect_step(WizardStep::Target, "continue to the timeline")?;
        if self.draft.target_value <= 0 {
            return Err(WizardError::InvalidTarget);
        }
        self.step = WizardStep::Timeline;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Step 3: timeline
    // ---------------------------------------------------------------------

    pub fn set_duration(&mut self, duration: GoalDuration) -> WizardResult<()> {
        self.expect_step(WizardStep::Timeline, "set the timeframe")?;
        self.draft.duration = duration;
        Ok(())
    }

    pub fn select_preset(&mut self, index: usize) -> WizardResult<()> {
        let preset = TIMEFRAME_PRESETS
            .get(index)
            .ok_or(WizardError::UnknownPreset(index))?;
        self.set_duration(preset.duration)
    }

    /// Moves one step back: Timeline → Target → Goal, or dismisses the
    /// confirmation view back to the timeline.
    pub fn back(&mut self) -> WizardResult<()> {
        self.step = match self.step {
            WizardStep::Target => WizardStep::Goal,
            WizardStep::Timeline => WizardStep::Target,
            WizardStep::Confirmation => {
                self.plan = None;
                self.selected_tasks.clear();
                self.submit_errors = None;
                WizardStep::Timeline
            }
            step => {
                return Err(WizardError::InvalidTransition {
                    step,
                    action: "go back",
                })
            }
        };
        Ok(())
    }

    /// Step 3 → Confirmation. Resolves the timeframe and asks for a plan.
    ///
    /// On failure an error notification is raised and the wizard stays on
    /// the timeline step.
    pub async fn generate_plan(&mut self) -> WizardResult<&AiPlan> {
        self.expect_step(WizardStep::Timeline, "generate a plan")?;

        let timeframe = match resolve_target_date(self.draft.duration, self.deps.clock.now()) {
            Ok(timeframe) => timeframe,
            Err(e) => {
                self.notify_error(&e.to_string());
                return Err(WizardError::Timeframe(e.to_string()));
            }
        };

        self.step = WizardStep::GeneratingPlan;
        let request = GoalPlanRequest {
            goal_name: self.draft.title.trim().to_string(),
            goal_description: self.draft.description.clone(),
            target_value: self.draft.target_value,
            target_date: timeframe.target_date,
        };

        let outcome = match self.deps.assistant.generate_plan(&request).await {
            Ok(plan) if plan.tasks.is_empty() => Err("no tasks were suggested".to_string()),
            Ok(plan) => Ok(plan),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(plan) => {
                debug!("Plan generated with {} tasks", plan.tasks.len());
                self.selected_tasks = vec![true; plan.tasks.len()];
                self.timeframe = Some(timeframe);
                self.submit_errors = None;
                self.step = WizardStep::Confirmation;
                Ok(&*self.plan.insert(plan))
            }
            Err(reason) => {
                warn!("Plan generation failed: {}", reason);
                self.step = WizardStep::Timeline;
                self.notify_error("Could not generate plan. Please try again.");
                Err(WizardError::PlanFailed(reason))
            }
        }
    }

    // ---------------------------------------------------------------------
    // Confirmation
    // ---------------------------------------------------------------------

    pub fn toggle_task(&mut self, index: usize) -> WizardResult<bool> {
        self.expect_step(WizardStep::Confirmation, "select tasks")?;
        let selected = self
            .selected_tasks
            .get_mut(index)
            .ok_or(WizardError::UnknownTask(index))?;
        *selected = !*selected;
        Ok(*selected)
    }

    /// Saves the goal with every generated task; selected tasks are accepted,
    /// the rest kept as suggestions. Failures leave the wizard on the
    /// confirmation view with the errors recorded.
    pub async fn accept_plan(&mut self) -> WizardResult<GoalWithTasks> {
        self.expect_step(WizardStep::Confirmation, "accept the plan")?;
        if !self.selected_tasks.iter().any(|s| *s) {
            return Err(WizardError::NoTaskSelected);
        }
        let (Some(plan), Some(timeframe)) = (self.plan.as_ref(), self.timeframe.as_ref()) else {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "accept the plan",
            });
        };

        let new_goal = NewGoal {
            title: self.draft.title.trim().to_string(),
            description: self.draft.description.clone(),
            target: self.draft.target_value,
            target_date: timeframe.target_date,
            is_habit: timeframe.is_habit,
            tasks: plan
                .tasks
                .iter()
                .zip(&self.selected_tasks)
                .map(|(task, selected)| NewTask {
                    title: task.title.clone(),
                    status: if *selected {
                        TaskStatus::Accepted
                    } else {
                        TaskStatus::Suggested
                    },
                })
                .collect(),
        };

        self.step = WizardStep::Submitting;
        self.submit_errors = None;

        let result = match require_session(self.session.as_ref()) {
            Ok(session) => {
                let user_id = session.user_id.clone();
                self.deps.goals.create_goal(&user_id, new_goal).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(created) => {
                info!("Wizard created goal {}", created.goal.id);
                self.step = WizardStep::Completed;
                self.deps.notifier.notify(
                    NotificationKind::Success,
                    "Goal created",
                    &format!("\"{}\" was added to your goals.", created.goal.title),
                );
                if let Some(callback) = &self.on_created {
                    callback(&created);
                }
                self.discard_draft();
                Ok(created)
            }
            Err(e) => {
                let errors = submission_errors(&e);
                self.step = WizardStep::Confirmation;
                self.notify_error(&e.to_string());
                self.submit_errors = Some(errors.clone());
                Err(WizardError::Submission(errors))
            }
        }
    }

    /// Abandons the session. Not available once submission has started.
    pub fn cancel(&mut self) -> WizardResult<()> {
        if !self.step.is_cancellable() {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "cancel",
            });
        }
        self.step = WizardStep::Cancelled;
        self.discard_draft();
        Ok(())
    }

    fn discard_draft(&mut self) {
        self.debouncer.cancel();
        self.draft = GoalDraft::new(self.config.default_target);
        self.validation = ValidationState::default();
        self.target_options.clear();
        self.suggestion_status = None;
        self.selected_option = None;
        self.timeframe = None;
        self.plan = None;
        self.selected_tasks.clear();
    }

    fn notify_error(&self, message: &str) {
        self.deps
            .notifier
            .notify(NotificationKind::Error, "Error", message);
    }
}

/// Field errors from a failed save, with an aggregate form message.
fn submission_errors(error: &Error) -> FieldErrors {
    match error.field_errors() {
        Some(fields) => {
            let mut errors = fields.clone();
            if errors.get(FieldErrors::FORM).is_none() {
                errors.add(FieldErrors::FORM, "Please fix the errors above");
            }
            errors
        }
        None => FieldErrors::form(error.to_string()),
    }
}
