//! Goal creation wizard - local validation, debounced remote validation and
//! the step-by-step state machine.

mod debounce;
mod validation;
mod verbs;
#[allow(clippy::module_inception)]
mod wizard;
mod wizard_model;


pub use debounce::{DebouncedValidation, ValidationDebouncer};
pub use validation::{
    validate_goal_input, GoalInputValidation, MISSING_VERB_MESSAGE, NOT_A_GOAL_MESSAGE,
    TOO_SHORT_MESSAGE,
};
pub use verbs::{contains_action_verb, GOAL_ACTION_VERBS};
pub use wizard::{GoalWizard, WizardDeps};
pub use wizard_model::{
    GoalDraft, ValidationState, ValidationStatus, WizardConfig, WizardError, WizardResult,
    WizardStep,
};
