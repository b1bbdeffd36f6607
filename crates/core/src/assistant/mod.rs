//! Assistant module - AI suggestion contracts and the validation fallback.

mod assistant_model;
mod assistant_traits;
mod validation_service;

#[cfg(test)]
pub(crate) mod testing;

pub use assistant_model::{
    AiPlan, GoalPlanRequest, PlanTask, RemoteValidation, SuggestionStatus, TargetOption,
    TargetSuggestions,
};
pub use assistant_traits::GoalAssistantTrait;
pub use validation_service::GoalValidationService;
