/// Target used when no AI option is selected.
pub const DEFAULT_TARGET_VALUE: i32 = 100;

/// Maximum number of characters in a goal title.
pub const MAX_GOAL_TITLE_LENGTH: usize = 100;

/// Minimum number of characters for a goal description to pass local validation.
pub const MIN_GOAL_INPUT_LENGTH: usize = 10;

/// Idle period before a remote goal validation fires.
pub const VALIDATION_DEBOUNCE_MS: u64 = 800;

pub const MIN_USER_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 8;
