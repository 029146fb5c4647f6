use rust_decimal::Decimal;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default page size for transaction listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of transactions shown on the dashboard
pub const RECENT_TRANSACTIONS_LIMIT: i64 = 5;

/// Number of most recent months kept in the monthly evolution of the overview
pub const MONTHLY_EVOLUTION_WINDOW: usize = 6;

pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_CATEGORY_LENGTH: usize = 100;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_REGISTRATION_NAME_LENGTH: usize = 3;
pub const MIN_PROFILE_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;

/// Years accepted by the report listing filter
pub const MIN_REPORT_YEAR: i32 = 2000;
pub const MAX_REPORT_YEAR: i32 = 3000;

/// Largest amount accepted for transactions, budgets and thresholds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2); // 9_999_999_999 scale 2

/// Decimal places accepted on stored amounts
pub const AMOUNT_SCALE: u32 = 2;
