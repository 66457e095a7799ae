//! The application's route surface.

pub const ROOT: &str = "/";

// Public
pub const SIGN_IN: &str = "/login";
pub const REGISTER: &str = "/register";

// Client
pub const CARS: &str = "/cars";
pub const TERMS: &str = "/terms";
pub const PROFILE: &str = "/profile";
pub const RENT: &str = "/rent/:car_id";
pub const RENTALS: &str = "/rentals";

// Operator
pub const OPERATOR_FLEET: &str = "/operator/fleet";
pub const OPERATOR_REQUESTS: &str = "/operator/requests";

// Technician
pub const TECHNICIAN_MAINTENANCE: &str = "/technician/maintenance";
pub const TECHNICIAN_COMPLETED: &str = "/technician/completed";

// Accountant
pub const ACCOUNTING: &str = "/accountant/accounting";

// Manager
pub const MANAGER_STATISTICS: &str = "/manager/statistics";
pub const MANAGER_FLEET: &str = "/manager/fleet";
