mod public;
pub use public::{Home, Login, NotFound, Signup};

mod dashboard;
pub use dashboard::{DashboardHome, DashboardShell, Profile, SessionShell, Settings};

mod pages;
pub use pages::{ListItem, ReturnItem, Scan};
