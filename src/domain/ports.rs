use crate::utils::error::Result;

/// Navigation targets the workflow can ask the host to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    PatientInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Confirm,
    Cancel,
}

/// Holds or withholds the auth token. Absence is a hard gate for the
/// binding workflow: no network call may be issued without a token.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub trait Navigator: Send + Sync {
    /// Go back one step; returns false when there is no prior page.
    fn back(&self) -> bool;
    fn navigate_to(&self, route: Route);
    fn redirect_to(&self, route: Route);
}

pub trait Notifier: Send + Sync {
    fn toast(&self, message: &str);
    /// Informational message requiring acknowledgment, no choice offered.
    fn alert(&self, title: &str, content: &str);
    fn confirm(
        &self,
        title: &str,
        content: &str,
        confirm_label: &str,
        cancel_label: &str,
    ) -> Choice;
}

/// Device scanning primitive yielding the raw decoded text of one code.
pub trait CodeScanner {
    fn scan(&self) -> Result<String>;
}
