// src/services/navigation.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User},
};
use serde::{Deserialize, Serialize};

/// Every page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Dashboard,
    Classes,
    Students,
    Rankings,
    Profile,
    StudentPortal,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::StudentPortal,
        View::Classes,
        View::Students,
        View::Rankings,
        View::Profile,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Classes => "classes",
            View::Students => "students",
            View::Rankings => "rankings",
            View::Profile => "profile",
            View::StudentPortal => "student-portal",
        }
    }

    pub fn path(self) -> String {
        format!("/{}", self.slug())
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Tổng quan",
            View::Classes => "Quản lý Lớp",
            View::Students => "Học sinh",
            View::Rankings => "Xếp hạng",
            View::Profile => "Hồ sơ cá nhân",
            View::StudentPortal => "Cổng thông tin",
        }
    }

    /// View a role lands on right after logging in.
    pub fn landing_for(role: Role) -> View {
        match role {
            Role::Student => View::StudentPortal,
            Role::Admin => View::Dashboard,
        }
    }

    pub fn is_permitted(self, role: Role) -> bool {
        match self {
            View::Dashboard | View::Classes | View::Students => role == Role::Admin,
            View::StudentPortal => role == Role::Student,
            View::Rankings | View::Profile => true,
        }
    }
}

/// Sidebar entry for one view.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub path: String,
    pub label: &'static str,
    pub active: bool,
}

/// Per-session navigation state: who is logged in and which view is open.
///
/// Stored in the HTTP session; `current_user == None` is the logged-out state.
/// The session copy of the account never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigator {
    current_user: Option<User>,
    active_view: View,
}

impl Default for Navigator {
    fn default() -> Self {
        Self { current_user: None, active_view: View::Dashboard }
    }
}

impl Navigator {
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// `None` while logged out.
    pub fn active_view(&self) -> Option<View> {
        self.current_user.as_ref().map(|_| self.active_view)
    }

    /// Starts or ends a session. Logging in always resets navigation to
    /// the role's landing view, whatever was open before.
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.active_view = match &user {
            Some(u) => View::landing_for(u.role),
            None => View::Dashboard,
        };
        self.current_user = user.as_ref().map(session_copy);
    }

    /// Switches to `view` if the logged-in role may see it.
    pub fn select(&mut self, view: View) -> AppResult<()> {
        let role = self.current_user.as_ref().map(|u| u.role).ok_or(AppError::Unauthorized)?;
        if !view.is_permitted(role) {
            return Err(AppError::ViewNotPermitted(view.slug()));
        }
        self.active_view = view;
        Ok(())
    }

    /// Mirrors a profile update into the session when it is the same user.
    pub fn refresh_user(&mut self, updated: &User) -> bool {
        match &mut self.current_user {
            Some(current) if current.id == updated.id => {
                *current = session_copy(updated);
                true
            }
            _ => false,
        }
    }

    /// Sidebar items visible to the logged-in role.
    pub fn nav_items(&self) -> Vec<NavItem> {
        let Some(user) = &self.current_user else {
            return Vec::new();
        };
        View::ALL
            .into_iter()
            .filter(|view| view.is_permitted(user.role))
            .map(|view| NavItem {
                path: view.path(),
                label: view.label(),
                active: view == self.active_view,
            })
            .collect()
    }
}

fn session_copy(user: &User) -> User {
    User { password: None, ..user.clone() }
}
