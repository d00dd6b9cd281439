//! Page shells
//!
//! The server only decides which shell a request gets; the UI bundle mounted
//! inside the shell is an external collaborator.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::session::{SessionCookieManager, SessionState};
use crate::settings::PortalSettings;
use crate::utils::responses::ResponseBuilder;

/// Routes that render a shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRoute {
    /// `/` - protected landing page
    Home,
    /// `/admin` - unprotected login page
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShell {
    AdminLogin,
    StudentDashboard,
}

impl PageShell {
    #[must_use]
    pub fn resolve(route: ShellRoute, state: SessionState) -> Self {
        match route {
            ShellRoute::Home if state.is_authenticated() => Self::StudentDashboard,
            ShellRoute::Home | ShellRoute::Admin => Self::AdminLogin,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AdminLogin => "admin-login",
            Self::StudentDashboard => "student-dashboard",
        }
    }

    #[must_use]
    fn title(self) -> &'static str {
        match self {
            Self::AdminLogin => "Admin Login",
            Self::StudentDashboard => "Student Dashboard",
        }
    }
}

/// Shell HTML from the assets folder, or a generated mount point
#[must_use]
pub fn get_shell_page(settings: &PortalSettings, shell: PageShell) -> String {
    let html_path = format!("{}/{}.html", settings.static_files.assets_folder, shell.name());
    std::fs::read_to_string(&html_path).unwrap_or_else(|_| {
        debug!("No shell file at {html_path}, using generated shell");
        generate_shell_page(shell)
    })
}

#[must_use]
pub fn generate_shell_page(shell: PageShell) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    <div id="app" data-page="{name}"></div>
</body>
</html>"#,
        title = shell.title(),
        name = shell.name()
    )
}

fn render(
    route: ShellRoute,
    req: &HttpRequest,
    settings: &PortalSettings,
    cookie_manager: &SessionCookieManager,
) -> HttpResponse {
    let shell = PageShell::resolve(route, cookie_manager.session_state(req));
    debug!("Serving {} shell for {:?}", shell.name(), route);
    ResponseBuilder::html(get_shell_page(settings, shell))
}

/// `GET /`
pub async fn home(
    req: HttpRequest,
    settings: web::Data<PortalSettings>,
    cookie_manager: web::Data<SessionCookieManager>,
) -> HttpResponse {
    render(ShellRoute::Home, &req, &settings, &cookie_manager)
}

/// `GET /admin`
pub async fn admin(
    req: HttpRequest,
    settings: web::Data<PortalSettings>,
    cookie_manager: web::Data<SessionCookieManager>,
) -> HttpResponse {
    render(ShellRoute::Admin, &req, &settings, &cookie_manager)
}
