use crate::permissions::{has_capability, Capability, Role};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NavSection {
    Main,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub title: &'static str,
    pub url: &'static str,
    pub section: NavSection,
    pub requires: &'static [Capability],
}

const fn entry(
    title: &'static str,
    url: &'static str,
    section: NavSection,
    requires: &'static [Capability],
) -> NavEntry {
    NavEntry {
        title,
        url,
        section,
        requires,
    }
}

pub const DASHBOARD_URL: &str = "/dashboard";
pub const LOGIN_URL: &str = "/login";

/// Sidebar entries in display order.
pub const NAV_ENTRIES: &[NavEntry] = &[
    entry("Dashboard", DASHBOARD_URL, NavSection::Main, &[Capability::All]),
    entry(
        "Estudantes",
        "/students",
        NavSection::Main,
        &[Capability::Students, Capability::All],
    ),
    entry(
        "Professores",
        "/teachers",
        NavSection::Main,
        &[Capability::Teachers, Capability::All],
    ),
    entry(
        "Classes & Turmas",
        "/turmas",
        NavSection::Main,
        &[Capability::Classes, Capability::All],
    ),
    entry(
        "Matrículas",
        "/enrollments",
        NavSection::Main,
        &[Capability::Students, Capability::All],
    ),
    entry(
        "Disciplinas",
        "/disciplinas",
        NavSection::Main,
        &[Capability::Subjects, Capability::All],
    ),
    entry(
        "Presenças",
        "/presencas",
        NavSection::Main,
        &[Capability::Attendance, Capability::All],
    ),
    entry(
        "Avaliações",
        "/avaliacoes",
        NavSection::Main,
        &[Capability::Evaluations, Capability::All],
    ),
    entry(
        "Financeiro",
        "/financeiro",
        NavSection::Main,
        &[Capability::Financial, Capability::All],
    ),
    entry(
        "Relatórios",
        "/relatorios",
        NavSection::Main,
        &[Capability::Reports, Capability::All],
    ),
    entry(
        "Notificações",
        "/notificacoes",
        NavSection::System,
        &[Capability::All],
    ),
    entry(
        "Configurações",
        "/configuracoes",
        NavSection::System,
        &[Capability::All],
    ),
];

/// Entries the role may see, in catalogue order.
pub fn visible_entries(role: Option<Role>, entries: &[NavEntry]) -> Vec<&NavEntry> {
    entries
        .iter()
        .filter(|e| has_capability(role, e.requires))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
    Forbidden,
}

fn owns_path(url: &str, path: &str) -> bool {
    match path.strip_prefix(url) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Decides what happens when the UI navigates to `path`. `signed_in_as` is
/// `None` for a signed-out user.
///
/// Signing in is the only gate for paths no entry owns and for entries that
/// require nothing but the wildcard; entries naming a concrete capability are
/// also gated by it.
pub fn guard_route(signed_in_as: Option<Role>, path: &str) -> RouteDecision {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    let Some(role) = signed_in_as else {
        return if path == LOGIN_URL {
            RouteDecision::Allow
        } else {
            RouteDecision::Redirect(LOGIN_URL)
        };
    };
    if path.is_empty() || path == LOGIN_URL {
        return RouteDecision::Redirect(DASHBOARD_URL);
    }

    let Some(owner) = NAV_ENTRIES.iter().find(|e| owns_path(e.url, path)) else {
        return RouteDecision::Allow;
    };
    let concrete = owner.requires.iter().any(|c| *c != Capability::All);
    if concrete && !has_capability(Some(role), owner.requires) {
        RouteDecision::Forbidden
    } else {
        RouteDecision::Allow
    }
}
