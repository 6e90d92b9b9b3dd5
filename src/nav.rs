use crate::models::{NavLink, NavSection, NavigationMenu};

/// Route the sign-out flow lands on after the auth collaborator clears the
/// session.
pub const HOME_ROUTE: &str = "/";

/// Fallback for category labels with no mapped route.
pub const CATEGORY_FALLBACK_ROUTE: &str = "/exam-categories";

/// Static category-label -> route table, the single source of truth shared by
/// the desktop and mobile navigation variants (label, slug, route).
pub const CATEGORY_ROUTES: &[(&str, &str, &str)] = &[
    ("SSC Exams", "ssc", "/exam-categories/ssc"),
    ("UPSC", "upsc", "/exam-categories/upsc"),
    ("Banking", "banking", "/exam-categories/banking"),
    ("Railways", "railways", "/exam-categories/railways"),
    ("Defence", "defence", "/exam-categories/defence"),
    ("Teaching", "teaching", "/exam-categories/teaching"),
    ("State PSC", "state-psc", "/exam-categories/state-psc"),
];

/// Resolve a category slug to its navigation route. Unmapped categories fall
/// back to the catalog index instead of a dead link.
pub fn route_for_category(slug: &str) -> &'static str {
    CATEGORY_ROUTES
        .iter()
        .find(|(_, s, _)| *s == slug)
        .map(|(_, _, route)| *route)
        .unwrap_or(CATEGORY_FALLBACK_ROUTE)
}

// --- Slug Route Builders ---
// Slugs are the sole routing keys across the site; these builders keep the
// client routing surface in one place.

pub fn pyq_route(category: &str, exam_name: Option<&str>, year: Option<i32>) -> String {
    match (exam_name, year) {
        (Some(exam), Some(year)) => format!("/pyq/{category}/{exam}/{year}"),
        (Some(exam), None) => format!("/pyq/{category}/{exam}"),
        _ => format!("/pyq/{category}"),
    }
}

pub fn live_tests_route(category: Option<&str>) -> String {
    match category {
        Some(category) => format!("/live-tests/{category}"),
        None => "/live-tests".to_string(),
    }
}

pub fn test_series_route(category: &str, series: &str) -> String {
    format!("/test-series/{category}/{series}")
}

/// Build the menu table served at GET /api/navigation.
pub fn navigation_menu() -> NavigationMenu {
    let category_links: Vec<NavLink> = CATEGORY_ROUTES
        .iter()
        .map(|(label, _, route)| NavLink {
            label: label.to_string(),
            route: route.to_string(),
        })
        .collect();

    NavigationMenu {
        sections: vec![
            NavSection {
                label: "Explore Exams".to_string(),
                items: category_links,
            },
            NavSection {
                label: "Tests".to_string(),
                items: vec![
                    NavLink {
                        label: "Live Tests".to_string(),
                        route: live_tests_route(None),
                    },
                    NavLink {
                        label: "Test Series".to_string(),
                        route: "/test-series".to_string(),
                    },
                ],
            },
            NavSection {
                label: "PYQs".to_string(),
                items: vec![NavLink {
                    label: "Previous Year Questions".to_string(),
                    route: "/pyq".to_string(),
                }],
            },
        ],
    }
}

// --- Header Chrome State ---

/// The dropdown menus in the header. Each had an independent open flag in the
/// original site; here exactly one can be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    ExploreExams,
    Tests,
    Pyqs,
    UserMenu,
    Categories,
}

/// NavMenuState
///
/// Local UI state for the navigation shell: the mobile-menu flag plus which
/// dropdown (if any) is open. Dropdowns open on hover on pointing devices and
/// toggle on click otherwise; opening one closes the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavMenuState {
    mobile_menu_open: bool,
    open_dropdown: Option<Dropdown>,
}

impl NavMenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
        // Opening the mobile menu dismisses any open desktop dropdown.
        if self.mobile_menu_open {
            self.open_dropdown = None;
        }
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        self.open_dropdown == Some(dropdown)
    }

    /// Click toggle (touch devices): re-clicking the open dropdown closes it.
    pub fn toggle(&mut self, dropdown: Dropdown) {
        if self.open_dropdown == Some(dropdown) {
            self.open_dropdown = None;
        } else {
            self.open_dropdown = Some(dropdown);
        }
    }

    /// Hover open (pointing devices).
    pub fn hover_open(&mut self, dropdown: Dropdown) {
        self.open_dropdown = Some(dropdown);
    }

    pub fn close_all(&mut self) {
        self.open_dropdown = None;
        self.mobile_menu_open = false;
    }
}
