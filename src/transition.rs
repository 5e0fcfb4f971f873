use serde_json::json;

use crate::config::{PAGE_ENTER_MS, PAGE_EXIT_MS, PAGE_SHIFT_PX};
use crate::environment::BrowserEnvironment;
use crate::telemetry::{log_event, LogLevel};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Route {
    Home,
    About,
    Countries,
    Gallery,
    Blog,
    Inquiry,
    Contact,
    NotFound,
}

pub const ROUTE_TABLE: [(&str, Route); 7] = [
    ("/", Route::Home),
    ("/about", Route::About),
    ("/countries", Route::Countries),
    ("/gallery", Route::Gallery),
    ("/blog", Route::Blog),
    ("/inquiry", Route::Inquiry),
    ("/contact", Route::Contact),
];

const SITE_NAME: &str = "Horizon Education Consultancy";

impl Route {
    /// Resolves a browser path against the route table; anything else is
    /// the not-found page. A single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let normalized = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        ROUTE_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, route)| *route)
            .unwrap_or(Self::NotFound)
    }

    pub fn path(self) -> &'static str {
        ROUTE_TABLE
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(path, _)| *path)
            .unwrap_or("/404")
    }

    pub fn title(self) -> String {
        let page = match self {
            Self::Home => return format!("{SITE_NAME} | Study Abroad Experts"),
            Self::About => "About Us",
            Self::Countries => "Study Destinations",
            Self::Gallery => "Gallery",
            Self::Blog => "Blog",
            Self::Inquiry => "Student Inquiry",
            Self::Contact => "Contact Us",
            Self::NotFound => "Page Not Found",
        };
        format!("{page} | {SITE_NAME}")
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Countries => "Countries",
            Self::Gallery => "Gallery",
            Self::Blog => "Blog",
            Self::Inquiry => "Inquiry",
            Self::Contact => "Contact",
            Self::NotFound => "Not Found",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionPhase {
    Idle(Route),
    Exiting { from: Route, to: Route },
    Entering(Route),
}

/// What a timer should do next, and when.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionStep {
    None,
    ExitFor { ms: u32 },
    EnterFor { ms: u32 },
}

#[derive(Clone, PartialEq, Debug)]
pub struct PageFrame {
    pub route: Route,
    pub style: String,
}

/// Page exit/enter choreography keyed by route. Only one page is ever
/// rendered: the exiting one until its exit finishes, then the entering one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransitionController {
    phase: TransitionPhase,
}

impl TransitionController {
    pub fn new(initial: Route) -> Self {
        Self {
            phase: TransitionPhase::Entering(initial),
        }
    }

    #[cfg(test)]
    fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// The route whose page should be mounted now.
    pub fn displayed(&self) -> Route {
        match self.phase {
            TransitionPhase::Idle(route) | TransitionPhase::Entering(route) => route,
            TransitionPhase::Exiting { from, .. } => from,
        }
    }

    /// The route navigation is heading to.
    pub fn target(&self) -> Route {
        match self.phase {
            TransitionPhase::Idle(route) | TransitionPhase::Entering(route) => route,
            TransitionPhase::Exiting { to, .. } => to,
        }
    }

    pub fn frame(&self) -> PageFrame {
        PageFrame {
            route: self.displayed(),
            style: page_style(self.phase),
        }
    }

    /// Starts the mount-time entry for the landing page.
    pub fn mount(&self, env: &dyn BrowserEnvironment) -> TransitionStep {
        if let TransitionPhase::Entering(route) = self.phase {
            env.set_title(&route.title());
            return TransitionStep::EnterFor { ms: PAGE_ENTER_MS };
        }
        TransitionStep::None
    }

    pub fn navigate(&mut self, to: Route, env: &dyn BrowserEnvironment) -> TransitionStep {
        if to == self.target() {
            return TransitionStep::None;
        }

        env.scroll_to_top();
        log_event(
            LogLevel::Info,
            "route_changed",
            json!({ "from": self.target().path(), "to": to.path() }),
        );

        match self.phase {
            TransitionPhase::Exiting { from, .. } => {
                self.phase = TransitionPhase::Exiting { from, to };
                TransitionStep::None
            }
            TransitionPhase::Idle(from) | TransitionPhase::Entering(from) => {
                self.phase = TransitionPhase::Exiting { from, to };
                TransitionStep::ExitFor { ms: PAGE_EXIT_MS }
            }
        }
    }

    pub fn exit_finished(&mut self, env: &dyn BrowserEnvironment) -> TransitionStep {
        let TransitionPhase::Exiting { to, .. } = self.phase else {
            return TransitionStep::None;
        };

        self.phase = TransitionPhase::Entering(to);
        env.set_title(&to.title());
        TransitionStep::EnterFor { ms: PAGE_ENTER_MS }
    }

    pub fn enter_finished(&mut self) {
        if let TransitionPhase::Entering(route) = self.phase {
            self.phase = TransitionPhase::Idle(route);
        }
    }
}

fn page_style(phase: TransitionPhase) -> String {
    match phase {
        TransitionPhase::Idle(_) => "opacity: 1; transform: none;".to_string(),
        TransitionPhase::Exiting { .. } => format!(
            "--page-shift: {PAGE_SHIFT_PX}px; animation: page-exit {PAGE_EXIT_MS}ms ease-in forwards;"
        ),
        TransitionPhase::Entering(_) => format!(
            "--page-shift: {PAGE_SHIFT_PX}px; animation: page-enter {PAGE_ENTER_MS}ms ease-out both;"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::memory::MemoryEnvironment;

    #[test]
    fn paths_resolve_through_route_table() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path("/about"), Route::About);
        assert_eq!(Route::from_path("/about/"), Route::About);
        assert_eq!(Route::from_path("/contact?ref=nav"), Route::Contact);
        assert_eq!(Route::from_path("/blog#latest"), Route::Blog);
        assert_eq!(Route::from_path("/admin"), Route::NotFound);
        assert_eq!(Route::from_path("/about/team"), Route::NotFound);

        for (path, route) in ROUTE_TABLE {
            assert_eq!(route.path(), path);
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn not_found_page_round_trips_through_its_own_path() {
        assert_eq!(Route::NotFound.path(), "/404");
        assert_eq!(Route::from_path(Route::NotFound.path()), Route::NotFound);
        assert!(ROUTE_TABLE.iter().all(|(_, route)| *route != Route::NotFound));
    }

    #[test]
    fn navigation_from_home_to_about_scrolls_top_and_sets_title() {
        let env = MemoryEnvironment::scrolled_to(1_250.0);
        let mut controller = TransitionController::new(Route::Home);
        controller.mount(&env);
        controller.enter_finished();
        assert_eq!(env.title(), Route::Home.title());

        let step = controller.navigate(Route::About, &env);
        assert_eq!(step, TransitionStep::ExitFor { ms: 400 });
        assert_eq!(env.scroll_y(), 0.0);
        assert_eq!(controller.displayed(), Route::Home);

        let step = controller.exit_finished(&env);
        assert_eq!(step, TransitionStep::EnterFor { ms: 500 });
        assert_eq!(controller.displayed(), Route::About);
        assert_eq!(env.title(), "About Us | Horizon Education Consultancy");

        controller.enter_finished();
        assert_eq!(controller.phase(), TransitionPhase::Idle(Route::About));
    }

    #[test]
    fn same_route_navigation_does_not_replay() {
        let env = MemoryEnvironment::scrolled_to(500.0);
        let mut controller = TransitionController::new(Route::Blog);
        controller.enter_finished();

        assert_eq!(controller.navigate(Route::Blog, &env), TransitionStep::None);
        assert_eq!(controller.phase(), TransitionPhase::Idle(Route::Blog));
        assert_eq!(env.scroll_y(), 500.0);
    }

    #[test]
    fn only_one_page_is_displayed_during_a_transition() {
        let env = MemoryEnvironment::default();
        let mut controller = TransitionController::new(Route::Home);
        controller.navigate(Route::Gallery, &env);

        assert!(matches!(controller.phase(), TransitionPhase::Exiting { .. }));
        assert_eq!(controller.frame().route, Route::Home);
        assert!(controller.frame().style.contains("page-exit"));
    }

    #[test]
    fn navigating_while_exiting_retargets_entry() {
        let env = MemoryEnvironment::default();
        let mut controller = TransitionController::new(Route::Home);
        controller.navigate(Route::About, &env);

        assert_eq!(controller.navigate(Route::Contact, &env), TransitionStep::None);
        controller.exit_finished(&env);
        assert_eq!(controller.displayed(), Route::Contact);
        assert_eq!(env.title(), Route::Contact.title());
    }

    #[test]
    fn navigating_back_while_exiting_to_same_target_is_noop() {
        let env = MemoryEnvironment::default();
        let mut controller = TransitionController::new(Route::Home);
        controller.navigate(Route::About, &env);
        assert_eq!(controller.navigate(Route::About, &env), TransitionStep::None);
    }

    #[test]
    fn navigating_while_entering_starts_a_new_exit() {
        let env = MemoryEnvironment::default();
        let mut controller = TransitionController::new(Route::Home);
        controller.navigate(Route::About, &env);
        controller.exit_finished(&env);

        let step = controller.navigate(Route::Blog, &env);
        assert_eq!(step, TransitionStep::ExitFor { ms: 400 });
        assert_eq!(
            controller.phase(),
            TransitionPhase::Exiting { from: Route::About, to: Route::Blog }
        );
    }

    #[test]
    fn stray_timer_callbacks_are_ignored() {
        let env = MemoryEnvironment::default();
        let mut controller = TransitionController::new(Route::Home);
        controller.enter_finished();

        assert_eq!(controller.exit_finished(&env), TransitionStep::None);
        controller.enter_finished();
        assert_eq!(controller.phase(), TransitionPhase::Idle(Route::Home));
    }
}
