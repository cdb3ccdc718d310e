//! Single-slot owner of the mounted view fragment.
//!
//! A load is split into `begin` (before the fetch), `complete` (after the
//! markup fetch) and `mount` (after the companion script, if any, has loaded).
//! Each `begin` bumps a generation counter; a ticket from an older generation
//! is rejected at both later steps, so two back-to-back navigations can never
//! interleave their DOM swaps.
//!
//! The loader also remembers which companions are attached to the document.
//! They change ahead of `mount` (the script has to load first), so a load that
//! fails or goes stale after attaching hands back a [`CompanionSwap`] from
//! [`ViewLoader::rollback`] that restores the mounted view's companions.

use tracing::{debug, info};

use crate::error::LoadError;
use crate::view::{ViewName, ViewState};

/// Stylesheet element id reserved for the mounted view.
pub const VIEW_STYLE_ID: &str = "view-style";
/// Script element id reserved for the mounted view.
pub const VIEW_SCRIPT_ID: &str = "view-script";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    state: ViewState,
    markup_url: String,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> ViewName {
        self.state.view_name()
    }

    pub fn markup_url(&self) -> &str {
        &self.markup_url
    }
}

/// Replace `#view-style` / `#view-script` in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionSwap {
    /// A `#view-style` element is attached and must go first.
    pub remove_stylesheet: bool,
    /// A `#view-script` element is attached and must go first.
    pub remove_script: bool,
    pub stylesheet: Option<String>,
    pub script: Option<String>,
}

/// DOM work needed to swap in a freshly fetched fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPlan {
    pub generation: u64,
    pub state: ViewState,
    pub markup: String,
    pub companions: CompanionSwap,
}

impl MountPlan {
    pub fn view(&self) -> ViewName {
        self.state.view_name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedView {
    pub handle: MountHandle,
    pub state: ViewState,
    pub markup: String,
    pub stylesheet: Option<String>,
    pub script: Option<String>,
}

/// Companions currently in the document and the load that put them there.
#[derive(Debug, Default)]
struct Attached {
    generation: Option<u64>,
    stylesheet: Option<String>,
    script: Option<String>,
}

#[derive(Debug)]
pub struct ViewLoader {
    base: String,
    generation: u64,
    pending: Option<u64>,
    mounted: Option<MountedView>,
    attached: Attached,
}

impl ViewLoader {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            generation: 0,
            pending: None,
            mounted: None,
            attached: Attached::default(),
        }
    }

    /// Start loading `state`'s fragment. Any load still in flight becomes stale.
    pub fn begin(&mut self, state: ViewState) -> LoadTicket {
        self.generation += 1;
        if let Some(prev) = self.pending.replace(self.generation) {
            debug!(superseded = prev, generation = self.generation, "view load superseded");
        }
        let markup_url = state.view_name().markup_url(&self.base);
        LoadTicket {
            generation: self.generation,
            state,
            markup_url,
        }
    }

    /// Feed the markup fetch result back in.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String, String>,
    ) -> Result<MountPlan, LoadError> {
        self.check_current(ticket.view(), ticket.generation)?;

        let markup = match fetched {
            Ok(markup) => markup,
            Err(reason) => {
                self.pending = None;
                return Err(LoadError::ViewLoadFailed {
                    view: ticket.view(),
                    reason,
                });
            }
        };

        let view = ticket.view();
        Ok(MountPlan {
            generation: ticket.generation,
            state: ticket.state,
            markup,
            companions: CompanionSwap {
                remove_stylesheet: self.attached.stylesheet.is_some(),
                remove_script: self.attached.script.is_some(),
                stylesheet: view.stylesheet_url(&self.base),
                script: view.script_url(&self.base),
            },
        })
    }

    /// Whether a load of `generation` may still touch the document.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.pending == Some(generation)
    }

    /// `plan`'s companions are now in the document (the script may still be loading).
    pub fn companions_attached(&mut self, plan: &MountPlan) {
        self.attached = Attached {
            generation: Some(plan.generation),
            stylesheet: plan.companions.stylesheet.clone(),
            script: plan.companions.script.clone(),
        };
    }

    /// The companion script failed to load; the previous view stays current.
    ///
    /// Follow up with [`ViewLoader::rollback`] to put its companions back.
    pub fn fail(&mut self, plan: &MountPlan, reason: impl Into<String>) -> LoadError {
        if self.pending == Some(plan.generation) {
            self.pending = None;
        }
        LoadError::ViewLoadFailed {
            view: plan.view(),
            reason: reason.into(),
        }
    }

    /// Undo the companions attached by a load of `generation` that never mounted.
    ///
    /// Returns `None` when that load attached nothing or a later load has
    /// already replaced its companions.
    pub fn rollback(&mut self, generation: u64) -> Option<CompanionSwap> {
        if self.attached.generation != Some(generation) {
            return None;
        }
        let (owner, stylesheet, script) = match &self.mounted {
            Some(m) => (Some(m.handle.0), m.stylesheet.clone(), m.script.clone()),
            None => (None, None, None),
        };
        let swap = CompanionSwap {
            remove_stylesheet: self.attached.stylesheet.is_some(),
            remove_script: self.attached.script.is_some(),
            stylesheet: stylesheet.clone(),
            script: script.clone(),
        };
        debug!(generation, "rolling back view companions");
        self.attached = Attached {
            generation: owner,
            stylesheet,
            script,
        };
        Some(swap)
    }

    /// Record `plan` as the mounted view, releasing whatever was mounted before.
    pub fn mount(&mut self, plan: MountPlan) -> Result<MountHandle, LoadError> {
        self.check_current(plan.view(), plan.generation)?;
        self.pending = None;

        if let Some(prev) = self.mounted.take() {
            debug!(view = prev.state.view_name().slug(), "released previous view");
        }

        let handle = MountHandle(plan.generation);
        info!(view = plan.view().slug(), generation = plan.generation, "view mounted");
        let MountPlan {
            state,
            markup,
            companions,
            ..
        } = plan;
        self.attached = Attached {
            generation: Some(handle.0),
            stylesheet: companions.stylesheet.clone(),
            script: companions.script.clone(),
        };
        self.mounted = Some(MountedView {
            handle,
            state,
            markup,
            stylesheet: companions.stylesheet,
            script: companions.script,
        });
        Ok(handle)
    }

    /// Release the mounted view if `handle` still refers to it.
    pub fn unmount(&mut self, handle: MountHandle) -> Option<MountedView> {
        if self.mounted.as_ref().is_some_and(|m| m.handle == handle) {
            self.mounted.take()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<&MountedView> {
        self.mounted.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn check_current(&self, view: ViewName, generation: u64) -> Result<(), LoadError> {
        if self.is_current(generation) {
            Ok(())
        } else {
            debug!(view = view.slug(), generation, latest = self.generation, "stale view load");
            Err(LoadError::Stale {
                view,
                generation,
                latest: self.generation,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problems(course: &str) -> ViewState {
        ViewState::Problems {
            course_id: course.to_string(),
        }
    }

    fn load(loader: &mut ViewLoader, state: ViewState) -> MountHandle {
        let ticket = loader.begin(state);
        let plan = loader.complete(ticket, Ok("<h2></h2>".into())).unwrap();
        loader.mount(plan).unwrap()
    }

    #[test]
    fn first_load_has_nothing_to_remove() {
        let mut loader = ViewLoader::new("views");
        let ticket = loader.begin(ViewState::Courses);
        assert_eq!(ticket.markup_url(), "views/course-selection/index.html");
        assert!(loader.is_loading());

        let plan = loader.complete(ticket, Ok("<ul></ul>".into())).unwrap();
        assert!(!plan.companions.remove_stylesheet);
        assert!(!plan.companions.remove_script);
        assert_eq!(
            plan.companions.stylesheet.as_deref(),
            Some("views/course-selection/style.css")
        );
        assert_eq!(plan.companions.script, None);

        loader.mount(plan).unwrap();
        assert!(!loader.is_loading());
        assert_eq!(loader.current().unwrap().state, ViewState::Courses);
    }

    #[test]
    fn second_load_replaces_previous_companions() {
        let mut loader = ViewLoader::new("views");
        load(
            &mut loader,
            ViewState::Problem {
                course_id: "thermo".into(),
                problem_id: "t1".into(),
            },
        );

        let ticket = loader.begin(ViewState::About);
        let plan = loader.complete(ticket, Ok("<p>about</p>".into())).unwrap();
        assert!(plan.companions.remove_stylesheet);
        assert!(plan.companions.remove_script);
        assert_eq!(plan.companions.stylesheet, None);
        assert_eq!(plan.companions.script, None);

        loader.mount(plan).unwrap();
        let current = loader.current().unwrap();
        assert_eq!(current.state, ViewState::About);
        assert_eq!(current.markup, "<p>about</p>");
    }

    #[test]
    fn superseded_load_is_rejected() {
        let mut loader = ViewLoader::new("views");
        let slow = loader.begin(problems("mechanics"));
        let fast = loader.begin(problems("thermo"));

        let fast_plan = loader.complete(fast, Ok("fast".into())).unwrap();
        loader.mount(fast_plan).unwrap();

        let err = loader.complete(slow, Ok("slow".into())).unwrap_err();
        assert!(matches!(err, LoadError::Stale { generation: 1, latest: 2, .. }));
        assert_eq!(loader.current().unwrap().state, problems("thermo"));
    }

    #[test]
    fn load_superseded_while_waiting_for_script_is_not_mounted() {
        let mut loader = ViewLoader::new("views");
        let first = loader.begin(ViewState::Problem {
            course_id: "em".into(),
            problem_id: "e1".into(),
        });
        let plan = loader.complete(first, Ok("solving".into())).unwrap();
        assert!(plan.companions.script.is_some());

        // User clicks home before the script finished loading.
        let _home = loader.begin(ViewState::Courses);
        assert!(matches!(loader.mount(plan), Err(LoadError::Stale { .. })));
        assert!(loader.current().is_none());
    }

    #[test]
    fn failed_fetch_keeps_previous_view() {
        let mut loader = ViewLoader::new("views");
        load(&mut loader, ViewState::Courses);

        let ticket = loader.begin(problems("thermo"));
        let err = loader
            .complete(ticket, Err("404 Not Found".into()))
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::ViewLoadFailed {
                view: ViewName::ProblemList,
                reason: "404 Not Found".into()
            }
        );
        assert!(!loader.is_loading());
        assert_eq!(loader.current().unwrap().state, ViewState::Courses);
    }

    #[test]
    fn failed_script_keeps_previous_view() {
        let mut loader = ViewLoader::new("views");
        load(&mut loader, problems("thermo"));

        let ticket = loader.begin(ViewState::Problem {
            course_id: "thermo".into(),
            problem_id: "t1".into(),
        });
        let plan = loader.complete(ticket, Ok("solving".into())).unwrap();
        let err = loader.fail(&plan, "script error");
        assert!(matches!(err, LoadError::ViewLoadFailed { view: ViewName::ProblemSolving, .. }));
        assert!(matches!(loader.mount(plan), Err(LoadError::Stale { .. })));
        assert_eq!(loader.current().unwrap().state, problems("thermo"));
    }

    #[test]
    fn unmount_only_releases_the_current_handle() {
        let mut loader = ViewLoader::new("views");
        let old = load(&mut loader, ViewState::Courses);
        let new = load(&mut loader, ViewState::About);
        assert_ne!(old, new);

        assert!(loader.unmount(old).is_none());
        assert!(loader.current().is_some());
        let released = loader.unmount(new).unwrap();
        assert_eq!(released.state, ViewState::About);
        assert!(loader.current().is_none());
    }

    fn solving(course: &str, problem: &str) -> ViewState {
        ViewState::Problem {
            course_id: course.into(),
            problem_id: problem.into(),
        }
    }

    #[test]
    fn failed_script_rolls_back_to_previous_companions() {
        let mut loader = ViewLoader::new("views");
        load(&mut loader, problems("thermo"));

        let ticket = loader.begin(solving("thermo", "t1"));
        let plan = loader.complete(ticket, Ok("solving".into())).unwrap();
        assert!(plan.companions.remove_stylesheet);
        assert!(!plan.companions.remove_script);
        loader.companions_attached(&plan);
        loader.fail(&plan, "script error");

        let restore = loader.rollback(plan.generation).unwrap();
        assert!(restore.remove_stylesheet);
        assert!(restore.remove_script);
        assert_eq!(
            restore.stylesheet.as_deref(),
            Some("views/problem-list/style.css")
        );
        assert_eq!(restore.script, None);

        // Only one rollback per failed load.
        assert!(loader.rollback(plan.generation).is_none());
    }

    #[test]
    fn next_load_sees_companions_left_by_a_failed_load() {
        let mut loader = ViewLoader::new("views");
        load(&mut loader, ViewState::About);

        let ticket = loader.begin(solving("em", "e1"));
        let plan = loader.complete(ticket, Ok("solving".into())).unwrap();
        assert!(!plan.companions.remove_stylesheet);
        loader.companions_attached(&plan);
        loader.fail(&plan, "script error");

        let ticket = loader.begin(ViewState::About);
        let about = loader.complete(ticket, Ok("<p>about</p>".into())).unwrap();
        assert!(about.companions.remove_stylesheet);
        assert!(about.companions.remove_script);
    }

    #[test]
    fn rolled_back_companions_drive_the_next_plan() {
        let mut loader = ViewLoader::new("views");
        load(&mut loader, ViewState::About);

        let ticket = loader.begin(solving("em", "e1"));
        let plan = loader.complete(ticket, Ok("solving".into())).unwrap();
        loader.companions_attached(&plan);
        loader.fail(&plan, "script error");
        let restore = loader.rollback(plan.generation).unwrap();
        assert_eq!(restore.stylesheet, None);

        let ticket = loader.begin(ViewState::About);
        let about = loader.complete(ticket, Ok("<p>about</p>".into())).unwrap();
        assert!(!about.companions.remove_stylesheet);
        assert!(!about.companions.remove_script);
    }

    #[test]
    fn superseded_plan_is_no_longer_current() {
        let mut loader = ViewLoader::new("views");
        let ticket = loader.begin(solving("mechanics", "m1"));
        let plan = loader.complete(ticket, Ok("solving".into())).unwrap();
        assert!(loader.is_current(plan.generation));

        loader.begin(ViewState::Courses);
        assert!(!loader.is_current(plan.generation));
    }

    #[test]
    fn stale_load_rolls_back_unless_a_newer_load_attached() {
        let mut loader = ViewLoader::new("views");
        load(&mut loader, ViewState::Courses);

        let ticket = loader.begin(solving("mechanics", "m1"));
        let slow = loader.complete(ticket, Ok("solving".into())).unwrap();
        loader.companions_attached(&slow);

        // Superseded while its script loads; nothing newer attached yet.
        let newer = loader.begin(problems("em"));
        assert!(matches!(loader.mount(slow.clone()), Err(LoadError::Stale { .. })));
        let restore = loader.rollback(slow.generation).unwrap();
        assert_eq!(
            restore.stylesheet.as_deref(),
            Some("views/course-selection/style.css")
        );

        let plan = loader.complete(newer, Ok("<ul></ul>".into())).unwrap();
        loader.companions_attached(&plan);
        assert!(loader.rollback(slow.generation).is_none());
        loader.mount(plan).unwrap();
        assert_eq!(loader.current().unwrap().state, problems("em"));
    }
}
