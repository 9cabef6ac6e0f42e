//! Per-frame glue between host input and the scene.
//!
//! The director is the only owner of mutable scene state. Scroll and
//! resize handlers write the latest [`ScrollState`] through
//! [`NarrativeDirector::on_scroll`]; the frame loop calls
//! [`NarrativeDirector::tick`] and renders whatever [`FrameOutput`] it gets
//! back. Both run on the same thread, so the last write before a tick wins.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::camera::{CameraMode, CameraPose, CameraTween, PoseSynthesizer, ShipPose};
use crate::constants::{ENDING_PROGRESS_THRESHOLD, NAVIGATION_TWEEN_MS};
use crate::curve::PathCurve;
use crate::easing::smoothstep;
use crate::intro::{credits_state, intro_camera_pose, intro_timeline, CreditsState, IntroCue, IntroRamp};
use crate::resolver::{hide_ui, resolve_nearest, PlanetResolver, SectionBounds};
use crate::sections::{CurveProgress, NarrativeSection, ScrollState, SectionCurveTable};
use crate::signals::{EventChannel, LifecycleEvent, TitleReveal};
use crate::state::{LoaderSimulation, LoaderStatus, Phase, PhaseEvent, PhaseMachine};
use crate::story::{Story, Typewriter};
use crate::timeline::TimelinePlayer;

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub phase: Phase,
    pub scroll_progress: f32,
    pub curve_progress: f32,
    pub camera_progress: f32,
    pub current_planet_index: usize,
    pub current_section_index: usize,
    pub hide_ui: bool,
    pub pose: CameraPose,
    pub ship: ShipPose,
    pub credits: CreditsState,
    pub loader: LoaderStatus,
    pub title_revealed: bool,
}

pub struct NarrativeDirector {
    story: Story,
    table: SectionCurveTable,
    synth: PoseSynthesizer,
    mode: CameraMode,
    phases: PhaseMachine,
    rng: StdRng,
    loader: LoaderSimulation,
    loader_status: LoaderStatus,
    intro: TimelinePlayer<IntroCue>,
    credits: CreditsState,
    ramp: Option<IntroRamp>,
    handover_from: CameraPose,
    tween: Option<CameraTween>,
    scroll: ScrollState,
    planet_sections: Vec<usize>,
    planet_resolver: PlanetResolver,
    current_section: usize,
    hide_ui: bool,
    typewriter: Option<(usize, Typewriter)>,
    events: EventChannel<LifecycleEvent>,
    title: Rc<RefCell<TitleReveal>>,
    last: CurveProgress,
    last_pose: CameraPose,
    torn_down: bool,
}

impl NarrativeDirector {
    pub fn new(story: Story, curve: PathCurve, mode: CameraMode, seed: u64) -> Self {
        let table = SectionCurveTable::build(story.sections());
        let synth = PoseSynthesizer::for_table(curve, &table);
        let planet_sections = story.planet_section_indices();
        let planet_resolver = PlanetResolver::new(planet_sections.len());

        let title = Rc::new(RefCell::new(TitleReveal::default()));
        let mut events = EventChannel::new();
        {
            let title = title.clone();
            events.subscribe(move |ev: &LifecycleEvent| {
                if title.borrow_mut().on_event(ev) {
                    log::info!("[intro] title revealed on {:?}", ev);
                }
            });
        }

        let loader = LoaderSimulation::new();
        let loader_status = loader.status();
        Self {
            story,
            table,
            synth,
            mode,
            phases: PhaseMachine::new(),
            rng: StdRng::seed_from_u64(seed),
            loader,
            loader_status,
            intro: TimelinePlayer::new(intro_timeline()),
            credits: credits_state(Duration::ZERO),
            ramp: None,
            handover_from: intro_camera_pose(Duration::ZERO),
            tween: None,
            scroll: ScrollState::default(),
            planet_sections,
            planet_resolver,
            current_section: 0,
            hide_ui: false,
            typewriter: None,
            events,
            title,
            last: CurveProgress::default(),
            last_pose: intro_camera_pose(Duration::ZERO),
            torn_down: false,
        }
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn table(&self) -> &SectionCurveTable {
        &self.table
    }

    pub fn synthesizer(&self) -> &PoseSynthesizer {
        &self.synth
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase()
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            log::info!("[camera] mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            if self.phases.accepts_scroll() {
                let to = self.live_pose();
                self.start_tween(to);
            }
        }
    }

    pub fn events_mut(&mut self) -> &mut EventChannel<LifecycleEvent> {
        &mut self.events
    }

    pub fn title_revealed(&self) -> bool {
        self.title.borrow().is_revealed()
    }

    pub fn current_planet_index(&self) -> usize {
        self.planet_resolver.current()
    }

    pub fn current_section_index(&self) -> usize {
        self.current_section
    }

    /// Text revealed so far for the text section nearest the viewport.
    pub fn typed_text(&self) -> Option<(usize, &str)> {
        self.typewriter.as_ref().map(|(i, tw)| (*i, tw.visible()))
    }

    /// `section_bounds` is indexed by section; unmeasured sections are `None`.
    pub fn on_scroll(
        &mut self,
        scroll: ScrollState,
        viewport_height: f64,
        section_bounds: &[Option<SectionBounds>],
    ) {
        if self.torn_down {
            return;
        }
        self.scroll = scroll;
        self.hide_ui = hide_ui(scroll.raw_offset_px);

        let planet_bounds: Vec<Option<SectionBounds>> = self
            .planet_sections
            .iter()
            .map(|i| section_bounds.get(*i).copied().flatten())
            .collect();
        self.planet_resolver
            .resolve(scroll.raw_offset_px, viewport_height, &planet_bounds);

        if let Ok(i) = resolve_nearest(scroll.raw_offset_px, viewport_height, section_bounds) {
            if i < self.story.len() {
                self.current_section = i;
            }
        }
        self.sync_typewriter();
    }

    /// Starts an eased camera move to `section_index` and returns the
    /// scroll progress the host should jump to. `None` while scrolling is
    /// locked or the index is out of range.
    pub fn navigate_to(&mut self, section_index: usize) -> Option<f32> {
        if self.torn_down || !self.phases.accepts_scroll() || section_index >= self.story.len() {
            return None;
        }
        let target = self.table.scroll_progress_for(section_index);
        let eval = self.table.evaluate(target);
        let to = self.synth.synthesize(eval.camera_progress, self.mode);
        self.start_tween(to);
        if let Some(planet) = self.story.section(section_index).and_then(NarrativeSection::planet_index) {
            self.planet_resolver.set_current(planet);
        }
        log::info!("[scroll] navigate to section {} (progress {:.3})", section_index, target);
        Some(target)
    }

    pub fn tick(&mut self, dt: Duration) -> FrameOutput {
        if self.torn_down {
            return self.output(self.last_pose);
        }
        let pose = match self.phases.phase() {
            Phase::Loading => self.tick_loading(dt),
            Phase::IntroPlaying => self.tick_intro(dt),
            Phase::IntroComplete => self.tick_handover(dt),
            Phase::ScrollNavigable | Phase::EndingShown => self.tick_scroll(dt),
        };
        // Text only types once the reader controls the scroll.
        if self.phases.accepts_scroll() {
            if let Some((_, tw)) = self.typewriter.as_mut() {
                tw.advance(dt);
            }
        }
        self.last_pose = pose;
        self.output(pose)
    }

    /// Cancels pending intro steps and drops every subscriber; later calls
    /// become no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.intro.cancel();
        self.events.clear();
        self.tween = None;
        self.ramp = None;
        self.torn_down = true;
        log::info!("[director] torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn tick_loading(&mut self, dt: Duration) -> CameraPose {
        self.loader_status = self.loader.advance(dt, &mut self.rng);
        if self.loader_status.finished {
            self.transition(PhaseEvent::LoadFinished);
        }
        intro_camera_pose(Duration::ZERO)
    }

    fn tick_intro(&mut self, dt: Duration) -> CameraPose {
        let due = self.intro.advance(dt);
        let elapsed = self.intro.elapsed();
        self.credits = credits_state(elapsed);
        let pose = intro_camera_pose(elapsed);

        for cue in due {
            match cue {
                IntroCue::Halfway => {
                    self.events.publish(&LifecycleEvent::IntroHalfway);
                }
                IntroCue::Complete => {
                    self.events.publish(&LifecycleEvent::IntroComplete);
                    self.transition(PhaseEvent::IntroFinished);
                    let target = self.table.planet_t().first().copied().unwrap_or(0.0);
                    self.ramp = Some(IntroRamp::new(target));
                    self.handover_from = pose;
                    self.credits = CreditsState {
                        scale: 1.0,
                        ..CreditsState::default()
                    };
                }
                other => log::debug!("[intro] {:?} at {:?}", other, elapsed),
            }
        }
        self.title.borrow_mut().advance(dt);
        pose
    }

    fn tick_handover(&mut self, dt: Duration) -> CameraPose {
        self.title.borrow_mut().advance(dt);
        let Some(ramp) = self.ramp.as_mut() else {
            self.transition(PhaseEvent::HandoverFinished);
            return self.live_pose();
        };
        let progress = ramp.advance(dt);
        let blend = smoothstep(ramp.fraction());
        let finished = ramp.is_finished();

        self.last = CurveProgress {
            curve_progress: progress,
            camera_progress: progress,
            ..CurveProgress::default()
        };
        let target = self.synth.synthesize(progress, self.mode);
        let pose = self.handover_from.lerp(&target, blend);
        if finished {
            self.ramp = None;
            self.transition(PhaseEvent::HandoverFinished);
        }
        pose
    }

    fn tick_scroll(&mut self, dt: Duration) -> CameraPose {
        let live = self.live_pose();
        let pose = match self.tween.as_mut() {
            Some(tween) => {
                tween.retarget(live);
                let pose = tween.advance(dt);
                if tween.is_finished() {
                    self.tween = None;
                }
                pose
            }
            None => live,
        };

        let progress = self.scroll.progress();
        match self.phases.phase() {
            Phase::ScrollNavigable if progress >= ENDING_PROGRESS_THRESHOLD => {
                self.transition(PhaseEvent::ReachedEnd);
            }
            Phase::EndingShown if progress < ENDING_PROGRESS_THRESHOLD => {
                self.transition(PhaseEvent::LeftEnd);
            }
            _ => {}
        }
        pose
    }

    fn live_pose(&mut self) -> CameraPose {
        self.last = self.table.evaluate(self.scroll.progress());
        self.synth.synthesize(self.last.camera_progress, self.mode)
    }

    fn start_tween(&mut self, to: CameraPose) {
        self.tween = Some(CameraTween::new(
            self.last_pose,
            to,
            Duration::from_millis(NAVIGATION_TWEEN_MS),
        ));
    }

    fn transition(&mut self, event: PhaseEvent) {
        if let Err(e) = self.phases.apply(event) {
            log::warn!("[phase] {e}");
        }
    }

    fn sync_typewriter(&mut self) {
        let section = self.current_section;
        if let Some((i, _)) = &self.typewriter {
            if *i == section {
                return;
            }
        }
        self.typewriter = match self.story.section(section) {
            Some(NarrativeSection::Text { body, .. }) => Some((section, Typewriter::new(body.clone()))),
            _ => None,
        };
    }

    fn output(&self, pose: CameraPose) -> FrameOutput {
        let in_scroll = self.phases.accepts_scroll() || self.phases.phase() == Phase::IntroComplete;
        let (scroll_progress, curve_progress, camera_progress) = if in_scroll {
            (
                self.scroll.progress(),
                self.last.curve_progress,
                self.last.camera_progress,
            )
        } else {
            (0.0, 0.0, 0.0)
        };
        FrameOutput {
            phase: self.phases.phase(),
            scroll_progress,
            curve_progress,
            camera_progress,
            current_planet_index: self.planet_resolver.current(),
            current_section_index: self.current_section,
            hide_ui: self.hide_ui,
            pose,
            ship: self.synth.ship(camera_progress),
            credits: self.credits,
            loader: self.loader_status,
            title_revealed: self.title.borrow().is_revealed(),
        }
    }
}
