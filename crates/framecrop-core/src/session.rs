//! Interactive crop session: the event-driven state machine.
//!
//! ```text
//! Idle --(image loaded + container sized)--> LayoutReady
//! LayoutReady --(pointer down on selection/handle)--> Dragging
//! Dragging --(pointer move)*--> Dragging
//! Dragging --(pointer up)--> LayoutReady          (commits)
//! Dragging --(pointer cancel / Escape)--> LayoutReady (rolls back)
//! ```
//!
//! Every pointer move writes the live selection so the host can render it
//! immediately. The selection captured at drag start is kept in the
//! [`InteractionState`], so a cancelled drag restores it exactly.
//!
//! The session owns no listeners. Hosts attach window-level pointer listeners
//! when [`CropSession::is_dragging`] turns true and release them after
//! `pointer_up`, `pointer_cancel`, Escape, or [`CropSession::teardown`].

use serde::{Deserialize, Serialize};

use crate::config::{CropConfig, CropShape};
use crate::decode::Raster;
use crate::export::{export_selection, ExportError, ExportedCrop};
use crate::layout::{compute_image_layout, ImageLayout, Point, Size};
use crate::mapper::{to_image_local, to_stage_local, StageRect};
use crate::selection::{circle, rect, Corner, CropRect, HitTarget, Selection};

/// Coarse session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No usable layout yet (image loading, failed, or zero-sized container).
    Idle,
    /// Layout and selection exist, no drag in progress.
    LayoutReady,
    /// A move or resize is in progress.
    Dragging,
}

/// The single live interaction of a session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    None,
    Moving {
        start_pointer: Point,
        start_selection: Selection,
    },
    Resizing {
        corner: Corner,
        start_pointer: Point,
        start_selection: CropRect,
    },
}

impl InteractionState {
    /// Selection as it was when the drag began.
    pub fn start_selection(&self) -> Option<Selection> {
        match *self {
            InteractionState::None => None,
            InteractionState::Moving { start_selection, .. } => Some(start_selection),
            InteractionState::Resizing { start_selection, .. } => {
                Some(Selection::Rect(start_selection))
            }
        }
    }
}

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// What the host should do after a key press or backdrop click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Nothing to do.
    Ignored,
    /// An in-progress drag was rolled back; release drag listeners.
    DragCancelled,
    /// The user asked to abort the whole session; call the cancel callback.
    CancelRequested,
}

/// State of one crop editing session over one image.
#[derive(Debug, Clone)]
pub struct CropSession {
    config: CropConfig,
    container: Option<Size>,
    natural: Option<Size>,
    layout: Option<ImageLayout>,
    /// Last non-empty layout; the rescale origin after a container collapse.
    last_layout: Option<ImageLayout>,
    selection: Option<Selection>,
    interaction: InteractionState,
    saving: bool,
}

impl CropSession {
    pub fn new(config: CropConfig) -> Self {
        Self {
            config: config.validated(),
            container: None,
            natural: None,
            layout: None,
            last_layout: None,
            selection: None,
            interaction: InteractionState::None,
            saving: false,
        }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match (self.layout, self.selection, self.interaction) {
            (None, _, _) | (_, None, _) => Phase::Idle,
            (Some(_), Some(_), InteractionState::None) => Phase::LayoutReady,
            (Some(_), Some(_), _) => Phase::Dragging,
        }
    }

    pub fn layout(&self) -> Option<ImageLayout> {
        self.layout
    }

    /// Current selection, or `None` while idle.
    pub fn selection(&self) -> Option<Selection> {
        self.layout.and(self.selection)
    }

    /// Current selection in container coordinates, for rendering.
    pub fn display_selection(&self) -> Option<Selection> {
        let layout = self.layout?;
        self.selection.map(|selection| match selection {
            Selection::Rect(r) => Selection::Rect(r.to_container(&layout)),
            circle @ Selection::Circle(_) => circle,
        })
    }

    pub fn natural_size(&self) -> Option<Size> {
        self.natural
    }

    pub fn container_size(&self) -> Option<Size> {
        self.container
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.interaction, InteractionState::None)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    // ------------------------------------------------------------------
    // Image and layout lifecycle
    // ------------------------------------------------------------------

    /// The host switched to a different image: forget everything derived
    /// from the old one. The selection is recreated once the new image loads.
    pub fn set_image_source(&mut self) {
        tracing::debug!("image source changed, resetting selection");
        self.natural = None;
        self.layout = None;
        self.last_layout = None;
        self.selection = None;
        self.interaction = InteractionState::None;
    }

    /// The image finished loading with these natural pixel dimensions.
    pub fn image_loaded(&mut self, natural: Size) {
        if !natural.is_positive() {
            tracing::warn!(?natural, "loaded image has no usable size");
            self.image_failed();
            return;
        }
        self.natural = Some(natural);
        self.relayout();
    }

    /// The image could not be decoded; stay idle.
    pub fn image_failed(&mut self) {
        self.natural = None;
        self.layout = None;
        self.selection = None;
        self.interaction = InteractionState::None;
    }

    /// The container was measured (mount or resize observation).
    pub fn set_container_size(&mut self, container: Size) {
        if self.container == Some(container) {
            return;
        }
        self.container = Some(container);
        self.relayout();
    }

    /// Recompute the layout, then initialize or rescale the selection.
    fn relayout(&mut self) {
        let next = match (self.container, self.natural) {
            (Some(container), Some(natural)) => compute_image_layout(container, natural),
            _ => None,
        };

        let Some(next) = next else {
            if self.layout.is_some() {
                tracing::debug!("layout not ready, going idle");
            }
            self.layout = None;
            self.interaction = InteractionState::None;
            return;
        };

        match (self.selection, self.last_layout) {
            (None, _) => self.initialize(&next),
            (Some(selection), Some(previous)) if previous != next => {
                self.rescale(selection, &previous, &next)
            }
            (Some(_), None) => self.initialize(&next),
            (Some(_), Some(_)) => {}
        }

        self.layout = Some(next);
        self.last_layout = Some(next);
    }

    fn initialize(&mut self, layout: &ImageLayout) {
        let selection = match self.config.shape {
            CropShape::Rect { .. } => {
                Selection::Rect(rect::initial_crop_rect(layout, &self.config))
            }
            CropShape::Circle { .. } => {
                Selection::Circle(circle::initial_circle(layout, &self.config))
            }
        };
        tracing::debug!(?layout, ?selection, "initialized selection");
        self.selection = Some(selection);
    }

    fn rescale(&mut self, selection: Selection, previous: &ImageLayout, next: &ImageLayout) {
        // A drag's start snapshot is in the old layout's coordinates
        if self.is_dragging() {
            tracing::debug!("layout changed mid-drag, committing drag");
            self.interaction = InteractionState::None;
        }

        let rescaled = match selection {
            Selection::Rect(r) => {
                Selection::Rect(rect::rescale_crop_rect(&r, previous, next, &self.config))
            }
            Selection::Circle(c) => {
                Selection::Circle(circle::rescale_circle(&c, previous, next, &self.config))
            }
        };
        tracing::debug!(?previous, ?next, ?rescaled, "rescaled selection");
        self.selection = Some(rescaled);
    }

    // ------------------------------------------------------------------
    // Pointer interaction
    // ------------------------------------------------------------------

    /// Pointer position in the space the selection is stored in.
    fn local_pointer(&self, client: Point, stage: &StageRect, layout: &ImageLayout) -> Point {
        match self.selection {
            Some(Selection::Circle(_)) => to_stage_local(client, stage),
            _ => to_image_local(client, stage, layout),
        }
    }

    /// What a press at `client` would grab.
    pub fn hit_test(&self, client: Point, stage: &StageRect) -> Option<HitTarget> {
        let layout = self.layout?;
        let pointer = self.local_pointer(client, stage, &layout);
        match self.selection? {
            Selection::Rect(r) => rect::hit_test(&r, pointer, self.config.handle_hit_radius),
            Selection::Circle(c) => circle::hit_test(&c, pointer),
        }
    }

    /// Press at `client`: starts a move or resize if it lands on the
    /// selection. Returns whether a drag started.
    pub fn pointer_down(&mut self, client: Point, stage: &StageRect) -> bool {
        if self.phase() != Phase::LayoutReady {
            return false;
        }
        match self.hit_test(client, stage) {
            Some(target) => self.begin_drag(target, client, stage),
            None => false,
        }
    }

    /// Start a drag on an explicit target (e.g. the host's handle element
    /// received the press). Resize targets are ignored for circles.
    pub fn begin_drag(&mut self, target: HitTarget, client: Point, stage: &StageRect) -> bool {
        if self.phase() != Phase::LayoutReady {
            return false;
        }
        let (Some(layout), Some(selection)) = (self.layout, self.selection) else {
            return false;
        };
        let start_pointer = self.local_pointer(client, stage, &layout);

        self.interaction = match (target, selection) {
            (HitTarget::Body, _) => InteractionState::Moving {
                start_pointer,
                start_selection: selection,
            },
            (HitTarget::Handle(corner), Selection::Rect(start)) => InteractionState::Resizing {
                corner,
                start_pointer,
                start_selection: start,
            },
            (HitTarget::Handle(_), Selection::Circle(_)) => return false,
        };

        tracing::debug!(?target, "drag started");
        true
    }

    /// Pointer moved during a drag. Returns whether the selection changed.
    pub fn pointer_move(&mut self, client: Point, stage: &StageRect) -> bool {
        let Some(layout) = self.layout else {
            return false;
        };
        let pointer = self.local_pointer(client, stage, &layout);

        let next = match self.interaction {
            InteractionState::None => return false,
            InteractionState::Moving {
                start_pointer,
                start_selection: Selection::Rect(start),
            } => Selection::Rect(rect::move_crop_rect(&start, start_pointer, pointer, &layout)),
            InteractionState::Moving {
                start_pointer,
                start_selection: Selection::Circle(start),
            } => Selection::Circle(circle::move_circle(&start, start_pointer, pointer, &layout)),
            InteractionState::Resizing {
                corner,
                start_selection,
                ..
            } => Selection::Rect(rect::resize_crop_rect(
                &start_selection,
                corner,
                pointer,
                &layout,
                &self.config,
            )),
        };

        let changed = self.selection != Some(next);
        self.selection = Some(next);
        changed
    }

    /// Pointer released: the live selection is committed.
    pub fn pointer_up(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.interaction = InteractionState::None;
        tracing::debug!(selection = ?self.selection, "drag committed");
        true
    }

    /// Pointer cancelled: restore the selection from drag start.
    pub fn pointer_cancel(&mut self) -> bool {
        let Some(start) = self.interaction.start_selection() else {
            return false;
        };
        self.selection = Some(start);
        self.interaction = InteractionState::None;
        tracing::debug!("drag cancelled, selection rolled back");
        true
    }

    /// Escape cancels a drag first; otherwise it asks to end the session.
    pub fn key_down(&mut self, key: Key) -> SessionOutcome {
        match key {
            Key::Escape if self.pointer_cancel() => SessionOutcome::DragCancelled,
            Key::Escape => self.request_cancel(),
            Key::Other => SessionOutcome::Ignored,
        }
    }

    /// Click outside the editor.
    pub fn backdrop_click(&mut self) -> SessionOutcome {
        if self.is_dragging() {
            return SessionOutcome::Ignored;
        }
        self.request_cancel()
    }

    /// Abort the session unless a save is in flight.
    pub fn request_cancel(&self) -> SessionOutcome {
        if self.saving {
            tracing::debug!("cancel ignored while saving");
            SessionOutcome::Ignored
        } else {
            SessionOutcome::CancelRequested
        }
    }

    /// The host component is going away: drop any drag without rollback.
    pub fn teardown(&mut self) {
        self.interaction = InteractionState::None;
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Mark a save as in flight. Refused while idle or already saving.
    pub fn begin_save(&mut self) -> bool {
        if self.saving || self.selection().is_none() {
            return false;
        }
        if self.is_dragging() {
            self.pointer_up();
        }
        self.saving = true;
        true
    }

    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    /// Rasterize the current selection from `image` (the loaded source).
    pub fn export(&self, image: Option<&Raster>) -> Result<Option<ExportedCrop>, ExportError> {
        export_selection(self.selection().as_ref(), self.layout.as_ref(), image, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::CircleSelection;

    const EPS: f64 = 1e-9;

    fn stage() -> StageRect {
        StageRect::new(0.0, 0.0, 800.0, 600.0)
    }

    /// 1000x500 image in an 800x600 container: layout (0, 100, 800, 400).
    fn ready_rect_session() -> CropSession {
        let mut session = CropSession::new(CropConfig::rect(1.0));
        session.set_container_size(Size::new(800.0, 600.0));
        session.image_loaded(Size::new(1000.0, 500.0));
        session
    }

    fn rect_of(session: &CropSession) -> CropRect {
        *session.selection().expect("selection").as_rect().expect("rect")
    }

    #[test]
    fn test_starts_idle() {
        let session = CropSession::new(CropConfig::default());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_container_alone_stays_idle() {
        let mut session = CropSession::new(CropConfig::default());
        session.set_container_size(Size::new(800.0, 600.0));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.layout().is_none());
    }

    #[test]
    fn test_image_load_initializes_selection() {
        let session = ready_rect_session();
        assert_eq!(session.phase(), Phase::LayoutReady);
        assert_eq!(
            session.layout(),
            Some(ImageLayout { x: 0.0, y: 100.0, width: 800.0, height: 400.0 })
        );
        assert_eq!(rect_of(&session), CropRect::new(256.0, 56.0, 288.0, 288.0));

        let display = session.display_selection().unwrap();
        assert_eq!(display.as_rect().unwrap().y, 156.0);
    }

    #[test]
    fn test_zero_container_is_not_ready() {
        let mut session = CropSession::new(CropConfig::default());
        session.set_container_size(Size::new(0.0, 600.0));
        session.image_loaded(Size::new(1000.0, 500.0));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.export(None).unwrap().is_none());
    }

    #[test]
    fn test_failed_image_stays_idle() {
        let mut session = CropSession::new(CropConfig::default());
        session.set_container_size(Size::new(800.0, 600.0));
        session.image_failed();
        assert_eq!(session.phase(), Phase::Idle);

        session.image_loaded(Size::new(0.0, 0.0));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_container_resize_rescales() {
        let mut session = ready_rect_session();
        session.set_container_size(Size::new(400.0, 300.0));

        assert_eq!(
            session.layout(),
            Some(ImageLayout { x: 0.0, y: 50.0, width: 400.0, height: 200.0 })
        );
        assert_eq!(rect_of(&session), CropRect::new(128.0, 28.0, 144.0, 144.0));
    }

    #[test]
    fn test_container_resize_mid_drag_commits_and_rescales() {
        let mut session = ready_rect_session();
        session.pointer_down(Point::new(400.0, 300.0), &stage());
        session.pointer_move(Point::new(450.0, 320.0), &stage());
        assert_eq!(rect_of(&session), CropRect::new(306.0, 76.0, 288.0, 288.0));

        session.set_container_size(Size::new(400.0, 300.0));

        assert!(!session.is_dragging());
        assert_eq!(session.phase(), Phase::LayoutReady);
        assert_eq!(rect_of(&session), CropRect::new(153.0, 38.0, 144.0, 144.0));
        // The drag is gone, so a late release or cancel does nothing
        assert!(!session.pointer_up());
        assert!(!session.pointer_cancel());
        assert_eq!(rect_of(&session), CropRect::new(153.0, 38.0, 144.0, 144.0));
    }

    #[test]
    fn test_circle_container_resize_stays_inside_layout() {
        let mut session = CropSession::new(CropConfig::circle(256));
        session.set_container_size(Size::new(800.0, 600.0));
        session.image_loaded(Size::new(500.0, 500.0));

        // Push the circle against the right edge of layout (100, 0, 600, 600)
        let stage = StageRect::new(0.0, 0.0, 800.0, 600.0);
        session.pointer_down(Point::new(400.0, 300.0), &stage);
        session.pointer_move(Point::new(1000.0, 300.0), &stage);
        session.pointer_up();
        let before = *session.selection().unwrap().as_circle().unwrap();
        assert_eq!(before.center_x, 532.0);

        session.set_container_size(Size::new(400.0, 300.0));
        let layout = session.layout().unwrap();
        assert_eq!(layout, ImageLayout { x: 50.0, y: 0.0, width: 300.0, height: 300.0 });

        let circle = *session.selection().unwrap().as_circle().unwrap();
        assert!((circle.radius - 84.0).abs() < EPS);
        assert!((circle.center_x - 266.0).abs() < EPS);
        assert!((circle.center_y - 150.0).abs() < EPS);
        assert!(circle.center_x - circle.radius >= layout.x - EPS);
        assert!(circle.center_x + circle.radius <= layout.x + layout.width + EPS);
        assert!(circle.center_y - circle.radius >= layout.y - EPS);
        assert!(circle.center_y + circle.radius <= layout.y + layout.height + EPS);
    }

    #[test]
    fn test_collapsed_container_keeps_framing() {
        let mut session = ready_rect_session();
        session.set_container_size(Size::new(0.0, 0.0));
        assert_eq!(session.phase(), Phase::Idle);

        session.set_container_size(Size::new(400.0, 300.0));
        assert_eq!(rect_of(&session), CropRect::new(128.0, 28.0, 144.0, 144.0));
    }

    #[test]
    fn test_new_image_source_resets() {
        let mut session = ready_rect_session();
        session.set_image_source();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.natural_size().is_none());

        session.image_loaded(Size::new(500.0, 500.0));
        // Fresh initialization for the new 600x600 layout (x = 100)
        let rect = rect_of(&session);
        assert!((rect.width - 432.0).abs() < EPS);
        assert_eq!(session.layout().unwrap().x, 100.0);
    }

    #[test]
    fn test_move_drag_and_commit() {
        let mut session = ready_rect_session();
        // Center of the selection in client space
        assert!(session.pointer_down(Point::new(400.0, 300.0), &stage()));
        assert_eq!(session.phase(), Phase::Dragging);

        assert!(session.pointer_move(Point::new(450.0, 320.0), &stage()));
        assert_eq!(rect_of(&session), CropRect::new(306.0, 76.0, 288.0, 288.0));

        assert!(session.pointer_up());
        assert_eq!(session.phase(), Phase::LayoutReady);
        assert_eq!(rect_of(&session), CropRect::new(306.0, 76.0, 288.0, 288.0));
    }

    #[test]
    fn test_move_clamped_at_edge() {
        let mut session = ready_rect_session();
        session.pointer_down(Point::new(400.0, 300.0), &stage());
        session.pointer_move(Point::new(-2000.0, 5000.0), &stage());

        let rect = rect_of(&session);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.bottom(), 400.0);
    }

    #[test]
    fn test_resize_from_handle() {
        let mut session = ready_rect_session();
        // Se handle at image-local (544, 344) -> client (544, 444)
        assert_eq!(
            session.hit_test(Point::new(544.0, 444.0), &stage()),
            Some(HitTarget::Handle(Corner::Se))
        );
        assert!(session.pointer_down(Point::new(544.0, 444.0), &stage()));
        session.pointer_move(Point::new(600.0, 480.0), &stage());

        let rect = rect_of(&session);
        assert_eq!((rect.x, rect.y), (256.0, 56.0));
        assert!((rect.width - 324.0).abs() < EPS);
        assert!((rect.height - 324.0).abs() < EPS);
    }

    #[test]
    fn test_pointer_cancel_rolls_back() {
        let mut session = ready_rect_session();
        let before = rect_of(&session);

        session.pointer_down(Point::new(400.0, 300.0), &stage());
        session.pointer_move(Point::new(480.0, 330.0), &stage());
        assert_ne!(rect_of(&session), before);

        assert!(session.pointer_cancel());
        assert_eq!(rect_of(&session), before);
        assert_eq!(session.phase(), Phase::LayoutReady);
    }

    #[test]
    fn test_escape_during_drag_cancels_drag_only() {
        let mut session = ready_rect_session();
        let before = rect_of(&session);

        session.pointer_down(Point::new(544.0, 444.0), &stage());
        session.pointer_move(Point::new(700.0, 500.0), &stage());

        assert_eq!(session.key_down(Key::Escape), SessionOutcome::DragCancelled);
        assert_eq!(rect_of(&session), before);

        // A second Escape aborts the session
        assert_eq!(session.key_down(Key::Escape), SessionOutcome::CancelRequested);
        assert_eq!(session.key_down(Key::Other), SessionOutcome::Ignored);
    }

    #[test]
    fn test_press_outside_selection_does_nothing() {
        let mut session = ready_rect_session();
        assert!(!session.pointer_down(Point::new(10.0, 110.0), &stage()));
        assert_eq!(session.phase(), Phase::LayoutReady);
        assert!(!session.pointer_move(Point::new(50.0, 150.0), &stage()));
        assert!(!session.pointer_up());
    }

    #[test]
    fn test_saving_blocks_cancel() {
        let mut session = ready_rect_session();
        assert!(session.begin_save());
        assert!(!session.begin_save());
        assert_eq!(session.backdrop_click(), SessionOutcome::Ignored);
        assert_eq!(session.key_down(Key::Escape), SessionOutcome::Ignored);

        session.finish_save();
        assert_eq!(session.backdrop_click(), SessionOutcome::CancelRequested);
    }

    #[test]
    fn test_begin_save_requires_selection() {
        let mut session = CropSession::new(CropConfig::default());
        assert!(!session.begin_save());
        assert!(!session.is_saving());
    }

    #[test]
    fn test_teardown_releases_drag() {
        let mut session = ready_rect_session();
        session.pointer_down(Point::new(400.0, 300.0), &stage());
        session.pointer_move(Point::new(420.0, 300.0), &stage());
        session.teardown();

        assert!(!session.is_dragging());
        assert_eq!(rect_of(&session).x, 276.0);
    }

    #[test]
    fn test_circle_session_uses_stage_coordinates() {
        let mut session = CropSession::new(CropConfig::circle(256));
        session.set_container_size(Size::new(800.0, 600.0));
        session.image_loaded(Size::new(500.0, 500.0));

        // Layout (100, 0, 600, 600); circle centered at (400, 300), r = 168
        let circle = *session.selection().unwrap().as_circle().unwrap();
        assert_eq!(circle.center(), Point::new(400.0, 300.0));
        assert!((circle.radius - 168.0).abs() < EPS);

        // Stage offset in the client: (20, 30)
        let stage = StageRect::new(20.0, 30.0, 800.0, 600.0);
        assert!(session.pointer_down(Point::new(420.0, 330.0), &stage));
        session.pointer_move(Point::new(470.0, 330.0), &stage);
        session.pointer_up();

        let moved = *session.selection().unwrap().as_circle().unwrap();
        assert_eq!(moved, CircleSelection::new(450.0, 300.0, circle.radius));
    }

    #[test]
    fn test_circle_ignores_resize_handles() {
        let mut session = CropSession::new(CropConfig::circle(128));
        session.set_container_size(Size::new(400.0, 400.0));
        session.image_loaded(Size::new(400.0, 400.0));

        let started = session.begin_drag(
            HitTarget::Handle(Corner::Se),
            Point::new(200.0, 200.0),
            &StageRect::new(0.0, 0.0, 400.0, 400.0),
        );
        assert!(!started);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_export_from_session() {
        let mut session = CropSession::new(CropConfig::rect(1.0));
        session.set_container_size(Size::new(100.0, 100.0));
        session.image_loaded(Size::new(200.0, 200.0));

        let image = Raster::new(200, 200, vec![50u8; 200 * 200 * 3]);
        let crop = session.export(Some(&image)).unwrap().expect("crop");

        // 72 display px at 2x = 144 natural px
        assert_eq!((crop.raster.width, crop.raster.height), (144, 144));
        assert!(session.export(None).unwrap().is_none());
    }
}
