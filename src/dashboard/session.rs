use std::collections::BTreeMap;

use crate::client::endpoints;
use crate::client::{DebugAction, DebugServer, ObjectKind};
use crate::compositor::MagFilter;
use crate::config::InspectConfig;
use crate::dashboard::events::{Handled, UiEvent};
use crate::dashboard::panel::{ObjectDetail, Panel, PanelContent};
use crate::foundation::error::{InspectError, InspectResult};
use crate::inspect::PropertyView;
use crate::view::{Debouncer, ImageView};

/// Name of the framebuffer view on the debug panel.
pub const COLOR0_VIEW: &str = "color0";
/// Name of the image view created for a selected texture.
pub const TEXTURE_VIEW: &str = "texView";

/// Dashboard model: panels, image views and the log tail, driven by [`UiEvent`]s.
///
/// Server failures never abort event handling; they are logged and the affected view keeps
/// showing its previous contents.
pub struct Dashboard<S: DebugServer> {
    server: S,
    cfg: InspectConfig,
    active: Panel,
    panels: BTreeMap<Panel, PanelContent>,
    views: BTreeMap<String, ImageView>,
    log: Vec<String>,
    resize: Debouncer,
}

impl<S: DebugServer> Dashboard<S> {
    /// Create a dashboard; nothing is requested until [`Dashboard::start`].
    pub fn new(server: S, cfg: InspectConfig) -> InspectResult<Self> {
        cfg.validate()?;
        let resize = Debouncer::new(cfg.view.resize_debounce());
        Ok(Self {
            server,
            cfg,
            active: Panel::Debug,
            panels: Panel::ALL
                .into_iter()
                .map(|p| (p, PanelContent::Empty))
                .collect(),
            views: BTreeMap::new(),
            log: Vec::new(),
            resize,
        })
    }

    /// Begin a debug session and build the debug panel.
    ///
    /// Fails only when the session cannot be started; a missing framebuffer snapshot or log
    /// leaves the debug panel empty.
    pub fn start(&mut self) -> InspectResult<()> {
        self.server.begin()?;
        tracing::info!("debug session started");

        let view = ImageView::new(
            COLOR0_VIEW,
            endpoints::framebuffer_color_path(0, 0),
            &self.cfg.view,
            self.cfg.compositor,
        )?;
        self.views.insert(COLOR0_VIEW.to_string(), view);
        self.panels.insert(Panel::Debug, PanelContent::Debug);
        self.active = Panel::Debug;

        self.reload_framebuffer()?;
        self.refresh_log();
        Ok(())
    }

    /// Dispatch one UI event.
    ///
    /// Errors are reserved for local failures (e.g. the checker program cannot be built).
    pub fn handle(&mut self, event: UiEvent) -> InspectResult<Handled> {
        match event {
            UiEvent::DebugButton(action) => self.on_debug_button(action),
            UiEvent::OpacityChanged { view, value } => match self.views.get_mut(&view) {
                Some(v) => Ok(rendered(v.on_opacity_changed(value)?.is_some())),
                None => Ok(unknown_view(&view)),
            },
            UiEvent::ContainerResized { view, size } => match self.views.get_mut(&view) {
                Some(v) => Ok(rendered(v.on_container_resized(size)?.is_some())),
                None => Ok(unknown_view(&view)),
            },
            UiEvent::WindowResized(now) => {
                self.resize.trigger(now);
                Ok(Handled::Unchanged)
            }
            UiEvent::Tick(now) => {
                if !self.resize.poll(now) {
                    return Ok(Handled::Unchanged);
                }
                let mut any = false;
                for view in self.views.values_mut() {
                    any |= view.rerender()?.is_some();
                }
                Ok(rendered(any))
            }
            UiEvent::ActivatePanel(panel) => self.activate(panel),
            UiEvent::Select { kind, name } => self.select(kind, &name),
            UiEvent::ToggleProperty { kind, path } => {
                let toggled = match self.panels.get_mut(&Panel::for_kind(kind)) {
                    Some(PanelContent::Objects {
                        selected: Some(detail),
                        ..
                    }) => detail.props.toggle(&path),
                    _ => None,
                };
                Ok(rendered(toggled.is_some()))
            }
            UiEvent::RemoveView(name) => Ok(rendered(self.views.remove(&name).is_some())),
        }
    }

    fn on_debug_button(&mut self, action: DebugAction) -> InspectResult<Handled> {
        if let Err(e) = self.server.step(action) {
            tracing::warn!(error = %e, action = action.id(), "debug step failed; view left stale");
            return Ok(Handled::Stale);
        }
        let mut fresh = self.refresh_log();
        if action.reloads_framebuffer() {
            fresh &= self.reload_framebuffer()?;
        }
        Ok(if fresh {
            Handled::Updated
        } else {
            Handled::Stale
        })
    }

    /// Fetch the log tail. Returns `false` and keeps the previous log on failure.
    pub fn refresh_log(&mut self) -> bool {
        match self.server.log_tail(self.cfg.server.log_lines) {
            Ok(entries) => {
                self.log = entries;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "log fetch failed; log left stale");
                false
            }
        }
    }

    fn reload_framebuffer(&mut self) -> InspectResult<bool> {
        // A removed framebuffer view has nothing to reload.
        let Some(view) = self.views.get_mut(COLOR0_VIEW) else {
            return Ok(true);
        };
        match self.server.framebuffer_color(0, 0) {
            Ok(image) => {
                view.on_image_loaded(image)?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, view = COLOR0_VIEW, "framebuffer fetch failed; view left stale");
                Ok(false)
            }
        }
    }

    fn activate(&mut self, panel: Panel) -> InspectResult<Handled> {
        self.active = panel;
        if self.panel(panel).is_loaded() {
            return Ok(Handled::Unchanged);
        }
        let content = match panel.object_kind() {
            Some(kind) => match self.server.list(kind) {
                Ok(names) => PanelContent::Objects {
                    kind,
                    names,
                    selected: None,
                },
                Err(e) => {
                    tracing::warn!(error = %e, panel = panel.id(), "object list fetch failed");
                    return Ok(Handled::Stale);
                }
            },
            None if panel == Panel::Debug => PanelContent::Debug,
            None => PanelContent::Generic(panel.id().to_string()),
        };
        self.panels.insert(panel, content);
        Ok(Handled::Updated)
    }

    fn select(&mut self, kind: ObjectKind, name: &str) -> InspectResult<Handled> {
        let name = name.trim();
        let meta = match self.server.detail(kind, name) {
            Ok(meta) => meta,
            Err(InspectError::Validation(msg)) => {
                tracing::warn!(%msg, "rejected object name");
                return Ok(Handled::Unchanged);
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = kind.segment(), name, "detail fetch failed");
                return Ok(Handled::Stale);
            }
        };

        let detail = ObjectDetail {
            name: name.to_string(),
            props: PropertyView::from_json(&meta),
        };
        let panel = Panel::for_kind(kind);
        match self.panels.entry(panel).or_default() {
            PanelContent::Objects { selected, .. } => *selected = Some(detail),
            slot => {
                *slot = PanelContent::Objects {
                    kind,
                    names: Vec::new(),
                    selected: Some(detail),
                }
            }
        }

        if kind != ObjectKind::Texture {
            return Ok(Handled::Updated);
        }

        let filter = MagFilter::from_texture_metadata(&meta);
        let mut view = ImageView::new(
            TEXTURE_VIEW,
            endpoints::texture_image_path(name)?,
            &self.cfg.view,
            self.cfg.compositor,
        )?;
        let fresh = match self.server.texture_image(name) {
            Ok(image) => {
                view.on_image_loaded(image.with_filter(filter))?;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, name, "texture image fetch failed");
                false
            }
        };
        // Replacing the previous texture view releases its resources.
        self.views.insert(TEXTURE_VIEW.to_string(), view);
        Ok(if fresh {
            Handled::Updated
        } else {
            Handled::Stale
        })
    }

    /// Currently shown panel.
    pub fn active_panel(&self) -> Panel {
        self.active
    }

    /// Content of `panel`.
    pub fn panel(&self, panel: Panel) -> &PanelContent {
        static EMPTY: PanelContent = PanelContent::Empty;
        self.panels.get(&panel).unwrap_or(&EMPTY)
    }

    /// Image view by name.
    pub fn view(&self, name: &str) -> Option<&ImageView> {
        self.views.get(name)
    }

    /// Names of live image views.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Current log tail, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Whether a window resize is waiting for its quiet period.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Borrow the server.
    pub fn server(&self) -> &S {
        &self.server
    }

    /// Mutably borrow the server.
    pub fn server_mut(&mut self) -> &mut S {
        &mut self.server
    }

    /// Active configuration.
    pub fn config(&self) -> &InspectConfig {
        &self.cfg
    }
}

fn rendered(changed: bool) -> Handled {
    if changed {
        Handled::Updated
    } else {
        Handled::Unchanged
    }
}

fn unknown_view(name: &str) -> Handled {
    tracing::debug!(view = name, "event for unknown view ignored");
    Handled::Unchanged
}

#[cfg(test)]
#[path = "../../tests/unit/dashboard/session.rs"]
mod tests;
