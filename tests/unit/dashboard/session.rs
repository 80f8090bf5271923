use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde_json::json;

use super::*;
use crate::compositor::SourceImage;
use crate::foundation::core::Size;

#[derive(Default)]
struct FakeServer {
    calls: Vec<String>,
    fail_step: bool,
    fail_list: bool,
    fail_framebuffer: bool,
    frames: VecDeque<SourceImage>,
}

impl FakeServer {
    fn with_frames(frames: impl IntoIterator<Item = SourceImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            ..Self::default()
        }
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl DebugServer for FakeServer {
    fn begin(&mut self) -> InspectResult<()> {
        self.calls.push("begin".into());
        Ok(())
    }

    fn step(&mut self, action: DebugAction) -> InspectResult<()> {
        self.calls.push(format!("step {}", action.id()));
        if self.fail_step {
            return Err(InspectError::network("connection refused"));
        }
        Ok(())
    }

    fn log_tail(&mut self, lines: u32) -> InspectResult<Vec<String>> {
        self.calls.push(format!("log {lines}"));
        Ok(vec![format!("entry after {} calls", self.calls.len())])
    }

    fn framebuffer_color(&mut self, fbo: u32, attachment: u32) -> InspectResult<SourceImage> {
        self.calls.push(format!("fbo {fbo} {attachment}"));
        if self.fail_framebuffer {
            return Err(InspectError::network("status 500"));
        }
        match self.frames.pop_front() {
            Some(f) => Ok(f),
            None => SourceImage::solid(4, 4, [255, 0, 0, 255]),
        }
    }

    fn list(&mut self, kind: ObjectKind) -> InspectResult<Vec<String>> {
        self.calls.push(format!("list {}", kind.segment()));
        if self.fail_list {
            return Err(InspectError::network("timeout"));
        }
        Ok(vec!["1".into(), "2".into()])
    }

    fn detail(&mut self, kind: ObjectKind, name: &str) -> InspectResult<serde_json::Value> {
        self.calls.push(format!("detail {} {name}", kind.segment()));
        if name.is_empty() {
            return Err(InspectError::validation("empty name"));
        }
        Ok(json!({
            "name": name,
            "GL_TEXTURE_MAG_FILTER": "GL_NEAREST",
            "levels": { "0": { "width": 2, "height": 2 } }
        }))
    }

    fn texture_image(&mut self, name: &str) -> InspectResult<SourceImage> {
        self.calls.push(format!("texture {name}"));
        SourceImage::solid(2, 2, [0, 255, 0, 255])
    }
}

fn started(server: FakeServer) -> Dashboard<FakeServer> {
    let mut d = Dashboard::new(server, InspectConfig::default()).unwrap();
    d.start().unwrap();
    d
}

#[test]
fn start_builds_debug_panel() {
    let d = started(FakeServer::default());
    assert_eq!(d.active_panel(), Panel::Debug);
    assert!(matches!(d.panel(Panel::Debug), PanelContent::Debug));
    assert_eq!(d.server().calls[0], "begin");
    assert_eq!(d.server().count("fbo 0 0"), 1);
    assert_eq!(d.server().count("log 100"), 1);
    assert_eq!(d.log().len(), 1);

    let color = d.view(COLOR0_VIEW).unwrap();
    assert_eq!(color.url(), "/fbo/0/color0");
    assert!(color.last_output().is_some());
}

#[test]
fn start_survives_missing_framebuffer() {
    let d = started(FakeServer {
        fail_framebuffer: true,
        ..FakeServer::default()
    });
    let color = d.view(COLOR0_VIEW).unwrap();
    assert!(color.last_output().is_none());
    assert_eq!(d.log().len(), 1);
}

#[test]
fn step_reloads_log_and_framebuffer() {
    let mut d = started(FakeServer::default());
    let h = d.handle(UiEvent::DebugButton(DebugAction::NextDraw)).unwrap();
    assert_eq!(h, Handled::Updated);
    assert_eq!(d.server().count("step nextDraw"), 1);
    assert_eq!(d.server().count("fbo"), 2);
    assert_eq!(d.server().count("log"), 2);
}

#[test]
fn play_does_not_reload_framebuffer() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::DebugButton(DebugAction::Play)).unwrap();
    assert_eq!(d.server().count("fbo"), 1);
    assert_eq!(d.server().count("log"), 2);
}

#[test]
fn failed_step_leaves_views_stale() {
    let mut d = started(FakeServer::default());
    let before = d.view(COLOR0_VIEW).unwrap().render_count();
    d.server_mut().fail_step = true;
    let h = d.handle(UiEvent::DebugButton(DebugAction::NextDraw)).unwrap();
    assert_eq!(h, Handled::Stale);
    assert_eq!(d.view(COLOR0_VIEW).unwrap().render_count(), before);
    assert_eq!(d.server().count("log"), 1);
}

#[test]
fn frame_with_new_dims_refits_container() {
    let frames = [
        SourceImage::solid(100, 50, [1, 2, 3, 255]).unwrap(),
        SourceImage::solid(50, 100, [1, 2, 3, 255]).unwrap(),
    ];
    let mut d = started(FakeServer::with_frames(frames));
    assert_eq!(d.view(COLOR0_VIEW).unwrap().container(), Size::new(128, 64));
    d.handle(UiEvent::DebugButton(DebugAction::NextDraw)).unwrap();
    assert_eq!(d.view(COLOR0_VIEW).unwrap().container(), Size::new(64, 128));
}

#[test]
fn opacity_event_routes_to_named_view() {
    let mut d = started(FakeServer::default());
    let h = d
        .handle(UiEvent::OpacityChanged {
            view: COLOR0_VIEW.into(),
            value: 100,
        })
        .unwrap();
    assert_eq!(h, Handled::Updated);
    assert_eq!(d.view(COLOR0_VIEW).unwrap().slider(), 100);

    let h = d
        .handle(UiEvent::OpacityChanged {
            view: "nope".into(),
            value: 10,
        })
        .unwrap();
    assert_eq!(h, Handled::Unchanged);
}

#[test]
fn container_resize_renders_at_new_size() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::ContainerResized {
        view: COLOR0_VIEW.into(),
        size: Size::new(300, 200),
    })
    .unwrap();
    let out = d.view(COLOR0_VIEW).unwrap().last_output().unwrap();
    assert_eq!((out.width, out.height), (300, 200));
}

#[test]
fn window_resize_rerenders_once_after_quiet_period() {
    let mut d = started(FakeServer::default());
    let renders = d.view(COLOR0_VIEW).unwrap().render_count();
    let t0 = Instant::now();

    for i in 0..5 {
        let at = t0 + Duration::from_millis(i * 100);
        assert_eq!(d.handle(UiEvent::WindowResized(at)).unwrap(), Handled::Unchanged);
        assert_eq!(d.handle(UiEvent::Tick(at)).unwrap(), Handled::Unchanged);
    }
    assert!(d.resize_pending());
    assert_eq!(d.view(COLOR0_VIEW).unwrap().render_count(), renders);

    let settled = t0 + Duration::from_millis(400 + 500);
    assert_eq!(d.handle(UiEvent::Tick(settled)).unwrap(), Handled::Updated);
    assert_eq!(d.view(COLOR0_VIEW).unwrap().render_count(), renders + 1);
    assert!(!d.resize_pending());

    let later = settled + Duration::from_secs(1);
    assert_eq!(d.handle(UiEvent::Tick(later)).unwrap(), Handled::Unchanged);
}

#[test]
fn list_panel_loads_once() {
    let mut d = started(FakeServer::default());
    let h = d.handle(UiEvent::ActivatePanel(Panel::Programs)).unwrap();
    assert_eq!(h, Handled::Updated);
    assert_eq!(d.panel(Panel::Programs).names(), ["1", "2"]);
    assert_eq!(d.active_panel(), Panel::Programs);

    d.handle(UiEvent::ActivatePanel(Panel::Debug)).unwrap();
    let h = d.handle(UiEvent::ActivatePanel(Panel::Programs)).unwrap();
    assert_eq!(h, Handled::Unchanged);
    assert_eq!(d.server().count("list program"), 1);
}

#[test]
fn failed_list_load_is_retried() {
    let mut d = started(FakeServer {
        fail_list: true,
        ..FakeServer::default()
    });
    let h = d.handle(UiEvent::ActivatePanel(Panel::Shaders)).unwrap();
    assert_eq!(h, Handled::Stale);
    assert!(!d.panel(Panel::Shaders).is_loaded());

    d.server_mut().fail_list = false;
    let h = d.handle(UiEvent::ActivatePanel(Panel::Shaders)).unwrap();
    assert_eq!(h, Handled::Updated);
    assert_eq!(d.server().count("list shader"), 2);
}

#[test]
fn buffers_panel_is_generic() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::ActivatePanel(Panel::Buffers)).unwrap();
    assert!(matches!(d.panel(Panel::Buffers), PanelContent::Generic(id) if id == "buffers"));
    assert_eq!(d.server().count("list"), 0);
}

#[test]
fn selecting_program_dumps_properties() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::ActivatePanel(Panel::Programs)).unwrap();
    let h = d
        .handle(UiEvent::Select {
            kind: ObjectKind::Program,
            name: "1".into(),
        })
        .unwrap();
    assert_eq!(h, Handled::Updated);

    let detail = d.panel(Panel::Programs).selected().unwrap();
    assert_eq!(detail.name, "1");
    assert!(detail.props.render_text().contains("name : 1"));
    assert!(d.view(TEXTURE_VIEW).is_none());
}

#[test]
fn selecting_texture_creates_view_with_nearest_filter() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::ActivatePanel(Panel::Textures)).unwrap();
    d.handle(UiEvent::Select {
        kind: ObjectKind::Texture,
        name: "2".into(),
    })
    .unwrap();

    let view = d.view(TEXTURE_VIEW).unwrap();
    assert_eq!(view.url(), "/texture/2/image");
    assert_eq!(view.source().unwrap().filter(), MagFilter::Nearest);
    assert_eq!(view.container(), Size::new(128, 128));
    assert!(view.last_output().is_some());
    assert_eq!(d.server().count("texture 2"), 1);
}

#[test]
fn invalid_name_is_ignored() {
    let mut d = started(FakeServer::default());
    let h = d
        .handle(UiEvent::Select {
            kind: ObjectKind::Shader,
            name: String::new(),
        })
        .unwrap();
    assert_eq!(h, Handled::Unchanged);
    assert!(d.panel(Panel::Shaders).selected().is_none());
}

#[test]
fn toggle_collapses_selected_mapping() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::Select {
        kind: ObjectKind::Texture,
        name: "3".into(),
    })
    .unwrap();
    let path = vec!["levels".to_string()];
    let h = d
        .handle(UiEvent::ToggleProperty {
            kind: ObjectKind::Texture,
            path: path.clone(),
        })
        .unwrap();
    assert_eq!(h, Handled::Updated);
    let props = &d.panel(Panel::Textures).selected().unwrap().props;
    assert!(props.is_collapsed(&path));

    let h = d
        .handle(UiEvent::ToggleProperty {
            kind: ObjectKind::Program,
            path,
        })
        .unwrap();
    assert_eq!(h, Handled::Unchanged);
}

#[test]
fn remove_view_drops_it() {
    let mut d = started(FakeServer::default());
    let h = d.handle(UiEvent::RemoveView(COLOR0_VIEW.into())).unwrap();
    assert_eq!(h, Handled::Updated);
    assert!(d.view(COLOR0_VIEW).is_none());
    assert_eq!(d.view_names().count(), 0);
    let h = d.handle(UiEvent::RemoveView(COLOR0_VIEW.into())).unwrap();
    assert_eq!(h, Handled::Unchanged);
}

#[test]
fn selected_name_is_trimmed() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::Select {
        kind: ObjectKind::Texture,
        name: "  5 ".into(),
    })
    .unwrap();
    assert_eq!(d.panel(Panel::Textures).selected().unwrap().name, "5");
    assert_eq!(d.server().count("detail texture 5"), 1);
    assert_eq!(d.view(TEXTURE_VIEW).unwrap().url(), "/texture/5/image");
}

#[test]
fn step_without_framebuffer_view_is_updated() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::RemoveView(COLOR0_VIEW.into())).unwrap();
    let h = d.handle(UiEvent::DebugButton(DebugAction::NextDraw)).unwrap();
    assert_eq!(h, Handled::Updated);
    assert_eq!(d.server().count("fbo"), 1);
    assert_eq!(d.server().count("log"), 2);
}

#[test]
fn container_resize_event_is_clamped() {
    let mut d = started(FakeServer::default());
    d.handle(UiEvent::ContainerResized {
        view: COLOR0_VIEW.into(),
        size: Size::new(4000, 3000),
    })
    .unwrap();
    assert_eq!(d.view(COLOR0_VIEW).unwrap().container(), Size::new(512, 512));
}
