use super::*;

#[test]
fn action_ids_and_labels_match_toolbar() {
    let ids: Vec<&str> = DebugAction::ALL.iter().map(|a| a.id()).collect();
    assert_eq!(
        ids,
        ["play", "nextFrame", "nextGroup", "nextFbo", "nextDraw", "next"]
    );
    assert_eq!(DebugAction::NextFbo.label(), "next fbo");
    assert!(!DebugAction::Play.reloads_framebuffer());
    assert!(DebugAction::Next.reloads_framebuffer());
}

#[test]
fn action_parses_from_id_and_serde_agrees() {
    for a in DebugAction::ALL {
        assert_eq!(a.id().parse::<DebugAction>().unwrap(), a);
        assert_eq!(serde_json::to_value(a).unwrap(), a.id());
    }
    assert!("next frame".parse::<DebugAction>().is_err());
}

#[test]
fn paths_follow_server_layout() {
    assert_eq!(begin_path(), "/debug/begin");
    assert_eq!(step_path(DebugAction::NextDraw), "/debug/nextDraw");
    assert_eq!(log_path(100), "/log/-100");
    assert_eq!(framebuffer_color_path(0, 0), "/fbo/0/color0");
    assert_eq!(list_path(ObjectKind::Shader), "/shader");
    assert_eq!(detail_path(ObjectKind::Program, "7").unwrap(), "/program/7");
    assert_eq!(texture_image_path("3").unwrap(), "/texture/3/image");
}

#[test]
fn names_that_escape_the_segment_are_rejected() {
    assert!(detail_path(ObjectKind::Texture, "").is_err());
    assert!(detail_path(ObjectKind::Texture, "3/image").is_err());
    assert!(texture_image_path("3?x").is_err());
}

#[test]
fn log_tail_tolerates_missing_field() {
    let tail: LogTail = serde_json::from_str("{}").unwrap();
    assert!(tail.log.is_empty());
    let tail: LogTail = serde_json::from_str(r#"{"log":["a","b"]}"#).unwrap();
    assert_eq!(tail.log, ["a", "b"]);
}
